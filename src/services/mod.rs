// cocoadiag services
// Services provide the client's behaviour: settings, theme, prediction, and the submission flow.

pub mod diagnosis_service;
pub mod prediction_client;
pub mod settings_engine;
pub mod theme_engine;
