// cocoadiag shared types
// Data models and error enums used by storage, managers, services, and the UI layer.

pub mod diagnosis;
pub mod errors;
pub mod prediction;
pub mod settings;
