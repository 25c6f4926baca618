// cocoadiag UI state
// Page-side state and rendering: history panel, image form, navigation menu.

pub mod history_view;
pub mod image_form;
pub mod nav_menu;
