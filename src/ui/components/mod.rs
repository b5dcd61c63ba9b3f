//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_nav_button, BUTTON_HEIGHT};
pub use dialog::render_success_dialog;
