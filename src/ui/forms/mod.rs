//! Form rendering module
//!
//! - `field_renderer`: single field with its inline error
//! - `step_panel`: the sliding panel holding the current step
//! - `summary`: read-only review rows on the final step

mod field_renderer;
mod step_panel;
mod summary;

pub use step_panel::draw_step;
