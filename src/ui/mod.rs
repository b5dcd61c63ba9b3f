//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod progress;

use crate::app::App;
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    draw_at(frame, app, Instant::now());
}

/// Draw the wizard as it looks at `now` (the slide transition depends on it)
fn draw_at(frame: &mut Frame, app: &App, now: Instant) {
    // Submission hides the form and progress indicator
    if app.wizard.is_submitted() {
        components::render_success_dialog(frame);
    } else {
        let view = app.wizard.steps.view(now);
        let areas = layout::create_layout(frame.area());
        progress::draw_progress(frame, areas.header, &view);
        forms::draw_step(frame, areas.body, &app.wizard, &view);
        layout::draw_navigation(frame, areas.navigation, &view);
    }

    layout::draw_status_bar(frame, app);
}
