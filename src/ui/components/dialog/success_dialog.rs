//! Success dialog shown after submission

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

const SUCCESS_MESSAGE: &str =
    "Thank you for registering.\nYour information has been submitted successfully.";

/// Render the success view centered on the screen
pub fn render_success_dialog(frame: &mut Frame) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" to start over or "),
        Span::styled("q", key_style),
        Span::raw(" to quit"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Registration Complete",
            title_color: Color::Green,
            border_color: Color::Green,
            message: SUCCESS_MESSAGE,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
