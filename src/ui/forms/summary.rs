//! Review step rendering

use crate::state::Summary;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Width of the label column
const LABEL_WIDTH: usize = 15;

/// Draw the summary rows, or a placeholder until one has been computed
pub fn draw_summary(frame: &mut Frame, area: Rect, summary: Option<&Summary>) {
    let Some(summary) = summary else {
        let empty = Paragraph::new("Nothing to review yet")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let mut lines: Vec<Line> = summary
        .rows()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<LABEL_WIDTH$}"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(value.to_string()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Press Enter to submit or Esc to go back and make changes.",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
