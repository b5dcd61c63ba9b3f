//! Step indicators and progress bar

use crate::state::{StepStatus, StepView, STEP_TITLES};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Rows taken by the header (borders + indicators + gauge)
pub const HEADER_HEIGHT: u16 = 4;

/// Draw the indicator row and the progress gauge
pub fn draw_progress(frame: &mut Frame, area: Rect, view: &StepView) {
    let block = Block::default()
        .title(" Registration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [indicator_area, gauge_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

    frame.render_widget(Paragraph::new(indicator_line(view)), indicator_area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(view.progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", view.progress * 100.0));
    frame.render_widget(gauge, gauge_area);
}

/// One labelled marker per step
fn indicator_line(view: &StepView) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, status) in view.indicators.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let title = STEP_TITLES.get(index).copied().unwrap_or_default();
        let (marker, style) = match status {
            StepStatus::Completed => ("✓".to_string(), Style::default().fg(Color::Green)),
            StepStatus::Active => (
                (index + 1).to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            StepStatus::Pending => ((index + 1).to_string(), Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(format!("{marker} {title}"), style));
    }
    Line::from(spans)
}
