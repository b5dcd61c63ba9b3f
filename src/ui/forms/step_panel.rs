//! Current step panel with its slide-in transition

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use super::summary::draw_summary;
use crate::state::{StepView, Wizard, STEP_TITLES};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the fields of the current step, or the summary on the last one
pub fn draw_step(frame: &mut Frame, area: Rect, wizard: &Wizard, view: &StepView) {
    let panel = slide_rect(area, view.slide);
    if panel.width < 3 {
        return;
    }

    let title = STEP_TITLES
        .get(view.current.saturating_sub(1))
        .copied()
        .unwrap_or_default();
    let block = Block::default()
        .title(format!(
            " Step {} of {}: {title} ",
            view.current,
            wizard.steps.total()
        ))
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    if wizard.steps.is_last() {
        draw_summary(frame, inner, wizard.summary());
        return;
    }

    let fields = wizard.form.step_fields(wizard.form.focused_step());
    let constraints = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .chain([Constraint::Min(0)]);
    let rows = Layout::vertical(constraints).split(inner);

    for (index, field) in fields.iter().enumerate() {
        let is_active = index == wizard.form.active_field_index;
        draw_field(frame, rows[index], field, is_active);
    }
}

/// Shift `area` right (positive) or left (negative) by `slide` times its
/// width, clipped to the original bounds.
pub fn slide_rect(area: Rect, slide: f32) -> Rect {
    let offset = (f32::from(area.width) * slide.abs().min(1.0)).round() as u16;
    let width = area.width.saturating_sub(offset);
    if slide >= 0.0 {
        Rect {
            x: area.x + offset,
            width,
            ..area
        }
    } else {
        Rect { width, ..area }
    }
}
