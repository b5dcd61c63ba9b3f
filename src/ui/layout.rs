//! Layout components (header, step panel, navigation, status bar)

use super::components::{render_nav_button, BUTTON_HEIGHT};
use super::progress::HEADER_HEIGHT;
use crate::app::App;
use crate::state::{AutosaveStatus, FieldKind, Form, StepView, WizardPhase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of the wizard screen
pub struct WizardLayout {
    pub header: Rect,
    pub body: Rect,
    pub navigation: Rect,
}

/// Split the screen, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> WizardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Progress
            Constraint::Min(0),                // Step panel
            Constraint::Length(BUTTON_HEIGHT), // Back / Next
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    WizardLayout {
        header: chunks[0],
        body: chunks[1],
        navigation: chunks[2],
    }
}

/// Draw Back (when allowed) and the primary Next/Submit button
pub fn draw_navigation(frame: &mut Frame, area: Rect, view: &StepView) {
    let [back_area, _, primary_area] = Layout::horizontal([
        Constraint::Length(14),
        Constraint::Min(0),
        Constraint::Length(18),
    ])
    .areas(area);

    if view.show_back {
        render_nav_button(frame, back_area, "Esc", "Back", false);
    }
    render_nav_button(frame, primary_area, "Enter", view.primary_label, true);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let hints = match app.wizard.phase() {
        WizardPhase::Editing => field_hints(app),
        WizardPhase::Submitted => " Enter:start over | q:quit".to_string(),
    };
    let status = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::Gray),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Autosave indicator on the right
    let status = app.autosave_status();
    let label = status.label();
    if label.is_empty() {
        return;
    }
    let color = match status {
        AutosaveStatus::Failed => Color::Red,
        AutosaveStatus::Saving => Color::Yellow,
        _ => Color::Green,
    };
    let text = format!(" {label} ");
    let width = text.chars().count() as u16;
    let indicator_area = Rect {
        x: area.width.saturating_sub(width),
        y: status_area.y,
        width: width.min(area.width),
        height: 1,
    };
    let indicator =
        Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(color));
    frame.render_widget(indicator, indicator_area);
}

/// Key hints for the active field
fn field_hints(app: &App) -> String {
    let form = &app.wizard.form;
    let kind = form.get_field(form.active_field()).map(|field| field.kind);
    let edit = match kind {
        Some(FieldKind::Radio) => "←/→:move Space:choose",
        Some(FieldKind::Checkbox) => "←/→:move Space:toggle",
        Some(FieldKind::Select) => "←/→:change",
        Some(_) => "type to edit",
        None => "Enter:submit",
    };

    let mut hints = format!(" Tab:next field | {edit}");
    if kind == Some(FieldKind::Password) {
        hints.push_str(&format!(" | {}:show", crate::platform::REVEAL_SHORTCUT));
    }
    hints.push_str(&format!(" | {}:reset | ^C:quit", crate::platform::RESET_SHORTCUT));
    hints
}
