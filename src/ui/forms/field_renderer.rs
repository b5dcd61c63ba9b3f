//! Field rendering utilities for forms

use crate::state::{FieldKind, FieldValue, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one rendered field
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a form field with its inline error, if any
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let border_style = if field.error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let marker = if field.required { "*" } else { "" };
    let mut block = Block::default()
        .title(format!(" {}{marker} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = field.error {
        block = block.title_bottom(Line::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        ));
    }

    let content = if field.kind.is_text_like() {
        text_line(field, is_active)
    } else {
        Line::from(option_spans(field, is_active))
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Typed value with the block cursor when active
fn text_line(field: &FormField, is_active: bool) -> Line<'static> {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    if display_value.is_empty() && !is_active {
        return Line::styled("(empty)", style);
    }

    let mut spans = vec![Span::styled(display_value, style)];
    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        if field.kind == FieldKind::Password {
            let hint = if field.revealed { "hide" } else { "show" };
            spans.push(Span::styled(
                format!("  ({}:{hint})", crate::platform::REVEAL_SHORTCUT),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    Line::from(spans)
}

/// One span per option for radio, checkbox and select fields
pub fn option_spans(field: &FormField, is_active: bool) -> Vec<Span<'static>> {
    let highlight = |index: usize| {
        if is_active && index == field.option_cursor {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        }
    };

    match (&field.value, field.kind) {
        (FieldValue::Choice(choice), FieldKind::Select) => {
            let label = choice
                .and_then(|i| field.options.get(i))
                .copied()
                .unwrap_or("Select...");
            let style = if is_active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            vec![
                Span::styled("◀ ", style),
                Span::styled(label, style.add_modifier(Modifier::BOLD)),
                Span::styled(" ▶", style),
            ]
        }
        (FieldValue::Choice(choice), _) => field
            .options
            .iter()
            .enumerate()
            .flat_map(|(i, option)| {
                let mark = if *choice == Some(i) { "(•)" } else { "( )" };
                [
                    Span::styled(format!("{mark} {option}"), highlight(i)),
                    Span::raw("  "),
                ]
            })
            .collect(),
        (FieldValue::Multi(flags), _) => field
            .options
            .iter()
            .zip(flags)
            .enumerate()
            .flat_map(|(i, (option, checked))| {
                let mark = if *checked { "[x]" } else { "[ ]" };
                [
                    Span::styled(format!("{mark} {option}"), highlight(i)),
                    Span::raw("  "),
                ]
            })
            .collect(),
        (FieldValue::Text(_), _) => Vec::new(),
    }
}
