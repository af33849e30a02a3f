//! Entry forms shown inside the modal host.
//!
//! Each form implements [`FormRenderer`](crate::modal::FormRenderer) for the
//! draft type it produces. Forms own their input state, validate on `Ctrl+S`
//! and only submit a valid draft; validation errors are drawn inline.

mod habit;
mod task;

pub use habit::HabitForm;
pub use task::TaskForm;

use crate::ui::widgets::styling;
use crate::ui::Theme;
use chrono::{NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_textarea::TextArea;

const LABEL_WIDTH: usize = 10;
const TIME_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Return true for the key combination that submits a form.
///
pub fn is_submit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn is_typing(key: &KeyEvent) -> bool {
    key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT
}

/// Apply a single-line edit to `buffer`. Returns true if the key was used.
///
fn edit_text(buffer: &mut String, key: &KeyEvent, max_len: usize, accept: fn(char) -> bool) -> bool {
    match key.code {
        KeyCode::Char(c) if is_typing(key) && accept(c) && buffer.chars().count() < max_len => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

fn any_char(_: char) -> bool {
    true
}

fn time_char(c: char) -> bool {
    c.is_ascii_digit() || c == ':'
}

fn date_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}

/// Parse an optional `HH:MM` reminder. Empty input means no reminder.
///
fn parse_reminder(input: &str) -> Result<Option<NaiveTime>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(input, TIME_FORMAT)
        .map(Some)
        .map_err(|_| "Reminder must be a time like 07:30".to_string())
}

/// Parse an optional `YYYY-MM-DD` due date. Empty input means no due date.
///
fn parse_due(input: &str) -> Result<Option<NaiveDate>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(Some)
        .map_err(|_| "Due date must look like 2024-01-31".to_string())
}

fn format_reminder(reminder: Option<NaiveTime>) -> String {
    reminder
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn note_text(note: &TextArea) -> String {
    note.lines().join("\n").trim().to_string()
}

fn note_area(text: &str) -> TextArea<'static> {
    if text.is_empty() {
        TextArea::default()
    } else {
        TextArea::from(text.lines().map(str::to_string).collect::<Vec<_>>())
    }
}

/// A `Label: value` row, highlighted when focused.
///
fn field_line<'a>(label: &str, value: Vec<Span<'a>>, focused: bool, theme: &Theme) -> Line<'a> {
    let label_style = if focused {
        styling::active_block_border_style(theme).patch(styling::active_block_title_style())
    } else {
        styling::muted_text_style(theme)
    };
    let marker = if focused { "> " } else { "  " };
    let mut spans = vec![Span::styled(
        format!("{}{:<width$}", marker, format!("{}:", label), width = LABEL_WIDTH),
        label_style,
    )];
    spans.extend(value);
    Line::from(spans)
}

fn text_value<'a>(value: &str, placeholder: &str, focused: bool, theme: &Theme) -> Vec<Span<'a>> {
    let mut spans = if value.is_empty() {
        vec![Span::styled(
            placeholder.to_string(),
            styling::muted_text_style(theme),
        )]
    } else {
        vec![Span::styled(value.to_string(), styling::normal_text_style(theme))]
    };
    if focused {
        spans.push(Span::styled("_", styling::active_block_border_style(theme)));
    }
    spans
}

fn note_block(focused: bool, theme: &Theme) -> Block<'static> {
    let border = if focused {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    Block::default()
        .borders(Borders::ALL)
        .title("Note")
        .border_style(border)
}

fn errors_paragraph<'a>(errors: &[String], theme: &Theme) -> Paragraph<'a> {
    let lines: Vec<Line> = errors
        .iter()
        .map(|e| Line::from(Span::styled(e.clone(), styling::error_text_style(theme))))
        .collect();
    Paragraph::new(lines).wrap(Wrap { trim: true })
}
