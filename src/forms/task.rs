use super::*;
use crate::modal::{FormRenderer, OnSubmit};
use crate::state::TaskDraft;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Title,
    Due,
    Reminder,
    Note,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::Title => Field::Due,
            Field::Due => Field::Reminder,
            Field::Reminder => Field::Note,
            Field::Note => Field::Title,
        }
    }

    fn previous(self) -> Field {
        match self {
            Field::Title => Field::Note,
            Field::Due => Field::Title,
            Field::Reminder => Field::Due,
            Field::Note => Field::Reminder,
        }
    }
}

/// Form for creating a task.
///
pub struct TaskForm {
    focus: Field,
    title: String,
    due: String,
    reminder: String,
    note: TextArea<'static>,
    errors: Vec<String>,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm::new()
    }
}

impl TaskForm {
    pub fn new() -> Self {
        TaskForm {
            focus: Field::Title,
            title: String::new(),
            due: String::new(),
            reminder: String::new(),
            note: TextArea::default(),
            errors: vec![],
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn validate(&self) -> Result<TaskDraft, Vec<String>> {
        let mut errors = vec![];
        let title = self.title.trim();
        if title.is_empty() {
            errors.push("Title is required".to_string());
        }
        let due = parse_due(&self.due).unwrap_or_else(|e| {
            errors.push(e);
            None
        });
        let reminder = parse_reminder(&self.reminder).unwrap_or_else(|e| {
            errors.push(e);
            None
        });
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(TaskDraft {
            title: title.to_string(),
            due,
            reminder,
            note: note_text(&self.note),
        })
    }
}

impl FormRenderer<TaskDraft> for TaskForm {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(self.errors.len() as u16),
            ])
            .split(area);

        let rows = [
            (Field::Title, "Title", &self.title, "What needs doing?"),
            (Field::Due, "Due", &self.due, "YYYY-MM-DD"),
            (Field::Reminder, "Reminder", &self.reminder, "HH:MM"),
        ];
        for ((field, label, value, placeholder), chunk) in rows.iter().zip(chunks.iter()) {
            let focused = self.focus == *field;
            let line = field_line(
                label,
                text_value(value, placeholder, focused, theme),
                focused,
                theme,
            );
            frame.render_widget(Paragraph::new(line), *chunk);
        }

        let block = note_block(self.focus == Field::Note, theme);
        let inner = block.inner(chunks[3]);
        frame.render_widget(block, chunks[3]);
        frame.render_widget(self.note.widget(), inner);

        frame.render_widget(errors_paragraph(&self.errors, theme), chunks[4]);
    }

    fn handle_key(&mut self, key: KeyEvent, on_submit: &mut OnSubmit<TaskDraft>) {
        if is_submit(&key) {
            match self.validate() {
                Ok(draft) => {
                    self.errors.clear();
                    on_submit.submit(draft);
                }
                Err(errors) => self.errors = errors,
            }
            return;
        }
        match (key.code, self.focus) {
            (KeyCode::Tab, _) => self.focus = self.focus.next(),
            (KeyCode::BackTab, _) => self.focus = self.focus.previous(),
            (KeyCode::Enter, field) if field != Field::Note => self.focus = self.focus.next(),
            (_, Field::Title) => {
                edit_text(&mut self.title, &key, 60, any_char);
            }
            (_, Field::Due) => {
                edit_text(&mut self.due, &key, 10, date_char);
            }
            (_, Field::Reminder) => {
                edit_text(&mut self.reminder, &key, 5, time_char);
            }
            (_, Field::Note) => {
                self.note.input(key);
            }
        }
    }
}
