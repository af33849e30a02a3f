use super::*;
use crate::modal::{FormRenderer, OnSubmit};
use crate::state::{HabitDraft, RepeatDay};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Title,
    Days,
    Reminder,
    Paused,
    Note,
}

impl Field {
    const ORDER: [Field; 5] = [
        Field::Title,
        Field::Days,
        Field::Reminder,
        Field::Paused,
        Field::Note,
    ];

    fn step(self, forward: bool) -> Field {
        let i = Field::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Field::ORDER.len();
        let next = if forward { (i + 1) % len } else { (i + len - 1) % len };
        Field::ORDER[next]
    }
}

/// Form for creating or editing a habit.
///
/// `Tab`/`Shift+Tab` move between fields, `Left`/`Right` pick a day and
/// `Space` toggles it (or the pause switch), `Ctrl+S` submits.
pub struct HabitForm {
    focus: Field,
    title: String,
    days: [bool; 7],
    day_cursor: usize,
    reminder: String,
    paused: bool,
    note: TextArea<'static>,
    errors: Vec<String>,
}

impl Default for HabitForm {
    fn default() -> Self {
        HabitForm::new()
    }
}

impl HabitForm {
    pub fn new() -> Self {
        HabitForm {
            focus: Field::Title,
            title: String::new(),
            days: [false; 7],
            day_cursor: 0,
            reminder: String::new(),
            paused: false,
            note: TextArea::default(),
            errors: vec![],
        }
    }

    /// Return a form prefilled with an existing habit's values.
    ///
    pub fn from_draft(draft: &HabitDraft) -> Self {
        let mut days = [false; 7];
        for day in &draft.days {
            if let Some(i) = RepeatDay::ALL.iter().position(|d| d == day) {
                days[i] = true;
            }
        }
        HabitForm {
            title: draft.title.clone(),
            days,
            reminder: format_reminder(draft.reminder),
            paused: draft.paused,
            note: note_area(&draft.note),
            ..HabitForm::new()
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Check every field, returning the draft or all error messages.
    ///
    pub fn validate(&self) -> Result<HabitDraft, Vec<String>> {
        let mut errors = vec![];
        let title = self.title.trim();
        if title.is_empty() {
            errors.push("Title is required".to_string());
        }
        let days: Vec<RepeatDay> = RepeatDay::ALL
            .iter()
            .zip(self.days.iter())
            .filter(|(_, on)| **on)
            .map(|(day, _)| *day)
            .collect();
        if days.is_empty() {
            errors.push("Pick at least one day".to_string());
        }
        let reminder = match parse_reminder(&self.reminder) {
            Ok(reminder) => reminder,
            Err(e) => {
                errors.push(e);
                None
            }
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(HabitDraft {
            title: title.to_string(),
            days,
            reminder,
            paused: self.paused,
            note: note_text(&self.note),
        })
    }

    fn edit_focused(&mut self, key: KeyEvent) {
        match self.focus {
            Field::Title => {
                edit_text(&mut self.title, &key, 60, any_char);
            }
            Field::Days => match key.code {
                KeyCode::Left => self.day_cursor = (self.day_cursor + 6) % 7,
                KeyCode::Right => self.day_cursor = (self.day_cursor + 1) % 7,
                KeyCode::Char(' ') => self.days[self.day_cursor] = !self.days[self.day_cursor],
                _ => {}
            },
            Field::Reminder => {
                edit_text(&mut self.reminder, &key, 5, time_char);
            }
            Field::Paused => {
                if key.code == KeyCode::Char(' ') {
                    self.paused = !self.paused;
                }
            }
            Field::Note => {
                self.note.input(key);
            }
        }
    }

    fn day_spans(&self, theme: &Theme) -> Vec<Span<'static>> {
        RepeatDay::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, day)| {
                let mut style = if self.days[i] {
                    styling::primary_button_style(theme, false)
                } else {
                    styling::muted_text_style(theme)
                };
                if self.focus == Field::Days && i == self.day_cursor {
                    style = style.patch(styling::active_list_item_style(theme));
                }
                vec![
                    Span::styled(format!(" {} ", day.short_name()), style),
                    Span::raw(" "),
                ]
            })
            .collect()
    }
}

impl FormRenderer<HabitDraft> for HabitForm {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                         // Title
                Constraint::Length(1),                         // Days
                Constraint::Length(1),                         // Reminder
                Constraint::Length(1),                         // Paused
                Constraint::Min(3),                            // Note
                Constraint::Length(self.errors.len() as u16), // Errors
            ])
            .split(area);

        let title_focused = self.focus == Field::Title;
        let reminder_focused = self.focus == Field::Reminder;
        let lines = [
            field_line(
                "Title",
                text_value(&self.title, "What do you want to do?", title_focused, theme),
                title_focused,
                theme,
            ),
            field_line("Repeat", self.day_spans(theme), self.focus == Field::Days, theme),
            field_line(
                "Reminder",
                text_value(&self.reminder, "HH:MM", reminder_focused, theme),
                reminder_focused,
                theme,
            ),
            field_line(
                "Paused",
                vec![Span::styled(
                    if self.paused { "[x]" } else { "[ ]" },
                    styling::normal_text_style(theme),
                )],
                self.focus == Field::Paused,
                theme,
            ),
        ];
        for (line, chunk) in lines.into_iter().zip(chunks.iter()) {
            frame.render_widget(Paragraph::new(line), *chunk);
        }

        let block = note_block(self.focus == Field::Note, theme);
        let inner = block.inner(chunks[4]);
        frame.render_widget(block, chunks[4]);
        frame.render_widget(self.note.widget(), inner);

        frame.render_widget(errors_paragraph(&self.errors, theme), chunks[5]);
    }

    fn handle_key(&mut self, key: KeyEvent, on_submit: &mut OnSubmit<HabitDraft>) {
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
        match key.code {
            KeyCode::Tab => self.focus = self.focus.step(true),
            KeyCode::BackTab => self.focus = self.focus.step(false),
            KeyCode::Enter if self.focus != Field::Note => self.focus = self.focus.step(true),
            _ => self.edit_focused(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{ctrl_s, press};
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn type_text(form: &mut HabitForm, text: &str, on_submit: &mut OnSubmit<HabitDraft>) {
        for c in text.chars() {
            form.handle_key(press(KeyCode::Char(c)), on_submit);
        }
    }

    #[test]
    fn empty_form_reports_all_errors() {
        let mut form = HabitForm::new();
        let mut on_submit = OnSubmit::new();
        form.handle_key(ctrl_s(), &mut on_submit);
        assert!(!on_submit.is_submitted());
        assert_eq!(
            form.errors(),
            &["Title is required".to_string(), "Pick at least one day".to_string()]
        );
    }

    #[test]
    fn valid_input_submits_draft() {
        let mut form = HabitForm::new();
        let mut on_submit = OnSubmit::new();
        type_text(&mut form, "  Read  ", &mut on_submit);
        form.handle_key(press(KeyCode::Tab), &mut on_submit);
        form.handle_key(press(KeyCode::Char(' ')), &mut on_submit);
        form.handle_key(press(KeyCode::Right), &mut on_submit);
        form.handle_key(press(KeyCode::Right), &mut on_submit);
        form.handle_key(press(KeyCode::Char(' ')), &mut on_submit);
        form.handle_key(press(KeyCode::Enter), &mut on_submit);
        type_text(&mut form, "21:15", &mut on_submit);
        form.handle_key(press(KeyCode::Tab), &mut on_submit);
        form.handle_key(press(KeyCode::Char(' ')), &mut on_submit);
        form.handle_key(press(KeyCode::Tab), &mut on_submit);
        type_text(&mut form, "ten pages", &mut on_submit);
        assert!(!on_submit.is_submitted());

        form.handle_key(ctrl_s(), &mut on_submit);
        let draft = on_submit.into_value().unwrap();
        assert_eq!(draft.title, "Read");
        assert_eq!(draft.days, vec![RepeatDay::Monday, RepeatDay::Wednesday]);
        assert_eq!(draft.reminder, NaiveTime::from_hms_opt(21, 15, 0));
        assert!(draft.paused);
        assert_eq!(draft.note, "ten pages");
    }

    #[test]
    fn bad_reminder_blocks_submit() {
        let mut form = HabitForm::from_draft(&HabitDraft {
            title: "Walk".to_string(),
            days: vec![RepeatDay::Sunday],
            ..HabitDraft::default()
        });
        let mut on_submit = OnSubmit::new();
        form.focus = Field::Reminder;
        type_text(&mut form, "99:99", &mut on_submit);
        form.handle_key(ctrl_s(), &mut on_submit);
        assert!(!on_submit.is_submitted());
        assert_eq!(form.errors().len(), 1);
        assert!(form.errors()[0].starts_with("Reminder"));
    }

    #[test]
    fn from_draft_round_trips() {
        let draft = HabitDraft {
            title: "Meditate".to_string(),
            days: vec![RepeatDay::Tuesday, RepeatDay::Saturday],
            reminder: NaiveTime::from_hms_opt(6, 5, 0),
            paused: true,
            note: "ten minutes".to_string(),
        };
        assert_eq!(HabitForm::from_draft(&draft).validate(), Ok(draft));
    }

    #[test]
    fn focus_wraps_both_ways() {
        assert_eq!(Field::Title.step(false), Field::Note);
        assert_eq!(Field::Note.step(true), Field::Title);
    }

    #[test]
    fn render_shows_fields_and_errors() {
        let mut form = HabitForm::new();
        form.handle_key(ctrl_s(), &mut OnSubmit::new());
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                form.render(frame, area, &Theme::default());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Title:"));
        assert!(text.contains("Mon"));
        assert!(text.contains("Note"));
        assert!(text.contains("Title is required"));
    }
}
