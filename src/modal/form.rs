//! Form renderer capability.
//!
//! A form is any value implementing [`FormRenderer<T>`]: the modal host draws
//! it and feeds it key presses together with an [`OnSubmit<T>`] handle. The
//! form decides when its input is complete (and valid) and hands the result to
//! the handle. Forms submit on `Ctrl+S` by convention; the host advertises that
//! key next to the submit label.

use super::descriptor::{Placement, SizeHint};
use crate::ui::Theme;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

/// Type-erased form result travelling through the store.
pub type Payload = Box<dyn Any + Send>;

/// A pluggable form producing a value of type `T`.
///
pub trait FormRenderer<T>: Send {
    /// Draw the form body inside `area`.
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// React to a key press. Call `on_submit.submit(value)` once the form is
    /// complete; otherwise just update internal input state.
    fn handle_key(&mut self, key: KeyEvent, on_submit: &mut OnSubmit<T>);
}

/// Submit callback handed to a form for the duration of one key press.
///
pub struct OnSubmit<T> {
    value: Option<T>,
}

impl<T> OnSubmit<T> {
    pub fn new() -> Self {
        OnSubmit { value: None }
    }

    /// Deliver the form's result. A later call within the same key press
    /// replaces an earlier one.
    pub fn submit(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn is_submitted(&self) -> bool {
        self.value.is_some()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T> Default for OnSubmit<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe view of a `FormRenderer<T>` with `T` hidden behind `Payload`.
///
trait ErasedRenderer: Send {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);
    fn handle_key(&mut self, key: KeyEvent) -> Option<Payload>;
}

struct Typed<T> {
    renderer: Box<dyn FormRenderer<T>>,
    _result: PhantomData<fn() -> T>,
}

impl<T: Send + 'static> ErasedRenderer for Typed<T> {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.renderer.render(frame, area, theme);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Payload> {
        let mut on_submit = OnSubmit::new();
        self.renderer.handle_key(key, &mut on_submit);
        on_submit.into_value().map(|value| Box::new(value) as Payload)
    }
}

/// Shared handle to a form's renderer.
///
/// The modal host clones it out of the store so the form runs without the
/// store locked; a form may then ask follow-up questions of its own.
#[derive(Clone)]
pub struct FormHandle {
    renderer: Arc<Mutex<Box<dyn ErasedRenderer>>>,
}

impl FormHandle {
    fn lock(&self) -> std::sync::MutexGuard<'_, Box<dyn ErasedRenderer>> {
        self.renderer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.lock().render(frame, area, theme);
    }

    /// Forward a key press to the form; returns the boxed result if the form
    /// submitted during this press.
    pub fn handle_key(&self, key: KeyEvent) -> Option<Payload> {
        self.lock().handle_key(key)
    }
}

/// A form descriptor whose result type has been erased.
///
#[derive(Clone)]
pub struct ErasedForm {
    title: String,
    submit_label: String,
    cancel_label: String,
    placement: Placement,
    size: SizeHint,
    renderer: FormHandle,
}

impl ErasedForm {
    pub(super) fn new<T: Send + 'static>(
        title: String,
        submit_label: String,
        cancel_label: String,
        placement: Placement,
        size: SizeHint,
        renderer: Box<dyn FormRenderer<T>>,
    ) -> Self {
        let erased: Box<dyn ErasedRenderer> = Box::new(Typed {
            renderer,
            _result: PhantomData,
        });
        ErasedForm {
            title,
            submit_label,
            cancel_label,
            placement,
            size,
            renderer: FormHandle {
                renderer: Arc::new(Mutex::new(erased)),
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn size(&self) -> SizeHint {
        self.size
    }

    pub fn handle(&self) -> FormHandle {
        self.renderer.clone()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.renderer.render(frame, area, theme);
    }

    pub fn handle_key(&self, key: KeyEvent) -> Option<Payload> {
        self.renderer.handle_key(key)
    }
}

impl fmt::Debug for ErasedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedForm")
            .field("title", &self.title)
            .field("placement", &self.placement)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::modal::descriptor::FormDescriptor;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::widgets::Paragraph;

    /// Minimal form: typed characters accumulate, Enter submits them.
    pub(crate) struct EchoForm {
        pub(crate) buffer: String,
    }

    impl EchoForm {
        pub(crate) fn new() -> Self {
            EchoForm {
                buffer: String::new(),
            }
        }
    }

    impl FormRenderer<String> for EchoForm {
        fn render(&self, frame: &mut Frame, area: Rect, _theme: &Theme) {
            frame.render_widget(Paragraph::new(self.buffer.as_str()), area);
        }

        fn handle_key(&mut self, key: KeyEvent, on_submit: &mut OnSubmit<String>) {
            match key.code {
                KeyCode::Char(c) => self.buffer.push(c),
                KeyCode::Enter => on_submit.submit(self.buffer.clone()),
                _ => {}
            }
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_on_submit_last_value_wins() {
        let mut on_submit = OnSubmit::new();
        assert!(!on_submit.is_submitted());
        on_submit.submit(1);
        on_submit.submit(2);
        assert!(on_submit.is_submitted());
        assert_eq!(on_submit.into_value(), Some(2));
    }

    #[test]
    fn test_erased_form_round_trips_payload() {
        let form = FormDescriptor::new("Echo", EchoForm::new())
            .submit_label("Send")
            .erase();
        assert_eq!(form.title(), "Echo");
        assert_eq!(form.submit_label(), "Send");
        assert_eq!(form.cancel_label(), "Cancel");

        assert!(form.handle_key(press(KeyCode::Char('h'))).is_none());
        assert!(form.handle_key(press(KeyCode::Char('i'))).is_none());
        let payload = form.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(*payload.downcast::<String>().unwrap(), "hi");
    }

    #[test]
    fn test_handles_share_input_state() {
        let form = FormDescriptor::new("Echo", EchoForm::new()).erase();
        let handle = form.handle();
        assert!(handle.handle_key(press(KeyCode::Char('o'))).is_none());
        assert!(form.handle_key(press(KeyCode::Char('k'))).is_none());
        let payload = handle.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(*payload.downcast::<String>().unwrap(), "ok");
    }
}
