use super::Frame;
use crate::config::ModalSettings;
use crate::modal::{
    Bridge, ConfirmDescriptor, ErasedForm, Orchestrator, Placement, RequestKind, SizeHint,
};
use crate::ui::theme::Theme;
use crate::ui::widgets::{popup, styling};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::*;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// The single mounted presentation of whatever modal request is active.
///
/// Everything drawn comes from the orchestrator's store; the host keeps no
/// request data of its own.
pub struct ModalHost {
    orchestrator: Orchestrator,
    settings: ModalSettings,
}

impl ModalHost {
    /// Mount the host, registering its orchestrator with `bridge` so that
    /// requests from anywhere reach it.
    ///
    pub fn mount(orchestrator: Orchestrator, bridge: &Bridge, settings: ModalSettings) -> Self {
        debug!("Mounting modal host...");
        bridge.register_handlers(orchestrator.clone());
        ModalHost {
            orchestrator,
            settings,
        }
    }

    pub fn is_open(&self) -> bool {
        self.orchestrator.is_open()
    }

    fn resolve_hints(&self, placement: Placement, size: SizeHint) -> (Placement, SizeHint) {
        let placement = match placement {
            Placement::Default => self.settings.default_placement,
            other => other,
        };
        let size = match size {
            SizeHint::Default => self.settings.default_size,
            other => other,
        };
        (placement, size)
    }

    fn area_for(&self, request: &RequestKind, screen: Rect) -> Rect {
        let (placement, size) = self.resolve_hints(request.placement(), request.size());
        popup::popup_area(placement, size, screen)
    }

    pub fn active_title(&self) -> Option<String> {
        self.orchestrator
            .lock()
            .active()
            .map(|request| request.title().to_string())
    }

    /// Where the active request is drawn on a screen of the given size.
    ///
    pub fn active_area(&self, screen: Rect) -> Option<Rect> {
        let store = self.orchestrator.lock();
        store.active().map(|request| self.area_for(request, screen))
    }

    /// Render the active request on top of `frame`, or nothing when closed.
    ///
    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        let request = match self.orchestrator.lock().active() {
            Some(request) => request.clone(),
            None => return,
        };
        let area = self.area_for(&request, frame.size());
        frame.render_widget(Clear, area);
        match &request {
            RequestKind::Confirm(descriptor) => render_confirm(frame, area, descriptor, theme),
            RequestKind::Form(form) => render_form(frame, area, form, theme),
        }
    }

    /// Route a key press to the active request. Returns `true` when the key
    /// was consumed, which is always the case while a request is open.
    ///
    /// The store lock is only held to look up the active request and to
    /// settle it, so forms and continuations may open requests of their own.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        let (form, opened) = {
            let store = self.orchestrator.lock();
            let form = match store.active() {
                None => return false,
                Some(RequestKind::Confirm(_)) => None,
                Some(RequestKind::Form(form)) => Some(form.handle()),
            };
            (form, store.opened_count())
        };

        let form = match form {
            Some(form) => form,
            None => {
                match key.code {
                    KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                        self.orchestrator.confirm();
                    }
                    KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                        self.orchestrator.cancel_if_current(opened);
                    }
                    _ => {}
                }
                return true;
            }
        };

        if key.code == KeyCode::Esc && key.modifiers == KeyModifiers::NONE {
            self.orchestrator.cancel_if_current(opened);
        } else if let Some(payload) = form.handle_key(key) {
            self.orchestrator.submit_if_current(opened, payload);
        }
        true
    }
}

fn modal_block<'a>(title: &'a str, border: Style, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", title),
            styling::active_block_title_style().fg(border.fg.unwrap_or(theme.text.to_color())),
        ))
        .border_style(border)
}

fn render_confirm(frame: &mut Frame, area: Rect, descriptor: &ConfirmDescriptor, theme: &Theme) {
    let border = if descriptor.is_destructive() {
        styling::error_text_style(theme)
    } else {
        styling::active_block_border_style(theme)
    };
    let block = modal_block(descriptor.get_title(), border, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    let body = Paragraph::new(descriptor.get_body())
        .style(styling::normal_text_style(theme))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, chunks[0]);

    let buttons = Line::from(vec![
        Span::styled(
            format!(" {} (Esc) ", descriptor.get_cancel_label()),
            styling::secondary_button_style(theme),
        ),
        Span::raw("   "),
        Span::styled(
            format!(" {} (Enter) ", descriptor.get_confirm_label()),
            styling::primary_button_style(theme, descriptor.is_destructive()),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        chunks[1],
    );
}

fn render_form(frame: &mut Frame, area: Rect, form: &ErasedForm, theme: &Theme) {
    let block = modal_block(form.title(), styling::active_block_border_style(theme), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Form body
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    form.render(frame, chunks[0], theme);

    let hints = Line::from(vec![
        Span::styled(
            format!(" {} (Esc) ", form.cancel_label()),
            styling::secondary_button_style(theme),
        ),
        Span::raw("   "),
        Span::styled(
            format!(" {} (Ctrl+S) ", form.submit_label()),
            styling::primary_button_style(theme, false),
        ),
    ]);
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::form::tests::EchoForm;
    use crate::modal::{
        ConfirmDescriptor, ConfirmFuture, FormDescriptor, FormRenderer, ModalError, OnSubmit,
        ReplacePolicy,
    };
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::timeout;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mounted() -> (Orchestrator, Bridge, ModalHost) {
        mounted_with(ReplacePolicy::Supersede)
    }

    fn mounted_with(policy: ReplacePolicy) -> (Orchestrator, Bridge, ModalHost) {
        let orchestrator = Orchestrator::new(policy);
        let bridge = Bridge::new();
        let host = ModalHost::mount(orchestrator.clone(), &bridge, ModalSettings::default());
        (orchestrator, bridge, host)
    }

    fn draw(host: &ModalHost) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| host.render(frame, &Theme::default()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<Vec<_>>()
            .join("")
    }

    fn delete_habit() -> ConfirmDescriptor {
        ConfirmDescriptor::new("Delete Habit", "Are you sure?")
            .confirm_label("Delete")
            .destructive()
    }

    #[test]
    fn active_accessors_follow_store() {
        let (_, bridge, host) = mounted();
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(host.active_title(), None);
        assert_eq!(host.active_area(screen), None);

        let _future = bridge
            .confirmation(delete_habit().placement(Placement::Bottom))
            .unwrap();
        assert_eq!(host.active_title(), Some("Delete Habit".to_string()));
        assert_eq!(host.active_area(screen).map(|a| a.bottom()), Some(24));
    }

    #[test]
    fn mount_registers_handlers() {
        let (_, bridge, _host) = mounted();
        assert!(bridge.is_initialized());
    }

    #[test]
    fn closed_host_renders_nothing_and_ignores_keys() {
        let (_, _, host) = mounted();
        let text = buffer_text(&draw(&host));
        assert!(text.trim().is_empty());
        assert!(!host.handle_key(press(KeyCode::Enter)));
    }

    #[test]
    fn confirm_renders_title_body_and_buttons() {
        let (_, bridge, host) = mounted();
        let _future = bridge.confirmation(delete_habit()).unwrap();
        let text = buffer_text(&draw(&host));
        assert!(text.contains("Delete Habit"));
        assert!(text.contains("Are you sure?"));
        assert!(text.contains("Delete (Enter)"));
        assert!(text.contains("Cancel (Esc)"));
    }

    #[tokio::test]
    async fn enter_confirms() {
        let (orchestrator, bridge, host) = mounted();
        let future = bridge.confirmation(delete_habit()).unwrap();
        assert!(host.handle_key(press(KeyCode::Enter)));
        assert!(!orchestrator.is_open());
        assert_eq!(future.await, Ok(true));
    }

    #[tokio::test]
    async fn escape_declines_confirmation() {
        let (_, bridge, host) = mounted();
        let future = bridge.confirmation(delete_habit()).unwrap();
        assert!(host.handle_key(press(KeyCode::Char('x'))));
        assert!(host.is_open());
        assert!(host.handle_key(press(KeyCode::Esc)));
        assert!(!host.is_open());
        assert_eq!(future.await, Ok(false));
    }

    #[tokio::test]
    async fn form_keys_reach_renderer_and_submit() {
        let (_, bridge, host) = mounted();
        let future = bridge
            .form(FormDescriptor::new("Add Habit", EchoForm::new()).submit_label("Create Habit"))
            .unwrap();
        for c in "Run 5k".chars() {
            assert!(host.handle_key(press(KeyCode::Char(c))));
        }
        let text = buffer_text(&draw(&host));
        assert!(text.contains("Add Habit"));
        assert!(text.contains("Run 5k"));
        assert!(text.contains("Create Habit (Ctrl+S)"));

        assert!(host.handle_key(press(KeyCode::Enter)));
        assert!(!host.is_open());
        assert_eq!(future.await, Ok("Run 5k".to_string()));
    }

    #[tokio::test]
    async fn escape_dismisses_form() {
        let (_, bridge, host) = mounted();
        let future = bridge
            .form(FormDescriptor::new("Add Habit", EchoForm::new()))
            .unwrap();
        assert!(host.handle_key(press(KeyCode::Esc)));
        assert!(!host.is_open());
        assert_eq!(future.await, Err(ModalError::Cancelled));
    }

    /// Form that asks for confirmation through the bridge when `?` is typed.
    struct AskingForm {
        bridge: Bridge,
        asked: Arc<Mutex<Option<ConfirmFuture>>>,
    }

    impl FormRenderer<String> for AskingForm {
        fn render(&self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}

        fn handle_key(&mut self, key: KeyEvent, on_submit: &mut OnSubmit<String>) {
            match key.code {
                KeyCode::Char('?') => {
                    let future = self.bridge.confirmation(ConfirmDescriptor::save_changes());
                    *self.asked.lock().unwrap() = future.ok();
                }
                KeyCode::Enter => on_submit.submit("late".to_string()),
                _ => {}
            }
        }
    }

    #[tokio::test]
    async fn form_can_ask_through_bridge_while_handling_a_key() {
        let (orchestrator, bridge, host) = mounted();
        let asked = Arc::new(Mutex::new(None));
        let form = FormDescriptor::new(
            "Edit Habit",
            AskingForm {
                bridge: bridge.clone(),
                asked: Arc::clone(&asked),
            },
        );
        let future = bridge.form(form).unwrap();
        let stale = orchestrator.lock().opened_count();

        assert!(host.handle_key(press(KeyCode::Char('?'))));
        assert_eq!(host.active_title(), Some("Save Changes".to_string()));
        assert_eq!(future.await, Err(ModalError::Superseded));
        let text = buffer_text(&draw(&host));
        assert!(text.contains("Save Changes"));

        // A result from the replaced form must not reach the new request.
        assert!(!orchestrator.submit_if_current(stale, Box::new("late".to_string())));
        assert!(host.is_open());

        assert!(host.handle_key(press(KeyCode::Enter)));
        let confirm = asked.lock().unwrap().take().unwrap();
        assert_eq!(confirm.await, Ok(true));
        assert!(!host.is_open());
    }

    #[tokio::test]
    async fn newer_request_supersedes_through_host() {
        let (_, bridge, host) = mounted_with(ReplacePolicy::Supersede);
        let first = bridge
            .form(FormDescriptor::new("Add Habit", EchoForm::new()))
            .unwrap();
        assert!(host.handle_key(press(KeyCode::Char('a'))));
        let second = bridge.confirmation(delete_habit()).unwrap();
        assert_eq!(first.await, Err(ModalError::Superseded));

        let text = buffer_text(&draw(&host));
        assert!(text.contains("Delete Habit"));
        assert!(!text.contains("Add Habit"));
        assert!(host.handle_key(press(KeyCode::Enter)));
        assert_eq!(second.await, Ok(true));
        assert!(!host.is_open());
        assert!(!host.handle_key(press(KeyCode::Enter)));
    }

    #[tokio::test]
    async fn newer_request_abandons_through_host() {
        let (_, bridge, host) = mounted_with(ReplacePolicy::Abandon);
        let mut first = bridge.confirmation(ConfirmDescriptor::log_out()).unwrap();
        let second = bridge
            .form(FormDescriptor::new("Add Habit", EchoForm::new()))
            .unwrap();
        assert_eq!(host.active_title(), Some("Add Habit".to_string()));

        for c in "Swim".chars() {
            assert!(host.handle_key(press(KeyCode::Char(c))));
        }
        assert!(host.handle_key(press(KeyCode::Enter)));
        assert_eq!(second.await, Ok("Swim".to_string()));
        assert!(!host.is_open());

        assert_eq!(first.try_settled(), None);
        let waited = timeout(Duration::from_millis(5), &mut first).await;
        assert!(waited.is_err());
    }

    #[test]
    fn default_hints_resolve_from_settings() {
        let orchestrator = Orchestrator::default();
        let settings = ModalSettings {
            default_placement: Placement::Bottom,
            default_size: SizeHint::Small,
            ..ModalSettings::default()
        };
        let host = ModalHost::mount(orchestrator, &Bridge::new(), settings);
        assert_eq!(
            host.resolve_hints(Placement::Default, SizeHint::Default),
            (Placement::Bottom, SizeHint::Small)
        );
        assert_eq!(
            host.resolve_hints(Placement::Top, SizeHint::Large),
            (Placement::Top, SizeHint::Large)
        );
    }
}
