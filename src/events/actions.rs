use crate::forms::{HabitForm, TaskForm};
use crate::modal::{
    bridge, Bridge, ConfirmDescriptor, FormDescriptor, ModalError, Placement, SizeHint,
};
use crate::state::{HabitDraft, State, StateError};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different action types handled off the UI thread.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddHabit,
    EditHabit { id: u64 },
    DeleteHabit { id: u64 },
    AddTask,
    DeleteTask { id: u64 },
    ResetData,
    Quit,
}

/// Map a dismissed or replaced request to `None`.
///
fn answered<T>(result: Result<T, ModalError>) -> Result<Option<T>, ModalError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ModalError::Cancelled) => {
            debug!("Request dismissed by the user.");
            Ok(None)
        }
        Err(ModalError::Superseded) => {
            info!("Request replaced by a newer one.");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Specify struct for managing state with user actions.
///
/// Every action that needs an answer from the user asks through the modal
/// bridge and awaits the result. The state lock is never held across such an
/// await, so the UI keeps drawing and routing keys to the open modal.
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    bridge: Bridge,
}

impl<'a> Handler<'a> {
    /// Return new instance using the process-wide bridge. Requests fail with
    /// `NotInitialized` if none was installed.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>) -> Self {
        let bridge = bridge::global().cloned().unwrap_or_else(|| {
            warn!("No global modal bridge installed; modal requests will fail.");
            Bridge::new()
        });
        Handler::with_bridge(state, bridge)
    }

    pub fn with_bridge(state: &'a Arc<Mutex<State>>, bridge: Bridge) -> Self {
        Handler { state, bridge }
    }

    /// Handle actions by type.
    ///
    pub async fn handle(&self, action: Action) -> Result<()> {
        debug!("Processing action '{:?}'...", action);
        match action {
            Action::AddHabit => self.add_habit().await?,
            Action::EditHabit { id } => self.edit_habit(id).await?,
            Action::DeleteHabit { id } => self.delete_habit(id).await?,
            Action::AddTask => self.add_task().await?,
            Action::DeleteTask { id } => self.delete_task(id).await?,
            Action::ResetData => self.reset_data().await?,
            Action::Quit => self.quit().await?,
        }
        Ok(())
    }

    async fn confirmed(&self, descriptor: ConfirmDescriptor) -> Result<bool> {
        let answer = self.bridge.confirmation(descriptor)?.await;
        Ok(answered(answer)?.unwrap_or(false))
    }

    async fn add_habit(&self) -> Result<()> {
        let future = self.bridge.form(
            FormDescriptor::new("New Habit", HabitForm::new())
                .submit_label("Create Habit")
                .size(SizeHint::Large),
        )?;
        if let Some(draft) = answered(future.await)? {
            self.state.lock().await.add_habit(draft);
        }
        Ok(())
    }

    /// Edit a habit, asking whether to keep the changes before storing them.
    ///
    async fn edit_habit(&self, id: u64) -> Result<()> {
        let original = {
            let state = self.state.lock().await;
            let habit = state.get_habit(id).ok_or(StateError::HabitNotFound { id })?;
            HabitDraft::from(habit)
        };
        let future = self.bridge.form(
            FormDescriptor::new("Edit Habit", HabitForm::from_draft(&original))
                .submit_label("Save")
                .size(SizeHint::Large),
        )?;
        let draft = match answered(future.await)? {
            Some(draft) => draft,
            None => return Ok(()),
        };
        if draft == original {
            debug!("Habit {} unchanged.", id);
            return Ok(());
        }
        if self.confirmed(ConfirmDescriptor::save_changes()).await? {
            self.state.lock().await.update_habit(id, draft)?;
        } else {
            info!("Discarded changes to habit {}.", id);
        }
        Ok(())
    }

    async fn delete_habit(&self, id: u64) -> Result<()> {
        let title = {
            let state = self.state.lock().await;
            state
                .get_habit(id)
                .map(|h| h.title.clone())
                .ok_or(StateError::HabitNotFound { id })?
        };
        let descriptor = ConfirmDescriptor::delete_item()
            .title("Delete Habit")
            .body(format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                title
            ))
            .placement(Placement::Bottom);
        if self.confirmed(descriptor).await? {
            self.state.lock().await.delete_habit(id)?;
        }
        Ok(())
    }

    async fn add_task(&self) -> Result<()> {
        let future = self.bridge.form(
            FormDescriptor::new("New Task", TaskForm::new())
                .submit_label("Create Task")
                .size(SizeHint::Large),
        )?;
        if let Some(draft) = answered(future.await)? {
            self.state.lock().await.add_task(draft);
        }
        Ok(())
    }

    async fn delete_task(&self, id: u64) -> Result<()> {
        let title = {
            let state = self.state.lock().await;
            state
                .get_task(id)
                .map(|t| t.title.clone())
                .ok_or(StateError::TaskNotFound { id })?
        };
        let descriptor = ConfirmDescriptor::delete_item()
            .title("Delete Task")
            .body(format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                title
            ))
            .placement(Placement::Bottom);
        if self.confirmed(descriptor).await? {
            self.state.lock().await.delete_task(id)?;
        }
        Ok(())
    }

    async fn reset_data(&self) -> Result<()> {
        if self.confirmed(ConfirmDescriptor::reset_data()).await? {
            self.state.lock().await.reset_data();
        }
        Ok(())
    }

    async fn quit(&self) -> Result<()> {
        let descriptor = ConfirmDescriptor::log_out()
            .title("Quit")
            .body("Are you sure you want to quit?")
            .confirm_label("Quit")
            .size(SizeHint::Small);
        if self.confirmed(descriptor).await? {
            info!("Quit confirmed.");
            self.state.lock().await.request_quit();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModalSettings;
    use crate::modal::{Orchestrator, ReplacePolicy};
    use crate::ui::ModalHost;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars().map(|c| press(KeyCode::Char(c))).collect()
    }

    fn setup() -> (Arc<Mutex<State>>, Bridge, ModalHost) {
        let bridge = Bridge::new();
        let host = ModalHost::mount(
            Orchestrator::new(ReplacePolicy::Supersede),
            &bridge,
            ModalSettings::default(),
        );
        (Arc::new(Mutex::new(State::default())), bridge, host)
    }

    /// Wait for the worker to open a modal, then press `keys`.
    async fn answer(host: &ModalHost, keys: Vec<KeyEvent>) {
        while !host.is_open() {
            tokio::task::yield_now().await;
        }
        for key in keys {
            assert!(host.handle_key(key));
        }
    }

    #[tokio::test]
    async fn add_habit_through_form() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge);
        let before = state.lock().await.get_habits().len();

        let mut keys = typed("Journal");
        keys.push(press(KeyCode::Tab));
        keys.push(press(KeyCode::Char(' ')));
        keys.push(ctrl_s());
        let (result, _) = tokio::join!(handler.handle(Action::AddHabit), answer(&host, keys));
        result.unwrap();

        let state = state.lock().await;
        assert_eq!(state.get_habits().len(), before + 1);
        let habit = state.selected_habit().unwrap();
        assert_eq!(habit.title, "Journal");
        assert_eq!(habit.days.len(), 1);
        assert!(!host.is_open());
    }

    #[tokio::test]
    async fn escape_leaves_state_untouched() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge);
        let before = state.lock().await.get_tasks().len();

        let mut keys = typed("Never mind");
        keys.push(press(KeyCode::Esc));
        let (result, _) = tokio::join!(handler.handle(Action::AddTask), answer(&host, keys));
        result.unwrap();

        assert_eq!(state.lock().await.get_tasks().len(), before);
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge);

        let (result, _) = tokio::join!(
            handler.handle(Action::DeleteHabit { id: 1 }),
            answer(&host, vec![press(KeyCode::Char('n'))])
        );
        result.unwrap();
        assert!(state.lock().await.get_habit(1).is_some());

        let (result, _) = tokio::join!(
            handler.handle(Action::DeleteHabit { id: 1 }),
            answer(&host, vec![press(KeyCode::Enter)])
        );
        result.unwrap();
        assert!(state.lock().await.get_habit(1).is_none());
    }

    #[tokio::test]
    async fn delete_task_confirms_at_bottom() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge);
        let screen = ratatui::layout::Rect::new(0, 0, 80, 24);
        let (result, _) = tokio::join!(handler.handle(Action::DeleteTask { id: 2 }), async {
            answer(&host, vec![]).await;
            assert_eq!(host.active_title(), Some("Delete Task".to_string()));
            assert_eq!(host.active_area(screen).map(|a| a.bottom()), Some(24));
            host.handle_key(press(KeyCode::Char('y')));
        });
        result.unwrap();
        assert!(state.lock().await.get_task(2).is_none());
    }

    #[tokio::test]
    async fn edit_habit_asks_before_saving() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge);

        let mut form_keys = typed(" daily");
        form_keys.push(ctrl_s());
        let (result, _) = tokio::join!(handler.handle(Action::EditHabit { id: 1 }), async {
            answer(&host, form_keys).await;
            answer(&host, vec![press(KeyCode::Enter)]).await;
        });
        result.unwrap();

        let state = state.lock().await;
        assert_eq!(state.get_habit(1).unwrap().title, "Morning run daily");
    }

    #[tokio::test]
    async fn edit_habit_discard_keeps_original() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge);

        let mut form_keys = typed("!");
        form_keys.push(ctrl_s());
        let (result, _) = tokio::join!(handler.handle(Action::EditHabit { id: 2 }), async {
            answer(&host, form_keys).await;
            answer(&host, vec![press(KeyCode::Esc)]).await;
        });
        result.unwrap();

        assert_eq!(
            state.lock().await.get_habit(2).unwrap().title,
            "Vocabulary drill"
        );
    }

    #[tokio::test]
    async fn unchanged_edit_skips_confirmation() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge);
        let (result, _) = tokio::join!(
            handler.handle(Action::EditHabit { id: 3 }),
            answer(&host, vec![ctrl_s()])
        );
        result.unwrap();
        assert!(!host.is_open());
    }

    #[tokio::test]
    async fn superseded_form_is_not_an_error() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge.clone());
        let before = state.lock().await.get_tasks().len();

        let (result, replaced) = tokio::join!(handler.handle(Action::AddTask), async {
            answer(&host, vec![]).await;
            let replacement = bridge.confirmation(ConfirmDescriptor::save_changes()).unwrap();
            host.handle_key(press(KeyCode::Enter));
            replacement.await
        });
        result.unwrap();
        assert_eq!(replaced, Ok(true));
        assert_eq!(state.lock().await.get_tasks().len(), before);
    }

    #[tokio::test]
    async fn quit_and_reset() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge);
        state.lock().await.delete_task(1).unwrap();

        let (result, _) = tokio::join!(
            handler.handle(Action::ResetData),
            answer(&host, vec![press(KeyCode::Enter)])
        );
        result.unwrap();
        assert!(state.lock().await.get_task(1).is_some());

        let (result, _) = tokio::join!(
            handler.handle(Action::Quit),
            answer(&host, vec![press(KeyCode::Char('y'))])
        );
        result.unwrap();
        assert!(state.lock().await.is_quit_requested());
    }

    #[tokio::test]
    async fn unmounted_bridge_fails() {
        let state = Arc::new(Mutex::new(State::default()));
        let handler = Handler::with_bridge(&state, Bridge::new());
        let error = handler.handle(Action::AddHabit).await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<ModalError>(),
            Some(&ModalError::NotInitialized)
        );
    }

    #[tokio::test]
    async fn missing_habit_fails_without_opening() {
        let (state, bridge, host) = setup();
        let handler = Handler::with_bridge(&state, bridge);
        let error = handler
            .handle(Action::DeleteHabit { id: 404 })
            .await
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<StateError>(),
            Some(StateError::HabitNotFound { id: 404 })
        ));
        assert!(!host.is_open());
    }
}
