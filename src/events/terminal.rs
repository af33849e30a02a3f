use super::actions::Action;
use crate::state::{Screen, State};
use crate::ui::ModalHost;
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State, host: &ModalHost) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(state, host, key)),
            Event::Tick => Ok(!state.is_quit_requested()),
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Route one key press. The modal host sees every key first; only keys it
/// declines reach the screens. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, host: &ModalHost, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }
    if host.handle_key(key) {
        return !state.is_quit_requested();
    }
    let action = match (key.code, state.current_screen()) {
        (KeyCode::Tab, _) => {
            state.next_screen();
            None
        }
        (KeyCode::Char('j') | KeyCode::Down, _) => {
            state.next_item();
            None
        }
        (KeyCode::Char('k') | KeyCode::Up, _) => {
            state.previous_item();
            None
        }
        (KeyCode::Char('L'), _) => {
            state.toggle_log();
            None
        }
        (KeyCode::Char('R'), _) => Some(Action::ResetData),
        (KeyCode::Char('q'), _) => Some(Action::Quit),
        (KeyCode::Char('n'), Screen::Habits) => Some(Action::AddHabit),
        (KeyCode::Char('n'), Screen::Tasks) => Some(Action::AddTask),
        (KeyCode::Char('e') | KeyCode::Enter, Screen::Habits) => state
            .selected_habit()
            .map(|h| Action::EditHabit { id: h.id }),
        (KeyCode::Char('d'), Screen::Habits) => state
            .selected_habit()
            .map(|h| Action::DeleteHabit { id: h.id }),
        (KeyCode::Char('d'), Screen::Tasks) => state
            .selected_task()
            .map(|t| Action::DeleteTask { id: t.id }),
        (KeyCode::Char('p'), Screen::Habits) => {
            if let Some(id) = state.selected_habit().map(|h| h.id) {
                if let Err(e) = state.toggle_habit_pause(id) {
                    error!("Failed to toggle habit: {}", e);
                }
            }
            None
        }
        (KeyCode::Char(' ') | KeyCode::Char('x'), Screen::Tasks) => {
            if let Some(id) = state.selected_task().map(|t| t.id) {
                if let Err(e) = state.toggle_task_done(id) {
                    error!("Failed to toggle task: {}", e);
                }
            }
            None
        }
        _ => None,
    };
    if let Some(action) = action {
        if let Err(e) = state.dispatch(action) {
            error!("Failed to dispatch action: {}", e);
        }
    }
    !state.is_quit_requested()
}
