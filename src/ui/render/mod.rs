mod footer;
mod header;
mod lists;
mod log;
mod modal;

use self::log::log;
use super::*;
use crate::state::State;
use footer::footer;
use header::header;
use ratatui::layout::{Constraint, Direction, Layout};

pub use modal::ModalHost;

const LOG_HEIGHT: u16 = 8;

/// Render the whole screen, with the modal host drawn last so it sits on top.
///
pub fn render(frame: &mut Frame, state: &mut State, host: &ModalHost) {
    let size = frame.size();
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(3)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_HEIGHT));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    header(frame, chunks[0], state);
    lists::screen(frame, chunks[1], state);
    if state.is_log_visible() {
        log(frame, chunks[2], state);
    }
    footer(frame, chunks[chunks.len() - 1], state, host);

    host.render(frame, state.get_theme());
}
