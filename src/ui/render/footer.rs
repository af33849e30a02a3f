use super::Frame;
use super::ModalHost;
use crate::state::{Screen, State};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key hints for the current screen.
///
fn hints_for_screen(screen: Screen) -> &'static str {
    match screen {
        Screen::Habits => {
            " j/k: navigate, n: new, e: edit, d: delete, p: pause, Tab: tasks, L: log, R: reset, q: quit"
        }
        Screen::Tasks => {
            " j/k: navigate, n: new, x: done, d: delete, Tab: goals, L: log, R: reset, q: quit"
        }
        Screen::Goals => " j/k: navigate, Tab: habits, L: log, R: reset, q: quit",
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State, host: &ModalHost) {
    let theme = state.get_theme();
    let (badge, badge_bg, hints) = match host.active_title() {
        Some(title) => (
            "MODAL:".to_string(),
            theme.warning,
            format!(
                " {}: Tab: next field, Enter/Ctrl+S: confirm, Esc: cancel, Ctrl+C: exit",
                title
            ),
        ),
        None => (
            format!("{}:", state.current_screen().title().to_uppercase()),
            theme.primary,
            hints_for_screen(state.current_screen()).to_string(),
        ),
    };

    let line = Line::from(vec![
        Span::styled(
            badge,
            Style::default()
                .fg(theme.footer_bg.to_color())
                .bg(badge_bg.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hints, Style::default().fg(theme.text_muted.to_color())),
    ]);
    let footer = Paragraph::new(line).style(Style::default().bg(theme.footer_bg.to_color()));
    frame.render_widget(footer, size);
}
