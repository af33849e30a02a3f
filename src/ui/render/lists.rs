use super::Frame;
use crate::state::{Habit, Screen, State, Task};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

fn habit_line(habit: &Habit) -> String {
    let days = habit
        .days
        .iter()
        .map(|d| d.short_name())
        .collect::<Vec<_>>()
        .join(" ");
    let reminder = habit
        .reminder
        .map(|t| format!("  at {}", t.format("%H:%M")))
        .unwrap_or_default();
    format!("{}  [{}]{}", habit.title, days, reminder)
}

fn task_line(task: &Task) -> String {
    let check = if task.done { "[x]" } else { "[ ]" };
    let due = task
        .due
        .map(|d| format!("  due {}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!("{} {}{}", check, task.title, due)
}

/// Render the list for the current screen.
///
pub fn screen(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let screen = state.current_screen();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme))
        .title(Span::styled(
            screen.title(),
            styling::active_block_title_style(),
        ));

    let (items, empty_hint): (Vec<ListItem>, &str) = match screen {
        Screen::Habits => (
            state
                .get_habits()
                .iter()
                .map(|h| {
                    let style = if h.paused {
                        styling::muted_text_style(&theme).add_modifier(Modifier::ITALIC)
                    } else {
                        styling::normal_text_style(&theme)
                    };
                    ListItem::new(Line::from(Span::styled(habit_line(h), style)))
                })
                .collect(),
            "No habits yet. Press n to add one.",
        ),
        Screen::Tasks => (
            state
                .get_tasks()
                .iter()
                .map(|t| {
                    let style = if t.done {
                        Style::default()
                            .fg(theme.success.to_color())
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        styling::normal_text_style(&theme)
                    };
                    ListItem::new(Line::from(Span::styled(task_line(t), style)))
                })
                .collect(),
            "No tasks yet. Press n to add one.",
        ),
        Screen::Goals => (
            state
                .get_goals()
                .iter()
                .map(|g| {
                    let (habits, tasks) = state.goal_items(g.id);
                    ListItem::new(Line::from(vec![
                        Span::styled(g.title.clone(), styling::normal_text_style(&theme)),
                        Span::styled(
                            format!("  {}", g.cover.label()),
                            Style::default().fg(theme.accent.to_color()),
                        ),
                        Span::styled(
                            format!(
                                " · {} from {} · {} habits, {} tasks",
                                g.duration,
                                g.start_date.format("%Y-%m-%d"),
                                habits.len(),
                                tasks.len()
                            ),
                            styling::muted_text_style(&theme),
                        ),
                    ]))
                })
                .collect(),
            "No goals.",
        ),
    };

    if items.is_empty() {
        let hint = Paragraph::new(empty_hint)
            .style(styling::muted_text_style(&theme))
            .block(block);
        frame.render_widget(hint, size);
        return;
    }

    let list = List::new(items)
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::active_list_item_style(&theme))
        .block(block);
    let list_state = match screen {
        Screen::Habits => state.get_habits_list_state(),
        Screen::Tasks => state.get_tasks_list_state(),
        Screen::Goals => state.get_goals_list_state(),
    };
    frame.render_stateful_widget(list, size, list_state);
}
