use super::Frame;
use crate::state::{Screen, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};

const BANNER: &str = " tracker ";

/// Render the screen tabs.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let titles: Vec<Line> = Screen::ALL
        .iter()
        .map(|screen| Line::from(screen.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.current_screen().index())
        .style(styling::muted_text_style(theme))
        .highlight_style(styling::active_list_item_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme))
                .title(Span::styled(BANNER, styling::banner_style(theme))),
        );
    frame.render_widget(tabs, size);
}
