pub mod help;
pub mod layout;
pub mod nav;
pub mod page_view;
pub mod search_bar;
pub mod status_bar;
pub mod toc;

use crate::app::App;
use crate::theme::Theme;
use ratatui::{prelude::*, widgets::Block, widgets::BorderType, widgets::Borders};

pub fn render(frame: &mut Frame, app: &mut App) {
    layout::render(frame, app);
}

/// Rounded panel frame, highlighted when focused
fn panel<'a>(title: String, focused: bool, theme: &Theme) -> Block<'a> {
    let (border_style, title_style) = if focused {
        (
            Style::default().fg(theme.ui.border_focused.to_color()),
            Style::default()
                .fg(theme.ui.title_focused.to_color())
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(theme.ui.border.to_color()),
            Style::default().fg(theme.ui.title.to_color()),
        )
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(Style::default().bg(theme.ui.background.to_color()))
}
