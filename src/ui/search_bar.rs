use crate::app::App;
use crate::theme::Theme;
use ratatui::{prelude::*, widgets::Paragraph};

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let text = format!(
        "/{}  [{} of {}]",
        app.search_input,
        app.filtered.len(),
        app.catalog.pages().len()
    );

    let paragraph = Paragraph::new(text).style(
        Style::default()
            .fg(theme.ui.foreground.to_color())
            .bg(theme.ui.status_bar_bg.to_color()),
    );
    frame.render_widget(paragraph, area);

    // Cursor after the slash and input
    let cursor_x = area.x + 1 + app.search_input.chars().count() as u16;
    frame.set_cursor_position(Position::new(cursor_x, area.y));
}
