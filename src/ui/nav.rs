use crate::app::App;
use crate::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
};

pub fn render(frame: &mut Frame, area: Rect, app: &mut App, focused: bool, theme: &Theme) {
    let total = app.catalog.pages().len();
    let title = if app.filtered.len() == total {
        String::from(" Pages ")
    } else {
        format!(" Pages {}/{} ", app.filtered.len(), total)
    };
    let block = super::panel(title, focused, theme);

    let pages = app.catalog.pages();
    let items: Vec<ListItem> = app
        .filtered
        .iter()
        .map(|&idx| {
            let page = &pages[idx];
            let depth = page.route.matches('/').count().saturating_sub(1);
            let marker = if idx == app.current { "▸" } else { " " };
            let indent = "  ".repeat(depth);
            ListItem::new(format!("{}{}{}", marker, indent, page.title))
                .style(Style::default().fg(theme.ui.nav_color(page.kind)))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(theme.ui.selection.to_color())
            .fg(theme.ui.selection_fg.to_color())
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(list, area, &mut app.nav_state);
}
