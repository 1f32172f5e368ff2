use crate::app::App;
use crate::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
};

pub fn render(frame: &mut Frame, area: Rect, app: &mut App, focused: bool, theme: &Theme) {
    let block = super::panel(String::from(" Contents "), focused, theme);

    let label_style = Style::default()
        .fg(theme.page.toc_label.to_color())
        .add_modifier(Modifier::BOLD);
    let title_style = Style::default().fg(theme.ui.foreground.to_color());
    let current_style = Style::default()
        .fg(theme.ui.search_match.to_color())
        .add_modifier(Modifier::BOLD);

    let current = app.current_section();
    let items: Vec<ListItem> = app
        .toc_entries()
        .into_iter()
        .enumerate()
        .map(|(idx, (depth, entry))| {
            let is_current = current == Some(idx);
            ListItem::new(Line::from(vec![
                Span::raw("  ".repeat(depth)),
                Span::styled(format!("{} ", entry.label()), label_style),
                Span::styled(
                    entry.title.clone(),
                    if is_current { current_style } else { title_style },
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(theme.ui.selection.to_color())
            .fg(theme.ui.selection_fg.to_color()),
    );

    frame.render_stateful_widget(list, area, &mut app.toc_state);
}
