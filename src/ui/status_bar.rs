use crate::app::{App, FocusedPanel, Mode};
use ratatui::{prelude::*, text::Span, widgets::Paragraph};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();

    let (mode_str, bg, fg) = match (app.mode, app.focus) {
        (Mode::Search, _) => (" FILTER ", &theme.ui.mode_search_bg, &theme.ui.mode_search_fg),
        (Mode::Browse, FocusedPanel::Nav) => {
            (" PAGES ", &theme.ui.mode_pages_bg, &theme.ui.mode_pages_fg)
        }
        (Mode::Browse, FocusedPanel::Page) => {
            (" PAGE ", &theme.ui.mode_page_bg, &theme.ui.mode_page_fg)
        }
        (Mode::Browse, FocusedPanel::Toc) => (" TOC ", &theme.ui.mode_toc_bg, &theme.ui.mode_toc_fg),
    };
    let mode_style = Style::default()
        .bg(bg.to_color())
        .fg(fg.to_color())
        .add_modifier(Modifier::BOLD);

    let page = app.current_page();
    let kind_info = format!(" {} ", page.kind.label());
    let status_msg = format!(" {} ", app.status_message);

    let position = match app.current_section().and_then(|idx| {
        app.toc_entries()
            .get(idx)
            .map(|(_, entry)| entry.label().to_string())
    }) {
        Some(label) => format!(" §{}  {}/{} ", label, app.scroll + 1, app.rendered.lines.len()),
        None => format!(" {}/{} ", app.scroll + 1, app.rendered.lines.len()),
    };

    let error_info = if app.rendered.errors.is_empty() {
        String::new()
    } else {
        format!(" ✗ {} ", app.rendered.errors.len())
    };

    let left_len = mode_str.chars().count()
        + kind_info.chars().count()
        + error_info.chars().count()
        + status_msg.chars().count();
    let right_len = position.chars().count();
    let padding = (area.width as usize).saturating_sub(left_len + right_len).max(1);

    let line = Line::from(vec![
        Span::styled(mode_str, mode_style),
        Span::styled(
            kind_info,
            Style::default()
                .fg(theme.ui.nav_color(page.kind))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            error_info,
            Style::default()
                .bg(theme.page.error.to_color())
                .fg(theme.ui.background.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            status_msg,
            Style::default().fg(theme.ui.status_bar_fg.to_color()),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled(
            position,
            Style::default().fg(theme.ui.foreground.to_color()),
        ),
    ]);
    let paragraph =
        Paragraph::new(line).style(Style::default().bg(theme.ui.status_bar_bg.to_color()));

    frame.render_widget(paragraph, area);
}
