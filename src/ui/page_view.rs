use crate::app::App;
use crate::render::LineKind;
use crate::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

fn line_style(kind: LineKind, theme: &Theme) -> Style {
    let page = &theme.page;
    let fg = |color: &crate::theme::ThemeColor| Style::default().fg(color.to_color());
    match kind {
        LineKind::Breadcrumb => fg(&page.breadcrumb).add_modifier(Modifier::ITALIC),
        LineKind::Title => fg(&page.title).add_modifier(Modifier::BOLD),
        LineKind::Summary => fg(&page.summary),
        LineKind::Heading(1) => fg(&page.heading).add_modifier(Modifier::BOLD),
        LineKind::Heading(_) => fg(&page.subheading).add_modifier(Modifier::BOLD),
        LineKind::Prose | LineKind::ListItem | LineKind::TableRow | LineKind::Blank => {
            fg(&page.prose)
        }
        LineKind::Code => fg(&page.code),
        LineKind::TableHeader => fg(&page.table_header).add_modifier(Modifier::BOLD),
        LineKind::TableRule => fg(&page.table_rule),
        LineKind::Diagram => fg(&page.diagram),
        LineKind::Toc => fg(&page.toc_label),
        LineKind::Citation => fg(&page.citation),
        LineKind::Error => fg(&page.error).add_modifier(Modifier::BOLD),
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App, focused: bool, theme: &Theme) {
    let page = app.current_page();
    let block = super::panel(format!(" {} ", page.route), focused, theme);

    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .rendered
        .lines
        .iter()
        .skip(app.scroll)
        .take(visible)
        .map(|line| Line::from(Span::styled(format!(" {}", line.text), line_style(line.kind, theme))))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);

    let total = app.rendered.lines.len();
    if total > visible && area.height > 2 && area.width > 0 {
        let scrollbar_area = Rect::new(
            area.x + area.width.saturating_sub(1),
            area.y + 1,
            1,
            area.height.saturating_sub(2),
        );
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible)).position(app.scroll);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("│"))
            .thumb_symbol("▓");
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::Catalog;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_collapsed_area_draws_without_scrollbar() {
        let app = App::new(Catalog::builtin(), Config::default()).unwrap();
        let theme = app.theme().clone();
        assert!(app.rendered.lines.len() > 8);

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| render(frame, Rect::new(0, 0, 0, 10), &app, true, &theme))
            .unwrap();
        terminal
            .draw(|frame| render(frame, Rect::new(0, 0, 40, 10), &app, true, &theme))
            .unwrap();
    }
}
