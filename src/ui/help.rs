use crate::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
};

/// Key bindings by panel, shown two per row
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "GLOBAL",
        &[
            ("F1/?", "Help"),
            ("q/Ctrl+C", "Quit"),
            ("Tab", "Cycle focus"),
            ("/", "Filter pages"),
            ("t", "Contents panel"),
            ("Ctrl+E", "Page list"),
            ("y", "Copy page URL"),
            ("T", "Next theme"),
            ("Backspace", "Previous page"),
        ],
    ),
    (
        "PAGES",
        &[
            ("j/k", "Move"),
            ("g/G", "First/last"),
            ("Enter/l", "Open"),
        ],
    ),
    (
        "PAGE",
        &[
            ("j/k", "Scroll"),
            ("g/G", "Top/bottom"),
            ("Ctrl+D/U", "Half page"),
            ("]/[", "Next/prev section"),
            ("Enter", "Follow link"),
            ("Esc/h", "Page list"),
        ],
    ),
    (
        "CONTENTS",
        &[
            ("j/k", "Move"),
            ("Enter", "Jump to section"),
            ("Esc/h", "Back to page"),
        ],
    ),
    (
        "FILTER",
        &[
            ("Enter", "Keep filter"),
            ("Esc", "Clear filter"),
            ("↑/↓", "Move"),
        ],
    ),
    (
        "RESIZE",
        &[("Ctrl+←→", "Page list width"), ("Ctrl+↑↓", "Contents width")],
    ),
];

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(theme.ui.title_focused.to_color())
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.ui.foreground.to_color());
    let section_style = Style::default()
        .fg(theme.page.heading.to_color())
        .add_modifier(Modifier::BOLD);
    let rule_style = Style::default().fg(theme.page.table_rule.to_color());

    let mut lines = Vec::new();
    for (section_name, bindings) in HELP_SECTIONS {
        lines.push(Line::from(vec![
            Span::styled("── ", rule_style),
            Span::styled(*section_name, section_style),
        ]));
        for pair in bindings.chunks(2) {
            let spans: Vec<Span> = pair
                .iter()
                .flat_map(|(key, desc)| {
                    [
                        Span::styled(format!(" {:11}", key), key_style),
                        Span::styled(format!("{:20}", desc), desc_style),
                    ]
                })
                .collect();
            lines.push(Line::from(spans));
        }
        lines.push(Line::default());
    }
    lines
}

pub fn render(frame: &mut Frame, area: Rect, theme: &Theme, scroll: usize) {
    let popup_width = (area.width * 80 / 100).min(68);
    let popup_height = (area.height * 80 / 100).min(30);
    let popup_area = Rect::new(
        area.x + area.width.saturating_sub(popup_width) / 2,
        area.y + area.height.saturating_sub(popup_height) / 2,
        popup_width,
        popup_height,
    );

    frame.render_widget(Clear, popup_area);

    let lines = help_lines(theme);
    let visible_height = popup_height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    let scroll = scroll.min(max_scroll);

    let accent = Style::default()
        .fg(theme.ui.title_focused.to_color())
        .add_modifier(Modifier::BOLD);
    let plain = Style::default().fg(theme.ui.foreground.to_color());

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" x86ref", accent),
            Span::styled(" keys ", plain),
        ]))
        .title_bottom(
            Line::from(vec![
                Span::styled(" jk ", accent),
                Span::styled("scroll ", plain),
                Span::styled("Esc ", accent),
                Span::styled("close ", plain),
            ])
            .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.ui.border_focused.to_color()))
        .style(Style::default().bg(theme.ui.background.to_color()));

    let content_height = lines.len();
    frame.render_widget(
        Paragraph::new(lines).block(block).scroll((scroll as u16, 0)),
        popup_area,
    );

    if content_height > visible_height && popup_area.height > 2 {
        let scrollbar_area = Rect::new(
            popup_area.x + popup_area.width - 1,
            popup_area.y + 1,
            1,
            popup_area.height - 2,
        );
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .thumb_symbol("▓");
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

/// Upper bound for the help scroll offset
pub fn total_lines() -> usize {
    HELP_SECTIONS
        .iter()
        .map(|(_, bindings)| 2 + bindings.len().div_ceil(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_lines_matches_rendered() {
        assert_eq!(total_lines(), help_lines(&Theme::default()).len());
    }
}
