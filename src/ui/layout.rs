use crate::app::{App, FocusedPanel, Mode};
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    let theme = app.config.theme.clone();

    // Content area + status bar + (optional) filter bar
    let bottom_bar_height = if app.mode == Mode::Search { 1 } else { 0 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(bottom_bar_height),
        ])
        .split(size);

    // nav (optional) | page | toc (optional)
    let mut h_constraints = Vec::new();
    if app.show_nav {
        h_constraints.push(Constraint::Length(app.nav_width));
    }
    h_constraints.push(Constraint::Min(30));
    if app.show_toc {
        h_constraints.push(Constraint::Length(app.toc_width));
    }

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(h_constraints)
        .split(main_chunks[0]);

    let browsing = app.mode == Mode::Browse;
    let nav_focused = app.focus == FocusedPanel::Nav || !browsing;
    let page_focused = app.focus == FocusedPanel::Page && browsing;
    let toc_focused = app.focus == FocusedPanel::Toc && browsing;

    let mut chunk_idx = 0;

    if app.show_nav {
        super::nav::render(frame, h_chunks[chunk_idx], app, nav_focused, &theme);
        chunk_idx += 1;
    }

    let page_area = h_chunks[chunk_idx];
    chunk_idx += 1;

    // Borders take two columns and two rows
    app.set_viewport(
        page_area.width.saturating_sub(4) as usize,
        page_area.height.saturating_sub(2) as usize,
    );
    super::page_view::render(frame, page_area, app, page_focused, &theme);

    if app.show_toc {
        super::toc::render(frame, h_chunks[chunk_idx], app, toc_focused, &theme);
    }

    super::status_bar::render(frame, main_chunks[1], app);

    if app.mode == Mode::Search {
        super::search_bar::render(frame, main_chunks[2], app, &theme);
    }

    if app.show_help {
        super::help::render(frame, size, &theme, app.help_scroll);
    }
}
