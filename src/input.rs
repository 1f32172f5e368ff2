use crate::app::{App, FocusedPanel, Mode};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
}

pub fn handle_event(app: &mut App) -> Result<Action> {
    if !event::poll(Duration::from_millis(100))? {
        return Ok(Action::None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(app, key)),
        _ => Ok(Action::None),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                app.help_scroll = app.help_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => app.help_scroll = 0,
            KeyCode::Char('G') | KeyCode::End => {
                app.help_scroll = crate::ui::help::total_lines();
            }
            _ => {}
        }
        return Action::None;
    }

    if app.mode == Mode::Search {
        handle_search_mode(app, key);
        return Action::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('e') => app.toggle_nav(),
            KeyCode::Char('d') => app.page_down(),
            KeyCode::Char('u') => app.page_up(),
            KeyCode::Left => app.decrease_nav_width(),
            KeyCode::Right => app.increase_nav_width(),
            KeyCode::Up => app.increase_toc_width(),
            KeyCode::Down => app.decrease_toc_width(),
            _ => {}
        }
        return Action::None;
    }

    // Global keybindings
    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::F(1) | KeyCode::Char('?') => {
            app.show_help = true;
            return Action::None;
        }
        KeyCode::Tab => {
            app.cycle_focus();
            return Action::None;
        }
        KeyCode::Char('/') => {
            app.start_search();
            return Action::None;
        }
        KeyCode::Char('t') => {
            app.toggle_toc();
            return Action::None;
        }
        KeyCode::Char('y') => {
            app.yank_url();
            return Action::None;
        }
        KeyCode::Char('T') => {
            app.cycle_theme();
            return Action::None;
        }
        KeyCode::Backspace => {
            app.back();
            return Action::None;
        }
        _ => {}
    }

    match app.focus {
        FocusedPanel::Nav => handle_nav(app, key),
        FocusedPanel::Page => handle_page(app, key),
        FocusedPanel::Toc => handle_toc(app, key),
    }
    Action::None
}

fn handle_nav(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.nav_next(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.nav_first(),
        KeyCode::Char('G') | KeyCode::End => app.nav_last(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.open_selected(),
        _ => {}
    }
}

fn handle_page(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Char(']') => app.jump_section(true),
        KeyCode::Char('[') => app.jump_section(false),
        KeyCode::Enter => {
            app.follow_link();
        }
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left if app.show_nav => {
            app.focus = FocusedPanel::Nav;
        }
        _ => {}
    }
}

fn handle_toc(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.toc_next(),
        KeyCode::Char('k') | KeyCode::Up => app.toc_prev(),
        KeyCode::Enter | KeyCode::Char('l') => {
            app.jump_to_toc_entry();
        }
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => app.focus = FocusedPanel::Page,
        _ => {}
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.execute_search(),
        KeyCode::Backspace => {
            app.search_input.pop();
            app.apply_filter();
        }
        KeyCode::Down => app.nav_next(),
        KeyCode::Up => app.nav_prev(),
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.apply_filter();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::Catalog;

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        App::new(Catalog::builtin(), Config::default()).unwrap()
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_c), Action::Quit);
    }

    #[test]
    fn test_q_is_text_while_filtering() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::None);
        assert_eq!(app.search_input, "q");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Browse);
        assert!(app.search_input.is_empty());
    }

    #[test]
    fn test_nav_then_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_page().route, app.catalog.pages()[1].route);
        assert_eq!(app.focus, FocusedPanel::Page);
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert!(app.show_help);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::None);
        assert!(!app.show_help);
    }

    #[test]
    fn test_toc_enter_jumps() {
        let mut app = app();
        app.page_height = 3;
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusedPanel::Toc);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, FocusedPanel::Page);
        assert!(app.scroll > 0);
    }
}
