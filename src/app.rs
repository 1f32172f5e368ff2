use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::content::Catalog;
use crate::page::Page;
use crate::render::{self, RenderOptions, RenderedPage};
use crate::sitemap;
use crate::theme::Theme;
use crate::toc::{self, TocEntry};
use anyhow::Result;
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Nav,
    Page,
    Toc,
}

pub struct App {
    pub mode: Mode,
    pub focus: FocusedPanel,
    pub catalog: Catalog,
    /// Catalog indices that pass the current filter
    pub filtered: Vec<usize>,
    pub nav_state: ListState,
    pub toc_state: ListState,
    /// Catalog index of the page on screen
    pub current: usize,
    pub rendered: RenderedPage,
    render_width: usize,
    pub scroll: usize,
    pub page_height: usize,
    history: Vec<usize>,
    pub search_input: String,
    pub status_message: String,
    pub config: Config,
    pub show_nav: bool,
    pub show_toc: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub nav_width: u16,
    pub toc_width: u16,
    clipboard: Clipboard,
}

impl App {
    pub fn new(catalog: Catalog, config: Config) -> Result<Self> {
        if catalog.pages().is_empty() {
            anyhow::bail!("No pages to browse");
        }
        let current = catalog
            .pages()
            .iter()
            .position(|page| page.route == "/")
            .unwrap_or(0);
        let filtered: Vec<usize> = (0..catalog.pages().len()).collect();

        let mut nav_state = ListState::default();
        nav_state.select(Some(current));

        let mut app = Self {
            mode: Mode::Browse,
            focus: FocusedPanel::Nav,
            filtered,
            nav_state,
            toc_state: ListState::default(),
            current,
            rendered: RenderedPage::default(),
            render_width: RenderOptions::default().width,
            scroll: 0,
            page_height: 20,
            history: Vec::new(),
            search_input: String::new(),
            status_message: String::from("Press F1 for help | / filter | Tab switch panel | q quit"),
            show_nav: config.browse.show_nav,
            show_toc: config.browse.show_toc,
            show_help: false,
            help_scroll: 0,
            nav_width: config.layout.nav_width,
            toc_width: config.layout.toc_width,
            catalog,
            config,
            clipboard: Clipboard::default(),
        };
        app.rerender();
        Ok(app)
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub fn set_theme(&mut self, name: &str) {
        self.config.set_theme(name);
        self.status_message = format!("Theme changed to: {}", name);
    }

    pub fn cycle_theme(&mut self) {
        let themes = Theme::available_themes();
        let pos = themes
            .iter()
            .position(|&name| name == self.config.theme.name)
            .unwrap_or(0);
        self.set_theme(themes[(pos + 1) % themes.len()]);
    }

    pub fn current_page(&self) -> &Page {
        &self.catalog.pages()[self.current]
    }

    pub fn current_url(&self) -> String {
        sitemap::page_url(&self.config.browse.base_url, &self.current_page().route)
    }

    // ========== Rendering ==========

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.render_width,
            diagram_width: self.config.browse.diagram_width,
            // The side panel already lists the contents
            show_toc: !self.show_toc,
        }
    }

    fn rerender(&mut self) {
        let options = self.render_options();
        let catalog = &self.catalog;
        self.rendered = render::render_page(
            &catalog.pages()[self.current],
            &options,
            |route| catalog.title_of(route),
        );
        self.clamp_scroll();
    }

    /// Re-lay out the page when the viewport width changes
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.page_height = height.max(1);
        if width != self.render_width {
            self.render_width = width;
            let section = self.current_section();
            self.rerender();
            if let Some(line) = section.and_then(|i| self.rendered.section_line(i)) {
                self.scroll = line;
                self.clamp_scroll();
            }
        }
    }

    // ========== Navigation list ==========

    pub fn selected_page(&self) -> Option<usize> {
        self.nav_state.selected().and_then(|i| self.filtered.get(i).copied())
    }

    pub fn nav_next(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let next = match self.nav_state.selected() {
            Some(i) if i + 1 < self.filtered.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.nav_state.select(Some(next));
    }

    pub fn nav_prev(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let prev = self.nav_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.nav_state.select(Some(prev));
    }

    pub fn nav_first(&mut self) {
        if !self.filtered.is_empty() {
            self.nav_state.select(Some(0));
        }
    }

    pub fn nav_last(&mut self) {
        if !self.filtered.is_empty() {
            self.nav_state.select(Some(self.filtered.len() - 1));
        }
    }

    pub fn open_selected(&mut self) {
        if let Some(idx) = self.selected_page() {
            self.open_index(idx);
            self.focus = FocusedPanel::Page;
        }
    }

    pub fn open_route(&mut self, route: &str) -> bool {
        let idx = self.catalog.resolve(route).and_then(|page| {
            self.catalog.pages().iter().position(|p| p.route == page.route)
        });
        match idx {
            Some(idx) => {
                self.open_index(idx);
                true
            }
            None => {
                self.status_message = format!("No page: {}", route);
                false
            }
        }
    }

    fn open_index(&mut self, idx: usize) {
        if idx == self.current {
            return;
        }
        self.history.push(self.current);
        self.show_index(idx);
    }

    fn show_index(&mut self, idx: usize) {
        self.current = idx;
        self.scroll = 0;
        self.toc_state = ListState::default();
        self.rerender();
        if let Some(pos) = self.filtered.iter().position(|&i| i == idx) {
            self.nav_state.select(Some(pos));
        }
        let page = self.current_page();
        self.status_message = format!("{} ({})", page.title, page.route);
    }

    /// Return to the previously opened page
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(idx) => {
                self.show_index(idx);
                true
            }
            None => {
                self.status_message = String::from("No previous page");
                false
            }
        }
    }

    /// Open the first page linked in the page view, scanning down from the top visible line
    pub fn follow_link(&mut self) -> bool {
        let link = self.rendered.lines[self.scroll.min(self.rendered.lines.len().saturating_sub(1))..]
            .iter()
            .take(self.page_height)
            .find_map(|line| linked_route(&line.text));
        match link {
            Some(route) => self.open_route(&route),
            None => {
                self.status_message = String::from("No link on screen");
                false
            }
        }
    }

    // ========== Page view ==========

    fn max_scroll(&self) -> usize {
        self.rendered.lines.len().saturating_sub(self.page_height)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
        self.clamp_scroll();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_height / 2);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_height / 2);
    }

    // ========== Table of contents ==========

    pub fn toc_entries(&self) -> Vec<(usize, &TocEntry)> {
        toc::flatten(&self.rendered.toc)
    }

    /// Index into `toc_entries` of the section at the top of the page view
    pub fn current_section(&self) -> Option<usize> {
        self.rendered
            .section_lines
            .iter()
            .enumerate()
            .filter(|(_, line)| **line <= self.scroll)
            .max_by_key(|(_, line)| **line)
            .map(|(idx, _)| idx)
    }


    pub fn toc_next(&mut self) {
        let len = self.toc_entries().len();
        if len == 0 {
            return;
        }
        let next = match self.toc_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.toc_state.select(Some(next));
    }

    pub fn toc_prev(&mut self) {
        if self.toc_entries().is_empty() {
            return;
        }
        let prev = self.toc_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.toc_state.select(Some(prev));
    }

    pub fn jump_to_toc_entry(&mut self) -> bool {
        let target = self.toc_state.selected().and_then(|i| {
            self.toc_entries()
                .get(i)
                .map(|(_, entry)| (i, entry.label().to_string()))
        });
        let Some((idx, label)) = target else {
            return false;
        };
        match self.rendered.section_line(idx) {
            Some(line) => {
                self.scroll = line;
                self.clamp_scroll();
                self.focus = FocusedPanel::Page;
                self.status_message = format!("Section {}", label);
                true
            }
            None => false,
        }
    }

    /// Scroll to the next (`forward`) or previous section heading
    pub fn jump_section(&mut self, forward: bool) {
        let mut lines = self.rendered.section_lines.clone();
        lines.sort_unstable();
        let target = if forward {
            lines.into_iter().find(|&line| line > self.scroll)
        } else {
            lines.into_iter().rev().find(|&line| line < self.scroll)
        };
        if let Some(line) = target {
            self.scroll = line;
            self.clamp_scroll();
        }
    }

    // ========== Panels ==========

    pub fn toggle_toc(&mut self) {
        self.show_toc = !self.show_toc;
        if !self.show_toc && self.focus == FocusedPanel::Toc {
            self.focus = FocusedPanel::Page;
        }
        self.rerender();
        self.status_message = format!(
            "Contents panel {}",
            if self.show_toc { "shown" } else { "hidden" }
        );
    }

    pub fn toggle_nav(&mut self) {
        self.show_nav = !self.show_nav;
        if !self.show_nav && self.focus == FocusedPanel::Nav {
            self.focus = FocusedPanel::Page;
        }
    }

    pub fn cycle_focus(&mut self) {
        let order = [FocusedPanel::Nav, FocusedPanel::Page, FocusedPanel::Toc];
        let start = order.iter().position(|&p| p == self.focus).unwrap_or(0);
        for step in 1..=order.len() {
            let next = order[(start + step) % order.len()];
            let visible = match next {
                FocusedPanel::Nav => self.show_nav,
                FocusedPanel::Page => true,
                FocusedPanel::Toc => self.show_toc,
            };
            if visible {
                self.focus = next;
                break;
            }
        }
        if self.focus == FocusedPanel::Toc && self.toc_state.selected().is_none() {
            self.toc_next();
        }
    }

    pub fn increase_nav_width(&mut self) {
        let max = self.config.layout.nav_max_width;
        if self.nav_width < max {
            self.nav_width += 2;
        }
    }

    pub fn decrease_nav_width(&mut self) {
        let min = self.config.layout.nav_min_width;
        if self.nav_width > min {
            self.nav_width -= 2;
        }
    }

    pub fn increase_toc_width(&mut self) {
        let max = self.config.layout.toc_max_width;
        if self.toc_width < max {
            self.toc_width += 2;
        }
    }

    pub fn decrease_toc_width(&mut self) {
        let min = self.config.layout.toc_min_width;
        if self.toc_width > min {
            self.toc_width -= 2;
        }
    }

    // ========== Filter ==========

    pub fn start_search(&mut self) {
        self.mode = Mode::Search;
        self.search_input.clear();
        self.apply_filter();
    }

    pub fn apply_filter(&mut self) {
        let query = self.search_input.clone();
        let hits: Vec<&str> = self
            .catalog
            .search(&query)
            .into_iter()
            .map(|page| page.route.as_str())
            .collect();
        self.filtered = self
            .catalog
            .pages()
            .iter()
            .enumerate()
            .filter(|(_, page)| hits.contains(&page.route.as_str()))
            .map(|(idx, _)| idx)
            .collect();
        self.nav_state
            .select(if self.filtered.is_empty() { None } else { Some(0) });
    }

    pub fn execute_search(&mut self) {
        self.mode = Mode::Browse;
        self.focus = FocusedPanel::Nav;
        self.show_nav = true;
        self.status_message = match self.filtered.len() {
            0 => format!("No pages match '{}'", self.search_input),
            1 => String::from("1 page"),
            n => format!("{} pages", n),
        };
        if self.filtered.len() == 1 {
            self.open_selected();
        }
    }

    pub fn cancel_search(&mut self) {
        self.search_input.clear();
        self.apply_filter();
        if let Some(pos) = self.filtered.iter().position(|&i| i == self.current) {
            self.nav_state.select(Some(pos));
        }
        self.mode = Mode::Browse;
    }

    // ========== Clipboard ==========

    pub fn yank_url(&mut self) {
        let url = self.current_url();
        self.status_message = match self.clipboard.copy(&url) {
            Ok(()) => format!("Copied: {}", url),
            Err(e) => format!("Clipboard unavailable ({}): {}", e, url),
        };
    }
}

/// Route in parentheses at the end of an index list item: "MOV: Move (/instructions/mov)"
fn linked_route(text: &str) -> Option<String> {
    let text = text.trim_end();
    let inner = text.strip_suffix(')')?;
    let start = inner.rfind("(/")?;
    Some(inner[start + 1..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Catalog::builtin(), Config::default()).unwrap()
    }

    #[test]
    fn test_starts_on_home_page() {
        let app = app();
        assert_eq!(app.current_page().route, "/");
        assert_eq!(app.current_url(), "https://x86ref.dev/");
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        assert!(App::new(Catalog::new(vec![]), Config::default()).is_err());
    }

    #[test]
    fn test_filter_then_open() {
        let mut app = app();
        app.start_search();
        app.search_input.push_str("cpuid");
        app.apply_filter();
        assert_eq!(app.filtered.len(), 1);

        app.execute_search();
        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.current_page().title, "CPUID");
        assert_eq!(app.focus, FocusedPanel::Page);
    }

    #[test]
    fn test_cancel_search_restores_list() {
        let mut app = app();
        app.start_search();
        app.search_input.push_str("zzz");
        app.apply_filter();
        assert!(app.filtered.is_empty());
        assert_eq!(app.selected_page(), None);

        app.cancel_search();
        assert_eq!(app.filtered.len(), app.catalog.pages().len());
        assert_eq!(app.selected_page(), Some(app.current));
    }

    #[test]
    fn test_jump_to_toc_entry_scrolls_to_heading() {
        let mut app = app();
        app.page_height = 5;
        assert!(app.open_route("/registers/eflags"));

        app.focus = FocusedPanel::Toc;
        app.toc_next();
        app.toc_next();
        let (_, entry) = app.toc_entries()[1];
        let anchor = entry.anchor.clone();
        let line = app.rendered.line_of(&anchor).unwrap();

        assert!(app.jump_to_toc_entry());
        assert_eq!(app.scroll, line);
        assert_eq!(app.focus, FocusedPanel::Page);
        assert_eq!(app.current_section(), Some(1));
    }

    #[test]
    fn test_back_returns_to_previous_page() {
        let mut app = app();
        app.open_route("/instructions/mov");
        app.open_route("mov");
        app.open_route("/history/8086");
        assert!(app.back());
        assert_eq!(app.current_page().route, "/instructions/mov");
        assert!(app.back());
        assert_eq!(app.current_page().route, "/");
        assert!(!app.back());
    }

    #[test]
    fn test_follow_link_on_index_page() {
        let mut app = app();
        app.open_route("/instructions");
        assert!(app.follow_link());
        assert_eq!(app.current_page().route, "/instructions/add");
    }

    #[test]
    fn test_follow_link_starts_at_scroll_position() {
        let mut app = app();
        app.open_route("/instructions");
        let mov_line = app
            .rendered
            .lines
            .iter()
            .position(|l| l.text.ends_with("(/instructions/mov)"))
            .unwrap();
        app.scroll = mov_line;
        assert!(app.follow_link());
        assert_eq!(app.current_page().route, "/instructions/mov");
    }

    #[test]
    fn test_cycle_focus_skips_hidden_panels() {
        let mut app = app();
        app.cycle_focus();
        assert_eq!(app.focus, FocusedPanel::Page);
        app.cycle_focus();
        assert_eq!(app.focus, FocusedPanel::Toc);
        assert_eq!(app.toc_state.selected(), Some(0));

        app.toggle_toc();
        assert_eq!(app.focus, FocusedPanel::Page);
        app.cycle_focus();
        assert_eq!(app.focus, FocusedPanel::Nav);
    }

    #[test]
    fn test_inline_contents_only_without_panel() {
        let mut app = app();
        let has_contents = |app: &App| app.rendered.lines.iter().any(|l| l.text == "Contents");
        assert!(!has_contents(&app));
        app.toggle_toc();
        assert!(has_contents(&app));
    }

    #[test]
    fn test_cycle_theme_wraps() {
        let mut app = app();
        let start = app.theme().name.clone();
        for _ in 0..Theme::available_themes().len() {
            app.cycle_theme();
        }
        assert_eq!(app.theme().name, start);
    }

    #[test]
    fn test_linked_route() {
        assert_eq!(
            linked_route("- MOV: Move data (/instructions/mov)").as_deref(),
            Some("/instructions/mov")
        );
        assert_eq!(linked_route("Plain (text)"), None);
    }
}
