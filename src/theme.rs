use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::page::PageKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub ui: UiColors,
    pub page: PageColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiColors {
    pub background: ThemeColor,
    pub foreground: ThemeColor,
    pub border: ThemeColor,
    pub border_focused: ThemeColor,
    pub title: ThemeColor,
    pub title_focused: ThemeColor,
    pub selection: ThemeColor,
    pub selection_fg: ThemeColor,
    pub search_match: ThemeColor,

    // Status bar
    pub status_bar_bg: ThemeColor,
    pub status_bar_fg: ThemeColor,
    pub mode_pages_bg: ThemeColor,
    pub mode_pages_fg: ThemeColor,
    pub mode_page_bg: ThemeColor,
    pub mode_page_fg: ThemeColor,
    pub mode_toc_bg: ThemeColor,
    pub mode_toc_fg: ThemeColor,
    pub mode_search_bg: ThemeColor,
    pub mode_search_fg: ThemeColor,

    // Navigation list
    pub nav_index: ThemeColor,
    pub nav_instruction: ThemeColor,
    pub nav_register: ThemeColor,
    pub nav_history: ThemeColor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageColors {
    pub breadcrumb: ThemeColor,
    pub title: ThemeColor,
    pub summary: ThemeColor,
    pub heading: ThemeColor,
    pub subheading: ThemeColor,
    pub prose: ThemeColor,
    pub code: ThemeColor,
    pub table_header: ThemeColor,
    pub table_rule: ThemeColor,
    pub diagram: ThemeColor,
    pub toc_label: ThemeColor,
    pub citation: ThemeColor,
    pub error: ThemeColor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    Rgb { r: u8, g: u8, b: u8 },
    Named(String),
}

impl ThemeColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        match self {
            ThemeColor::Rgb { r, g, b } => Color::Rgb(*r, *g, *b),
            ThemeColor::Named(name) => parse_named(name),
        }
    }
}

fn parse_named(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        hex if hex.len() == 7
            && hex.starts_with('#')
            && hex[1..].bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
            match (channel(1..3), channel(3..5), channel(5..7)) {
                (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
                _ => Color::White,
            }
        }
        _ => Color::White,
    }
}

impl UiColors {
    pub fn nav_color(&self, kind: PageKind) -> Color {
        match kind {
            PageKind::Index => self.nav_index.to_color(),
            PageKind::Instruction => self.nav_instruction.to_color(),
            PageKind::Register => self.nav_register.to_color(),
            PageKind::History => self.nav_history.to_color(),
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: String::from("dark"),
            ui: UiColors {
                background: ThemeColor::rgb(30, 30, 30),
                foreground: ThemeColor::rgb(212, 212, 212),
                border: ThemeColor::rgb(60, 60, 60),
                border_focused: ThemeColor::rgb(100, 149, 237),
                title: ThemeColor::rgb(100, 100, 100),
                title_focused: ThemeColor::rgb(100, 149, 237),
                selection: ThemeColor::rgb(70, 70, 120),
                selection_fg: ThemeColor::rgb(255, 255, 255),
                search_match: ThemeColor::rgb(150, 120, 0),

                status_bar_bg: ThemeColor::rgb(25, 25, 25),
                status_bar_fg: ThemeColor::rgb(150, 150, 150),
                mode_pages_bg: ThemeColor::rgb(180, 130, 200),
                mode_pages_fg: ThemeColor::rgb(30, 30, 30),
                mode_page_bg: ThemeColor::rgb(86, 156, 214),
                mode_page_fg: ThemeColor::rgb(30, 30, 30),
                mode_toc_bg: ThemeColor::rgb(78, 201, 176),
                mode_toc_fg: ThemeColor::rgb(30, 30, 30),
                mode_search_bg: ThemeColor::rgb(214, 157, 86),
                mode_search_fg: ThemeColor::rgb(30, 30, 30),

                nav_index: ThemeColor::rgb(86, 156, 214),
                nav_instruction: ThemeColor::rgb(220, 220, 170),
                nav_register: ThemeColor::rgb(78, 201, 176),
                nav_history: ThemeColor::rgb(197, 134, 192),
            },
            page: PageColors {
                breadcrumb: ThemeColor::rgb(128, 128, 128),
                title: ThemeColor::rgb(86, 156, 214),
                summary: ThemeColor::rgb(156, 220, 254),
                heading: ThemeColor::rgb(220, 220, 170),
                subheading: ThemeColor::rgb(78, 201, 176),
                prose: ThemeColor::rgb(212, 212, 212),
                code: ThemeColor::rgb(206, 145, 120),
                table_header: ThemeColor::rgb(86, 156, 214),
                table_rule: ThemeColor::rgb(90, 90, 90),
                diagram: ThemeColor::rgb(181, 206, 168),
                toc_label: ThemeColor::rgb(197, 134, 192),
                citation: ThemeColor::rgb(106, 153, 85),
                error: ThemeColor::rgb(244, 71, 71),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: String::from("light"),
            ui: UiColors {
                background: ThemeColor::rgb(255, 255, 255),
                foreground: ThemeColor::rgb(30, 30, 30),
                border: ThemeColor::rgb(200, 200, 200),
                border_focused: ThemeColor::rgb(0, 122, 204),
                title: ThemeColor::rgb(120, 120, 120),
                title_focused: ThemeColor::rgb(0, 122, 204),
                selection: ThemeColor::rgb(173, 214, 255),
                selection_fg: ThemeColor::rgb(0, 0, 0),
                search_match: ThemeColor::rgb(255, 215, 0),

                status_bar_bg: ThemeColor::rgb(240, 240, 240),
                status_bar_fg: ThemeColor::rgb(80, 80, 80),
                mode_pages_bg: ThemeColor::rgb(147, 51, 234),
                mode_pages_fg: ThemeColor::rgb(255, 255, 255),
                mode_page_bg: ThemeColor::rgb(0, 122, 204),
                mode_page_fg: ThemeColor::rgb(255, 255, 255),
                mode_toc_bg: ThemeColor::rgb(22, 163, 74),
                mode_toc_fg: ThemeColor::rgb(255, 255, 255),
                mode_search_bg: ThemeColor::rgb(234, 88, 12),
                mode_search_fg: ThemeColor::rgb(255, 255, 255),

                nav_index: ThemeColor::rgb(0, 122, 204),
                nav_instruction: ThemeColor::rgb(121, 94, 38),
                nav_register: ThemeColor::rgb(0, 128, 128),
                nav_history: ThemeColor::rgb(175, 0, 219),
            },
            page: PageColors {
                breadcrumb: ThemeColor::rgb(120, 120, 120),
                title: ThemeColor::rgb(0, 0, 255),
                summary: ThemeColor::rgb(38, 127, 153),
                heading: ThemeColor::rgb(121, 94, 38),
                subheading: ThemeColor::rgb(0, 128, 128),
                prose: ThemeColor::rgb(30, 30, 30),
                code: ThemeColor::rgb(163, 21, 21),
                table_header: ThemeColor::rgb(0, 0, 255),
                table_rule: ThemeColor::rgb(180, 180, 180),
                diagram: ThemeColor::rgb(9, 134, 88),
                toc_label: ThemeColor::rgb(175, 0, 219),
                citation: ThemeColor::rgb(0, 128, 0),
                error: ThemeColor::rgb(185, 28, 28),
            },
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: String::from("gruvbox"),
            ui: UiColors {
                background: ThemeColor::rgb(40, 40, 40),
                foreground: ThemeColor::rgb(235, 219, 178),
                border: ThemeColor::rgb(80, 73, 69),
                border_focused: ThemeColor::rgb(215, 153, 33),
                title: ThemeColor::rgb(146, 131, 116),
                title_focused: ThemeColor::rgb(215, 153, 33),
                selection: ThemeColor::rgb(80, 73, 69),
                selection_fg: ThemeColor::rgb(235, 219, 178),
                search_match: ThemeColor::rgb(250, 189, 47),

                status_bar_bg: ThemeColor::rgb(50, 48, 47),
                status_bar_fg: ThemeColor::rgb(168, 153, 132),
                mode_pages_bg: ThemeColor::rgb(211, 134, 155),
                mode_pages_fg: ThemeColor::rgb(40, 40, 40),
                mode_page_bg: ThemeColor::rgb(131, 165, 152),
                mode_page_fg: ThemeColor::rgb(40, 40, 40),
                mode_toc_bg: ThemeColor::rgb(184, 187, 38),
                mode_toc_fg: ThemeColor::rgb(40, 40, 40),
                mode_search_bg: ThemeColor::rgb(254, 128, 25),
                mode_search_fg: ThemeColor::rgb(40, 40, 40),

                nav_index: ThemeColor::rgb(131, 165, 152),
                nav_instruction: ThemeColor::rgb(250, 189, 47),
                nav_register: ThemeColor::rgb(184, 187, 38),
                nav_history: ThemeColor::rgb(211, 134, 155),
            },
            page: PageColors {
                breadcrumb: ThemeColor::rgb(146, 131, 116),
                title: ThemeColor::rgb(251, 73, 52),
                summary: ThemeColor::rgb(131, 165, 152),
                heading: ThemeColor::rgb(250, 189, 47),
                subheading: ThemeColor::rgb(254, 128, 25),
                prose: ThemeColor::rgb(235, 219, 178),
                code: ThemeColor::rgb(184, 187, 38),
                table_header: ThemeColor::rgb(131, 165, 152),
                table_rule: ThemeColor::rgb(102, 92, 84),
                diagram: ThemeColor::rgb(211, 134, 155),
                toc_label: ThemeColor::rgb(254, 128, 25),
                citation: ThemeColor::rgb(146, 131, 116),
                error: ThemeColor::rgb(251, 73, 52),
            },
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::gruvbox(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["dark", "light", "gruvbox"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_hex_colors() {
        assert_eq!(ThemeColor::Named("Cyan".into()).to_color(), Color::Cyan);
        assert_eq!(
            ThemeColor::Named("#fe8019".into()).to_color(),
            Color::Rgb(254, 128, 25)
        );
        assert_eq!(ThemeColor::Named("#zzzzzz".into()).to_color(), Color::White);
    }

    #[test]
    fn test_malformed_hex_falls_back_to_white() {
        assert_eq!(ThemeColor::Named("#aé123".into()).to_color(), Color::White);
        assert_eq!(ThemeColor::Named("#+1+2+3".into()).to_color(), Color::White);
        assert_eq!(ThemeColor::Named("#12345".into()).to_color(), Color::White);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_gruvbox() {
        assert_eq!(Theme::from_name("solarized").name, "gruvbox");
        for name in Theme::available_themes() {
            assert_eq!(Theme::from_name(name).name, name);
        }
    }

    #[test]
    fn test_theme_color_deserializes_both_forms() {
        #[derive(Deserialize)]
        struct Wrapper {
            a: ThemeColor,
            b: ThemeColor,
        }
        let w: Wrapper = toml::from_str("a = \"red\"\nb = { r = 1, g = 2, b = 3 }\n").unwrap();
        assert_eq!(w.a.to_color(), Color::Red);
        assert_eq!(w.b.to_color(), Color::Rgb(1, 2, 3));
    }
}
