//! Built-in reference pages: x86 instructions, registers, and history

mod history;
mod instructions;
mod registers;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::page::{Block, Citation, Page, PageKind, Section};

static PAGES: LazyLock<Vec<Page>> = LazyLock::new(|| {
    let instructions = instructions::pages();
    let registers = registers::pages();
    let history = history::pages();

    let mut pages = vec![
        home(),
        index_page(
            "/instructions",
            "Instructions",
            "General-purpose instruction reference",
            &instructions,
        ),
        index_page(
            "/registers",
            "Registers",
            "Register layouts and flag meanings",
            &registers,
        ),
        index_page(
            "/history",
            "History",
            "Milestones of the x86 architecture",
            &history,
        ),
    ];
    pages.extend(instructions);
    pages.extend(registers);
    pages.extend(history);
    pages.sort_by(|a, b| a.route.cmp(&b.route));
    pages
});

/// Every built-in page, sorted by route
pub fn all_pages() -> &'static [Page] {
    &PAGES
}

/// A set of pages addressable by route, built in or loaded from a page tree
#[derive(Debug, Clone)]
pub struct Catalog {
    pages: Vec<Page>,
    by_route: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(mut pages: Vec<Page>) -> Self {
        pages.sort_by(|a, b| a.route.cmp(&b.route));
        let mut by_route = HashMap::new();
        for (idx, page) in pages.iter().enumerate() {
            by_route.entry(normalize_route(&page.route)).or_insert(idx);
        }
        Self { pages, by_route }
    }

    pub fn builtin() -> Self {
        Self::new(all_pages().to_vec())
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page by route, ignoring case and surrounding slashes
/// ("/instructions/mov", "instructions/MOV/")
    pub fn get(&self, route: &str) -> Option<&Page> {
        let route = normalize_route(route);
        self.by_route.get(route.as_str()).map(|&idx| &self.pages[idx])
    }

    /// Look up an instruction or register page by its short name
    pub fn find_by_name(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|page| {
            matches!(page.kind, PageKind::Instruction | PageKind::Register)
                && page.slug().eq_ignore_ascii_case(name)
        })
    }

    /// Route if it names a page, otherwise a short name
    pub fn resolve(&self, query: &str) -> Option<&Page> {
        self.get(query)
            .or_else(|| self.find_by_name(query.trim_matches('/')))
    }

    pub fn search(&self, query: &str) -> Vec<&Page> {
        let query = query.trim();
        self.pages
            .iter()
            .filter(|page| query.is_empty() || page.matches(query))
            .collect()
    }

    pub fn title_of(&self, route: &str) -> Option<String> {
        self.get(route).map(|page| page.title.clone())
    }
}

fn normalize_route(route: &str) -> String {
    let trimmed = route.trim().trim_matches('/').to_lowercase();
    format!("/{}", trimmed)
}

fn index_page(route: &str, title: &str, summary: &str, children: &[Page]) -> Page {
    let items = children
        .iter()
        .map(|child| format!("{}: {} ({})", child.title, child.summary, child.route))
        .collect();
    Page::new(route, title, PageKind::Index)
        .summary(summary)
        .section(Section::new("pages", "Pages").block(Block::List { items }))
}

fn home() -> Page {
    Page::new("/", "x86 Reference", PageKind::Index)
        .summary("Instructions, registers, and history of the x86 and x86-64 architecture")
        .section(Section::intro(
            "A reference for the x86 family, from the 16-bit 8086 to 64-bit long mode. Instruction pages list encodings, operand forms, flag effects, and exceptions. Register pages show bit layouts.",
        ))
        .section(
            Section::new("sections", "Sections").block(Block::list(&[
                "Instructions (/instructions): opcode tables, flags affected, exceptions.",
                "Registers (/registers): general-purpose, EFLAGS, CR0, segment registers.",
                "History (/history): 8086, 80386, AMD64.",
            ])),
        )
        .section(
            Section::new("reading-opcode-tables", "Reading Opcode Tables").block(Block::list(&[
                "/r: the ModRM byte holds a register operand and an r/m operand.",
                "/digit: the ModRM reg field holds an opcode extension.",
                "ib, iw, id, io: 1-, 2-, 4-, or 8-byte immediate follows.",
                "cb, cd, cp: relative offset or far pointer follows.",
                "+rd: the low three opcode bits select a register.",
                "N.E.: not encodable in that mode. N.S.: not supported.",
            ])),
        )
        .cite(intel_sdm())
}

pub(crate) fn intel_sdm() -> Citation {
    Citation::new("Intel 64 and IA-32 Architectures Software Developer's Manual")
        .author("Intel Corporation")
        .publisher("Intel")
        .year(2024)
        .url("https://www.intel.com/content/www/us/en/developer/articles/technical/intel-sdm.html")
}

pub(crate) fn amd_apm() -> Citation {
    Citation::new("AMD64 Architecture Programmer's Manual")
        .author("Advanced Micro Devices")
        .publisher("AMD")
        .year(2024)
        .url("https://www.amd.com/en/search/documentation/hub.html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render_page, RenderOptions};

    #[test]
    fn test_get_instruction_page() {
        let catalog = Catalog::builtin();
        let page = catalog.get("/instructions/mov").unwrap();
        assert_eq!(page.title, "MOV");
        assert!(page.summary.contains("Move"));
    }

    #[test]
    fn test_route_normalization() {
        let catalog = Catalog::builtin();
        assert!(catalog.get("instructions/MOV/").is_some());
        assert!(catalog.get("/").is_some());
        assert!(catalog.get("").is_some());
        assert!(catalog.get("/instructions/vmovdqa").is_none());
    }

    #[test]
    fn test_case_insensitive_names() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find_by_name("CPUID").unwrap().route, "/instructions/cpuid");
        assert_eq!(catalog.find_by_name("eflags").unwrap().route, "/registers/eflags");
        assert!(catalog.find_by_name("history").is_none());
        assert_eq!(catalog.resolve("Xchg").unwrap().title, "XCHG");
    }

    #[test]
    fn test_routes_unique_and_sorted() {
        let routes: Vec<_> = all_pages().iter().map(|p| p.route.as_str()).collect();
        let mut sorted = routes.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(routes, sorted);
    }

    #[test]
    fn test_index_pages_link_children() {
        let catalog = Catalog::builtin();
        let index = catalog.get("/registers").unwrap();
        let text = format!("{:?}", index.sections);
        assert!(text.contains("/registers/eflags"));
        assert!(text.contains("/registers/cr0"));
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::builtin();
        let hits = catalog.search("stack");
        assert!(hits.iter().any(|p| p.title == "PUSH"));
        assert_eq!(catalog.search("").len(), all_pages().len());
        assert!(catalog.search("no such page").is_empty());
    }

    #[test]
    fn test_catalog_sorts_loaded_pages() {
        let catalog = Catalog::new(vec![
            Page::new("/b", "B", PageKind::History),
            Page::new("/a", "A", PageKind::History),
        ]);
        assert_eq!(catalog.pages()[0].route, "/a");
        assert_eq!(catalog.title_of("/b").as_deref(), Some("B"));
        assert!(catalog.find_by_name("a").is_none());
    }

    #[test]
    fn test_every_page_renders_with_numbered_toc() {
        let catalog = Catalog::builtin();
        for page in catalog.pages() {
            let rendered = render_page(page, &RenderOptions::default(), |r| catalog.title_of(r));
            assert!(
                rendered.errors.is_empty(),
                "{} has layout errors: {:?}",
                page.route,
                rendered.errors
            );
            assert!(!page.toc().is_empty(), "{} has no TOC", page.route);
            assert_eq!(page.toc()[0].label(), "1");
        }
    }

    #[test]
    fn test_breadcrumbs_use_titles() {
        let catalog = Catalog::builtin();
        let page = catalog.get("/instructions/lea").unwrap();
        let rendered = render_page(page, &RenderOptions::default(), |r| catalog.title_of(r));
        assert_eq!(rendered.lines[0].text, "Home / Instructions / LEA");
    }
}
