//! Shared page layout: breadcrumbs, table of contents, tables, bit-field
//! diagrams and citation lists, laid out as width-bounded text lines.
//!
//! The browser styles lines by `LineKind`; `show` prints them as they are.

use std::collections::HashMap;

use crate::page::{Block, Page, Section};
use crate::toc::{self, TocEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Breadcrumb,
    Title,
    Summary,
    Heading(usize),
    Prose,
    ListItem,
    Code,
    TableHeader,
    TableRule,
    TableRow,
    Diagram,
    Toc,
    Citation,
    Error,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub kind: LineKind,
    pub text: String,
}

impl RenderedLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineKind::Blank, "")
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderedPage {
    pub lines: Vec<RenderedLine>,
    /// Section anchor to the index of its first heading line
    pub anchors: HashMap<String, usize>,
    pub toc: Vec<TocEntry>,
    /// Heading line of each numbered entry, in `toc::flatten` order
    pub section_lines: Vec<usize>,
    /// Content problems found while laying out (bad bit-field layouts)
    pub errors: Vec<String>,
}

impl RenderedPage {
    pub fn line_of(&self, anchor: &str) -> Option<usize> {
        self.anchors.get(anchor).copied()
    }

    /// Heading line of the `idx`-th entry of the flattened TOC
    pub fn section_line(&self, idx: usize) -> Option<usize> {
        self.section_lines.get(idx).copied()
    }

    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line.text.trim_end());
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: usize,
    pub diagram_width: usize,
    pub show_toc: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 100,
            diagram_width: 72,
            show_toc: true,
        }
    }
}

/// Breadcrumb trail for a route: (label, route) pairs starting at Home.
///
/// `title_of` supplies titles of existing pages; other segments are
/// title-cased.
pub fn breadcrumbs<F>(route: &str, title_of: F) -> Vec<(String, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let mut crumbs = vec![(String::from("Home"), String::from("/"))];
    let mut prefix = String::new();
    for segment in route.split('/').filter(|s| !s.is_empty()) {
        prefix.push('/');
        prefix.push_str(segment);
        let label = title_of(&prefix).unwrap_or_else(|| title_case(segment));
        crumbs.push((label, prefix.clone()));
    }
    crumbs
}

fn title_case(segment: &str) -> String {
    segment
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn render_page<F>(page: &Page, options: &RenderOptions, title_of: F) -> RenderedPage
where
    F: Fn(&str) -> Option<String>,
{
    let width = options.width.max(20);
    let mut out = RenderedPage {
        toc: page.toc(),
        ..RenderedPage::default()
    };

    let crumbs = breadcrumbs(&page.route, title_of);
    let trail: Vec<&str> = crumbs.iter().map(|(label, _)| label.as_str()).collect();
    out.lines
        .push(RenderedLine::new(LineKind::Breadcrumb, trail.join(" / ")));
    out.lines.push(RenderedLine::blank());
    out.lines.push(RenderedLine::new(LineKind::Title, page.title.clone()));
    if !page.summary.is_empty() {
        for line in wrap(&page.summary, width) {
            out.lines.push(RenderedLine::new(LineKind::Summary, line));
        }
    }
    out.lines.push(RenderedLine::blank());

    if options.show_toc && !out.toc.is_empty() {
        out.lines.push(RenderedLine::new(LineKind::Heading(1), "Contents"));
        let toc_lines: Vec<RenderedLine> = toc::flatten(&out.toc)
            .into_iter()
            .map(|(depth, entry)| {
                RenderedLine::new(
                    LineKind::Toc,
                    format!("{}{:<6}{}", "  ".repeat(depth + 1), entry.label(), entry.title),
                )
            })
            .collect();
        out.lines.extend(toc_lines);
        out.lines.push(RenderedLine::blank());
    }

    let toc = out.toc.clone();
    let top: Vec<&TocEntry> = toc.iter().collect();
    render_sections(&page.sections, &top, 1, options, width, &mut out);

    if !page.citations.is_empty() {
        out.lines.push(RenderedLine::new(LineKind::Heading(1), "References"));
        for (idx, citation) in page.citations.iter().enumerate() {
            let marker = format!("[{}] ", idx + 1);
            let body_width = width.saturating_sub(marker.len()).max(10);
            for (i, line) in wrap(&citation.to_string(), body_width).into_iter().enumerate() {
                let lead = if i == 0 {
                    marker.clone()
                } else {
                    " ".repeat(marker.len())
                };
                out.lines
                    .push(RenderedLine::new(LineKind::Citation, format!("{}{}", lead, line)));
            }
        }
        out.lines.push(RenderedLine::blank());
    }

    out
}

/// Sections of one level paired by position with that level's numbered
/// entries. Sections the TOC dropped take no entry.
fn render_sections(
    sections: &[Section],
    entries: &[&TocEntry],
    level: usize,
    options: &RenderOptions,
    width: usize,
    out: &mut RenderedPage,
) {
    let mut entries = entries.iter().copied();
    for section in sections {
        let entry = match &section.heading {
            Some(heading) if TocEntry::new(heading.as_str(), section.anchor.as_str()).is_valid() => {
                entries.next()
            }
            _ => None,
        };
        render_section(section, entry, level, options, width, out);
    }
}

fn render_section(
    section: &Section,
    entry: Option<&TocEntry>,
    level: usize,
    options: &RenderOptions,
    width: usize,
    out: &mut RenderedPage,
) {
    if let Some(heading) = &section.heading {
        let line = out.lines.len();
        out.anchors.entry(section.anchor.clone()).or_insert(line);
        let text = match entry {
            Some(entry) => {
                out.section_lines.push(line);
                format!("{}  {}", entry.label(), heading)
            }
            None => heading.clone(),
        };
        out.lines.push(RenderedLine::new(LineKind::Heading(level), text));
    }

    for block in &section.blocks {
        render_block(block, options, width, out);
        out.lines.push(RenderedLine::blank());
    }

    let children: Vec<&TocEntry> = entry.map(|e| e.entries().collect()).unwrap_or_default();
    render_sections(&section.subsections, &children, level + 1, options, width, out);
}

fn render_block(block: &Block, options: &RenderOptions, width: usize, out: &mut RenderedPage) {
    match block {
        Block::Prose { text } => {
            for paragraph in text.split("\n\n") {
                for line in wrap(paragraph, width) {
                    out.lines.push(RenderedLine::new(LineKind::Prose, line));
                }
            }
        }
        Block::List { items } => {
            for item in items {
                for (i, line) in wrap(item, width.saturating_sub(4)).into_iter().enumerate() {
                    let lead = if i == 0 { "  • " } else { "    " };
                    out.lines
                        .push(RenderedLine::new(LineKind::ListItem, format!("{}{}", lead, line)));
                }
            }
        }
        Block::Code { caption, text } => {
            if let Some(caption) = caption {
                out.lines.push(RenderedLine::new(LineKind::Prose, caption.clone()));
            }
            for line in text.lines() {
                out.lines
                    .push(RenderedLine::new(LineKind::Code, format!("    {}", line)));
            }
        }
        Block::OpcodeTable { rows } => {
            let rows = rows
                .iter()
                .map(|r| {
                    vec![
                        r.opcode.clone(),
                        r.instruction.clone(),
                        r.op_en.clone(),
                        r.mode64.to_string(),
                        r.compat.to_string(),
                        r.description.clone(),
                    ]
                })
                .collect();
            table(
                &["Opcode", "Instruction", "Op/En", "64-bit", "Compat/Leg", "Description"],
                rows,
                width,
                out,
            );
        }
        Block::OperandEncoding { rows } => {
            let rows = rows
                .iter()
                .map(|r| {
                    let mut cells = vec![r.op_en.clone()];
                    for i in 0..4 {
                        cells.push(r.operands.get(i).cloned().unwrap_or_else(|| "NA".to_string()));
                    }
                    cells
                })
                .collect();
            table(
                &["Op/En", "Operand 1", "Operand 2", "Operand 3", "Operand 4"],
                rows,
                width,
                out,
            );
        }
        Block::Flags { rows } => {
            let rows = rows
                .iter()
                .map(|r| {
                    vec![
                        r.flag.clone(),
                        r.effect.code().to_string(),
                        r.effect.describe().to_string(),
                    ]
                })
                .collect();
            table(&["Flag", "Effect", "Meaning"], rows, width, out);
        }
        Block::Exceptions { mode, rows } => {
            out.lines
                .push(RenderedLine::new(LineKind::Prose, format!("{}:", mode)));
            let rows = rows
                .iter()
                .map(|r| vec![r.exception.clone(), r.condition.clone()])
                .collect();
            table(&["Exception", "Condition"], rows, width, out);
        }
        Block::BitField { diagram } => match diagram.render(options.diagram_width.min(width)) {
            Ok(lines) => {
                for line in lines {
                    out.lines.push(RenderedLine::new(LineKind::Diagram, line));
                }
            }
            Err(e) => {
                let message = format!("bit-field diagram error: {}", e);
                out.lines.push(RenderedLine::new(LineKind::Error, message.clone()));
                out.errors.push(message);
            }
        },
    }
}

/// Column-measured table; the last column wraps to the remaining width
fn table(headers: &[&str], rows: Vec<Vec<String>>, width: usize, out: &mut RenderedPage) {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let fixed: usize = widths[..columns - 1].iter().map(|w| w + 3).sum();
    let last = widths[columns - 1].min(width.saturating_sub(fixed).max(16));
    widths[columns - 1] = last;

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.lines
        .push(RenderedLine::new(LineKind::TableHeader, format_row(&header)));
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    out.lines.push(RenderedLine::new(LineKind::TableRule, rule));

    for row in rows {
        let wrapped = wrap(row.get(columns - 1).map(String::as_str).unwrap_or(""), last);
        for (i, tail) in wrapped.into_iter().enumerate() {
            let mut cells: Vec<String> = if i == 0 {
                row.iter().take(columns - 1).cloned().collect()
            } else {
                vec![String::new(); columns - 1]
            };
            cells.resize(columns - 1, String::new());
            cells.push(tail);
            out.lines
                .push(RenderedLine::new(LineKind::TableRow, format_row(&cells)));
        }
    }
}

/// Greedy word wrap; always yields at least one line
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{
        flags, BitField, Citation, ExceptionRow, FlagEffect, OpcodeRow, PageKind, Validity,
    };

    fn page() -> Page {
        Page::new("/instructions/inc", "INC", PageKind::Instruction)
            .summary("Increment by 1")
            .section(Section::intro("Adds one to the destination operand."))
            .section(
                Section::new("encoding", "Encoding").block(Block::OpcodeTable {
                    rows: vec![OpcodeRow::new(
                        "FE /0",
                        "INC r/m8",
                        "M",
                        Validity::Valid,
                        Validity::Valid,
                        "Increment r/m byte by 1.",
                    )],
                }),
            )
            .section(
                Section::new("flags", "Flags Affected")
                    .block(flags(&[("CF", FlagEffect::Unaffected), ("ZF", FlagEffect::Modified)])),
            )
            .section(
                Section::new("exceptions", "Exceptions").subsection(
                    Section::new("protected", "Protected Mode").block(Block::exceptions(
                        "Protected Mode",
                        vec![ExceptionRow::new("#GP(0)", "If the destination is read-only.")],
                    )),
                ),
            )
            .cite(Citation::new("Intel SDM").year(2024))
    }

    fn no_titles(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_breadcrumbs() {
        let crumbs = breadcrumbs("/instructions/inc", |route| {
            (route == "/instructions/inc").then(|| "INC".to_string())
        });
        let labels: Vec<_> = crumbs.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Home", "Instructions", "INC"]);
        assert_eq!(crumbs[1].1, "/instructions");

        assert_eq!(breadcrumbs("/", no_titles).len(), 1);
        assert_eq!(breadcrumbs("/cpu-history", no_titles)[1].0, "Cpu History");
    }

    #[test]
    fn test_headings_carry_toc_labels() {
        let rendered = render_page(&page(), &RenderOptions::default(), no_titles);
        let line = rendered.line_of("flags").unwrap();
        assert_eq!(rendered.lines[line].text, "2  Flags Affected");
        assert_eq!(rendered.lines[line].kind, LineKind::Heading(1));

        let nested = rendered.line_of("protected").unwrap();
        assert_eq!(rendered.lines[nested].text, "3.1  Protected Mode");
        assert_eq!(rendered.lines[nested].kind, LineKind::Heading(2));
    }

    #[test]
    fn test_repeated_anchor_labels_follow_position() {
        let page = Page::new("/history/notes", "Notes", PageKind::History)
            .section(Section::new("a", "A").subsection(Section::new("notes", "Notes").prose("first")))
            .section(Section::new("b", "B").subsection(Section::new("notes", "Notes").prose("second")));
        let rendered = render_page(&page, &RenderOptions::default(), no_titles);

        let headings: Vec<&str> = rendered
            .lines
            .iter()
            .filter(|l| matches!(l.kind, LineKind::Heading(2)))
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(headings, vec!["1.1  Notes", "2.1  Notes"]);

        assert_eq!(rendered.section_lines.len(), toc::flatten(&rendered.toc).len());
        let second = rendered.section_line(3).unwrap();
        assert_eq!(rendered.lines[second].text, "2.1  Notes");
        assert!(rendered.line_of("notes").unwrap() < second);
    }

    #[test]
    fn test_dropped_heading_takes_no_label() {
        let page = Page::new("/history/gaps", "Gaps", PageKind::History)
            .section(Section::new("", "Untitled anchor").prose("skipped"))
            .section(Section::new("kept", "Kept").prose("numbered"));
        let rendered = render_page(&page, &RenderOptions::default(), no_titles);

        let kept = rendered.line_of("kept").unwrap();
        assert_eq!(rendered.lines[kept].text, "1  Kept");
        assert_eq!(rendered.section_lines, vec![kept]);
        assert!(rendered.lines.iter().any(|l| l.text == "Untitled anchor"));
    }

    #[test]
    fn test_contents_and_references() {
        let text = render_page(&page(), &RenderOptions::default(), no_titles).to_plain_text();
        assert!(text.starts_with("Home / Instructions / Inc\n"));
        assert!(text.contains("Contents"));
        assert!(text.contains("[1] Intel SDM. 2024."));
        assert!(text.contains("FE /0"));
        assert!(text.contains("#GP(0)"));
    }

    #[test]
    fn test_toc_hidden_when_disabled() {
        let options = RenderOptions {
            show_toc: false,
            ..RenderOptions::default()
        };
        let rendered = render_page(&page(), &options, no_titles);
        assert!(rendered.lines.iter().all(|l| l.kind != LineKind::Toc));
        // Labels still come from the numbered TOC
        assert_eq!(rendered.toc.len(), 3);
    }

    #[test]
    fn test_table_wraps_last_column() {
        let mut out = RenderedPage::default();
        table(
            &["A", "Text"],
            vec![vec!["x".to_string(), "one two three four five six".to_string()]],
            22,
            &mut out,
        );
        let rows: Vec<_> = out
            .lines
            .iter()
            .filter(|l| l.kind == LineKind::TableRow)
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].text.starts_with("x | "));
        assert!(rows[1].text.starts_with("  | "));
    }

    #[test]
    fn test_bad_diagram_reported_inline() {
        let page = Page::new("/registers/bad", "Bad", PageKind::Register).section(
            Section::new("layout", "Layout").block(Block::bitfield(4, vec![BitField::bit("X", 9)])),
        );
        let rendered = render_page(&page, &RenderOptions::default(), no_titles);
        assert_eq!(rendered.errors.len(), 1);
        assert!(rendered.lines.iter().any(|l| l.kind == LineKind::Error));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("longword", 3), vec!["longword"]);
    }
}
