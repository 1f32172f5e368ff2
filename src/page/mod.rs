//! Reference page data model

pub mod bitfield;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::toc::{self, TocEntry, TocNode};

pub use bitfield::{BitField, BitFieldDiagram};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Index,
    Instruction,
    Register,
    History,
}

impl PageKind {
    pub fn label(self) -> &'static str {
        match self {
            PageKind::Index => "Index",
            PageKind::Instruction => "Instruction",
            PageKind::Register => "Register",
            PageKind::History => "History",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Filled in from the file location when loaded from a page tree
    #[serde(default)]
    pub route: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub kind: PageKind,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl Page {
    pub fn new(route: &str, title: &str, kind: PageKind) -> Self {
        Self {
            route: route.to_string(),
            title: title.to_string(),
            summary: String::new(),
            kind,
            sections: Vec::new(),
            citations: Vec::new(),
        }
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn cite(mut self, citation: Citation) -> Self {
        self.citations.push(citation);
        self
    }

    /// Last route segment, e.g. "mov" for "/instructions/mov"
    pub fn slug(&self) -> &str {
        self.route.rsplit('/').next().unwrap_or("")
    }

    /// Numbered table of contents built from the section headings
    pub fn toc(&self) -> Vec<TocEntry> {
        let nodes: Vec<TocNode> = self.sections.iter().map(Section::toc_node).collect();
        toc::number_entries(&nodes)
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.route.to_lowercase().contains(&query)
            || self.summary.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub anchor: String,
    /// Introductory sections have no heading and stay out of the TOC
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub subsections: Vec<Section>,
}

impl Section {
    pub fn new(anchor: &str, heading: &str) -> Self {
        Self {
            anchor: anchor.to_string(),
            heading: Some(heading.to_string()),
            blocks: Vec::new(),
            subsections: Vec::new(),
        }
    }

    pub fn intro(text: &str) -> Self {
        Self {
            anchor: String::from("intro"),
            heading: None,
            blocks: vec![Block::prose(text)],
            subsections: Vec::new(),
        }
    }

    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn prose(self, text: &str) -> Self {
        self.block(Block::prose(text))
    }

    pub fn subsection(mut self, section: Section) -> Self {
        self.subsections.push(section);
        self
    }

    fn toc_node(&self) -> TocNode {
        match &self.heading {
            Some(heading) => TocEntry::new(heading.clone(), self.anchor.clone())
                .with_children(self.subsections.iter().map(Section::toc_node).collect())
                .into(),
            None => match self.blocks.first() {
                Some(Block::Prose { text }) => TocNode::Text(text.clone()),
                _ => TocNode::Empty,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Prose {
        text: String,
    },
    List {
        items: Vec<String>,
    },
    Code {
        #[serde(default)]
        caption: Option<String>,
        text: String,
    },
    OpcodeTable {
        rows: Vec<OpcodeRow>,
    },
    OperandEncoding {
        rows: Vec<OperandEncodingRow>,
    },
    Flags {
        rows: Vec<FlagRow>,
    },
    Exceptions {
        mode: String,
        rows: Vec<ExceptionRow>,
    },
    BitField {
        diagram: BitFieldDiagram,
    },
}

impl Block {
    pub fn prose(text: &str) -> Self {
        Block::Prose {
            text: text.to_string(),
        }
    }

    pub fn list(items: &[&str]) -> Self {
        Block::List {
            items: items.iter().map(|i| i.to_string()).collect(),
        }
    }

    pub fn code(text: &str) -> Self {
        Block::Code {
            caption: None,
            text: text.to_string(),
        }
    }

    pub fn exceptions(mode: &str, rows: Vec<ExceptionRow>) -> Self {
        Block::Exceptions {
            mode: mode.to_string(),
            rows,
        }
    }

    pub fn bitfield(width: u8, fields: Vec<BitField>) -> Self {
        Block::BitField {
            diagram: BitFieldDiagram::new(width, fields),
        }
    }
}

/// Whether an encoding is usable in a processor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    Valid,
    Invalid,
    NotEncodable,
    NotSupported,
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Validity::Valid => "Valid",
            Validity::Invalid => "Invalid",
            Validity::NotEncodable => "N.E.",
            Validity::NotSupported => "N.S.",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcodeRow {
    pub opcode: String,
    pub instruction: String,
    pub op_en: String,
    pub mode64: Validity,
    pub compat: Validity,
    pub description: String,
}

impl OpcodeRow {
    pub fn new(
        opcode: &str,
        instruction: &str,
        op_en: &str,
        mode64: Validity,
        compat: Validity,
        description: &str,
    ) -> Self {
        Self {
            opcode: opcode.to_string(),
            instruction: instruction.to_string(),
            op_en: op_en.to_string(),
            mode64,
            compat,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperandEncodingRow {
    pub op_en: String,
    pub operands: Vec<String>,
}

impl OperandEncodingRow {
    pub fn new(op_en: &str, operands: &[&str]) -> Self {
        Self {
            op_en: op_en.to_string(),
            operands: operands.iter().map(|o| o.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagEffect {
    Unaffected,
    Modified,
    Set,
    Cleared,
    Undefined,
}

impl FlagEffect {
    pub fn describe(self) -> &'static str {
        match self {
            FlagEffect::Unaffected => "unaffected",
            FlagEffect::Modified => "set according to the result",
            FlagEffect::Set => "set to 1",
            FlagEffect::Cleared => "cleared to 0",
            FlagEffect::Undefined => "undefined",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            FlagEffect::Unaffected => "-",
            FlagEffect::Modified => "M",
            FlagEffect::Set => "1",
            FlagEffect::Cleared => "0",
            FlagEffect::Undefined => "U",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRow {
    pub flag: String,
    pub effect: FlagEffect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRow {
    pub exception: String,
    pub condition: String,
}

impl ExceptionRow {
    pub fn new(exception: &str, condition: &str) -> Self {
        Self {
            exception: exception.to_string(),
            condition: condition.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default)]
    pub author: Option<String>,
    pub title: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Citation {
    pub fn new(title: &str) -> Self {
        Self {
            author: None,
            title: title.to_string(),
            publisher: None,
            year: None,
            url: None,
        }
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn publisher(mut self, publisher: &str) -> Self {
        self.publisher = Some(publisher.to_string());
        self
    }

    pub fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }
}

/// `Author. Title. Publisher, Year. URL` with missing parts left out
impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(author) = &self.author {
            write!(f, "{}. ", author)?;
        }
        write!(f, "{}.", self.title)?;
        match (&self.publisher, self.year) {
            (Some(publisher), Some(year)) => write!(f, " {}, {}.", publisher, year)?,
            (Some(publisher), None) => write!(f, " {}.", publisher)?,
            (None, Some(year)) => write!(f, " {}.", year)?,
            (None, None) => {}
        }
        if let Some(url) = &self.url {
            write!(f, " {}", url)?;
        }
        Ok(())
    }
}

/// Shorthand for a row of a flags table
pub fn flags(rows: &[(&str, FlagEffect)]) -> Block {
    Block::Flags {
        rows: rows
            .iter()
            .map(|(flag, effect)| FlagRow {
                flag: flag.to_string(),
                effect: *effect,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Page {
        Page::new("/instructions/nop", "NOP", PageKind::Instruction)
            .summary("No operation")
            .section(Section::intro("Performs no operation."))
            .section(Section::new("description", "Description").prose("Does nothing."))
            .section(
                Section::new("exceptions", "Exceptions")
                    .subsection(Section::new("protected", "Protected Mode"))
                    .subsection(Section::new("real", "Real-Address Mode")),
            )
            .cite(Citation::new("Intel SDM").publisher("Intel").year(2024))
    }

    #[test]
    fn test_toc_skips_intro() {
        let toc = sample().toc();
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].title, "Description");
        assert_eq!(toc[0].label(), "1");
        assert_eq!(toc[1].label(), "2");
        let nested: Vec<_> = toc[1].entries().map(|e| e.label()).collect();
        assert_eq!(nested, vec!["2.1", "2.2"]);
    }

    #[test]
    fn test_slug_and_search() {
        let page = sample();
        assert_eq!(page.slug(), "nop");
        assert!(page.matches("NO OPER"));
        assert!(page.matches("instructions/"));
        assert!(!page.matches("cpuid"));
    }

    #[test]
    fn test_citation_format() {
        let full = Citation::new("Intel 64 and IA-32 Architectures Software Developer's Manual")
            .author("Intel Corporation")
            .publisher("Intel")
            .year(2024)
            .url("https://www.intel.com/sdm");
        assert_eq!(
            full.to_string(),
            "Intel Corporation. Intel 64 and IA-32 Architectures Software Developer's Manual. Intel, 2024. https://www.intel.com/sdm"
        );
        assert_eq!(Citation::new("Notes").year(1978).to_string(), "Notes. 1978.");
        assert_eq!(Citation::new("Notes").to_string(), "Notes.");
    }

    #[test]
    fn test_page_toml_roundtrip() {
        let page = sample()
            .section(
                Section::new("flags", "Flags Affected")
                    .block(flags(&[("CF", FlagEffect::Modified), ("ZF", FlagEffect::Unaffected)]))
                    .block(Block::bitfield(8, vec![BitField::bit("CF", 0)])),
            );
        let text = toml::to_string_pretty(&page).unwrap();
        let parsed: Page = toml::from_str(&text).unwrap();
        assert_eq!(parsed, page);
    }

    #[test]
    fn test_validity_display() {
        assert_eq!(Validity::NotEncodable.to_string(), "N.E.");
        assert_eq!(FlagEffect::Cleared.code(), "0");
    }
}
