//! Table-of-contents numbering.
//!
//! A TOC container holds arbitrary children. Only valid entries are kept and
//! each one gets a label derived from its position, never from a label it
//! may already carry.

/// One child of a TOC container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TocNode {
    Entry(TocEntry),
    Text(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub anchor: String,
    pub label: Option<String>,
    pub children: Vec<TocNode>,
}

impl TocEntry {
    pub fn new(title: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            anchor: anchor.into(),
            label: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TocNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.anchor.trim().is_empty()
    }

    /// Label assigned by `number_entries`, empty if never numbered
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    /// Numbered children (non-entry nodes are already gone after numbering)
    pub fn entries(&self) -> impl Iterator<Item = &TocEntry> {
        self.children.iter().filter_map(|node| match node {
            TocNode::Entry(entry) => Some(entry),
            _ => None,
        })
    }
}

impl From<TocEntry> for TocNode {
    fn from(entry: TocEntry) -> Self {
        TocNode::Entry(entry)
    }
}

/// Keep the valid entries of `children`, label them `1..M` in document order
/// and recurse. Nested labels are dotted paths ("2.1").
pub fn number_entries(children: &[TocNode]) -> Vec<TocEntry> {
    number_level(children, "")
}

fn number_level(children: &[TocNode], prefix: &str) -> Vec<TocEntry> {
    children
        .iter()
        .filter_map(|node| match node {
            TocNode::Entry(entry) if entry.is_valid() => Some(entry),
            _ => None,
        })
        .enumerate()
        .map(|(idx, entry)| {
            let label = if prefix.is_empty() {
                (idx + 1).to_string()
            } else {
                format!("{}.{}", prefix, idx + 1)
            };
            let children = number_level(&entry.children, &label)
                .into_iter()
                .map(TocNode::Entry)
                .collect();
            TocEntry {
                title: entry.title.clone(),
                anchor: entry.anchor.clone(),
                label: Some(label),
                children,
            }
        })
        .collect()
}

/// Pre-order listing of numbered entries with their depth (0 = top level)
pub fn flatten(entries: &[TocEntry]) -> Vec<(usize, &TocEntry)> {
    let mut out = Vec::new();
    for entry in entries {
        push_flat(entry, 0, &mut out);
    }
    out
}

fn push_flat<'a>(entry: &'a TocEntry, depth: usize, out: &mut Vec<(usize, &'a TocEntry)>) {
    out.push((depth, entry));
    for child in entry.entries() {
        push_flat(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, anchor: &str) -> TocNode {
        TocNode::Entry(TocEntry::new(title, anchor))
    }

    #[test]
    fn test_labels_only_valid_entries() {
        let children = vec![
            TocNode::Empty,
            entry("Description", "description"),
            TocNode::Text("\n".to_string()),
            entry("", "blank-title"),
            entry("Operation", "operation"),
            entry("No anchor", "  "),
            entry("Flags Affected", "flags"),
            TocNode::Empty,
        ];

        let numbered = number_entries(&children);
        let labels: Vec<_> = numbered.iter().map(|e| e.label()).collect();
        let titles: Vec<_> = numbered.iter().map(|e| e.title.as_str()).collect();

        assert_eq!(labels, vec!["1", "2", "3"]);
        assert_eq!(titles, vec!["Description", "Operation", "Flags Affected"]);
    }

    #[test]
    fn test_nested_labels() {
        let children = vec![
            entry("Overview", "overview"),
            TocNode::Entry(TocEntry::new("Exceptions", "exceptions").with_children(vec![
                entry("Protected Mode", "protected"),
                TocNode::Empty,
                entry("Real-Address Mode", "real"),
            ])),
        ];

        let numbered = number_entries(&children);
        let nested: Vec<_> = numbered[1].entries().map(|e| e.label()).collect();
        assert_eq!(nested, vec!["2.1", "2.2"]);
        // Dropped children are gone from the output, not just unlabeled
        assert_eq!(numbered[1].children.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let children = vec![
            TocNode::Text("intro".to_string()),
            entry("A", "a"),
            TocNode::Entry(TocEntry::new("B", "b").with_children(vec![entry("B1", "b1")])),
        ];

        let first = number_entries(&children);
        let again: Vec<TocNode> = first.iter().cloned().map(TocNode::Entry).collect();
        let second = number_entries(&again);

        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_labels_ignored() {
        let mut stale = TocEntry::new("Only", "only");
        stale.label = Some("7".to_string());
        let numbered = number_entries(&[TocNode::Empty, TocNode::Entry(stale)]);
        assert_eq!(numbered[0].label(), "1");
    }

    #[test]
    fn test_flatten_preorder() {
        let children = vec![
            TocNode::Entry(TocEntry::new("A", "a").with_children(vec![entry("A1", "a1")])),
            entry("B", "b"),
        ];
        let numbered = number_entries(&children);
        let flat: Vec<_> = flatten(&numbered)
            .into_iter()
            .map(|(depth, e)| (depth, e.label().to_string()))
            .collect();
        assert_eq!(
            flat,
            vec![
                (0, "1".to_string()),
                (1, "1.1".to_string()),
                (0, "2".to_string())
            ]
        );
    }
}
