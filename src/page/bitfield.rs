//! Register bit-field diagrams

use serde::{Deserialize, Serialize};

use crate::error::BitFieldError;

const GAP_NAME: &str = "res";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitFieldDiagram {
    pub width: u8,
    pub fields: Vec<BitField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitField {
    pub name: String,
    pub high: u8,
    pub low: u8,
}

impl BitField {
    pub fn bit(name: &str, bit: u8) -> Self {
        Self::range(name, bit, bit)
    }

    pub fn range(name: &str, high: u8, low: u8) -> Self {
        Self {
            name: name.to_string(),
            high,
            low,
        }
    }
}

/// A laid-out cell; `name` is `None` for an undocumented gap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub name: Option<String>,
    pub high: u8,
    pub low: u8,
}

impl Cell {
    fn gap(high: u8, low: u8) -> Self {
        Self {
            name: None,
            high,
            low,
        }
    }

    pub fn bits_label(&self) -> String {
        if self.high == self.low {
            self.high.to_string()
        } else {
            format!("{}:{}", self.high, self.low)
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(GAP_NAME)
    }

    fn inner_width(&self) -> usize {
        self.display_name()
            .chars()
            .count()
            .max(self.bits_label().chars().count())
            + 2
    }
}

impl BitFieldDiagram {
    pub fn new(width: u8, fields: Vec<BitField>) -> Self {
        Self { width, fields }
    }

    /// Validate the fields and fill gaps, most significant bit first
    pub fn layout(&self) -> Result<Vec<Cell>, BitFieldError> {
        if self.width == 0 || self.width > 64 {
            return Err(BitFieldError::BadWidth(self.width));
        }

        for field in &self.fields {
            if field.high < field.low {
                return Err(BitFieldError::Inverted {
                    name: field.name.clone(),
                    high: field.high,
                    low: field.low,
                });
            }
            if field.high >= self.width {
                return Err(BitFieldError::OutOfRange {
                    name: field.name.clone(),
                    high: field.high,
                    width: self.width,
                });
            }
        }

        let mut sorted: Vec<&BitField> = self.fields.iter().collect();
        sorted.sort_by(|a, b| b.high.cmp(&a.high));

        let mut cells = Vec::with_capacity(sorted.len() * 2);
        // Highest bit not yet covered, None once bit 0 is covered
        let mut next: Option<u8> = Some(self.width - 1);
        let mut prev: Option<&BitField> = None;

        for field in sorted {
            match next {
                Some(top) if field.high <= top => {
                    if field.high < top {
                        cells.push(Cell::gap(top, field.high + 1));
                    }
                }
                _ => {
                    let first = prev.map(|p| p.name.clone()).unwrap_or_default();
                    return Err(BitFieldError::Overlap {
                        first,
                        second: field.name.clone(),
                        bit: field.high,
                    });
                }
            }
            cells.push(Cell {
                name: Some(field.name.clone()),
                high: field.high,
                low: field.low,
            });
            next = field.low.checked_sub(1);
            prev = Some(field);
        }

        if let Some(top) = next {
            cells.push(Cell::gap(top, 0));
        }
        Ok(cells)
    }

    /// Text rendering, wrapped into bands no wider than `max_width`
    pub fn render(&self, max_width: usize) -> Result<Vec<String>, BitFieldError> {
        let cells = self.layout()?;

        let mut bands: Vec<Vec<&Cell>> = Vec::new();
        let mut current: Vec<&Cell> = Vec::new();
        let mut current_width = 1;
        for cell in &cells {
            let w = cell.inner_width() + 1;
            if !current.is_empty() && current_width + w > max_width {
                bands.push(std::mem::take(&mut current));
                current_width = 1;
            }
            current_width += w;
            current.push(cell);
        }
        if !current.is_empty() {
            bands.push(current);
        }

        let mut lines = Vec::new();
        for (idx, band) in bands.iter().enumerate() {
            if idx > 0 {
                lines.push(String::new());
            }
            let mut bits = String::from(" ");
            let mut border = String::from("+");
            let mut names = String::from("|");
            for cell in band {
                let w = cell.inner_width();
                bits.push_str(&format!("{:^w$} ", cell.bits_label(), w = w));
                border.push_str(&format!("{}+", "-".repeat(w)));
                names.push_str(&format!("{:^w$}|", cell.display_name(), w = w));
            }
            lines.push(bits.trim_end().to_string());
            lines.push(border.clone());
            lines.push(names);
            lines.push(border);
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(cells: &[Cell]) -> Vec<String> {
        cells
            .iter()
            .map(|c| format!("{}@{}", c.display_name(), c.bits_label()))
            .collect()
    }

    #[test]
    fn test_layout_fills_gaps() {
        let diagram = BitFieldDiagram::new(
            8,
            vec![BitField::bit("ZF", 6), BitField::bit("CF", 0), BitField::range("IOPL", 5, 4)],
        );
        let cells = diagram.layout().unwrap();
        assert_eq!(
            names(&cells),
            vec!["res@7", "ZF@6", "IOPL@5:4", "res@3:1", "CF@0"]
        );
    }

    #[test]
    fn test_full_coverage_has_no_gaps() {
        let diagram = BitFieldDiagram::new(
            16,
            vec![BitField::range("AH", 15, 8), BitField::range("AL", 7, 0)],
        );
        assert_eq!(names(&diagram.layout().unwrap()), vec!["AH@15:8", "AL@7:0"]);
    }

    #[test]
    fn test_overlap_rejected() {
        let diagram = BitFieldDiagram::new(
            8,
            vec![BitField::range("A", 7, 3), BitField::range("B", 4, 0)],
        );
        assert_eq!(
            diagram.layout(),
            Err(BitFieldError::Overlap {
                first: "A".to_string(),
                second: "B".to_string(),
                bit: 4
            })
        );
    }

    #[test]
    fn test_bad_fields_rejected() {
        let out_of_range = BitFieldDiagram::new(8, vec![BitField::bit("X", 8)]);
        assert!(matches!(
            out_of_range.layout(),
            Err(BitFieldError::OutOfRange { .. })
        ));

        let inverted = BitFieldDiagram::new(8, vec![BitField::range("X", 1, 3)]);
        assert!(matches!(inverted.layout(), Err(BitFieldError::Inverted { .. })));

        assert_eq!(
            BitFieldDiagram::new(0, vec![]).layout(),
            Err(BitFieldError::BadWidth(0))
        );
    }

    #[test]
    fn test_64_bit_register() {
        let diagram = BitFieldDiagram::new(64, vec![BitField::range("RAX", 63, 0)]);
        assert_eq!(names(&diagram.layout().unwrap()), vec!["RAX@63:0"]);
    }

    #[test]
    fn test_render_single_band() {
        let diagram = BitFieldDiagram::new(
            4,
            vec![BitField::range("HI", 3, 2), BitField::range("LO", 1, 0)],
        );
        let lines = diagram.render(80).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "+-----+-----+");
        assert_eq!(lines[2], "| HI  | LO  |");
        assert!(lines[0].contains("3:2") && lines[0].contains("1:0"));
    }

    #[test]
    fn test_render_aligns_non_ascii_names() {
        let diagram = BitFieldDiagram::new(
            4,
            vec![BitField::range("Ωμ", 3, 2), BitField::range("LO", 1, 0)],
        );
        let lines = diagram.render(80).unwrap();
        assert_eq!(lines[1], "+-----+-----+");
        assert_eq!(lines[2], "| Ωμ  | LO  |");
        assert_eq!(lines[1].chars().count(), lines[2].chars().count());
    }

    #[test]
    fn test_render_wraps_bands() {
        let fields = (0..16)
            .map(|bit| BitField::bit(&format!("F{}", bit), bit))
            .collect();
        let diagram = BitFieldDiagram::new(16, fields);
        let lines = diagram.render(40).unwrap();

        assert!(lines.len() > 4, "expected more than one band");
        assert!(lines.iter().all(|l| l.len() <= 40));
        assert!(lines.iter().any(|l| l.contains("F15")));
        assert!(lines.iter().any(|l| l.contains("F0 ")));
    }
}
