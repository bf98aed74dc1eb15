//! Class id → display name lookup.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{anyhow, Context, Result};
use regex::Regex;

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[:\s]+").expect("static regex"))
}

/// Label table loaded once at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: BTreeMap<u32, String>,
}

impl LabelTable {
    /// Read and parse a label file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read labels file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid labels file {}", path.display()))
    }

    /// Parse label text, one label per line.
    ///
    /// A line may start with an index followed by `:` or whitespace
    /// (`"2: cat"`, `"2 cat"`). Lines without one take their 0-based line
    /// number as id and keep only the text before the first `:` or
    /// whitespace run, so `"traffic light"` becomes `"traffic"`. When an id
    /// repeats, the last line wins.
    pub fn parse(text: &str) -> Result<Self> {
        let mut labels = BTreeMap::new();
        for (row, line) in text.lines().enumerate() {
            let line = line.trim();
            let mut parts = separator().splitn(line, 2);
            let head = parts.next().unwrap_or_default();
            match parts.next() {
                Some(rest) if !head.is_empty() && head.bytes().all(|b| b.is_ascii_digit()) => {
                    let id: u32 = head
                        .parse()
                        .map_err(|_| anyhow!("label index {} on line {} is too large", head, row + 1))?;
                    labels.insert(id, rest.trim().to_string());
                }
                _ => {
                    let id = u32::try_from(row)
                        .map_err(|_| anyhow!("too many lines in labels file"))?;
                    labels.insert(id, head.to_string());
                }
            }
        }
        Ok(Self { labels })
    }

    pub fn get(&self, class_id: u32) -> Option<&str> {
        self.labels.get(&class_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.labels.iter().map(|(id, label)| (*id, label.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_lines_use_their_index() -> Result<()> {
        let table = LabelTable::parse("0 person\n2: cat\n7:  traffic light \n")?;
        assert_eq!(table.get(0), Some("person"));
        assert_eq!(table.get(2), Some("cat"));
        assert_eq!(table.get(7), Some("traffic light"));
        assert_eq!(table.get(1), None);
        assert_eq!(table.len(), 3);
        Ok(())
    }

    #[test]
    fn plain_lines_use_row_number() -> Result<()> {
        let table = LabelTable::parse("a\nb\nc\nd\ne\ndog\n")?;
        assert_eq!(table.get(5), Some("dog"));
        assert_eq!(table.get(0), Some("a"));
        Ok(())
    }

    #[test]
    fn plain_lines_keep_first_word() -> Result<()> {
        let table = LabelTable::parse("person\ntraffic light\nstop:sign\n")?;
        assert_eq!(table.get(1), Some("traffic"));
        assert_eq!(table.get(2), Some("stop"));
        Ok(())
    }

    #[test]
    fn blank_and_placeholder_lines_hold_their_slot() -> Result<()> {
        let table = LabelTable::parse("???\n\nbicycle\n")?;
        assert_eq!(table.get(0), Some("???"));
        assert_eq!(table.get(1), Some(""));
        assert_eq!(table.get(2), Some("bicycle"));
        Ok(())
    }

    #[test]
    fn parsing_is_idempotent() -> Result<()> {
        let text = "0 background\n1: person\nbicycle\n\n4 motorcycle\n";
        assert_eq!(LabelTable::parse(text)?, LabelTable::parse(text)?);
        Ok(())
    }

    #[test]
    fn oversized_index_is_rejected() {
        assert!(LabelTable::parse("99999999999: cat\n").is_err());
    }
}
