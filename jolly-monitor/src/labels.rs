//! Symbol table
//!
//! Labels name addresses for display and for trace annotation. Several labels
//! may share an address.
//!
//! ## Label file format
//!
//! ```text
//! # name, address
//! main, 0x000100
//! loop, 0x000112
//! ```

use std::collections::BTreeMap;

use crate::error::{MonitorError, Result};
use jolly_spec::{Address, MAX_ADDRESS};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    pub name: String,
    pub address: Address,
}

impl Label {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    /// Sorted by name
    labels: Vec<Label>,
    by_address: BTreeMap<Address, Vec<usize>>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table contents
    pub fn load(&mut self, labels: impl IntoIterator<Item = Label>) {
        let mut labels: Vec<Label> = labels.into_iter().collect();
        labels.sort_by(|a, b| a.name.cmp(&b.name).then(a.address.cmp(&b.address)));

        let mut by_address: BTreeMap<Address, Vec<usize>> = BTreeMap::new();
        for (i, label) in labels.iter().enumerate() {
            by_address.entry(label.address).or_default().push(i);
        }

        tracing::debug!("loaded {} labels", labels.len());
        self.labels = labels;
        self.by_address = by_address;
    }

    /// All labels sorted by name
    pub fn list(&self) -> &[Label] {
        &self.labels
    }

    /// Names of the labels at `address`, sorted
    pub fn labels_at(&self, address: Address) -> Vec<&str> {
        self.by_address
            .get(&address)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| self.labels[i].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn address_of(&self, name: &str) -> Result<Address> {
        self.labels
            .iter()
            .find(|label| label.name == name)
            .map(|label| label.address)
            .ok_or_else(|| MonitorError::UnknownLabel(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Parse `name, 0xADDRESS` rows
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_label_file(source: &str) -> Result<Vec<Label>> {
    let mut labels = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let invalid = |reason: String| MonitorError::InvalidLabelFile {
            line: index + 1,
            reason,
        };

        let (name, address) = line
            .split_once(',')
            .ok_or_else(|| invalid("expected `name, 0xADDRESS`".to_string()))?;
        let name = name.trim();
        let address = address.trim();

        if name.is_empty() {
            return Err(invalid("empty label name".to_string()));
        }

        let digits = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .ok_or_else(|| invalid(format!("address {:?} is not 0x-prefixed", address)))?;
        let value = u32::from_str_radix(digits, 16)
            .map_err(|e| invalid(format!("bad address {:?}: {}", address, e)))?;
        if value > MAX_ADDRESS {
            return Err(invalid(format!("address {:?} exceeds 24 bits", address)));
        }

        labels.push(Label::new(name, value));
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LabelTable {
        let mut table = LabelTable::new();
        table.load(vec![
            Label::new("loop", 0x112),
            Label::new("main", 0x100),
            Label::new("entry", 0x100),
        ]);
        table
    }

    #[test]
    fn test_default_is_empty() {
        assert!(LabelTable::new().is_empty());
        assert!(LabelTable::new().labels_at(0).is_empty());
    }

    #[test]
    fn test_list_sorted_by_name() {
        let table = table();
        let names: Vec<&str> = table.list().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["entry", "loop", "main"]);
    }

    #[test]
    fn test_labels_at_shared_address() {
        let table = table();
        assert_eq!(table.labels_at(0x100), vec!["entry", "main"]);
        assert_eq!(table.labels_at(0x112), vec!["loop"]);
        assert!(table.labels_at(0x200).is_empty());
    }

    #[test]
    fn test_load_replaces() {
        let mut table = table();
        table.load(vec![Label::new("other", 0x5)]);
        assert_eq!(table.len(), 1);
        assert!(table.labels_at(0x100).is_empty());
    }

    #[test]
    fn test_address_of() {
        let table = table();
        assert_eq!(table.address_of("loop").unwrap(), 0x112);
        assert!(matches!(
            table.address_of("nope"),
            Err(MonitorError::UnknownLabel(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_parse_label_file() {
        let source = "# labels\nmain, 0x000100\n\n  loop ,0X112  \n";
        let labels = parse_label_file(source).unwrap();
        assert_eq!(labels, vec![Label::new("main", 0x100), Label::new("loop", 0x112)]);
    }

    #[test]
    fn test_parse_label_file_errors() {
        assert!(matches!(
            parse_label_file("main 0x100"),
            Err(MonitorError::InvalidLabelFile { line: 1, .. })
        ));
        assert!(matches!(
            parse_label_file("ok, 0x1\nmain, 256"),
            Err(MonitorError::InvalidLabelFile { line: 2, .. })
        ));
        assert!(parse_label_file("main, 0xZZ").is_err());
        assert!(parse_label_file("main, 0x1000000").is_err());
        assert!(parse_label_file(", 0x10").is_err());
    }
}
