//! In-memory metadata store keyed by part number.

use crate::error::{MetadataError, Result};
use crate::suggest;
use crate::types::IcRecord;
use crate::validation;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const BUILTIN_CATALOG: &str = include_str!("../data/ic_metadata.json");
const MAX_METADATA_SIZE: usize = 16 * 1024 * 1024;
const MAX_SUGGESTIONS: usize = 3;

/// Where the records came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// Catalog compiled into the binary.
    Builtin,
    /// JSON file on disk.
    File(PathBuf),
    /// Records supplied directly.
    Inline,
}

impl std::fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in catalog"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline => f.write_str("inline"),
        }
    }
}

/// Read-only table of IC records.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    records: Vec<IcRecord>,
    index: HashMap<String, usize>,
    source: MetadataSource,
}

impl MetadataStore {
    /// Load the built-in catalog.
    pub fn builtin() -> Result<Self> {
        let records = parse_records("built-in catalog", BUILTIN_CATALOG)?;
        Self::from_records(records, MetadataSource::Builtin)
    }

    /// Load and validate a JSON metadata file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = ichdl_common_fs::read_to_string(path, MAX_METADATA_SIZE)?;
        let records = parse_records(&path.display().to_string(), &contents)?;
        let store = Self::from_records(records, MetadataSource::File(path.to_path_buf()))?;
        info!(path = %path.display(), records = store.len(), "loaded metadata");
        Ok(store)
    }

    /// Parse and validate a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_records(parse_records("inline JSON", json)?, MetadataSource::Inline)
    }

    /// Build a store from records, validating them.
    pub fn from_records(records: Vec<IcRecord>, source: MetadataSource) -> Result<Self> {
        validation::validate_all(&records)?;

        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.part_number.clone(), i))
            .collect();

        debug!(source = %source, records = records.len(), "metadata store ready");
        Ok(Self {
            records,
            index,
            source,
        })
    }

    /// Look up a part.
    pub fn find(&self, part: &str) -> Option<&IcRecord> {
        self.index.get(part).map(|&i| &self.records[i])
    }

    /// Look up a part, failing with close matches when absent.
    pub fn require(&self, part: &str) -> Result<&IcRecord> {
        self.find(part).ok_or_else(|| MetadataError::PartNotFound {
            part: part.to_string(),
            suggestions: suggest::similar(part, self.part_numbers(), MAX_SUGGESTIONS),
        })
    }

    /// Records in file order.
    pub fn records(&self) -> &[IcRecord] {
        &self.records
    }

    /// Records ordered by part number, numbers compared numerically.
    pub fn sorted(&self) -> Vec<&IcRecord> {
        let mut sorted: Vec<&IcRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| compare_part_numbers(&a.part_number, &b.part_number));
        sorted
    }

    /// Part numbers in file order.
    pub fn part_numbers(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.part_number.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &MetadataSource {
        &self.source
    }
}

fn parse_records(source_name: &str, json: &str) -> Result<Vec<IcRecord>> {
    serde_json::from_str(json).map_err(|e| MetadataError::parse(source_name, &e))
}

/// Order part numbers by their leading digits as a number, then by the
/// remaining text. Part numbers without leading digits sort last.
pub fn compare_part_numbers(a: &str, b: &str) -> Ordering {
    fn split(s: &str) -> (Option<u64>, &str) {
        let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        (s[..digits].parse().ok(), &s[digits..])
    }

    let (na, ra) = split(a);
    let (nb, rb) = split(b);
    match (na, nb) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| ra.cmp(rb)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use std::fs;
    use tempfile::tempdir;

    const SMALL: &str = r#"[
        {"part_number": "7404", "ic_name": "Hex Inverter", "category": "combinational",
         "subtype": "inverter_hex", "ports": {"inputs": ["A1"], "outputs": ["Y1"]}},
        {"part_number": "555", "ic_name": "Timer", "category": "special",
         "ports": {"inputs": ["TRIG_N"], "outputs": ["OUT"]}}
    ]"#;

    #[test]
    fn test_builtin_catalog() {
        let store = MetadataStore::builtin().unwrap();
        assert_eq!(store.len(), 20);
        assert_eq!(store.source(), &MetadataSource::Builtin);

        let nand = store.find("7400").unwrap();
        assert_eq!(nand.template_name(), "nand_quad");
        assert_eq!(nand.category, Category::Combinational);

        let cmos = store.find("4017").unwrap();
        assert_eq!(
            cmos.ports.power.as_deref(),
            Some(&["VDD".to_string(), "VSS".to_string()][..])
        );

        let transceiver = store.find("74245").unwrap();
        assert_eq!(transceiver.ports.bidirectional.len(), 16);
    }

    #[test]
    fn test_builtin_templates_are_distinct() {
        let store = MetadataStore::builtin().unwrap();
        let mut names: Vec<_> = store.records().iter().map(|r| r.template_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn test_from_json_preserves_order() {
        let store = MetadataStore::from_json(SMALL).unwrap();
        assert_eq!(store.part_numbers().collect::<Vec<_>>(), vec!["7404", "555"]);
        assert_eq!(store.source(), &MetadataSource::Inline);
    }

    #[test]
    fn test_sorted_is_numeric() {
        let store = MetadataStore::builtin().unwrap();
        let parts: Vec<_> = store.sorted().iter().map(|r| r.part_number.as_str()).collect();
        assert_eq!(parts.first(), Some(&"555"));
        assert_eq!(parts[1], "4017");
        assert_eq!(parts.last(), Some(&"74245"));

        let pos = |p: &str| parts.iter().position(|x| *x == p).unwrap();
        assert!(pos("7493") < pos("74121"));
    }

    #[test]
    fn test_compare_part_numbers() {
        assert_eq!(compare_part_numbers("555", "4017"), Ordering::Less);
        assert_eq!(compare_part_numbers("7400", "7400"), Ordering::Equal);
        assert_eq!(compare_part_numbers("74LS00", "7400"), Ordering::Less);
        assert_eq!(compare_part_numbers("NE555", "555"), Ordering::Greater);
        assert_eq!(compare_part_numbers("LM386", "NE555"), Ordering::Less);
    }

    #[test]
    fn test_require_with_suggestions() {
        let store = MetadataStore::builtin().unwrap();
        assert!(store.require("7400").is_ok());

        let err = store.require("7401").unwrap_err();
        assert!(matches!(err, MetadataError::PartNotFound { ref part, .. } if part == "7401"));
        assert!(err.suggestions().contains(&"7400".to_string()));
        assert!(err.suggestions().len() <= MAX_SUGGESTIONS);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Ic_Metadata_Master.json");
        fs::write(&path, SMALL).unwrap();

        let store = MetadataStore::load(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.source(), &MetadataSource::File(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MetadataStore::load("/nonexistent/Ic_Metadata_Master.json").unwrap_err();
        assert!(matches!(err, MetadataError::Fs(_)));
    }

    #[test]
    fn test_parse_error_has_position() {
        let err = MetadataStore::from_json("[{\"part_number\": \"7400\",}]").unwrap_err();
        match err {
            MetadataError::Parse { line, column, .. } => {
                assert_eq!(line, 1);
                assert!(column > 0);
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_record_rejected() {
        let json = r#"[{"part_number": "7400", "ic_name": "NAND", "category": "combinational",
                        "ports": {"inputs": ["A1", "A1"], "outputs": ["Y1"]}}]"#;
        let err = MetadataStore::from_json(json).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidRecord { .. }));
    }

    #[test]
    fn test_empty_store() {
        let store = MetadataStore::from_json("[]").unwrap();
        assert!(store.is_empty());
        assert!(store.require("7400").unwrap_err().suggestions().is_empty());
    }
}
