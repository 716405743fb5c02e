//! Metadata record types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Template name used when a record names neither a template nor a subtype.
pub const GENERIC_TEMPLATE: &str = "generic";

/// Functional category of an IC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Combinational,
    Sequential,
    Counter,
    Special,
    /// Any category string this tool does not know about.
    #[serde(other)]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Combinational => "combinational",
            Self::Sequential => "sequential",
            Self::Counter => "counter",
            Self::Special => "special",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pin lists of a part, each in datasheet order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ports {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bidirectional: Vec<String>,
    /// Supply pins. `None` means "use the configured default".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<Vec<String>>,
}

impl Ports {
    /// Supply pins, or `defaults` when the record leaves them out.
    pub fn power_or<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        self.power.as_deref().unwrap_or(defaults)
    }

    /// Signal pins (everything except supplies) in declaration order.
    pub fn signals(&self) -> impl Iterator<Item = &str> {
        self.inputs
            .iter()
            .chain(&self.outputs)
            .chain(&self.bidirectional)
            .map(String::as_str)
    }
}

/// Per-part overrides for testbench generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestCoverage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_test_vectors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation_duration_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_target: Option<f64>,
}

/// One IC metadata record, keyed by part number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub part_number: String,
    pub ic_name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub ports: Ports,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_coverage: Option<TestCoverage>,
}

impl IcRecord {
    /// Template base name: `template`, else `subtype`, else `generic`.
    pub fn template_name(&self) -> &str {
        self.template
            .as_deref()
            .or(self.subtype.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(GENERIC_TEMPLATE)
    }

    /// HDL module / entity name.
    pub fn module_name(&self) -> String {
        format!("IC_{}", self.part_number)
    }

    /// Testbench module / entity name.
    pub fn testbench_name(&self) -> String {
        format!("tb_{}", self.part_number)
    }
}

/// Accept `"7400"` as well as a bare `7400` for part numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> IcRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_template_name_fallbacks() {
        let r = record(
            r#"{"part_number":"7400","ic_name":"NAND","category":"combinational",
                "subtype":"nand_quad","template":"nand_custom"}"#,
        );
        assert_eq!(r.template_name(), "nand_custom");

        let r = record(
            r#"{"part_number":"7400","ic_name":"NAND","category":"combinational",
                "subtype":"nand_quad"}"#,
        );
        assert_eq!(r.template_name(), "nand_quad");

        let r = record(r#"{"part_number":"7400","ic_name":"NAND","category":"combinational"}"#);
        assert_eq!(r.template_name(), GENERIC_TEMPLATE);
    }

    #[test]
    fn test_unknown_category_is_other() {
        let r = record(r#"{"part_number":"X1","ic_name":"Mystery","category":"analog"}"#);
        assert_eq!(r.category, Category::Other);
        assert_eq!(r.category.to_string(), "other");
    }

    #[test]
    fn test_numeric_part_number() {
        let r = record(r#"{"part_number":7404,"ic_name":"Hex Inverter","category":"combinational"}"#);
        assert_eq!(r.part_number, "7404");
        assert_eq!(r.module_name(), "IC_7404");
        assert_eq!(r.testbench_name(), "tb_7404");
    }

    #[test]
    fn test_ports_defaults() {
        let r = record(
            r#"{"part_number":"7404","ic_name":"Hex Inverter","category":"combinational",
                "ports":{"inputs":["A1"],"outputs":["Y1"]}}"#,
        );
        assert!(r.ports.bidirectional.is_empty());
        assert!(r.ports.power.is_none());

        let defaults = vec!["VCC".to_string(), "GND".to_string()];
        assert_eq!(r.ports.power_or(&defaults), defaults.as_slice());
        assert_eq!(r.ports.signals().collect::<Vec<_>>(), vec!["A1", "Y1"]);
    }

    #[test]
    fn test_serialize_skips_empty() {
        let r = record(
            r#"{"part_number":"7404","ic_name":"Hex Inverter","category":"combinational",
                "ports":{"inputs":["A1"],"outputs":["Y1"]}}"#,
        );
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("bidirectional"));
        assert!(!json.contains("power"));
        assert!(!json.contains("test_coverage"));
    }
}
