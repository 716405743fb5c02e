//! Data handed to every template.

use crate::language::Language;
use ichdl_metadata::{Category, IcRecord};
use serde::Serialize;

/// Largest input count for which every input combination is simulated.
pub const EXHAUSTIVE_MAX_INPUTS: usize = 10;

/// Values used when a record leaves power pins or test coverage out.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextDefaults {
    pub power_pins: Vec<String>,
    pub min_test_vectors: u32,
    pub simulation_duration_ns: u64,
    pub coverage_target: f64,
}

impl Default for ContextDefaults {
    fn default() -> Self {
        Self {
            power_pins: vec!["VCC".to_string(), "GND".to_string()],
            min_test_vectors: 10,
            simulation_duration_ns: 1000,
            coverage_target: 95.0,
        }
    }
}

/// Tool identification stamped into generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorInfo {
    pub name: String,
    pub version: String,
}

impl GeneratorInfo {
    pub fn current() -> Self {
        Self {
            name: "ic-hdl-gen".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Which port list a pin came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinGroup {
    Input,
    Output,
    Bidirectional,
    Power,
}

impl PinGroup {
    fn verilog_direction(self) -> &'static str {
        match self {
            Self::Input | Self::Power => "input",
            Self::Output => "output",
            Self::Bidirectional => "inout",
        }
    }

    fn vhdl_mode(self) -> &'static str {
        match self {
            Self::Input | Self::Power => "in",
            Self::Output => "out",
            Self::Bidirectional => "inout",
        }
    }
}

/// One port of the generated module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pin {
    pub name: String,
    pub group: PinGroup,
    /// `input`, `output` or `inout`.
    pub direction: &'static str,
    /// `in`, `out` or `inout`.
    pub vhdl_mode: &'static str,
    /// Positive supply (`VCC`/`VDD`), driven high in testbenches.
    pub is_supply: bool,
    pub is_clock: bool,
}

/// Port lists with power pins resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortsContext {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub bidirectional: Vec<String>,
    pub power: Vec<String>,
}

/// An input and its bit position in the stimulus vector. The first input
/// is the most significant bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StimulusBit {
    pub name: String,
    pub bit: usize,
    pub is_clock: bool,
}

/// Testbench stimulus plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stimulus {
    pub input_count: usize,
    pub input_msb: usize,
    /// `2^input_count` when exhaustive, `min_test_vectors` otherwise.
    pub vector_count: u64,
    pub exhaustive: bool,
    pub min_test_vectors: u32,
    pub duration_ns: u64,
    /// Delay between vectors, at least 1 ns.
    pub step_ns: u64,
    pub coverage_target: f64,
    pub inputs: Vec<StimulusBit>,
}

impl Stimulus {
    fn plan(inputs: &[String], min_test_vectors: u32, duration_ns: u64, coverage_target: f64) -> Self {
        let input_count = inputs.len();
        let exhaustive = input_count <= EXHAUSTIVE_MAX_INPUTS;
        let vector_count = if exhaustive {
            1u64 << input_count
        } else {
            u64::from(min_test_vectors)
        };
        let input_msb = input_count.saturating_sub(1);

        Self {
            input_count,
            input_msb,
            vector_count,
            exhaustive,
            min_test_vectors,
            duration_ns,
            step_ns: (duration_ns / vector_count.max(1)).max(1),
            coverage_target,
            inputs: inputs
                .iter()
                .enumerate()
                .map(|(i, name)| StimulusBit {
                    name: name.clone(),
                    bit: input_msb - i,
                    is_clock: is_clock_pin(name),
                })
                .collect(),
        }
    }
}

/// Everything a template can reference.
///
/// Optional record fields serialize as `null` so strict-mode templates can
/// test them with `{{#if}}` without tripping on missing keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderContext {
    pub part_number: String,
    pub ic_name: String,
    pub category: Category,
    pub subtype: Option<String>,
    pub template: String,
    pub family: Option<String>,
    pub package: Option<String>,
    pub description: Option<String>,
    pub module_name: String,
    pub testbench_name: String,
    pub language: Language,
    pub ports: PortsContext,
    /// Inputs, outputs, bidirectional then power.
    pub pins: Vec<Pin>,
    pub stimulus: Stimulus,
    pub timestamp: String,
    pub generator: GeneratorInfo,
}

impl RenderContext {
    pub fn build(
        record: &IcRecord,
        language: Language,
        defaults: &ContextDefaults,
        timestamp: impl Into<String>,
    ) -> Self {
        let ports = PortsContext {
            inputs: record.ports.inputs.clone(),
            outputs: record.ports.outputs.clone(),
            bidirectional: record.ports.bidirectional.clone(),
            power: record.ports.power_or(&defaults.power_pins).to_vec(),
        };

        let groups = [
            (PinGroup::Input, &ports.inputs),
            (PinGroup::Output, &ports.outputs),
            (PinGroup::Bidirectional, &ports.bidirectional),
            (PinGroup::Power, &ports.power),
        ];
        let pins = groups
            .iter()
            .flat_map(|(group, names)| {
                names.iter().map(move |name| Pin {
                    name: name.clone(),
                    group: *group,
                    direction: group.verilog_direction(),
                    vhdl_mode: group.vhdl_mode(),
                    is_supply: *group == PinGroup::Power && is_supply_pin(name),
                    is_clock: *group == PinGroup::Input && is_clock_pin(name),
                })
            })
            .collect();

        let coverage = record.test_coverage.clone().unwrap_or_default();
        let stimulus = Stimulus::plan(
            &ports.inputs,
            coverage.min_test_vectors.unwrap_or(defaults.min_test_vectors),
            coverage
                .simulation_duration_ns
                .unwrap_or(defaults.simulation_duration_ns),
            coverage.coverage_target.unwrap_or(defaults.coverage_target),
        );

        Self {
            part_number: record.part_number.clone(),
            ic_name: record.ic_name.clone(),
            category: record.category,
            subtype: record.subtype.clone(),
            template: record.template_name().to_string(),
            family: record.family.clone(),
            package: record.package.clone(),
            description: record.description.clone(),
            module_name: record.module_name(),
            testbench_name: record.testbench_name(),
            language,
            ports,
            pins,
            stimulus,
            timestamp: timestamp.into(),
            generator: GeneratorInfo::current(),
        }
    }
}

/// True for positive supply names (`VCC`, `VDD`, `VCC1`, ...).
pub fn is_supply_pin(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    upper.contains("VCC") || upper.contains("VDD")
}

/// True for clock inputs: `CLK`, `CLK1`, `CKA_N`, `CP2`, ... but not
/// `CLK_INH` or other names that merely start with `CLK`.
pub fn is_clock_pin(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    let base = upper.strip_suffix("_N").unwrap_or(&upper);
    let base = base.trim_end_matches(|c: char| c.is_ascii_digit());

    match base {
        "CLK" | "CK" | "CP" => true,
        _ => base.len() == 3 && base.starts_with("CK") && base.ends_with(|c: char| c.is_ascii_alphabetic()),
    }
}
