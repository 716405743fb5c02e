//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default render timestamp format.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IchdlConfig {
    /// Input locations.
    pub paths: PathsConfig,
    /// Output directories.
    pub output: OutputConfig,
    /// Generation behaviour.
    pub generation: GenerationConfig,
    /// Values used when a metadata record leaves a field out.
    pub defaults: DefaultsConfig,
}

/// Input locations. `None` selects the built-in catalog / template set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,
}

/// Output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub verilog_dir: PathBuf,
    pub vhdl_dir: PathBuf,
    pub testbench_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verilog_dir: PathBuf::from("generated_verilog"),
            vhdl_dir: PathBuf::from("generated_vhdl"),
            testbench_dir: PathBuf::from("generated_testbenches"),
        }
    }
}

/// Generation behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// `verilog` or `vhdl`.
    pub default_language: String,
    /// Emit a stub module when no template resolves.
    pub fallback: bool,
    /// Fixed timestamp stamped into output instead of the current time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// chrono format string for the render timestamp.
    pub timestamp_format: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_language: "verilog".to_string(),
            fallback: false,
            timestamp: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// Record defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub power_pins: Vec<String>,
    pub min_test_vectors: u32,
    pub simulation_duration_ns: u64,
    pub coverage_target: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            power_pins: vec!["VCC".to_string(), "GND".to_string()],
            min_test_vectors: 10,
            simulation_duration_ns: 1000,
            coverage_target: 95.0,
        }
    }
}
