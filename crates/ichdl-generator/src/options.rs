//! Generation options.

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use ichdl_common_config::{IchdlConfig, DEFAULT_TIMESTAMP_FORMAT};
use ichdl_templates::ContextDefaults;

/// Knobs that change what gets rendered, independent of where it is written.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Fixed timestamp. `None` stamps the current local time.
    pub timestamp: Option<String>,
    /// chrono format used when `timestamp` is `None`.
    pub timestamp_format: String,
    /// Emit a stub module instead of failing when no template resolves.
    pub fallback: bool,
    pub defaults: ContextDefaults,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            timestamp: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            fallback: false,
            defaults: ContextDefaults::default(),
        }
    }
}

impl GenerateOptions {
    pub fn from_config(config: &IchdlConfig) -> Self {
        let d = &config.defaults;
        Self {
            timestamp: config.generation.timestamp.clone(),
            timestamp_format: config.generation.timestamp_format.clone(),
            fallback: config.generation.fallback,
            defaults: ContextDefaults {
                power_pins: d.power_pins.clone(),
                min_test_vectors: d.min_test_vectors,
                simulation_duration_ns: d.simulation_duration_ns,
                coverage_target: d.coverage_target,
            },
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// The timestamp to stamp into output right now.
    pub fn timestamp_now(&self) -> String {
        if let Some(fixed) = &self.timestamp {
            return fixed.clone();
        }

        // An unparseable format would make chrono's Display fail; use the default.
        let valid = !StrftimeItems::new(&self.timestamp_format).any(|i| matches!(i, Item::Error));
        let format = if valid {
            self.timestamp_format.as_str()
        } else {
            DEFAULT_TIMESTAMP_FORMAT
        };
        Local::now().format(format).to_string()
    }
}
