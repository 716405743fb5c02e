//! Load-time checks on metadata records.

use crate::error::{MetadataError, Result};
use crate::types::IcRecord;
use std::collections::HashSet;

/// True for a name usable as both a Verilog and a VHDL identifier:
/// a letter, then letters, digits or single underscores, not ending in `_`.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }

    !name.contains("__") && !name.ends_with('_')
}

/// True for a part number that can be embedded in `IC_<part>` and file names.
pub fn is_valid_part_number(part: &str) -> bool {
    !part.is_empty()
        && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !part.contains("__")
        && !part.ends_with('_')
}

/// Validate one record.
pub fn validate_record(record: &IcRecord) -> Result<()> {
    let part = record.part_number.as_str();

    if !is_valid_part_number(part) {
        return Err(MetadataError::invalid(
            part,
            "part number must be non-empty and contain only letters, digits and single underscores",
        ));
    }

    if record.ic_name.trim().is_empty() {
        return Err(MetadataError::invalid(part, "ic_name must not be empty"));
    }

    if let Some(template) = &record.template {
        if template.contains(['/', '\\']) || template.starts_with('.') {
            return Err(MetadataError::invalid(
                part,
                format!("template '{template}' must be a bare name, not a path"),
            ));
        }
    }

    let power = record.ports.power.iter().flatten().map(String::as_str);
    let mut seen = HashSet::new();
    for pin in record.ports.signals().chain(power) {
        if !is_valid_identifier(pin) {
            return Err(MetadataError::invalid(
                part,
                format!("pin '{pin}' is not a legal HDL identifier"),
            ));
        }
        // VHDL identifiers are case-insensitive.
        if !seen.insert(pin.to_ascii_uppercase()) {
            return Err(MetadataError::invalid(part, format!("duplicate pin '{pin}'")));
        }
    }

    if let Some(coverage) = &record.test_coverage {
        if let Some(target) = coverage.coverage_target {
            if !(0.0..=100.0).contains(&target) {
                return Err(MetadataError::invalid(
                    part,
                    format!("coverage_target {target} is outside 0..=100"),
                ));
            }
        }
        if coverage.min_test_vectors == Some(0) {
            return Err(MetadataError::invalid(
                part,
                "min_test_vectors must be greater than 0",
            ));
        }
        if coverage.simulation_duration_ns == Some(0) {
            return Err(MetadataError::invalid(
                part,
                "simulation_duration_ns must be greater than 0",
            ));
        }
    }

    Ok(())
}

/// Check the supply pins a record renders with against its signal pins.
///
/// A record without `ports.power` takes `defaults`, which only become known
/// once the configuration is loaded, so this runs at render time rather than
/// inside [`validate_record`].
pub fn validate_power_pins(record: &IcRecord, defaults: &[String]) -> Result<()> {
    if record.ports.power.is_some() {
        return Ok(());
    }

    let signals: HashSet<String> = record
        .ports
        .signals()
        .map(str::to_ascii_uppercase)
        .collect();
    match defaults
        .iter()
        .find(|pin| signals.contains(&pin.to_ascii_uppercase()))
    {
        Some(pin) => Err(MetadataError::invalid(
            &record.part_number,
            format!("pin '{pin}' clashes with a default power pin; list ports.power explicitly"),
        )),
        None => Ok(()),
    }
}

/// Validate every record and check part numbers are unique.
pub fn validate_all(records: &[IcRecord]) -> Result<()> {
    let mut parts = HashSet::new();
    for record in records {
        validate_record(record)?;
        if !parts.insert(record.part_number.as_str()) {
            return Err(MetadataError::DuplicatePart {
                part: record.part_number.clone(),
            });
        }
    }
    Ok(())
}
