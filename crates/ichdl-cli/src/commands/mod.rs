//! Command implementations.

mod doctor;
mod generate;
mod generate_all;
mod list;
mod list_supported;
mod templates;
mod testbench;
mod testbench_all;

pub use doctor::DoctorCommand;
pub use generate::GenerateCommand;
pub use generate_all::GenerateAllCommand;
pub use list::ListCommand;
pub use list_supported::ListSupportedCommand;
pub use templates::TemplatesCommand;
pub use testbench::TestbenchCommand;
pub use testbench_all::TestbenchAllCommand;

use ichdl_generator::{BatchReport, GeneratedFile, Rendered};
use ichdl_templates::MatchKind;

use crate::error::CliError;
use crate::help::did_you_mean;
use crate::output::Output;

/// `--stdout`: the rendered text, or the whole render as JSON.
fn print_rendered(out: &Output, rendered: &Rendered) -> Result<(), CliError> {
    if out.is_json() {
        return out.print_json(rendered);
    }
    out.raw(&rendered.content);
    Ok(())
}

fn print_generated(out: &Output, file: &GeneratedFile) -> Result<(), CliError> {
    if out.is_json() {
        return out.print_json(file);
    }

    out.success(&format!(
        "Generated {} {} {}",
        file.path.display(),
        out.icons().arrow(),
        describe_template(file)
    ));
    if file.template.kind == MatchKind::Fallback {
        out.warning(&format!(
            "{}: no {} template matched, wrote a stub",
            file.part_number, file.language
        ));
    }
    Ok(())
}

fn describe_template(file: &GeneratedFile) -> String {
    match file.template.kind {
        MatchKind::Exact => file.template.path.clone(),
        kind => format!("{} ({kind})", file.template.path),
    }
}

/// Print a batch report and turn failures into an error.
fn finish_batch(out: &Output, report: &BatchReport, what: &str) -> Result<(), CliError> {
    if out.is_json() {
        out.print_json(report)?;
    } else {
        for file in &report.generated {
            out.success(&format!(
                "{} {} {}",
                file.path.display(),
                out.icons().arrow(),
                describe_template(file)
            ));
        }
        for failure in &report.failures {
            out.failure(&format!("{} ({}): {}", failure.part_number, failure.kind, failure.error));
            if let Some(hint) = did_you_mean(&failure.suggestions) {
                out.warning(&format!("  {hint}"));
            }
        }
        out.message(&format!(
            "{} {what} generated, {} failed",
            report.succeeded(),
            report.failed()
        ));
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::batch(report.failed(), report.succeeded() + report.failed()))
    }
}
