//! `doctor`: template-name consistency between metadata and template files.

use clap::Parser;
use ichdl_generator::{Generator, TemplateCheck};
use ichdl_templates::{HdlRenderer, Language, TemplateKind};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::help::did_you_mean;

/// Check metadata and templates for inconsistencies
#[derive(Debug, Parser)]
pub struct DoctorCommand {
    /// Fail on warnings too
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    metadata: String,
    parts: usize,
    templates: String,
    template_files: usize,
    checks: Vec<TemplateCheck>,
    issues: Vec<String>,
    warnings: Vec<String>,
}

impl DoctorCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let generator = ctx.generator(false)?;
        let report = diagnose(&generator);

        let out = ctx.output();
        if out.is_json() {
            out.print_json(&report)?;
        } else {
            let icons = out.icons();
            out.message(&format!("Metadata:  {} ({} parts)", report.metadata, report.parts));
            out.message(&format!(
                "Templates: {} ({} files)\n",
                report.templates, report.template_files
            ));
            for issue in &report.issues {
                out.message(&format!("{} {issue}", icons.cross()));
            }
            for warning in &report.warnings {
                out.message(&format!("{} {warning}", icons.warning()));
            }
            if report.issues.is_empty() && report.warnings.is_empty() {
                out.success("Every part resolves to its own template");
            } else {
                out.message(&format!(
                    "\n{} issue(s), {} warning(s)",
                    report.issues.len(),
                    report.warnings.len()
                ));
            }
        }

        let failing = report.issues.len() + if self.strict { report.warnings.len() } else { 0 };
        if failing > 0 {
            return Err(CliError::validation_with_hint(
                format!("doctor found {failing} problem(s)"),
                "fix the template names in the metadata or add the missing templates",
            ));
        }
        Ok(())
    }
}

fn diagnose(generator: &Generator) -> DoctorReport {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    let checks = generator.check();
    for check in checks.iter().filter(|c| !c.exact) {
        let hint = did_you_mean(&check.similar)
            .map(|h| format!("; {h}"))
            .unwrap_or_default();
        match &check.resolved {
            None => issues.push(format!(
                "{} ({}): no module template for '{}'{hint}",
                check.part_number, check.language, check.template
            )),
            Some(resolution) => warnings.push(format!(
                "{} ({}): template '{}' not found, using {} ({}){hint}",
                check.part_number, check.language, check.template, resolution.path, resolution.kind
            )),
        }
    }

    for row in generator.support_matrix() {
        for language in Language::ALL {
            if row.testbench(language).is_none() {
                issues.push(format!(
                    "{} ({language}): no testbench template",
                    row.part_number
                ));
            }
        }
    }

    for kind in [TemplateKind::Module, TemplateKind::Testbench] {
        for language in Language::ALL {
            for (name, paths) in generator.index().duplicates(kind, language) {
                warnings.push(format!(
                    "{language} {kind} template '{name}' is defined {} times, using {}",
                    paths.len(),
                    paths[0]
                ));
            }
        }
    }

    let renderer = HdlRenderer::new();
    for file in generator.templates().files() {
        if let Err(e) = renderer.check_syntax(&file.path, &file.contents) {
            issues.push(e.to_string());
        }
    }

    DoctorReport {
        metadata: generator.store().source().to_string(),
        parts: generator.store().len(),
        templates: generator.templates().origin().to_string(),
        template_files: generator.templates().len(),
        checks,
        issues,
        warnings,
    }
}
