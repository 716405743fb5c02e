//! `templates`: discovered template files and the parts rendering through them.

use clap::Parser;
use ichdl_generator::TemplateUsage;
use ichdl_templates::Language;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{Alignment, Column, Table};

/// List template files and the parts using them
#[derive(Debug, Parser)]
pub struct TemplatesCommand {
    /// Only templates for this language
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Only templates no part resolves to
    #[arg(long)]
    pub unused: bool,
}

impl TemplatesCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let generator = ctx.generator(false)?;
        let usage: Vec<TemplateUsage> = generator
            .template_usage()
            .into_iter()
            .filter(|u| self.language.map_or(true, |l| u.language == l))
            .filter(|u| !self.unused || u.parts.is_empty())
            .collect();

        let out = ctx.output();
        if out.is_json() {
            return out.print_json(&usage);
        }

        let mut table = Table::new(vec![
            Column::new("Template"),
            Column::new("Kind"),
            Column::new("Parts").align(Alignment::Right),
            Column::new("Used by").max_width(40),
        ]);
        for entry in &usage {
            table.add_row(vec![
                entry.path.clone(),
                entry.kind.to_string(),
                entry.parts.len().to_string(),
                entry.parts.join(", "),
            ]);
        }
        out.print_table(&table);
        out.message(&format!(
            "\n{} templates from {}",
            usage.len(),
            generator.templates().origin()
        ));
        Ok(())
    }
}
