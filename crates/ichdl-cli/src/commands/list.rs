//! `list`: catalog parts sorted by part number.

use clap::Parser;
use glob::Pattern;
use ichdl_metadata::IcRecord;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{Column, Table};

/// List parts in the metadata catalog
#[derive(Debug, Parser)]
pub struct ListCommand {
    /// Only parts whose number matches a glob, e.g. '74*' or '40??'
    #[arg(long, value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Only parts in this category (combinational, sequential, counter, special)
    #[arg(long)]
    pub category: Option<String>,
}

impl ListCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let store = ctx.load_store()?;
        let pattern = self
            .filter
            .as_deref()
            .map(Pattern::new)
            .transpose()
            .map_err(|e| {
                CliError::validation_with_hint(
                    format!("invalid --filter pattern: {e}"),
                    "use * and ? wildcards, e.g. '74*'",
                )
            })?;

        let records: Vec<&IcRecord> = store
            .sorted()
            .into_iter()
            .filter(|r| pattern.as_ref().map_or(true, |p| p.matches(&r.part_number)))
            .filter(|r| {
                self.category
                    .as_deref()
                    .map_or(true, |c| r.category.as_str().eq_ignore_ascii_case(c))
            })
            .collect();

        let out = ctx.output();
        if out.is_json() {
            return out.print_json(&records);
        }

        if records.is_empty() {
            out.message("No parts match.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Part"),
            Column::new("Name").max_width(40),
            Column::new("Category"),
            Column::new("Template"),
        ]);
        for record in &records {
            table.add_row(vec![
                record.part_number.clone(),
                record.ic_name.clone(),
                record.category.to_string(),
                record.template_name().to_string(),
            ]);
        }
        out.print_table(&table);
        out.message(&format!("\n{} parts ({})", records.len(), store.source()));
        Ok(())
    }
}
