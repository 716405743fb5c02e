//! `list-supported`: how each part resolves in every language.

use clap::Parser;
use ichdl_generator::SupportRow;
use ichdl_templates::{Language, MatchKind, Resolution};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{Column, Table, TableStyle};

/// Show which template each part resolves to
#[derive(Debug, Parser)]
pub struct ListSupportedCommand {
    /// Render the table as markdown
    #[arg(long)]
    pub markdown: bool,

    /// Count the fallback stub as support for parts without a module template
    #[arg(long)]
    pub fallback: bool,
}

impl ListSupportedCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let generator = ctx.generator(self.fallback)?;
        let rows = generator.support_matrix();

        let out = ctx.output();
        if out.is_json() {
            return out.print_json(&rows);
        }

        let style = if self.markdown {
            TableStyle::Markdown
        } else {
            TableStyle::Plain
        };
        let mut table = Table::new(vec![
            Column::new("Part"),
            Column::new("Name").max_width(32),
            Column::new("Category"),
            Column::new("Verilog"),
            Column::new("VHDL"),
            Column::new("Verilog TB"),
            Column::new("VHDL TB"),
        ])
        .style(style);

        for row in &rows {
            table.add_row(vec![
                row.part_number.clone(),
                row.ic_name.clone(),
                row.category.to_string(),
                cell(row.verilog.as_ref()),
                cell(row.vhdl.as_ref()),
                cell(row.verilog_testbench.as_ref()),
                cell(row.vhdl_testbench.as_ref()),
            ]);
        }
        out.print_table(&table);

        let exact = |language| exact_count(&rows, language);
        out.message(&format!(
            "\n{} parts; exact templates: {} Verilog, {} VHDL",
            rows.len(),
            exact(Language::Verilog),
            exact(Language::Vhdl)
        ));
        Ok(())
    }
}

fn cell(resolution: Option<&Resolution>) -> String {
    resolution.map_or_else(|| "missing".to_string(), |r| r.kind.to_string())
}

fn exact_count(rows: &[SupportRow], language: Language) -> usize {
    rows.iter()
        .filter(|r| r.module(language).is_some_and(|m| m.kind == MatchKind::Exact))
        .count()
}
