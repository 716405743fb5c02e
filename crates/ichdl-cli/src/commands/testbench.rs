//! `testbench`: one part's testbench.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use ichdl_templates::Language;

use crate::cli::CommandContext;
use crate::commands::{print_generated, print_rendered};
use crate::error::CliError;

/// Generate the testbench for one part
#[derive(Debug, Parser)]
pub struct TestbenchCommand {
    /// Part number, e.g. 7400 or 4017
    pub part: String,

    /// Target language (defaults to generation.default_language)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Directory to write into (defaults to output.testbench_dir)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Print the testbench instead of writing a file
    #[arg(long, conflicts_with = "output_dir")]
    pub stdout: bool,
}

impl TestbenchCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let language = ctx.language(self.language)?;
        let generator = ctx.generator(false)?;
        let out = ctx.output();

        if self.stdout {
            let rendered = generator.render_testbench(&self.part, language)?;
            return print_rendered(&out, &rendered);
        }

        let dir = ctx.testbench_dir(self.output_dir.as_deref());
        let file = generator.generate_testbench(&self.part, language, &dir)?;
        print_generated(&out, &file)
    }
}
