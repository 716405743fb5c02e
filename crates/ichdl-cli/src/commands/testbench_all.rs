//! `testbench-all`: every part's testbench.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use ichdl_templates::Language;

use crate::cli::CommandContext;
use crate::commands::finish_batch;
use crate::error::CliError;

/// Generate testbenches for every part
#[derive(Debug, Parser)]
pub struct TestbenchAllCommand {
    /// Target language (defaults to generation.default_language)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Directory to write into (defaults to output.testbench_dir)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,
}

impl TestbenchAllCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let language = ctx.language(self.language)?;
        let generator = ctx.generator(false)?;

        let dir = ctx.testbench_dir(self.output_dir.as_deref());
        let report = generator.testbench_all(language, &dir);

        finish_batch(&ctx.output(), &report, "testbenches")
    }
}
