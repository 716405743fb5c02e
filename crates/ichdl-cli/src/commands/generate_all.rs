//! `generate-all`: every part's module, optionally with testbenches.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use ichdl_templates::Language;
use tracing::info;

use crate::cli::CommandContext;
use crate::commands::finish_batch;
use crate::error::CliError;

/// Generate HDL modules for every part
#[derive(Debug, Parser)]
pub struct GenerateAllCommand {
    /// Target language (defaults to generation.default_language)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Directory for modules
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Also generate each part's testbench
    #[arg(short, long)]
    pub testbenches: bool,

    /// Directory for testbenches (defaults to output.testbench_dir)
    #[arg(long, value_hint = ValueHint::DirPath, requires = "testbenches")]
    pub testbench_dir: Option<PathBuf>,

    /// Emit stub modules for parts without a matching template
    #[arg(long)]
    pub fallback: bool,
}

impl GenerateAllCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let language = ctx.language(self.language)?;
        let generator = ctx.generator(self.fallback)?;

        let dir = ctx.module_dir(language, self.output_dir.as_deref());
        let testbench_dir = self
            .testbenches
            .then(|| ctx.testbench_dir(self.testbench_dir.as_deref()));

        info!(%language, dir = %dir.display(), testbenches = self.testbenches, "generating all parts");
        let report = generator.generate_all(language, &dir, testbench_dir.as_deref());

        finish_batch(&ctx.output(), &report, "files")
    }
}
