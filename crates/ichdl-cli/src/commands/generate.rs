//! `generate`: one part's HDL module.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use ichdl_templates::Language;

use crate::cli::CommandContext;
use crate::commands::{print_generated, print_rendered};
use crate::error::CliError;

/// Generate the HDL module for one part
#[derive(Debug, Parser)]
pub struct GenerateCommand {
    /// Part number, e.g. 7400 or 4017
    pub part: String,

    /// Target language (defaults to generation.default_language)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Directory to write into
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Print the module instead of writing a file
    #[arg(long, conflicts_with = "output_dir")]
    pub stdout: bool,

    /// Emit a stub module when no template matches
    #[arg(long)]
    pub fallback: bool,
}

impl GenerateCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let language = ctx.language(self.language)?;
        let generator = ctx.generator(self.fallback)?;
        let out = ctx.output();

        if self.stdout {
            let rendered = generator.render_hdl(&self.part, language)?;
            return print_rendered(&out, &rendered);
        }

        let dir = ctx.module_dir(language, self.output_dir.as_deref());
        let file = generator.generate_hdl(&self.part, language, &dir)?;
        print_generated(&out, &file)
    }
}
