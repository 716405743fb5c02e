//! Output printer with format awareness.

use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;
use crate::output::{terminal_width, Color, ColorMode, IconContext, Styled, Table};

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
    pub width: usize,
    pub quiet: bool,
}

impl OutputConfig {
    pub fn from_context(ctx: &CommandContext) -> Self {
        Self {
            format: ctx.format,
            color: ctx.color.stdout(),
            width: terminal_width(),
            quiet: ctx.quiet,
        }
    }
}

/// Main output handler
///
/// Results go to stdout; warnings and per-part failures go to stderr.
pub struct Output {
    config: OutputConfig,
    icons: IconContext,
}

impl Output {
    pub fn new(ctx: &CommandContext) -> Self {
        Self::with_config(OutputConfig::from_context(ctx))
    }

    pub fn with_config(config: OutputConfig) -> Self {
        Self {
            config,
            icons: IconContext::new(),
        }
    }

    pub fn icons(&self) -> &IconContext {
        &self.icons
    }

    pub fn is_json(&self) -> bool {
        self.config.format == OutputFormat::Json
    }

    fn paint(&self, text: impl Into<String>, color: Color) -> Styled {
        let mode = if self.config.color {
            ColorMode::Always
        } else {
            ColorMode::Never
        };
        Styled::new(text).with_color_mode(mode).fg(color)
    }

    /// Print as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a table sized to the terminal
    pub fn print_table(&self, table: &Table) {
        print!("{}", table.render(self.config.width, self.config.color));
    }

    /// Print text exactly as given (generated HDL on `--stdout`)
    pub fn raw(&self, text: &str) {
        print!("{text}");
    }

    /// Print a message (respects quiet mode)
    pub fn message(&self, msg: &str) {
        if !self.config.quiet {
            println!("{msg}");
        }
    }

    /// Print a success line
    pub fn success(&self, msg: &str) {
        if !self.config.quiet {
            println!("{} {msg}", self.paint(self.icons.check(), Color::Green));
        }
    }

    /// Print a failure line to stderr
    pub fn failure(&self, msg: &str) {
        eprintln!("{} {msg}", self.paint(self.icons.cross(), Color::Red));
    }

    /// Print a warning to stderr
    pub fn warning(&self, msg: &str) {
        if !self.config.quiet {
            eprintln!("{} {msg}", self.paint(self.icons.warning(), Color::Yellow));
        }
    }
}
