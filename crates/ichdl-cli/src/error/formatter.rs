//! Error formatting for CLI output.

use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};

use crate::error::CliError;
use crate::output::{Color, ColorMode, Styled};

/// Error output formatter
pub struct ErrorFormatter {
    color_mode: ColorMode,
    verbose: bool,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            verbose: false,
        }
    }

    /// `Auto` is resolved against stderr here.
    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = match mode {
            ColorMode::Auto if !io::stderr().is_terminal() => ColorMode::Never,
            other => other,
        };
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn styled(&self, text: &str, color: Color) -> Styled {
        Styled::new(text).with_color_mode(self.color_mode).fg(color)
    }

    /// Format and print an error to stderr
    pub fn print(&self, error: &CliError) {
        eprint!("{}", self.format(error));
    }

    /// Format an error to a string
    pub fn format(&self, error: &CliError) -> String {
        let mut output = String::new();

        let prefix = self.styled(&format!("error[{}]:", error.code()), Color::Red).bold();
        let _ = writeln!(output, "{prefix} {error}");

        if self.verbose {
            self.format_source_chain(&mut output, error);
        }

        self.format_context(&mut output, error);

        if let Some(hint) = error.hint() {
            let label = self.styled("hint:", Color::Cyan).bold();
            let _ = writeln!(output, "\n{label} {hint}");
        }

        let suggestions = error.suggestions();
        if !suggestions.is_empty() {
            let label = self.styled("suggestions:", Color::Yellow).bold();
            let _ = writeln!(output, "\n{label}");
            for suggestion in suggestions {
                let _ = writeln!(output, "  - {suggestion}");
            }
        }

        output
    }

    /// Format as JSON
    pub fn format_json(&self, error: &CliError) -> String {
        let json = serde_json::json!({
            "error": {
                "code": error.code(),
                "exit_code": error.exit() as u8,
                "message": error.to_string(),
                "hint": error.hint(),
                "suggestions": error.suggestions(),
            }
        });

        serde_json::to_string_pretty(&json).unwrap_or_else(|_| error.to_string())
    }

    fn format_source_chain(&self, output: &mut String, error: &CliError) {
        use std::error::Error;

        let Some(source) = error.source() else {
            return;
        };

        let label = self.styled("caused by:", Color::BrightBlack);
        let _ = writeln!(output, "\n{label}");
        let _ = writeln!(output, "  {source}");

        let mut current = source.source();
        let mut depth = 1;
        while let Some(src) = current {
            let _ = writeln!(output, "  {depth}: {src}");
            current = src.source();
            depth += 1;
        }
    }

    fn format_context(&self, output: &mut String, error: &CliError) {
        match error {
            CliError::Io { path: Some(p), .. } => {
                let label = self.styled("path:", Color::BrightBlack);
                let _ = writeln!(output, "\n  {label} {}", p.display());
            }
            CliError::NotFound {
                resource_type,
                resource_name,
                ..
            } => {
                let label = self.styled("resource:", Color::BrightBlack);
                let _ = writeln!(output, "\n  {label} {resource_type} '{resource_name}'");
            }
            CliError::Render { template, .. } => {
                let label = self.styled("template:", Color::BrightBlack);
                let _ = writeln!(output, "\n  {label} {template}");
            }
            _ => {}
        }
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
