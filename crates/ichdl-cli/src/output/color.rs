//! ANSI styling.

use std::fmt;
use std::io::{self, IsTerminal};

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Color when the stream is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against a stream.
    pub fn enabled(&self, is_tty: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_tty && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn stdout(&self) -> bool {
        self.enabled(io::stdout().is_terminal())
    }

    pub fn stderr(&self) -> bool {
        self.enabled(io::stderr().is_terminal())
    }
}

/// Foreground colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Cyan,
    BrightBlack,
}

impl Color {
    fn code(&self) -> &'static str {
        match self {
            Self::Red => "31",
            Self::Green => "32",
            Self::Yellow => "33",
            Self::Cyan => "36",
            Self::BrightBlack => "90",
        }
    }
}

/// Text with optional color and weight, rendered through `Display`.
///
/// `ColorMode::Auto` is treated as "the caller already checked the stream";
/// only `NO_COLOR` can still switch it off.
#[derive(Debug, Clone)]
pub struct Styled {
    text: String,
    color_mode: ColorMode,
    fg: Option<Color>,
    bold: bool,
}

impl Styled {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color_mode: ColorMode::Auto,
            fg: None,
            bold: false,
        }
    }

    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl fmt::Display for Styled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes = Vec::new();
        if self.bold {
            codes.push("1");
        }
        if let Some(color) = self.fg {
            codes.push(color.code());
        }

        if codes.is_empty() || !self.color_mode.enabled(true) {
            return f.write_str(&self.text);
        }
        write!(f, "\x1b[{}m{}\x1b[0m", codes.join(";"), self.text)
    }
}
