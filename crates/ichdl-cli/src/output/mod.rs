//! Output formatting utilities for CLI commands.

pub mod color;
pub mod icons;
pub mod printer;
pub mod table;

pub use color::{Color, ColorMode, Styled};
pub use icons::IconContext;
pub use printer::{Output, OutputConfig};
pub use table::{Alignment, Column, Table, TableStyle};

use terminal_size::{terminal_size, Width};

/// Width used when stdout is not a terminal; wide enough for the support table.
const DEFAULT_WIDTH: usize = 120;
const MIN_WIDTH: usize = 40;

/// Width of the terminal attached to stdout.
pub fn terminal_width() -> usize {
    width_or_default(terminal_size().map(|(Width(w), _)| usize::from(w)))
}

fn width_or_default(detected: Option<usize>) -> usize {
    detected.filter(|&w| w >= MIN_WIDTH).unwrap_or(DEFAULT_WIDTH)
}
