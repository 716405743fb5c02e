//! Status icons with ASCII fallbacks.

use std::env;

/// Status icons
pub struct Icons;

impl Icons {
    pub const CHECK: &'static str = "✓";
    pub const CROSS: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const ARROW: &'static str = "→";

    pub const CHECK_ASCII: &'static str = "[ok]";
    pub const CROSS_ASCII: &'static str = "[err]";
    pub const WARNING_ASCII: &'static str = "[warn]";
    pub const ARROW_ASCII: &'static str = "->";
}

/// Picks unicode or ASCII icons for the current terminal.
#[derive(Debug, Clone, Copy)]
pub struct IconContext {
    unicode: bool,
}

impl IconContext {
    pub fn new() -> Self {
        Self {
            unicode: detect_unicode_support(),
        }
    }

    pub fn ascii() -> Self {
        Self { unicode: false }
    }

    pub fn check(&self) -> &'static str {
        if self.unicode { Icons::CHECK } else { Icons::CHECK_ASCII }
    }

    pub fn cross(&self) -> &'static str {
        if self.unicode { Icons::CROSS } else { Icons::CROSS_ASCII }
    }

    pub fn warning(&self) -> &'static str {
        if self.unicode { Icons::WARNING } else { Icons::WARNING_ASCII }
    }

    pub fn arrow(&self) -> &'static str {
        if self.unicode { Icons::ARROW } else { Icons::ARROW_ASCII }
    }
}

impl Default for IconContext {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_unicode_support() -> bool {
    env::var("TERM")
        .map(|t| !t.contains("linux") && t != "dumb")
        .unwrap_or(true)
        && env::var("LANG")
            .map(|l| l.to_uppercase().contains("UTF"))
            .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_fallbacks() {
        let icons = IconContext::ascii();
        assert_eq!(icons.check(), "[ok]");
        assert_eq!(icons.cross(), "[err]");
        assert_eq!(icons.warning(), "[warn]");
        assert_eq!(icons.arrow(), "->");
    }

    #[test]
    fn test_icon_context() {
        let icons = IconContext::new();
        assert!(!icons.check().is_empty());
        assert!(!icons.cross().is_empty());
    }
}
