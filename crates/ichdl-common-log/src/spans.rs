//! Span helpers for generation steps.

use tracing::{info_span, Span};

/// Span for work on a single part.
pub fn part_span(part: &str, language: &str) -> Span {
    info_span!("part", part = %part, language = %language)
}

/// Span for rendering one template.
pub fn render_span(template: &str) -> Span {
    info_span!("render", template = %template)
}

/// Span for a file operation.
pub fn file_span(operation: &str, path: &str) -> Span {
    info_span!("file", op = %operation, path = %path)
}

/// Span for a batch run.
pub fn batch_span(command: &str, total: usize) -> Span {
    info_span!("batch", command = %command, total = total)
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer, log and return the elapsed milliseconds.
    pub fn finish(self) -> u128 {
        let elapsed = self.start.elapsed().as_millis();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %elapsed,
            "operation completed"
        );
        elapsed
    }
}

/// Time a block of code at debug level.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}
