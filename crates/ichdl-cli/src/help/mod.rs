//! Help text attached to errors.

pub mod suggestions;

pub use suggestions::{did_you_mean, template_hint, LIST_HINT};
