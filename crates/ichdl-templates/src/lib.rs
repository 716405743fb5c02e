//! HDL templates for ic-hdl-gen.
//!
//! Templates are Handlebars text files laid out as
//!
//! ```text
//! hdl_templates/<language>/<category dirs>/<template>.vtpl|.vhdltpl
//! testbench_templates/<language>/[<category>/]<part>_tb|generic_tb.<ext>
//! ```
//!
//! [`TemplateSet`] holds the files, [`TemplateIndex`] resolves a record to
//! one of them, [`RenderContext`] carries the record's fields and
//! [`HdlRenderer`] produces the text.

pub mod context;
pub mod error;
pub mod fallback;
pub mod language;
pub mod renderer;
pub mod resolve;
pub mod set;

pub use context::{ContextDefaults, GeneratorInfo, Pin, PinGroup, RenderContext, Stimulus};
pub use error::{Result, TemplateError};
pub use language::{Language, TemplateKind, UnknownLanguage};
pub use renderer::HdlRenderer;
pub use resolve::{category_dirs, MatchKind, Resolution, TemplateIndex};
pub use set::{TemplateFile, TemplateOrigin, TemplateSet};
