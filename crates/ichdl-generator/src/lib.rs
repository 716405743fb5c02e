//! IC-to-HDL generation.
//!
//! [`Generator`] ties a [`MetadataStore`](ichdl_metadata::MetadataStore)
//! to a [`TemplateSet`](ichdl_templates::TemplateSet): it looks a part
//! number up, resolves the template, renders it and optionally writes the
//! result atomically.
//!
//! ```no_run
//! use ichdl_generator::{GenerateOptions, Generator};
//! use ichdl_metadata::MetadataStore;
//! use ichdl_templates::{Language, TemplateSet};
//! use std::path::Path;
//!
//! let generator = Generator::new(
//!     MetadataStore::builtin()?,
//!     TemplateSet::builtin(),
//!     GenerateOptions::default(),
//! );
//! let file = generator.generate_hdl("7400", Language::Verilog, Path::new("generated_verilog"))?;
//! println!("wrote {}", file.path.display());
//! # Ok::<(), ichdl_generator::GenerateError>(())
//! ```

mod error;
mod generator;
mod options;
mod report;

pub use error::{GenerateError, Result};
pub use generator::Generator;
pub use options::GenerateOptions;
pub use report::{
    BatchFailure, BatchReport, GeneratedFile, Rendered, SupportRow, TemplateCheck, TemplateUsage,
};
