//! IC metadata for ic-hdl-gen.
//!
//! A metadata file is a JSON array of [`IcRecord`]s keyed by part number.
//! [`MetadataStore::builtin`] serves a catalog of classic 74xx / 4000-series
//! parts compiled into the binary; [`MetadataStore::load`] reads a file.

pub mod error;
pub mod store;
pub mod suggest;
pub mod types;
pub mod validation;

pub use error::{MetadataError, Result};
pub use store::{compare_part_numbers, MetadataSource, MetadataStore};
pub use types::{Category, IcRecord, Ports, TestCoverage, GENERIC_TEMPLATE};
