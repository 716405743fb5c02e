//! Configuration for ic-hdl-gen.
//!
//! Settings live in `.ichdl/config.yaml` under the project directory. Every
//! section is optional; missing values fall back to the defaults below.
//!
//! ```yaml
//! paths:
//!   metadata: Ic_Metadata_Master.json
//!   templates: templates
//! output:
//!   verilog_dir: generated_verilog
//! generation:
//!   default_language: verilog
//!   fallback: false
//!   timestamp: ${BUILD_STAMP:-2024-01-01 00:00:00}
//! ```

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
