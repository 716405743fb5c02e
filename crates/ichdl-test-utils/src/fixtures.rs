//! Metadata and template fixtures.

use std::path::{Path, PathBuf};

use crate::write_file;

/// Three-part catalog: two parts with real templates and one whose
/// template exists nowhere.
pub const SAMPLE_METADATA: &str = r#"[
  {
    "part_number": "7400",
    "ic_name": "Quad 2-Input NAND Gate",
    "category": "combinational",
    "subtype": "nand_quad",
    "ports": {
      "inputs": ["A1", "B1", "A2", "B2", "A3", "B3", "A4", "B4"],
      "outputs": ["Y1", "Y2", "Y3", "Y4"]
    }
  },
  {
    "part_number": "7404",
    "ic_name": "Hex Inverter",
    "category": "combinational",
    "subtype": "inverter_hex",
    "ports": {
      "inputs": ["A1", "A2", "A3", "A4", "A5", "A6"],
      "outputs": ["Y1", "Y2", "Y3", "Y4", "Y5", "Y6"]
    }
  },
  {
    "part_number": "9999",
    "ic_name": "Mystery Chip",
    "category": "special",
    "template": "mystery_chip",
    "ports": {
      "inputs": ["EN"],
      "outputs": ["Z"]
    }
  }
]"#;

/// Metadata with the same part number twice.
pub const DUPLICATE_METADATA: &str = r#"[
  {"part_number": "7400", "ic_name": "NAND", "category": "combinational"},
  {"part_number": "7400", "ic_name": "NAND again", "category": "combinational"}
]"#;

/// Minimal Verilog module template: port list plus the part name.
pub const MINIMAL_VERILOG: &str = "// {{ic_name}} @ {{timestamp}}\n\
module {{module_name}}({{#each pins}}{{name}}{{#unless @last}}, {{/unless}}{{/each}});\n\
endmodule\n";

/// Minimal VHDL entity template.
pub const MINIMAL_VHDL: &str = "-- {{ic_name}} @ {{timestamp}}\n\
entity {{module_name}} is\nend entity;\n";

/// Minimal testbench template.
pub const MINIMAL_TESTBENCH: &str = "// {{testbench_name}} drives {{module_name}} with {{stimulus.vector_count}} vectors\n";

/// Writes [`SAMPLE_METADATA`] (or `json`) to `dir/ic_metadata.json`.
pub fn write_metadata(dir: &Path, json: &str) -> PathBuf {
    write_file(dir, "ic_metadata.json", json)
}

/// Builder for an on-disk template directory.
#[derive(Debug, Default, Clone)]
pub struct TemplateTree {
    files: Vec<(String, String)>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree with minimal `nand_quad` modules in both languages and root
    /// generic testbenches.
    pub fn minimal() -> Self {
        Self::new()
            .file(
                "hdl_templates/verilog/combinational/basic_gates/nand_quad.vtpl",
                MINIMAL_VERILOG,
            )
            .file(
                "hdl_templates/vhdl/combinational/basic_gates/nand_quad.vhdltpl",
                MINIMAL_VHDL,
            )
            .file("testbench_templates/verilog/generic_tb.vtpl", MINIMAL_TESTBENCH)
            .file("testbench_templates/vhdl/generic_tb.vhdltpl", MINIMAL_TESTBENCH)
    }

    /// Adds a file at a path relative to the tree root.
    pub fn file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Writes every file under `root` and returns `root`.
    pub fn write(&self, root: &Path) -> PathBuf {
        for (relative, content) in &self.files {
            write_file(root, relative, content);
        }
        root.to_path_buf()
    }
}
