//! Template file collections.
//!
//! A [`TemplateSet`] maps relative, forward-slash paths such as
//! `hdl_templates/verilog/combinational/basic_gates/nand_quad.vtpl` to their
//! contents. The built-in set is compiled into the binary; an on-disk set is
//! scanned with `walkdir` and replaces it entirely.

use crate::error::{Result, TemplateError};
use crate::language::{Language, TemplateKind};
use ichdl_common_fs::path::to_unix_string;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

const MAX_TEMPLATE_SIZE: usize = 1024 * 1024;

macro_rules! embed_templates {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../templates/", $path)))),*]
    };
}

static BUILTIN: &[(&str, &str)] = embed_templates![
    // Verilog modules
    "hdl_templates/verilog/generic.vtpl",
    "hdl_templates/verilog/combinational/basic_gates/nand_quad.vtpl",
    "hdl_templates/verilog/combinational/basic_gates/nor_quad.vtpl",
    "hdl_templates/verilog/combinational/basic_gates/inverter_hex.vtpl",
    "hdl_templates/verilog/combinational/basic_gates/and_quad.vtpl",
    "hdl_templates/verilog/combinational/basic_gates/or_quad.vtpl",
    "hdl_templates/verilog/combinational/basic_gates/xor_quad.vtpl",
    "hdl_templates/verilog/combinational/decoders/decoder_3to8.vtpl",
    "hdl_templates/verilog/combinational/decoders/decoder_2to4_dual.vtpl",
    "hdl_templates/verilog/combinational/decoders/decoder_bcd_7seg.vtpl",
    "hdl_templates/verilog/combinational/multiplexers/mux_4to1_dual.vtpl",
    "hdl_templates/verilog/combinational/encoders/encoder_10to4_priority.vtpl",
    "hdl_templates/verilog/combinational/special/comparator_4bit.vtpl",
    "hdl_templates/verilog/sequential/flip_flops/d_ff_dual_async.vtpl",
    "hdl_templates/verilog/sequential/flip_flops/jk_ff_dual.vtpl",
    "hdl_templates/verilog/sequential/counters/counter_decade_7490.vtpl",
    "hdl_templates/verilog/sequential/counters/counter_4bit_binary_7493.vtpl",
    "hdl_templates/verilog/sequential/counters/counter_decade_4017.vtpl",
    "hdl_templates/verilog/transceivers/transceiver_8bit.vtpl",
    "hdl_templates/verilog/special_analog/monostable_74121.vtpl",
    "hdl_templates/verilog/special_analog/timer_555_behavioral.vtpl",
    // VHDL entities
    "hdl_templates/vhdl/generic.vhdltpl",
    "hdl_templates/vhdl/combinational/basic_gates/nand_quad.vhdltpl",
    "hdl_templates/vhdl/combinational/basic_gates/nor_quad.vhdltpl",
    "hdl_templates/vhdl/combinational/basic_gates/inverter_hex.vhdltpl",
    "hdl_templates/vhdl/combinational/basic_gates/and_quad.vhdltpl",
    "hdl_templates/vhdl/combinational/basic_gates/or_quad.vhdltpl",
    "hdl_templates/vhdl/combinational/basic_gates/xor_quad.vhdltpl",
    "hdl_templates/vhdl/combinational/decoders/decoder_3to8.vhdltpl",
    "hdl_templates/vhdl/combinational/decoders/decoder_2to4_dual.vhdltpl",
    "hdl_templates/vhdl/combinational/decoders/decoder_bcd_7seg.vhdltpl",
    "hdl_templates/vhdl/combinational/multiplexers/mux_4to1_dual.vhdltpl",
    "hdl_templates/vhdl/combinational/encoders/encoder_10to4_priority.vhdltpl",
    "hdl_templates/vhdl/combinational/special/comparator_4bit.vhdltpl",
    "hdl_templates/vhdl/sequential/flip_flops/d_ff_dual_async.vhdltpl",
    "hdl_templates/vhdl/sequential/flip_flops/jk_ff_dual.vhdltpl",
    "hdl_templates/vhdl/sequential/counters/counter_decade_7490.vhdltpl",
    "hdl_templates/vhdl/sequential/counters/counter_4bit_binary_7493.vhdltpl",
    "hdl_templates/vhdl/sequential/counters/counter_decade_4017.vhdltpl",
    "hdl_templates/vhdl/transceivers/transceiver_8bit.vhdltpl",
    "hdl_templates/vhdl/special_analog/monostable_74121.vhdltpl",
    "hdl_templates/vhdl/special_analog/timer_555_behavioral.vhdltpl",
    // Testbenches
    "testbench_templates/verilog/generic_tb.vtpl",
    "testbench_templates/verilog/combinational/generic_tb.vtpl",
    "testbench_templates/verilog/counter/generic_tb.vtpl",
    "testbench_templates/verilog/7400_tb.vtpl",
    "testbench_templates/verilog/7474_tb.vtpl",
    "testbench_templates/vhdl/generic_tb.vhdltpl",
    "testbench_templates/vhdl/combinational/generic_tb.vhdltpl",
];

/// Where a template set was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    Dir(PathBuf),
}

impl std::fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in templates"),
            Self::Dir(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A single template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the set root, with forward slashes.
    pub path: String,
    pub kind: TemplateKind,
    pub language: Language,
    /// File name without the template extension, e.g. `nand_quad` or `7400_tb`.
    pub name: String,
    /// Directories between the language directory and the file, e.g.
    /// `combinational/basic_gates`. Empty for files directly under it.
    pub subdir: String,
    pub contents: String,
}

impl TemplateFile {
    /// Classify a relative path. Returns `None` for files that are not
    /// templates (wrong root, unknown language directory, wrong extension).
    fn classify(path: &str, contents: String) -> Option<Self> {
        let mut parts = path.split('/');
        let kind = match parts.next()? {
            "hdl_templates" => TemplateKind::Module,
            "testbench_templates" => TemplateKind::Testbench,
            _ => return None,
        };
        let lang_dir = parts.next()?;
        let language = Language::ALL
            .into_iter()
            .find(|l| l.dir_name() == lang_dir)?;

        let rest: Vec<&str> = parts.collect();
        let (file_name, dirs) = rest.split_last()?;
        let name = file_name.strip_suffix(language.template_ext())?;
        if name.is_empty() {
            return None;
        }

        Some(Self {
            path: path.to_string(),
            kind,
            language,
            name: name.to_string(),
            subdir: dirs.join("/"),
            contents,
        })
    }
}

/// A collection of template files addressed by relative path.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    files: BTreeMap<String, TemplateFile>,
    origin: TemplateOrigin,
}

impl TemplateSet {
    /// The templates compiled into the binary.
    pub fn builtin() -> Self {
        Self::from_files(
            BUILTIN.iter().map(|(p, c)| (p.to_string(), c.to_string())),
            TemplateOrigin::Builtin,
        )
    }

    /// Build a set from `(relative path, contents)` pairs. Non-template
    /// paths are ignored.
    pub fn from_files<I>(files: I, origin: TemplateOrigin) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let files = files
            .into_iter()
            .filter_map(|(path, contents)| {
                let file = TemplateFile::classify(&path, contents);
                if file.is_none() {
                    trace!(path = %path, "ignoring non-template file");
                }
                file
            })
            .map(|f| (f.path.clone(), f))
            .collect();

        Self { files, origin }
    }

    /// Scan `root` for `hdl_templates/` and `testbench_templates/` trees.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(TemplateError::DirNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for kind in [TemplateKind::Module, TemplateKind::Testbench] {
            let dir = root.join(kind.root_dir());
            if !dir.is_dir() {
                debug!(path = %dir.display(), "template directory absent");
                continue;
            }

            for entry in WalkDir::new(&dir).sort_by_file_name() {
                let entry = entry.map_err(|e| TemplateError::Scan {
                    path: dir.clone(),
                    message: e.to_string(),
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }

                let is_template = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|n| Language::from_template_file(n).is_some());
                if !is_template {
                    continue;
                }

                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                let contents = ichdl_common_fs::read_to_string(entry.path(), MAX_TEMPLATE_SIZE)?;
                files.push((to_unix_string(relative), contents));
            }
        }

        let set = Self::from_files(files, TemplateOrigin::Dir(root.to_path_buf()));
        debug!(root = %root.display(), templates = set.len(), "scanned template directory");
        Ok(set)
    }

    pub fn get(&self, path: &str) -> Option<&TemplateFile> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// All files, sorted by path.
    pub fn files(&self) -> impl Iterator<Item = &TemplateFile> {
        self.files.values()
    }

    /// Files of one kind and language, sorted by path.
    pub fn files_for(
        &self,
        kind: TemplateKind,
        language: Language,
    ) -> impl Iterator<Item = &TemplateFile> {
        self.files
            .values()
            .filter(move |f| f.kind == kind && f.language == language)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn origin(&self) -> &TemplateOrigin {
        &self.origin
    }
}
