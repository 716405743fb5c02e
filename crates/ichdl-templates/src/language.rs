//! Target languages and template kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output HDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Verilog,
    Vhdl,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Verilog, Language::Vhdl];

    /// Directory name under `hdl_templates/` and `testbench_templates/`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Verilog => "verilog",
            Self::Vhdl => "vhdl",
        }
    }

    /// Template file extension, including the dot.
    pub fn template_ext(&self) -> &'static str {
        match self {
            Self::Verilog => ".vtpl",
            Self::Vhdl => ".vhdltpl",
        }
    }

    /// Generated file extension, without the dot.
    pub fn output_ext(&self) -> &'static str {
        match self {
            Self::Verilog => "v",
            Self::Vhdl => "vhd",
        }
    }

    /// Language whose template extension `file_name` ends with.
    pub fn from_template_file(file_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| file_name.ends_with(lang.template_ext()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Error for an unrecognized language name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}' (expected 'verilog' or 'vhdl')")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verilog" | "v" => Ok(Self::Verilog),
            "vhdl" | "vhd" => Ok(Self::Vhdl),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// What a template produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Module,
    Testbench,
}

impl TemplateKind {
    /// Top-level directory holding templates of this kind.
    pub fn root_dir(&self) -> &'static str {
        match self {
            Self::Module => "hdl_templates",
            Self::Testbench => "testbench_templates",
        }
    }

    /// Output file prefix.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Module => "IC_",
            Self::Testbench => "tb_",
        }
    }

    /// Output file name for `part` in `language`.
    pub fn output_file_name(&self, part: &str, language: Language) -> String {
        format!("{}{}.{}", self.file_prefix(), part, language.output_ext())
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Module => "module",
            Self::Testbench => "testbench",
        })
    }
}
