//! Results handed back to callers.

use ichdl_metadata::{Category, IcRecord};
use ichdl_templates::{Language, Resolution, TemplateKind};
use serde::Serialize;
use std::path::PathBuf;

use crate::error::GenerateError;

/// A rendered module or testbench held in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub part_number: String,
    pub language: Language,
    pub kind: TemplateKind,
    pub template: Resolution,
    /// `IC_<part>.v`, `tb_<part>.vhd`, ...
    pub file_name: String,
    pub content: String,
}

impl Rendered {
    pub(crate) fn new(
        record: &IcRecord,
        language: Language,
        kind: TemplateKind,
        template: Resolution,
        content: String,
    ) -> Self {
        Self {
            part_number: record.part_number.clone(),
            language,
            kind,
            template,
            file_name: kind.output_file_name(&record.part_number, language),
            content,
        }
    }
}

/// A file written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedFile {
    pub part_number: String,
    pub language: Language,
    pub kind: TemplateKind,
    pub template: Resolution,
    pub path: PathBuf,
    pub bytes: usize,
}

/// A part that failed during a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    pub part_number: String,
    pub kind: TemplateKind,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl BatchFailure {
    pub(crate) fn new(part_number: &str, kind: TemplateKind, err: &GenerateError) -> Self {
        Self {
            part_number: part_number.to_string(),
            kind,
            error: err.to_string(),
            suggestions: err.suggestions().to_vec(),
        }
    }
}

/// Outcome of a batch command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub language: Language,
    pub generated: Vec<GeneratedFile>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub(crate) fn new(language: Language) -> Self {
        Self {
            language,
            generated: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.generated.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// How one part resolves in each language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportRow {
    pub part_number: String,
    pub ic_name: String,
    pub category: Category,
    pub template: String,
    pub verilog: Option<Resolution>,
    pub vhdl: Option<Resolution>,
    pub verilog_testbench: Option<Resolution>,
    pub vhdl_testbench: Option<Resolution>,
}

impl SupportRow {
    pub fn module(&self, language: Language) -> Option<&Resolution> {
        match language {
            Language::Verilog => self.verilog.as_ref(),
            Language::Vhdl => self.vhdl.as_ref(),
        }
    }

    pub fn testbench(&self, language: Language) -> Option<&Resolution> {
        match language {
            Language::Verilog => self.verilog_testbench.as_ref(),
            Language::Vhdl => self.vhdl_testbench.as_ref(),
        }
    }
}

/// Whether a record's template name exists as a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateCheck {
    pub part_number: String,
    pub template: String,
    pub language: Language,
    pub exact: bool,
    /// What generation would actually use.
    pub resolved: Option<Resolution>,
    /// Existing template names close to `template`, when not exact.
    pub similar: Vec<String>,
}

/// A template file and the parts that render through it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateUsage {
    pub path: String,
    pub kind: TemplateKind,
    pub language: Language,
    pub parts: Vec<String>,
}
