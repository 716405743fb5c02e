//! Template lookup.
//!
//! A module template is resolved in three steps:
//! 1. a file named `<template><ext>` anywhere under `hdl_templates/<lang>/`;
//! 2. `generic<ext>` in each directory belonging to the record's category;
//! 3. `hdl_templates/<lang>/generic<ext>`.
//!
//! Testbenches follow the same shape with `<part>_tb`, the category's
//! `generic_tb` and the language's `generic_tb`.

use crate::error::{Result, TemplateError};
use crate::language::{Language, TemplateKind};
use crate::set::TemplateSet;
use ichdl_metadata::{suggest, Category, IcRecord, GENERIC_TEMPLATE};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::{debug, warn};

const GENERIC_TESTBENCH: &str = "generic_tb";
const MAX_SUGGESTIONS: usize = 3;

/// How a template was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    /// The record's own template (or `<part>_tb`).
    Exact,
    /// The generic template of the record's category.
    CategoryGeneric,
    /// The language-wide generic template.
    Generic,
    /// No template; the built-in stub was emitted.
    Fallback,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CategoryGeneric => "category-generic",
            Self::Generic => "generic",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Relative template path, or `<fallback>`.
    pub path: String,
    #[serde(rename = "match")]
    pub kind: MatchKind,
}

impl Resolution {
    fn new(path: impl Into<String>, kind: MatchKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Marker for output produced by the fallback stub.
    pub fn fallback() -> Self {
        Self::new("<fallback>", MatchKind::Fallback)
    }
}

/// Module template directories searched for a category, relative to the
/// language directory.
pub fn category_dirs(category: Category) -> &'static [&'static str] {
    match category {
        Category::Combinational => &[
            "combinational/basic_gates",
            "combinational/decoders",
            "combinational/multiplexers",
            "combinational/encoders",
            "combinational/special",
        ],
        Category::Sequential | Category::Counter => {
            &["sequential/flip_flops", "sequential/counters"]
        }
        Category::Special => &["special_analog", "transceivers"],
        Category::Other => &[],
    }
}

fn is_generic_name(name: &str) -> bool {
    name == GENERIC_TEMPLATE || name == GENERIC_TESTBENCH
}

/// Name-to-path map over a [`TemplateSet`], per kind and language.
#[derive(Debug, Clone, Default)]
pub struct TemplateIndex {
    by_name: HashMap<(TemplateKind, Language), BTreeMap<String, Vec<String>>>,
    paths: BTreeSet<String>,
}

impl TemplateIndex {
    pub fn build(set: &TemplateSet) -> Self {
        let mut index = Self::default();
        for file in set.files() {
            index
                .by_name
                .entry((file.kind, file.language))
                .or_default()
                .entry(file.name.clone())
                .or_default()
                .push(file.path.clone());
            index.paths.insert(file.path.clone());
        }

        for ((kind, language), names) in &index.by_name {
            // Generic templates are expected once per category directory.
            let repeated = names
                .iter()
                .filter(|(name, p)| p.len() > 1 && !is_generic_name(name));
            for (name, paths) in repeated {
                warn!(
                    %kind, %language, name = %name, using = %paths[0],
                    "template name defined more than once"
                );
            }
        }

        index
    }

    /// First path (in path order) for a template name.
    pub fn lookup(&self, kind: TemplateKind, language: Language, name: &str) -> Option<&str> {
        self.by_name
            .get(&(kind, language))?
            .get(name)?
            .first()
            .map(String::as_str)
    }

    /// Template names known for a kind and language, sorted.
    pub fn names(&self, kind: TemplateKind, language: Language) -> impl Iterator<Item = &str> {
        self.by_name
            .get(&(kind, language))
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }

    /// Names other than the generic ones defined by more than one file.
    pub fn duplicates(&self, kind: TemplateKind, language: Language) -> Vec<(&str, &[String])> {
        self.by_name
            .get(&(kind, language))
            .into_iter()
            .flat_map(|m| m.iter())
            .filter(|(name, paths)| paths.len() > 1 && !is_generic_name(name))
            .map(|(name, paths)| (name.as_str(), paths.as_slice()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Known template names close to `name`.
    pub fn similar_names(&self, kind: TemplateKind, language: Language, name: &str) -> Vec<String> {
        suggest::similar(name, self.names(kind, language), MAX_SUGGESTIONS)
    }

    /// Resolve the module template for `record`.
    pub fn resolve_module(&self, record: &IcRecord, language: Language) -> Result<Resolution> {
        let kind = TemplateKind::Module;
        let name = record.template_name();
        let root = format!("{}/{}", kind.root_dir(), language.dir_name());
        let ext = language.template_ext();
        let mut searched = Vec::new();

        if name != GENERIC_TEMPLATE {
            searched.push(format!("{root}/**/{name}{ext}"));
            if let Some(path) = self.lookup(kind, language, name) {
                return Ok(self.found(record, path, MatchKind::Exact));
            }
        }

        for dir in category_dirs(record.category) {
            let path = format!("{root}/{dir}/{GENERIC_TEMPLATE}{ext}");
            if self.contains(&path) {
                return Ok(self.found(record, &path, MatchKind::CategoryGeneric));
            }
            searched.push(path);
        }

        let path = format!("{root}/{GENERIC_TEMPLATE}{ext}");
        if self.contains(&path) {
            return Ok(self.found(record, &path, MatchKind::Generic));
        }
        searched.push(path);

        Err(TemplateError::NotFound {
            name: name.to_string(),
            language,
            kind,
            searched,
            suggestions: self.similar_names(kind, language, name),
        })
    }

    /// Resolve the testbench template for `record`.
    pub fn resolve_testbench(&self, record: &IcRecord, language: Language) -> Result<Resolution> {
        let kind = TemplateKind::Testbench;
        let name = format!("{}_tb", record.part_number);
        let root = format!("{}/{}", kind.root_dir(), language.dir_name());
        let ext = language.template_ext();
        let mut searched = vec![format!("{root}/**/{name}{ext}")];

        if name != GENERIC_TESTBENCH {
            if let Some(path) = self.lookup(kind, language, &name) {
                return Ok(self.found(record, path, MatchKind::Exact));
            }
        }

        let path = format!("{root}/{}/{GENERIC_TESTBENCH}{ext}", record.category);
        if self.contains(&path) {
            return Ok(self.found(record, &path, MatchKind::CategoryGeneric));
        }
        searched.push(path);

        let path = format!("{root}/{GENERIC_TESTBENCH}{ext}");
        if self.contains(&path) {
            return Ok(self.found(record, &path, MatchKind::Generic));
        }
        searched.push(path);

        Err(TemplateError::NotFound {
            suggestions: self.similar_names(kind, language, &name),
            name,
            language,
            kind,
            searched,
        })
    }

    fn found(&self, record: &IcRecord, path: &str, kind: MatchKind) -> Resolution {
        debug!(part = %record.part_number, template = %path, match_kind = %kind, "resolved template");
        Resolution::new(path, kind)
    }
}
