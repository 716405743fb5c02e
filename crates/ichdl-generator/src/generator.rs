//! Lookup, render and write.

use std::collections::BTreeMap;
use std::path::Path;

use ichdl_common_fs::{path::to_unix_string, write_string_atomic};
use ichdl_common_log::spans::{batch_span, file_span, part_span, render_span, Timer};
use ichdl_metadata::validation::validate_power_pins;
use ichdl_metadata::{IcRecord, MetadataStore};
use ichdl_templates::{
    fallback, HdlRenderer, Language, MatchKind, RenderContext, Resolution, TemplateError,
    TemplateIndex, TemplateKind, TemplateSet,
};
use tracing::{debug, info, warn};

use crate::error::{GenerateError, Result};
use crate::options::GenerateOptions;
use crate::report::{
    BatchFailure, BatchReport, GeneratedFile, Rendered, SupportRow, TemplateCheck, TemplateUsage,
};

/// Renders metadata records through templates.
///
/// Every operation is a pure lookup over the store and the template index
/// followed by a render; only the `generate_*` methods touch the disk.
pub struct Generator {
    store: MetadataStore,
    templates: TemplateSet,
    index: TemplateIndex,
    renderer: HdlRenderer,
    options: GenerateOptions,
}

impl Generator {
    pub fn new(store: MetadataStore, templates: TemplateSet, options: GenerateOptions) -> Self {
        let index = TemplateIndex::build(&templates);
        debug!(
            parts = store.len(),
            templates = templates.len(),
            metadata = %store.source(),
            template_origin = %templates.origin(),
            "generator ready"
        );
        Self {
            store,
            templates,
            index,
            renderer: HdlRenderer::new(),
            options,
        }
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn index(&self) -> &TemplateIndex {
        &self.index
    }

    /// Render the module for `part` without writing it.
    pub fn render_hdl(&self, part: &str, language: Language) -> Result<Rendered> {
        let record = self.store.require(part)?;
        self.render_module(record, language, &self.options.timestamp_now())
    }

    /// Render the module for `part` and write it to `output_dir`.
    pub fn generate_hdl(&self, part: &str, language: Language, output_dir: &Path) -> Result<GeneratedFile> {
        let rendered = self.render_hdl(part, language)?;
        self.write(rendered, output_dir)
    }

    /// Render the testbench for `part` without writing it.
    pub fn render_testbench(&self, part: &str, language: Language) -> Result<Rendered> {
        let record = self.store.require(part)?;
        self.render_tb(record, language, &self.options.timestamp_now())
    }

    /// Render the testbench for `part` and write it to `output_dir`.
    pub fn generate_testbench(
        &self,
        part: &str,
        language: Language,
        output_dir: &Path,
    ) -> Result<GeneratedFile> {
        let rendered = self.render_testbench(part, language)?;
        self.write(rendered, output_dir)
    }

    /// Generate every module in file order. With `testbench_dir` set, each
    /// part's testbench is written there as well. A failing part is recorded
    /// in the report and the batch moves on.
    pub fn generate_all(
        &self,
        language: Language,
        output_dir: &Path,
        testbench_dir: Option<&Path>,
    ) -> BatchReport {
        let span = batch_span("generate-all", self.store.len());
        let _guard = span.enter();
        let timer = Timer::start("generate-all");
        let timestamp = self.options.timestamp_now();
        let mut report = BatchReport::new(language);

        for record in self.store.records() {
            let result = self
                .render_module(record, language, &timestamp)
                .and_then(|r| self.write(r, output_dir));
            Self::record_outcome(&mut report, record, TemplateKind::Module, result);

            if let Some(dir) = testbench_dir {
                let result = self
                    .render_tb(record, language, &timestamp)
                    .and_then(|r| self.write(r, dir));
                Self::record_outcome(&mut report, record, TemplateKind::Testbench, result);
            }
        }

        timer.finish();
        info!(
            generated = report.succeeded(),
            failed = report.failed(),
            "generate-all finished"
        );
        report
    }

    /// Generate every testbench in file order.
    pub fn testbench_all(&self, language: Language, output_dir: &Path) -> BatchReport {
        let span = batch_span("testbench-all", self.store.len());
        let _guard = span.enter();
        let timer = Timer::start("testbench-all");
        let timestamp = self.options.timestamp_now();
        let mut report = BatchReport::new(language);

        for record in self.store.records() {
            let result = self
                .render_tb(record, language, &timestamp)
                .and_then(|r| self.write(r, output_dir));
            Self::record_outcome(&mut report, record, TemplateKind::Testbench, result);
        }

        timer.finish();
        info!(
            generated = report.succeeded(),
            failed = report.failed(),
            "testbench-all finished"
        );
        report
    }

    /// Template resolution for every part, in file order.
    pub fn support_matrix(&self) -> Vec<SupportRow> {
        self.store
            .records()
            .iter()
            .map(|record| SupportRow {
                part_number: record.part_number.clone(),
                ic_name: record.ic_name.clone(),
                category: record.category,
                template: record.template_name().to_string(),
                verilog: self.module_support(record, Language::Verilog),
                vhdl: self.module_support(record, Language::Vhdl),
                verilog_testbench: self.index.resolve_testbench(record, Language::Verilog).ok(),
                vhdl_testbench: self.index.resolve_testbench(record, Language::Vhdl).ok(),
            })
            .collect()
    }

    /// For every record and language, whether the record's template name
    /// matches a file exactly.
    pub fn check(&self) -> Vec<TemplateCheck> {
        let mut checks = Vec::new();
        for record in self.store.records() {
            let template = record.template_name();
            for language in Language::ALL {
                let resolved = self.index.resolve_module(record, language).ok();
                let exact = resolved
                    .as_ref()
                    .is_some_and(|r| r.kind == MatchKind::Exact);
                let similar = if exact {
                    Vec::new()
                } else {
                    self.index
                        .similar_names(TemplateKind::Module, language, template)
                };

                checks.push(TemplateCheck {
                    part_number: record.part_number.clone(),
                    template: template.to_string(),
                    language,
                    exact,
                    resolved,
                    similar,
                });
            }
        }
        checks
    }

    /// Every template file with the parts that resolve to it.
    pub fn template_usage(&self) -> Vec<TemplateUsage> {
        let mut parts: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for record in self.store.records() {
            for language in Language::ALL {
                let resolved = [
                    self.index.resolve_module(record, language),
                    self.index.resolve_testbench(record, language),
                ];
                for resolution in resolved.into_iter().flatten() {
                    parts
                        .entry(resolution.path)
                        .or_default()
                        .push(record.part_number.clone());
                }
            }
        }

        self.templates
            .files()
            .map(|file| TemplateUsage {
                path: file.path.clone(),
                kind: file.kind,
                language: file.language,
                parts: parts.remove(&file.path).unwrap_or_default(),
            })
            .collect()
    }

    fn module_support(&self, record: &IcRecord, language: Language) -> Option<Resolution> {
        match self.index.resolve_module(record, language) {
            Ok(resolution) => Some(resolution),
            Err(_) if self.options.fallback => Some(Resolution::fallback()),
            Err(_) => None,
        }
    }

    fn context(&self, record: &IcRecord, language: Language, timestamp: &str) -> Result<RenderContext> {
        validate_power_pins(record, &self.options.defaults.power_pins)?;
        Ok(RenderContext::build(
            record,
            language,
            &self.options.defaults,
            timestamp,
        ))
    }

    fn render_module(&self, record: &IcRecord, language: Language, timestamp: &str) -> Result<Rendered> {
        let span = part_span(&record.part_number, language.dir_name());
        let _guard = span.enter();
        let ctx = self.context(record, language, timestamp)?;

        let resolution = match self.index.resolve_module(record, language) {
            Ok(resolution) => resolution,
            Err(err @ TemplateError::NotFound { .. }) if self.options.fallback => {
                warn!(error = %err, "emitting fallback stub");
                let content = fallback::render_stub(&self.renderer, &ctx)?;
                return Ok(Rendered::new(
                    record,
                    language,
                    TemplateKind::Module,
                    Resolution::fallback(),
                    content,
                ));
            }
            Err(err) => return Err(err.into()),
        };

        self.render_resolved(record, language, TemplateKind::Module, resolution, &ctx)
    }

    fn render_tb(&self, record: &IcRecord, language: Language, timestamp: &str) -> Result<Rendered> {
        let span = part_span(&record.part_number, language.dir_name());
        let _guard = span.enter();
        let ctx = self.context(record, language, timestamp)?;
        let resolution = self.index.resolve_testbench(record, language)?;
        self.render_resolved(record, language, TemplateKind::Testbench, resolution, &ctx)
    }

    fn render_resolved(
        &self,
        record: &IcRecord,
        language: Language,
        kind: TemplateKind,
        resolution: Resolution,
        ctx: &RenderContext,
    ) -> Result<Rendered> {
        let span = render_span(&resolution.path);
        let _guard = span.enter();

        let source = self
            .templates
            .get(&resolution.path)
            .map(|file| file.contents.as_str())
            .ok_or_else(|| GenerateError::MissingSource {
                path: resolution.path.clone(),
            })?;
        let content = self.renderer.render(&resolution.path, source, ctx)?;

        Ok(Rendered::new(record, language, kind, resolution, content))
    }

    fn write(&self, rendered: Rendered, output_dir: &Path) -> Result<GeneratedFile> {
        let path = output_dir.join(&rendered.file_name);
        let span = file_span("write", &to_unix_string(&path));
        let _guard = span.enter();

        write_string_atomic(&path, &rendered.content)?;
        info!(
            part = %rendered.part_number,
            kind = %rendered.kind,
            template = %rendered.template.path,
            path = %path.display(),
            "generated"
        );

        Ok(GeneratedFile {
            part_number: rendered.part_number,
            language: rendered.language,
            kind: rendered.kind,
            template: rendered.template,
            bytes: rendered.content.len(),
            path,
        })
    }

    fn record_outcome(
        report: &mut BatchReport,
        record: &IcRecord,
        kind: TemplateKind,
        result: Result<GeneratedFile>,
    ) {
        match result {
            Ok(file) => report.generated.push(file),
            Err(err) => {
                warn!(part = %record.part_number, %kind, error = %err, "generation failed");
                report
                    .failures
                    .push(BatchFailure::new(&record.part_number, kind, &err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ichdl_test_utils::fixtures::{SAMPLE_METADATA, MINIMAL_VERILOG};
    use ichdl_test_utils::{assert_err, assert_ok, temp_dir};
    use ichdl_templates::TemplateOrigin;

    const TS: &str = "2024-01-01 00:00:00";

    fn builtin() -> Generator {
        Generator::new(
            MetadataStore::builtin().unwrap(),
            TemplateSet::builtin(),
            GenerateOptions::default().with_timestamp(TS),
        )
    }

    fn sample(fallback: bool) -> Generator {
        let templates = TemplateSet::from_files(
            [
                (
                    "hdl_templates/verilog/combinational/basic_gates/nand_quad.vtpl".to_string(),
                    MINIMAL_VERILOG.to_string(),
                ),
                (
                    "testbench_templates/verilog/generic_tb.vtpl".to_string(),
                    "// {{testbench_name}}\n".to_string(),
                ),
            ],
            TemplateOrigin::Builtin,
        );
        Generator::new(
            MetadataStore::from_json(SAMPLE_METADATA).unwrap(),
            templates,
            GenerateOptions::default()
                .with_timestamp(TS)
                .with_fallback(fallback),
        )
    }

    #[test]
    fn test_render_hdl() {
        let g = builtin();
        let r = assert_ok!(g.render_hdl("7400", Language::Verilog));
        assert_eq!(r.file_name, "IC_7400.v");
        assert_eq!(r.kind, TemplateKind::Module);
        assert_eq!(r.template.kind, MatchKind::Exact);
        assert!(r.content.contains("module IC_7400"));
        assert!(r.content.contains(TS));
    }

    #[test]
    fn test_unknown_part_suggests() {
        let g = builtin();
        let err = assert_err!(g.render_hdl("740", Language::Verilog));
        assert!(matches!(err, GenerateError::Metadata(_)));
        assert!(err.suggestions().iter().any(|s| s == "7400"));
    }

    #[test]
    fn test_missing_template_without_fallback() {
        let g = sample(false);
        let err = assert_err!(g.render_hdl("7404", Language::Verilog));
        match err {
            GenerateError::Template(TemplateError::NotFound { name, .. }) => {
                assert_eq!(name, "inverter_hex")
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_fallback_stub() {
        let g = sample(true);
        let r = assert_ok!(g.render_hdl("9999", Language::Verilog));
        assert_eq!(r.template, Resolution::fallback());
        assert!(r.content.contains("module IC_9999"));
        assert!(r.content.contains("assign Z = 1'b0;"));

        // Fallback never applies to testbenches.
        assert!(g.render_testbench("9999", Language::Vhdl).is_err());
    }

    #[test]
    fn test_signal_clashing_with_default_supply_is_rejected() {
        let json = r#"[{
            "part_number": "7400",
            "ic_name": "Quad 2-Input NAND Gate",
            "category": "combinational",
            "subtype": "nand_quad",
            "ports": {"inputs": ["A1", "GND"], "outputs": ["Y1"]}
        }]"#;
        let store = MetadataStore::from_json(json).unwrap();

        let g = Generator::new(
            store.clone(),
            TemplateSet::builtin(),
            GenerateOptions::default().with_timestamp(TS),
        );
        let err = assert_err!(g.render_hdl("7400", Language::Verilog));
        assert!(matches!(err, GenerateError::Metadata(_)));
        assert!(err.to_string().contains("clashes with a default power pin"));
        assert!(g.render_testbench("7400", Language::Verilog).is_err());

        // The clash depends on the configured supplies, not on the record alone.
        let mut options = GenerateOptions::default().with_timestamp(TS);
        options.defaults.power_pins = vec!["VDD".to_string(), "VSS".to_string()];
        let g = Generator::new(store, TemplateSet::builtin(), options);
        let r = assert_ok!(g.render_hdl("7400", Language::Verilog));
        assert_eq!(r.content.matches("input wire GND").count(), 1);
    }

    #[test]
    fn test_generate_hdl_writes_render() {
        let dir = temp_dir();
        let g = builtin();
        let file = assert_ok!(g.generate_hdl("7404", Language::Vhdl, dir.path()));
        assert_eq!(file.path, dir.path().join("IC_7404.vhd"));

        let written = std::fs::read_to_string(&file.path).unwrap();
        assert_eq!(written.len(), file.bytes);
        assert_eq!(written, g.render_hdl("7404", Language::Vhdl).unwrap().content);
    }

    #[test]
    fn test_generate_testbench() {
        let dir = temp_dir();
        let g = builtin();
        let file = assert_ok!(g.generate_testbench("555", Language::Verilog, dir.path()));
        assert_eq!(file.path, dir.path().join("tb_555.v"));
        assert_eq!(file.kind, TemplateKind::Testbench);
        assert_eq!(file.template.kind, MatchKind::Generic);
    }

    #[test]
    fn test_batch_records_failures_and_continues() {
        let dir = temp_dir();
        let g = sample(false);
        let report = g.generate_all(Language::Verilog, dir.path(), None);

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());
        let failed: Vec<_> = report.failures.iter().map(|f| f.part_number.as_str()).collect();
        assert_eq!(failed, vec!["7404", "9999"]);
        assert!(dir.path().join("IC_7400.v").is_file());
    }

    #[test]
    fn test_batch_with_testbenches() {
        let hdl = temp_dir();
        let tb = temp_dir();
        let g = sample(true);
        let report = g.generate_all(Language::Verilog, hdl.path(), Some(tb.path()));

        assert!(report.is_success());
        assert_eq!(report.succeeded(), 6);
        assert!(hdl.path().join("IC_9999.v").is_file());
        assert!(tb.path().join("tb_7404.v").is_file());
    }

    #[test]
    fn test_testbench_all_builtin() {
        let dir = temp_dir();
        let g = builtin();
        let report = g.testbench_all(Language::Vhdl, dir.path());
        assert!(report.is_success(), "{:?}", report.failures);
        assert_eq!(report.succeeded(), g.store().len());
    }

    #[test]
    fn test_support_matrix() {
        let rows = sample(false).support_matrix();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].verilog.as_ref().map(|r| r.kind), Some(MatchKind::Exact));
        assert!(rows[1].verilog.is_none());
        assert!(rows[0].vhdl.is_none());
        assert!(rows[2].verilog_testbench.is_some());
        assert!(rows[2].vhdl_testbench.is_none());

        let rows = sample(true).support_matrix();
        assert_eq!(rows[1].module(Language::Verilog), Some(&Resolution::fallback()));
    }

    #[test]
    fn test_check_reports_similar_names() {
        let g = builtin();
        assert!(g.check().iter().filter(|c| c.language == Language::Verilog).all(|c| c.exact));

        let g = sample(false);
        let checks = g.check();
        assert_eq!(checks.len(), 6);
        let nand = checks
            .iter()
            .find(|c| c.part_number == "7400" && c.language == Language::Verilog)
            .unwrap();
        assert!(nand.exact);
        assert!(nand.similar.is_empty());

        let inverter = checks
            .iter()
            .find(|c| c.part_number == "7404" && c.language == Language::Verilog)
            .unwrap();
        assert!(!inverter.exact);
        assert!(inverter.resolved.is_none());
    }

    #[test]
    fn test_template_usage() {
        let usage = builtin().template_usage();
        let nand = usage
            .iter()
            .find(|u| u.path == "hdl_templates/verilog/combinational/basic_gates/nand_quad.vtpl")
            .unwrap();
        assert_eq!(nand.parts, vec!["7400"]);

        let generic_tb = usage
            .iter()
            .find(|u| u.path == "testbench_templates/verilog/generic_tb.vtpl")
            .unwrap();
        assert!(generic_tb.parts.contains(&"555".to_string()));
    }
}
