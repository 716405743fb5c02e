//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use ichdl_test_utils::fixtures::{write_metadata, SAMPLE_METADATA};
use ichdl_test_utils::{write_file, TemplateTree};
use tempfile::{tempdir, TempDir};

pub const TIMESTAMP: &str = "2024-01-01 00:00:00";

/// A project directory with a `.ichdl/` marker so config discovery stops here.
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(temp_dir.path().join(".ichdl")).expect("Failed to create .ichdl");
        Self { temp_dir }
    }

    /// Write `.ichdl/config.yaml`
    pub fn with_config(self, yaml: &str) -> Self {
        write_file(self.path(), ".ichdl/config.yaml", yaml);
        self
    }

    /// The three-part sample catalog with the minimal template tree, wired in
    /// through the config file.
    pub fn with_sample_catalog(self) -> Self {
        write_metadata(self.path(), SAMPLE_METADATA);
        TemplateTree::minimal().write(&self.path().join("templates"));
        self.with_config("paths:\n  metadata: ic_metadata.json\n  templates: templates\n")
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.join(relative))
            .unwrap_or_else(|e| panic!("cannot read {relative}: {e}"))
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("ic-hdl-gen").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("ICHDL_CONFIG")
            .env_remove("RUST_LOG")
            .env_remove("ICHDL_LOG_LEVEL")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert helpers for CLI output
pub trait OutputAssertions {
    fn assert_success(&self);
    fn assert_stdout_contains(&self, text: &str);
    fn assert_stderr_contains(&self, text: &str);
    fn assert_exit_code(&self, code: i32);
    fn stdout_text(&self) -> String;
    fn stderr_text(&self) -> String;
}

impl OutputAssertions for Output {
    fn assert_success(&self) {
        assert!(
            self.status.success(),
            "Command failed with status: {}\nstderr: {}",
            self.status,
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn assert_stdout_contains(&self, text: &str) {
        let stdout = self.stdout_text();
        assert!(
            stdout.contains(text),
            "stdout did not contain '{text}'\nstdout: {stdout}"
        );
    }

    fn assert_stderr_contains(&self, text: &str) {
        let stderr = self.stderr_text();
        assert!(
            stderr.contains(text),
            "stderr did not contain '{text}'\nstderr: {stderr}"
        );
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {code}, got {:?}\nstderr: {}",
            self.status.code(),
            self.stderr_text()
        );
    }

    fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// JSON output helpers
pub mod json {
    use serde_json::Value;

    pub fn parse(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap_or_else(|e| {
            panic!("invalid JSON ({e}):\n{}", String::from_utf8_lossy(bytes))
        })
    }
}
