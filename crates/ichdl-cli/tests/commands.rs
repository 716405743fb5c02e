//! End-to-end runs of each command against the built-in catalog.

mod common;

use common::{json, OutputAssertions, TestContext, TIMESTAMP};
use predicates::prelude::*;

#[test]
fn test_list_shows_catalog() {
    let ctx = TestContext::new();
    let output = ctx.command().arg("list").output().unwrap();

    output.assert_success();
    output.assert_stdout_contains("Quad 2-Input NAND Gate");
    output.assert_stdout_contains("nand_quad");
    output.assert_stdout_contains("20 parts (built-in catalog)");
}

#[test]
fn test_list_filter_glob() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["list", "--filter", "40*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4017"))
        .stdout(predicate::str::contains("7400").not());
}

#[test]
fn test_list_json() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["list", "--category", "counter", "--format", "json"])
        .output()
        .unwrap();

    output.assert_success();
    let parts = json::parse(&output.stdout);
    let numbers: Vec<_> = parts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["part_number"].as_str().unwrap().to_string())
        .collect();
    assert!(numbers.contains(&"4017".to_string()));
    assert!(parts.as_array().unwrap().iter().all(|p| p["category"] == "counter"));
}

#[test]
fn test_list_supported_table() {
    let ctx = TestContext::new();
    let output = ctx.command().arg("list-supported").output().unwrap();

    output.assert_success();
    output.assert_stdout_contains("Verilog TB");
    output.assert_stdout_contains("exact");
    output.assert_stdout_contains("20 parts; exact templates:");
}

#[test]
fn test_list_supported_markdown() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["list-supported", "--markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Part"))
        .stdout(predicate::str::contains("| :---"));
}

#[test]
fn test_list_supported_json() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["--format", "json", "list-supported"])
        .output()
        .unwrap();

    output.assert_success();
    let rows = json::parse(&output.stdout);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 20);

    let nand = rows.iter().find(|r| r["part_number"] == "7400").unwrap();
    assert_eq!(nand["verilog"]["match"], "exact");
    assert_eq!(nand["verilog_testbench"]["match"], "exact");
}

#[test]
fn test_generate_writes_default_dir() {
    let ctx = TestContext::new();
    let output = ctx.command().args(["generate", "7400"]).output().unwrap();

    output.assert_success();
    output.assert_stdout_contains("IC_7400.v");
    let verilog = ctx.read("generated_verilog/IC_7400.v");
    assert!(verilog.contains("module IC_7400 ("));
    assert!(verilog.contains("assign Y1 = ~(A1 & B1);"));
}

#[test]
fn test_generate_vhdl_to_output_dir() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["generate", "74138", "--language", "vhdl", "--output-dir", "rtl"])
        .assert()
        .success();

    let vhdl = ctx.read("rtl/IC_74138.vhd");
    assert!(vhdl.contains("entity IC_74138 is"));
    assert!(!ctx.join("generated_vhdl").exists());
}

#[test]
fn test_stdout_matches_written_file() {
    let ctx = TestContext::new();
    let printed = ctx
        .command()
        .args(["generate", "7474", "--stdout", "--timestamp", TIMESTAMP])
        .output()
        .unwrap();
    printed.assert_success();

    ctx.command()
        .args(["generate", "7474", "--timestamp", TIMESTAMP])
        .assert()
        .success();

    let written = ctx.read("generated_verilog/IC_7474.v");
    assert_eq!(printed.stdout_text(), written);
    assert!(written.contains(TIMESTAMP));
}

#[test]
fn test_stdout_json_carries_template() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["generate", "555", "-l", "vhdl", "--stdout", "--format", "json"])
        .output()
        .unwrap();

    output.assert_success();
    let rendered = json::parse(&output.stdout);
    assert_eq!(rendered["file_name"], "IC_555.vhd");
    assert_eq!(
        rendered["template"]["path"],
        "hdl_templates/vhdl/special_analog/timer_555_behavioral.vhdltpl"
    );
    assert_eq!(rendered["template"]["match"], "exact");
    assert!(rendered["content"].as_str().unwrap().contains("OUTPUT <= q;"));
}

#[test]
fn test_testbench_writes_testbench_dir() {
    let ctx = TestContext::new();
    ctx.command().args(["testbench", "7400"]).assert().success();

    let tb = ctx.read("generated_testbenches/tb_7400.v");
    assert!(tb.contains("PASS: tb_7400"));
}

#[test]
fn test_generate_all_with_testbenches() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["generate-all", "-l", "vhdl", "--testbenches"])
        .output()
        .unwrap();

    output.assert_success();
    output.assert_stdout_contains("40 files generated, 0 failed");
    assert!(ctx.join("generated_vhdl/IC_4017.vhd").is_file());
    assert!(ctx.join("generated_testbenches/tb_4017.vhd").is_file());
}

#[test]
fn test_generate_all_json_report() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["generate-all", "--output-dir", "out", "--format", "json"])
        .output()
        .unwrap();

    output.assert_success();
    let report = json::parse(&output.stdout);
    assert_eq!(report["language"], "verilog");
    assert_eq!(report["generated"].as_array().unwrap().len(), 20);
    assert!(report["failures"].as_array().unwrap().is_empty());
}

#[test]
fn test_testbench_all() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["testbench-all", "--output-dir", "tb"])
        .output()
        .unwrap();

    output.assert_success();
    output.assert_stdout_contains("20 testbenches generated, 0 failed");
    assert!(ctx.join("tb/tb_74245.v").is_file());
}

#[test]
fn test_quiet_suppresses_progress() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["-q", "generate-all"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(ctx.join("generated_verilog/IC_555.v").is_file());
}

#[test]
fn test_templates_lists_usage() {
    let ctx = TestContext::new();
    let output = ctx.command().args(["templates", "-l", "vhdl"]).output().unwrap();

    output.assert_success();
    output.assert_stdout_contains("hdl_templates/vhdl/generic.vhdltpl");
    output.assert_stdout_contains("built-in templates");
    assert!(!output.stdout_text().contains(".vtpl"));
}

#[test]
fn test_doctor_passes_on_builtin() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Metadata:  built-in catalog (20 parts)"));
}

#[test]
fn test_doctor_strict_passes_on_builtin() {
    let ctx = TestContext::new();
    ctx.command().args(["doctor", "--strict"]).assert().success();
}

#[test]
fn test_list_supported_counts_exact_matches() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("list-supported")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "20 parts; exact templates: 20 Verilog, 20 VHDL",
        ));
}

#[test]
fn test_completions() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ic-hdl-gen"));
}

#[test]
fn test_config_default_language_and_dirs() {
    let ctx = TestContext::new().with_config(
        "output:\n  vhdl_dir: hdl/vhdl\ngeneration:\n  default_language: vhdl\n  timestamp: fixed-stamp\n",
    );
    ctx.command().args(["generate", "7400"]).assert().success();

    let vhdl = ctx.read("hdl/vhdl/IC_7400.vhd");
    assert!(vhdl.contains("fixed-stamp"));
}

#[test]
fn test_timestamp_flag_overrides_config() {
    let ctx = TestContext::new().with_config("generation:\n  timestamp: from-config\n");
    let output = ctx
        .command()
        .args(["generate", "7400", "--stdout", "--timestamp", "from-flag"])
        .output()
        .unwrap();

    output.assert_success();
    output.assert_stdout_contains("from-flag");
    assert!(!output.stdout_text().contains("from-config"));
}

#[test]
fn test_explicit_config_path() {
    let ctx = TestContext::new();
    ichdl_test_utils::write_file(ctx.path(), "conf/ichdl.yaml", "output:\n  verilog_dir: out\n");
    ctx.command()
        .args(["--config", "conf/ichdl.yaml", "generate", "7404"])
        .assert()
        .success();

    // Relative to the config file's directory.
    assert!(ctx.join("conf/out/IC_7404.v").is_file());
}

#[test]
fn test_master_metadata_in_project_dir() {
    let ctx = TestContext::new();
    ichdl_test_utils::write_file(
        ctx.path(),
        "Ic_Metadata_Master.json",
        ichdl_test_utils::fixtures::SAMPLE_METADATA,
    );
    ctx.command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mystery Chip"))
        .stdout(predicate::str::contains("3 parts"));
}
