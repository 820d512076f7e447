//! Integration tests for the FCC CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get an fcc command isolated from the user's config
fn fcc(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fcc").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("FCC_FORMAT")
        .env_remove("FCC_PRECISION")
        .env_remove("FCC_STRICT")
        .env("FCC_AUTHOR", "Test Author");
    cmd
}

/// Run a command that must succeed and parse its stdout as JSON
fn json_output(tmp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = fcc(tmp).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn close(value: &serde_json::Value, expected: f64) -> bool {
    value
        .as_f64()
        .map(|v| (v - expected).abs() <= 1e-9 * expected.abs().max(1.0))
        .unwrap_or(false)
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fuel Cell Calculator"))
        .stdout(predicate::str::contains("calc"))
        .stdout(predicate::str::contains("pem"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fcc"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .arg("electrolyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ============================================================================
// Calc
// ============================================================================

#[test]
fn test_calc_defaults_json() {
    let tmp = TempDir::new().unwrap();
    let json = json_output(&tmp, &["calc", "-f", "json"]);

    assert_eq!(json["fuel_cell_type"], "PEM");
    assert_eq!(json["number_of_cells"], 1);
    assert!(close(&json["results"]["current_density"], 0.1));
    assert!(close(&json["results"]["power_density"], 0.07));
    assert!(close(&json["results"]["electrical_efficiency"], 0.7 / 1.23));
    assert!(close(&json["results"]["total_power"], 7.0));
    assert!(close(&json["pem"]["metal_stack_height"], 25.7));
    assert!(close(&json["pem"]["carbon_stack_height"], 27.5));
    assert!(close(&json["pem"]["stack_base_area"], 125.0));
    assert_eq!(json["curve"].as_array().map(|c| c.len()), Some(11));
}

#[test]
fn test_calc_text_report() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .arg("calc")
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance"))
        .stdout(predicate::str::contains("Nernst voltage"))
        .stdout(predicate::str::contains("PEM Stack"))
        .stdout(predicate::str::contains("Performance Curve"))
        .stdout(predicate::str::contains("Peak power"));
}

#[test]
fn test_calc_no_curve() {
    let tmp = TempDir::new().unwrap();
    let json = json_output(&tmp, &["calc", "--no-curve", "-f", "json"]);
    assert!(json.get("curve").is_none());

    fcc(&tmp)
        .args(["calc", "--no-curve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance Curve").not());
}

#[test]
fn test_calc_precision() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["calc", "--precision", "1", "--no-curve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("125.0"))
        .stdout(predicate::str::contains("125.0000").not());
}

#[test]
fn test_calc_csv() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["calc", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("section,quantity,value,unit"))
        .stdout(predicate::str::contains("results,current_density,0.1,A/cm²"))
        .stdout(predicate::str::contains("pem,stack_base_area,125,cm²"));
}

#[test]
fn test_calc_zero_area_reports_non_finite() {
    let tmp = TempDir::new().unwrap();
    let output = fcc(&tmp)
        .args(["calc", "--area", "0", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["results"]["current_density"].is_null());
    assert!(json["results"]["total_power"].is_null());
    assert!(json["results"]["nernst_voltage"].is_number());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("current_density is not finite"));
    assert!(stderr.contains("--strict"));
}

#[test]
fn test_calc_zero_area_text_shows_markers() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["calc", "--area", "0", "--no-curve", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inf"))
        .stdout(predicate::str::contains("NaN"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_calc_strict_rejects_zero_area() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["calc", "--area", "0", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("active area must be positive"));
}

#[test]
fn test_strict_from_config() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["config", "set", "strict", "true"])
        .assert()
        .success();

    fcc(&tmp)
        .args(["calc", "--anode", "H2=0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hydrogen"));
}

#[test]
fn test_calc_sofc_has_no_pem_section() {
    let tmp = TempDir::new().unwrap();
    let json = json_output(&tmp, &["calc", "--type", "SOFC", "-f", "json"]);

    assert_eq!(json["fuel_cell_type"], "SOFC");
    assert!(json.get("pem").is_none());
    assert!(close(&json["results"]["total_power"], 7.0));
}

#[test]
fn test_calc_cells_scale_power() {
    let tmp = TempDir::new().unwrap();
    let json = json_output(&tmp, &["calc", "--cells", "40", "-f", "json"]);

    assert!(close(&json["results"]["total_power"], 280.0));
    assert!(close(&json["pem"]["metal_stack_height"], 40.0 * 0.7 + 25.0));
}

#[test]
fn test_calc_output_file() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["calc", "-f", "yaml", "-o", "report.yaml"])
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("report.yaml")).unwrap();
    assert!(content.contains("nernst_voltage"));
}

#[test]
fn test_calc_invalid_composition_argument() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["calc", "--anode", "H2:75"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--anode"));
}

// ============================================================================
// Curve
// ============================================================================

#[test]
fn test_curve_defaults_to_csv() {
    let tmp = TempDir::new().unwrap();
    let output = fcc(&tmp).arg("curve").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "voltage,current,power");
    // Last sample sits at the Nernst voltage with no current
    assert!(lines[11].ends_with(",0,0"));
}

#[test]
fn test_curve_json() {
    let tmp = TempDir::new().unwrap();
    let json = json_output(&tmp, &["curve", "-f", "json"]);
    let points = json.as_array().unwrap();

    assert_eq!(points.len(), 11);
    assert!(close(&points[0]["voltage"], 0.0));
    assert!(close(&points[0]["power"], 0.0));
}

// ============================================================================
// PEM
// ============================================================================

#[test]
fn test_pem_with_stack_power() {
    let tmp = TempDir::new().unwrap();
    let json = json_output(&tmp, &["pem", "--stack-power", "1000", "-f", "json"]);

    assert!(close(&json["stack_power"], 1000.0));
    assert!(json.get("results").is_none());
    assert!(close(
        &json["pem"]["metal_stack_power_density"],
        1000.0 / (2.57 * 1.25) / 1000.0
    ));
}

#[test]
fn test_pem_uses_scenario_power_by_default() {
    let tmp = TempDir::new().unwrap();
    let json = json_output(&tmp, &["pem", "-f", "json"]);

    assert!(close(&json["stack_power"], 7.0));
    assert!(json["results"].is_object());
}

#[test]
fn test_pem_strict_rejects_zero_percentage() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("flat.yaml"),
        "title: Flat\npem:\n  active_cell_percentage: 0\n",
    )
    .unwrap();

    fcc(&tmp)
        .args(["pem", "flat.yaml", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("active cell percentage"));
}

// ============================================================================
// New / Validate
// ============================================================================

#[test]
fn test_new_then_validate_and_calc() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["new", "hot.yaml", "--title", "Hot stack", "--cells", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(tmp.path().join("hot.yaml")).unwrap();
    assert!(content.contains("Hot stack"));
    assert!(content.contains("Test Author"));

    fcc(&tmp)
        .args(["validate", "hot.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All scenarios passed"));

    let json = json_output(&tmp, &["calc", "hot.yaml", "-f", "json"]);
    assert_eq!(json["title"], "Hot stack");
    assert_eq!(json["number_of_cells"], 5);
    assert!(close(&json["results"]["total_power"], 35.0));
}

#[test]
fn test_new_refuses_to_overwrite() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp).args(["new", "a.yaml"]).assert().success();
    fcc(&tmp)
        .args(["new", "a.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    fcc(&tmp)
        .args(["new", "a.yaml", "--force", "--type", "AFC"])
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("a.yaml")).unwrap();
    assert!(content.contains("AFC"));
}

#[test]
fn test_validate_reports_unknown_field() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("typo.yaml"),
        "title: Typo\nfuel_cell:\n  activ_area: 5\n",
    )
    .unwrap();

    fcc(&tmp)
        .args(["validate", "typo.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("activ_area"));
}

#[test]
fn test_validate_reports_degenerate_inputs() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("zero.yaml"),
        "title: Zero\nfuel_cell:\n  active_area: 0\n  anode_flow: 0\n",
    )
    .unwrap();

    fcc(&tmp)
        .args(["validate", "zero.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("active area must be positive"));

    fcc(&tmp)
        .args(["validate", "--syntax-only", "zero.yaml"])
        .assert()
        .success();
}

#[test]
fn test_calc_missing_scenario_file() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["calc", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));
}

// ============================================================================
// Config / Completions
// ============================================================================

#[test]
fn test_config_set_show_unset() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["config", "set", "precision", "2"])
        .assert()
        .success();
    assert!(tmp.path().join(".fcc/config.yaml").exists());

    fcc(&tmp)
        .args(["config", "show", "precision"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));

    fcc(&tmp)
        .args(["config", "unset", "precision"])
        .assert()
        .success();
    fcc(&tmp)
        .args(["config", "show", "precision"])
        .assert()
        .failure();
}

#[test]
fn test_config_rejects_unknown_key() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["config", "set", "editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration key"));
}

#[test]
fn test_config_default_format_applies() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["config", "set", "default_format", "json"])
        .assert()
        .success();

    let json = json_output(&tmp, &["calc", "--no-curve"]);
    assert!(json["results"].is_object());
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    fcc(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fcc"));
}
