use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DEFINITION: &str = "\
inherited frmBUYTYP: TfrmBUYTYP
  Caption = 'Buy Type'
  Width = 600
  object pnlMain: TPanel
    object lblFund: TLabel
      Caption = 'Fund'
    end
    object FundID: TMFWFndAliasLookup
      Caption = 'Fund'
      Required = True
    end
    object Qty: TSpinEdit
      Caption = 'Quantity'
    end
  end
end
";

const METADATA: &str = "\
[fields]
FundID|lookup|true|Fndmas
[validations]
Qty|greater_than|0|Quantity must be positive
[entities]
Fndmas|fund|/api/fndmas|fund,acnam1
";

/// Helper to get the form-forge binary command, isolated from any user
/// configuration or API key.
#[allow(deprecated)]
fn form_forge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("form-forge").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("FORM_FORGE_CONFIG")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR");
    cmd
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("buytyp.dfm"), DEFINITION).unwrap();
    fs::write(dir.path().join("buytyp.info"), METADATA).unwrap();
    dir
}

// ---------------------------------------------------------------------------
// Help and version tests
// ---------------------------------------------------------------------------

#[test]
fn help_exits_zero() {
    let dir = TempDir::new().unwrap();
    form_forge(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert legacy form definitions"));
}

#[test]
fn version_exits_zero() {
    let dir = TempDir::new().unwrap();
    form_forge(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("form-forge"));
}

#[test]
fn convert_help() {
    let dir = TempDir::new().unwrap();
    form_forge(dir.path())
        .args(["convert", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--metadata"))
        .stdout(predicate::str::contains("--form-id"));
}

// ---------------------------------------------------------------------------
// convert
// ---------------------------------------------------------------------------

#[test]
fn convert_prints_document() {
    let dir = workspace();
    let output = form_forge(dir.path())
        .args(["convert", "buytyp.dfm", "--metadata", "buytyp.info"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["id"], "FRMBUYTYP");
    assert_eq!(doc["label"], "BUY TYPE");
    assert_eq!(doc["formWidth"], "600px");
    assert_eq!(doc["layout"], "PROCESS");
    assert_eq!(doc["actions"][0]["methodToInvoke"], "ExecuteFRMBUYTYP");

    let fields = doc["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["id"], "FundID");
    assert_eq!(fields[0]["type"], "GRIDLKP");
    assert_eq!(fields[0]["entity"], "Fndmas");
    assert_eq!(fields[1]["id"], "Qty");
    assert_eq!(fields[1]["type"], "NUMERIC");

    let validations = doc["validations"].as_array().unwrap();
    assert_eq!(validations.len(), 2);
    assert_eq!(validations[0]["id"], "1");
    assert_eq!(validations[0]["message"], "FUND is required");
    assert_eq!(validations[1]["id"], "2");
    assert_eq!(
        validations[1]["condExpression"]["conditions"][0]["operator"],
        "GT"
    );
}

#[test]
fn convert_without_metadata_uses_form_id_fallback() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("loose.dfm"),
        "object edtName: TEdit\n  Caption = 'Name'\nend\n",
    )
    .unwrap();
    let output = form_forge(dir.path())
        .args(["convert", "loose.dfm", "--form-id", "custmas"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["id"], "CUSTMAS");
    assert_eq!(doc["fields"][0]["label"], "NAME");
    assert!(doc["validations"].as_array().unwrap().is_empty());
}

#[test]
fn convert_writes_compact_output_file() {
    let dir = workspace();
    form_forge(dir.path())
        .args([
            "convert",
            "buytyp.dfm",
            "-m",
            "buytyp.info",
            "-o",
            "out.json",
            "--compact",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert_eq!(written.lines().count(), 1);
    let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(doc["id"], "FRMBUYTYP");
}

#[test]
fn convert_json_format_reports_summary() {
    let dir = workspace();
    let output = form_forge(dir.path())
        .args([
            "--format",
            "json",
            "convert",
            "buytyp.dfm",
            "-m",
            "buytyp.info",
            "-o",
            "out.json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["form"], "FRMBUYTYP");
    assert_eq!(summary["report"]["componentsFound"], 4);
    assert_eq!(summary["report"]["fieldsGenerated"], 2);
    assert_eq!(summary["report"]["metadataShape"], "sectioned");
}

#[test]
fn convert_plain_format_prints_one_line_document() {
    let dir = workspace();
    let output = form_forge(dir.path())
        .args(["--format", "plain", "convert", "buytyp.dfm", "-m", "buytyp.info"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    let doc: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(doc["id"], "FRMBUYTYP");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("converted\tFRMBUYTYP\t2\t2\t4"), "{stderr}");
}

#[test]
fn convert_quiet_still_writes_document() {
    let dir = workspace();
    let output = form_forge(dir.path())
        .args(["-q", "convert", "buytyp.dfm", "-m", "buytyp.info"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["fields"].as_array().unwrap().len(), 2);
}

#[test]
fn convert_recovers_from_malformed_definition() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("broken.dfm"),
        "object edtA: TEdit\n  Required = True\n%%% garbage\nend\nend\n",
    )
    .unwrap();
    let output = form_forge(dir.path())
        .args(["convert", "broken.dfm", "--form-id", "BROKEN"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipped or repaired"));
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["fields"].as_array().unwrap().len(), 1);
}

#[test]
fn convert_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    form_forge(dir.path())
        .args(["convert", "missing.dfm"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.dfm"));
}

#[test]
fn convert_missing_file_json_error() {
    let dir = TempDir::new().unwrap();
    form_forge(dir.path())
        .args(["--format", "json", "convert", "missing.dfm"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"io_error\""));
}

#[test]
fn convert_rejects_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("latin1.dfm"), b"object a: TEdit\n  Caption = '\xe9'\nend\n").unwrap();
    form_forge(dir.path())
        .args(["convert", "latin1.dfm"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn convert_uses_config_form_id() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.dfm"), "object edtA: TEdit\nend\n").unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[convert]\nform_id = \"FROMCONFIG\"\n",
    )
    .unwrap();
    let output = form_forge(dir.path())
        .args(["convert", "a.dfm"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["id"], "FROMCONFIG");
}

#[test]
fn invalid_config_exits_with_usage_code() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.dfm"), "object edtA: TEdit\nend\n").unwrap();
    fs::write(dir.path().join("bad.toml"), "[convert\n").unwrap();
    form_forge(dir.path())
        .args(["--config", "bad.toml", "convert", "a.dfm"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("configuration error"));
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

#[test]
fn inspect_directory_lists_components() {
    let dir = workspace();
    form_forge(dir.path())
        .args(["inspect", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("FundID"))
        .stdout(predicate::str::contains("GRIDLKP"))
        .stdout(predicate::str::contains("form FRMBUYTYP"));
}

#[test]
fn inspect_json_with_metadata() {
    let dir = workspace();
    let output = form_forge(dir.path())
        .args(["--format", "json", "inspect", "buytyp.dfm", "-m", "buytyp.info"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["files"], 1);
    assert_eq!(summary["components"], 4);
    assert_eq!(summary["metadata"]["shape"], "sectioned");
    assert_eq!(summary["metadata"]["entities"], 1);
}

#[test]
fn inspect_diagnostics_show_source_context() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("open.dfm"), "object pnl: TPanel\n  Width = 3\n").unwrap();
    form_forge(dir.path())
        .args(["--no-color", "inspect", "open.dfm", "--diagnostics"])
        .assert()
        .success()
        .stderr(predicate::str::contains("never closed"));
}

#[test]
fn inspect_empty_directory_fails() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("forms")).unwrap();
    form_forge(dir.path())
        .args(["inspect", "forms"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no definition files"));
}

// ---------------------------------------------------------------------------
// ask
// ---------------------------------------------------------------------------

#[test]
fn ask_offline_answers_from_definition() {
    let dir = workspace();
    form_forge(dir.path())
        .args([
            "ask",
            "Which fields are on this form?",
            "--context",
            "buytyp.dfm",
            "-m",
            "buytyp.info",
            "--provider",
            "offline",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 field(s)"))
        .stdout(predicate::str::contains("FundID"));
}

#[test]
fn ask_without_key_falls_back_to_offline() {
    let dir = workspace();
    form_forge(dir.path())
        .args(["ask", "List the validation rules", "--context", "buytyp.dfm"])
        .assert()
        .success()
        .stderr(predicate::str::contains("OPENAI_API_KEY is not set"))
        .stdout(predicate::str::contains("validation rule(s)"));
}

#[test]
fn ask_unreachable_provider_still_exits_zero() {
    let dir = workspace();
    fs::write(
        dir.path().join("config.toml"),
        "[assistant]\nendpoint = \"http://127.0.0.1:9/v1/chat/completions\"\napi_key_env = \"FORM_FORGE_TEST_KEY\"\ntimeout_secs = 2\n",
    )
    .unwrap();
    form_forge(dir.path())
        .env("FORM_FORGE_TEST_KEY", "sk-test")
        .args(["ask", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assistant unavailable"));
}

#[test]
fn ask_without_question_requires_terminal() {
    let dir = TempDir::new().unwrap();
    form_forge(dir.path())
        .args(["ask", "--provider", "offline"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not interactive"));
}

// ---------------------------------------------------------------------------
// completions
// ---------------------------------------------------------------------------

#[test]
fn completions_bash() {
    let dir = TempDir::new().unwrap();
    form_forge(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("form-forge"));
}

#[test]
fn completions_unknown_shell_rejected() {
    let dir = TempDir::new().unwrap();
    form_forge(dir.path())
        .args(["completions", "tcsh"])
        .assert()
        .failure();
}
