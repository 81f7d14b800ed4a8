use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const CONTRACTS: &str = r#"
[[models]]
name = "resnet"
version = 1

[models.shape_modes]
data = "auto"

[[models.inputs]]
name = "data"
precision = "FP32"
shape = "(1,3,2,2)"
layout = "NCHW"

[[models]]
name = "strict"
version = 1

[[models.inputs]]
name = "data"
precision = "FP32"
shape = "(1,3,2,2)"
layout = "NCHW"
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("contracts.toml"), CONTRACTS).expect("write contracts");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn kfs_request(&self, file: &str, spatial: i64) -> PathBuf {
        let values = (3 * spatial * spatial) as usize;
        let body = serde_json::json!({
            "model_name": "resnet",
            "inputs": [{
                "name": "data",
                "datatype": "FP32",
                "shape": [1, 3, spatial, spatial],
                "contents": { "fp32_contents": vec![0.5f32; values] }
            }]
        });
        let path = self.path().join(file);
        fs::write(&path, body.to_string()).expect("write request");
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tensorgate"));
        cmd.current_dir(self.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd
    }
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run tensorgate command")
}

#[test]
fn cli_help_lists_commands() {
    let workspace = Workspace::new();
    let output = run(workspace.cmd().arg("--help"));
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: tensorgate"));
    assert!(stdout.contains("validate"));
    assert!(stdout.contains("contract"));
    assert!(stdout.contains("config"));
}

#[test]
fn first_run_writes_default_config() {
    let workspace = Workspace::new();
    let output = run(workspace.cmd().args(["contract", "check"]));
    assert!(output.status.success());
    assert!(workspace.path().join("tensorgate.toml").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 model version(s)"));
}

#[test]
fn contract_list_shows_models() {
    let workspace = Workspace::new();
    let output = run(workspace.cmd().args(["contract", "list"]));
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("NAME"));
    assert!(stdout.contains("resnet"));
    assert!(stdout.contains("strict"));
}

#[test]
fn contract_show_as_json() {
    let workspace = Workspace::new();
    let output = run(workspace
        .cmd()
        .args(["--format", "json", "contract", "show", "resnet"]));
    assert!(output.status.success());

    let entry: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entry["name"], "resnet");
    assert_eq!(entry["version"], 1);
    assert_eq!(entry["inputs"][0]["shape"], "(1,3,2,2)");
}

#[test]
fn validate_accepts_matching_request() {
    let workspace = Workspace::new();
    let request = workspace.kfs_request("ok.json", 2);
    let output = run(workspace
        .cmd()
        .args(["validate", "--request-format", "kfs"])
        .arg(&request));
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OK"));
    assert!(stdout.contains("1 request(s) accepted"));
}

#[test]
fn validate_reports_signals_and_stats_as_json() {
    let workspace = Workspace::new();
    let ok = workspace.kfs_request("ok.json", 2);
    let reshape = workspace.kfs_request("reshape.json", 4);
    let output = run(workspace
        .cmd()
        .args(["--format", "json", "validate", "--request-format", "kfs", "--stats"])
        .arg(&ok)
        .arg(&reshape));
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["reports"][0]["status"], "OK");
    assert_eq!(report["reports"][1]["status"], "RESHAPE_REQUIRED");
    assert_eq!(report["stats"]["total"], 2);
    assert_eq!(report["stats"]["signalled"], 1);
}

#[test]
fn validate_rejection_exits_with_client_error() {
    let workspace = Workspace::new();
    let request = workspace.kfs_request("big.json", 4);
    let output = run(workspace
        .cmd()
        .args(["validate", "--request-format", "kfs", "--model", "strict"])
        .arg(&request));
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("INVALID_SHAPE"));
    assert!(stdout.contains("Expected: (1,3,2,2); Actual: (1,3,4,4); input name: data"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid input shape"));
}

#[test]
fn missing_contract_file_fails() {
    let workspace = Workspace::new();
    let request = workspace.kfs_request("ok.json", 2);
    let output = run(workspace
        .cmd()
        .args(["validate", "--contracts", "absent.toml"])
        .arg(&request));
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read contract file"));
}
