use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn dupescan(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dupescan"))
        .args(args)
        .arg("--no-progress")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_binary_prints_groups() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::write(dir.path().join("b.txt"), "hello").unwrap();
    fs::write(dir.path().join("c.txt"), "world").unwrap();

    let output = dupescan(&["-q", "--path", dir.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("[\n    [\n        \""));

    let groups: Vec<Vec<String>> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(groups.len(), 1);
    assert!(groups[0][0].ends_with("a.txt"));
    assert!(groups[0][1].ends_with("b.txt"));
}

#[test]
fn test_binary_no_duplicates_prints_empty_list() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), "alone").unwrap();

    let output = dupescan(&["-q", "-p", dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "[]\n");
}

#[test]
fn test_binary_detailed_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x"), "same").unwrap();
    fs::write(dir.path().join("y"), "same").unwrap();

    let output = dupescan(&[
        "-q",
        "-p",
        dir.path().to_str().unwrap(),
        "-o",
        "detailed",
        "-s",
        "compare",
    ]);
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["duplicates"][0]["size"], 4);
    assert_eq!(parsed["summary"]["strategy"], "compare");
    assert_eq!(parsed["summary"]["duplicate_groups"], 1);
}

#[test]
fn test_binary_path_not_found() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let output = dupescan(&["-q", "-p", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path not found"));
}

#[test]
fn test_binary_missing_path_argument() {
    let output = dupescan(&["-q"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path not found"));
}

#[test]
fn test_binary_path_is_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, "x").unwrap();

    let output = dupescan(&["-q", "-p", file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path not found"));
}

#[test]
fn test_binary_json_errors() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let output = dupescan(&["-q", "--json-errors", "-p", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));

    let report: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["code"], "DS002");
    assert_eq!(report["exit_code"], 2);
    assert!(report["message"].as_str().unwrap().contains("Path not found"));
}

#[test]
fn test_binary_missing_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("absent.toml");

    let output = dupescan(&[
        "-q",
        "-p",
        dir.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Config file not found"));
}

#[test]
fn test_binary_print_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "strategy = \"compare\"\n").unwrap();

    let output = dupescan(&[
        "--print-config",
        "--config",
        config.to_str().unwrap(),
        "--io-threads",
        "3",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("strategy = \"compare\""));
    assert!(stdout.contains("io_threads = 3"));
}

#[test]
fn test_binary_path_not_found_with_broken_environment() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let output = Command::new(env!("CARGO_BIN_EXE_dupescan"))
        .args(["-q", "--no-progress", "-p", missing.to_str().unwrap()])
        .env("DUPESCAN_IO_THREADS", "abc")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path not found"));
}

#[test]
fn test_binary_broken_environment_reported_once() {
    let dir = tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dupescan"))
        .args(["-q", "--no-progress", "-p", dir.path().to_str().unwrap()])
        .env("DUPESCAN_IO_THREADS", "abc")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Invalid configuration").count(), 1);
    assert_eq!(stderr.matches("abc").count(), 1);
}
