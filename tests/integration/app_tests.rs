use clap::Parser;
use dupfinder::cli::Cli;
use dupfinder::error::ExitCode;
use dupfinder::run_app_with_output;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Empty config file so the user's own configuration cannot leak in.
fn empty_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();
    path
}

fn run(args: &[&str]) -> (ExitCode, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let code = run_app_with_output(cli, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

fn saved_path(output: &str) -> PathBuf {
    let line = output
        .lines()
        .find(|l| l.starts_with("Saved "))
        .expect("no Saved line");
    let rest = line.strip_prefix("Saved 1 duplicate hits to ").unwrap();
    PathBuf::from(rest.strip_suffix('.').unwrap())
}

fn results_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy();
            name.starts_with("results_") && name.ends_with(".json")
        })
        .collect()
}

#[test]
fn test_save_json_announces_absolute_path() {
    let scan = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let config = empty_config(&out_dir);
    fs::write(scan.path().join("a"), b"twin").unwrap();
    fs::write(scan.path().join("b"), b"twin").unwrap();

    let (code, output) = run(&[
        "dupfinder",
        "--dir",
        scan.path().to_str().unwrap(),
        "--save-json",
        "--output-dir",
        out_dir.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(code, ExitCode::Success);
    let saved = saved_path(&output);
    assert!(saved.is_absolute());
    assert_eq!(results_files(out_dir.path()), vec![saved.clone()]);

    let content = fs::read_to_string(&saved).unwrap();
    assert!(content.contains(&scan.path().join("a").display().to_string()));
    assert!(!output.contains("Duplicated files found"));
    assert!(output.contains("It took "));
}

#[test]
fn test_save_json_without_duplicates_writes_nothing() {
    let scan = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let config = empty_config(&scan);
    fs::write(scan.path().join("solo"), b"unique").unwrap();

    let (_, output) = run(&[
        "dupfinder",
        "--dir",
        scan.path().to_str().unwrap(),
        "--save-json",
        "--output-dir",
        out_dir.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert!(!output.contains("Saved "));
    assert!(results_files(out_dir.path()).is_empty());
}

#[test]
fn test_save_json_defaults_to_working_directory() {
    let scan = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();
    let config = empty_config(&scan);
    fs::write(scan.path().join("x"), b"pair").unwrap();
    fs::write(scan.path().join("y"), b"pair").unwrap();

    let cli = Cli::try_parse_from([
        "dupfinder",
        "--dir",
        scan.path().to_str().unwrap(),
        "--save-json",
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(cwd.path()).unwrap();
    let mut out = Vec::new();
    let result = run_app_with_output(cli, &mut out);
    std::env::set_current_dir(previous).unwrap();
    result.unwrap();

    let saved = saved_path(&String::from_utf8(out).unwrap());
    assert!(saved.is_file());
    assert_eq!(
        saved.parent().unwrap().canonicalize().unwrap(),
        cwd.path().canonicalize().unwrap()
    );
}

#[test]
fn test_quiet_keeps_listing_and_drops_timing() {
    let scan = TempDir::new().unwrap();
    let config = empty_config(&scan);
    fs::write(scan.path().join("one"), b"dup").unwrap();
    fs::write(scan.path().join("two"), b"dup").unwrap();

    let (_, output) = run(&[
        "dupfinder",
        "--dir",
        scan.path().to_str().unwrap(),
        "--quiet",
        "--config",
        config.to_str().unwrap(),
    ]);

    let lines: Vec<&str> = output.lines().collect();
    // config.toml is a third, distinct file in the scanned tree.
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Duplicated files found with sha "));
    assert_eq!(lines[3], "Found a total of 1 duplicates!");
    assert!(!output.contains("It took "));
}

#[test]
fn test_console_listing_ends_with_timing() {
    let scan = TempDir::new().unwrap();
    let config = empty_config(&scan);

    let (_, output) = run(&[
        "dupfinder",
        "--dir",
        scan.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Found a total of 0 duplicates!");
    assert!(lines[1].starts_with("It took ") && lines[1].ends_with(" to find duplicates.."));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let scan = TempDir::new().unwrap();
    let missing = scan.path().join("no_such_config.toml");

    let cli = Cli::try_parse_from([
        "dupfinder",
        "--dir",
        scan.path().to_str().unwrap(),
        "--config",
        missing.to_str().unwrap(),
    ])
    .unwrap();
    let mut out = Vec::new();
    let err = run_app_with_output(cli, &mut out).unwrap_err();

    assert!(format!("{err:#}").contains("does not exist"));
    assert!(out.is_empty());
}
