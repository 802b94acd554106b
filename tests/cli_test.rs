//! Command-line tests for the fortran-linter binary

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const CLEAN: &str = "program main\n  x = 1\nend program main\n";
const DIRTY: &str = "x=1\ny=2\n";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_clean_file_succeeds() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "clean.f90", CLEAN);

    cargo_bin_cmd!("fortran-linter")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_dirty_file_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "dirty.f90", "do i=1,10\nend do\n");

    cargo_bin_cmd!("fortran-linter")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("dirty.f90:1:4:"))
        .stdout(predicate::str::contains("Warning: Missing spaces at (1)."));

    // Diagnostics mode leaves the file alone
    assert_eq!(fs::read_to_string(&file).unwrap(), "do i=1,10\nend do\n");
}

#[test]
fn test_stdout_prints_corrected_text() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "dirty.f90", DIRTY);

    cargo_bin_cmd!("fortran-linter")
        .arg("--stdout")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::diff("x = 1\ny = 2\n"));
}

#[test]
fn test_inplace_keeps_original() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "dirty.f90", DIRTY);

    cargo_bin_cmd!("fortran-linter")
        .arg("-i")
        .arg(&file)
        .assert()
        .code(1);

    assert_eq!(fs::read_to_string(&file).unwrap(), "x = 1\ny = 2\n");
    let backup = dir.path().join("dirty.f90.orig");
    assert_eq!(fs::read_to_string(backup).unwrap(), DIRTY);
}

#[test]
fn test_missing_path_fails() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("fortran-linter")
        .arg(dir.path().join("missing.f90"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn test_unreadable_file_exits_with_two() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.f90");
    fs::write(&bad, [0xff_u8, 0xfe]).unwrap();
    let good = write_file(&dir, "good.f90", "x=1\n");

    cargo_bin_cmd!("fortran-linter")
        .arg(&bad)
        .arg(&good)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error checking"))
        .stdout(predicate::str::contains("good.f90:1:2:"))
        .stdout(predicate::str::contains("Warning: Missing space after \"=\" at (1)."));
}

#[test]
fn test_directory_walk_only_checks_fortran_files() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.f90", "x=1\n");
    write_file(&dir, "notes.txt", "x=1\n");

    cargo_bin_cmd!("fortran-linter")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.f90:1:2:"))
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn test_exclude_pattern() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.f90", "x=1\n");
    write_file(&dir, "b.f90", CLEAN);

    cargo_bin_cmd!("fortran-linter")
        .args(["--exclude", "a.f90"])
        .arg(dir.path())
        .assert()
        .success();
}

#[test]
fn test_max_errors_limits_output() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "dirty.f90", DIRTY);

    cargo_bin_cmd!("fortran-linter")
        .args(["--max-errors", "1"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::function(|out: &str| {
            out.matches("Warning:").count() == 1
        }));
}

#[test]
fn test_linelength_option() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "long.f90", "call some_routine(alpha, beta)\n");

    cargo_bin_cmd!("fortran-linter")
        .args(["--linelength", "20"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Line length > 20 characters"));
}

#[test]
fn test_config_file_is_used() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "lint.toml", "indent_unit = 4\n");
    let file = write_file(&dir, "loop.f90", "do i = 1, 3\nx = i\nend do\n");

    cargo_bin_cmd!("fortran-linter")
        .arg("--stdout")
        .arg("--config")
        .arg(&config)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("do i = 1, 3\n    x = i\nend do\n"));
}

#[test]
fn test_modes_conflict() {
    cargo_bin_cmd!("fortran-linter")
        .args(["-i", "--stdout", "a.f90"])
        .assert()
        .failure();
}
