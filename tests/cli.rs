//! Integration tests for the supercli binary

mod common;

use assert_cmd::Command;
use common::{create_test_definition, MYTOOL_YAML};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn supercli() -> Command {
    Command::cargo_bin("supercli").unwrap()
}

#[test]
fn test_generate_to_stdout() {
    let (_dir, path) = create_test_definition(MYTOOL_YAML);

    supercli()
        .args(["generate", "--stdout", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#compdef mytool"))
        .stdout(predicate::str::contains("subcmds=( add extract )"))
        .stdout(predicate::str::contains("_mytool \"$@\""));
}

#[test]
fn test_generate_discovers_definition_in_parent() {
    let (dir, _path) = create_test_definition(MYTOOL_YAML);
    let sub_dir = dir.path().join("nested");
    fs::create_dir(&sub_dir).unwrap();

    supercli()
        .current_dir(&sub_dir)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("_mytool"));

    let script = fs::read_to_string(sub_dir.join("_mytool")).unwrap();
    assert!(script.starts_with("#compdef mytool"));
}

#[test]
fn test_generate_to_output_path() {
    let (dir, path) = create_test_definition(MYTOOL_YAML);
    let dest = dir.path().join("site-functions/_mytool");

    supercli()
        .args(["generate", "-f"])
        .arg(&path)
        .arg("-o")
        .arg(&dest)
        .assert()
        .success();

    let script = fs::read_to_string(&dest).unwrap();
    assert!(script.contains("{-o,--output}'[Output dir]'"));
}

#[test]
fn test_generate_unsupported_shell_fails() {
    let (_dir, path) = create_test_definition(MYTOOL_YAML);

    supercli()
        .args(["generate", "--shell", "fish", "--stdout", "-f"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No completion renderer for shell 'fish'"));
}

#[test]
fn test_generate_missing_definition_fails() {
    let dir = TempDir::new().unwrap();

    supercli()
        .current_dir(dir.path())
        .args(["generate", "--stdout", "-f", "missing.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_generate_rejects_flag_without_names() {
    let (_dir, path) = create_test_definition("name: broken\nflags:\n  - names: []\n");

    supercli()
        .args(["generate", "--stdout", "-f"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("declares no names"));
}

#[test]
fn test_gen_autocomp_writes_own_script() {
    let dir = TempDir::new().unwrap();

    supercli()
        .current_dir(dir.path())
        .arg("--gen-autocomp")
        .assert()
        .success()
        .stdout(predicate::str::contains("_supercli"));

    let script = fs::read_to_string(dir.path().join("_supercli")).unwrap();
    assert!(script.starts_with("#compdef supercli"));
    assert!(script.contains("subcmds=( generate fpath )"));
}

#[test]
fn test_gen_autocomp_unknown_shell_fails() {
    let dir = TempDir::new().unwrap();

    supercli()
        .current_dir(dir.path())
        .args(["--gen-autocomp", "bash"])
        .assert()
        .failure()
        .code(1);

    assert!(!dir.path().join("_supercli").exists());
}

#[test]
fn test_gen_autocomp_mixed_shells_writes_nothing() {
    let dir = TempDir::new().unwrap();

    supercli()
        .current_dir(dir.path())
        .args(["--gen-autocomp", "zsh", "bash"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No completion renderer for shell 'bash'"));

    assert!(!dir.path().join("_supercli").exists());
}

#[test]
fn test_generate_unsupported_shell_checked_before_loading() {
    let dir = TempDir::new().unwrap();

    supercli()
        .current_dir(dir.path())
        .args(["generate", "--shell", "fish", "--stdout", "-f", "missing.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No completion renderer for shell 'fish'"));
}

#[test]
fn test_generate_rejects_subcommand_with_space() {
    let (_dir, path) = create_test_definition("name: mytool\ncommands:\n  - name: add files\n");

    supercli()
        .args(["generate", "--stdout", "-f"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("subcmds").not())
        .stderr(predicate::str::contains("'add files'"));
}

#[test]
fn test_help_hides_developer_flags() {
    supercli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--gen-autocomp").not());
}

#[test]
fn test_fullhelp_reveals_developer_flags() {
    supercli()
        .arg("--fullhelp")
        .assert()
        .success()
        .stdout(predicate::str::contains("--gen-autocomp"))
        .stdout(predicate::str::contains("--devlog"));
}

#[test]
fn test_logfile_receives_records() {
    let (dir, path) = create_test_definition(MYTOOL_YAML);
    let log = dir.path().join("logs/supercli.log");

    supercli()
        .args(["generate", "--stdout", "--silent", "-v", "-f"])
        .arg(&path)
        .arg("--logfile")
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Loaded CLI definition for 'mytool'"));
}
