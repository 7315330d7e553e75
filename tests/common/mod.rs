//! Common test utilities

#![allow(dead_code)]

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use supercli::completion::{Arity, CommandTree, Flag, Subcommand, ValueHint};
use tempfile::TempDir;

/// Definition of the archive tool used across tests
pub const MYTOOL_YAML: &str = r#"
name: mytool
about: Archive tool
commands:
  - name: add
    help: Add files
    flags:
      - names: ["-d", "--dirs"]
        help: Dirs to add
        arity: many
  - name: extract
    help: Extract files
    flags:
      - names: ["-o", "--output"]
        help: Output dir
"#;

/// Fixed header date so scripts compare byte for byte
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 9, 4).unwrap()
}

/// The archive tool built directly with the tree builder
pub fn mytool_tree() -> CommandTree {
    CommandTree::builder("mytool")
        .about("Archive tool")
        .subcommand(
            Subcommand::new("add", "Add files")
                .flag(Flag::new(["-d", "--dirs"], "Dirs to add").with_arity(Arity::Many)),
        )
        .subcommand(
            Subcommand::new("extract", "Extract files")
                .flag(Flag::new(["-o", "--output"], "Output dir").with_value_hint(ValueHint::Any)),
        )
        .build()
        .unwrap()
}

/// Create a temporary directory with a supercli.yml file
pub fn create_test_definition(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("supercli.yml");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

/// Lines of the `case` branch for `title`, up to its `;;`
pub fn branch_lines<'a>(script: &'a str, title: &str) -> Vec<&'a str> {
    let label = format!("({})", title);
    script
        .lines()
        .skip_while(|l| l.trim() != label)
        .skip(1)
        .take_while(|l| l.trim() != ";;")
        .collect()
}
