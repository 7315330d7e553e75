//! Writing completion scripts to disk
//!
//! Scripts go either to an explicit path, to `_<program>` in the current
//! directory, or to a directory found on zsh's `$fpath`.

use crate::error::{CompletionError, CompletionResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;
use tracing::{debug, info};

/// File name zsh expects for a program's completion function
pub fn script_file_name(program: &str) -> String {
    format!("_{}", program)
}

/// Write `script` to `dest`, or to `./_<program>` when no destination is given.
///
/// Missing parent directories are created and an existing file is replaced.
pub fn write_script(script: &str, dest: Option<&Path>, program: &str) -> CompletionResult<PathBuf> {
    let path = match dest {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(script_file_name(program)),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            debug!("Creating directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|source| CompletionError::Write {
                path: path.clone(),
                source,
            })?;
        }
    }

    fs::write(&path, script).map_err(|source| CompletionError::Write {
        path: path.clone(),
        source,
    })?;

    info!("zsh autocompletion script written to: \"{}\"", path.display());
    Ok(path)
}

/// Ask zsh for its `$fpath` entries
pub fn query_fpath() -> CompletionResult<Vec<PathBuf>> {
    let output = StdCommand::new("zsh")
        .args(["-c", "print -rl -- $fpath"])
        .output()
        .map_err(|e| CompletionError::FpathQuery(e.to_string()))?;

    if !output.status.success() {
        return Err(CompletionError::FpathQuery(format!(
            "zsh exited with {:?}",
            output.status.code()
        )));
    }

    Ok(parse_fpath(&String::from_utf8_lossy(&output.stdout)))
}

/// One `$fpath` entry per line; entries may contain spaces
fn parse_fpath(listing: &str) -> Vec<PathBuf> {
    listing
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Pick the directory to install a completion script into.
///
/// Prefers an existing entry named `Unix` (zsh's generic completions
/// directory), then the first existing entry. Nothing existing is an error.
pub fn select_completion_dir(fpath: &[PathBuf]) -> CompletionResult<PathBuf> {
    let existing: Vec<&PathBuf> = fpath.iter().filter(|p| p.is_dir()).collect();

    let unix = existing.iter().find(|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n == "Unix" || n == "unix")
            .unwrap_or(false)
    });

    unix.or_else(|| existing.first())
        .map(|p| p.to_path_buf())
        .ok_or(CompletionError::NoCompletionDir)
}

/// Locate the zsh completion directory on this machine
pub fn completion_dir() -> CompletionResult<PathBuf> {
    let fpath = query_fpath()?;
    debug!("zsh $fpath: {:?}", fpath);
    select_completion_dir(&fpath)
}

/// Install `script` as `_<program>` in the zsh completion directory
pub fn install(script: &str, program: &str) -> CompletionResult<PathBuf> {
    let dir = completion_dir()?;
    write_script(script, Some(&dir.join(script_file_name(program))), program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_fpath_keeps_spaces() {
        let listing = "/usr/share/zsh/functions/Unix\n/Users/me/Application Support/zsh\n\n";
        assert_eq!(
            parse_fpath(listing),
            vec![
                PathBuf::from("/usr/share/zsh/functions/Unix"),
                PathBuf::from("/Users/me/Application Support/zsh"),
            ]
        );
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("a/b/_tool");

        let written = write_script("#compdef tool\n", Some(&dest), "tool").unwrap();
        assert_eq!(written, dest);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "#compdef tool\n");
    }

    #[test]
    fn test_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("_tool");
        fs::write(&dest, "old").unwrap();

        write_script("new", Some(&dest), "tool").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_write_into_a_file_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = write_script("x", Some(&blocker.join("_tool")), "tool");
        assert!(matches!(result, Err(CompletionError::Write { .. })));
    }

    #[test]
    fn test_select_prefers_unix_dir() {
        let temp_dir = TempDir::new().unwrap();
        let site = temp_dir.path().join("site-functions");
        let unix = temp_dir.path().join("Completion/Unix");
        fs::create_dir_all(&site).unwrap();
        fs::create_dir_all(&unix).unwrap();

        let fpath = vec![temp_dir.path().join("missing"), site, unix.clone()];
        assert_eq!(select_completion_dir(&fpath).unwrap(), unix);
    }

    #[test]
    fn test_select_falls_back_to_first_existing() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first");
        let second = temp_dir.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();

        let fpath = vec![temp_dir.path().join("Unix"), first.clone(), second];
        assert_eq!(select_completion_dir(&fpath).unwrap(), first);
    }

    #[test]
    fn test_select_without_existing_dirs_fails() {
        let temp_dir = TempDir::new().unwrap();
        let fpath = vec![temp_dir.path().join("nope"), temp_dir.path().join("Unix")];
        assert!(matches!(
            select_completion_dir(&fpath),
            Err(CompletionError::NoCompletionDir)
        ));
        assert!(matches!(
            select_completion_dir(&[]),
            Err(CompletionError::NoCompletionDir)
        ));
    }

    #[test]
    fn test_script_file_name() {
        assert_eq!(script_file_name("mytool"), "_mytool");
    }
}
