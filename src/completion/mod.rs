//! Shell completion script generation
//!
//! This module snapshots a command's flags and subcommands into a
//! [`CommandTree`], renders it for a target shell, and writes the result.

pub mod output;
pub mod tree;
pub mod zsh;

// Re-export main types
pub use output::*;
pub use tree::*;
pub use zsh::*;

use crate::error::{CompletionError, CompletionResult};
use std::fmt;
use std::str::FromStr;

/// Shells a completion script can be requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Zsh,
    Bash,
    Fish,
}

impl Shell {
    /// Whether a renderer exists for this shell
    pub fn is_supported(self) -> bool {
        matches!(self, Shell::Zsh)
    }

    /// Fail with `UnsupportedShell` unless every shell in `shells` has a renderer
    pub fn ensure_supported(shells: &[Shell]) -> CompletionResult<()> {
        match shells.iter().find(|s| !s.is_supported()) {
            Some(shell) => Err(CompletionError::UnsupportedShell(shell.to_string())),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shell::Zsh => "zsh",
            Shell::Bash => "bash",
            Shell::Fish => "fish",
        };
        f.write_str(name)
    }
}

impl FromStr for Shell {
    type Err = CompletionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zsh" => Ok(Shell::Zsh),
            "bash" => Ok(Shell::Bash),
            "fish" => Ok(Shell::Fish),
            other => Err(CompletionError::UnsupportedShell(other.to_string())),
        }
    }
}

/// Render a completion script for `shell`, failing for shells without a renderer
pub fn generate(tree: &CommandTree, shell: Shell) -> CompletionResult<String> {
    match shell {
        Shell::Zsh => ZshGenerator::new(tree).generate(),
        Shell::Bash | Shell::Fish => Err(CompletionError::UnsupportedShell(shell.to_string())),
    }
}
