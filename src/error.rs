//! Error types for supercli

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for supercli operations
pub type Result<T> = std::result::Result<T, SuperCliError>;

/// Main error type for supercli
#[derive(Error, Debug)]
pub enum SuperCliError {
    /// Completion generation and delivery errors
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// CLI definition file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging setup errors
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Argument parsing errors (including help/version display)
    #[error("{0}")]
    Clap(#[from] clap::Error),
}

/// Completion script generation errors
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Flag in {context} has no option strings")]
    EmptyAliases { context: String },

    #[error("Missing program name for completion script")]
    MissingProgramName,

    #[error("Invalid {kind} '{name}': only letters, digits and '-_.+' are allowed")]
    InvalidName { kind: &'static str, name: String },

    #[error("No completion renderer for shell '{0}' (supported: zsh)")]
    UnsupportedShell(String),

    #[error("No usable completion directory found on zsh $fpath")]
    NoCompletionDir,

    #[error("Failed to query zsh $fpath: {0}")]
    FpathQuery(String),

    #[error("Failed to write completion script '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// CLI definition parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find CLI definition file (searched: {0})")]
    NotFound(String),

    #[error("Invalid CLI definition: {0}")]
    Invalid(String),

    #[error("Flag in {0} declares no names")]
    EmptyFlagNames(String),

    #[error("Flag name '{0}' must start with '-'")]
    InvalidFlagName(String),
}

/// Specialized result type for completion operations
pub type CompletionResult<T> = std::result::Result<T, CompletionError>;

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
