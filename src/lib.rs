//! supercli - clap with colorized help, standard logging flags and zsh completions
//!
//! [`cli::ArgumentParser`] decorates a `clap::Command` with a standard set of
//! logging flags and a hidden `--gen-autocomp` flag. The [`completion`]
//! module snapshots any command into a [`completion::CommandTree`] and renders
//! it as a zsh `#compdef` script.

// Public modules
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, SuperCliError};

/// Current version of supercli
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
