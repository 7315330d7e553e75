//! CLI definition files
//!
//! This module handles parsing of supercli.yml files, which declare a
//! program's flags and subcommands for completion generation.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
