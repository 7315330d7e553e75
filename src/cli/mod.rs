//! CLI interface and argument parsing
//!
//! This module handles the decorated argument parser, help highlighting,
//! and the `supercli` application itself.

pub mod app;
pub mod highlight;
pub mod parser;

// Re-export main types
pub use app::*;
pub use parser::*;
