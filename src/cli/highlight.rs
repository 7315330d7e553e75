//! Help text highlighting
//!
//! Colors reStructuredText-style inline markup in help strings:
//! ``` ``literal`` ``` in bold, `` `interpreted` `` in cyan and `*emphasis*`
//! in italics. Markup characters are kept so uncolored output reads the same.

use colored::Colorize;
use regex::{Captures, Regex};

/// Highlight inline markup in `text`. Returns the text unchanged when `enabled` is false.
pub fn highlight_help(text: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }

    // Alternation order matters: double backticks before single ones.
    let re = Regex::new(r"``[^`]+``|`[^`]+`|\*[^*\s][^*]*\*").unwrap();

    re.replace_all(text, |caps: &Captures| {
        let token = &caps[0];
        if token.starts_with("``") {
            token.bold().to_string()
        } else if token.starts_with('`') {
            token.cyan().to_string()
        } else {
            token.italic().to_string()
        }
    })
    .to_string()
}

/// Remove ANSI escape sequences from `text`
pub fn strip_ansi(text: &str) -> String {
    let re = Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").unwrap();
    re.replace_all(text, "").to_string()
}
