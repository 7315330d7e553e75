//! zsh completion script rendering
//!
//! Scripts are built from small fragments, each rendering one piece of the
//! `#compdef` function, and joined by [`ZshScript`].

use crate::completion::tree::{Arity, CommandShape, CommandTree, Flag, Subcommand, ValueHint};
use crate::error::{CompletionError, CompletionResult};
use chrono::{Local, NaiveDate};
use std::fmt;

/// Escape help text for use inside a single-quoted `_arguments` description.
///
/// Newlines collapse to spaces, backslashes and closing brackets are escaped
/// for `_arguments`, and single quotes close and reopen the quoted string.
pub fn escape_help(help: &str) -> String {
    let collapsed = help.replace("\r\n", " ").replace(['\n', '\r'], " ");
    let mut out = String::with_capacity(collapsed.len());

    for c in collapsed.trim().chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ']' => out.push_str("\\]"),
            '\'' => out.push_str("'\\''"),
            _ => out.push(c),
        }
    }

    out
}

/// Comment block at the top of every script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFragment<'a> {
    pub program: &'a str,
    pub about: Option<&'a str>,
    pub date: NaiveDate,
}

impl fmt::Display for HeaderFragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "#".repeat(80);
        let sep = format!("#{}", "_".repeat(79));
        writeln!(f, "#compdef {}", self.program)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "# Name :          _{}", self.program)?;
        writeln!(f, "# Created :       {}", self.date.format("%b %d %Y"))?;
        writeln!(f, "{}", sep)?;
        writeln!(
            f,
            "# Description :   zsh autocompletion script for command: \"{}\".",
            self.program
        )?;
        if let Some(about) = self.about {
            for line in about.lines().map(str::trim).filter(|l| !l.is_empty()) {
                writeln!(f, "#                 {}", line)?;
            }
        }
        writeln!(f, "#")?;
        writeln!(f, "#                 To enable autocompletion in zsh, add the following lines")?;
        writeln!(f, "#                 to your ~/.zshrc file:")?;
        writeln!(f, "#")?;
        writeln!(f, "#                      autoload -U compinit")?;
        writeln!(f, "#                      compinit")?;
        writeln!(f, "{}", sep)?;
        writeln!(f, "{}", rule)?;
        writeln!(f)
    }
}

/// One `_arguments` spec for a flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagFragment(String);

impl FlagFragment {
    /// Render a flag, rejecting flags with no option strings
    pub fn new(flag: &Flag, context: &str) -> CompletionResult<Self> {
        let (first, rest) = flag
            .aliases
            .split_first()
            .ok_or_else(|| CompletionError::EmptyAliases {
                context: context.to_string(),
            })?;

        let help = escape_help(&flag.help);
        let value = value_spec(flag);
        let repeat = flag.repeatable;

        let rendered = if rest.is_empty() {
            let star = if repeat { "*" } else { "" };
            format!("'{}{}[{}]{}'", star, first, help, value)
        } else {
            // The brace group sits outside the quotes, so the star is quoted alone.
            let star = if repeat { "'*'" } else { "" };
            format!(
                "{}{{{}}}'[{}]{}'",
                star,
                flag.aliases.join(","),
                help,
                value
            )
        };

        Ok(FlagFragment(rendered))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlagFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn value_spec(flag: &Flag) -> String {
    if !flag.arity.takes_value() {
        return String::new();
    }

    let name = flag
        .aliases
        .last()
        .map(|a| a.trim_start_matches('-'))
        .unwrap_or_default();
    let action = match flag.value_hint {
        ValueHint::Any => "",
        ValueHint::File => "_files",
        ValueHint::Directory => "_files -/",
    };

    match flag.arity {
        // Every following word up to the next option is a value
        Arity::Many => format!(":*:{}:{}", name, action),
        _ => format!(":{}:{}", name, action),
    }
}

/// A `case` branch completing one subcommand's flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchFragment<'a> {
    pub title: &'a str,
    pub flags: Vec<FlagFragment>,
}

impl<'a> BranchFragment<'a> {
    pub fn new(subcommand: &'a Subcommand) -> CompletionResult<Self> {
        let context = format!("sub-command '{}'", subcommand.title);
        let flags = subcommand
            .flags
            .iter()
            .map(|flag| FlagFragment::new(flag, &context))
            .collect::<CompletionResult<Vec<_>>>()?;

        Ok(BranchFragment {
            title: &subcommand.title,
            flags,
        })
    }
}

impl fmt::Display for BranchFragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    ({})", self.title)?;
        writeln!(f, "        _arguments -A \"-*\" \\")?;
        for flag in &self.flags {
            writeln!(f, "            {} \\", flag)?;
        }
        writeln!(f, "            ;;")
    }
}

/// A complete script, ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZshScript<'a> {
    header: HeaderFragment<'a>,
    root_flags: Vec<FlagFragment>,
    branches: Vec<BranchFragment<'a>>,
}

impl<'a> ZshScript<'a> {
    /// Render every fragment of `tree`
    pub fn new(tree: &'a CommandTree, date: NaiveDate) -> CompletionResult<Self> {
        let root_flags = tree
            .flags()
            .iter()
            .map(|flag| FlagFragment::new(flag, "root command"))
            .collect::<CompletionResult<Vec<_>>>()?;

        let branches = match tree.shape() {
            CommandShape::Leaf => Vec::new(),
            CommandShape::Dispatcher(subcommands) => subcommands
                .iter()
                .map(BranchFragment::new)
                .collect::<CompletionResult<Vec<_>>>()?,
        };

        Ok(ZshScript {
            header: HeaderFragment {
                program: tree.program(),
                about: tree.about(),
                date,
            },
            root_flags,
            branches,
        })
    }

    fn fmt_leaf(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.header.program;
        writeln!(f, "_{}() {{", program)?;
        writeln!(f, "    _arguments \\")?;
        writeln!(f, "        {{-h,--help}}'[show help information]' \\")?;
        for flag in &self.root_flags {
            writeln!(f, "        {} \\", flag)?;
        }
        writeln!(f, "        && return")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "_{} \"$@\"", program)
    }

    fn fmt_dispatcher(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.header.program;
        let titles: Vec<&str> = self.branches.iter().map(|b| b.title).collect();

        writeln!(f, "_{}() {{", program)?;
        writeln!(f, "    local context state line expl implementation")?;
        writeln!(f, "    local -a subcmds")?;
        writeln!(f)?;
        writeln!(f, "    subcmds=( {} )", titles.join(" "))?;
        writeln!(f)?;
        writeln!(f, "    _arguments -C \\")?;
        writeln!(f, "        {{-h,--help}}'[show help information]' \\")?;
        for flag in &self.root_flags {
            writeln!(f, "        {} \\", flag)?;
        }
        writeln!(f, "        '1:subcommand:compadd -a subcmds' \\")?;
        writeln!(f, "        '*:: :->subcmd' && return")?;
        writeln!(f)?;
        writeln!(f, "    service=\"$words[1]\"")?;
        writeln!(f, "    curcontext=\"${{curcontext%:*}}-$service:\"")?;
        writeln!(f)?;
        writeln!(f, "    case $service in")?;
        for branch in &self.branches {
            write!(f, "{}", branch)?;
        }
        writeln!(f, "    (*)")?;
        writeln!(f, "        _message \"unknown sub-command: $service\"")?;
        writeln!(f, "        ;;")?;
        writeln!(f, "    esac")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "_{} \"$@\"", program)
    }
}

impl fmt::Display for ZshScript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        if self.branches.is_empty() {
            self.fmt_leaf(f)
        } else {
            self.fmt_dispatcher(f)
        }
    }
}

/// Generates zsh completion scripts from a command tree
#[derive(Debug, Clone)]
pub struct ZshGenerator<'a> {
    tree: &'a CommandTree,
    date: Option<NaiveDate>,
}

impl<'a> ZshGenerator<'a> {
    pub fn new(tree: &'a CommandTree) -> Self {
        ZshGenerator { tree, date: None }
    }

    /// Fix the date written into the header (defaults to today)
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Render the full script
    pub fn generate(&self) -> CompletionResult<String> {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        Ok(ZshScript::new(self.tree, date)?.to_string())
    }
}
