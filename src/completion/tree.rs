//! Command tree model
//!
//! The in-memory snapshot of a program's root flags and subcommands that the
//! completion renderers consume. Trees are assembled with [`CommandTreeBuilder`]
//! and never mutated afterwards.

use crate::cli::highlight::strip_ansi;
use crate::error::{CompletionError, CompletionResult};
use clap::{ArgAction, ValueHint as ClapValueHint};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of values a flag accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    /// A switch that takes no value
    #[default]
    None,
    /// Exactly one value
    One,
    /// One or more values after a single occurrence
    Many,
}

impl Arity {
    /// Whether the flag expects a value after it
    pub fn takes_value(self) -> bool {
        !matches!(self, Arity::None)
    }
}

/// What kind of value a flag completes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueHint {
    #[default]
    Any,
    File,
    Directory,
}

/// One declared option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub aliases: Vec<String>,
    pub help: String,
    pub arity: Arity,
    pub value_hint: ValueHint,
    /// May be given more than once on one command line
    pub repeatable: bool,
}

impl Flag {
    /// Create a switch flag with the given option strings
    pub fn new<I, S>(aliases: I, help: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Flag {
            aliases: aliases.into_iter().map(Into::into).collect(),
            help: help.into(),
            arity: Arity::None,
            value_hint: ValueHint::Any,
            repeatable: false,
        }
    }

    /// Set the arity
    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Set the value hint
    pub fn with_value_hint(mut self, hint: ValueHint) -> Self {
        self.value_hint = hint;
        self
    }

    /// Mark the flag as repeatable
    pub fn with_repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    /// Capture a flag from a clap argument.
    ///
    /// Returns `None` for positionals, which have no option strings to complete.
    pub fn from_arg(arg: &clap::Arg) -> Option<Self> {
        if arg.is_positional() {
            return None;
        }

        let mut aliases = Vec::new();
        if let Some(short) = arg.get_short() {
            aliases.push(format!("-{}", short));
        }
        if let Some(shorts) = arg.get_visible_short_aliases() {
            aliases.extend(shorts.into_iter().map(|c| format!("-{}", c)));
        }
        if let Some(long) = arg.get_long() {
            aliases.push(format!("--{}", long));
        }
        if let Some(longs) = arg.get_visible_aliases() {
            aliases.extend(longs.into_iter().map(|l| format!("--{}", l)));
        }

        let help = arg
            .get_help()
            .or_else(|| arg.get_long_help())
            .map(|h| strip_ansi(&h.to_string()))
            .unwrap_or_default();

        Some(Flag {
            aliases,
            help,
            arity: arity_of(arg),
            value_hint: value_hint_of(arg),
            repeatable: matches!(arg.get_action(), ArgAction::Append | ArgAction::Count),
        })
    }
}

/// Whether `name` can stand unquoted as a zsh function suffix and case pattern
pub fn is_shell_word(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+'))
}

fn arity_of(arg: &clap::Arg) -> Arity {
    if let Some(range) = arg.get_num_args() {
        return match range.max_values() {
            0 => Arity::None,
            1 => Arity::One,
            _ => Arity::Many,
        };
    }

    match arg.get_action() {
        ArgAction::Set | ArgAction::Append => Arity::One,
        _ => Arity::None,
    }
}

fn value_hint_of(arg: &clap::Arg) -> ValueHint {
    match arg.get_value_hint() {
        ClapValueHint::FilePath | ClapValueHint::AnyPath | ClapValueHint::ExecutablePath => {
            ValueHint::File
        }
        ClapValueHint::DirPath => ValueHint::Directory,
        _ => ValueHint::Any,
    }
}

/// A named branch of the command tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcommand {
    pub title: String,
    pub help: String,
    pub flags: Vec<Flag>,
}

impl Subcommand {
    /// Create an empty subcommand
    pub fn new(title: impl Into<String>, help: impl Into<String>) -> Self {
        Subcommand {
            title: title.into(),
            help: help.into(),
            flags: Vec::new(),
        }
    }

    /// Append a flag
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }
}

/// Whether the program dispatches on a first positional token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandShape<'a> {
    /// Only root flags
    Leaf,
    /// At least one subcommand
    Dispatcher(&'a [Subcommand]),
}

/// The root of a program's declared command structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTree {
    program: String,
    about: Option<String>,
    flags: Vec<Flag>,
    subcommands: Vec<Subcommand>,
}

impl CommandTree {
    /// Start building a tree for `program`
    pub fn builder(program: impl Into<String>) -> CommandTreeBuilder {
        CommandTreeBuilder::new(program)
    }

    /// Snapshot a clap command and its direct subcommands
    pub fn from_command(cmd: &clap::Command) -> CompletionResult<Self> {
        let name = cmd.get_bin_name().unwrap_or_else(|| cmd.get_name());
        let mut builder = CommandTreeBuilder::new(name);
        if let Some(about) = cmd.get_about() {
            builder = builder.about(strip_ansi(&about.to_string()));
        }

        for arg in cmd.get_arguments().filter(|a| !a.is_hide_set()) {
            if let Some(flag) = Flag::from_arg(arg) {
                builder = builder.flag(flag);
            }
        }

        for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
            let help = sub
                .get_about()
                .or_else(|| sub.get_long_about())
                .map(|h| strip_ansi(&h.to_string()))
                .unwrap_or_default();

            let mut subcommand = Subcommand::new(sub.get_name(), help);
            for arg in sub.get_arguments().filter(|a| !a.is_hide_set()) {
                if let Some(flag) = Flag::from_arg(arg) {
                    subcommand = subcommand.flag(flag);
                }
            }
            builder = builder.subcommand(subcommand);
        }

        builder.build()
    }

    /// The shell command users type
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Program description, if one was declared
    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// Root-level flags in declaration order
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Subcommands in declaration order
    pub fn subcommands(&self) -> &[Subcommand] {
        &self.subcommands
    }

    /// Look up a subcommand by title
    pub fn subcommand(&self, title: &str) -> Option<&Subcommand> {
        self.subcommands.iter().find(|s| s.title == title)
    }

    /// Classify the tree for rendering
    pub fn shape(&self) -> CommandShape<'_> {
        if self.subcommands.is_empty() {
            CommandShape::Leaf
        } else {
            CommandShape::Dispatcher(&self.subcommands)
        }
    }
}

/// Incremental construction of a [`CommandTree`]
#[derive(Debug, Clone)]
pub struct CommandTreeBuilder {
    program: String,
    about: Option<String>,
    flags: Vec<Flag>,
    subcommands: Vec<Subcommand>,
}

impl CommandTreeBuilder {
    /// Create a builder for `program`
    pub fn new(program: impl Into<String>) -> Self {
        CommandTreeBuilder {
            program: program.into(),
            about: None,
            flags: Vec::new(),
            subcommands: Vec::new(),
        }
    }

    /// Set the program description; blank text clears it
    pub fn about(mut self, about: impl Into<String>) -> Self {
        let about = about.into();
        self.about = Some(about).filter(|a| !a.trim().is_empty());
        self
    }

    /// Add a root flag
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Register a subcommand.
    ///
    /// A title that is already registered is overwritten in place: the
    /// earlier position is kept, the later help and flags win.
    pub fn subcommand(mut self, subcommand: Subcommand) -> Self {
        match self
            .subcommands
            .iter_mut()
            .find(|s| s.title == subcommand.title)
        {
            Some(existing) => {
                warn!(
                    "Sub-command '{}' registered twice; keeping the later definition",
                    subcommand.title
                );
                *existing = subcommand;
            }
            None => self.subcommands.push(subcommand),
        }
        self
    }

    /// Freeze the tree
    pub fn build(self) -> CompletionResult<CommandTree> {
        if self.program.trim().is_empty() {
            return Err(CompletionError::MissingProgramName);
        }
        if !is_shell_word(&self.program) {
            return Err(CompletionError::InvalidName {
                kind: "program name",
                name: self.program,
            });
        }
        if let Some(bad) = self.subcommands.iter().find(|s| !is_shell_word(&s.title)) {
            return Err(CompletionError::InvalidName {
                kind: "sub-command title",
                name: bad.title.clone(),
            });
        }

        debug!(
            "Built command tree for '{}': {} root flags, {} sub-commands",
            self.program,
            self.flags.len(),
            self.subcommands.len()
        );

        Ok(CommandTree {
            program: self.program,
            about: self.about,
            flags: self.flags,
            subcommands: self.subcommands,
        })
    }
}
