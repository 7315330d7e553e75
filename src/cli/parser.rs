//! Decorated argument parser
//!
//! [`ArgumentParser`] wraps a `clap::Command` with colored help, a standard
//! set of logging flags, and hidden developer flags. The hidden
//! `--gen-autocomp` flag writes a completion script for the program instead
//! of parsing normally.

use crate::cli::highlight::highlight_help;
use crate::completion::{self, is_shell_word, CommandTree, Shell};
use crate::error::{CompletionError, Result};
use crate::logging::{LogConfig, LogFormat, Verbosity};
use clap::builder::{styling::AnsiColor, Styles};
use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Developer flags, hidden from help unless developer options are enabled
const DEV_FLAGS: &[&str] = &["devlog", "gen-autocomp", "default-parser"];

const GEN_AUTOCOMP: &str = "--gen-autocomp";

/// Outcome of parsing a command line
#[derive(Debug)]
pub enum Parsed {
    /// Normal parse
    Args(ParsedArgs),
    /// `--fullhelp` printed the extended help
    FullHelp,
    /// `--gen-autocomp` wrote completion scripts to these paths
    CompletionWritten(Vec<PathBuf>),
}

/// Parsed arguments plus the logging setup they request
#[derive(Debug)]
pub struct ParsedArgs {
    pub matches: ArgMatches,
    pub log: LogConfig,
}

impl ParsedArgs {
    /// The selected subcommand, if any
    pub fn subcommand(&self) -> Option<(&str, &ArgMatches)> {
        self.matches.subcommand()
    }
}

/// clap command builder with standard logging and developer flags
#[derive(Debug, Clone)]
pub struct ArgumentParser {
    program: String,
    command: Command,
    subcommands: Vec<Command>,
    developer_opts: bool,
    quiet_targets: Vec<String>,
}

impl ArgumentParser {
    /// Create a parser for the shell command `program`
    pub fn new(program: impl Into<String>) -> Result<Self> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(CompletionError::MissingProgramName.into());
        }
        if !is_shell_word(&program) {
            return Err(CompletionError::InvalidName {
                kind: "program name",
                name: program,
            }
            .into());
        }

        let command = Command::new(program.clone())
            .disable_help_subcommand(true)
            .arg(
                Arg::new("fullhelp")
                    .long("fullhelp")
                    .help("Display extended help menu with developer options")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Prints more detailed log information (`DEBUG`), -vv for very verbose")
                    .action(ArgAction::Count)
                    .global(true),
            )
            .arg(
                Arg::new("very-verbose")
                    .long("very-verbose")
                    .help("Same as verbose, but all log filters are disabled.\n(All information is printed)")
                    .action(ArgAction::SetTrue)
                    .global(true),
            )
            .arg(
                Arg::new("devlog")
                    .long("devlog")
                    .help("Replaces logged time with the target and line number\n(useful while debugging)")
                    .action(ArgAction::SetTrue)
                    .hide(true),
            )
            .arg(
                Arg::new("gen-autocomp")
                    .long("gen-autocomp")
                    .help("Create autocompletion script.\nOptional arguments are the names of the shells to create\nscripts for (currently only zsh)")
                    .value_name("SHELL")
                    .num_args(0..)
                    .hide(true),
            )
            .arg(
                Arg::new("default-parser")
                    .long("default-parser")
                    .help("Display unmodified help output (no colors)")
                    .action(ArgAction::SetTrue)
                    .hide(true),
            );

        Ok(ArgumentParser {
            program,
            command,
            subcommands: Vec::new(),
            developer_opts: false,
            quiet_targets: Vec::new(),
        })
    }

    /// The shell command being parsed for
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Set the description shown at the top of help
    pub fn about(mut self, text: impl Into<String>) -> Self {
        self.command = self.command.about(text.into());
        self
    }

    /// Set the version shown by `--version`
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.command = self.command.version(version.into());
        self
    }

    /// Add `--log-longfmt`, `--logfile` and `--silent`
    pub fn extended_logopts(mut self) -> Self {
        if self.has_arg("logfile") {
            return self;
        }

        self.command = self
            .command
            .arg(
                Arg::new("log-longfmt")
                    .long("log-longfmt")
                    .help("Multi-line log records with file, line number and timestamp")
                    .action(ArgAction::SetTrue)
                    .global(true),
            )
            .arg(
                Arg::new("logfile")
                    .long("logfile")
                    .value_name("FILE")
                    .help("Writes log to the file specified after the argument")
                    .value_parser(clap::value_parser!(PathBuf))
                    .value_hint(clap::ValueHint::FilePath)
                    .global(true),
            )
            .arg(
                Arg::new("silent")
                    .long("silent")
                    .help("Disables logging to stderr")
                    .action(ArgAction::SetTrue)
                    .global(true),
            );
        self
    }

    /// Show the developer flags in help and completions
    pub fn developer_opts(mut self, enabled: bool) -> Self {
        self.developer_opts = enabled;
        self
    }

    /// Log targets held at `warn` unless `-vv` is given
    pub fn quiet_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quiet_targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Add an argument to the root command
    pub fn arg(mut self, arg: Arg) -> Self {
        self.command = self.command.arg(arg);
        self
    }

    /// Register a subcommand. A repeated name replaces the earlier one in place.
    pub fn subcommand(mut self, subcommand: Command) -> Self {
        let name = subcommand.get_name().to_string();
        match self.subcommands.iter_mut().find(|s| s.get_name() == name) {
            Some(existing) => {
                warn!("Sub-command '{}' registered twice; keeping the later definition", name);
                *existing = subcommand;
            }
            None => self.subcommands.push(subcommand),
        }
        self
    }

    /// The clap command as it will be parsed, with colored help
    pub fn command(&self) -> Command {
        self.decorated(false, false)
    }

    /// Snapshot the parser for completion generation
    pub fn completion_tree(&self) -> Result<CommandTree> {
        Ok(CommandTree::from_command(&self.decorated(false, true))?)
    }

    /// Render a completion script for this program
    pub fn completion_script(&self, shell: Shell) -> Result<String> {
        let tree = self.completion_tree()?;
        Ok(completion::generate(&tree, shell)?)
    }

    /// Write completion scripts for `shells` to `_<program>` in the current directory
    pub fn create_autocompleters(&self, shells: &[Shell]) -> Result<Vec<PathBuf>> {
        Shell::ensure_supported(shells)?;

        let scripts = shells
            .iter()
            .map(|shell| self.completion_script(*shell))
            .collect::<Result<Vec<_>>>()?;

        let mut written = Vec::new();
        for script in &scripts {
            written.push(completion::write_script(script, None, &self.program)?);
        }
        Ok(written)
    }

    /// Parse the process arguments
    pub fn parse(&self) -> Result<Parsed> {
        self.parse_from(std::env::args_os())
    }

    /// Parse `args`, handling `--gen-autocomp` and `--fullhelp` before clap sees them
    pub fn parse_from<I, T>(&self, args: I) -> Result<Parsed>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.into().to_string_lossy().into_owned())
            .collect();

        if let Some(shells) = extract_gen_autocomp(&args)? {
            debug!("Generating completions for {:?}", shells);
            return Ok(Parsed::CompletionWritten(self.create_autocompleters(&shells)?));
        }

        let plain = has_flag(&args, "--default-parser");

        if has_flag(&args, "--fullhelp") && !has_flag(&args, "--help") && !has_flag(&args, "-h") {
            self.decorated(true, plain).print_long_help()?;
            return Ok(Parsed::FullHelp);
        }

        let matches = self.decorated(false, plain).try_get_matches_from(&args)?;
        let log = log_config(&matches, &self.quiet_targets);

        Ok(Parsed::Args(ParsedArgs { matches, log }))
    }

    fn has_arg(&self, id: &str) -> bool {
        self.command.get_arguments().any(|a| a.get_id() == id)
    }

    /// Build the clap command; `reveal` unhides developer flags, `plain` drops colors
    fn decorated(&self, reveal: bool, plain: bool) -> Command {
        let show_dev = reveal || self.developer_opts;
        let mut cmd = self.command.clone();

        for id in DEV_FLAGS {
            cmd = cmd.mut_arg(*id, |a| a.hide(!show_dev));
        }

        for sub in &self.subcommands {
            cmd = cmd.subcommand(sub.clone());
        }

        if plain {
            return cmd.styles(Styles::plain()).color(ColorChoice::Never);
        }

        let names: Vec<String> = cmd.get_subcommands().map(|s| s.get_name().to_string()).collect();
        for name in names {
            cmd = cmd.mut_subcommand(name, highlight_command);
        }

        highlight_command(cmd).styles(styles()).color(ColorChoice::Auto)
    }
}

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default())
}

/// Highlight the about text and argument help of one command
fn highlight_command(cmd: Command) -> Command {
    let about = cmd.get_about().map(|a| highlight_help(&a.to_string(), true));
    let cmd = match about {
        Some(text) => cmd.about(text),
        None => cmd,
    };

    cmd.mut_args(|arg| match arg.get_help().map(|h| h.to_string()) {
        Some(help) => arg.help(highlight_help(&help, true)),
        None => arg,
    })
}

/// Find `--gen-autocomp [SHELL...]` and the shells requested (zsh when none)
fn extract_gen_autocomp(args: &[String]) -> Result<Option<Vec<Shell>>> {
    let Some(pos) = args
        .iter()
        .skip(1)
        .take_while(|a| a.as_str() != "--")
        .position(|a| a == GEN_AUTOCOMP || a.starts_with(&format!("{}=", GEN_AUTOCOMP)))
    else {
        return Ok(None);
    };
    let pos = pos + 1;

    let mut names: Vec<&str> = Vec::new();
    if let Some((_, value)) = args[pos].split_once('=') {
        names.push(value);
    } else {
        names.extend(
            args[pos + 1..]
                .iter()
                .take_while(|a| !a.starts_with('-'))
                .map(String::as_str),
        );
    }

    if names.is_empty() {
        return Ok(Some(vec![Shell::Zsh]));
    }

    let shells = names
        .into_iter()
        .map(|name| name.parse::<Shell>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Some(shells))
}

/// Whether `flag` appears before any `--` separator
fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter()
        .skip(1)
        .take_while(|a| a.as_str() != "--")
        .any(|a| a == flag)
}

fn flag_used(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

/// Translate the logging flags into a [`LogConfig`]
fn log_config(matches: &ArgMatches, quiet_targets: &[String]) -> LogConfig {
    let count = matches.try_get_one::<u8>("verbose").ok().flatten().copied().unwrap_or(0);
    let verbosity = if flag_used(matches, "very-verbose") {
        Verbosity::VeryVerbose
    } else {
        Verbosity::from_count(count)
    };

    let format = if flag_used(matches, "log-longfmt") {
        LogFormat::Long
    } else if flag_used(matches, "devlog") {
        LogFormat::Dev
    } else {
        LogFormat::Standard
    };

    let mut config = LogConfig::new()
        .with_verbosity(verbosity)
        .with_format(format)
        .with_stream(!flag_used(matches, "silent"))
        .with_quiet_targets(quiet_targets.to_vec());

    if let Some(path) = matches.try_get_one::<PathBuf>("logfile").ok().flatten() {
        config = config.with_logfile(path.clone());
    }

    config
}
