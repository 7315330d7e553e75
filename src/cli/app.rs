//! Main CLI application

use crate::cli::parser::{ArgumentParser, Parsed};
use crate::completion::{self, Shell};
use crate::config::{parse_definition_auto, parse_definition_file, CliDefinition};
use crate::error::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use colored::Colorize;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, info};

/// Build the `supercli` parser
pub fn build_parser() -> Result<ArgumentParser> {
    let parser = ArgumentParser::new("supercli")?
        .about(
            "Generate shell completion scripts for command-line programs.\n\n\
             Reads a ``supercli.yml`` definition of a program's flags and\n\
             sub-commands and writes a `zsh` completion function for it.",
        )
        .version(crate::VERSION)
        .extended_logopts()
        .subcommand(
            Command::new("generate")
                .about("Generate a completion script from a CLI definition file")
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("Path to the CLI definition (default: supercli.yml here or in a parent directory)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("shell")
                        .short('s')
                        .long("shell")
                        .value_name("SHELL")
                        .default_value("zsh")
                        .help("Shell to generate the script for"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("PATH")
                        .help("Write the script here (default: ./_<name>)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath)
                        .conflicts_with_all(["stdout", "install"]),
                )
                .arg(
                    Arg::new("stdout")
                        .long("stdout")
                        .help("Print the script instead of writing it")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("install"),
                )
                .arg(
                    Arg::new("install")
                        .long("install")
                        .help("Write the script into the zsh completion directory")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("fpath").about("Print the zsh completion directory scripts are installed to"),
        );

    Ok(parser)
}

/// Where a generated script should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Install,
    File(Option<PathBuf>),
}

/// Options of the `generate` subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub file: Option<PathBuf>,
    pub shell: String,
    pub destination: Destination,
}

impl GenerateOptions {
    fn from_matches(matches: &ArgMatches) -> Self {
        let destination = if matches.get_flag("stdout") {
            Destination::Stdout
        } else if matches.get_flag("install") {
            Destination::Install
        } else {
            Destination::File(matches.get_one::<PathBuf>("output").cloned())
        };

        GenerateOptions {
            file: matches.get_one::<PathBuf>("file").cloned(),
            shell: matches
                .get_one::<String>("shell")
                .cloned()
                .unwrap_or_else(|| "zsh".to_string()),
            destination,
        }
    }
}

/// Load the definition, render it and deliver the script
pub fn generate(options: &GenerateOptions) -> Result<()> {
    let shell: Shell = options.shell.parse()?;
    Shell::ensure_supported(&[shell])?;

    let (def, path): (CliDefinition, PathBuf) = match &options.file {
        Some(path) => (parse_definition_file(path)?, path.clone()),
        None => parse_definition_auto()?,
    };
    info!("Loaded CLI definition for '{}' from {}", def.name, path.display());

    let tree = def.to_tree()?;
    let script = completion::generate(&tree, shell)?;
    debug!("Rendered {} bytes of {} completion", script.len(), shell);

    let written = match &options.destination {
        Destination::Stdout => {
            print!("{}", script);
            return Ok(());
        }
        Destination::Install => completion::install(&script, tree.program())?,
        Destination::File(dest) => completion::write_script(&script, dest.as_deref(), tree.program())?,
    };

    println!("{} {}", "Wrote".green().bold(), written.display());
    Ok(())
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<()> {
    run_from(std::env::args_os())
}

/// Run the CLI application with provided arguments
pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let parser = build_parser()?;

    let parsed = match parser.parse_from(args)? {
        Parsed::Args(parsed) => parsed,
        Parsed::FullHelp => return Ok(()),
        Parsed::CompletionWritten(paths) => {
            for path in paths {
                println!("{} {}", "Wrote".green().bold(), path.display());
            }
            return Ok(());
        }
    };

    parsed.log.init()?;
    debug!("Logging configured: {:?}", parsed.log);

    match parsed.subcommand() {
        Some(("generate", matches)) => generate(&GenerateOptions::from_matches(matches)),
        Some(("fpath", _)) => {
            println!("{}", completion::completion_dir()?.display());
            Ok(())
        }
        _ => {
            parser.command().print_help()?;
            println!();
            Ok(())
        }
    }
}
