//! CLI definition validation
//!
//! This module checks definitions before they are turned into command trees.

use crate::completion::is_shell_word;
use crate::config::types::{CliDefinition, FlagDefinition};
use crate::error::{ConfigError, ConfigResult};

/// Validate a complete definition
pub fn validate_definition(def: &CliDefinition) -> ConfigResult<()> {
    if def.name.trim().is_empty() {
        return Err(ConfigError::Invalid("'name' must not be empty".to_string()));
    }
    if !is_shell_word(&def.name) {
        return Err(ConfigError::Invalid(format!(
            "Program name '{}' may only contain letters, digits and '-_.+'",
            def.name
        )));
    }

    validate_flags("root command", &def.flags)?;

    for command in &def.commands {
        if !is_shell_word(&command.name) {
            return Err(ConfigError::Invalid(format!(
                "Sub-command name '{}' may only contain letters, digits and '-_.+' and must not start with '-'",
                command.name
            )));
        }
        validate_flags(&format!("sub-command '{}'", command.name), &command.flags)?;
    }

    Ok(())
}

/// Validate the flags of one command
pub fn validate_flags(context: &str, flags: &[FlagDefinition]) -> ConfigResult<()> {
    for flag in flags {
        if flag.names.is_empty() {
            return Err(ConfigError::EmptyFlagNames(context.to_string()));
        }
        for name in &flag.names {
            validate_flag_name(name)?;
        }
    }
    Ok(())
}

/// A flag name is a dash followed by at least one non-space character
fn validate_flag_name(name: &str) -> ConfigResult<()> {
    let body = name.trim_start_matches('-');
    if !name.starts_with('-') || body.is_empty() || body.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidFlagName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CommandDefinition;

    fn flag(names: &[&str]) -> FlagDefinition {
        FlagDefinition {
            names: names.iter().map(|s| s.to_string()).collect(),
            help: String::new(),
            arity: Default::default(),
            value: Default::default(),
            repeat: false,
        }
    }

    fn definition() -> CliDefinition {
        CliDefinition {
            name: "mytool".to_string(),
            about: None,
            flags: vec![flag(&["-q", "--quiet"])],
            commands: vec![CommandDefinition {
                name: "add".to_string(),
                help: "Add files".to_string(),
                flags: vec![flag(&["-d", "--dirs"])],
            }],
        }
    }

    #[test]
    fn test_validate_valid_definition() {
        assert!(validate_definition(&definition()).is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let mut def = definition();
        def.name = " ".to_string();
        assert!(matches!(validate_definition(&def), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_empty_flag_names() {
        let mut def = definition();
        def.commands[0].flags.push(flag(&[]));
        let result = validate_definition(&def);
        assert!(matches!(
            result,
            Err(ConfigError::EmptyFlagNames(context)) if context == "sub-command 'add'"
        ));
    }

    #[test]
    fn test_validate_flag_name_without_dash() {
        let mut def = definition();
        def.flags.push(flag(&["verbose"]));
        assert!(matches!(
            validate_definition(&def),
            Err(ConfigError::InvalidFlagName(name)) if name == "verbose"
        ));
    }

    #[test]
    fn test_validate_bare_dashes() {
        assert!(validate_flag_name("--").is_err());
        assert!(validate_flag_name("-").is_err());
        assert!(validate_flag_name("--a b").is_err());
        assert!(validate_flag_name("-vv").is_ok());
    }

    #[test]
    fn test_validate_subcommand_name() {
        let mut def = definition();
        def.commands[0].name = "--add".to_string();
        assert!(matches!(validate_definition(&def), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_names_with_whitespace() {
        let mut def = definition();
        def.commands[0].name = "add files".to_string();
        assert!(matches!(
            validate_definition(&def),
            Err(ConfigError::Invalid(msg)) if msg.contains("'add files'")
        ));

        let mut def = definition();
        def.name = "my tool".to_string();
        assert!(matches!(validate_definition(&def), Err(ConfigError::Invalid(_))));
    }
}
