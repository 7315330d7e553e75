//! CLI definition types
//!
//! This module defines the data structures that represent a supercli.yml
//! file: a program, its root flags, and its subcommands.

use crate::completion::{Arity, CommandTree, CommandTreeBuilder, Flag, Subcommand, ValueHint};
use crate::error::CompletionResult;
use serde::{Deserialize, Serialize};

/// Top-level CLI definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliDefinition {
    /// Shell command users type
    pub name: String,

    /// Program description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    /// Root-level flags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagDefinition>,

    /// Subcommands in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandDefinition>,
}

/// A subcommand definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandDefinition {
    /// Token that selects the subcommand
    pub name: String,

    /// Help text
    #[serde(default)]
    pub help: String,

    /// Flags local to the subcommand
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagDefinition>,
}

/// A flag definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlagDefinition {
    /// Option strings, e.g. `["-d", "--dirs"]`
    pub names: Vec<String>,

    /// Help text
    #[serde(default)]
    pub help: String,

    /// How many values the flag takes
    #[serde(default)]
    pub arity: Arity,

    /// What the values complete to
    #[serde(default)]
    pub value: ValueHint,

    /// Whether the flag may be given more than once
    #[serde(default)]
    pub repeat: bool,
}

impl FlagDefinition {
    fn to_flag(&self) -> Flag {
        Flag::new(self.names.iter().cloned(), self.help.clone())
            .with_arity(self.arity)
            .with_value_hint(self.value)
            .with_repeatable(self.repeat)
    }
}

impl CliDefinition {
    /// Build the command tree this definition describes
    pub fn to_tree(&self) -> CompletionResult<CommandTree> {
        let mut builder = CommandTreeBuilder::new(self.name.clone());
        if let Some(about) = &self.about {
            builder = builder.about(about.clone());
        }

        for flag in &self.flags {
            builder = builder.flag(flag.to_flag());
        }

        for command in &self.commands {
            let subcommand = command
                .flags
                .iter()
                .fold(Subcommand::new(command.name.clone(), command.help.clone()), |sub, flag| {
                    sub.flag(flag.to_flag())
                });
            builder = builder.subcommand(subcommand);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_simple_definition() {
        let yaml = r#"
name: mytool
commands:
  - name: add
    help: Add files
"#;
        let def: CliDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.name, "mytool");
        assert_eq!(def.commands.len(), 1);
        assert!(def.flags.is_empty());
    }

    #[test]
    fn test_deserialize_flag_defaults() {
        let yaml = r#"
name: mytool
flags:
  - names: ["-q", "--quiet"]
"#;
        let def: CliDefinition = serde_yaml::from_str(yaml).unwrap();
        let flag = &def.flags[0];
        assert_eq!(flag.arity, Arity::None);
        assert_eq!(flag.value, ValueHint::Any);
        assert_eq!(flag.help, "");
        assert!(!flag.repeat);
    }

    #[test]
    fn test_deserialize_arity_and_value() {
        let yaml = r#"
name: mytool
commands:
  - name: add
    flags:
      - names: ["-d", "--dirs"]
        help: Dirs to add
        arity: many
        value: directory
        repeat: true
"#;
        let def: CliDefinition = serde_yaml::from_str(yaml).unwrap();
        let flag = &def.commands[0].flags[0];
        assert_eq!(flag.arity, Arity::Many);
        assert_eq!(flag.value, ValueHint::Directory);
        assert!(flag.to_flag().repeatable);
    }

    #[test]
    fn test_unknown_arity_is_rejected() {
        let yaml = r#"
name: mytool
flags:
  - names: ["-x"]
    arity: lots
"#;
        assert!(serde_yaml::from_str::<CliDefinition>(yaml).is_err());
    }

    #[test]
    fn test_to_tree() {
        let yaml = r#"
name: mytool
about: Archive tool
flags:
  - names: ["-q"]
    help: Quiet
commands:
  - name: extract
    help: Extract files
    flags:
      - names: ["-o", "--output"]
        help: Output dir
        arity: one
"#;
        let def: CliDefinition = serde_yaml::from_str(yaml).unwrap();
        let tree = def.to_tree().unwrap();

        assert_eq!(tree.program(), "mytool");
        assert_eq!(tree.about(), Some("Archive tool"));
        assert_eq!(tree.flags(), &[Flag::new(["-q"], "Quiet")]);
        let extract = tree.subcommand("extract").unwrap();
        assert_eq!(extract.help, "Extract files");
        assert_eq!(
            extract.flags,
            vec![Flag::new(["-o", "--output"], "Output dir").with_arity(Arity::One)]
        );
    }
}
