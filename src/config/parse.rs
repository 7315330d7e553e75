//! CLI definition file parsing and discovery

use crate::config::schema::validate_definition;
use crate::config::types::CliDefinition;
use crate::error::{ConfigError, ConfigResult, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default definition file names to search for
const DEFINITION_FILE_NAMES: &[&str] = &["supercli.yml", "supercli.yaml"];

/// Find the definition file by searching current and parent directories
pub fn find_definition_file() -> ConfigResult<PathBuf> {
    find_definition_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the definition file starting from a specific directory
pub fn find_definition_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in DEFINITION_FILE_NAMES {
            let path = current_dir.join(file_name);
            searched_paths.push(path.display().to_string());

            if path.is_file() {
                return Ok(path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse and validate a definition from a string
pub fn parse_definition(yaml: &str) -> Result<CliDefinition> {
    let def: CliDefinition = serde_yaml::from_str(yaml)?;
    validate_definition(&def)?;
    Ok(def)
}

/// Parse and validate a definition file
pub fn parse_definition_file(path: &Path) -> Result<CliDefinition> {
    debug!("Reading CLI definition from {}", path.display());
    let contents = fs::read_to_string(path).map_err(|e| {
        ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e))
    })?;

    parse_definition(&contents)
}

/// Parse the definition file found by discovery
pub fn parse_definition_auto() -> Result<(CliDefinition, PathBuf)> {
    let path = find_definition_file()?;
    let def = parse_definition_file(&path)?;
    Ok((def, path))
}
