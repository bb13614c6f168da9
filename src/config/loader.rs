//! Loader for controller archetype RON files.

use bevy::prelude::*;
use ron::Options;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::ControllerConfig;
use super::validation::ConfigError;

/// Versioned list wrapper shared by every data file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

/// One named archetype (e.g. "player_default", "player_heavy").
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchetypeDef {
    pub id: String,
    #[serde(default)]
    pub config: ControllerConfig,
}

/// Error type for archetype loading failures.
#[derive(Debug)]
pub enum ConfigLoadError {
    Io { file: String, message: String },
    Parse { file: String, message: String },
    MissingArchetype { file: String, id: String },
    Invalid { id: String, errors: Vec<ConfigError> },
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::Io { file, message } => {
                write!(f, "Failed to read {}: {}", file, message)
            }
            ConfigLoadError::Parse { file, message } => {
                write!(f, "Failed to parse {}: {}", file, message)
            }
            ConfigLoadError::MissingArchetype { file, id } => {
                write!(f, "Archetype '{}' not found in {}", id, file)
            }
            ConfigLoadError::Invalid { id, errors } => {
                write!(f, "Archetype '{}' has {} invalid field(s)", id, errors.len())?;
                for error in errors {
                    write!(f, "\n  - {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse archetypes from RON text. Every archetype is validated; the first invalid one
/// aborts the load.
pub fn parse_archetypes(
    contents: &str,
    file_name: &str,
) -> Result<Vec<ArchetypeDef>, ConfigLoadError> {
    let data: DataFile<ArchetypeDef> =
        ron_options()
            .from_str(contents)
            .map_err(|e| ConfigLoadError::Parse {
                file: file_name.to_string(),
                message: e.to_string(),
            })?;

    let mut archetypes = Vec::with_capacity(data.items.len());
    for item in data.items {
        let config = item
            .config
            .validated()
            .map_err(|errors| ConfigLoadError::Invalid {
                id: item.id.clone(),
                errors,
            })?;
        archetypes.push(ArchetypeDef {
            id: item.id,
            config,
        });
    }

    debug!(
        "Parsed {} controller archetype(s) from {} (schema v{})",
        archetypes.len(),
        file_name,
        data.schema_version
    );
    Ok(archetypes)
}

/// Load every archetype in a RON data file.
pub fn load_archetypes(path: &Path) -> Result<Vec<ArchetypeDef>, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError::Io {
        file: file_name.clone(),
        message: e.to_string(),
    })?;
    parse_archetypes(&contents, &file_name)
}

/// Load a single archetype's config by id.
pub fn load_archetype(path: &Path, id: &str) -> Result<ControllerConfig, ConfigLoadError> {
    let archetypes = load_archetypes(path)?;
    let config = archetypes
        .into_iter()
        .find(|def| def.id == id)
        .map(|def| def.config)
        .ok_or_else(|| ConfigLoadError::MissingArchetype {
            file: path.display().to_string(),
            id: id.to_string(),
        })?;

    info!("Loaded controller archetype '{}' from {}", id, path.display());
    Ok(config)
}
