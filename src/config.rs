//! Generator manifest handling.
//! This module provides functionality for loading and parsing the manifest
//! file that declares a generator's questions and assets.

use crate::asset::Action;
use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::Path;

/// Answer value type of a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Str,
    Bool,
}

/// A single question declared by a generator manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    /// Prompt text shown to the user.
    #[serde(default)]
    pub help: String,
    /// Answer type.
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
    /// Default answer. String defaults may carry tokens, substituted
    /// against the answers collected so far.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    /// Restricts a string answer to a fixed choice list.
    #[serde(default)]
    pub choices: Vec<String>,
    /// Token-bearing condition; unless it resolves to "true" the question
    /// is skipped and its default recorded as the answer. Empty means
    /// always ask.
    #[serde(default)]
    pub when: String,
}

/// A directory declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySpec {
    pub path: String,
    #[serde(default)]
    pub mode: Option<u32>,
}

/// A file declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct FileSpec {
    pub path: String,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub header_template: Option<String>,
    #[serde(default)]
    pub inline_template: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Template-local variables, merged over the answers at render time.
    #[serde(default)]
    pub vars: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub action: Option<Action>,
    /// Leading lines of existing content treated as a generated header.
    /// Zero is rejected at parse time; omit the field instead.
    #[serde(default)]
    pub header_size: Option<NonZeroUsize>,
    #[serde(default)]
    pub mode: Option<u32>,
}

/// A symlink declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct SymlinkSpec {
    pub path: String,
    pub target: String,
}

/// Asset declarations grouped by variant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub directories: Vec<DirectorySpec>,
    #[serde(default)]
    pub files: Vec<FileSpec>,
    #[serde(default)]
    pub symlinks: Vec<SymlinkSpec>,
}

/// A generator manifest: metadata, the questions to ask, and the assets to
/// produce from the answers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Questions in declaration order; later defaults and conditions may
    /// reference earlier answers.
    #[serde(default)]
    pub questions: IndexMap<String, Question>,
    #[serde(default)]
    pub assets: AssetManifest,
}

/// Loads the manifest from a generator directory, trying multiple file
/// formats. Supports: scribe.json, scribe.yml, scribe.yaml
///
/// # Arguments
/// * `generator_dir` - Directory containing the generator
///
/// # Returns
/// * `Result<String>` - Contents of the first found manifest file
///
/// # Errors
/// * `Error::ConfigError` if no manifest file exists
pub fn load_manifest<P: AsRef<Path>>(generator_dir: P) -> Result<String> {
    for file in CONFIG_FILES {
        let manifest_path = generator_dir.as_ref().join(file);
        if manifest_path.exists() {
            debug!("Loading manifest from {}", manifest_path.display());
            return std::fs::read_to_string(&manifest_path).map_err(Error::IoError);
        }
    }

    Err(Error::ConfigError(format!(
        "No manifest file found (tried: {})",
        CONFIG_FILES.join(", ")
    )))
}

/// Parses manifest content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content parses as neither
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    match serde_json::from_str(content) {
        Ok(manifest) => Ok(manifest),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid manifest format: {}", e))),
    }
}

/// Loads and parses a generator's manifest in one step.
pub fn get_manifest<P: AsRef<Path>>(generator_dir: P) -> Result<Manifest> {
    let content = load_manifest(generator_dir)?;
    parse_manifest(&content)
}
