//! Scribe is a template-driven code generator.
//! It renders named templates against user-supplied variables, decides how
//! each rendered asset combines with anything already on disk, and reports
//! the produced assets.

/// Asset model: directories, symlinks, files and their write policies
pub mod asset;

/// Command-line interface module for the Scribe application
pub mod cli;

/// Insertion-ordered, path-keyed aggregate of assets
pub mod collection;

/// Generator manifest handling
/// Supports JSON and YAML formats (scribe.json, scribe.yml, scribe.yaml)
pub mod config;

/// Shared constants: manifest file names and well-known directories
pub mod constants;

/// Error types and handling for the Scribe application
pub mod error;

/// Generation runs: from scheduled assets to persisted output
pub mod generator;

/// Answer collection for manifest questions
pub mod parser;

/// Write resolution and persistence
/// Combines generated content with pre-existing files per write policy
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering functionality
pub mod renderer;

/// Result summaries for finished runs
pub mod report;

/// Token substitution with filter chains
pub mod tokens;
