//! Error handling for the Scribe application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for Scribe operations.
///
/// This enum represents all possible errors that can occur within the Scribe
/// application. It implements the standard Error trait through thiserror's
/// derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised by the MiniJinja rendering engine
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur during template processing
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors that occur during manifest parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A token referenced a variable that is not present in the mapping
    #[error("Variable \"{name}\" is not defined.")]
    UndefinedVariableError { name: String },

    /// A token carried a filter suffix outside the recognized filter set
    #[error("Filter \"{name}\" is not defined.")]
    UndefinedFilterError { name: String },

    /// An asset was registered under a path already present in the collection
    #[error("Asset with path \"{path}\" is already registered.")]
    DuplicatePathError { path: String },

    /// An asset path was empty, absolute, or escaped the output root
    #[error("Invalid asset path \"{path}\": {reason}.")]
    InvalidPathError { path: String, reason: String },

    /// The generator directory passed on the command line does not exist
    #[error("Generator directory does not exist: '{generator_dir}'.")]
    GeneratorDoesNotExistError { generator_dir: String },
}

/// Convenience type alias for Results with Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
