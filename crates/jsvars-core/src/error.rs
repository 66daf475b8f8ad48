//! Unified error types for jsvars.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during jsvars operations.
#[derive(Error, Debug)]
pub enum Error {
    // --- Conversion ---

    /// The value has no JSON representation (e.g. a map with non-string keys,
    /// or a `Serialize` impl that reports an error).
    #[error("invalid value to convert into JSON: {0}")]
    InvalidValue(String),

    /// The value nests arrays/objects deeper than `encode.depth`.
    #[error("maximum encoding depth exceeded: {depth} (max {max})")]
    DepthExceeded { depth: usize, max: usize },

    /// Emitted markup could not be read back as assignment statements.
    #[error("malformed statement at byte {offset}: {reason}")]
    MalformedStatement { offset: usize, reason: String },

    // --- Configuration ---

    /// The configuration file was not found or could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Per-call overrides do not fit the configuration schema.
    #[error("invalid config overrides: {0}")]
    ConfigOverride(#[source] serde_json::Error),

    /// `function` or `storage` is not a usable JavaScript identifier.
    #[error("'{value}' is not a valid JavaScript identifier for `{option}`")]
    InvalidIdentifier { option: &'static str, value: String },

    // --- Templates ---

    /// Handlebars template rendering failed (invalid template or missing variables).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    /// The template file was not found or is not readable.
    #[error("template file not found or not readable: {path}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Scaffolding ---

    /// The directory the runtime file should be written to does not exist.
    #[error("the target directory does not exist: {0}")]
    TargetDirMissing(PathBuf),

    /// The requested file name is empty or contains a path separator.
    #[error("invalid file name: '{0}'")]
    InvalidFileName(String),

    /// Writing the generated file failed.
    #[error("the file creation failed: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
