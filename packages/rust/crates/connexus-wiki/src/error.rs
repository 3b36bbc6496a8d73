//! Error type shared by the wiki index, store and engine.

use std::path::PathBuf;
use thiserror::Error;

/// Wiki errors.
#[derive(Debug, Error)]
pub enum WikiError {
    /// The corpus root is missing, not a directory, or cannot be listed.
    #[error("corpus root '{}' is not readable: {source}", root.display())]
    CorpusUnavailable {
        /// Corpus root that failed.
        root: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A single document could not be read.
    #[error("failed to read document '{topic}': {source}")]
    ReadDocument {
        /// Topic of the document.
        topic: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A single document could not be written.
    #[error("failed to write document '{topic}': {source}")]
    WriteDocument {
        /// Topic of the document.
        topic: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Topic name does not match the accepted topic pattern.
    #[error("invalid topic: '{0}'")]
    InvalidTopic(String),
    /// An explicitly requested config file could not be loaded.
    #[error("invalid wiki config '{}': {message}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Read or parse failure.
        message: String,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, WikiError>;
