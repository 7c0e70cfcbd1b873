//! Error types for enemy data loading.

use thiserror::Error;

/// Errors that can occur when loading enemy definitions or the encounter table.
#[derive(Debug, Error)]
pub enum EnemyDataError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A definition parsed but its values are unusable.
    #[error("Invalid enemy definition '{name}': {reason}")]
    Invalid { name: String, reason: String },
}
