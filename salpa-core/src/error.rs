//! Structured error types for the salpa crates.

use thiserror::Error;

/// Unified error type for all salpa operations.
#[derive(Debug, Error)]
pub enum SalpaError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed input data)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, inconsistent data)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A symbol that does not belong to the alphabet it was offered to.
    #[error("{context}: '{token}' is not a valid symbol ({alphabet})")]
    BadChar {
        context: &'static str,
        token: String,
        alphabet: String,
    },

    /// A state index outside an alphabet's valid range.
    #[error("{context}: index {index} is out of range ({alphabet})")]
    BadIndex {
        context: &'static str,
        index: usize,
        alphabet: String,
    },

    /// A stop codon met during translation.
    ///
    /// Not a defect: the caller decides whether it terminates a reading
    /// frame or invalidates the input.
    #[error("{context}: stop codon {codon}")]
    StopCodon {
        context: &'static str,
        codon: String,
    },

    /// A configuration option set to an unrecognized value.
    #[error("unknown value '{value}' for option '{key}'")]
    BadOption { key: String, value: String },

    /// A required configuration option that was not supplied.
    #[error("missing required option '{0}'")]
    MissingOption(String),
}

/// Convenience alias used throughout the salpa crates.
pub type Result<T> = std::result::Result<T, SalpaError>;
