//! Error types for the Kirigami library.
//!
//! All errors are represented by the [`KirigamiError`] enum. Upstream token
//! sources report read failures as `Io`; invalid construction input (for
//! example an empty phrase in a phrase dictionary) is reported as `Config`
//! at construction time and never mid-stream.
//!
//! # Examples
//!
//! ```
//! use kirigami::error::{KirigamiError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KirigamiError::config("empty phrase"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Kirigami operations.
#[derive(Error, Debug)]
pub enum KirigamiError {
    /// I/O errors (upstream token source read failures)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors (invalid options or malformed rule data)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KirigamiError {
    /// Create an analysis error.
    pub fn analysis<S: Into<String>>(message: S) -> Self {
        KirigamiError::Analysis(message.into())
    }

    /// Create a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        KirigamiError::Config(message.into())
    }
}

/// A specialized Result type for Kirigami operations.
pub type Result<T> = std::result::Result<T, KirigamiError>;
