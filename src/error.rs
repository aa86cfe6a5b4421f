//! Error types for the Sous library.
//!
//! Configuration problems (a template that does not compile, a vocabulary file
//! that cannot be read) are reported through [`SousError`]. A line of text the
//! grammar does not understand is *not* an error: it is a
//! [`ParseResult::NoMatch`](crate::parser::ParseResult::NoMatch).
//!
//! # Examples
//!
//! ```
//! use sous::error::{SousError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SousError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Sous operations.
#[derive(Error, Debug)]
pub enum SousError {
    /// I/O errors (reading vocabulary or grammar files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Grammar template compilation errors
    #[error("Template error: {0}")]
    Template(String),

    /// Vocabulary loading and index build errors
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SousError.
pub type Result<T> = std::result::Result<T, SousError>;

impl SousError {
    /// Create a new template error.
    pub fn template<S: Into<String>>(msg: S) -> Self {
        SousError::Template(msg.into())
    }

    /// Create a new vocabulary error.
    pub fn vocabulary<S: Into<String>>(msg: S) -> Self {
        SousError::Vocabulary(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SousError::InvalidArgument(msg.into())
    }
}
