//! Error types for PLOON encoding and decoding.
//!
//! All errors are fatal to the current call: the codec never returns a
//! partial result. Each variant carries the offending fragment so callers
//! can diagnose bad input without re-parsing it themselves.
//!
//! ## Error Categories
//!
//! - **EmptyInput**: decode was handed null/blank text
//! - **MalformedSchema**: the schema segment is structurally broken
//! - **InvalidPath** (strict mode): a record path fails the path grammar
//! - **SchemaInconsistency** (strict mode): a record's value count disagrees
//!   with the declared schema
//! - **AmbiguousRoot / UnsupportedRoot**: the value handed to the encoder has
//!   no single governing collection
//!
//! A record with no field delimiter at all is *not* an error: the tokenizer
//! drops it silently in both strict and lenient modes.
//!
//! ## Examples
//!
//! ```rust
//! use ploon::{parse, Error};
//!
//! let result = parse("");
//! assert!(matches!(result, Err(Error::EmptyInput)));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during PLOON
/// encoding/decoding.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// Decode input was null or blank.
    #[error("empty input: nothing to decode")]
    EmptyInput,

    /// The schema segment is structurally invalid.
    #[error("malformed schema near {fragment:?}: {msg}")]
    MalformedSchema { fragment: String, msg: String },

    /// Strict mode: a record path does not match the path grammar
    /// (`digits` or `digits:digits`).
    #[error("invalid record path {path:?}: expected depth or depth:index")]
    InvalidPath { path: String },

    /// Strict mode: an array item's primitive value count disagrees with
    /// the declared schema.
    #[error("schema inconsistency at item {index}: schema declares {expected} primitive field(s), record carries {found} value(s)")]
    SchemaInconsistency {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// The root object has sibling keys beyond the governing array and the
    /// configured policy rejects that.
    #[error("ambiguous root: {extra} sibling key(s) beyond the governing array")]
    AmbiguousRoot { extra: usize },

    /// The root value is a bare primitive; PLOON needs an object or array
    /// root to infer a schema from.
    #[error("unsupported root value: {0}")]
    UnsupportedRoot(String),

    /// IO error during reading or writing.
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error raised through the serde bridge.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a `MalformedSchema` error carrying the offending fragment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ploon::Error;
    ///
    /// let err = Error::malformed_schema("orders#1", "missing schema close");
    /// assert!(err.to_string().contains("orders#1"));
    /// ```
    pub fn malformed_schema(fragment: &str, msg: &str) -> Self {
        Error::MalformedSchema {
            fragment: fragment.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an `InvalidPath` error for a path that fails the grammar.
    pub fn invalid_path(path: &str) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
        }
    }

    /// Creates a `SchemaInconsistency` error for an array item whose value
    /// count does not match the schema.
    pub fn schema_inconsistency(index: usize, expected: usize, found: usize) -> Self {
        Error::SchemaInconsistency {
            index,
            expected,
            found,
        }
    }

    /// Creates an `UnsupportedRoot` error describing the rejected value.
    pub fn unsupported_root(msg: &str) -> Self {
        Error::UnsupportedRoot(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ploon::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
