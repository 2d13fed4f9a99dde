//! # Error Types
//!
//! This module defines the error type shared by every part of the crate: loading
//! an instance, building the coverage index, constructing the initial cover and
//! running the tabu search.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use camcover::error::{CoverError, Result};
//!
//! fn some_function() -> Result<()> {
//!     Ok(())
//! }
//!
//! match some_function() {
//!     Ok(_) => println!("Success!"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use camcover::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_instance(path: &str) -> Result<()> {
//!     File::open(path).context("Failed to open instance file")?;
//!     Ok(())
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use camcover::error::{CoverError, OptionExt};
//!
//! fn first_set(ids: &[&str]) -> camcover::error::Result<String> {
//!     ids.first()
//!         .map(|id| id.to_string())
//!         .ok_or_else_cover(|| CoverError::EmptyInstance("no candidate sets".to_string()))
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while loading or solving a cover instance.
///
/// `UnknownSet`, `InstanceUncoverable` and `EmptyInstance` abort a search run; the
/// engine returns no partial result.
#[derive(Error, Debug)]
pub enum CoverError {
    /// A candidate set identifier (or index) is not present in the coverage index.
    #[error("Unknown candidate set: {0}")]
    UnknownSet(String),

    /// The initial construction could not reach full coverage.
    #[error("Instance cannot be covered: {reason}")]
    InstanceUncoverable {
        /// Universe points no candidate set covers (empty when a draw cap was hit).
        uncovered: Vec<String>,
        /// Human readable explanation.
        reason: String,
    },

    /// The instance has no points or no candidate sets.
    #[error("Empty instance: {0}")]
    EmptyInstance(String),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A line of the instance text format could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for cover operations.
pub type Result<T> = std::result::Result<T, CoverError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use camcover::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> camcover::error::Result<()> {
///     File::open(path).context("Failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `CoverError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| CoverError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, CoverError>` using `err_fn` for `None`.
    fn ok_or_else_cover<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> CoverError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_cover<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> CoverError,
    {
        self.ok_or_else(err_fn)
    }
}
