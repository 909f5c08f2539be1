use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::diagnostics::Diagnostics;

/// Error types for the argtree crate.
///
/// Covers mistakes in declared schemas (programmer errors), command lines or
/// configuration files that could not be bound, and file handling failures.
/// Interpretation problems inside a single command line are collected as
/// [`Diagnostics`] first and only surface here once binding is refused.
#[derive(Error, Debug)]
pub enum ArgTreeError {
    /// A parameter was declared with a name that cannot be addressed
    #[error("invalid parameter name '{name}' in {object}: {reason}")]
    InvalidName {
        /// The offending name
        name: String,
        /// Type name of the declaring object
        object: String,
        /// Why the name is not usable
        reason: String,
    },

    /// Two parameters of one object share a long name
    #[error("duplicate parameter '{name}' declared by {object}")]
    DuplicateName {
        /// The repeated name
        name: String,
        /// Type name of the declaring object
        object: String,
    },

    /// Two parameters of one object share a short name
    #[error("duplicate short name '-{short}' declared by {object} (for '{name}')")]
    DuplicateShortName {
        /// The repeated short name
        short: char,
        /// Long name of the second declaration
        name: String,
        /// Type name of the declaring object
        object: String,
    },

    /// The input could not be bound; every problem found is listed
    #[error("{0}")]
    Rejected(Diagnostics),

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error (for compatibility)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// A configuration tree could not be written as text
    #[error("failed to serialize configuration: {details}")]
    Serialization {
        /// Serializer error details
        details: String,
    },
}

/// A specialized `Result` type for argtree operations.
pub type Result<T> = result::Result<T, ArgTreeError>;

impl ArgTreeError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ArgTreeError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error carrying the path that was being accessed.
    pub fn io(error: impl fmt::Display, path: &Path) -> Self {
        ArgTreeError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    /// Returns the diagnostics of a rejected input, if that is what this error is.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            ArgTreeError::Rejected(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }
}
