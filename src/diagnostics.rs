//! Interpretation problems collected while tokenizing, matching and binding.
//!
//! Nothing in the pipeline stops at the first problem. Every stage appends to a
//! [`Diagnostics`] list so a single run reports as much as possible; the caller
//! decides afterwards whether the input may be bound.

use std::{fmt, slice, vec};

use thiserror::Error;

/// The object a diagnostic refers to.
///
/// `path` is the dotted path of the object inside the configuration tree, empty
/// for the root. `object` is its declared type name, empty when unknown (the
/// tokenizer never knows it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Dotted path of the object, empty for the root
    pub path: String,
    /// Declared type name of the object
    pub object: String,
}

impl Location {
    /// Location of the object at `path`.
    pub fn new(path: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "root object")?;
        } else {
            write!(f, "object {}", self.path)?;
        }

        if !self.object.is_empty() {
            write!(f, " (of type {})", self.object)?;
        }

        Ok(())
    }
}

/// A single problem found while interpreting input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A key is used both as a value and as an object, or as a list where a
    /// single value is expected.
    #[error("configuration parameter \"{key}\" for {at}: {reason}")]
    StructuralConflict {
        /// The offending key
        key: String,
        /// What conflicted
        reason: String,
        /// Object owning the key
        at: Location,
    },

    /// A key has no declared parameter.
    #[error("unknown configuration parameter \"{key}\" for {at}")]
    UnknownParameter {
        /// The unknown key
        key: String,
        /// Object that was searched
        at: Location,
    },

    /// A valued parameter was mentioned without any value.
    #[error("configuration parameter \"{key}\" for {at} expects a value, but none was given")]
    MissingValue {
        /// The parameter key
        key: String,
        /// Object owning the parameter
        at: Location,
    },

    /// A list element could not be read as a string.
    #[error("array item {index} of configuration parameter \"{key}\" for {at} is of unsupported type {found}")]
    UnsupportedArrayItem {
        /// The parameter key
        key: String,
        /// Position of the element
        index: usize,
        /// Type that was found instead
        found: String,
        /// Object owning the parameter
        at: Location,
    },

    /// A value reached its parameter but its contents could not be parsed.
    #[error("value {value} for configuration parameter \"{key}\" of {at} is not a valid {expected}")]
    AdapterRejected {
        /// The parameter name
        key: String,
        /// The rejected value as given
        value: String,
        /// Description of the accepted values
        expected: String,
        /// Object owning the parameter
        at: Location,
    },

    /// A plain value was given to an object parameter and ignored.
    #[error("value \"{value}\" for object parameter \"{key}\" of {at} is ignored")]
    IgnoredObjectValue {
        /// The object parameter key
        key: String,
        /// The ignored value
        value: String,
        /// Object owning the parameter
        at: Location,
    },

    /// A parameter name contained an empty path segment.
    #[error("error parsing argument \"{argument}\": parameter name has an empty segment")]
    EmptySegment {
        /// The whole argument as given
        argument: String,
    },

    /// A bare argument looks like a boolean; probably meant as `--x=value`.
    #[error(
        "argument \"{argument}\" reads as a boolean; to assign it explicitly use the '=' operator, e.g. \"--x={argument}\" instead of \"--x {argument}\""
    )]
    AmbiguousBoolean {
        /// The bare argument
        argument: String,
    },
}

impl Diagnostic {
    /// Warnings are reported but never prevent binding.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::AmbiguousBoolean { .. } | Diagnostic::IgnoredObjectValue { .. }
        )
    }
}

/// Ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Appends every diagnostic of `other`, keeping their order.
    pub fn append(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Whether nothing was reported at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of diagnostics, warnings included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any diagnostic is an error, i.e. binding must be refused.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| !d.is_warning())
    }

    /// Iterates over all diagnostics in the order they were reported.
    pub fn iter(&self) -> slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Iterates over the error-level diagnostics only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| !d.is_warning())
    }

    /// Iterates over the warning-level diagnostics only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.is_warning())
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(entries: Vec<Diagnostic>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
