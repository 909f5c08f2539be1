//! Static parameter declarations.
//!
//! A [`SchemaRegistry`] lists the parameters one configurable object accepts.
//! Nested objects bring their own registry inside [`ParamKind::Nested`], so a
//! registry describes the whole tree below its object.

pub mod file;


use std::{collections::HashMap, slice};

use crate::{ArgTreeError, Result};

/// The closed set of parameter kinds the matcher distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Boolean switch; presence alone means "on".
    Flag,
    /// Exactly one value.
    Scalar,
    /// Any number of values, accumulated by repetition.
    List,
    /// A nested object with its own parameters.
    Nested(SchemaRegistry),
}

impl ParamKind {
    /// Short human-readable name of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            ParamKind::Flag => "flag",
            ParamKind::Scalar => "scalar",
            ParamKind::List => "list",
            ParamKind::Nested(_) => "object",
        }
    }
}

/// Declaration of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSchema {
    /// Long name, unique within its registry
    pub name: String,
    /// Optional one-character alias
    pub short_name: Option<char>,
    /// Help text
    pub description: String,
    /// What the parameter accepts
    pub kind: ParamKind,
}

impl ParameterSchema {
    /// Declares a parameter of the given kind without short name or description.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            description: String::new(),
            kind,
        }
    }

    /// Declares a flag.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Flag)
    }

    /// Declares a single-valued parameter.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Scalar)
    }

    /// Declares a list parameter.
    pub fn list(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::List)
    }

    /// Declares a nested object parameter.
    pub fn nested(name: impl Into<String>, registry: SchemaRegistry) -> Self {
        Self::new(name, ParamKind::Nested(registry))
    }

    /// Sets the short name.
    pub fn with_short(mut self, short: char) -> Self {
        self.short_name = Some(short);
        self
    }

    /// Sets the help text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The parameters declared by one configurable object.
///
/// Entries keep their declaration order. Long names and short names are each
/// unique; a violation is a programmer error reported by [`SchemaRegistry::insert`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    type_name: String,
    description: String,
    params: Vec<ParameterSchema>,
    by_name: HashMap<String, usize>,
    by_short: HashMap<char, String>,
}

impl SchemaRegistry {
    /// Creates an empty registry for an object of the given type.
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Adds a parameter declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not addressable on a command line, if a
    /// nested object is given a short name, or if the long or short name is
    /// already taken in this registry.
    pub fn insert(&mut self, param: ParameterSchema) -> Result<()> {
        validate_name(&param.name, &self.type_name)?;

        if self.by_name.contains_key(&param.name) {
            return Err(ArgTreeError::DuplicateName {
                name: param.name,
                object: self.type_name.clone(),
            });
        }

        if let Some(short) = param.short_name {
            validate_short(short, &param, &self.type_name)?;

            if self.by_short.contains_key(&short) {
                return Err(ArgTreeError::DuplicateShortName {
                    short,
                    name: param.name,
                    object: self.type_name.clone(),
                });
            }
            self.by_short.insert(short, param.name.clone());
        }

        self.by_name.insert(param.name.clone(), self.params.len());
        self.params.push(param);
        Ok(())
    }

    /// Adds a parameter declaration, consuming and returning the registry.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaRegistry::insert`].
    pub fn with(mut self, param: ParameterSchema) -> Result<Self> {
        self.insert(param)?;
        Ok(self)
    }

    /// Looks a parameter up by long name.
    pub fn get(&self, name: &str) -> Option<&ParameterSchema> {
        self.by_name.get(name).map(|&i| &self.params[i])
    }

    /// Looks a parameter up by short name.
    pub fn get_short(&self, short: char) -> Option<&ParameterSchema> {
        self.by_short.get(&short).and_then(|name| self.get(name))
    }

    /// Resolves a key from the input: long name first, then, for
    /// one-character keys, the short name.
    pub fn resolve(&self, key: &str) -> Option<&ParameterSchema> {
        self.get(key).or_else(|| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(short), None) => self.get_short(short),
                _ => None,
            }
        })
    }

    /// Type name of the declaring object.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Help text of the declaring object.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Iterates over declarations in declaration order.
    pub fn iter(&self) -> slice::Iter<'_, ParameterSchema> {
        self.params.iter()
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameter is declared.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<'a> IntoIterator for &'a SchemaRegistry {
    type Item = &'a ParameterSchema;
    type IntoIter = slice::Iter<'a, ParameterSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

fn validate_name(name: &str, object: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.starts_with('-') {
        Some("name starts with '-'")
    } else if name.contains('.') {
        Some("'.' separates nested objects")
    } else if name.contains('=') {
        Some("'=' separates values")
    } else if name.chars().any(char::is_whitespace) {
        Some("name contains whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ArgTreeError::InvalidName {
            name: name.to_string(),
            object: object.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn validate_short(short: char, param: &ParameterSchema, object: &str) -> Result<()> {
    let reason = if matches!(param.kind, ParamKind::Nested(_)) {
        Some("object parameters cannot have a short name")
    } else if matches!(short, '-' | '.' | '=') || short.is_whitespace() || short.is_control() {
        Some("short name is not usable on a command line")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ArgTreeError::InvalidName {
            name: format!("{}/-{short}", param.name),
            object: object.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
