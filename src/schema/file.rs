//! Schema description files.
//!
//! Programs declare their schema in code through [`crate::binder::ConfigObject`].
//! Tools that have no compiled-in object (such as `argtree-inspect`) describe
//! the schema in TOML instead:
//!
//! ```toml
//! name = "Compressor"
//! description = "Compresses input files"
//!
//! [params.verbose]
//! kind = "flag"
//! short = "v"
//!
//! [params.block]
//! kind = "object"
//! name = "BlockConfig"
//!
//! [params.block.params.size]
//! kind = "scalar"
//! description = "Block size in bytes"
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ParamKind, ParameterSchema, SchemaRegistry};
use crate::{ArgTreeError, Result};

/// Root of a schema description file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct SchemaFile {
    /// Type name of the described object.
    #[serde(default)]
    pub name: String,

    /// Help text of the described object.
    #[serde(default)]
    pub description: String,

    /// Parameters keyed by long name.
    #[serde(default)]
    pub params: BTreeMap<String, ParamEntry>,
}

/// One parameter of a schema description file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ParamEntry {
    /// What the parameter accepts.
    pub kind: EntryKind,

    /// Optional one-character alias (not allowed for objects).
    #[serde(default)]
    pub short: Option<char>,

    /// Help text.
    #[serde(default)]
    pub description: String,

    /// Type name of a nested object.
    #[serde(default)]
    pub name: String,

    /// Parameters of a nested object, keyed by long name.
    #[serde(default)]
    pub params: BTreeMap<String, ParamEntry>,
}

/// Parameter kinds as spelled in schema description files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Boolean switch.
    Flag,
    /// Single value.
    Scalar,
    /// Repeated values.
    List,
    /// Nested object.
    Object,
}

impl SchemaFile {
    /// Parses a schema description from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ArgTreeError::TomlParseError` if the text is not a valid description.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ArgTreeError::toml_parse(e, None))
    }

    /// Loads a schema description file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid description.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ArgTreeError::io(e, path))?;
        toml::from_str(&content).map_err(|e| ArgTreeError::toml_parse(e, Some(path)))
    }

    /// Builds the registry this description declares.
    ///
    /// # Errors
    ///
    /// Returns an error for any declaration the registry refuses, and for
    /// non-object entries that declare nested parameters.
    pub fn into_registry(self) -> Result<SchemaRegistry> {
        build_registry(self.name, self.description, self.params)
    }

    /// JSON Schema of the description format itself.
    ///
    /// # Errors
    ///
    /// Returns `ArgTreeError::Serialization` if the schema cannot be represented as JSON.
    pub fn json_schema() -> Result<serde_json::Value> {
        let schema = schemars::schema_for!(SchemaFile);
        serde_json::to_value(&schema).map_err(|e| ArgTreeError::Serialization {
            details: e.to_string(),
        })
    }
}

fn build_registry(
    type_name: String,
    description: String,
    params: BTreeMap<String, ParamEntry>,
) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::new(type_name, description);

    for (name, entry) in params {
        if entry.kind != EntryKind::Object && !entry.params.is_empty() {
            return Err(ArgTreeError::InvalidName {
                name,
                object: registry.type_name().to_string(),
                reason: "only object parameters can declare nested params".to_string(),
            });
        }

        let kind = match entry.kind {
            EntryKind::Flag => ParamKind::Flag,
            EntryKind::Scalar => ParamKind::Scalar,
            EntryKind::List => ParamKind::List,
            EntryKind::Object => {
                let type_name = if entry.name.is_empty() {
                    name.clone()
                } else {
                    entry.name
                };
                ParamKind::Nested(build_registry(
                    type_name,
                    entry.description.clone(),
                    entry.params,
                )?)
            }
        };

        registry.insert(ParameterSchema {
            name,
            short_name: entry.short,
            description: entry.description,
            kind,
        })?;
    }

    Ok(registry)
}
