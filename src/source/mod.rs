//! Configuration files as a second source of values.
//!
//! A TOML document maps onto the same [`ProvisionalTree`] the tokenizer builds,
//! so files go through the regular matcher and binder. Every value in a file is
//! explicit, which makes the conversion free of the ambiguities a command line
//! has: scalars become literals, arrays become lists and tables become objects.

mod merging;


pub use merging::{merge_layers, merge_tables};

use std::{fs, path::Path};

use toml::{Table, Value};
use tracing::{debug, instrument};

use crate::{
    core::{ArgTreeError, Result},
    diagnostics::{Diagnostic, Diagnostics, Location},
    matcher::{self, BoundConfiguration},
    schema::SchemaRegistry,
    tokenizer::{Provisional, ProvisionalTree, RawTokenList, ValueRef},
};

/// Parses TOML text into a table.
///
/// # Errors
///
/// Returns [`ArgTreeError::TomlParseError`] if the text is not valid TOML.
pub fn parse_str(text: &str) -> Result<Table> {
    text.parse::<Table>()
        .map_err(|e| ArgTreeError::toml_parse(e, None))
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
#[instrument]
pub fn load_file(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path).map_err(|e| ArgTreeError::io(e, path))?;
    let table = content
        .parse::<Table>()
        .map_err(|e| ArgTreeError::toml_parse(e, Some(path)))?;

    debug!(keys = table.len(), "loaded configuration file");
    Ok(table)
}

/// Loads several files and merges them, later files taking precedence.
///
/// # Errors
///
/// Returns the first file that cannot be read or parsed.
pub fn load_layered<P: AsRef<Path>>(paths: &[P]) -> Result<Table> {
    let layers = paths
        .iter()
        .map(|path| load_file(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(merge_layers(layers))
}

/// Writes a table as TOML text.
///
/// # Errors
///
/// Returns [`ArgTreeError::Serialization`] if the table cannot be represented.
pub fn to_toml_string(table: &Table) -> Result<String> {
    toml::to_string(table).map_err(|e| ArgTreeError::Serialization {
        details: e.to_string(),
    })
}

/// Converts a table into a provisional tree.
///
/// Array items that are tables or arrays cannot be bound to any parameter;
/// they are reported and left out.
pub fn tree_from_table(table: &Table) -> (ProvisionalTree, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tree = convert_table(table, "", &mut diagnostics);
    (tree, diagnostics)
}

fn convert_table(table: &Table, path: &str, diagnostics: &mut Diagnostics) -> ProvisionalTree {
    table
        .iter()
        .map(|(key, value)| {
            let converted = match value {
                Value::Table(sub) => {
                    let sub_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    Provisional::Object(convert_table(sub, &sub_path, diagnostics))
                }
                Value::Array(items) => {
                    Provisional::List(convert_array(key, items, path, diagnostics))
                }
                scalar => Provisional::Value(literal(scalar)),
            };
            (key.clone(), converted)
        })
        .collect()
}

fn convert_array(
    key: &str,
    items: &[Value],
    path: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<ValueRef> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Table(_) | Value::Array(_) => {
                diagnostics.push(Diagnostic::UnsupportedArrayItem {
                    key: key.to_string(),
                    index,
                    found: item.type_str().to_string(),
                    at: Location::new(path, ""),
                });
                None
            }
            scalar => Some(literal(scalar)),
        })
        .collect()
}

fn literal(value: &Value) -> ValueRef {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        Value::Array(_) | Value::Table(_) => value.to_string(),
    };
    ValueRef::Literal(text)
}

/// Converts `table` and matches it against `registry`.
///
/// Unknown keys are reported; the returned diagnostics also contain any
/// unsupported array items.
pub fn bind_table(registry: &SchemaRegistry, table: &Table) -> (BoundConfiguration, Diagnostics) {
    let (mut tree, mut diagnostics) = tree_from_table(table);
    let mut tokens = RawTokenList::new();

    let (bound, matched) = matcher::match_tree(registry, &mut tree, &mut tokens, false, "");
    diagnostics.append(matched);

    (bound, diagnostics)
}
