use toml::{Table, Value};

/// A value resolved for one declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// A flag mentioned without explicit value
    Bool(bool),
    /// A single value, still as text
    Str(String),
    /// All values of a list parameter, in order
    List(Vec<String>),
    /// Values of a nested object
    Object(BoundConfiguration),
}

impl BoundValue {
    /// The value as it appears in a configuration tree.
    pub fn to_toml(&self) -> Value {
        match self {
            BoundValue::Bool(b) => Value::Boolean(*b),
            BoundValue::Str(text) => Value::String(text.clone()),
            BoundValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            BoundValue::Object(sub) => Value::Table(sub.to_toml()),
        }
    }

    /// The value rendered for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            BoundValue::Bool(b) => b.to_string(),
            BoundValue::Str(text) => format!("\"{text}\""),
            BoundValue::List(items) => format!("{items:?}"),
            BoundValue::Object(sub) => format!("{{{}}}", sub.len()),
        }
    }
}

/// Resolved values keyed by declared parameter name, in matching order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundConfiguration {
    entries: Vec<(String, BoundValue)>,
}

impl BoundConfiguration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a parameter, replacing an earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: BoundValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value bound to the parameter `name`.
    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut BoundValue> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Whether nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of bound parameters at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over names and values in matching order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// The configuration as a TOML table.
    pub fn to_toml(&self) -> Table {
        self.entries
            .iter()
            .map(|(name, value)| (name.clone(), value.to_toml()))
            .collect()
    }
}
