//! Typed parameter adapters.
//!
//! The matcher only resolves which value belongs to which parameter. Turning
//! that value into a Rust value, and reporting the current value back, is the
//! job of the adapters here. [`ParamValue`] describes a bindable type;
//! [`ValueParam`] connects one field of a config object to the binder.

pub mod boolean;
mod byte_size;

#[cfg(test)]
mod tests;

pub use byte_size::{ByteSize, ByteSizeError};

use toml::Value;

use crate::{matcher::BoundValue, schema::ParamKind};

/// How a bindable type is addressed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Presence means `true`
    Flag,
    /// Takes exactly one value
    Scalar,
    /// Takes a value per repetition
    List,
}

impl From<ValueKind> for ParamKind {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Flag => ParamKind::Flag,
            ValueKind::Scalar => ParamKind::Scalar,
            ValueKind::List => ParamKind::List,
        }
    }
}

/// A type that config object fields can be bound to.
///
/// Implement this for custom field types (enums, newtypes) to make them
/// declarable as parameters.
pub trait ParamValue: Clone + PartialEq {
    /// How the parameter is addressed.
    const KIND: ValueKind;

    /// Description of accepted values, used in help output and diagnostics.
    const TYPE_NAME: &'static str;

    /// Converts a matched value, or `None` if its contents are not acceptable.
    fn from_bound(value: &BoundValue) -> Option<Self>;

    /// The value as it appears in a configuration tree.
    fn to_toml(&self) -> Value;

    /// The value as shown in help output.
    fn display(&self) -> String;
}

/// Binder-facing interface of one declared value parameter.
pub trait ParamAdapter {
    /// How the parameter is addressed.
    fn kind(&self) -> ValueKind;

    /// Stores a matched value. Returns `false`, leaving the target untouched,
    /// if the value cannot be parsed.
    fn accept(&mut self, value: &BoundValue) -> bool;

    /// The current value, or `None` while it still equals the declared default.
    fn current(&self) -> Option<Value>;

    /// The current value, whether changed or not.
    fn value(&self) -> Value;

    /// Description of accepted values.
    fn value_type(&self) -> &'static str;

    /// The default as shown in help output.
    fn default_display(&self) -> String;
}

/// Adapter binding a parameter to a field.
///
/// The field's value at declaration time is remembered as the default.
pub struct ValueParam<'a, T> {
    target: &'a mut T,
    default: T,
}

impl<'a, T: ParamValue> ValueParam<'a, T> {
    /// Binds to `target`, taking its current value as the default.
    pub fn new(target: &'a mut T) -> Self {
        let default = target.clone();
        Self { target, default }
    }
}

impl<T: ParamValue> ParamAdapter for ValueParam<'_, T> {
    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn accept(&mut self, value: &BoundValue) -> bool {
        match T::from_bound(value) {
            Some(parsed) => {
                *self.target = parsed;
                true
            }
            None => false,
        }
    }

    fn current(&self) -> Option<Value> {
        (*self.target != self.default).then(|| self.target.to_toml())
    }

    fn value(&self) -> Value {
        self.target.to_toml()
    }

    fn value_type(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn default_display(&self) -> String {
        self.default.display()
    }
}

fn single(value: &BoundValue) -> Option<&str> {
    match value {
        BoundValue::Str(text) => Some(text),
        _ => None,
    }
}

impl ParamValue for bool {
    const KIND: ValueKind = ValueKind::Flag;
    const TYPE_NAME: &'static str = "flag";

    fn from_bound(value: &BoundValue) -> Option<Self> {
        match value {
            BoundValue::Bool(b) => Some(*b),
            BoundValue::Str(text) => boolean::parse(text.trim()),
            _ => None,
        }
    }

    fn to_toml(&self) -> Value {
        Value::Boolean(*self)
    }

    fn display(&self) -> String {
        let word = if *self { "on" } else { "off" };
        word.to_string()
    }
}

macro_rules! integer_value {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl ParamValue for $ty {
            const KIND: ValueKind = ValueKind::Scalar;
            const TYPE_NAME: &'static str = $name;

            fn from_bound(value: &BoundValue) -> Option<Self> {
                single(value)?.trim().parse().ok()
            }

            fn to_toml(&self) -> Value {
                match i64::try_from(*self) {
                    Ok(i) => Value::Integer(i),
                    Err(_) => Value::String(self.to_string()),
                }
            }

            fn display(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

integer_value! {
    i32 => "integer",
    i64 => "integer",
    u32 => "non-negative integer",
    u64 => "non-negative integer",
}

macro_rules! float_value {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl ParamValue for $ty {
            const KIND: ValueKind = ValueKind::Scalar;
            const TYPE_NAME: &'static str = $name;

            fn from_bound(value: &BoundValue) -> Option<Self> {
                single(value)?.trim().parse().ok()
            }

            fn to_toml(&self) -> Value {
                Value::Float(f64::from(*self))
            }

            fn display(&self) -> String {
                format!("{self:.2}")
            }
        }
    )*};
}

float_value! {
    f32 => "single",
    f64 => "double",
}

impl ParamValue for String {
    const KIND: ValueKind = ValueKind::Scalar;
    const TYPE_NAME: &'static str = "string";

    fn from_bound(value: &BoundValue) -> Option<Self> {
        single(value).map(str::to_string)
    }

    fn to_toml(&self) -> Value {
        Value::String(self.clone())
    }

    fn display(&self) -> String {
        self.clone()
    }
}

impl ParamValue for Vec<String> {
    const KIND: ValueKind = ValueKind::List;
    const TYPE_NAME: &'static str = "array of strings";

    fn from_bound(value: &BoundValue) -> Option<Self> {
        match value {
            BoundValue::List(items) => Some(items.clone()),
            BoundValue::Str(text) => Some(vec![text.clone()]),
            _ => None,
        }
    }

    fn to_toml(&self) -> Value {
        Value::Array(self.iter().cloned().map(Value::String).collect())
    }

    fn display(&self) -> String {
        if self.is_empty() {
            "none".to_string()
        } else {
            format!("[{}]", self.len())
        }
    }
}

impl ParamValue for ByteSize {
    const KIND: ValueKind = ValueKind::Scalar;
    const TYPE_NAME: &'static str = "non-negative SI/IEC integer";

    fn from_bound(value: &BoundValue) -> Option<Self> {
        single(value)?.parse().ok()
    }

    fn to_toml(&self) -> Value {
        Value::String(self.to_string())
    }

    fn display(&self) -> String {
        self.to_string()
    }
}
