use toml::{Table, Value};
use tracing::{debug, instrument};

use super::ConfigObject;
use crate::{
    core::{ArgTreeError, Result},
    diagnostics::{Diagnostic, Diagnostics, Location},
    matcher::{BoundConfiguration, BoundValue},
    params::{ParamAdapter, ParamValue, ValueParam},
    schema::{ParamKind, ParameterSchema, SchemaRegistry},
};

enum Binding<'a> {
    Value(Box<dyn ParamAdapter + 'a>),
    Object(Params<'a>),
}

/// Declared parameters of one config object, bound to its fields.
///
/// Built by [`Params::declare`], which lets the object register every field it
/// exposes. The resulting registry drives the matcher; the bindings receive the
/// matched values in [`apply`](Params::apply) and report them back in
/// [`read`](Params::read).
pub struct Params<'a> {
    registry: SchemaRegistry,
    bindings: Vec<(String, Binding<'a>)>,
    errors: Vec<ArgTreeError>,
}

impl<'a> Params<'a> {
    /// Collects the parameters `object` declares.
    ///
    /// # Errors
    ///
    /// Returns the first declaration mistake: an unusable name, or a long or
    /// short name used twice within one object.
    pub fn declare<O: ConfigObject + ?Sized>(object: &'a mut O) -> Result<Self> {
        let mut params = Params::empty(object.type_name(), object.description());
        object.declare(&mut params);

        if !params.errors.is_empty() {
            return Err(params.errors.remove(0));
        }

        Ok(params)
    }

    fn empty(type_name: &str, description: &str) -> Self {
        Self {
            registry: SchemaRegistry::new(type_name, description),
            bindings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Declares a parameter of any bindable type.
    ///
    /// Whether it is a flag, a scalar or a list follows from `T`. The current
    /// value of `target` becomes the default.
    pub fn value<T: ParamValue + 'a>(
        &mut self,
        name: &str,
        short: Option<char>,
        target: &'a mut T,
        description: &str,
    ) -> &mut Self {
        let adapter = ValueParam::new(target);
        let mut schema = ParameterSchema::new(name, ParamKind::from(T::KIND))
            .with_description(description);
        schema.short_name = short;

        self.register(schema, Binding::Value(Box::new(adapter)))
    }

    /// Declares a boolean flag.
    pub fn flag(
        &mut self,
        name: &str,
        short: Option<char>,
        target: &'a mut bool,
        description: &str,
    ) -> &mut Self {
        self.value(name, short, target, description)
    }

    /// Declares a list of strings, filled from repeated mentions.
    pub fn list(
        &mut self,
        name: &str,
        short: Option<char>,
        target: &'a mut Vec<String>,
        description: &str,
    ) -> &mut Self {
        self.value(name, short, target, description)
    }

    /// Declares a nested config object, addressed as `--name.sub`.
    pub fn object<O: ConfigObject + ?Sized>(
        &mut self,
        name: &str,
        object: &'a mut O,
        description: &str,
    ) -> &mut Self {
        let mut child = Params::empty(object.type_name(), object.description());
        object.declare(&mut child);
        self.errors.append(&mut child.errors);

        let schema = ParameterSchema::nested(name, child.registry.clone())
            .with_description(description);
        self.register(schema, Binding::Object(child))
    }

    fn register(&mut self, schema: ParameterSchema, binding: Binding<'a>) -> &mut Self {
        let name = schema.name.clone();
        match self.registry.insert(schema) {
            Ok(()) => self.bindings.push((name, binding)),
            Err(error) => self.errors.push(error),
        }
        self
    }

    /// The schema the matcher consumes.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Adapter of the value parameter `name`.
    pub fn adapter(&self, name: &str) -> Option<&dyn ParamAdapter> {
        match self.binding(name)? {
            Binding::Value(adapter) => Some(adapter.as_ref()),
            Binding::Object(_) => None,
        }
    }

    /// Parameters of the nested object `name`.
    pub fn child(&self, name: &str) -> Option<&Params<'a>> {
        match self.binding(name)? {
            Binding::Object(child) => Some(child),
            Binding::Value(_) => None,
        }
    }

    fn binding(&self, name: &str) -> Option<&Binding<'a>> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    fn binding_mut(&mut self, name: &str) -> Option<&mut Binding<'a>> {
        self.bindings
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    /// Stores matched values into the bound fields.
    ///
    /// Values that their adapter refuses leave the field untouched and are
    /// reported; every other value is still applied.
    #[instrument(skip_all, fields(object = self.registry.type_name()))]
    pub fn apply(&mut self, bound: &BoundConfiguration) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        self.apply_at(bound, "", &mut diagnostics);
        debug!(rejected = diagnostics.len(), "applied configuration");
        diagnostics
    }

    fn apply_at(&mut self, bound: &BoundConfiguration, context: &str, out: &mut Diagnostics) {
        let at = Location::new(context, self.registry.type_name());

        for (name, value) in bound.iter() {
            match (self.binding_mut(name), value) {
                (Some(Binding::Value(adapter)), value) => {
                    if !adapter.accept(value) {
                        out.push(Diagnostic::AdapterRejected {
                            key: name.to_string(),
                            value: value.describe(),
                            expected: adapter.value_type().to_string(),
                            at: at.clone(),
                        });
                    }
                }
                (Some(Binding::Object(child)), BoundValue::Object(sub)) => {
                    let sub_context = if context.is_empty() {
                        name.to_string()
                    } else {
                        format!("{context}.{name}")
                    };
                    child.apply_at(sub, &sub_context, out);
                }
                (Some(Binding::Object(_)), _) => out.push(Diagnostic::StructuralConflict {
                    key: name.to_string(),
                    reason: "cannot assign a value to an object parameter".to_string(),
                    at: at.clone(),
                }),
                (None, _) => out.push(Diagnostic::UnknownParameter {
                    key: name.to_string(),
                    at: at.clone(),
                }),
            }
        }
    }

    /// Current values that differ from their defaults.
    ///
    /// Nested objects without any changed value are left out entirely, so the
    /// result of a freshly declared object is an empty table.
    pub fn read(&self) -> Table {
        let mut table = Table::new();

        for (name, binding) in &self.bindings {
            match binding {
                Binding::Value(adapter) => {
                    if let Some(value) = adapter.current() {
                        table.insert(name.clone(), value);
                    }
                }
                Binding::Object(child) => {
                    let sub = child.read();
                    if !sub.is_empty() {
                        table.insert(name.clone(), Value::Table(sub));
                    }
                }
            }
        }

        table
    }

    /// Every current value, changed or not.
    pub fn snapshot(&self) -> Table {
        self.bindings
            .iter()
            .map(|(name, binding)| {
                let value = match binding {
                    Binding::Value(adapter) => adapter.value(),
                    Binding::Object(child) => Value::Table(child.snapshot()),
                };
                (name.clone(), value)
            })
            .collect()
    }
}
