//! Config objects and their binding to matched values.
//!
//! A [`ConfigObject`] declares which of its fields are parameters. Declaring
//! produces [`Params`], which holds both the schema for the matcher and the
//! field bindings that later receive values.

mod diff;
mod params;


pub use params::Params;

use toml::Table;

use crate::{
    core::Result, diagnostics::Diagnostics, matcher::BoundConfiguration, schema::SchemaRegistry,
};

/// A structured configuration whose fields can be set from the command line
/// or from configuration files.
///
/// ```
/// use argtree::binder::{ConfigObject, Params};
///
/// #[derive(Default)]
/// struct Output {
///     path: String,
///     append: bool,
/// }
///
/// impl ConfigObject for Output {
///     fn type_name(&self) -> &str {
///         "Output"
///     }
///
///     fn declare<'a>(&'a mut self, params: &mut Params<'a>) {
///         params
///             .value("path", Some('o'), &mut self.path, "file to write")
///             .flag("append", None, &mut self.append, "append instead of truncating");
///     }
/// }
/// ```
pub trait ConfigObject {
    /// Name shown in diagnostics and help output.
    fn type_name(&self) -> &str;

    /// One line describing the object.
    fn description(&self) -> &str {
        ""
    }

    /// Registers the object's parameters, bound to its own fields.
    fn declare<'a>(&'a mut self, params: &mut Params<'a>);
}

/// Applies matched values to `object`.
///
/// # Errors
///
/// Returns an error if the object's declaration is invalid. Values that were
/// refused by their adapter are returned as diagnostics instead.
pub fn apply<O: ConfigObject + ?Sized>(
    object: &mut O,
    bound: &BoundConfiguration,
) -> Result<Diagnostics> {
    Ok(Params::declare(object)?.apply(bound))
}

/// Reads the values of `object` that differ from a default instance.
///
/// Nested objects without changes are left out.
///
/// # Errors
///
/// Returns an error if the object's declaration is invalid.
pub fn read<O: ConfigObject + Default>(object: &mut O) -> Result<Table> {
    let mut defaults = O::default();
    let default_values = Params::declare(&mut defaults)?.snapshot();
    let current_values = Params::declare(object)?.snapshot();

    Ok(diff::changed_values(&default_values, &current_values))
}

/// The schema `object` declares.
///
/// # Errors
///
/// Returns an error if the object's declaration is invalid.
pub fn schema<O: ConfigObject + ?Sized>(object: &mut O) -> Result<SchemaRegistry> {
    Ok(Params::declare(object)?.registry().clone())
}
