//! Schema-directed second pass.
//!
//! The matcher walks a [`ProvisionalTree`] against a [`SchemaRegistry`] and
//! decides what every entry means: which declared parameter a key names,
//! whether a bare argument after a parameter is its value or a free argument,
//! and whether a value is a flag setting, a scalar or a list. Nested objects are
//! matched recursively against their own registries.
//!
//! Side effects on the inputs are part of the contract: token list entries that
//! turn out to be values are marked consumed, and every key that was understood
//! is removed from the tree. After a successful top-level match the tree is
//! empty.

mod bound;

#[cfg(test)]
mod tests;

pub use bound::{BoundConfiguration, BoundValue};

use tracing::{debug, trace, warn};

use crate::{
    diagnostics::{Diagnostic, Diagnostics, Location},
    schema::{ParamKind, SchemaRegistry},
    tokenizer::{Provisional, ProvisionalTree, RawTokenList, ValueRef},
};

/// Matches `tree` against `registry`.
///
/// Unknown keys are reported unless `ignore_unknown` is set, in which case they
/// stay in the tree for a later match against another registry. `context` is the
/// dotted path of the object being matched, empty for the root.
pub fn match_tree(
    registry: &SchemaRegistry,
    tree: &mut ProvisionalTree,
    tokens: &mut RawTokenList,
    ignore_unknown: bool,
    context: &str,
) -> (BoundConfiguration, Diagnostics) {
    let mut matcher = Matcher {
        tokens,
        ignore_unknown,
        diagnostics: Diagnostics::new(),
    };

    let bound = matcher.match_object(registry, tree, context);

    debug!(
        object = registry.type_name(),
        context,
        bound = bound.len(),
        left = tree.len(),
        diagnostics = matcher.diagnostics.len(),
        "matched configuration"
    );

    (bound, matcher.diagnostics)
}

/// What matching one entry produced.
enum Outcome {
    /// A value for the parameter; the key is consumed if `done`.
    Bound { value: BoundValue, done: bool },
    /// Understood, but nothing to bind.
    Understood,
    /// A diagnostic was reported; the key stays in the tree.
    Rejected,
}

struct Matcher<'t> {
    tokens: &'t mut RawTokenList,
    ignore_unknown: bool,
    diagnostics: Diagnostics,
}

impl Matcher<'_> {
    fn match_object(
        &mut self,
        registry: &SchemaRegistry,
        tree: &mut ProvisionalTree,
        context: &str,
    ) -> BoundConfiguration {
        let at = Location::new(context, registry.type_name());
        let mut bound = BoundConfiguration::new();
        let mut matched_keys = Vec::new();

        for (key, value) in tree.entries_mut() {
            let Some(param) = registry.resolve(key) else {
                if !self.ignore_unknown {
                    self.diagnostics.push(Diagnostic::UnknownParameter {
                        key: key.clone(),
                        at: at.clone(),
                    });
                }
                continue;
            };

            trace!(
                key = key.as_str(),
                param = param.name.as_str(),
                kind = param.kind.label(),
                "resolved key"
            );

            if matches!(value, Provisional::List(_)) && param.kind != ParamKind::List {
                self.conflict(key, "expects a single value, but a list was given", &at);
                continue;
            }

            let outcome = match &param.kind {
                ParamKind::Nested(sub_registry) => {
                    self.match_nested(sub_registry, key, value, context, &at)
                }
                ParamKind::Flag => self.match_flag(key, value, &at),
                ParamKind::Scalar => self.match_scalar(key, value, &at),
                ParamKind::List => self.match_list(key, value, &at),
            };

            match outcome {
                Outcome::Bound { value, done } => {
                    if self.bind(&mut bound, &param.name, key, value, &at) && done {
                        matched_keys.push(key.clone());
                    }
                }
                Outcome::Understood => matched_keys.push(key.clone()),
                Outcome::Rejected => {}
            }
        }

        for key in matched_keys {
            tree.remove(&key);
        }

        bound
    }

    fn match_nested(
        &mut self,
        registry: &SchemaRegistry,
        key: &str,
        value: &mut Provisional,
        context: &str,
        at: &Location,
    ) -> Outcome {
        match value {
            Provisional::Object(sub_tree) if sub_tree.is_empty() => Outcome::Understood,
            Provisional::Object(sub_tree) => {
                let sub_context = if context.is_empty() {
                    key.to_string()
                } else {
                    format!("{context}.{key}")
                };

                let sub_bound = self.match_object(registry, sub_tree, &sub_context);
                Outcome::Bound {
                    value: BoundValue::Object(sub_bound),
                    done: sub_tree.is_empty(),
                }
            }
            // a bare mention, or a following argument that is then left free
            Provisional::NoValue | Provisional::Value(ValueRef::Token(_)) => Outcome::Understood,
            // would select the object's type; only the declared type exists
            Provisional::Value(ValueRef::Literal(text)) => {
                warn!(
                    key,
                    value = text.as_str(),
                    at = %at,
                    "ignoring value given to an object parameter"
                );
                self.diagnostics.push(Diagnostic::IgnoredObjectValue {
                    key: key.to_string(),
                    value: text.clone(),
                    at: at.clone(),
                });
                Outcome::Understood
            }
            Provisional::List(_) => {
                self.conflict(key, "expects a single value, but a list was given", at);
                Outcome::Rejected
            }
        }
    }

    fn match_flag(&mut self, key: &str, value: &Provisional, at: &Location) -> Outcome {
        match value {
            Provisional::Value(ValueRef::Literal(text)) => Outcome::Bound {
                value: BoundValue::Str(text.clone()),
                done: true,
            },
            // presence means on; a following bare argument stays free
            Provisional::NoValue | Provisional::Value(ValueRef::Token(_)) => Outcome::Bound {
                value: BoundValue::Bool(true),
                done: true,
            },
            Provisional::List(_) | Provisional::Object(_) => {
                self.conflict(key, "is a flag and does not take sub parameters", at);
                Outcome::Rejected
            }
        }
    }

    fn match_scalar(&mut self, key: &str, value: &Provisional, at: &Location) -> Outcome {
        match value {
            Provisional::Value(value_ref) => match self.resolve(value_ref) {
                Some(text) => Outcome::Bound {
                    value: BoundValue::Str(text),
                    done: true,
                },
                None => self.missing(key, at),
            },
            Provisional::NoValue => self.missing(key, at),
            Provisional::List(_) | Provisional::Object(_) => {
                self.conflict(key, "does not take sub parameters", at);
                Outcome::Rejected
            }
        }
    }

    fn match_list(&mut self, key: &str, value: &Provisional, at: &Location) -> Outcome {
        let values = match value {
            Provisional::Value(value_ref) => match self.resolve(value_ref) {
                Some(text) => vec![text],
                None => return self.missing(key, at),
            },
            // may be empty when it comes from a configuration file
            Provisional::List(items) => items.iter().filter_map(|item| self.resolve(item)).collect(),
            Provisional::NoValue => return self.missing(key, at),
            Provisional::Object(_) => {
                self.conflict(key, "does not take sub parameters", at);
                return Outcome::Rejected;
            }
        };

        Outcome::Bound {
            value: BoundValue::List(values),
            done: true,
        }
    }

    /// Binds `value` to the parameter `name`, reached through `key`.
    ///
    /// A parameter can be reached by its long and its short name. Lists
    /// collect the values of every spelling, grouped by spelling in order of
    /// first appearance. Any other parameter may only be bound once unless the
    /// values agree. Returns whether the key was taken.
    fn bind(
        &mut self,
        bound: &mut BoundConfiguration,
        name: &str,
        key: &str,
        value: BoundValue,
        at: &Location,
    ) -> bool {
        if let Some(existing) = bound.get_mut(name) {
            return match (existing, value) {
                (BoundValue::List(items), BoundValue::List(more)) => {
                    items.extend(more);
                    true
                }
                (existing, value) if *existing == value => true,
                _ => {
                    self.conflict(key, "is given more than once", at);
                    false
                }
            };
        }

        bound.insert(name, value);
        true
    }

    fn resolve(&mut self, value: &ValueRef) -> Option<String> {
        match value {
            ValueRef::Literal(text) => Some(text.clone()),
            ValueRef::Token(index) => self.tokens.consume(*index),
        }
    }

    fn missing(&mut self, key: &str, at: &Location) -> Outcome {
        self.diagnostics.push(Diagnostic::MissingValue {
            key: key.to_string(),
            at: at.clone(),
        });
        Outcome::Rejected
    }

    fn conflict(&mut self, key: &str, reason: &str, at: &Location) {
        self.diagnostics.push(Diagnostic::StructuralConflict {
            key: key.to_string(),
            reason: reason.to_string(),
            at: at.clone(),
        });
    }
}
