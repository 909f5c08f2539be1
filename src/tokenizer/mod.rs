//! Context-free first pass over the command line.
//!
//! The tokenizer turns raw arguments into a [`ProvisionalTree`] without looking
//! at any schema. Whether a bare argument is the value of the parameter before
//! it or a free argument is left open: the tree only stores its index into the
//! [`RawTokenList`], and the matcher settles the question later.
//!
//! Grammar:
//!
//! - `--name`, `--obj.sub.name`: long parameter, `.` descends into objects
//! - `--name=value`: explicit assignment, the value is final
//! - `-xyz`: the short parameters `x`, `y` and `z`
//! - `-x=value`: explicit assignment to a short parameter
//! - anything else (including a lone `-`): value candidate or free argument
//!
//! Values starting with `-` must be given with `=`; `-5` reads as the short
//! parameter `5`.

mod tokens;
mod tree;

#[cfg(test)]
mod tests;

pub use tokens::{RawToken, RawTokenList};
pub use tree::{ObjectConflict, Provisional, ProvisionalTree, TokenIndex, ValueRef};

use tracing::{debug, trace, warn};

use crate::{
    diagnostics::{Diagnostic, Diagnostics, Location},
    params::boolean,
};

/// Result of tokenizing a command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    /// Parameters by path, values still unresolved
    pub tree: ProvisionalTree,
    /// Bare arguments, all unconsumed
    pub tokens: RawTokenList,
    /// Problems found while structuring
    pub diagnostics: Diagnostics,
}

/// Structures command-line arguments into a provisional tree.
///
/// `args` must not include the program path.
pub fn tokenize<I, S>(args: I) -> Tokenized
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokenizer = Tokenizer::default();

    for arg in args {
        tokenizer.feed(arg.as_ref());
    }

    debug!(
        keys = tokenizer.out.tree.len(),
        tokens = tokenizer.out.tokens.len(),
        diagnostics = tokenizer.out.diagnostics.len(),
        "tokenized command line"
    );

    tokenizer.out
}

#[derive(Default)]
struct Tokenizer {
    out: Tokenized,
    pending: Option<Vec<String>>,
}

impl Tokenizer {
    fn feed(&mut self, arg: &str) {
        trace!(arg, "tokenizing argument");

        if is_parameter(arg) {
            self.pending = match arg.strip_prefix("--") {
                Some(long) => self.long_parameter(arg, long),
                None => self.short_parameters(arg, &arg[1..]),
            };
            return;
        }

        let index = self.out.tokens.push(arg);

        match self.pending.take() {
            Some(path) => self.assign(&path, arg, ValueRef::Token(index)),
            None => {
                if boolean::parse(arg).is_some() {
                    warn!(arg, "bare argument reads as a boolean");
                    self.out.diagnostics.push(Diagnostic::AmbiguousBoolean {
                        argument: arg.to_string(),
                    });
                }
            }
        }
    }

    fn long_parameter(&mut self, arg: &str, body: &str) -> Option<Vec<String>> {
        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let segments: Vec<&str> = name.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            self.out.diagnostics.push(Diagnostic::EmptySegment {
                argument: arg.to_string(),
            });
            return None;
        }

        let (last, parents) = segments.split_last()?;

        if let Some(depth) = conflicting_segment(&self.out.tree, parents) {
            self.out.diagnostics.push(Diagnostic::StructuralConflict {
                key: segments[..=depth].join("."),
                reason: format!(
                    "error parsing argument \"{arg}\": already assigned a value, cannot hold sub parameters"
                ),
                at: Location::new(segments[..depth].join("."), ""),
            });
            return None;
        }

        let parent = create_objects(&mut self.out.tree, parents)?;
        parent.entry_or_insert(last, Provisional::NoValue);

        let path: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
        match value {
            Some(value) => {
                self.assign(&path, arg, ValueRef::Literal(value.to_string()));
                None
            }
            None => Some(path),
        }
    }

    fn short_parameters(&mut self, arg: &str, body: &str) -> Option<Vec<String>> {
        let (names, value) = match body.split_once('=') {
            Some((names, value)) => (names, Some(value)),
            None => (body, None),
        };

        if names.is_empty() {
            self.out.diagnostics.push(Diagnostic::EmptySegment {
                argument: arg.to_string(),
            });
            return None;
        }

        let mut last = None;
        for short in names.chars() {
            let key = short.to_string();
            self.out.tree.entry_or_insert(&key, Provisional::NoValue);
            last = Some(vec![key]);
        }

        match (last, value) {
            (Some(path), Some(value)) => {
                self.assign(&path, arg, ValueRef::Literal(value.to_string()));
                None
            }
            (last, _) => last,
        }
    }

    fn assign(&mut self, path: &[String], arg: &str, value: ValueRef) {
        let Some(slot) = self.out.tree.get_path_mut(path) else {
            return;
        };

        if slot.assign(value).is_err() {
            let parents = &path[..path.len().saturating_sub(1)];
            self.out.diagnostics.push(Diagnostic::StructuralConflict {
                key: path.join("."),
                reason: format!(
                    "error parsing argument \"{arg}\": cannot assign a value because a sub parameter has already been defined"
                ),
                at: Location::new(parents.join("."), ""),
            });
        }
    }
}

fn is_parameter(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

/// Depth of the first segment along `parents` that holds a value and
/// therefore cannot become an object.
fn conflicting_segment(tree: &ProvisionalTree, parents: &[&str]) -> Option<usize> {
    let mut current = tree;

    for (depth, part) in parents.iter().enumerate() {
        match current.get(part) {
            None | Some(Provisional::NoValue) => return None,
            Some(Provisional::Object(sub)) => current = sub,
            Some(Provisional::Value(_) | Provisional::List(_)) => return Some(depth),
        }
    }

    None
}

/// Walks `parents`, creating empty objects where needed. A bare mention
/// without value is upgraded to an object.
///
/// Returns `None` if a segment holds a value; see [`conflicting_segment`].
fn create_objects<'a>(
    tree: &'a mut ProvisionalTree,
    parents: &[&str],
) -> Option<&'a mut ProvisionalTree> {
    let mut current = tree;

    for part in parents {
        let slot = current.entry_or_insert(part, Provisional::Object(ProvisionalTree::new()));
        if let Provisional::NoValue = slot {
            *slot = Provisional::Object(ProvisionalTree::new());
        }
        let Provisional::Object(sub) = slot else {
            return None;
        };
        current = sub;
    }

    Some(current)
}
