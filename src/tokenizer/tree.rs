use std::slice;

/// Position of a value candidate in the [`RawTokenList`](super::RawTokenList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenIndex(pub(super) usize);

impl TokenIndex {
    /// Zero-based position in the token list.
    pub fn get(self) -> usize {
        self.0
    }
}

/// A value that is either still attached to a raw token or already final.
///
/// Consuming a `Token` reference marks the shared token list entry; consuming a
/// `Literal` does not touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueRef {
    /// A bare argument that may turn out to be a free argument instead.
    Token(TokenIndex),
    /// A value given with `=`, or read from a configuration file.
    Literal(String),
}

/// What the tokenizer knows about one key before any schema is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisional {
    /// The name was seen without a value.
    NoValue,
    /// A single value.
    Value(ValueRef),
    /// Values of a repeated name, in order of occurrence.
    List(Vec<ValueRef>),
    /// Sub parameters of a dotted name.
    Object(ProvisionalTree),
}

/// Returned by [`Provisional::assign`] when the slot is an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectConflict;

impl Provisional {
    /// Adds a value to this slot.
    ///
    /// An empty slot takes the value; a slot that already has one becomes a list
    /// holding both, so repetition accumulates instead of overwriting.
    ///
    /// # Errors
    ///
    /// Returns `ObjectConflict` and leaves the slot untouched if it already
    /// holds sub parameters.
    pub fn assign(&mut self, value: ValueRef) -> Result<(), ObjectConflict> {
        match self {
            Provisional::NoValue => *self = Provisional::Value(value),
            Provisional::Value(_) => {
                if let Provisional::Value(first) = std::mem::replace(self, Provisional::NoValue) {
                    *self = Provisional::List(vec![first, value]);
                }
            }
            Provisional::List(values) => values.push(value),
            Provisional::Object(_) => return Err(ObjectConflict),
        }
        Ok(())
    }
}

/// Insertion-ordered mapping from path segments to provisional values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionalTree {
    entries: Vec<(String, Provisional)>,
}

impl ProvisionalTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a key.
    pub fn get(&self, key: &str) -> Option<&Provisional> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Looks up a key for modification.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Provisional> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Sets a key, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Provisional) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the slot for `key`, creating it with `default` if missing.
    pub fn entry_or_insert(&mut self, key: &str, default: Provisional) -> &mut Provisional {
        let index = match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), default));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Removes a key and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<Provisional> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Follows a path of object keys.
    pub fn get_path(&self, path: &[&str]) -> Option<&Provisional> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for part in parents {
            match current.get(part)? {
                Provisional::Object(sub) => current = sub,
                _ => return None,
            }
        }
        current.get(last)
    }

    /// Follows a path of object keys for modification.
    pub fn get_path_mut(&mut self, path: &[String]) -> Option<&mut Provisional> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for part in parents {
            match current.get_mut(part)? {
                Provisional::Object(sub) => current = sub,
                _ => return None,
            }
        }
        current.get_mut(last)
    }

    /// Number of keys at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key is left at this level.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys and values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Provisional)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys at this level in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub(crate) fn entries_mut(&mut self) -> slice::IterMut<'_, (String, Provisional)> {
        self.entries.iter_mut()
    }
}

impl<K: Into<String>> FromIterator<(K, Provisional)> for ProvisionalTree {
    fn from_iter<T: IntoIterator<Item = (K, Provisional)>>(iter: T) -> Self {
        let mut tree = ProvisionalTree::new();
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}
