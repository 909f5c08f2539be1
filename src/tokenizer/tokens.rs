use super::TokenIndex;

/// A bare command-line argument and whether it has been claimed as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    /// The argument as given
    pub text: String,
    /// Set once a parameter takes this argument as its value
    pub consumed: bool,
}

/// Bare arguments in original order.
///
/// Every entry starts unconsumed. The matcher marks an entry consumed when it
/// decides the argument is a parameter value; entries never marked are the free
/// arguments. Marks are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTokenList {
    tokens: Vec<RawToken>,
}

impl RawTokenList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an unconsumed argument and returns its index.
    pub fn push(&mut self, text: impl Into<String>) -> TokenIndex {
        self.tokens.push(RawToken {
            text: text.into(),
            consumed: false,
        });
        TokenIndex(self.tokens.len() - 1)
    }

    /// Text of the argument at `index`.
    pub fn text(&self, index: TokenIndex) -> Option<&str> {
        self.tokens.get(index.0).map(|t| t.text.as_str())
    }

    /// Whether the argument at `index` has been claimed.
    pub fn is_consumed(&self, index: TokenIndex) -> bool {
        self.tokens.get(index.0).is_some_and(|t| t.consumed)
    }

    /// Claims the argument at `index` as a value and returns its text.
    ///
    /// Returns `None` only for an index that does not belong to this list.
    pub fn consume(&mut self, index: TokenIndex) -> Option<String> {
        let token = self.tokens.get_mut(index.0)?;
        debug_assert!(!token.consumed, "token {} consumed twice", index.0);
        token.consumed = true;
        Some(token.text.clone())
    }

    /// Unclaimed arguments in original order.
    pub fn free_arguments(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| !t.consumed)
            .map(|t| t.text.clone())
            .collect()
    }

    /// Iterates over all entries in original order.
    pub fn iter(&self) -> impl Iterator<Item = &RawToken> {
        self.tokens.iter()
    }

    /// Number of entries, consumed or not.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no bare argument was seen.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
