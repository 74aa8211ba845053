//! The atomic alphabet unit shared by rule keys and system state.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A single symbol of the rewriting alphabet.
///
/// Symbols are string-backed so that reserved multi-character tokens (`@Q.5`, `%3`)
/// and plain single-character symbols (`F`, `+`) share one representation. A
/// symbol is never empty when produced by a [`Tokenizer`](crate::Tokenizer).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the literal textual form of the symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the literal form in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Renders a symbol sequence back to a flat string, preserving order.
///
/// This is the command stream handed to a turtle interpreter.
pub fn stringify(symbols: &[Symbol]) -> String {
    let mut out = String::with_capacity(symbols.iter().map(Symbol::len).sum());
    for sym in symbols {
        out.push_str(sym.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stringify_preserves_order_and_multichar_tokens() {
        let syms: Vec<Symbol> = ["F", "@Q.5", "[", "+", "F", "]"]
            .into_iter()
            .map(Symbol::from)
            .collect();
        assert_eq!(stringify(&syms), "F@Q.5[+F]");
        assert_eq!(stringify(&[]), "");
    }

    #[test]
    fn char_symbols_handle_multibyte() {
        let s = Symbol::from('λ');
        assert_eq!(s.as_str(), "λ");
        assert_eq!(s.len(), 2);
    }
}
