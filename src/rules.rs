//! Production rules of a DOL system.

use crate::symbol::Symbol;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single production `from -> to`.
///
/// `to` is kept unparsed; it is tokenized by the system's
/// [`Tokenizer`](crate::Tokenizer) when the rule fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub from: Symbol,
    pub to: String,
}

/// The rule table: at most one replacement per left-hand-side symbol.
///
/// Registration order is preserved and observable through [`iter`](Self::iter)
/// and [`keys`](Self::keys). The [`PatternTokenizer`](crate::PatternTokenizer)
/// relies on it to break ties between rule keys of equal length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Production>", into = "Vec<Production>")]
pub struct Rules {
    productions: IndexMap<Symbol, String>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the rule for `from`, silently replacing any existing one.
    ///
    /// An overwritten rule keeps the registration position of the original.
    /// Callers that need strict one-rule-per-symbol validation should check
    /// [`contains`](Self::contains) first.
    pub fn add(&mut self, from: impl Into<Symbol>, to: impl Into<String>) {
        self.productions.insert(from.into(), to.into());
    }

    /// Chained form of [`add`](Self::add) (builder pattern).
    pub fn with(mut self, from: impl Into<Symbol>, to: impl Into<String>) -> Self {
        self.add(from, to);
        self
    }

    /// Looks up the unparsed replacement for `symbol`.
    ///
    /// `None` means the symbol is terminal and is copied unchanged.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.productions.get(symbol).map(String::as_str)
    }

    /// Returns the registration index of the rule for `symbol`.
    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.productions.get_index_of(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.productions.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Iterates `(from, to)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &str)> {
        self.productions.iter().map(|(from, to)| (from, to.as_str()))
    }

    /// Iterates left-hand sides in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &Symbol> {
        self.productions.keys()
    }
}

impl<K: Into<Symbol>, V: Into<String>> Extend<(K, V)> for Rules {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (from, to) in iter {
            self.add(from, to);
        }
    }
}

impl<K: Into<Symbol>, V: Into<String>> FromIterator<(K, V)> for Rules {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rules = Rules::new();
        rules.extend(iter);
        rules
    }
}

impl From<Vec<Production>> for Rules {
    fn from(productions: Vec<Production>) -> Self {
        productions.into_iter().map(|p| (p.from, p.to)).collect()
    }
}

impl From<Rules> for Vec<Production> {
    fn from(rules: Rules) -> Self {
        rules
            .productions
            .into_iter()
            .map(|(from, to)| Production { from, to })
            .collect()
    }
}
