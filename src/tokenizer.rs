//! Splitting replacement strings into symbols.
//!
//! Two strategies are provided behind the [`Tokenizer`] trait:
//!
//! - [`CharTokenizer`]: the simple alphabet, one symbol per character.
//! - [`PatternTokenizer`]: the turtle alphabet, where reserved control tokens such as
//!   `@Q.5` (scale), `[` / `]` (push/pop) and `%3` (color) are recognized as single
//!   symbols. Matching is longest-first with ties resolved by registration order.
//!   Anything unrecognized falls back to one symbol per character.
//!
//! The strategy is picked once when an [`LSystem`](crate::LSystem) is constructed.

use crate::error::TokenizeError;
use crate::rules::Rules;
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Converts an unparsed string into an ordered sequence of non-empty symbols.
pub trait Tokenizer {
    fn tokenize(&self, input: &str) -> Result<Vec<Symbol>, TokenizeError>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, input: &str) -> Result<Vec<Symbol>, TokenizeError> {
        (**self).tokenize(input)
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, input: &str) -> Result<Vec<Symbol>, TokenizeError> {
        (**self).tokenize(input)
    }
}

/// One symbol per Unicode scalar value. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharTokenizer;

impl Tokenizer for CharTokenizer {
    fn tokenize(&self, input: &str) -> Result<Vec<Symbol>, TokenizeError> {
        Ok(input.chars().map(Symbol::from).collect())
    }
}

/// Classification of a scanned token, as consumed by a turtle interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // --- Movement ---
    /// Move forward drawing a line (`F`).
    MoveDraw,
    /// Move forward without drawing (`G`).
    Move,
    /// Turn right (`-`).
    TurnRight,
    /// Turn left (`+`).
    TurnLeft,
    /// Scale the step length (`@`, optional `I`/`Q` modifiers, optional decimal).
    Scale,

    // --- Stack ---
    /// Save the turtle state (`[`).
    PushState,
    /// Restore the turtle state (`]`).
    PopState,

    // --- Color ---
    /// Select a palette index (`%N`).
    Color,
    /// Step the color index forward (`>N`).
    ColorAfter,
    /// Step the color index backward (`<N`).
    ColorBefore,

    // --- Alphabet ---
    /// The left-hand side of a registered rule.
    RuleKey,
    /// Single-character fallback for anything unrecognized.
    Char,
}

/// A scanned token with its position in the source string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the token within the scanned string.
    pub offset: usize,
}

impl Token {
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    /// Effective multiplier of a [`TokenKind::Scale`] token.
    ///
    /// The bare marker `@` means `1.0`. Each `I` modifier inverts the value and each
    /// `Q` takes its square root. Returns `None` for any other kind.
    pub fn scale(&self) -> Option<f64> {
        if self.kind != TokenKind::Scale {
            return None;
        }
        let body = self.text.strip_prefix('@')?;
        let number = body.trim_start_matches(['I', 'Q']);
        let modifiers = &body[..body.len() - number.len()];
        let mut value = if number.is_empty() {
            1.0
        } else {
            number.parse::<f64>().ok()?
        };
        for m in modifiers.chars() {
            match m {
                'I' => value = value.recip(),
                'Q' => value = value.sqrt(),
                _ => {}
            }
        }
        Some(value)
    }

    /// Numeric argument of a color token (`%3`, `>2`, `<1`), if one was given.
    pub fn color_index(&self) -> Option<u32> {
        match self.kind {
            TokenKind::Color | TokenKind::ColorAfter | TokenKind::ColorBefore => {
                self.text.get(1..).filter(|d| !d.is_empty())?.parse().ok()
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
enum Pattern {
    Literal { kind: TokenKind, text: String },
    /// `@` `[IQ]*` decimal?
    Scale,
    /// `prefix` `\d*`, argument must fit a `u32`.
    Indexed { kind: TokenKind, prefix: u8 },
}

/// Outcome of trying one pattern at one position.
enum Candidate {
    Matched(usize),
    /// Recognized marker with an invalid parameter body; the length consumed so far.
    Malformed(usize),
}

impl Pattern {
    fn kind(&self) -> TokenKind {
        match self {
            Pattern::Literal { kind, .. } | Pattern::Indexed { kind, .. } => *kind,
            Pattern::Scale => TokenKind::Scale,
        }
    }

    fn try_match(&self, rest: &str) -> Option<Candidate> {
        let bytes = rest.as_bytes();
        match self {
            Pattern::Literal { text, .. } => rest
                .starts_with(text.as_str())
                .then(|| Candidate::Matched(text.len())),
            Pattern::Scale => {
                if bytes.first() != Some(&b'@') {
                    return None;
                }
                let mut end = 1;
                while matches!(bytes.get(end), Some(b'I' | b'Q')) {
                    end += 1;
                }
                let body_start = end;
                while matches!(bytes.get(end), Some(b'0'..=b'9' | b'.')) {
                    end += 1;
                }
                let body = &bytes[body_start..end];
                if body.is_empty() {
                    return Some(Candidate::Matched(end));
                }
                let dots = body.iter().filter(|&&b| b == b'.').count();
                let has_digit = body.iter().any(u8::is_ascii_digit);
                if dots <= 1 && has_digit {
                    Some(Candidate::Matched(end))
                } else {
                    Some(Candidate::Malformed(end))
                }
            }
            Pattern::Indexed { prefix, .. } => {
                if bytes.first() != Some(prefix) {
                    return None;
                }
                let digits = bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
                let end = 1 + digits;
                if digits == 0 || rest[1..end].parse::<u32>().is_ok() {
                    Some(Candidate::Matched(end))
                } else {
                    Some(Candidate::Malformed(end))
                }
            }
        }
    }
}

/// Longest-match tokenizer over an ordered, per-instance table of token patterns.
///
/// Build the standard turtle alphabet with [`turtle`](Self::turtle), or start from
/// [`new`](Self::new) and register patterns by hand. Patterns are tried at every
/// position; the longest match wins and equal lengths go to the pattern registered
/// first. If nothing matches, the next character becomes a [`TokenKind::Char`] token.
#[derive(Clone, Debug, Default)]
pub struct PatternTokenizer {
    patterns: Vec<Pattern>,
}

impl PatternTokenizer {
    /// Creates a tokenizer with an empty table (pure single-character fallback).
    pub fn new() -> Self {
        Self::default()
    }

    /// The reserved turtle tokens without any rule keys.
    pub fn standard() -> Self {
        Self::new()
            .with_literal(TokenKind::MoveDraw, "F")
            .with_literal(TokenKind::Move, "G")
            .with_literal(TokenKind::TurnRight, "-")
            .with_literal(TokenKind::TurnLeft, "+")
            .with_scale()
            .with_literal(TokenKind::PushState, "[")
            .with_literal(TokenKind::PopState, "]")
            .with_indexed(TokenKind::Color, b'%')
            .with_indexed(TokenKind::ColorAfter, b'>')
            .with_indexed(TokenKind::ColorBefore, b'<')
    }

    /// The reserved turtle tokens followed by every key of `rules`, in registration order.
    pub fn turtle(rules: &Rules) -> Self {
        let tokenizer = Self::standard().with_rule_keys(rules);
        tracing::debug!(
            patterns = tokenizer.patterns.len(),
            rule_keys = rules.len(),
            "initialized turtle tokenizer"
        );
        tokenizer
    }

    /// Registers a fixed literal. Empty literals are ignored.
    pub fn with_literal(mut self, kind: TokenKind, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.patterns.push(Pattern::Literal { kind, text });
        }
        self
    }

    /// Registers every rule left-hand side as a [`TokenKind::RuleKey`] literal.
    pub fn with_rule_keys(mut self, rules: &Rules) -> Self {
        for key in rules.keys() {
            self = self.with_literal(TokenKind::RuleKey, key.as_str());
        }
        self
    }

    fn with_scale(mut self) -> Self {
        self.patterns.push(Pattern::Scale);
        self
    }

    fn with_indexed(mut self, kind: TokenKind, prefix: u8) -> Self {
        self.patterns.push(Pattern::Indexed { kind, prefix });
        self
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Scans `input` into classified tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::MalformedParameter`] when the winning match at some
    /// position is a parametrized token with an invalid parameter (`@1..2`, `%99999999999`).
    /// A literal of the same length that matches the text exactly takes precedence over
    /// the malformed candidate. No tokens are returned on error.
    pub fn scan(&self, input: &str) -> Result<Vec<Token>, TokenizeError> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];

            // (length, kind, well-formed)
            let mut best: Option<(usize, TokenKind, bool)> = None;
            for pattern in &self.patterns {
                let (len, ok) = match pattern.try_match(rest) {
                    Some(Candidate::Matched(len)) => (len, true),
                    Some(Candidate::Malformed(len)) => (len, false),
                    None => continue,
                };
                // Longer wins; at equal length a well-formed match beats a malformed one.
                if best.is_none_or(|(best_len, _, best_ok)| {
                    len > best_len || (len == best_len && ok && !best_ok)
                }) {
                    best = Some((len, pattern.kind(), ok));
                }
            }

            let (len, kind) = match best {
                Some((len, kind, true)) => (len, kind),
                Some((len, kind, false)) => {
                    return Err(TokenizeError::MalformedParameter {
                        offset: pos,
                        kind,
                        text: rest[..len].to_owned(),
                    });
                }
                None => match rest.chars().next() {
                    Some(ch) => (ch.len_utf8(), TokenKind::Char),
                    None => break,
                },
            };

            tokens.push(Token {
                kind,
                text: rest[..len].to_owned(),
                offset: pos,
            });
            pos += len;
        }

        Ok(tokens)
    }
}

impl Tokenizer for PatternTokenizer {
    fn tokenize(&self, input: &str) -> Result<Vec<Symbol>, TokenizeError> {
        Ok(self
            .scan(input)?
            .into_iter()
            .map(|t| Symbol::from(t.text))
            .collect())
    }
}
