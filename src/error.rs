//! Error types for tokenizing and rewriting.

use crate::tokenizer::TokenKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenizeError {
    /// A parametrized reserved token was recognized but its parameter body is invalid.
    #[error("malformed {kind:?} parameter at byte {offset}: {text:?}")]
    MalformedParameter {
        /// Byte offset of the token start within the tokenized string.
        offset: usize,
        kind: TokenKind,
        /// The full text the token would have spanned.
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RewriteError {
    #[error("tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("next generation would hold {attempted} symbols, limit is {limit}")]
    LimitExceeded { limit: usize, attempted: usize },
}
