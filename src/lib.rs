//! # symbios-dol
//!
//! A deterministic, context-free (DOL) L-System rewriting engine.
//!
//! A [`LSystem`] is seeded with an axiom and a [`Rules`] table. Every call to
//! [`LSystem::step`] rewrites each symbol of the current generation by its rule, in
//! place and in order, leaving symbols without a rule untouched. The resulting symbol
//! stream is meant for a turtle interpreter, which stays outside this crate.
//!
//! ```
//! use symbios_dol::{LSystem, Rules};
//!
//! let rules = Rules::new().with("A", "AB").with("B", "A");
//! let mut algae = LSystem::simple("A", rules);
//! algae.step_n(4).unwrap();
//! assert_eq!(algae.to_string(), "ABAABABA");
//! ```
//!
//! Richer alphabets (scale markers like `@Q.5`, color indices like `%3`) are handled
//! by the [`PatternTokenizer`].

pub mod error;
pub mod rules;
pub mod symbol;
pub mod system;
pub mod tokenizer;

pub use error::*;
pub use rules::*;
pub use symbol::*;
pub use system::*;
pub use tokenizer::*;
