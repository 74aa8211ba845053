//! The rewrite engine.
//!
//! An [`LSystem`] owns an axiom, a shared [`Rules`] table, a [`Tokenizer`] and the
//! current generation. Each call to [`LSystem::step`] rewrites every symbol of the
//! current generation once, synchronously: symbols introduced by a replacement are
//! not rewritten again until the next step.

use crate::error::{RewriteError, TokenizeError};
use crate::rules::Rules;
use crate::symbol::{Symbol, stringify};
use crate::tokenizer::{CharTokenizer, PatternTokenizer, Tokenizer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the rewrite engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Delay slept after each scanned symbol during a step.
    /// Purely cosmetic, for animating the rewrite. Zero disables it.
    pub step_delay: Duration,
    /// Maximum number of symbols a generation may hold. `None` means unbounded.
    pub max_symbols: Option<usize>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::ZERO,
            max_symbols: None,
        }
    }
}

/// A deterministic, context-free L-System.
pub struct LSystem<T: Tokenizer = CharTokenizer> {
    axiom: String,
    rules: Arc<Rules>,
    tokenizer: T,
    config: SystemConfig,
    state: Vec<Symbol>,
    generation: u64,
}

impl LSystem<CharTokenizer> {
    /// Creates a system over the simple single-character alphabet.
    pub fn simple(axiom: impl Into<String>, rules: impl Into<Arc<Rules>>) -> Self {
        let axiom = axiom.into();
        let state = axiom.chars().map(Symbol::from).collect();
        Self {
            axiom,
            rules: rules.into(),
            tokenizer: CharTokenizer,
            config: SystemConfig::default(),
            state,
            generation: 0,
        }
    }
}

impl LSystem<PatternTokenizer> {
    /// Creates a system over the turtle alphabet, with the tokenizer built from
    /// the same rule table so that every rule key is recognized.
    pub fn turtle(
        axiom: impl Into<String>,
        rules: impl Into<Arc<Rules>>,
    ) -> Result<Self, TokenizeError> {
        let rules = rules.into();
        let tokenizer = PatternTokenizer::turtle(&rules);
        Self::new(axiom, rules, tokenizer)
    }
}

impl<T: Tokenizer> LSystem<T> {
    /// Creates a system and tokenizes `axiom` into generation 0.
    ///
    /// `rules` may be an owned [`Rules`] or an `Arc<Rules>` shared with other systems.
    ///
    /// The tokenizer must recognize every multi-character rule key of `rules`;
    /// a key the tokenizer splits into smaller symbols never fires. For the turtle
    /// alphabet prefer [`LSystem::turtle`], which derives the tokenizer from `rules`.
    pub fn new(
        axiom: impl Into<String>,
        rules: impl Into<Arc<Rules>>,
        tokenizer: T,
    ) -> Result<Self, TokenizeError> {
        Self::with_config(axiom, rules, tokenizer, SystemConfig::default())
    }

    pub fn with_config(
        axiom: impl Into<String>,
        rules: impl Into<Arc<Rules>>,
        tokenizer: T,
        config: SystemConfig,
    ) -> Result<Self, TokenizeError> {
        let axiom = axiom.into();
        let state = tokenizer.tokenize(&axiom)?;
        Ok(Self {
            axiom,
            rules: rules.into(),
            tokenizer,
            config,
            state,
            generation: 0,
        })
    }

    /// Replaces the configuration (builder pattern).
    pub fn config(mut self, config: SystemConfig) -> Self {
        self.config = config;
        self
    }

    /// Applies one generation of rewriting using the configured step delay.
    ///
    /// # Errors
    ///
    /// Fails if a replacement cannot be tokenized or the next generation would exceed
    /// [`SystemConfig::max_symbols`], when set. On failure the current generation is
    /// left intact.
    pub fn step(&mut self) -> Result<(), RewriteError> {
        self.step_paced(self.config.step_delay)
    }

    /// Like [`step`](Self::step) with an explicit per-symbol delay.
    ///
    /// The delay never affects the resulting state.
    pub fn step_paced(&mut self, delay: Duration) -> Result<(), RewriteError> {
        match self.rewrite(delay) {
            Ok(next) => {
                self.state = next;
                self.generation += 1;
                tracing::debug!(
                    generation = self.generation,
                    symbols = self.state.len(),
                    "generation committed"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(generation = self.generation, error = %e, "step aborted");
                Err(e)
            }
        }
    }

    /// Applies `n` generations, stopping at the first error.
    pub fn step_n(&mut self, n: usize) -> Result<(), RewriteError> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Builds the next generation from an immutable view of the current one.
    fn rewrite(&self, delay: Duration) -> Result<Vec<Symbol>, RewriteError> {
        let limit = self.config.max_symbols;
        let mut next = Vec::with_capacity(self.state.len());
        // Each right-hand side is tokenized at most once per generation.
        let mut expansions: HashMap<&str, Vec<Symbol>> = HashMap::new();

        for sym in &self.state {
            match self.rules.get(sym.as_str()) {
                Some(replacement) => {
                    let tokens = match expansions.entry(sym.as_str()) {
                        Entry::Occupied(e) => e.into_mut(),
                        Entry::Vacant(e) => {
                            let mut tokens = self.tokenizer.tokenize(replacement)?;
                            tokens.retain(|t| !t.is_empty());
                            e.insert(tokens)
                        }
                    };
                    Self::check_limit(limit, next.len() + tokens.len())?;
                    next.extend(tokens.iter().cloned());
                }
                None => {
                    Self::check_limit(limit, next.len() + 1)?;
                    next.push(sym.clone());
                }
            }

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }

        Ok(next)
    }

    fn check_limit(limit: Option<usize>, attempted: usize) -> Result<(), RewriteError> {
        match limit {
            Some(limit) if attempted > limit => {
                Err(RewriteError::LimitExceeded { limit, attempted })
            }
            _ => Ok(()),
        }
    }

    /// Returns to generation 0 by re-tokenizing the axiom.
    pub fn reset(&mut self) -> Result<(), TokenizeError> {
        self.state = self.tokenizer.tokenize(&self.axiom)?;
        self.generation = 0;
        Ok(())
    }

    /// The current generation.
    pub fn state(&self) -> &[Symbol] {
        &self.state
    }

    pub fn into_state(self) -> Vec<Symbol> {
        self.state
    }

    /// Number of committed steps since construction or the last [`reset`](Self::reset).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn rules(&self) -> &Arc<Rules> {
        &self.rules
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    pub fn system_config(&self) -> &SystemConfig {
        &self.config
    }

    /// Number of symbols in the current generation.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl<T: Tokenizer> fmt::Display for LSystem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stringify(&self.state))
    }
}

impl<T: Tokenizer + fmt::Debug> fmt::Debug for LSystem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LSystem")
            .field("axiom", &self.axiom)
            .field("rules", &self.rules)
            .field("tokenizer", &self.tokenizer)
            .field("generation", &self.generation)
            .field("symbols", &self.state.len())
            .finish()
    }
}
