//! Conversion of context-free grammars to Chomsky Normal Form.
//!
//! The conversion runs these stages, in order:
//!
//! 1. [`isolate_terminals`]: `A -> B 'c'` becomes `A -> B N; N -> 'c'`.
//! 2. [`binarize`]: right-hand sides longer than two become chains of binary productions.
//! 3. [`eliminate_nulling`]: empty productions are removed, except `start -> ε`.
//! 4. [`eliminate_units`]: productions `A -> B` are removed.
//! 5. [`remove_useless`]: unproductive and unreachable nonterminals are removed.
//!
//! Every stage is a function from a slice of productions to a new vector of productions. The
//! stages that introduce nonterminals share one [`SymbolSource`], so fresh names never collide.

mod binarize;
mod isolate;
mod nulling;
mod unit;
mod useful;

use std::fmt;

use log::debug;

pub use self::binarize::binarize;
pub use self::isolate::isolate_terminals;
pub use self::nulling::{eliminate_nulling, nullable_set};
pub use self::unit::eliminate_units;
pub use self::useful::{productive_set, remove_useless};

use crate::grammar::{Grammar, GrammarError};
use crate::symbol::{Nonterminal, SymbolSource};

/// Returned when a grammar cannot be normalized.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NormalizeError {
    /// The grammar is structurally incomplete: the given nonterminal has no productions.
    NotNormalizable {
        /// The nonterminal without productions.
        nonterminal: Nonterminal,
    },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::NotNormalizable { nonterminal } => write!(
                f,
                "grammar is not normalizable: nonterminal `{}` has no productions",
                nonterminal
            ),
        }
    }
}

impl std::error::Error for NormalizeError {}

impl From<GrammarError> for NormalizeError {
    fn from(error: GrammarError) -> Self {
        match error {
            GrammarError::Malformed { nonterminal } => {
                NormalizeError::NotNormalizable { nonterminal }
            }
        }
    }
}

/// Returns a grammar in Chomsky Normal Form that describes the same language.
///
/// A grammar that is already in CNF is returned unchanged.
///
/// # Errors
///
/// Returns [`NormalizeError::NotNormalizable`] if the start symbol has no productions.
pub fn normalize_to_cnf(grammar: &Grammar) -> Result<Grammar, NormalizeError> {
    let start = grammar.start();
    if grammar.productions_for(start).next().is_none() {
        return Err(NormalizeError::NotNormalizable {
            nonterminal: start.clone(),
        });
    }
    if grammar.is_in_cnf() {
        debug!("grammar is already in CNF");
        return Ok(grammar.clone());
    }

    let mut source =
        SymbolSource::with_used_names(grammar.nonterminals().iter().map(Nonterminal::name));

    let productions = isolate_terminals(grammar.productions(), &mut source);
    debug!("after terminal isolation: {} productions", productions.len());
    let productions = binarize(&productions, &mut source);
    debug!("after binarization: {} productions", productions.len());
    let productions = eliminate_nulling(&productions, start);
    debug!("after nulling elimination: {} productions", productions.len());
    let productions = eliminate_units(&productions, start);
    let productions = remove_useless(&productions, start);
    debug!(
        "introduced {} nonterminals",
        source.num_used() - grammar.nonterminals().len()
    );

    let result = Grammar::new(start.clone(), productions)?;
    debug_assert!(result.is_in_cnf(), "normalization produced a non-CNF grammar");
    Ok(result)
}
