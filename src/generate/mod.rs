//! Uniform random generation of strings of a given length.
//!
//! A [`DerivationTable`] holds the number of derivations of every length for every nonterminal
//! of a grammar in Chomsky Normal Form. A [`Generator`] draws derivations from the table with
//! exact big-integer weights, so that each derivation tree of the requested length is equally
//! likely. For an unambiguous grammar, each string is equally likely.

pub mod ambiguity;
mod counts;
mod random;

use std::fmt;

pub use self::ambiguity::{estimate_ambiguity, AmbiguityOptions, AmbiguityReport, Frequencies};
pub use self::counts::DerivationTable;
pub use self::random::{choose_weighted, Generator};

/// Returned when generation fails.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GenerateError {
    /// No string of the requested length is derivable.
    GenerationFailure {
        /// The requested length.
        length: usize,
    },
    /// Weights disagree with the derivation counts. Indicates a bug.
    InvariantViolation,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::GenerationFailure { length } => {
                write!(f, "no string of length {} can be generated", length)
            }
            GenerateError::InvariantViolation => {
                f.write_str("derivation weights disagree with derivation counts")
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// Returned when a generator cannot be constructed or configured.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GeneratorError {
    /// The grammar is not in Chomsky Normal Form.
    NotCnf,
    /// A configuration value is out of range.
    InvalidConfiguration {
        /// What is wrong with the value.
        reason: &'static str,
    },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::NotCnf => f.write_str("grammar is not in Chomsky Normal Form"),
            GeneratorError::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for GeneratorError {}
