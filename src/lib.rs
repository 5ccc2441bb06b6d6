//! Conversion of context-free grammars to Chomsky Normal Form, and uniform random generation
//! of strings of a given length.
//!
//! ```
//! use cfl_gen::{normalize_to_cnf, Generator, Grammar};
//!
//! let grammar: Grammar = "S -> '(' S ')' S |".parse().unwrap();
//! let cnf = normalize_to_cnf(&grammar).unwrap();
//! let mut generator = Generator::seeded(cnf, 1).unwrap();
//! let string = generator.generate_string(6, "").unwrap();
//! assert_eq!(string.len(), 6);
//! ```

#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, deny(warnings))]
#![cfg_attr(test, allow(missing_docs))]

pub mod generate;
pub mod grammar;
pub mod load;
pub mod normalize;
pub mod rhs_closure;
pub mod rule_builder;
pub mod symbol;

pub use crate::generate::{
    DerivationTable, GenerateError, Generator, GeneratorError,
};
pub use crate::grammar::{Grammar, GrammarError, Production};
pub use crate::load::{load, load_file, LoadError};
pub use crate::normalize::{normalize_to_cnf, NormalizeError};
pub use crate::symbol::{Nonterminal, Symbol, SymbolSource, Terminal};
