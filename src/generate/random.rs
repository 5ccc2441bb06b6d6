//! Generate random strings of a fixed length from a grammar.

use log::trace;
use num::bigint::RandBigInt;
use num::{BigUint, Zero};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rpds::List;

use super::counts::DerivationTable;
use super::{GenerateError, GeneratorError};
use crate::grammar::{Grammar, Production};
use crate::symbol::{Nonterminal, Terminal};

/// Picks an index with probability proportional to its weight.
///
/// Draws `r` uniformly from `0..total` and returns the first index whose cumulative weight
/// exceeds `r`.
///
/// # Errors
///
/// Returns [`GenerateError::InvariantViolation`] if the weights do not sum to `expected_total`
/// or sum to zero.
pub fn choose_weighted<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &[BigUint],
    expected_total: &BigUint,
) -> Result<usize, GenerateError> {
    let total: BigUint = weights.iter().sum();
    if total.is_zero() || &total != expected_total {
        return Err(GenerateError::InvariantViolation);
    }
    let point = rng.gen_biguint_below(&total);
    let mut cumulative = BigUint::zero();
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative > point {
            return Ok(i);
        }
    }
    Err(GenerateError::InvariantViolation)
}

/// Generates strings of a given length uniformly at random among derivation trees.
///
/// The grammar must be in Chomsky Normal Form. See [`crate::normalize_to_cnf`].
///
/// ```
/// use cfl_gen::{Generator, Grammar};
///
/// let grammar: Grammar = "S -> A B\nA -> 'a'\nB -> 'b'".parse().unwrap();
/// let mut generator = Generator::seeded(grammar, 7).unwrap();
/// assert_eq!(generator.generate_string(2, "").unwrap(), "ab");
/// ```
#[derive(Clone, Debug)]
pub struct Generator<R = SmallRng> {
    grammar: Grammar,
    table: DerivationTable,
    rng: R,
}

impl Generator<SmallRng> {
    /// Creates a generator seeded from operating system entropy.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::NotCnf`] if the grammar is not in Chomsky Normal Form.
    pub fn new(grammar: Grammar) -> Result<Self, GeneratorError> {
        Self::with_rng(grammar, SmallRng::from_entropy())
    }

    /// Creates a generator with a reproducible random source.
    pub fn seeded(grammar: Grammar, seed: u64) -> Result<Self, GeneratorError> {
        Self::with_rng(grammar, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    /// Creates a generator driven by the given random source.
    pub fn with_rng(grammar: Grammar, rng: R) -> Result<Self, GeneratorError> {
        let table = DerivationTable::new(&grammar)?;
        Ok(Generator {
            grammar,
            table,
            rng,
        })
    }

    /// Computes derivation counts for all lengths up to `length` ahead of time.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidConfiguration`] if `length` is zero.
    pub fn preprocess(&mut self, length: usize) -> Result<(), GeneratorError> {
        if length < 1 {
            return Err(GeneratorError::InvalidConfiguration {
                reason: "preprocessing length must be at least 1",
            });
        }
        self.table.extend(length);
        Ok(())
    }

    /// Returns the grammar.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Returns the derivation table.
    pub fn table(&self) -> &DerivationTable {
        &self.table
    }

    /// Returns the greatest length with computed counts.
    pub fn max_length(&self) -> usize {
        self.table.max_length()
    }

    /// Returns the random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Number of derivation trees of `nonterminal` with `length` terminals.
    pub fn count_by_nonterminal(&mut self, nonterminal: &Nonterminal, length: usize) -> BigUint {
        self.table.count_by_nonterminal(nonterminal, length)
    }

    /// Number of derivation trees that begin with `production` and have `length` terminals.
    pub fn count_by_production(&mut self, production: &Production, length: usize) -> BigUint {
        self.table.count_by_production(production, length)
    }

    /// Generates a string of exactly `length` terminals derived from the start symbol.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::GenerationFailure`] if the grammar derives no such string.
    pub fn generate(&mut self, length: usize) -> Result<Vec<Terminal>, GenerateError> {
        let start = self.grammar.start().clone();
        self.generate_from(&start, length)
    }

    /// Generates a string and joins its terminals with `separator`.
    pub fn generate_string(
        &mut self,
        length: usize,
        separator: &str,
    ) -> Result<String, GenerateError> {
        let terminals = self.generate(length)?;
        let parts: Vec<&str> = terminals.iter().map(Terminal::as_str).collect();
        Ok(parts.join(separator))
    }

    /// Generates a string of exactly `length` terminals derived from `nonterminal`.
    pub fn generate_from(
        &mut self,
        nonterminal: &Nonterminal,
        length: usize,
    ) -> Result<Vec<Terminal>, GenerateError> {
        let failure = GenerateError::GenerationFailure { length };
        let root = self.table.id(nonterminal).ok_or(failure)?;
        if length == 0 {
            return if self.table.rules(root).nulling {
                Ok(vec![])
            } else {
                Err(failure)
            };
        }
        if self.table.count(root, length).is_zero() {
            return Err(failure);
        }

        let mut work = List::new();
        work.push_front_mut((root, length));
        let mut result = Vec::with_capacity(length);
        while let Some(&(id, len)) = work.first() {
            work.drop_first_mut();
            if len == 1 {
                let terminals = &self.table.rules(id).terminals;
                if terminals.is_empty() {
                    return Err(GenerateError::InvariantViolation);
                }
                let choice = self.rng.gen_range(0..terminals.len());
                result.push(terminals[choice].clone());
                continue;
            }
            let (left, right) = self.pick_binary(id, len)?;
            let split = self.pick_split(left, right, len)?;
            trace!("split {} into {} + {}", len, split, len - split);
            work.push_front_mut((right, len - split));
            work.push_front_mut((left, split));
        }
        if result.len() != length {
            return Err(GenerateError::InvariantViolation);
        }
        Ok(result)
    }

    /// Picks `A -> B C` weighted by the number of its derivations of length `len`.
    fn pick_binary(&mut self, id: usize, len: usize) -> Result<(usize, usize), GenerateError> {
        let binary = &self.table.rules(id).binary;
        let weights: Vec<BigUint> = binary
            .iter()
            .map(|&(left, right)| self.table.split_sum(left, right, len))
            .collect();
        let expected = self.table.count(id, len).clone();
        let choice = choose_weighted(&mut self.rng, &weights, &expected)?;
        Ok(self.table.rules(id).binary[choice])
    }

    /// Picks the number of terminals derived by the left operand.
    fn pick_split(&mut self, left: usize, right: usize, len: usize) -> Result<usize, GenerateError> {
        let weights: Vec<BigUint> = (1..len)
            .map(|k| self.table.split_count(left, right, k, len))
            .collect();
        let expected = self.table.split_sum(left, right, len);
        let choice = choose_weighted(&mut self.rng, &weights, &expected)?;
        Ok(choice + 1)
    }
}
