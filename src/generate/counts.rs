//! Derivation counts by length.

use log::{debug, trace};
use num::{BigUint, One, Zero};

use super::GeneratorError;
use crate::grammar::{Grammar, Production};
use crate::symbol::{Nonterminal, SymbolIndex, Terminal};

/// Productions of one nonterminal, with nonterminals replaced by their IDs.
#[derive(Clone, Debug, Default)]
pub(super) struct RulesByLhs {
    pub(super) terminals: Vec<Terminal>,
    pub(super) binary: Vec<(usize, usize)>,
    pub(super) nulling: bool,
}

/// Holds the number of derivation trees of every length up to `max_length`, for every
/// nonterminal of a grammar in Chomsky Normal Form.
///
/// The table grows on demand. Counts for lengths that were already computed never change.
#[derive(Clone, Debug)]
pub struct DerivationTable {
    index: SymbolIndex,
    rules: Vec<RulesByLhs>,
    /// `counts[id][length]`. The entry for length 0 counts the empty derivation.
    counts: Vec<Vec<BigUint>>,
    max_length: usize,
}

impl DerivationTable {
    /// Creates a table with counts for length 1.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::NotCnf`] if the grammar is not in Chomsky Normal Form.
    pub fn new(grammar: &Grammar) -> Result<Self, GeneratorError> {
        if !grammar.is_in_cnf() {
            return Err(GeneratorError::NotCnf);
        }
        let index = SymbolIndex::from_productions(grammar.start(), grammar.productions());
        let mut rules = vec![RulesByLhs::default(); index.len()];
        for production in grammar.productions() {
            let lhs = index.id(&production.lhs).ok_or(GeneratorError::NotCnf)?;
            if let Some(terminal) = production.terminal() {
                rules[lhs].terminals.push(terminal.clone());
            } else if let Some((left, right)) = production.binary() {
                let left = index.id(left).ok_or(GeneratorError::NotCnf)?;
                let right = index.id(right).ok_or(GeneratorError::NotCnf)?;
                rules[lhs].binary.push((left, right));
            } else if production.is_empty() {
                rules[lhs].nulling = true;
            }
        }
        let counts = rules
            .iter()
            .map(|by_lhs| {
                let empty = if by_lhs.nulling {
                    BigUint::one()
                } else {
                    BigUint::zero()
                };
                vec![empty, BigUint::from(by_lhs.terminals.len())]
            })
            .collect();
        Ok(DerivationTable {
            index,
            rules,
            counts,
            max_length: 1,
        })
    }

    /// Returns the greatest length with computed counts.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Computes counts for all lengths up to `new_max`. Does nothing if they are already
    /// computed.
    pub fn extend(&mut self, new_max: usize) {
        if new_max <= self.max_length {
            return;
        }
        debug!(
            "extending derivation counts from length {} to {}",
            self.max_length, new_max
        );
        for row in &mut self.counts {
            row.resize(new_max + 1, BigUint::zero());
        }
        for length in self.max_length + 1..=new_max {
            for lhs in 0..self.rules.len() {
                let mut total = BigUint::zero();
                for &(left, right) in &self.rules[lhs].binary {
                    total += self.split_sum(left, right, length);
                }
                trace!("count({}, {}) = {}", self.index.get(lhs), length, total);
                self.counts[lhs][length] = total;
            }
        }
        self.max_length = new_max;
    }

    /// Returns the number of derivation trees of `nonterminal` whose yield has the given length.
    /// Unknown nonterminals have zero derivations.
    pub fn count_by_nonterminal(&mut self, nonterminal: &Nonterminal, length: usize) -> BigUint {
        match self.index.id(nonterminal) {
            Some(id) => self.count(id, length).clone(),
            None => BigUint::zero(),
        }
    }

    /// Returns the number of derivation trees that begin with `production` and whose yield has
    /// the given length. Productions absent from the grammar have zero derivations.
    pub fn count_by_production(&mut self, production: &Production, length: usize) -> BigUint {
        let lhs = match self.index.id(&production.lhs) {
            Some(id) => id,
            None => return BigUint::zero(),
        };
        let by_lhs = &self.rules[lhs];
        if let Some(terminal) = production.terminal() {
            if length == 1 && by_lhs.terminals.contains(terminal) {
                BigUint::one()
            } else {
                BigUint::zero()
            }
        } else if let Some((left, right)) = production.binary() {
            let pair = match (self.index.id(left), self.index.id(right)) {
                (Some(left), Some(right)) => (left, right),
                _ => return BigUint::zero(),
            };
            if length < 2 || !by_lhs.binary.contains(&pair) {
                return BigUint::zero();
            }
            self.extend(length);
            self.split_sum(pair.0, pair.1, length)
        } else if production.is_empty() && length == 0 && by_lhs.nulling {
            BigUint::one()
        } else {
            BigUint::zero()
        }
    }

    /// Returns the counts of `nonterminal` for lengths `0..=max_length`.
    pub fn counts(&self, nonterminal: &Nonterminal) -> Option<&[BigUint]> {
        self.index.id(nonterminal).map(|id| &self.counts[id][..])
    }

    pub(super) fn id(&self, nonterminal: &Nonterminal) -> Option<usize> {
        self.index.id(nonterminal)
    }

    pub(super) fn rules(&self, id: usize) -> &RulesByLhs {
        &self.rules[id]
    }

    /// Count for an ID, extending the table as needed.
    pub(super) fn count(&mut self, id: usize, length: usize) -> &BigUint {
        self.extend(length);
        &self.counts[id][length]
    }

    /// Number of derivations of `left right` with `length` terminals in total. Both operands
    /// must be computed up to `length - 1`.
    pub(super) fn split_sum(&self, left: usize, right: usize, length: usize) -> BigUint {
        (1..length).map(|k| self.split_count(left, right, k, length)).sum()
    }

    /// Number of derivations of `left right` where `left` derives exactly `k` terminals.
    pub(super) fn split_count(&self, left: usize, right: usize, k: usize, length: usize) -> BigUint {
        &self.counts[left][k] * &self.counts[right][length - k]
    }
}
