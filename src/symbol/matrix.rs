//! Relations between nonterminals in the form of bit matrices.

use std::ops::{self, Deref, DerefMut};

use bit_matrix::BitMatrix;

use crate::grammar::Production;

use super::SymbolIndex;

/// A matrix that represents a relation `R(A, B)` between two nonterminals, indexed by their
/// IDs in a [`SymbolIndex`].
#[derive(Debug)]
pub struct SymbolBitMatrix {
    bit_matrix: BitMatrix,
}

impl SymbolBitMatrix {
    /// Creates the empty matrix of size `|N|x|N|` where `N`: set of nonterminals.
    pub fn new(index: &SymbolIndex) -> Self {
        SymbolBitMatrix {
            bit_matrix: BitMatrix::new(index.len(), index.len()),
        }
    }

    /// Computes the direct derivation matrix: `R(A, B)` holds if `B` occurs on the RHS of a
    /// production of `A`.
    pub fn direct_derivation(index: &SymbolIndex, productions: &[Production]) -> Self {
        let mut derivation = Self::new(index);
        for production in productions {
            if let Some(lhs) = index.id(&production.lhs) {
                for sym in production.rhs_nonterminals().filter_map(|sym| index.id(sym)) {
                    derivation.set(lhs, sym, true);
                }
            }
        }
        derivation
    }

    /// Computes the reflexive, transitive closure of the direct derivation relation.
    pub fn reachability(index: &SymbolIndex, productions: &[Production]) -> Self {
        let mut reachability = Self::direct_derivation(index, productions);
        reachability.transitive_closure();
        reachability.reflexive_closure();
        reachability
    }

    /// Computes the unit derivation matrix. `R(A, B)` holds if `A` derives `B` through a chain
    /// of zero or more unit productions, such as:
    ///
    /// ```text
    /// A -> B
    /// ```
    ///
    /// Every nonterminal is related to itself.
    pub fn unit_derivation(index: &SymbolIndex, productions: &[Production]) -> Self {
        let mut unit_derivation = Self::new(index);
        for production in productions.iter().filter(|p| p.is_unit()) {
            let lhs = index.id(&production.lhs);
            let rhs = production.rhs_nonterminals().next().and_then(|sym| index.id(sym));
            if let (Some(lhs), Some(rhs)) = (lhs, rhs) {
                unit_derivation.set(lhs, rhs, true);
            }
        }
        unit_derivation.transitive_closure();
        unit_derivation.reflexive_closure();
        unit_derivation
    }

    /// Creates an iterator over IDs which appear in the given row.
    pub fn iter_row_ids(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.bit_matrix
            .iter_row(row)
            .enumerate()
            .filter_map(|(id, present)| if present { Some(id) } else { None })
    }
}

impl Deref for SymbolBitMatrix {
    type Target = BitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.bit_matrix
    }
}

impl DerefMut for SymbolBitMatrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bit_matrix
    }
}

impl ops::Index<(usize, usize)> for SymbolBitMatrix {
    type Output = bool;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.bit_matrix[index]
    }
}
