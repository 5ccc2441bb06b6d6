//! Sets of nonterminals in the form of bit vectors.

use std::{iter, ops};

use bit_vec::BitVec;

use crate::grammar::Production;

use super::{Nonterminal, SymbolIndex};

/// A set of nonterminal IDs in the form of a bit vector.
#[derive(Clone, Debug)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs a set sized for the given index, with every entry set to `elem`.
    pub fn from_elem(index: &SymbolIndex, elem: bool) -> Self {
        SymbolBitSet {
            bit_vec: BitVec::from_elem(index.len(), elem),
        }
    }

    /// Constructs the set of nonterminals that have an empty production.
    pub fn nulling<'a>(
        index: &SymbolIndex,
        productions: impl IntoIterator<Item = &'a Production>,
    ) -> Self {
        let mut set = SymbolBitSet::from_elem(index, false);
        for production in productions {
            if production.rhs.is_empty() {
                set.set_sym(index, &production.lhs);
            }
        }
        set
    }

    /// Constructs the set of nonterminals that have a production with no nonterminals on its
    /// right-hand side. Empty productions count.
    pub fn terminal_only<'a>(
        index: &SymbolIndex,
        productions: impl IntoIterator<Item = &'a Production>,
    ) -> Self {
        let mut set = SymbolBitSet::from_elem(index, false);
        for production in productions {
            if production.rhs_nonterminals().next().is_none() {
                set.set_sym(index, &production.lhs);
            }
        }
        set
    }

    fn set_sym(&mut self, index: &SymbolIndex, nonterminal: &Nonterminal) {
        if let Some(id) = index.id(nonterminal) {
            self.bit_vec.set(id, true);
        }
    }

    /// Sets the entry for an ID.
    pub fn set(&mut self, id: usize, value: bool) {
        self.bit_vec.set(id, value);
    }

    /// Checks whether the given ID is in this set.
    pub fn has(&self, id: usize) -> bool {
        self.bit_vec.get(id).unwrap_or(false)
    }

    /// Returns the number of IDs in the set.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Iterates over IDs in the set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<usize> for SymbolBitSet {
    type Output = bool;

    fn index(&self, id: usize) -> &Self::Output {
        if self.has(id) {
            &TRUE
        } else {
            &FALSE
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(id);
            }
        }
        None
    }
}
