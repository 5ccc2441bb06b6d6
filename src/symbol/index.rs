//! Dense numbering of nonterminals.

use std::collections::BTreeMap;

use crate::grammar::Production;

use super::Nonterminal;

/// Maps nonterminals to consecutive IDs, in order of first appearance.
///
/// Bit sets, bit matrices and count tables are indexed by these IDs.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    ids: BTreeMap<Nonterminal, usize>,
    nonterminals: Vec<Nonterminal>,
}

impl SymbolIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Numbers the start symbol first, then every nonterminal found in the productions.
    pub fn from_productions<'a>(
        start: &Nonterminal,
        productions: impl IntoIterator<Item = &'a Production>,
    ) -> Self {
        let mut index = SymbolIndex::new();
        index.insert(start);
        for production in productions {
            index.insert(&production.lhs);
            for nonterminal in production.rhs_nonterminals() {
                index.insert(nonterminal);
            }
        }
        index
    }

    /// Returns the ID of the nonterminal, assigning a new one if needed.
    pub fn insert(&mut self, nonterminal: &Nonterminal) -> usize {
        if let Some(&id) = self.ids.get(nonterminal) {
            return id;
        }
        let id = self.nonterminals.len();
        self.ids.insert(nonterminal.clone(), id);
        self.nonterminals.push(nonterminal.clone());
        id
    }

    /// Returns the ID of a known nonterminal.
    pub fn id(&self, nonterminal: &Nonterminal) -> Option<usize> {
        self.ids.get(nonterminal).copied()
    }

    /// Returns the nonterminal with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of range.
    pub fn get(&self, id: usize) -> &Nonterminal {
        &self.nonterminals[id]
    }

    /// Returns the number of nonterminals.
    pub fn len(&self) -> usize {
        self.nonterminals.len()
    }

    /// Checks whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.nonterminals.is_empty()
    }

    /// Iterates over nonterminals in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Nonterminal)> {
        self.nonterminals.iter().enumerate()
    }
}
