//! Useless-symbol pruning.

use log::debug;

use crate::grammar::Production;
use crate::rhs_closure::{RhsClosure, RhsPropertyMode};
use crate::symbol::{Nonterminal, SymbolBitMatrix, SymbolBitSet, SymbolIndex};

/// Computes the set of productive nonterminals, which derive at least one terminal string.
pub fn productive_set(index: &SymbolIndex, productions: &[Production]) -> SymbolBitSet {
    let mut productive = SymbolBitSet::terminal_only(index, productions);
    RhsClosure::new(index, productions)
        .rhs_closure(&mut productive, RhsPropertyMode::AllNonterminals);
    productive
}

/// Removes productions that mention an unproductive nonterminal, then productions whose LHS is
/// unreachable from the start symbol. The language is preserved.
pub fn remove_useless(productions: &[Production], start: &Nonterminal) -> Vec<Production> {
    let index = SymbolIndex::from_productions(start, productions);
    let productive = productive_set(&index, productions);
    let is_productive =
        |sym: &Nonterminal| index.id(sym).map_or(false, |id| productive[id]);
    let productive_rules: Vec<Production> = productions
        .iter()
        .filter(|production| {
            is_productive(&production.lhs) && production.rhs_nonterminals().all(is_productive)
        })
        .cloned()
        .collect();

    let reachability = SymbolBitMatrix::reachability(&index, &productive_rules);
    // The start symbol has ID 0.
    let result: Vec<Production> = productive_rules
        .into_iter()
        .filter(|production| {
            index
                .id(&production.lhs)
                .map_or(false, |lhs| reachability[(0, lhs)])
        })
        .collect();
    debug!(
        "pruning: {} productions in, {} useful",
        productions.len(),
        result.len()
    );
    result
}
