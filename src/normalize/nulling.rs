//! Nullable-symbol elimination.

use std::collections::BTreeSet;

use log::debug;

use crate::grammar::Production;
use crate::rhs_closure::{RhsClosure, RhsPropertyMode};
use crate::symbol::{Nonterminal, Symbol, SymbolBitSet, SymbolIndex};

/// Computes the set of nullable nonterminals, which derive the empty string.
///
/// `A` is nullable if some production `A -> X1 … Xk` has only nullable symbols on its RHS.
/// In particular, `A -> ε` makes `A` nullable.
pub fn nullable_set(index: &SymbolIndex, productions: &[Production]) -> SymbolBitSet {
    let mut nullable = SymbolBitSet::nulling(index, productions);
    RhsClosure::new(index, productions).rhs_closure(&mut nullable, RhsPropertyMode::All);
    nullable
}

/// Eliminates empty productions.
///
/// Every production is replaced with all variants obtained by deleting any subset of its
/// nullable occurrences. Variants with an empty RHS are dropped, except for `start -> ε`,
/// which remains when the start symbol is nullable.
///
/// The number of variants is exponential in the number of nullable occurrences on a RHS, so
/// this stage is meant to run after binarization.
pub fn eliminate_nulling(productions: &[Production], start: &Nonterminal) -> Vec<Production> {
    let index = SymbolIndex::from_productions(start, productions);
    let nullable = nullable_set(&index, productions);
    debug!("{} nullable nonterminals", nullable.count());

    let is_nullable = |sym: &Symbol| {
        sym.as_nonterminal()
            .and_then(|nonterminal| index.id(nonterminal))
            .map_or(false, |id| nullable[id])
    };

    let mut seen = BTreeSet::new();
    let mut result = vec![];
    for production in productions {
        // Each nullable occurrence forks every partial RHS into a copy that keeps it and a copy
        // that deletes it.
        let mut variants: Vec<Vec<Symbol>> = vec![vec![]];
        for sym in production.rhs.iter() {
            if is_nullable(sym) {
                variants = variants
                    .into_iter()
                    .flat_map(|rhs| {
                        let mut kept = rhs.clone();
                        kept.push(sym.clone());
                        [kept, rhs]
                    })
                    .collect();
            } else {
                for rhs in &mut variants {
                    rhs.push(sym.clone());
                }
            }
        }
        for rhs in variants {
            if rhs.is_empty() && &production.lhs != start {
                continue;
            }
            let variant = Production::new(production.lhs.clone(), rhs);
            if seen.insert(variant.clone()) {
                result.push(variant);
            }
        }
    }
    result
}
