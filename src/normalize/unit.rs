//! Unit-production elimination.

use std::collections::BTreeSet;
use std::iter;

use log::debug;

use crate::grammar::Production;
use crate::symbol::{Nonterminal, SymbolBitMatrix, SymbolIndex};

/// Eliminates unit productions of the form `A -> B`.
///
/// For every unit pair `(A, B)`, where `A` derives `B` through zero or more unit productions,
/// and every non-unit production `B -> γ`, adds `A -> γ`. Then drops all unit productions. An
/// empty RHS is only copied to the start symbol.
pub fn eliminate_units(productions: &[Production], start: &Nonterminal) -> Vec<Production> {
    let index = SymbolIndex::from_productions(start, productions);
    let unit_pairs = SymbolBitMatrix::unit_derivation(&index, productions);

    let mut non_unit_by_lhs: Vec<Vec<&Production>> = vec![vec![]; index.len()];
    for production in productions.iter().filter(|p| !p.is_unit()) {
        if let Some(lhs) = index.id(&production.lhs) {
            non_unit_by_lhs[lhs].push(production);
        }
    }

    let mut seen = BTreeSet::new();
    let mut result = vec![];
    for (a, lhs) in index.iter() {
        // A's own productions come first.
        let derived = iter::once(a).chain(unit_pairs.iter_row_ids(a).filter(|&b| b != a));
        for b in derived {
            for production in &non_unit_by_lhs[b] {
                if production.is_empty() && lhs != start {
                    continue;
                }
                let variant = Production {
                    lhs: lhs.clone(),
                    rhs: production.rhs.clone(),
                };
                if seen.insert(variant.clone()) {
                    result.push(variant);
                }
            }
        }
    }
    debug!(
        "unit elimination: {} productions in, {} out",
        productions.len(),
        result.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load;

    #[test]
    fn test_unit_chain() {
        let grammar = load(
            "S -> A | S S
             A -> B | 'a'
             B -> 'b' | S",
        )
        .unwrap();
        let result = eliminate_units(grammar.productions(), grammar.start());
        let expected = load(
            "S -> S S | 'a' | 'b'
             A -> 'a' | S S | 'b'
             B -> 'b' | S S | 'a'",
        )
        .unwrap();
        assert_eq!(result, expected.productions());
    }

    #[test]
    fn test_self_unit_dropped() {
        let grammar = load("S -> S | 'a'").unwrap();
        let result = eliminate_units(grammar.productions(), grammar.start());
        assert_eq!(result, load("S -> 'a'").unwrap().productions());
    }
}
