//! RHS closure. Propagates a property of nonterminals from right-hand sides to left-hand
//! sides until a fixpoint is reached. In some sense, it is a reverse of breadth first search.

use std::cmp::Ordering::{Greater, Less};

use crate::grammar::Production;
use crate::symbol::{Symbol, SymbolBitSet, SymbolIndex};

/// Decides when the LHS of a production gains the property.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum RhsPropertyMode {
    /// If **all** symbols on the RHS have the property, the LHS has it too. Terminals never
    /// have the property. Used for nullability.
    All,
    /// If **all** nonterminals on the RHS have the property, the LHS has it too. Terminals
    /// always have the property. Used for productiveness.
    AllNonterminals,
}

/// Records which productions each nonterminal occurs in.
pub struct RhsClosure<'a> {
    index: &'a SymbolIndex,
    inverse_derivation: Vec<Derivation<'a>>,
    work_stack: Vec<usize>,
}

struct Derivation<'a> {
    sym: usize,
    lhs: usize,
    production: &'a Production,
}

impl<'a> RhsClosure<'a> {
    /// Records information which is needed to calculate the RHS transitive closure.
    ///
    /// Every nonterminal in the productions must be present in the index.
    pub fn new(index: &'a SymbolIndex, productions: &'a [Production]) -> Self {
        let mut inverse_derivation = Vec::with_capacity(2 * productions.len());
        for production in productions {
            let Some(lhs) = index.id(&production.lhs) else {
                continue;
            };
            inverse_derivation.extend(
                production
                    .rhs_nonterminals()
                    .filter_map(|sym| index.id(sym))
                    .map(|sym| Derivation {
                        sym,
                        lhs,
                        production,
                    }),
            );
        }

        inverse_derivation.sort_by_key(|derivation| derivation.sym);

        RhsClosure {
            index,
            inverse_derivation,
            work_stack: vec![],
        }
    }

    /// Calculates the RHS transitive closure of the given property, in place.
    pub fn rhs_closure(&mut self, property: &mut SymbolBitSet, mode: RhsPropertyMode) {
        self.work_stack.extend(property.iter());

        let inverse_derivation = &self.inverse_derivation[..];
        let index = self.index;
        while let Some(work_sym) = self.work_stack.pop() {
            for derivation in find(inverse_derivation, work_sym) {
                if property[derivation.lhs] {
                    continue;
                }
                let has_property = |sym: &Symbol| match sym {
                    Symbol::Terminal(_) => mode == RhsPropertyMode::AllNonterminals,
                    Symbol::Nonterminal(nonterminal) => {
                        index.id(nonterminal).map_or(false, |id| property[id])
                    }
                };
                if derivation.production.rhs.iter().all(has_property) {
                    property.set(derivation.lhs, true);
                    self.work_stack.push(derivation.lhs);
                }
            }
        }
    }
}

fn find<'a, 'b>(inverse_derivation: &'b [Derivation<'a>], key_sym: usize) -> &'b [Derivation<'a>] {
    match inverse_derivation
        .binary_search_by(|&Derivation { sym, .. }| (sym, Greater).cmp(&(key_sym, Less)))
    {
        Err(idx) => {
            let len = inverse_derivation[idx..]
                .iter()
                .take_while(|derivation| derivation.sym == key_sym)
                .count();
            &inverse_derivation[idx..idx + len]
        }
        Ok(_) => unreachable!(),
    }
}
