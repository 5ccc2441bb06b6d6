//! Terminal isolation.

use std::collections::BTreeMap;

use log::trace;

use crate::grammar::Production;
use crate::symbol::{Nonterminal, Symbol, SymbolSource, Terminal};

/// Replaces terminals on right-hand sides with two or more symbols by fresh nonterminals.
///
/// Rewrites `A -> B 'c'` into `A -> B N` and `N -> 'c'`. Each distinct terminal gets one fresh
/// nonterminal, shared by every production it is isolated from. Productions of the form
/// `A -> 'a'` and productions without terminals are kept as they are.
pub fn isolate_terminals(productions: &[Production], source: &mut SymbolSource) -> Vec<Production> {
    let mut isolated: BTreeMap<Terminal, Nonterminal> = BTreeMap::new();
    let mut introduced = vec![];
    let mut result = Vec::with_capacity(productions.len());

    for production in productions {
        if production.rhs.len() < 2 || !production.rhs.iter().any(Symbol::is_terminal) {
            result.push(production.clone());
            continue;
        }
        let mut rhs = Vec::with_capacity(production.rhs.len());
        for sym in production.rhs.iter() {
            let replacement = match sym {
                Symbol::Terminal(terminal) => {
                    let nonterminal = isolated.entry(terminal.clone()).or_insert_with(|| {
                        let fresh = source.next_sym();
                        trace!("isolating {} as {}", sym, fresh);
                        introduced.push(Production::new(fresh.clone(), [sym.clone()]));
                        fresh
                    });
                    Symbol::Nonterminal(nonterminal.clone())
                }
                Symbol::Nonterminal(_) => sym.clone(),
            };
            rhs.push(replacement);
        }
        result.push(Production::new(production.lhs.clone(), rhs));
    }

    result.extend(introduced);
    result
}
