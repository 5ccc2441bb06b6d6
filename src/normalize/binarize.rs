//! Binarization.

use crate::grammar::Production;
use crate::symbol::{Symbol, SymbolSource};

/// Rewrites productions with more than two symbols on the RHS to chains of binary
/// productions.
///
/// From `A -> X1 X2 … Xk` to:
///
/// ```text
/// A      -> X1 N1
/// N1     -> X2 N2
/// …
/// N(k-2) -> X(k-1) Xk
/// ```
///
/// where `N1 … N(k-2)` are fresh nonterminals. Shorter productions are kept as they are.
pub fn binarize(productions: &[Production], source: &mut SymbolSource) -> Vec<Production> {
    let mut result = Vec::with_capacity(productions.len());
    for production in productions {
        let len = production.rhs.len();
        if len <= 2 {
            result.push(production.clone());
            continue;
        }
        let mut lhs = production.lhs.clone();
        for sym in &production.rhs[..len - 2] {
            let next = source.next_sym();
            result.push(Production::new(
                lhs,
                [sym.clone(), Symbol::Nonterminal(next.clone())],
            ));
            lhs = next;
        }
        result.push(Production::new(lhs, &production.rhs[len - 2..]));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load;
    use test_case::test_case;

    #[test]
    fn test_binarize_chain() {
        let grammar = load(
            "S -> A B C D | A
             A -> 'a'
             B -> 'b'
             C -> 'c'
             D -> 'd'",
        )
        .unwrap();
        let mut source = SymbolSource::with_used_names(["S", "A", "B", "C", "D"]);
        let result = binarize(grammar.productions(), &mut source);
        let expected = load(
            "S -> A E
             E -> B F
             F -> C D
             S -> A
             A -> 'a'
             B -> 'b'
             C -> 'c'
             D -> 'd'",
        )
        .unwrap();
        assert_eq!(result, expected.productions());
    }

    #[test_case(3)]
    #[test_case(10)]
    #[test_case(1000)]
    fn test_binarize_very_long_rule(rhs_len: usize) {
        let rhs = vec![Symbol::nonterminal("S"); rhs_len];
        let productions = [Production::new(crate::Nonterminal::new("S"), rhs)];
        let mut source = SymbolSource::with_used_names(["S"]);
        let result = binarize(&productions, &mut source);
        assert_eq!(result.len(), rhs_len - 1);
        assert!(result.iter().all(|production| production.rhs.len() == 2));
    }
}
