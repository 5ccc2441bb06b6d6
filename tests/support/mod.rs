#![allow(dead_code)]

use cfl_gen::*;
use num::ToPrimitive;

pub fn cnf(text: &str) -> Grammar {
    let grammar = load(text).unwrap();
    let cnf = normalize_to_cnf(&grammar).unwrap();
    assert!(cnf.is_in_cnf(), "not in CNF:\n{}", cnf);
    cnf
}

pub fn counts(generator: &mut Generator, name: &str, max: usize) -> Vec<u64> {
    let nonterminal = Nonterminal::new(name);
    (1..=max)
        .map(|n| {
            generator
                .count_by_nonterminal(&nonterminal, n)
                .to_u64()
                .unwrap()
        })
        .collect()
}

pub fn join(string: &[Terminal]) -> String {
    string.iter().map(Terminal::as_str).collect()
}
