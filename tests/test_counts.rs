mod grammars;
mod support;

use cfl_gen::*;
use grammars::*;
use num::{BigUint, Zero};
use support::*;
use test_case::test_case;

#[test]
fn test_single_string() {
    let grammar = load("S -> A B\nA -> 'a'\nB -> 'b'").unwrap();
    let mut generator = Generator::seeded(grammar, 0).unwrap();
    assert_eq!(counts(&mut generator, "S", 3), [0, 1, 0]);
}

#[test_case("S", &[0, 1, 2, 6])]
#[test_case("A", &[1, 1, 2, 6])]
#[test_case("B", &[1, 0, 0, 0])]
#[test_case("U", &[1, 0, 0, 0])]
#[test_case("X", &[0, 1, 2, 6])]
fn test_known_counts(name: &str, expected: &[u64]) {
    let mut generator = Generator::seeded(load(COUNTED).unwrap(), 0).unwrap();
    assert_eq!(counts(&mut generator, name, 4), expected);
}

#[test]
fn test_catalan() {
    let mut generator = Generator::seeded(cnf(BALANCED), 0).unwrap();
    let counts = counts(&mut generator, "S", 20);
    // Balanced strings of length 2k are counted by the k-th Catalan number.
    assert_eq!(counts[1], 1);
    assert_eq!(counts[3], 2);
    assert_eq!(counts[5], 5);
    assert_eq!(counts[19], 16796);
    assert!(counts.iter().step_by(2).all(|&count| count == 0));
}

#[test]
fn test_count_exceeds_u64() {
    let mut generator = Generator::seeded(load("S -> S S | 'a' | 'b'").unwrap(), 0).unwrap();
    let count = generator.count_by_nonterminal(&Nonterminal::new("S"), 60);
    assert!(count > BigUint::from(u64::MAX));
}

#[test_case(COUNTED ; "counted")]
#[test_case(NULLABLE ; "nullable")]
#[test_case(BALANCED ; "balanced")]
#[test_case(LINEAR ; "linear")]
fn test_nonterminal_count_is_sum_of_production_counts(text: &str) {
    let grammar = cnf(text);
    let mut generator = Generator::seeded(grammar.clone(), 0).unwrap();
    for lhs in grammar.nonterminals() {
        for length in 1..=9 {
            let total: BigUint = grammar
                .productions_for(lhs)
                .map(|production| generator.count_by_production(production, length))
                .sum();
            assert_eq!(generator.count_by_nonterminal(lhs, length), total);
        }
    }
}

#[test_case(COUNTED ; "counted")]
#[test_case(LINEAR ; "linear")]
fn test_binary_count_is_sum_over_splits(text: &str) {
    let grammar = cnf(text);
    let mut generator = Generator::seeded(grammar.clone(), 0).unwrap();
    for production in grammar.productions() {
        let (left, right) = match production.binary() {
            Some(pair) => pair,
            None => continue,
        };
        for length in 2..=8 {
            let expected: BigUint = (1..length)
                .map(|k| {
                    generator.count_by_nonterminal(left, k)
                        * generator.count_by_nonterminal(right, length - k)
                })
                .sum();
            assert_eq!(generator.count_by_production(production, length), expected);
        }
    }
}

#[test]
fn test_extension_is_monotone() {
    let grammar = cnf(NULLABLE);
    let start = grammar.start().clone();
    let mut generator = Generator::seeded(grammar, 0).unwrap();
    generator.preprocess(6).unwrap();
    let before: Vec<BigUint> = (0..=6)
        .map(|n| generator.count_by_nonterminal(&start, n))
        .collect();
    generator.preprocess(25).unwrap();
    assert_eq!(generator.max_length(), 25);
    let after: Vec<BigUint> = (0..=6)
        .map(|n| generator.count_by_nonterminal(&start, n))
        .collect();
    assert_eq!(before, after);
    // Preprocessing to a shorter length keeps the table.
    generator.preprocess(3).unwrap();
    assert_eq!(generator.max_length(), 25);
}

#[test]
fn test_unknown_nonterminal_counts_zero() {
    let mut generator = Generator::seeded(load(COUNTED).unwrap(), 0).unwrap();
    assert!(generator
        .count_by_nonterminal(&Nonterminal::new("Missing"), 3)
        .is_zero());
}

#[test]
fn test_empty_string_count() {
    let mut generator = Generator::seeded(cnf(BALANCED), 0).unwrap();
    let start = generator.grammar().start().clone();
    assert_eq!(generator.count_by_nonterminal(&start, 0), BigUint::from(1u32));
    let mut generator = Generator::seeded(load(COUNTED).unwrap(), 0).unwrap();
    assert!(generator.count_by_nonterminal(&start, 0).is_zero());
}
