mod grammars;
mod support;

use cfl_gen::generate::choose_weighted;
use cfl_gen::*;
use grammars::*;
use num::{BigUint, Zero};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use support::*;
use test_case::test_case;

#[test]
fn test_single_string_always_generated() {
    let grammar = load("S -> A B\nA -> 'a'\nB -> 'b'").unwrap();
    let mut generator = Generator::seeded(grammar, 17).unwrap();
    for _ in 0..50 {
        assert_eq!(
            generator.generate(2).unwrap(),
            [Terminal::new("a"), Terminal::new("b")]
        );
    }
}

#[test_case(COUNTED ; "counted")]
#[test_case(NULLABLE ; "nullable")]
#[test_case(BALANCED ; "balanced")]
#[test_case(LINEAR ; "linear")]
fn test_exact_length_or_failure(text: &str) {
    let grammar = cnf(text);
    let start = grammar.start().clone();
    let mut generator = Generator::seeded(grammar, 1).unwrap();
    for length in 1..=24 {
        let count = generator.count_by_nonterminal(&start, length);
        match generator.generate(length) {
            Ok(string) => {
                assert!(!count.is_zero());
                assert_eq!(string.len(), length);
            }
            Err(error) => {
                assert!(count.is_zero());
                assert_eq!(error, GenerateError::GenerationFailure { length });
            }
        }
    }
}

#[test]
fn test_generate_from_nonterminal() {
    let mut generator = Generator::seeded(load(LINEAR).unwrap(), 2).unwrap();
    let string = generator.generate_from(&Nonterminal::new("B"), 4).unwrap();
    assert_eq!(join(&string), "bddd");
    assert_eq!(
        generator.generate_from(&Nonterminal::new("C"), 2),
        Err(GenerateError::GenerationFailure { length: 2 })
    );
    assert_eq!(
        generator.generate_from(&Nonterminal::new("Missing"), 1),
        Err(GenerateError::GenerationFailure { length: 1 })
    );
}

#[test]
fn test_same_seed_same_strings() {
    let grammar = normalize_to_cnf(&arithmetic()).unwrap();
    let mut first = Generator::seeded(grammar.clone(), 1234).unwrap();
    let mut second = Generator::seeded(grammar, 1234).unwrap();
    for length in [1, 5, 11, 21] {
        assert_eq!(first.generate(length), second.generate(length));
    }
}

#[test]
fn test_with_rng() {
    let rng = SmallRng::seed_from_u64(99);
    let mut generator = Generator::with_rng(cnf(BALANCED), rng).unwrap();
    let string = generator.generate_string(10, "").unwrap();
    assert_eq!(string.len(), 10);
    assert!(string.starts_with('('));
}

#[test]
fn test_very_long_string() {
    let mut generator = Generator::seeded(cnf(BALANCED), 8).unwrap();
    let string = generator.generate(2000).unwrap();
    let mut depth = 0i64;
    for terminal in &string {
        depth += if terminal.as_str() == "(" { 1 } else { -1 };
        assert!(depth >= 0);
    }
    assert_eq!(depth, 0);
}

#[test]
fn test_not_cnf() {
    let grammar = load("S -> 'a' S | 'a'").unwrap();
    assert_eq!(Generator::new(grammar).err(), Some(GeneratorError::NotCnf));
}

#[test]
fn test_preprocess_zero() {
    let mut generator = Generator::seeded(load(COUNTED).unwrap(), 0).unwrap();
    assert!(matches!(
        generator.preprocess(0),
        Err(GeneratorError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_choose_weighted_follows_weights() {
    let mut rng = SmallRng::seed_from_u64(5);
    let weights: Vec<BigUint> = [1u32, 0, 3].iter().map(|&w| BigUint::from(w)).collect();
    let total = BigUint::from(4u32);
    let mut hits = [0usize; 3];
    for _ in 0..4000 {
        hits[choose_weighted(&mut rng, &weights, &total).unwrap()] += 1;
    }
    assert_eq!(hits[1], 0);
    assert!((hits[0] as f64 / 4000.0 - 0.25).abs() < 0.04);
}
