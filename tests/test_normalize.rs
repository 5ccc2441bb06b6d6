mod grammars;
mod support;

use std::collections::BTreeSet;

use cfl_gen::*;
use grammars::*;
use support::*;
use test_case::test_case;

#[test_case(COUNTED ; "already cnf")]
#[test_case(NULLABLE ; "nullable")]
#[test_case(BALANCED ; "balanced")]
#[test_case(LINEAR ; "linear")]
#[test_case("S -> A\nA -> B\nB -> S | 'x' 'y' 'z' 'w'" ; "unit cycle")]
#[test_case("S -> A B C D E\nA -> 'a' |\nB -> |\nC -> 'c'\nD -> A\nE -> S |" ; "long nullable")]
fn test_result_is_cnf(text: &str) {
    let cnf = cnf(text);
    let empty = cnf.productions().iter().filter(|p| p.is_empty());
    assert!(empty.clone().all(|p| &p.lhs == cnf.start()));
    assert!(empty.count() <= 1);
}

#[test]
fn test_cnf_unchanged() {
    let grammar = load(COUNTED).unwrap();
    assert_eq!(normalize_to_cnf(&grammar).unwrap(), grammar);
}

#[test]
fn test_nullable_derives_same_strings() {
    let grammar = cnf(NULLABLE);
    let mut generator = Generator::seeded(grammar, 3).unwrap();

    // Every string contains `a`. `S -> 'a'` is the only tree of length 1.
    assert_eq!(join(&generator.generate(1).unwrap()), "a");
    let allowed: BTreeSet<&str> = ["aa", "ab", "ba"].into_iter().collect();
    let mut seen = BTreeSet::new();
    for _ in 0..300 {
        let string = join(&generator.generate(2).unwrap());
        assert!(allowed.contains(&string[..]), "unexpected {:?}", string);
        seen.insert(string);
    }
    assert!(seen.contains("ab"));
}

#[test]
fn test_fresh_names_do_not_collide() {
    let grammar = cnf("S -> A 'x' B\nA -> 'a'\nB -> 'b'");
    for name in ["S", "A", "B"] {
        assert!(grammar.nonterminals().contains(&Nonterminal::new(name)));
    }
    let mut generator = Generator::seeded(grammar, 1).unwrap();
    assert_eq!(counts(&mut generator, "S", 4), [0, 0, 1, 0]);
    assert_eq!(join(&generator.generate(3).unwrap()), "axb");
}

#[test]
fn test_arithmetic_language_preserved() {
    let grammar = normalize_to_cnf(&arithmetic()).unwrap();
    assert!(grammar.is_in_cnf());
    let mut generator = Generator::seeded(grammar, 9).unwrap();
    for length in [1, 3, 5, 7, 9, 15, 31] {
        for _ in 0..20 {
            let string = generator.generate(length).unwrap();
            let tokens: Vec<&str> = string.iter().map(Terminal::as_str).collect();
            assert!(is_arithmetic(&tokens), "not an expression: {:?}", tokens);
        }
    }
    assert_eq!(
        generator.generate(2),
        Err(GenerateError::GenerationFailure { length: 2 })
    );
}

#[test]
fn test_empty_start_survives() {
    let grammar = cnf(BALANCED);
    assert!(grammar.has_empty_start());
    let mut generator = Generator::seeded(grammar, 5).unwrap();
    assert_eq!(generator.generate(0), Ok(vec![]));
}

#[test]
fn test_useless_symbols_removed() {
    let grammar = cnf("S -> A 'b' | U\nA -> 'a' |\nU -> U 'u'\nZ -> 'z'");
    let names: Vec<&str> = grammar.nonterminals().iter().map(Nonterminal::name).collect();
    assert!(!names.contains(&"U"));
    assert!(!names.contains(&"Z"));
    assert!(grammar.terminals().iter().all(|t| t.as_str() != "z"));
}

#[test]
fn test_not_normalizable() {
    let grammar = Grammar::new(Nonterminal::new("S"), vec![]).unwrap();
    assert_eq!(
        normalize_to_cnf(&grammar),
        Err(NormalizeError::NotNormalizable {
            nonterminal: Nonterminal::new("S")
        })
    );
}

#[test]
fn test_empty_language() {
    // `S` has productions but derives nothing.
    let grammar = cnf("S -> S 'a'");
    assert!(grammar.productions().is_empty());
    let mut generator = Generator::seeded(grammar, 0).unwrap();
    assert!(generator.generate(1).is_err());
}
