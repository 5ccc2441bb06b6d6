#![allow(dead_code)]

use cfl_gen::{Grammar, Symbol};

/// Already in CNF.
pub const COUNTED: &str = "
S -> A X | U B | X A
X -> A X | U B | X A
A -> 'b' | A X | U B | X A
B -> 'b'
U -> 'a'
";

pub const NULLABLE: &str = "
S -> A S A | 'a' B
A -> B | S
B -> 'b' |
";

/// Alternatives of `S` are split by a rule for `A`.
pub const INTERLEAVED: &str = "
S -> A
A -> 'a'
S -> 'b' | S S
";

pub const BALANCED: &str = "S -> '(' S ')' S |";

/// Strings `a c* b d*`, each with exactly one tree.
pub const LINEAR: &str = "
S -> A B
A -> A C | 'a'
B -> B D | 'b'
C -> 'c'
D -> 'd'
";

pub fn arithmetic() -> Grammar {
    let t = Symbol::terminal;
    let n = Symbol::nonterminal;
    Grammar::build("Sum")
        .rule("Sum")
        .rhs([n("Sum"), t("+"), n("Product")])
        .rhs([n("Product")])
        .rule("Product")
        .rhs([n("Product"), t("*"), n("Factor")])
        .rhs([n("Factor")])
        .rule("Factor")
        .rhs([t("("), n("Sum"), t(")")])
        .rhs([t("n")])
        .build()
        .unwrap()
}

/// Recognizes the language of [`arithmetic`].
pub fn is_arithmetic(tokens: &[&str]) -> bool {
    fn sum(tokens: &[&str], pos: &mut usize) -> bool {
        if !product(tokens, pos) {
            return false;
        }
        while tokens.get(*pos) == Some(&"+") {
            *pos += 1;
            if !product(tokens, pos) {
                return false;
            }
        }
        true
    }
    fn product(tokens: &[&str], pos: &mut usize) -> bool {
        if !factor(tokens, pos) {
            return false;
        }
        while tokens.get(*pos) == Some(&"*") {
            *pos += 1;
            if !factor(tokens, pos) {
                return false;
            }
        }
        true
    }
    fn factor(tokens: &[&str], pos: &mut usize) -> bool {
        match tokens.get(*pos) {
            Some(&"n") => {
                *pos += 1;
                true
            }
            Some(&"(") => {
                *pos += 1;
                if !sum(tokens, pos) || tokens.get(*pos) != Some(&")") {
                    return false;
                }
                *pos += 1;
                true
            }
            _ => false,
        }
    }
    let mut pos = 0;
    sum(tokens, &mut pos) && pos == tokens.len()
}
