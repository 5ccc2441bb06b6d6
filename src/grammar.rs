//! Definitions of the context-free grammar type and its productions.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use crate::rule_builder::GrammarBuilder;
use crate::symbol::{Nonterminal, Symbol, Terminal};

/// A rewrite rule `lhs -> rhs`.
#[derive(Clone, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Production {
    /// The production's left-hand side symbol.
    pub lhs: Nonterminal,
    /// The production's right-hand side symbols. May be empty.
    pub rhs: Rc<[Symbol]>,
}

impl Production {
    /// Creates a new production.
    pub fn new(lhs: Nonterminal, rhs: impl AsRef<[Symbol]>) -> Self {
        Production {
            lhs,
            rhs: rhs.as_ref().into(),
        }
    }

    /// Checks whether the right-hand side is empty.
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    /// Checks whether this is a unit production, with exactly one nonterminal on the RHS.
    pub fn is_unit(&self) -> bool {
        matches!(&self.rhs[..], [sym] if sym.is_nonterminal())
    }

    /// Returns the terminal, if this is a production of the form `A -> 'a'`.
    pub fn terminal(&self) -> Option<&Terminal> {
        match &self.rhs[..] {
            [Symbol::Terminal(terminal)] => Some(terminal),
            _ => None,
        }
    }

    /// Returns both nonterminals, if this is a production of the form `A -> B C`.
    pub fn binary(&self) -> Option<(&Nonterminal, &Nonterminal)> {
        match &self.rhs[..] {
            [Symbol::Nonterminal(left), Symbol::Nonterminal(right)] => Some((left, right)),
            _ => None,
        }
    }

    /// Iterates over nonterminals on the right-hand side.
    pub fn rhs_nonterminals(&self) -> impl Iterator<Item = &Nonterminal> {
        self.rhs.iter().filter_map(Symbol::as_nonterminal)
    }

    /// Iterates over terminals on the right-hand side.
    pub fn rhs_terminals(&self) -> impl Iterator<Item = &Terminal> {
        self.rhs.iter().filter_map(Symbol::as_terminal)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for sym in self.rhs.iter() {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}

/// Returned when productions do not form a well-defined grammar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GrammarError {
    /// A nonterminal appears on some right-hand side, but never on a left-hand side.
    Malformed {
        /// The undefined nonterminal.
        nonterminal: Nonterminal,
    },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Malformed { nonterminal } => write!(
                f,
                "malformed grammar: nonterminal `{}` is referenced but has no productions",
                nonterminal
            ),
        }
    }
}

impl std::error::Error for GrammarError {}

/// Context-free grammar type.
///
/// A grammar is immutable. Transformations such as
/// [`normalize_to_cnf`](crate::normalize::normalize_to_cnf) produce new grammars.
///
/// Two grammars are equal when they have the same start symbol and the same set of
/// productions. The order of productions only matters for iteration and rendering.
#[derive(Clone, Debug)]
pub struct Grammar {
    /// The start symbol.
    start: Nonterminal,
    /// The array of productions, deduplicated, in order of first occurrence.
    productions: Vec<Production>,
    nonterminals: BTreeSet<Nonterminal>,
    terminals: BTreeSet<Terminal>,
}

impl Grammar {
    /// Creates a grammar from a start symbol and productions. Duplicate productions are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::Malformed`] if a nonterminal referenced on a right-hand side
    /// is never the left-hand side of a production. The start symbol may have no productions,
    /// in which case the grammar describes the empty language.
    pub fn new(
        start: Nonterminal,
        productions: impl IntoIterator<Item = Production>,
    ) -> Result<Self, GrammarError> {
        let mut seen = BTreeSet::new();
        let productions: Vec<Production> = productions
            .into_iter()
            .filter(|production| seen.insert(production.clone()))
            .collect();

        let defined: BTreeSet<&Nonterminal> = productions.iter().map(|p| &p.lhs).collect();
        for production in &productions {
            if let Some(undefined) = production
                .rhs_nonterminals()
                .find(|sym| !defined.contains(sym))
            {
                return Err(GrammarError::Malformed {
                    nonterminal: undefined.clone(),
                });
            }
        }

        let mut nonterminals = BTreeSet::new();
        let mut terminals = BTreeSet::new();
        nonterminals.insert(start.clone());
        for production in &productions {
            nonterminals.insert(production.lhs.clone());
            nonterminals.extend(production.rhs_nonterminals().cloned());
            terminals.extend(production.rhs_terminals().cloned());
        }

        Ok(Grammar {
            start,
            productions,
            nonterminals,
            terminals,
        })
    }

    /// Starts building a grammar with the given start symbol.
    pub fn build(start: impl AsRef<str>) -> GrammarBuilder {
        GrammarBuilder::new(Nonterminal::new(start))
    }

    /// Returns the start symbol.
    pub fn start(&self) -> &Nonterminal {
        &self.start
    }

    /// Returns the productions, in order of first occurrence.
    pub fn productions(&self) -> &[Production] {
        &self.productions[..]
    }

    /// Returns every nonterminal: the start symbol, all left-hand sides and all nonterminals
    /// on right-hand sides.
    pub fn nonterminals(&self) -> &BTreeSet<Nonterminal> {
        &self.nonterminals
    }

    /// Returns every terminal occurring on a right-hand side.
    pub fn terminals(&self) -> &BTreeSet<Terminal> {
        &self.terminals
    }

    /// Iterates over the productions with the given left-hand side.
    pub fn productions_for<'a>(
        &'a self,
        lhs: &'a Nonterminal,
    ) -> impl Iterator<Item = &'a Production> + 'a {
        self.productions.iter().filter(move |p| &p.lhs == lhs)
    }

    /// Checks whether the grammar is in Chomsky Normal Form: every production is `A -> 'a'`
    /// or `A -> B C`, except for an optional `start -> ε`.
    pub fn is_in_cnf(&self) -> bool {
        self.productions.iter().all(|production| {
            if production.is_empty() {
                production.lhs == self.start
            } else if production.terminal().is_some() {
                true
            } else if let Some((left, right)) = production.binary() {
                self.nonterminals.contains(left) && self.nonterminals.contains(right)
            } else {
                false
            }
        })
    }

    /// Checks whether the start symbol derives the empty string directly.
    pub fn has_empty_start(&self) -> bool {
        self.productions_for(&self.start).any(Production::is_empty)
    }

    /// Formats the grammar to a `String` in the text format understood by
    /// [`load`](crate::load::load). The output looks like this:
    ///
    /// ```text
    /// S -> A B | 'a'
    /// A -> 'a' |
    /// ```
    ///
    /// There is one line per left-hand side, in order of first occurrence. The start symbol's
    /// line comes first.
    pub fn stringify_to_bnf(&self) -> String {
        let mut order: Vec<&Nonterminal> = vec![];
        let mut by_lhs: BTreeMap<&Nonterminal, Vec<&Production>> = BTreeMap::new();
        for production in &self.productions {
            let alternatives = by_lhs.entry(&production.lhs).or_default();
            if alternatives.is_empty() {
                order.push(&production.lhs);
            }
            alternatives.push(production);
        }
        if let Some(pos) = order.iter().position(|&lhs| lhs == &self.start) {
            let start = order.remove(pos);
            order.insert(0, start);
        }

        let mut result = String::new();
        for lhs in order {
            let alternatives = by_lhs[lhs]
                .iter()
                .map(|production| {
                    production
                        .rhs
                        .iter()
                        .map(|sym| sym.to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect::<Vec<_>>()
                .join(" | ");
            let line = format!("{} -> {}", lhs, alternatives);
            result.push_str(line.trim_end());
            result.push('\n');
        }
        result
    }
}

impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        // Productions are deduplicated, so equal lengths and inclusion imply equal sets.
        self.start == other.start
            && self.productions.len() == other.productions.len()
            && {
                let ours: BTreeSet<&Production> = self.productions.iter().collect();
                other.productions.iter().all(|production| ours.contains(production))
            }
    }
}

impl Eq for Grammar {}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify_to_bnf())
    }
}
