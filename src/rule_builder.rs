//! Grammars can be built with the builder pattern.

use crate::grammar::{Grammar, GrammarError, Production};
use crate::symbol::{Nonterminal, Symbol};

/// The grammar builder.
///
/// ```
/// use cfl_gen::{Grammar, Symbol};
///
/// let grammar = Grammar::build("S")
///     .rule("S")
///     .rhs([Symbol::nonterminal("A"), Symbol::nonterminal("A")])
///     .rule("A")
///     .rhs([Symbol::terminal("a")])
///     .rhs([])
///     .build()
///     .unwrap();
/// assert_eq!(grammar.productions().len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct GrammarBuilder {
    start: Nonterminal,
    lhs: Nonterminal,
    productions: Vec<Production>,
}

impl GrammarBuilder {
    /// Creates a builder. Alternatives added before the first call to `rule` belong to the
    /// start symbol.
    pub fn new(start: Nonterminal) -> Self {
        GrammarBuilder {
            lhs: start.clone(),
            start,
            productions: vec![],
        }
    }

    /// Starts building a new rule with the given LHS.
    pub fn rule(mut self, lhs: impl AsRef<str>) -> Self {
        self.lhs = Nonterminal::new(lhs);
        self
    }

    /// Adds an alternative for the current LHS.
    pub fn rhs(mut self, syms: impl IntoIterator<Item = Symbol>) -> Self {
        let rhs: Vec<Symbol> = syms.into_iter().collect();
        self.productions.push(Production::new(self.lhs.clone(), rhs));
        self
    }

    /// Finishes building.
    ///
    /// # Errors
    ///
    /// Fails as [`Grammar::new`] does.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        Grammar::new(self.start, self.productions)
    }
}
