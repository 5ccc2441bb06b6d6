//! Grammar symbols. A symbol is either a terminal, which appears in generated output, or a
//! nonterminal, which is rewritten by the grammar's productions. The distinction is carried by
//! the [`Symbol`] tag from construction on.

pub mod index;
pub mod matrix;
pub mod set;
pub mod source;

use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

pub use self::index::SymbolIndex;
pub use self::matrix::SymbolBitMatrix;
pub use self::set::SymbolBitSet;
pub use self::source::SymbolSource;

/// An atomic output symbol.
#[derive(Clone, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Terminal(Rc<str>);

/// A symbol that must be rewritten before it contributes terminals.
#[derive(Clone, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Nonterminal(Rc<str>);

/// A grammar symbol, tagged with its kind.
#[derive(Clone, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub enum Symbol {
    /// A terminal symbol.
    Terminal(Terminal),
    /// A nonterminal symbol.
    Nonterminal(Nonterminal),
}

impl Terminal {
    /// Creates a terminal with the given text.
    pub fn new(text: impl AsRef<str>) -> Self {
        Terminal(text.as_ref().into())
    }

    /// Returns the terminal's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Nonterminal {
    /// Creates a nonterminal with the given name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Nonterminal(name.as_ref().into())
    }

    /// Returns the nonterminal's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Symbol {
    /// Shorthand for a terminal symbol.
    pub fn terminal(text: impl AsRef<str>) -> Self {
        Symbol::Terminal(Terminal::new(text))
    }

    /// Shorthand for a nonterminal symbol.
    pub fn nonterminal(name: impl AsRef<str>) -> Self {
        Symbol::Nonterminal(Nonterminal::new(name))
    }

    /// Returns the nonterminal, if this symbol is one.
    pub fn as_nonterminal(&self) -> Option<&Nonterminal> {
        match self {
            Symbol::Nonterminal(nonterminal) => Some(nonterminal),
            Symbol::Terminal(_) => None,
        }
    }

    /// Returns the terminal, if this symbol is one.
    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(terminal) => Some(terminal),
            Symbol::Nonterminal(_) => None,
        }
    }

    /// Checks whether this symbol is a terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Checks whether this symbol is a nonterminal.
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }
}

impl From<Terminal> for Symbol {
    fn from(terminal: Terminal) -> Self {
        Symbol::Terminal(terminal)
    }
}

impl From<Nonterminal> for Symbol {
    fn from(nonterminal: Nonterminal) -> Self {
        Symbol::Nonterminal(nonterminal)
    }
}

impl Borrow<str> for Nonterminal {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Symbols are rendered the way the loader reads them: nonterminals bare, terminals quoted.
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Nonterminal(nonterminal) => write!(f, "{}", nonterminal),
            Symbol::Terminal(terminal) => {
                f.write_str("'")?;
                for ch in terminal.as_str().chars() {
                    match ch {
                        '\'' => f.write_str("\\'")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        ch => write!(f, "{}", ch)?,
                    }
                }
                f.write_str("'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_display_escapes_quotes() {
        assert_eq!(Symbol::terminal("it's").to_string(), r"'it\'s'");
        assert_eq!(Symbol::terminal(r"a\b").to_string(), r"'a\\b'");
        assert_eq!(Symbol::terminal("a\nb\t").to_string(), r"'a\nb\t'");
        assert_eq!(Symbol::nonterminal("Expr").to_string(), "Expr");
    }

    #[test]
    fn test_tags_are_distinct() {
        assert_ne!(Symbol::terminal("A"), Symbol::nonterminal("A"));
        assert!(Symbol::terminal("A").as_nonterminal().is_none());
        assert!(Symbol::terminal("A").is_terminal());
        assert!(Symbol::nonterminal("A").is_nonterminal());
        assert!(!Symbol::nonterminal("A").is_terminal());
    }
}
