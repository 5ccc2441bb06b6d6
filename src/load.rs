//! Loads context-free grammars from text.
//!
//! The format has one rule per line:
//!
//! ```text
//! # Comments run to the end of the line.
//! S -> A 'b' | "c" |
//! A -> 'a'
//! ```
//!
//! Bare identifiers are nonterminals, quoted literals are terminals, and an empty alternative
//! is an empty production. Several lines may share a left-hand side. The left-hand side of the
//! first rule is the start symbol.

use std::fmt;
use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::{Chars, FromStr};

use crate::grammar::{Grammar, GrammarError, Production};
use crate::symbol::{Nonterminal, Symbol};

/// Represents an error when loading a grammar.
#[derive(Debug)]
pub enum LoadError {
    /// The text is not a valid grammar.
    Parse {
        /// Human-readable reason for the error.
        reason: String,
        /// Line where the error happened.
        ///
        /// One-indexed.
        line: u32,
        /// Column where the error happened.
        ///
        /// One-indexed.
        col: u32,
    },
    /// The rules do not form a well-defined grammar.
    Grammar(GrammarError),
    /// The grammar file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Parse { reason, line, col } => {
                write!(f, "Parse error at line {} column {}: {}", line, col, reason)
            }
            LoadError::Grammar(error) => write!(f, "{}", error),
            LoadError::Io(error) => write!(f, "could not read grammar: {}", error),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Parse { .. } => None,
            LoadError::Grammar(error) => Some(error),
            LoadError::Io(error) => Some(error),
        }
    }
}

impl From<GrammarError> for LoadError {
    fn from(error: GrammarError) -> Self {
        LoadError::Grammar(error)
    }
}

impl From<std::io::Error> for LoadError {
    fn from(error: std::io::Error) -> Self {
        LoadError::Io(error)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Token {
    Ident(String),
    Literal(String),
    Arrow,
    Pipe,
    Newline,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(ident) => write!(f, "identifier `{}`", ident),
            Token::Literal(literal) => write!(f, "literal {:?}", literal),
            Token::Arrow => f.write_str("`->`"),
            Token::Pipe => f.write_str("`|`"),
            Token::Newline => f.write_str("end of line"),
        }
    }
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line_no: u32,
    col_no: u32,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Lexer {
            chars: text.chars().peekable(),
            line_no: 1,
            col_no: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<(Token, u32, u32)>, LoadError> {
        let mut tokens = vec![];
        while let Some(&ch) = self.chars.peek() {
            let (line, col) = (self.line_no, self.col_no);
            let token = match ch {
                '\n' => {
                    self.advance();
                    Token::Newline
                }
                ch if ch.is_whitespace() => {
                    self.advance();
                    continue;
                }
                '#' => {
                    while self.chars.peek().map_or(false, |&ch| ch != '\n') {
                        self.advance();
                    }
                    continue;
                }
                '|' => {
                    self.advance();
                    Token::Pipe
                }
                '-' => {
                    self.advance();
                    if self.chars.peek() == Some(&'>') {
                        self.advance();
                        Token::Arrow
                    } else {
                        return Err(self.error("expected `->`", line, col));
                    }
                }
                '\'' | '"' => Token::Literal(self.literal(ch, line, col)?),
                ch if is_ident_char(ch) => {
                    let mut ident = String::new();
                    while let Some(&ch) = self.chars.peek() {
                        if !is_ident_char(ch) {
                            break;
                        }
                        ident.push(ch);
                        self.advance();
                    }
                    Token::Ident(ident)
                }
                ch => return Err(self.error(&format!("unexpected character {:?}", ch), line, col)),
            };
            tokens.push((token, line, col));
        }
        Ok(tokens)
    }

    fn literal(&mut self, quote: char, line: u32, col: u32) -> Result<String, LoadError> {
        self.advance();
        let mut result = String::new();
        loop {
            match self.advance() {
                Some(ch) if ch == quote => return Ok(result),
                Some('\\') => match self.advance() {
                    Some(escaped @ ('\\' | '\'' | '"')) => result.push(escaped),
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    _ => return Err(self.error("invalid escape in literal", line, col)),
                },
                Some('\n') | None => return Err(self.error("unterminated literal", line, col)),
                Some(ch) => result.push(ch),
            }
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line_no += 1;
            self.col_no = 1;
        } else {
            self.col_no += 1;
        }
        Some(ch)
    }

    fn error(&self, reason: &str, line: u32, col: u32) -> LoadError {
        LoadError::Parse {
            reason: reason.to_string(),
            line,
            col,
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '$' | '.')
}

/// Loads a grammar from text.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] for text that does not follow the format, and
/// [`LoadError::Grammar`] when a nonterminal is used but never defined.
pub fn load(text: &str) -> Result<Grammar, LoadError> {
    let mut tokens = Lexer::new(text).tokenize()?.into_iter().peekable();
    let mut start: Option<Nonterminal> = None;
    let mut productions = vec![];

    loop {
        while tokens.next_if(|(token, ..)| *token == Token::Newline).is_some() {}
        let lhs = match tokens.next() {
            None => break,
            Some((Token::Ident(ident), ..)) => Nonterminal::new(ident),
            Some((token, line, col)) => {
                return Err(LoadError::Parse {
                    reason: format!("expected a nonterminal, found {}", token),
                    line,
                    col,
                })
            }
        };
        match tokens.next() {
            Some((Token::Arrow, ..)) => {}
            Some((token, line, col)) => {
                return Err(LoadError::Parse {
                    reason: format!("expected `->`, found {}", token),
                    line,
                    col,
                })
            }
            None => {
                return Err(LoadError::Parse {
                    reason: "expected `->`, found end of input".to_string(),
                    line: text.lines().count().max(1) as u32,
                    col: 1,
                })
            }
        }
        start.get_or_insert_with(|| lhs.clone());

        let mut rhs = vec![];
        loop {
            match tokens.next() {
                None | Some((Token::Newline, ..)) => {
                    productions.push(Production::new(lhs.clone(), &rhs));
                    break;
                }
                Some((Token::Pipe, ..)) => {
                    productions.push(Production::new(lhs.clone(), &rhs));
                    rhs.clear();
                }
                Some((Token::Ident(ident), ..)) => rhs.push(Symbol::nonterminal(ident)),
                Some((Token::Literal(literal), ..)) => rhs.push(Symbol::terminal(literal)),
                Some((Token::Arrow, line, col)) => {
                    return Err(LoadError::Parse {
                        reason: "unexpected `->` on a right-hand side".to_string(),
                        line,
                        col,
                    })
                }
            }
        }
    }

    let start = start.ok_or_else(|| LoadError::Parse {
        reason: "the grammar has no rules".to_string(),
        line: 1,
        col: 1,
    })?;
    Ok(Grammar::new(start, productions)?)
}

/// Loads a grammar from a file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Grammar, LoadError> {
    let text = fs::read_to_string(path)?;
    load(&text)
}

impl FromStr for Grammar {
    type Err = LoadError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        load(text)
    }
}
