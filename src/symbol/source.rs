//! Source of fresh nonterminal names.

use std::collections::BTreeSet;

use super::Nonterminal;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A source of fresh nonterminals.
///
/// Names are handed out in the order `A, B, …, Z, AA, BB, …, ZZ, AAA, …`. Names that are already
/// in use are skipped, and every name handed out is recorded as used, so the same source can be
/// shared by several transformations without collisions.
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    used: BTreeSet<String>,
    next_id: usize,
}

impl SymbolSource {
    /// Creates a source with no names in use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source that avoids the given names.
    pub fn with_used_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SymbolSource {
            used: names.into_iter().map(|name| name.as_ref().to_string()).collect(),
            next_id: 0,
        }
    }

    /// Marks a name as used.
    pub fn reserve(&mut self, name: impl AsRef<str>) {
        self.used.insert(name.as_ref().to_string());
    }

    /// Checks whether a name is in use.
    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Returns generated nonterminals.
    pub fn sym<const N: usize>(&mut self) -> [Nonterminal; N] {
        std::array::from_fn(|_| self.next_sym())
    }

    /// Generates a new unique nonterminal.
    pub fn next_sym(&mut self) -> Nonterminal {
        loop {
            let name = letter_name(self.next_id);
            self.next_id += 1;
            if self.used.insert(name.clone()) {
                return Nonterminal::new(name);
            }
        }
    }

    /// Returns the number of names in use.
    pub fn num_used(&self) -> usize {
        self.used.len()
    }

    /// Returns an iterator that generates nonterminals.
    pub fn generate(&mut self) -> Generate<'_> {
        Generate { source: self }
    }
}

fn letter_name(id: usize) -> String {
    let letter = ALPHABET[id % ALPHABET.len()] as char;
    let reps = id / ALPHABET.len() + 1;
    std::iter::repeat(letter).take(reps).collect()
}

/// Iterator for generating nonterminals.
pub struct Generate<'a> {
    source: &'a mut SymbolSource,
}

impl<'a> Iterator for Generate<'a> {
    type Item = Nonterminal;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.source.next_sym())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(source: &mut SymbolSource, n: usize) -> Vec<String> {
        source
            .generate()
            .take(n)
            .map(|sym| sym.name().to_string())
            .collect()
    }

    #[test]
    fn test_letter_sequence() {
        let mut source = SymbolSource::new();
        let names = names(&mut source, 54);
        assert_eq!(names[0], "A");
        assert_eq!(names[25], "Z");
        assert_eq!(names[26], "AA");
        assert_eq!(names[27], "BB");
        assert_eq!(names[51], "ZZ");
        assert_eq!(names[52], "AAA");
        assert_eq!(names[53], "BBB");
    }

    #[test]
    fn test_skips_used_names() {
        let mut source = SymbolSource::with_used_names(["A", "C", "BB"]);
        let names = names(&mut source, 27);
        assert_eq!(&names[..3], &["B", "D", "E"]);
        assert!(!names.contains(&"BB".to_string()));
        assert!(source.is_used("E"));
        // Three reserved names, plus the 27 generated ones.
        assert_eq!(source.num_used(), 30);
    }

    #[test]
    fn test_never_repeats() {
        let mut source = SymbolSource::new();
        let [a, b] = source.sym();
        source.reserve("C");
        let c = source.next_sym();
        assert_eq!((a.name(), b.name(), c.name()), ("A", "B", "D"));
    }
}
