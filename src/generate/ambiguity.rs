//! Sampling-based ambiguity estimation.
//!
//! Generation is uniform over derivation trees. For an unambiguous grammar, every string of a
//! given length has exactly one tree, so sampled strings follow a uniform distribution. Strings
//! with several trees are drawn more often, in proportion to their number of trees.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use log::debug;
use num::{BigUint, ToPrimitive, Zero};
use rand::Rng;

use super::{GenerateError, Generator};
use crate::symbol::Terminal;

/// Observed number of occurrences of every sampled string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Frequencies {
    counts: BTreeMap<Vec<Terminal>, usize>,
    total: usize,
}

impl Frequencies {
    /// Creates empty frequencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of a string.
    pub fn record(&mut self, string: Vec<Terminal>) {
        *self.counts.entry(string).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of occurrences of a string.
    pub fn get(&self, string: &[Terminal]) -> usize {
        self.counts.get(string).copied().unwrap_or(0)
    }

    /// Number of distinct strings.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of recorded samples.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Iterates over strings and their occurrence counts, in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&[Terminal], usize)> {
        self.counts
            .iter()
            .map(|(string, &count)| (&string[..], count))
    }
}

/// Parameters of [`estimate_ambiguity`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmbiguityOptions {
    /// Number of strings to sample.
    pub samples: usize,
    /// How many lengths to try before giving up.
    pub max_attempts: usize,
    /// Candidate lengths.
    pub lengths: RangeInclusive<usize>,
}

impl Default for AmbiguityOptions {
    fn default() -> Self {
        AmbiguityOptions {
            samples: 1000,
            max_attempts: 100,
            lengths: 1..=10,
        }
    }
}

/// Result of [`estimate_ambiguity`].
#[derive(Clone, Debug)]
pub struct AmbiguityReport {
    /// The sampled length.
    pub length: usize,
    /// Number of derivation trees of the start symbol with this length.
    pub trees: BigUint,
    /// Sampled strings.
    pub frequencies: Frequencies,
}

impl AmbiguityReport {
    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.frequencies.total()
    }

    /// Probability of each observed string under a uniform distribution.
    pub fn expected_probability(&self) -> f64 {
        match self.frequencies.distinct() {
            0 => 0.0,
            distinct => 1.0 / distinct as f64,
        }
    }

    /// Observed probability of every sampled string.
    pub fn probabilities(&self) -> impl Iterator<Item = (&[Terminal], f64)> + '_ {
        let total = self.frequencies.total().max(1) as f64;
        self.frequencies
            .iter()
            .map(move |(string, count)| (string, count as f64 / total))
    }

    /// Largest absolute difference between an observed and the expected probability.
    pub fn max_deviation(&self) -> f64 {
        let expected = self.expected_probability();
        self.probabilities()
            .map(|(_, probability)| (probability - expected).abs())
            .fold(0.0, f64::max)
    }

    /// Number of derivation trees per distinct observed string.
    ///
    /// Above 1 when the grammar is ambiguous or when some strings were never sampled. Once
    /// every string has been observed, any value above 1 proves ambiguity.
    pub fn trees_per_string(&self) -> f64 {
        let trees = self.trees.to_f64().unwrap_or(f64::INFINITY);
        match self.frequencies.distinct() {
            0 => 0.0,
            distinct => trees / distinct as f64,
        }
    }
}

impl<R: Rng> Generator<R> {
    /// Generates `samples` strings of the given length and counts their occurrences.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::GenerationFailure`] if the grammar derives no string of this
    /// length.
    pub fn sample(&mut self, length: usize, samples: usize) -> Result<Frequencies, GenerateError> {
        let mut frequencies = Frequencies::new();
        for _ in 0..samples {
            frequencies.record(self.generate(length)?);
        }
        Ok(frequencies)
    }
}

/// Samples strings of a random length from `options.lengths` and compares their frequencies to
/// the uniform distribution.
///
/// # Errors
///
/// Returns [`GenerateError::GenerationFailure`] if no derivable length was found within
/// `options.max_attempts` tries.
pub fn estimate_ambiguity<R: Rng>(
    generator: &mut Generator<R>,
    options: &AmbiguityOptions,
) -> Result<AmbiguityReport, GenerateError> {
    let start = generator.grammar().start().clone();
    let mut length = *options.lengths.start();
    for attempt in 0..options.max_attempts {
        if options.lengths.is_empty() {
            break;
        }
        length = generator.rng_mut().gen_range(options.lengths.clone());
        let trees = generator.count_by_nonterminal(&start, length);
        if trees.is_zero() {
            debug!("attempt {}: no strings of length {}", attempt, length);
            continue;
        }
        let frequencies = generator.sample(length, options.samples)?;
        return Ok(AmbiguityReport {
            length,
            trees,
            frequencies,
        });
    }
    Err(GenerateError::GenerationFailure { length })
}
