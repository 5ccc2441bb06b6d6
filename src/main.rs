use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use cfl_gen::generate::{estimate_ambiguity, AmbiguityOptions};
use cfl_gen::{
    load_file, normalize_to_cnf, GenerateError, Generator, Grammar, Nonterminal, Terminal,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use rand::Rng;
use serde::Serialize;

/// Lengths tried when no length is given.
const DEFAULT_LENGTHS: std::ops::RangeInclusive<usize> = 1..=10;
const LENGTH_ATTEMPTS: usize = 20;

/// Random strings from context-free languages
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random strings from a grammar
    Generate {
        /// Path to the grammar file
        grammar_file: PathBuf,

        /// Number of strings to generate
        #[arg(short, long, default_value_t = 1)]
        number: usize,

        /// Length of each string. Drawn from 1..=10 when absent
        #[arg(short, long)]
        length: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::String)]
        format: Format,

        /// Output file path. Writes to stdout when absent
        #[arg(short, long)]
        outfile: Option<PathBuf>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Separator between terminals
        #[arg(long, default_value = " ")]
        separator: String,
    },
    /// Print the grammar in Chomsky Normal Form
    Cnf {
        /// Path to the grammar file
        grammar_file: PathBuf,
    },
    /// Print the number of derivation trees of every length
    Count {
        /// Path to the grammar file
        grammar_file: PathBuf,

        /// Greatest length
        #[arg(short, long)]
        length: usize,

        /// Nonterminal to count. Defaults to the start symbol
        #[arg(long)]
        nonterminal: Option<String>,
    },
    /// Estimate whether a grammar is ambiguous by sampling
    Ambiguity {
        /// Path to the grammar file
        grammar_file: PathBuf,

        /// Number of strings to sample
        #[arg(long, default_value_t = 1000)]
        samples: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::String)]
        format: Format,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    String,
    Json,
}

#[derive(Serialize)]
struct AmbiguitySummary {
    length: usize,
    samples: usize,
    trees: String,
    distinct: usize,
    expected_probability: f64,
    max_deviation: f64,
    trees_per_string: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            grammar_file,
            number,
            length,
            format,
            outfile,
            seed,
            separator,
        } => {
            let mut generator = generator(&grammar_file, seed)?;
            if let Some(length) = length {
                if length >= 1 {
                    generator.preprocess(length)?;
                }
            }
            let mut results = Vec::with_capacity(number);
            for _ in 0..number {
                let string = match length {
                    Some(length) => generator.generate(length)?,
                    None => generate_any_length(&mut generator)?,
                };
                results.push(
                    string
                        .iter()
                        .map(|terminal| terminal.as_str().to_string())
                        .collect::<Vec<_>>(),
                );
            }

            let mut out: Box<dyn Write> = match outfile {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout().lock()),
            };
            match format {
                Format::String => {
                    for string in &results {
                        writeln!(out, "{}", string.join(&separator))?;
                    }
                }
                Format::Json => writeln!(out, "{}", serde_json::to_string(&results)?)?,
            }
            out.flush()?;
        }
        Commands::Cnf { grammar_file } => {
            let cnf = normalize(&grammar_file)?;
            print!("{}", cnf);
        }
        Commands::Count {
            grammar_file,
            length,
            nonterminal,
        } => {
            let mut generator = Generator::new(normalize(&grammar_file)?)?;
            let nonterminal = match nonterminal {
                Some(name) => Nonterminal::new(name),
                None => generator.grammar().start().clone(),
            };
            for n in 1..=length {
                println!("{}\t{}", n, generator.count_by_nonterminal(&nonterminal, n));
            }
        }
        Commands::Ambiguity {
            grammar_file,
            samples,
            seed,
            format,
        } => {
            let mut generator = generator(&grammar_file, seed)?;
            let options = AmbiguityOptions {
                samples,
                ..AmbiguityOptions::default()
            };
            let report = estimate_ambiguity(&mut generator, &options)?;
            let summary = AmbiguitySummary {
                length: report.length,
                samples: report.samples(),
                trees: report.trees.to_string(),
                distinct: report.frequencies.distinct(),
                expected_probability: report.expected_probability(),
                max_deviation: report.max_deviation(),
                trees_per_string: report.trees_per_string(),
            };
            match format {
                Format::String => {
                    println!("length: {}", summary.length);
                    println!("samples: {}", summary.samples);
                    println!("derivation trees: {}", summary.trees);
                    println!("distinct strings: {}", summary.distinct);
                    println!("expected probability: {:.6}", summary.expected_probability);
                    println!("max deviation: {:.6}", summary.max_deviation);
                    println!("trees per string: {:.3}", summary.trees_per_string);
                }
                Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            }
        }
    }

    Ok(())
}

fn normalize(path: &Path) -> Result<Grammar, Box<dyn Error>> {
    let grammar = load_file(path)?;
    info!(
        "loaded {} productions from {}",
        grammar.productions().len(),
        path.display()
    );
    Ok(normalize_to_cnf(&grammar)?)
}

fn generator(path: &Path, seed: Option<u64>) -> Result<Generator, Box<dyn Error>> {
    let cnf = normalize(path)?;
    let generator = match seed {
        Some(seed) => Generator::seeded(cnf, seed)?,
        None => Generator::new(cnf)?,
    };
    Ok(generator)
}

fn generate_any_length(
    generator: &mut Generator,
) -> Result<Vec<Terminal>, GenerateError> {
    let mut last_error = GenerateError::GenerationFailure {
        length: *DEFAULT_LENGTHS.end(),
    };
    for _ in 0..LENGTH_ATTEMPTS {
        let length = generator.rng_mut().gen_range(DEFAULT_LENGTHS);
        match generator.generate(length) {
            Ok(string) => return Ok(string),
            Err(error @ GenerateError::GenerationFailure { .. }) => {
                warn!("{}, retrying", error);
                last_error = error;
            }
            Err(error) => return Err(error),
        }
    }
    Err(last_error)
}
