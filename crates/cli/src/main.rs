//! Parlance CLI: parse sentences against lexicon definition files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use parlance_core::{
    CaseNormalizer, Correction, Dictionary, DistanceCorrection, FoundWord, InputParser,
    LexiconDefinition, Normalizer, PunctuationNormalizer, RawSolution, WordDictionary,
};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Parlance semantic input parser.
#[derive(Parser)]
#[command(name = "parlance", version, about = "Parlance semantic input parser")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a sentence into ranked candidate interpretations
    Parse {
        /// The sentence to parse
        sentence: String,
        /// Lexicon definition file (repeatable; order is lookup priority)
        #[arg(long = "lexicon")]
        lexicons: Vec<PathBuf>,
        /// Offer distance-based spelling corrections for unknown tokens
        #[arg(long)]
        correct: bool,
    },

    /// Normalize a sentence (case fold, punctuation strip, whitespace collapse)
    Normalize {
        /// The sentence to normalize
        sentence: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    };
    process::exit(code);
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Parse {
            sentence,
            lexicons,
            correct,
        } => {
            let dictionaries = load_lexicons(&lexicons)?;
            let corrections: Vec<Box<dyn Correction>> = if correct {
                vec![Box::new(DistanceCorrection::from_dictionaries(
                    dictionaries.iter(),
                    DistanceCorrection::DEFAULT_MAX_DISTANCE,
                ))]
            } else {
                Vec::new()
            };
            let parser = InputParser::with_providers(
                default_normalizers(),
                dictionaries
                    .into_iter()
                    .map(|d| Box::new(d) as Box<dyn Dictionary>)
                    .collect(),
                corrections,
            );

            let solutions = parser.parse(&sentence)?;
            match cli.output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&solutions)?);
                }
                OutputFormat::Text => print_solutions(&solutions),
            }
        }

        Commands::Normalize { sentence } => {
            let parser = InputParser::with_providers(default_normalizers(), Vec::new(), Vec::new());
            println!("{}", parser.normalize(&sentence)?);
        }
    }

    Ok(())
}

fn default_normalizers() -> Vec<Box<dyn Normalizer>> {
    vec![Box::new(CaseNormalizer), Box::new(PunctuationNormalizer)]
}

fn load_lexicons(paths: &[PathBuf]) -> Result<Vec<WordDictionary>, Box<dyn std::error::Error>> {
    let mut dictionaries = Vec::with_capacity(paths.len());
    for path in paths {
        dictionaries.push(load_lexicon(path)?);
    }
    Ok(dictionaries)
}

fn load_lexicon(path: &Path) -> Result<WordDictionary, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("cannot read lexicon {}: {err}", path.display()))?;
    let definition: LexiconDefinition = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid lexicon {}: {err}", path.display()))?;
    Ok(WordDictionary::from_definition(definition))
}

fn print_solutions(solutions: &[RawSolution]) {
    if solutions.is_empty() {
        println!("no solutions");
        return;
    }
    for (rank, solution) in solutions.iter().enumerate() {
        let rendered = solution
            .found_words
            .iter()
            .map(FoundWord::to_string)
            .collect::<Vec<_>>()
            .join("  ");
        println!("{rank}. [{}] {rendered}", solution.quality);
    }
}
