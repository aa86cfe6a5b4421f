//! Command line argument parsing for the Sous CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Sous - parse free-text recipe ingredient lines
#[derive(Parser, Debug, Clone)]
#[command(name = "sous")]
#[command(about = "Parse free-text recipe ingredient lines into structured records")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SousArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SousArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse ingredient lines given on the command line
    Parse(ParseArgs),

    /// Parse every line of a file
    Batch(BatchArgs),

    /// Print the grammar templates in evaluation order
    Templates(TemplatesArgs),

    /// List ingredients whose name starts with a prefix
    Complete(CompleteArgs),
}

/// Vocabulary and grammar sources shared by the parsing commands
#[derive(clap::Args, Debug, Clone)]
pub struct GrammarSource {
    /// Vocabulary file (JSON)
    #[arg(long = "vocab", value_name = "VOCAB_FILE", env = "SOUS_VOCABULARY")]
    pub vocabulary: PathBuf,

    /// Grammar file (JSON); the built-in grammar is used when omitted
    #[arg(long, value_name = "GRAMMAR_FILE", conflicts_with = "config")]
    pub grammar: Option<PathBuf>,

    /// Parser config file (JSON) with the grammar and tracing options
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for parsing lines
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    /// Ingredient lines
    #[arg(value_name = "LINE", required = true)]
    pub lines: Vec<String>,

    #[command(flatten)]
    pub source: GrammarSource,
}

/// Arguments for parsing a file
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// File with one ingredient line per line
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub source: GrammarSource,

    /// Report unmatched lines grouped by classification
    #[arg(long)]
    pub misses: bool,

    /// Show per-template hit counts
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for listing templates
#[derive(Parser, Debug, Clone)]
pub struct TemplatesArgs {
    /// Grammar file (JSON); the built-in grammar is used when omitted
    #[arg(long, value_name = "GRAMMAR_FILE")]
    pub grammar: Option<PathBuf>,
}

/// Arguments for autocomplete
#[derive(Parser, Debug, Clone)]
pub struct CompleteArgs {
    /// Name prefix
    #[arg(value_name = "PREFIX")]
    pub prefix: String,

    /// Vocabulary file (JSON)
    #[arg(long = "vocab", value_name = "VOCAB_FILE", env = "SOUS_VOCABULARY")]
    pub vocabulary: PathBuf,

    /// Maximum number of suggestions
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_command() {
        let args = SousArgs::try_parse_from([
            "sous",
            "parse",
            "2 cups flour",
            "a dozen ripe bananas",
            "--vocab",
            "vocabulary.json",
        ])
        .unwrap();

        if let Command::Parse(parse_args) = args.command {
            assert_eq!(parse_args.lines, vec!["2 cups flour", "a dozen ripe bananas"]);
            assert_eq!(parse_args.source.vocabulary, PathBuf::from("vocabulary.json"));
            assert_eq!(parse_args.source.grammar, None);
            assert_eq!(parse_args.source.config, None);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_batch_command() {
        let args = SousArgs::try_parse_from([
            "sous",
            "-f",
            "json",
            "batch",
            "recipe.txt",
            "--vocab",
            "vocabulary.json",
            "--grammar",
            "grammar.json",
            "--misses",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        if let Command::Batch(batch_args) = args.command {
            assert_eq!(batch_args.input, PathBuf::from("recipe.txt"));
            assert_eq!(batch_args.source.grammar, Some(PathBuf::from("grammar.json")));
            assert!(batch_args.misses);
            assert!(!batch_args.stats);
        } else {
            panic!("Expected Batch command");
        }
    }

    #[test]
    fn test_complete_command() {
        let args =
            SousArgs::try_parse_from(["sous", "complete", "che", "--vocab", "v.json", "-l", "3"])
                .unwrap();

        if let Command::Complete(complete_args) = args.command {
            assert_eq!(complete_args.prefix, "che");
            assert_eq!(complete_args.limit, 3);
        } else {
            panic!("Expected Complete command");
        }
    }

    #[test]
    fn test_config_conflicts_with_grammar() {
        let args = SousArgs::try_parse_from([
            "sous", "parse", "salt", "--vocab", "v.json", "--config", "parser.json",
        ])
        .unwrap();
        if let Command::Parse(parse_args) = args.command {
            assert_eq!(parse_args.source.config, Some(PathBuf::from("parser.json")));
        } else {
            panic!("Expected Parse command");
        }

        assert!(
            SousArgs::try_parse_from([
                "sous", "parse", "salt", "--vocab", "v.json", "--config", "parser.json",
                "--grammar", "grammar.json",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_parse_requires_a_line() {
        assert!(SousArgs::try_parse_from(["sous", "parse", "--vocab", "v.json"]).is_err());
    }

    #[test]
    fn test_verbosity() {
        let args = SousArgs::try_parse_from(["sous", "templates"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SousArgs::try_parse_from(["sous", "-vvv", "templates"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = SousArgs::try_parse_from(["sous", "-q", "-vv", "templates"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
