//! Command line argument parsing for the Corrigo CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::server::protocol::DEFAULT_PORT;

/// Corrigo - a keyboard-aware spelling corrector
#[derive(Parser, Debug, Clone)]
#[command(name = "corrigo")]
#[command(about = "A keyboard-aware spelling correction engine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Corrigo Contributors")]
#[command(long_about = None)]
pub struct CorrigoArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
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

impl CorrigoArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check whether a word is in the lexicon
    Check(CheckArgs),

    /// Find the best correction for a word
    Correct(CorrectArgs),

    /// Check a word and correct it if misspelled
    Process(ProcessArgs),

    /// Add a word to the lexicon, or bump it if already present
    Add(AddArgs),

    /// Show lexicon statistics
    Stats(StatsArgs),

    /// Run the correction server
    Serve(ServeArgs),
}

/// Arguments for checking a word
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the lexicon file
    #[arg(value_name = "LEXICON")]
    pub lexicon: PathBuf,

    /// Word to check
    #[arg(value_name = "WORD")]
    pub word: String,
}

/// Arguments for correcting a word
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Path to the lexicon file
    #[arg(value_name = "LEXICON")]
    pub lexicon: PathBuf,

    /// Word to correct
    #[arg(value_name = "WORD")]
    pub word: String,
}

/// Arguments for processing a word
#[derive(Parser, Debug, Clone)]
pub struct ProcessArgs {
    /// Path to the lexicon file
    #[arg(value_name = "LEXICON")]
    pub lexicon: PathBuf,

    /// Word to process
    #[arg(value_name = "WORD")]
    pub word: String,
}

/// Arguments for adding a word
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// Path to the lexicon file
    #[arg(value_name = "LEXICON")]
    pub lexicon: PathBuf,

    /// Word to add or bump
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Write the updated lexicon to this path instead of in place
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Arguments for lexicon statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the lexicon file
    #[arg(value_name = "LEXICON")]
    pub lexicon: PathBuf,

    /// Show the N most frequent words
    #[arg(short, long, default_value = "0", value_name = "N")]
    pub top: usize,
}

/// Arguments for running the server
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Path to the lexicon file
    #[arg(value_name = "LEXICON")]
    pub lexicon: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
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
    fn test_check_command() {
        let args =
            CorrigoArgs::try_parse_from(["corrigo", "check", "words.txt", "hello"]).unwrap();

        if let Command::Check(check_args) = args.command {
            assert_eq!(check_args.lexicon, PathBuf::from("words.txt"));
            assert_eq!(check_args.word, "hello");
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_correct_command() {
        let args =
            CorrigoArgs::try_parse_from(["corrigo", "correct", "words.txt", "helo"]).unwrap();

        if let Command::Correct(correct_args) = args.command {
            assert_eq!(correct_args.word, "helo");
        } else {
            panic!("Expected Correct command");
        }
    }

    #[test]
    fn test_add_command_with_output() {
        let args = CorrigoArgs::try_parse_from([
            "corrigo",
            "add",
            "words.txt",
            "hello",
            "--output",
            "updated.txt",
        ])
        .unwrap();

        if let Command::Add(add_args) = args.command {
            assert_eq!(add_args.word, "hello");
            assert_eq!(add_args.output, Some(PathBuf::from("updated.txt")));
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_serve_command_defaults() {
        let args = CorrigoArgs::try_parse_from(["corrigo", "serve", "words.txt"]).unwrap();

        if let Command::Serve(serve_args) = args.command {
            assert_eq!(serve_args.host, "127.0.0.1");
            assert_eq!(serve_args.port, DEFAULT_PORT);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_stats_command() {
        let args =
            CorrigoArgs::try_parse_from(["corrigo", "stats", "words.txt", "--top", "10"]).unwrap();

        if let Command::Stats(stats_args) = args.command {
            assert_eq!(stats_args.top, 10);
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = CorrigoArgs::try_parse_from(["corrigo", "check", "w.txt", "a"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = CorrigoArgs::try_parse_from(["corrigo", "-vv", "check", "w.txt", "a"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        // Quiet flag
        let args =
            CorrigoArgs::try_parse_from(["corrigo", "--quiet", "check", "w.txt", "a"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            CorrigoArgs::try_parse_from(["corrigo", "--format", "json", "check", "w.txt", "a"])
                .unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
