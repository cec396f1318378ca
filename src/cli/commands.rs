//! Command implementations for the Corrigo CLI.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::checker::{SpellChecker, Verdict};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::server::{ServerConfig, SpellServer};
use crate::vocabulary::MemoryVocabulary;

/// Execute a CLI command.
pub fn execute_command(args: CorrigoArgs) -> Result<()> {
    match &args.command {
        Command::Check(check_args) => check_word(check_args.clone(), &args),
        Command::Correct(correct_args) => correct_word(correct_args.clone(), &args),
        Command::Process(process_args) => process_word(process_args.clone(), &args),
        Command::Add(add_args) => add_word(add_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
        Command::Serve(serve_args) => serve(serve_args.clone(), &args),
    }
}

/// Load a lexicon, choosing the format by extension: `.bin` files are
/// binary snapshots, everything else is a `word count` text file.
fn load_lexicon(path: &Path, cli_args: &CorrigoArgs) -> Result<MemoryVocabulary> {
    if cli_args.verbosity() > 1 {
        println!("Loading lexicon from: {}", path.display());
    }

    if path.extension().is_some_and(|ext| ext == "bin") {
        MemoryVocabulary::load_snapshot(path)
    } else {
        MemoryVocabulary::from_frequency_file(path)
    }
}

/// Save a lexicon in the format implied by the path extension.
fn save_lexicon(vocabulary: &MemoryVocabulary, path: &Path, cli_args: &CorrigoArgs) -> Result<()> {
    if path.extension().is_some_and(|ext| ext == "bin") {
        vocabulary.save_snapshot(path)?;
    } else {
        vocabulary.save_frequency_file(path)?;
    }

    if cli_args.verbosity() > 1 {
        println!("Saved lexicon to: {}", path.display());
    }
    Ok(())
}

/// Build a checker over a lexicon file.
fn load_checker(path: &Path, cli_args: &CorrigoArgs) -> Result<SpellChecker> {
    let vocabulary = load_lexicon(path, cli_args)?;
    Ok(SpellChecker::new(Arc::new(vocabulary)))
}

/// Check whether a word is present.
fn check_word(args: CheckArgs, cli_args: &CorrigoArgs) -> Result<()> {
    let checker = load_checker(&args.lexicon, cli_args)?;
    let found = checker.check(&args.word)?;

    output_result(
        "Check completed",
        &CheckResult {
            word: args.word,
            found,
        },
        cli_args,
    )
}

/// Find the best correction for a word.
fn correct_word(args: CorrectArgs, cli_args: &CorrigoArgs) -> Result<()> {
    let checker = load_checker(&args.lexicon, cli_args)?;

    let start_time = Instant::now();
    let correction = checker.correct(&args.word)?;
    let duration = start_time.elapsed();

    output_result(
        "Correction completed",
        &CorrectResult {
            word: args.word,
            correction,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Check a word and correct it if misspelled.
fn process_word(args: ProcessArgs, cli_args: &CorrigoArgs) -> Result<()> {
    let checker = load_checker(&args.lexicon, cli_args)?;

    let (ok, suggestion) = match checker.process(&args.word)? {
        Verdict::Ok => (true, None),
        Verdict::Wrong(suggestion) => (false, suggestion),
    };

    output_result(
        "Process completed",
        &ProcessResult {
            word: args.word,
            ok,
            suggestion,
        },
        cli_args,
    )
}

/// Add a word to the lexicon, or bump its count if already present, then
/// save the lexicon back to disk.
fn add_word(args: AddArgs, cli_args: &CorrigoArgs) -> Result<()> {
    let vocabulary = Arc::new(load_lexicon(&args.lexicon, cli_args)?);
    let checker = SpellChecker::new(vocabulary.clone());

    let existed = checker.check(&args.word)?;
    checker.update(&args.word)?;

    let target = args.output.as_deref().unwrap_or(&args.lexicon);
    save_lexicon(&vocabulary, target, cli_args)?;

    output_result(
        if existed { "Word bumped" } else { "Word added" },
        &AddResult {
            word: args.word.to_lowercase(),
            added: !existed,
            lexicon: target.to_string_lossy().to_string(),
        },
        cli_args,
    )
}

/// Show lexicon statistics.
fn show_stats(args: StatsArgs, cli_args: &CorrigoArgs) -> Result<()> {
    let vocabulary = load_lexicon(&args.lexicon, cli_args)?;

    let stats = LexiconStats {
        words: vocabulary.word_count(),
        total_count: vocabulary.total_count(),
        edges: vocabulary.edge_count(),
        top_words: if args.top > 0 {
            Some(
                vocabulary
                    .top_words(args.top)
                    .into_iter()
                    .map(|(word, count)| TopWord { word, count })
                    .collect(),
            )
        } else {
            None
        },
    };

    output_result("Lexicon statistics", &stats, cli_args)
}

/// Load the lexicon and run the TCP server until interrupted.
fn serve(args: ServeArgs, cli_args: &CorrigoArgs) -> Result<()> {
    let checker = Arc::new(load_checker(&args.lexicon, cli_args)?);

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let server = SpellServer::with_config(checker, &config).await?;
        if cli_args.verbosity() > 0 {
            println!("Serving on {}", server.local_addr()?);
        }
        server.run().await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::VocabularyStore;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_lexicon() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hello 5").unwrap();
        writeln!(file, "help 3").unwrap();
        writeln!(file, "jello 2").unwrap();
        file.flush().unwrap();
        file
    }

    fn quiet_args(subcommand: &[&str]) -> CorrigoArgs {
        let mut argv = vec!["corrigo", "--quiet"];
        argv.extend_from_slice(subcommand);
        CorrigoArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_check_command_execution() {
        let lexicon = sample_lexicon();
        let path = lexicon.path().to_str().unwrap().to_string();

        let args = quiet_args(&["check", &path, "hello"]);
        assert!(execute_command(args).is_ok());
    }

    #[test]
    fn test_correct_command_execution() {
        let lexicon = sample_lexicon();
        let path = lexicon.path().to_str().unwrap().to_string();

        let args = quiet_args(&["correct", &path, "helo"]);
        assert!(execute_command(args).is_ok());
    }

    #[test]
    fn test_add_command_persists_word() {
        let lexicon = sample_lexicon();
        let path = lexicon.path().to_str().unwrap().to_string();

        let args = quiet_args(&["add", &path, "world"]);
        execute_command(args).unwrap();

        let reloaded = MemoryVocabulary::from_frequency_file(lexicon.path()).unwrap();
        assert!(reloaded.has("world").unwrap());
    }

    #[test]
    fn test_missing_lexicon_is_an_error() {
        let args = quiet_args(&["check", "/nonexistent/lexicon.txt", "hello"]);
        assert!(execute_command(args).is_err());
    }
}
