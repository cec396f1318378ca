//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{CorrigoArgs, OutputFormat};
use crate::error::Result;
use crate::search::Correction;

/// Result structure for a membership check.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResult {
    pub word: String,
    pub found: bool,
}

/// Result structure for a correction request.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectResult {
    pub word: String,
    pub correction: Option<Correction>,
    pub duration_ms: u64,
}

/// Result structure for processing a word.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResult {
    pub word: String,
    pub ok: bool,
    pub suggestion: Option<String>,
}

/// Result structure for adding or bumping a word.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddResult {
    pub word: String,
    pub added: bool,
    pub lexicon: String,
}

/// Lexicon statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct LexiconStats {
    pub words: usize,
    pub total_count: f64,
    pub edges: usize,
    pub top_words: Option<Vec<TopWord>>,
}

/// A word with its raw count.
#[derive(Debug, Serialize, Deserialize)]
pub struct TopWord {
    pub word: String,
    pub count: f64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &CorrigoArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &CorrigoArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("CheckResult") => {
            output_check_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("CorrectResult") => {
            output_correct_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("ProcessResult") => {
            output_process_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("LexiconStats") => {
            output_stats_human(&value, args)
        }
        _ => {
            // Generic output for other types
            output_generic_human(&value, args)
        }
    }
}

/// Output a check result in human format.
fn output_check_human(value: &serde_json::Value, _args: &CorrigoArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        let word = obj.get("word").and_then(|w| w.as_str()).unwrap_or("");
        let found = obj.get("found").and_then(|f| f.as_bool()).unwrap_or(false);
        println!("{}: {}", word, if found { "OK" } else { "ERROR" });
    }
    Ok(())
}

/// Output a correction result in human format.
fn output_correct_human(value: &serde_json::Value, args: &CorrigoArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        let word = obj.get("word").and_then(|w| w.as_str()).unwrap_or("");

        match obj.get("correction").and_then(|c| c.as_object()) {
            Some(correction) => {
                let suggestion = correction.get("word").and_then(|w| w.as_str()).unwrap_or("");
                let distance = correction
                    .get("distance")
                    .and_then(|d| d.as_f64())
                    .unwrap_or(0.0);
                let score = correction
                    .get("score")
                    .and_then(|s| s.as_f64())
                    .unwrap_or(0.0);
                println!("{word} -> {suggestion} (distance {distance:.2}, score {score:.4})");
            }
            None => println!("{word}: no correction found"),
        }

        if args.verbosity() > 1
            && let Some(duration) = obj.get("duration_ms").and_then(|d| d.as_u64())
        {
            println!("Search time: {duration}ms");
        }
    }
    Ok(())
}

/// Output a process result in human format.
fn output_process_human(value: &serde_json::Value, _args: &CorrigoArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        let ok = obj.get("ok").and_then(|o| o.as_bool()).unwrap_or(false);
        if ok {
            println!("OK");
        } else {
            let suggestion = obj.get("suggestion").and_then(|s| s.as_str()).unwrap_or("");
            println!("WRONG {suggestion}");
        }
    }
    Ok(())
}

/// Output lexicon statistics in human format.
fn output_stats_human(value: &serde_json::Value, _args: &CorrigoArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Lexicon Statistics:");
        println!("═══════════════════");

        if let Some(words) = obj.get("words").and_then(|w| w.as_u64()) {
            println!("Words: {words}");
        }

        if let Some(total) = obj.get("total_count").and_then(|t| t.as_f64()) {
            println!("Total count: {total}");
        }

        if let Some(edges) = obj.get("edges").and_then(|e| e.as_u64()) {
            println!("Similarity edges: {edges}");
        }

        if let Some(top_words) = obj.get("top_words").and_then(|t| t.as_array()) {
            println!();
            println!("Most frequent:");
            println!("─────────────");
            for entry in top_words {
                if let Some(entry) = entry.as_object() {
                    let word = entry.get("word").and_then(|w| w.as_str()).unwrap_or("");
                    let count = entry.get("count").and_then(|c| c.as_f64()).unwrap_or(0.0);
                    println!("  {word} ({count})");
                }
            }
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &CorrigoArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &CorrigoArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("test".to_string())),
            "test"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_value(&serde_json::Value::Bool(false)), "false");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
    }

    #[test]
    fn test_output_result_json() {
        let args =
            CorrigoArgs::try_parse_from(["corrigo", "-f", "json", "check", "w.txt", "hello"])
                .unwrap();
        let result = CheckResult {
            word: "hello".to_string(),
            found: true,
        };
        assert!(output_result("Check completed", &result, &args).is_ok());
    }

    #[test]
    fn test_output_result_human() {
        let args = CorrigoArgs::try_parse_from(["corrigo", "process", "w.txt", "helo"]).unwrap();
        let result = ProcessResult {
            word: "helo".to_string(),
            ok: false,
            suggestion: Some("hello".to_string()),
        };
        assert!(output_result("Process completed", &result, &args).is_ok());
    }
}
