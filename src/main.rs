//! Command-line front end for language detection and translation validation.
//!
//! Usage:
//!   language-validator [--rules rules.json] <command> [args]
//!
//! Commands:
//!   detect <file>                                   Detect the language of a text
//!   score <lang> <file>                             Confidence that a text is in <lang>
//!   validate <lang> <file> [options.json]           Pass/fail language check
//!   assess <source> <target> <original> <translated> Translation quality report
//!   languages                                       List supported language codes
//!
//! Use `-` as a file name to read from stdin. Results are printed as JSON on
//! stdout; logs go to stderr.
//!
//! Optional environment variables:
//! - VALIDATION_MIN_TEXT_LENGTH (defaults to 50)
//! - VALIDATION_CONFIDENCE_THRESHOLD (defaults to 0.5)
//! - VALIDATION_MIN_INDICATORS_PERCENT (reserved, defaults to 0.05)
//! - VALIDATION_MIN_INDICATORS_ABSOLUTE (reserved, defaults to 3)

use anyhow::{bail, Context, Result};
use language_validator::config::{ValidationConfig, ValidationOptions};
use language_validator::i18n::{LanguageRegistry, TranslationValidator};
use serde::Serialize;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct ValidateOutput<'a> {
    language: &'a str,
    valid: bool,
    confidence: f64,
}

fn print_usage() {
    eprintln!("Usage: language-validator [--rules rules.json] <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  detect <file>");
    eprintln!("  score <lang> <file>");
    eprintln!("  validate <lang> <file> [options.json]");
    eprintln!("  assess <source_lang> <target_lang> <original_file> <translated_file>");
    eprintln!("  languages");
    eprintln!();
    eprintln!("Use '-' as a file name to read from stdin.");
}

/// Read a text file, or stdin when the path is "-".
fn read_text(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Fetch the positional argument at `index` or fail with the command's usage.
fn arg<'a>(args: &'a [String], index: usize, usage: &str) -> Result<&'a str> {
    match args.get(index) {
        Some(value) => Ok(value.as_str()),
        None => bail!("Usage: language-validator {}", usage),
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_validator=info".parse()?),
        )
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let registry = LanguageRegistry::new();
    if args.first().map(String::as_str) == Some("--rules") {
        if args.len() < 2 {
            bail!("--rules requires a file path");
        }
        let path = args.remove(1);
        args.remove(0);
        let merged = registry.merge_rules_file(&path)?;
        info!("Merged indicator rules for {} languages from {}", merged, path);
    }

    let Some(command) = args.first().cloned() else {
        print_usage();
        return Ok(());
    };

    let config = ValidationConfig::from_env();
    let validator = TranslationValidator::with_config(Arc::new(registry), config);

    let result = match command.as_str() {
        "detect" => {
            let text = read_text(arg(&args, 1, "detect <file>")?)?;
            match validator.detect(&text) {
                Some(result) => print_json(&result),
                None => bail!("No languages registered"),
            }
        }
        "score" => {
            let language = arg(&args, 1, "score <lang> <file>")?;
            let text = read_text(arg(&args, 2, "score <lang> <file>")?)?;
            print_json(&validator.score(&text, language))
        }
        "validate" => {
            let usage = "validate <lang> <file> [options.json]";
            let language = arg(&args, 1, usage)?;
            let text = read_text(arg(&args, 2, usage)?)?;
            let options = match args.get(3) {
                Some(path) => ValidationOptions::from_file(path)?,
                None => ValidationOptions::default(),
            };

            let valid = validator.validate_with(&text, language, &options);
            let confidence = validator.score(&text, language).confidence;
            print_json(&ValidateOutput {
                language,
                valid,
                confidence,
            })
        }
        "assess" => {
            let usage = "assess <source_lang> <target_lang> <original_file> <translated_file>";
            let source = arg(&args, 1, usage)?;
            let target = arg(&args, 2, usage)?;
            let original = read_text(arg(&args, 3, usage)?)?;
            let translated = read_text(arg(&args, 4, usage)?)?;
            print_json(&validator.assess(&original, &translated, source, target))
        }
        "languages" => print_json(&validator.registry().supported_languages()),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    };

    debug!(
        "Validation metrics: {}",
        serde_json::to_string(&validator.metrics().report())?
    );
    result
}
