use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use weft_compiler::mir::NormalizedTemplate;
use weft_compiler::normalize::keywords::{APPEND_KEYWORDS, BLOCK_KEYWORDS, CALL_KEYWORDS};
use weft_compiler::{normalize, NormalizeOptions};
use weft_syntax::ast::Template;

#[derive(Parser)]
#[command(name = "weft", about = "Template normalizer for the weft language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a JSON-serialized template AST to JSON MIR.
    Normalize {
        /// Path to a JSON template AST file.
        file: PathBuf,
        /// Disallow dynamic features ({{partial}}, implicit globals).
        #[arg(long)]
        strict: bool,
    },
    /// Print a JSON-serialized MIR file in human-readable form.
    PrintMir {
        /// Path to a JSON MIR file.
        file: PathBuf,
    },
    /// List the recognized keywords per syntactic position.
    Keywords,
}

fn load_template(path: &Path) -> Result<Template> {
    let file =
        File::open(path).with_context(|| format!("failed to open AST file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse AST file: {}", path.display()))
}

fn normalize_file(path: &Path, strict: bool) -> Result<NormalizedTemplate> {
    let template = load_template(path)?;
    let options = NormalizeOptions {
        strict_mode: strict,
    };
    match normalize(&template, options) {
        Ok(normalized) => Ok(normalized),
        Err(err) => bail!("{}: {err}", path.display()),
    }
}

fn cmd_normalize(file: &Path, strict: bool) -> Result<()> {
    let normalized = normalize_file(file, strict)?;
    let json = serde_json::to_string_pretty(&normalized)?;
    println!("{json}");
    Ok(())
}

fn cmd_print_mir(file: &Path) -> Result<()> {
    let f =
        File::open(file).with_context(|| format!("failed to open MIR file: {}", file.display()))?;
    let reader = BufReader::new(f);
    let normalized: NormalizedTemplate = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse MIR file: {}", file.display()))?;
    println!("{normalized}");
    Ok(())
}

fn cmd_keywords() -> Result<()> {
    for (position, names) in [
        (
            APPEND_KEYWORDS.position(),
            APPEND_KEYWORDS.names().collect::<Vec<_>>(),
        ),
        (
            BLOCK_KEYWORDS.position(),
            BLOCK_KEYWORDS.names().collect::<Vec<_>>(),
        ),
        (
            CALL_KEYWORDS.position(),
            CALL_KEYWORDS.names().collect::<Vec<_>>(),
        ),
    ] {
        println!("{position}: {}", names.join(", "));
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Normalize { file, strict } => cmd_normalize(file, *strict),
        Command::PrintMir { file } => cmd_print_mir(file),
        Command::Keywords => cmd_keywords(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("weft-cli-test-{name}-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    const YIELD_TEMPLATE: &str = r#"{
        "body": [
            {"Append": {
                "callee": {"Path": {"head": {"Free": {"name": "yield"}}, "tail": [], "span": {"start": 2, "end": 7}}},
                "args": {
                    "positional": {"exprs": [], "span": {"start": 7, "end": 7}},
                    "named": {"entries": [], "span": {"start": 7, "end": 7}},
                    "span": {"start": 7, "end": 7}
                },
                "trusting": false,
                "span": {"start": 0, "end": 9}
            }}
        ],
        "span": {"start": 0, "end": 9}
    }"#;

    #[test]
    fn test_normalize_file_end_to_end() {
        let path = fixture("yield", YIELD_TEMPLATE);
        let normalized = normalize_file(&path, false).unwrap();
        assert_eq!(normalized.body.len(), 1);
        assert_eq!(normalized.scope.blocks().count(), 1);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_normalize_file_reports_missing_file() {
        let err = normalize_file(Path::new("/nonexistent/ast.json"), false)
            .err()
            .unwrap();
        assert!(err.to_string().contains("failed to open AST file"));
    }
}
