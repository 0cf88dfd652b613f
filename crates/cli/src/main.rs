//! Command-line entry point: reads a character build as JSON and prints the
//! calculated sheet.
//!
//! ```text
//! dc20 [BUILD.json]      # reads stdin when no path (or `-`) is given
//! ```
use std::io::{self, Read};
use std::{env, fs};

use anyhow::{Context, Result};
use dc20_core::CharacterBuildInput;
use dc20_runtime::{CharacterEngine, RuntimeConfig};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let source = env::args().nth(1);
    let raw = read_input(source.as_deref())?;
    let input: CharacterBuildInput =
        serde_json::from_str(&raw).context("Failed to parse character build JSON")?;

    let config = RuntimeConfig::from_env();
    let engine = CharacterEngine::from_config(&config)?;
    let output = engine.calculate(&input)?;

    if !output.result.is_valid() {
        tracing::info!(
            errors = output.result.validation.errors.len(),
            "build has validation errors"
        );
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Logs go to stderr so stdout stays valid JSON.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(source: Option<&str>) -> Result<String> {
    match source {
        None | Some("-") => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read build from stdin")?;
            Ok(raw)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read file {path}")),
    }
}
