//! Shirabe CLI
//!
//! Parses release filenames given as arguments (or read line-by-line from
//! stdin) and prints one JSON record per input line.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use tracing::debug;

use shirabe_core::parser::{ParseMode, Parser, ParserConfig};
use shirabe_core::ModelWeights;

/// CLI arguments
#[derive(ClapParser)]
#[command(name = "shirabe")]
#[command(about = "Parse media release filenames into structured JSON")]
#[command(version)]
struct Cli {
    /// Filenames to parse; read from stdin when omitted
    inputs: Vec<String>,

    /// Parsing backend: full (CRF), light (regex), or auto
    #[arg(short, long, value_enum, default_value = "auto")]
    mode: ModeArg,

    /// Weight artifact to load instead of the built-in reference weights
    #[arg(short = 'w', long, env = "SHIRABE_WEIGHTS")]
    weights: Option<PathBuf>,

    /// In auto mode, fall back to the regex engine below this confidence
    #[arg(short = 't', long, default_value_t = 0.3)]
    threshold: f32,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Full,
    Light,
    Auto,
}

impl From<ModeArg> for ParseMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Full => ParseMode::Full,
            ModeArg::Light => ParseMode::Light,
            ModeArg::Auto => ParseMode::Auto,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ParserConfig::new()
        .with_mode(cli.mode.into())
        .with_confidence_threshold(cli.threshold);

    let parser = match &cli.weights {
        Some(path) => {
            debug!(path = %path.display(), "using weight artifact");
            let weights = ModelWeights::from_path(path)
                .with_context(|| format!("loading weights from {}", path.display()))?;
            Parser::with_weights(config, weights)?
        }
        None => Parser::new(config)?,
    };

    if cli.inputs.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("reading stdin")?;
            emit(&parser, &line, cli.pretty)?;
        }
    } else {
        for input in &cli.inputs {
            emit(&parser, input, cli.pretty)?;
        }
    }
    Ok(())
}

fn emit(parser: &Parser, input: &str, pretty: bool) -> Result<()> {
    let record = parser
        .parse(input)
        .with_context(|| format!("parsing {input:?}"))?;
    let json = if pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{json}");
    Ok(())
}
