use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ron::ser::PrettyConfig;
use std::path::{Path, PathBuf};
use storyloom_story::{Arrange, ArrangeSettings, Document};
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lay out a script or outline document left to right
    Layout {
        /// RON document to arrange
        input: PathBuf,

        /// RON layout settings, defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Where to write the arranged document instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the default layout settings
    Config,
}

fn load_document(path: &Path) -> Result<Document> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    ron::from_str(&source).with_context(|| format!("Failed to parse {}", path.display()))
}

fn to_ron<T: serde::Serialize>(value: &T) -> Result<String> {
    ron::ser::to_string_pretty(value, PrettyConfig::default()).context("Failed to serialize")
}

fn layout(input: &Path, config: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let settings = match config {
        Some(path) => ArrangeSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => ArrangeSettings::default(),
    };
    debug!("Layout settings: {settings:?}");

    let mut document = load_document(input)?;
    let summary = document.arrange(&settings);
    info!(
        "Arranged {} nodes in {} columns with {} crossings",
        summary.nodes, summary.layers, summary.crossings
    );

    let text = to_ron(&document)?;
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{text}"),
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match args.command {
        Command::Layout {
            input,
            config,
            output,
        } => layout(&input, config.as_deref(), output.as_deref()),
        Command::Config => {
            println!("{}", to_ron(&ArrangeSettings::default())?);
            Ok(())
        }
    }
}
