//! Versefeed CLI — enriched scripture verses from independent upstream sources.
//!
//! Samples verse identifiers, fans out one fetch per facet (text, audio,
//! translation, transliteration) per verse, and prints the fully-enriched
//! records as JSON.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
