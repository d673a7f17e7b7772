//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;

use versefeed_core::aggregator::{EnrichedVerse, FacetPlan};
use versefeed_core::orchestrator::Enricher;
use versefeed_shared::{AppConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Versefeed — enriched scripture verses from independent sources.
#[derive(Parser)]
#[command(
    name = "versefeed",
    version,
    about = "Fetch scripture verses enriched with audio, translation, and transliteration.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Enrich randomly sampled verses.
    Random {
        /// Number of verses to sample (defaults to the configured count).
        #[arg(short, long)]
        count: Option<u32>,

        /// Primary text edition.
        #[arg(long)]
        text_edition: Option<String>,

        /// Translation edition.
        #[arg(short, long)]
        translation: Option<String>,

        /// Transliteration edition.
        #[arg(long)]
        transliteration: Option<String>,

        /// Recitation (audio) edition.
        #[arg(short, long)]
        reciter: Option<String>,
    },

    /// Enrich an explicit inclusive range of verse numbers.
    Range {
        /// First verse number of the range.
        from: u32,

        /// Last verse number of the range.
        to: u32,

        /// Primary text edition.
        #[arg(long)]
        text_edition: Option<String>,

        /// Translation edition.
        #[arg(short, long)]
        translation: Option<String>,

        /// Transliteration edition.
        #[arg(long)]
        transliteration: Option<String>,

        /// Recitation (audio) edition.
        #[arg(short, long)]
        reciter: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "versefeed=info",
        1 => "versefeed=debug",
        _ => "versefeed=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Random {
            count,
            text_edition,
            translation,
            transliteration,
            reciter,
        } => {
            cmd_random(
                count,
                text_edition,
                translation,
                transliteration,
                reciter,
            )
            .await
        }
        Command::Range {
            from,
            to,
            text_edition,
            translation,
            transliteration,
            reciter,
        } => {
            cmd_range(
                from,
                to,
                text_edition,
                translation,
                transliteration,
                reciter,
            )
            .await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_random(
    count: Option<u32>,
    text_edition: Option<String>,
    translation: Option<String>,
    transliteration: Option<String>,
    reciter: Option<String>,
) -> Result<()> {
    let config = load_config()?;
    let count = count.unwrap_or(config.defaults.count);
    let plan = build_plan(&config, text_edition, translation, transliteration, reciter);

    info!(count, translation = %plan.translation, reciter = %plan.audio, "enriching random verses");

    let enricher = Enricher::new(config)?;
    let records = enricher.enrich(count, &plan).await?;

    print_records(&records)
}

async fn cmd_range(
    from: u32,
    to: u32,
    text_edition: Option<String>,
    translation: Option<String>,
    transliteration: Option<String>,
    reciter: Option<String>,
) -> Result<()> {
    let config = load_config()?;
    let plan = build_plan(&config, text_edition, translation, transliteration, reciter);

    info!(from, to, "enriching verse range");

    let enricher = Enricher::new(config)?;
    let records = enricher.enrich_range(from, to, &plan).await?;

    print_records(&records)
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Merge configured edition defaults with per-invocation overrides.
fn build_plan(
    config: &AppConfig,
    text_edition: Option<String>,
    translation: Option<String>,
    transliteration: Option<String>,
    reciter: Option<String>,
) -> FacetPlan {
    let mut plan = FacetPlan::from_editions(&config.editions);
    if let Some(text) = text_edition {
        plan.text = text;
    }
    if let Some(translation) = translation {
        plan.translation = translation;
    }
    if let Some(transliteration) = transliteration {
        plan.transliteration = transliteration;
    }
    if let Some(audio) = reciter {
        plan.audio = audio;
    }
    plan
}

/// Serialize the result set to stdout. An empty array is a valid,
/// non-error response when every sampled verse failed enrichment.
fn print_records(records: &[EnrichedVerse]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    info!(records = records.len(), "done");
    Ok(())
}
