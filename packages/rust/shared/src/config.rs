//! Application configuration for Versefeed.
//!
//! User config lives at `~/.versefeed/versefeed.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VersefeedError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "versefeed.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".versefeed";

// ---------------------------------------------------------------------------
// Config structs (matching versefeed.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Request defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Upstream endpoint settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Default edition selectors per facet.
    #[serde(default)]
    pub editions: EditionsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default number of verses to sample per request.
    #[serde(default = "default_count")]
    pub count: u32,

    /// Maximum identifiers accepted in one enrichment call.
    #[serde(default = "default_max_batch")]
    pub max_batch: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            max_batch: default_max_batch(),
        }
    }
}

fn default_count() -> u32 {
    5
}
fn default_max_batch() -> u32 {
    50
}

/// `[upstream]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream verse API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. A fetch exceeding this is treated as
    /// a facet failure, not a fatal error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total count of valid verse identifiers in the reference corpus.
    #[serde(default = "default_universe_size")]
    pub universe_size: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            universe_size: default_universe_size(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.alquran.cloud/v1".into()
}
fn default_timeout_secs() -> u64 {
    5
}
fn default_universe_size() -> u32 {
    6236
}

/// `[editions]` section — default upstream edition selector per facet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditionsConfig {
    /// Primary text edition.
    #[serde(default = "default_text_edition")]
    pub text: String,

    /// Translation edition.
    #[serde(default = "default_translation_edition")]
    pub translation: String,

    /// Transliteration edition.
    #[serde(default = "default_transliteration_edition")]
    pub transliteration: String,

    /// Audio (recitation) edition.
    #[serde(default = "default_audio_edition")]
    pub audio: String,
}

impl Default for EditionsConfig {
    fn default() -> Self {
        Self {
            text: default_text_edition(),
            translation: default_translation_edition(),
            transliteration: default_transliteration_edition(),
            audio: default_audio_edition(),
        }
    }
}

fn default_text_edition() -> String {
    "quran-uthmani".into()
}
fn default_translation_edition() -> String {
    "en.asad".into()
}
fn default_transliteration_edition() -> String {
    "en.transliteration".into()
}
fn default_audio_edition() -> String {
    "ar.alafasy".into()
}

// ---------------------------------------------------------------------------
// Selector validation
// ---------------------------------------------------------------------------

/// Check whether an edition selector is well-formed.
///
/// Selectors are opaque upstream identifiers like `quran-uthmani`, `en.asad`,
/// or `ar.alafasy`: lowercase alphanumerics separated by `.`, `-`, or `_`.
/// Anything else is rejected before it reaches a request URL.
pub fn valid_selector(selector: &str) -> bool {
    let pattern = regex::Regex::new(r"^[a-z0-9]+([._-][a-z0-9]+)*$").expect("static pattern");
    pattern.is_match(selector)
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.versefeed/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| VersefeedError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.versefeed/versefeed.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| VersefeedError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| VersefeedError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| VersefeedError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| VersefeedError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| VersefeedError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
