//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::filters::name::DEFAULT_PATTERNS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Scraper configuration with layered loading.
///
/// Built once and handed to the pipeline; nothing reads process-wide state
/// after loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Collection listing URL, without the `page` parameter
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Site root prepended to relative product hrefs
    #[serde(default = "default_site_root")]
    pub site_root: String,

    /// Where the product collection is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Delay after each product detail request in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Stop after this many listing pages (unbounded when unset)
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Product names must match at least one of these patterns
    #[serde(default = "default_name_patterns")]
    pub name_patterns: Vec<String>,

    /// Output format for console reports
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_listing_url() -> String {
    "https://thescentreserve.com/collections/all-1".to_string()
}

fn default_site_root() -> String {
    "https://thescentreserve.com".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data").join("products.json")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; ScentScraper/1.0)".to_string()
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_name_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            site_root: default_site_root(),
            output_path: default_output_path(),
            user_agent: default_user_agent(),
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            timeout_secs: default_timeout_secs(),
            max_pages: None,
            name_patterns: default_name_patterns(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("scent-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("SCENT_LISTING_URL") {
            self.listing_url = url;
        }

        if let Ok(proxy) = std::env::var("SCENT_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(output) = std::env::var("SCENT_OUTPUT") {
            self.output_path = PathBuf::from(output);
        }

        if let Ok(agent) = std::env::var("SCENT_USER_AGENT") {
            self.user_agent = agent;
        }

        if let Ok(delay) = std::env::var("SCENT_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }
}

/// Output format for console reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: table, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
