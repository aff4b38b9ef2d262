use crate::constants::*;
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_ENV: &str = "UFC_EVENTS_CONFIG";
/// Environment variable overriding `server.port`
pub const PORT_ENV: &str = "UFC_EVENTS_PORT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Everything the scrape pipeline needs to know about the upstream site.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub origin: String,
    pub listing_path: String,
    pub user_agent: String,
    /// Series name recognised by the id generator ("UFC 310" -> "ufc-310")
    pub series: String,
    pub default_title: String,
    pub max_events: usize,
    pub listing_timeout_secs: u64,
    pub detail_timeout_secs: u64,
    pub date_fallback_days: i64,
    pub date_formats: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            series: DEFAULT_SERIES.to_string(),
            default_title: DEFAULT_EVENT_TITLE.to_string(),
            max_events: MAX_LISTING_EVENTS,
            listing_timeout_secs: LISTING_TIMEOUT_SECS,
            detail_timeout_secs: DETAIL_TIMEOUT_SECS,
            date_fallback_days: DATE_FALLBACK_DAYS,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl ScraperConfig {
    pub fn listing_url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), self.listing_path)
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if !(self.origin.starts_with("http://") || self.origin.starts_with("https://")) {
            return Err(ScraperError::Config(format!(
                "scraper.origin must be an http(s) URL, got '{}'",
                self.origin
            )));
        }
        if !self.listing_path.starts_with('/') {
            return Err(ScraperError::Config(format!(
                "scraper.listing_path must start with '/', got '{}'",
                self.listing_path
            )));
        }
        if self.max_events == 0 {
            return Err(ScraperError::Config("scraper.max_events must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub key: String,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key: EVENTS_CACHE_KEY.to_string(),
            ttl_secs: EVENTS_CACHE_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Scrape once before accepting requests
    pub load_on_startup: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            load_on_startup: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.scraper.validate()?;
        Ok(config)
    }

    /// Resolve the config path from the CLI flag, then `UFC_EVENTS_CONFIG`,
    /// then `config.toml`, and apply environment overrides.
    pub fn load_with_env(cli_path: Option<&Path>) -> Result<Self> {
        let path = match cli_path {
            Some(p) => p.to_path_buf(),
            None => std::env::var(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("config.toml")),
        };

        let mut config = Self::load(&path)?;
        if let Ok(port) = std::env::var(PORT_ENV) {
            config.server.port = port
                .trim()
                .parse()
                .map_err(|_| ScraperError::Config(format!("{} must be a port number, got '{}'", PORT_ENV, port)))?;
        }
        Ok(config)
    }
}
