//! Default upstream values. These only seed `ScraperConfig`; pipeline code reads
//! the config it was built with, never these constants directly.

pub const DEFAULT_ORIGIN: &str = "https://www.ufc.com";
pub const DEFAULT_LISTING_PATH: &str = "/events";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_SERIES: &str = "UFC";
pub const DEFAULT_EVENT_TITLE: &str = "UFC Event";
pub const UNKNOWN_LOCATION: &str = "TBD";
pub const UNKNOWN_FIELD: &str = "TBD";

/// Listing nodes processed per run
pub const MAX_LISTING_EVENTS: usize = 10;
/// Fight nodes read from legacy card markup
pub const MAX_SIMPLE_FIGHTS: usize = 5;
/// Slug length cap for text-derived ids
pub const MAX_SLUG_LEN: usize = 50;

pub const DATE_FALLBACK_DAYS: i64 = 30;
pub const LISTING_TIMEOUT_SECS: u64 = 30;
pub const DETAIL_TIMEOUT_SECS: u64 = 10;

pub const EVENTS_CACHE_KEY: &str = "ufc:events";
pub const EVENTS_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Strict formats tried against free-text dates (chrono syntax).
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];
