use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::ScraperConfig;

static DATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{4})|(\w+)\s+(\d{1,2}),?\s+(\d{4})")
        .expect("date token pattern is valid")
});

/// Date-time layouts accepted by the lenient first pass, on top of RFC 3339/2822.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// How a date was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    Timestamp,
    Parsed,
    Extracted,
    Default,
}

/// Turns listing-page date fragments into an absolute instant.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    formats: Vec<String>,
    fallback_days: i64,
}

impl DateNormalizer {
    pub fn new(formats: Vec<String>, fallback_days: i64) -> Self {
        Self { formats, fallback_days }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(config.date_formats.clone(), config.date_fallback_days)
    }

    /// The "date unknown" placeholder relative to `now`.
    pub fn placeholder(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(self.fallback_days)
    }

    pub fn normalize(&self, text: &str, timestamp: Option<i64>, now: DateTime<Utc>) -> DateTime<Utc> {
        self.resolve(text, timestamp, now).0
    }

    /// Timestamp, then a lenient parse of the whole text, then a strict parse of
    /// an extracted date token, then the placeholder. Never fails.
    pub fn resolve(&self, text: &str, timestamp: Option<i64>, now: DateTime<Utc>) -> (DateTime<Utc>, DateSource) {
        if let Some(date) = timestamp.and_then(|secs| Utc.timestamp_opt(secs, 0).single()) {
            return (date, DateSource::Timestamp);
        }

        let text = text.trim();
        if text.is_empty() {
            return (self.placeholder(now), DateSource::Default);
        }

        if let Some(date) = self.parse_lenient(text) {
            return (date, DateSource::Parsed);
        }

        if let Some(date) = self.parse_token(text) {
            return (date, DateSource::Extracted);
        }

        debug!("Unparseable date text '{}', using placeholder", text);
        (self.placeholder(now), DateSource::Default)
    }

    fn parse_lenient(&self, text: &str) -> Option<DateTime<Utc>> {
        if let Ok(date) = DateTime::parse_from_rfc3339(text) {
            return Some(date.with_timezone(&Utc));
        }
        if let Ok(date) = DateTime::parse_from_rfc2822(text) {
            return Some(date.with_timezone(&Utc));
        }
        for format in DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        self.parse_strict(text)
    }

    fn parse_token(&self, text: &str) -> Option<DateTime<Utc>> {
        let captures = DATE_TOKEN.captures(text)?;
        let token = captures.get(0)?.as_str();
        // "12-14-2024" and "12.14.2024" share the slash formats
        let token = if captures.get(1).is_some() {
            token.replace(['-', '.'], "/")
        } else {
            token.to_string()
        };
        self.parse_strict(&token)
    }

    fn parse_strict(&self, text: &str) -> Option<DateTime<Utc>> {
        self.formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::from_config(&ScraperConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, 12, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_timestamp_wins_over_text() {
        let normalizer = DateNormalizer::default();
        let (date, source) = normalizer.resolve("December 14, 2024", Some(1_733_616_000), now());
        assert_eq!(source, DateSource::Timestamp);
        assert_eq!(date, day(2024, 12, 8));
    }

    #[test]
    fn test_rfc3339_text() {
        let normalizer = DateNormalizer::default();
        let (date, source) = normalizer.resolve("2024-12-14T22:00:00-05:00", None, now());
        assert_eq!(source, DateSource::Parsed);
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 12, 15, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_whole_text_formats() {
        let normalizer = DateNormalizer::default();
        assert_eq!(normalizer.normalize("2025-01-18", None, now()), day(2025, 1, 18));
        assert_eq!(normalizer.normalize("Jan 18, 2025", None, now()), day(2025, 1, 18));
        assert_eq!(normalizer.normalize("18 January 2025", None, now()), day(2025, 1, 18));
    }

    #[test]
    fn test_extracts_token_from_noisy_text() {
        let normalizer = DateNormalizer::default();
        let (date, source) = normalizer.resolve("Saturday, December 14, 2024 / 10:00 PM EST", None, now());
        assert_eq!(source, DateSource::Extracted);
        assert_eq!(date, day(2024, 12, 14));

        assert_eq!(normalizer.normalize("Main card 12-14-2024 on ESPN+", None, now()), day(2024, 12, 14));
        assert_eq!(normalizer.normalize("Card: 25.01.2025", None, now()), day(2025, 1, 25));
    }

    #[test]
    fn test_unparseable_text_defaults_to_thirty_days_out() {
        let normalizer = DateNormalizer::default();
        let (date, source) = normalizer.resolve("Sat, Dec 14 / 10:00 PM EST", None, now());
        assert_eq!(source, DateSource::Default);
        assert_eq!(date, now() + Duration::days(30));
    }

    #[test]
    fn test_empty_text_defaults() {
        let normalizer = DateNormalizer::default();
        assert_eq!(normalizer.normalize("   ", None, now()), now() + Duration::days(30));
    }

    #[test]
    fn test_out_of_range_timestamp_falls_through_to_text() {
        let normalizer = DateNormalizer::default();
        let date = normalizer.normalize("2025-01-18", Some(i64::MAX), now());
        assert_eq!(date, day(2025, 1, 18));
    }
}
