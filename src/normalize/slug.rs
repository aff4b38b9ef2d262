use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::constants::MAX_SLUG_LEN;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("slug filter pattern is valid"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("hyphen pattern is valid"));

/// Derives event ids from titles.
#[derive(Debug, Clone)]
pub struct SlugGenerator {
    series: String,
    numbered: Regex,
}

impl SlugGenerator {
    /// `series` is matched case-insensitively as a whole word followed by a number.
    pub fn new(series: &str) -> Self {
        let pattern = format!(r"(?i)\b{}\s+(\d+)", regex::escape(series.trim()));
        let numbered = Regex::new(&pattern).expect("escaped series name always compiles");
        Self {
            series: series.trim().to_lowercase(),
            numbered,
        }
    }

    /// "UFC 310: Pantoja vs Asakura" -> "ufc-310"; other titles become a
    /// slug of at most 50 chars; titles that slug to nothing get a random id.
    pub fn event_id(&self, title: &str) -> String {
        if let Some(number) = self.numbered.captures(title).and_then(|c| c.get(1)) {
            return format!("{}-{}", self.series.replace(char::is_whitespace, "-"), number.as_str());
        }

        let slug = slugify(title);
        if slug.is_empty() {
            return Uuid::new_v4().to_string();
        }
        slug
    }
}

impl Default for SlugGenerator {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_SERIES)
    }
}

/// Lowercase, keep word chars, whitespace and hyphens, hyphenate, cap length.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let filtered = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(filtered.trim(), "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    let trimmed = collapsed.trim_matches('-');

    let truncated: String = trimmed.chars().take(MAX_SLUG_LEN).collect();
    truncated.trim_end_matches('-').to_string()
}
