use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};
use tracing::{debug, info, warn};

use super::cascade::SelectorCascade;
use super::ItemOutcome;
use crate::config::ScraperConfig;
use crate::constants::UNKNOWN_LOCATION;
use crate::normalize::DateNormalizer;

// Current card markup first, then legacy cards, generic rows, bare articles.
const EVENT_NODES: &[&str] = &[
    "div.c-card-event--result",
    "div.event-card",
    ".view-upcoming-events .views-row",
    "article[class*='event']",
];

const TITLE: &[&str] = &[
    ".c-card-event--result__headline",
    "h3",
    "h2",
    "[class*='event-title']",
    "[class*='title']",
];

const TIMESTAMP_ATTRS: &[&str] = &["data-main-card-timestamp", "data-prelims-card-timestamp", "data-timestamp"];

const DATE: &[&str] = &[
    ".c-card-event--result__date",
    "[class*='date']",
    "[datetime]",
    "[class*='time']",
];

const VENUE: &[&str] = &[".field--name-taxonomy-term-title", "[class*='venue-name']"];
const LOCALITY_PARTS: &[&str] = &[".locality", ".administrative-area", ".country"];
const LEGACY_LOCATION: &[&str] = &["[class*='location']", "[class*='venue']", "[class*='city']"];

const DETAIL_LINK: &[&str] = &[
    ".c-card-event--result__headline a",
    "a[href*='/event/']",
    "a[class*='detail']",
    "a[href*='/events/']",
];

/// Header fields of one listing card.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    /// Position among the processed listing nodes
    pub index: usize,
    pub title: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub detail_url: String,
    /// Outer HTML of the card, kept for extracting fights when the detail
    /// page cannot be fetched
    pub card_html: String,
}

#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Nodes matched by the event-node cascade, before the `max_events` cap
    pub nodes_found: usize,
    pub items: Vec<ItemOutcome<ListingEntry>>,
}

impl ListingPage {
    pub fn entries(&self) -> impl Iterator<Item = &ListingEntry> {
        self.items.iter().filter_map(|item| match item {
            ItemOutcome::Extracted(entry) => Some(entry),
            ItemOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped(&self) -> usize {
        self.items.iter().filter(|item| !item.is_extracted()).count()
    }
}

/// Reads event cards off the events listing page.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    origin: String,
    max_events: usize,
    default_title: String,
    dates: DateNormalizer,
}

impl ListingExtractor {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            origin: config.origin.trim_end_matches('/').to_string(),
            max_events: config.max_events,
            default_title: config.default_title.clone(),
            dates: DateNormalizer::from_config(config),
        }
    }

    pub fn extract(&self, html: &str, now: DateTime<Utc>) -> ListingPage {
        let document = Html::parse_document(html);
        let nodes = SelectorCascade::new(EVENT_NODES).select(document.root_element());

        if nodes.is_empty() {
            warn!("No event nodes matched on the listing page");
            return ListingPage::default();
        }
        info!("Found {} event nodes on the listing page", nodes.len());

        let fields = CardFields::new();
        let items = nodes
            .iter()
            .take(self.max_events)
            .enumerate()
            .map(|(index, node)| match self.extract_card(&fields, *node, index, now) {
                Ok(entry) => ItemOutcome::Extracted(entry),
                Err(reason) => {
                    let snippet: String = node.html().chars().take(200).collect();
                    warn!("Skipping listing node {}: {} ({})", index, reason, snippet);
                    ItemOutcome::Skipped { index, reason }
                }
            })
            .collect();

        ListingPage {
            nodes_found: nodes.len(),
            items,
        }
    }

    fn extract_card(
        &self,
        fields: &CardFields,
        node: ElementRef,
        index: usize,
        now: DateTime<Utc>,
    ) -> std::result::Result<ListingEntry, String> {
        let href = fields
            .detail_link
            .attr(node, "href")
            .ok_or_else(|| "no detail link".to_string())?;
        let detail_url = resolve_url(&self.origin, &href)
            .ok_or_else(|| format!("unresolvable detail link '{}'", href))?;

        let title = fields.title.text(node).unwrap_or_else(|| self.default_title.clone());

        let timestamp = fields
            .timestamps
            .iter()
            .find_map(|(cascade, attr)| cascade.attr(node, attr))
            .and_then(|raw| raw.parse::<i64>().ok());
        let date_text = fields
            .date
            .text(node)
            .or_else(|| fields.date.attr(node, "datetime"))
            .unwrap_or_default();
        let date = self.dates.normalize(&date_text, timestamp, now);

        let location = fields.location(node);

        debug!("Listing node {}: '{}' -> {}", index, title, detail_url);
        Ok(ListingEntry {
            index,
            title,
            date,
            location,
            detail_url,
            card_html: node.html(),
        })
    }
}

/// Compiled cascades for one listing pass.
struct CardFields {
    title: SelectorCascade,
    timestamps: Vec<(SelectorCascade, &'static str)>,
    date: SelectorCascade,
    venue: SelectorCascade,
    locality: Vec<SelectorCascade>,
    legacy_location: SelectorCascade,
    detail_link: SelectorCascade,
}

impl CardFields {
    fn new() -> Self {
        Self {
            title: SelectorCascade::new(TITLE),
            timestamps: TIMESTAMP_ATTRS
                .iter()
                .map(|attr| (SelectorCascade::new(&[format!("[{}]", attr)]), *attr))
                .collect(),
            date: SelectorCascade::new(DATE),
            venue: SelectorCascade::new(VENUE),
            locality: LOCALITY_PARTS.iter().map(|part| SelectorCascade::new(&[*part])).collect(),
            legacy_location: SelectorCascade::new(LEGACY_LOCATION),
            detail_link: SelectorCascade::new(DETAIL_LINK),
        }
    }

    /// "Venue - City Area Country", whichever parts exist.
    fn location(&self, node: ElementRef) -> String {
        let venue = self.venue.text(node);
        let locality: Vec<String> = self.locality.iter().filter_map(|part| part.text(node)).collect();

        let mut blocks = Vec::new();
        if let Some(venue) = venue {
            blocks.push(venue);
        }
        if !locality.is_empty() {
            blocks.push(locality.join(" "));
        }
        if !blocks.is_empty() {
            return blocks.join(" - ");
        }

        self.legacy_location
            .text(node)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
    }
}

/// Absolute http(s) links pass through; root-relative paths join the origin.
pub fn resolve_url(origin: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    if let Some(rest) = href.strip_prefix("//") {
        let scheme = origin.split("://").next().unwrap_or("https");
        return Some(format!("{}://{}", scheme, rest));
    }
    if href.starts_with('/') {
        return Some(format!("{}{}", origin.trim_end_matches('/'), href));
    }
    None
}
