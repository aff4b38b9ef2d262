use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use metrics::{counter, histogram};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};
use crate::extract::{FightExtractor, FightMode, ItemOutcome, ListingEntry, ListingExtractor};
use crate::fallback::fallback_events;
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::normalize::SlugGenerator;
use crate::types::{Event, EventSource, Fight};

/// A listing node that produced no event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedNode {
    pub index: usize,
    pub reason: String,
}

/// A detail page that could not be fetched; its event was kept with the
/// fights found on the listing card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailFailure {
    pub event_id: String,
    pub url: String,
    pub error: String,
}

/// Outcome of one scrape run
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub source: EventSource,
    pub events: Vec<Event>,
    /// Event nodes matched on the listing page, before the cap
    pub nodes_found: usize,
    pub skipped: Vec<SkippedNode>,
    pub detail_failures: Vec<DetailFailure>,
    /// Set when the listing itself failed and the fallback set was served
    pub error: Option<String>,
}

impl ScrapeReport {
    fn fallback(nodes_found: usize, skipped: Vec<SkippedNode>, error: Option<String>) -> Self {
        Self {
            source: EventSource::Fallback,
            events: fallback_events(Utc::now()),
            nodes_found,
            skipped,
            detail_failures: Vec::new(),
            error,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == EventSource::Fallback
    }
}

/// Listing page -> detail pages -> events.
pub struct ScrapePipeline {
    fetcher: Arc<dyn DocumentFetcher>,
    config: ScraperConfig,
    listing: ListingExtractor,
    fights: FightExtractor,
    slugs: SlugGenerator,
}

impl ScrapePipeline {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, config: ScraperConfig) -> Self {
        Self {
            fetcher,
            listing: ListingExtractor::new(&config),
            fights: FightExtractor::new(),
            slugs: SlugGenerator::new(&config.series),
            config,
        }
    }

    /// Pipeline over real HTTP.
    pub fn from_config(config: ScraperConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// One scrape. Fails only when the listing page cannot be fetched; an
    /// empty result is replaced by the fallback set.
    #[instrument(skip(self), fields(listing_url = %self.config.listing_url()))]
    pub async fn run(&self) -> Result<ScrapeReport> {
        info!("🚀 Starting scrape");
        counter!("ufc_scrape_runs_total").increment(1);
        let started = Instant::now();

        let listing_url = self.config.listing_url();
        let listing_html = self
            .fetch_bounded(&listing_url, self.config.listing_timeout())
            .await?;
        let page = self.listing.extract(&listing_html, Utc::now());

        let mut entries: Vec<ListingEntry> = Vec::new();
        let mut skipped: Vec<SkippedNode> = Vec::new();
        for item in page.items {
            match item {
                ItemOutcome::Extracted(entry) => entries.push(entry),
                ItemOutcome::Skipped { index, reason } => skipped.push(SkippedNode { index, reason }),
            }
        }
        counter!("ufc_items_skipped_total").increment(skipped.len() as u64);

        let mut events = Vec::with_capacity(entries.len());
        let mut detail_failures = Vec::new();
        for entry in entries {
            let id = self.slugs.event_id(&entry.title);
            let fights = match self
                .fetch_bounded(&entry.detail_url, self.config.detail_timeout())
                .await
            {
                Ok(html) => self.fights_from_detail(&html, &entry),
                Err(e) => {
                    warn!("Detail page for '{}' failed, using listing card: {}", entry.title, e);
                    detail_failures.push(DetailFailure {
                        event_id: id.clone(),
                        url: entry.detail_url.clone(),
                        error: e.to_string(),
                    });
                    self.fights.extract_fragment(&entry.card_html).fights
                }
            };

            debug!("Event '{}' ({}) with {} fights", entry.title, id, fights.len());
            events.push(Event {
                id,
                date: entry.date,
                title: entry.title,
                location: entry.location,
                fights,
            });
        }
        counter!("ufc_detail_failures_total").increment(detail_failures.len() as u64);
        warn_duplicate_ids(&events);

        let report = if events.is_empty() {
            warn!("Scrape produced no events, serving fallback set");
            counter!("ufc_fallback_total").increment(1);
            ScrapeReport::fallback(page.nodes_found, skipped, None)
        } else {
            counter!("ufc_events_scraped_total").increment(events.len() as u64);
            ScrapeReport {
                source: EventSource::Scraped,
                events,
                nodes_found: page.nodes_found,
                skipped,
                detail_failures,
                error: None,
            }
        };

        histogram!("ufc_scrape_duration_seconds").record(started.elapsed().as_secs_f64());
        info!(
            "✅ Scrape finished: {} events ({} skipped, {} detail failures, source {:?})",
            report.events.len(),
            report.skipped.len(),
            report.detail_failures.len(),
            report.source
        );
        Ok(report)
    }

    /// Like [`run`](Self::run), but a listing failure also yields the fallback set.
    pub async fn run_with_fallback(&self) -> ScrapeReport {
        match self.run().await {
            Ok(report) => report,
            Err(e) => {
                error!("Scrape failed, serving fallback set: {}", e);
                counter!("ufc_fallback_total").increment(1);
                ScrapeReport::fallback(0, Vec::new(), Some(e.to_string()))
            }
        }
    }

    fn fights_from_detail(&self, html: &str, entry: &ListingEntry) -> Vec<Fight> {
        let card = self.fights.extract_document(html);
        if card.mode != FightMode::None {
            return card.fights;
        }
        debug!("No fight markup on {}, trying the listing card", entry.detail_url);
        self.fights.extract_fragment(&entry.card_html).fights
    }

    async fn fetch_bounded(&self, url: &str, limit: Duration) -> Result<String> {
        match tokio::time::timeout(limit, self.fetcher.fetch(url)).await {
            Ok(result) => result,
            Err(_) => Err(ScraperError::Timeout {
                url: url.to_string(),
                secs: limit.as_secs(),
            }),
        }
    }
}

fn warn_duplicate_ids(events: &[Event]) {
    let mut seen = HashSet::new();
    for event in events {
        if !seen.insert(event.id.as_str()) {
            warn!("Duplicate event id '{}' ({})", event.id, event.title);
        }
    }
}
