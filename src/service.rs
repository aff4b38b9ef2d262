use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::cache::EventCache;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::fallback::sample_events;
use crate::pipeline::{ScrapePipeline, ScrapeReport};
use crate::types::Event;

/// Cache-backed access to the current event list.
#[derive(Clone)]
pub struct EventService {
    pipeline: Arc<ScrapePipeline>,
    cache: Arc<dyn EventCache>,
    settings: CacheConfig,
}

impl EventService {
    pub fn new(pipeline: Arc<ScrapePipeline>, cache: Arc<dyn EventCache>, settings: CacheConfig) -> Self {
        Self {
            pipeline,
            cache,
            settings,
        }
    }

    /// Cached events, scraping first when the cache is empty or expired.
    pub async fn get_all(&self) -> Result<Vec<Event>> {
        if let Some(events) = self.cached().await? {
            if !events.is_empty() {
                return Ok(events);
            }
        }
        info!("Event cache is empty, loading latest events");
        Ok(self.load_latest().await?.events)
    }

    /// Scrape now (with fallback) and replace the cached snapshot.
    #[instrument(skip(self))]
    pub async fn load_latest(&self) -> Result<ScrapeReport> {
        let report = self.pipeline.run_with_fallback().await;
        self.set_events(&report.events).await?;
        info!("Cached {} events ({:?})", report.events.len(), report.source);
        Ok(report)
    }

    /// First event carrying `id`.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Event>> {
        let events = self.get_all().await?;
        Ok(events.into_iter().find(|event| event.id == id))
    }

    pub async fn set_events(&self, events: &[Event]) -> Result<()> {
        let json = serde_json::to_string(events)?;
        self.cache
            .set(&self.settings.key, json, self.settings.ttl())
            .await
    }

    /// Stores the sample cards unless the cache already holds events.
    /// Returns whether anything was written.
    pub async fn seed_sample_events(&self) -> Result<bool> {
        if let Some(existing) = self.cached().await? {
            if !existing.is_empty() {
                info!("Cache already holds {} events, not seeding", existing.len());
                return Ok(false);
            }
        }
        let events = sample_events(Utc::now());
        self.set_events(&events).await?;
        info!("Seeded {} sample events", events.len());
        Ok(true)
    }

    async fn cached(&self) -> Result<Option<Vec<Event>>> {
        let Some(json) = self.cache.get(&self.settings.key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(events) => Ok(Some(events)),
            Err(e) => {
                warn!("Discarding unreadable cache entry '{}': {}", self.settings.key, e);
                self.cache.remove(&self.settings.key).await?;
                Ok(None)
            }
        }
    }
}
