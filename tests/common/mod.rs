#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ufc_events::config::ScraperConfig;
use ufc_events::error::{Result, ScraperError};
use ufc_events::fetch::DocumentFetcher;
use ufc_events::ScrapePipeline;

pub const ORIGIN: &str = "https://ufc.test";
pub const LISTING_URL: &str = "https://ufc.test/events";

/// Serves canned pages by URL and records every request.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn slow(mut self, url: &str, html: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self.page(url, html)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.pages.get(url).cloned().ok_or_else(|| ScraperError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

pub fn scraper_config() -> ScraperConfig {
    ScraperConfig {
        origin: ORIGIN.to_string(),
        detail_timeout_secs: 1,
        ..ScraperConfig::default()
    }
}

pub fn pipeline(fetcher: Arc<FakeFetcher>) -> ScrapePipeline {
    ScrapePipeline::new(fetcher, scraper_config())
}

fn card(path: &str, title: &str, timestamp: i64) -> String {
    format!(
        r#"<div class="c-card-event--result">
             <h3 class="c-card-event--result__headline"><a href="{path}">{title}</a></h3>
             <div class="c-card-event--result__date" data-main-card-timestamp="{timestamp}">Sat, Dec 7</div>
             <div class="c-card-event--result__location">
               <div class="field--name-taxonomy-term-title"><h5>T-Mobile Arena</h5></div>
               <span class="locality">Las Vegas</span> <span class="country">United States</span>
             </div>
           </div>"#
    )
}

/// Two linked cards and one card without a detail link.
pub fn listing_page() -> String {
    format!(
        "<html><body><div class=\"l-listing\">{}{}{}</div></body></html>",
        card("/event/ufc-310", "UFC 310: Pantoja vs Asakura", 1_733_623_200),
        card("/event/ufc-311", "UFC 311: Makhachev vs Tsarukyan", 1_737_162_000),
        r#"<div class="c-card-event--result"><h3 class="c-card-event--result__headline">UFC 312</h3></div>"#,
    )
}

fn bout(class: &str, red: &str, red_rank: &str, blue: &str, blue_rank: &str) -> String {
    format!(
        r#"<li class="l-listing__item"><div class="c-listing-fight">
             <div class="c-listing-fight__class-text">{class}</div>
             <div class="c-listing-fight__corner-name c-listing-fight__corner-name--red">{red}</div>
             <div class="c-listing-fight__corner-name c-listing-fight__corner-name--blue">{blue}</div>
             <div class="js-listing-fight__corner-rank"><span>{red_rank}</span></div>
             <div class="js-listing-fight__corner-rank"><span>{blue_rank}</span></div>
           </div></li>"#
    )
}

/// Detail page for UFC 310, main event first.
pub fn detail_page_310() -> String {
    format!(
        "<html><body><ul>{}{}{}</ul></body></html>",
        bout("Flyweight Title Bout", "Alexandre Pantoja", "C", "Kai Asakura", ""),
        bout("Welterweight Bout", "Shavkat Rakhmonov", "#3", "Ian Machado Garry", "#7"),
        bout("Heavyweight Bout", "Ciryl Gane", "#2", "Alexander Volkov", "#4"),
    )
}

pub fn empty_listing_page() -> String {
    "<html><body><p>No upcoming events</p></body></html>".to_string()
}

/// One card that names its headliners, without bout markup.
pub fn roster_listing_page() -> String {
    r#"<html><body>
         <div class="c-card-event--result">
           <h3 class="c-card-event--result__headline"><a href="/event/ufc-312">UFC 312: Du Plessis vs Strickland 2</a></h3>
           <div class="c-card-event--result__athletes">
             <div class="athlete">Dricus Du Plessis</div>
             <div class="athlete">Sean Strickland</div>
           </div>
         </div>
       </body></html>"#
        .to_string()
}

/// Detail page whose only fighter-ish classes are site navigation.
pub fn nav_only_detail_page() -> String {
    r#"<html><body>
         <nav>
           <a class="nav-fighters" href="/athletes">Athletes</a>
           <a class="menu-fighter-rankings" href="/rankings">Fighter Rankings</a>
         </nav>
         <p>Fight card to be announced</p>
       </body></html>"#
        .to_string()
}
