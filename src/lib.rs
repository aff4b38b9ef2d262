pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod fetch;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod server;
pub mod service;
pub mod types;

pub use error::{Result, ScraperError};
pub use pipeline::{ScrapePipeline, ScrapeReport};
pub use service::EventService;
pub use types::{Event, EventSource, Fight, Fighter};
