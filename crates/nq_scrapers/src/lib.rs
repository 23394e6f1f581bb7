pub mod logging;
pub mod manager;
pub mod scrapers;

pub use logging::{init_logging, Logger};
pub use manager::{IngestReport, IngestionManager};
pub use scrapers::{Scraper, SitemapScraper};

pub mod prelude {
    pub use super::manager::{IngestReport, IngestionManager};
    pub use super::scrapers::{Scraper, SitemapScraper};
    pub use nq_core::{Article, Error, Result};
}
