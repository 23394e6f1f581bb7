use async_trait::async_trait;
use nq_core::{Article, Result};

pub mod sitemap;

pub use sitemap::SitemapScraper;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Short name of the news source, used in logs and reports.
    fn source(&self) -> &str;

    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Locations of the source's article listings (child sitemaps for a
    /// sitemap index), in the order the source publishes them.
    async fn listings(&self) -> Result<Vec<String>>;

    /// Article URLs found in one listing.
    async fn listing_urls(&self, listing: &str) -> Result<Vec<String>>;

    async fn scrape_article(&self, url: &str) -> Result<Article>;
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use nq_core::{Error, Result};
    use scraper::{Html, Selector};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| Error::Scraping(format!("Invalid selector: {}", e)))
    }

    /// Trimmed text of the first element matching `selector`, if any.
    pub fn first_text(document: &Html, selector: &str) -> Result<Option<String>> {
        let selector = self::selector(selector)?;
        Ok(document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string()))
    }

    /// Trimmed, non-empty texts of every element matching `selector`.
    pub fn texts(document: &Html, selector: &str) -> Result<Vec<String>> {
        let selector = self::selector(selector)?;
        Ok(document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect())
    }

    /// `<loc>` values directly under each `<parent>` entry of a sitemap
    /// document (`sitemap` for an index, `url` for a url set).
    pub fn sitemap_locations(xml: &str, parent: &str) -> Result<Vec<String>> {
        let document = Html::parse_document(xml);
        texts(&document, &format!("{} > loc", parent))
    }
}
