use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use nq_core::{Article, Error, Result};
use reqwest::Client;
use scraper::Html;
use tracing::debug;
use url::Url;

use super::{utils, Scraper};

pub const REUTERS_SITEMAP: &str =
    "https://www.reuters.com/arc/outboundfeeds/sitemap-index/?outputType=xml";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Discovers articles through a sitemap index and extracts their text from
/// the article pages.
#[derive(Debug, Clone)]
pub struct SitemapScraper {
    client: Client,
    source: String,
    sitemap_url: Url,
}

impl SitemapScraper {
    pub fn new(source: impl Into<String>, sitemap_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("nq/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(source, sitemap_url, client)
    }

    pub fn with_client(source: impl Into<String>, sitemap_url: &str, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            source: source.into(),
            sitemap_url: utils::parse_url(sitemap_url)?,
        })
    }

    pub fn reuters() -> Result<Self> {
        Self::new("reuters", REUTERS_SITEMAP)
    }

    pub fn sitemap_url(&self) -> &Url {
        &self.sitemap_url
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        Ok(self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?)
    }

    /// Extracts an article from a rendered page.
    ///
    /// The title is the first `h1`, the content every paragraph inside
    /// `article`, and the publication date the first `time[datetime]`,
    /// falling back to the current time.
    pub fn parse_article(url: &str, html: &str) -> Result<Article> {
        let document = Html::parse_document(html);

        let title = utils::first_text(&document, "h1")?.unwrap_or_default();
        let content = utils::texts(&document, "article p")?.join(" ");
        if title.is_empty() && content.is_empty() {
            return Err(Error::Scraping(format!("No article text found at {}", url)));
        }

        let time = utils::selector("time[datetime]")?;
        let published_date = document
            .select(&time)
            .next()
            .and_then(|el| el.value().attr("datetime"))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| Utc::now().to_rfc3339());

        Ok(Article {
            title,
            content,
            url: url.to_string(),
            published_date,
        })
    }
}

#[async_trait]
impl Scraper for SitemapScraper {
    fn source(&self) -> &str {
        &self.source
    }

    fn can_handle(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(url) => url.host_str().is_some() && url.host_str() == self.sitemap_url.host_str(),
            Err(_) => false,
        }
    }

    async fn listings(&self) -> Result<Vec<String>> {
        let index = self.fetch(self.sitemap_url.as_str()).await?;
        let sitemaps = utils::sitemap_locations(&index, "sitemap")?;
        debug!("Found {} sitemaps in {}", sitemaps.len(), self.sitemap_url);
        Ok(sitemaps)
    }

    async fn listing_urls(&self, listing: &str) -> Result<Vec<String>> {
        let xml = self.fetch(listing).await?;
        utils::sitemap_locations(&xml, "url")
    }

    async fn scrape_article(&self, url: &str) -> Result<Article> {
        let html = self.fetch(url).await?;
        Self::parse_article(url, &html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_handle() {
        let scraper = SitemapScraper::reuters().unwrap();
        assert!(scraper.can_handle("https://www.reuters.com/world/some-story-2024-05-01/"));
        assert!(!scraper.can_handle("https://www.clarin.com/article"));
        assert!(!scraper.can_handle("not a url"));
    }

    #[test]
    fn test_invalid_sitemap_url() {
        let err = SitemapScraper::new("broken", "sitemap.xml").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_parse_article() {
        let html = r#"
            <html><body>
              <h1> Markets rally on rate cut hopes </h1>
              <time datetime="2024-05-01T10:00:00Z">May 1</time>
              <article>
                <p>Stocks rose on Wednesday.</p>
                <p>  </p>
                <p>Bond yields fell. </p>
              </article>
              <p>Unrelated footer</p>
            </body></html>
        "#;
        let article = SitemapScraper::parse_article("https://example.com/markets", html).unwrap();
        assert_eq!(article.title, "Markets rally on rate cut hopes");
        assert_eq!(article.content, "Stocks rose on Wednesday. Bond yields fell.");
        assert_eq!(article.url, "https://example.com/markets");
        assert_eq!(article.published_date, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_parse_article_without_date() {
        let html = "<h1>Headline</h1><article><p>Body</p></article>";
        let article = SitemapScraper::parse_article("https://example.com/a", html).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&article.published_date).is_ok());
    }

    #[test]
    fn test_parse_empty_page() {
        let err = SitemapScraper::parse_article("https://example.com/a", "<div>nothing</div>").unwrap_err();
        assert!(matches!(err, Error::Scraping(_)));
    }
}
