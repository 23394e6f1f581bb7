use std::fmt;
use std::pin::pin;
use std::sync::Arc;

use futures_util::{stream, StreamExt};
use nq_core::{Article, ArticleIndex, Error, Result};

use crate::logging::Logger;
use crate::scrapers::Scraper;

/// Article pages fetched at the same time per listing.
const SCRAPE_CONCURRENCY: usize = 4;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub discovered: usize,
    pub scraped: usize,
    pub indexed: usize,
    pub failed_sources: usize,
    pub failed_listings: usize,
    pub failed_scrape: usize,
    pub failed_index: usize,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} discovered, {} scraped, {} indexed ({} sources failed, {} listings failed, {} scrapes failed, {} indexing failed)",
            self.discovered,
            self.scraped,
            self.indexed,
            self.failed_sources,
            self.failed_listings,
            self.failed_scrape,
            self.failed_index
        )
    }
}

/// Feeds scraped articles into an index.
///
/// A failure on one listing or article is logged and counted, and ingestion
/// carries on with the rest.
pub struct IngestionManager {
    index: Arc<dyn ArticleIndex>,
    scrapers: Vec<Box<dyn Scraper>>,
    logger: Logger,
}

impl IngestionManager {
    pub fn new(index: Arc<dyn ArticleIndex>) -> Self {
        Self {
            index,
            scrapers: Vec::new(),
            logger: Logger::new().with_prefix("[ingest]"),
        }
    }

    pub fn add_scraper(&mut self, scraper: Box<dyn Scraper>) {
        self.scrapers.push(scraper);
    }

    pub fn sources(&self) -> Vec<&str> {
        self.scrapers.iter().map(|s| s.source()).collect()
    }

    pub fn index(&self) -> &Arc<dyn ArticleIndex> {
        &self.index
    }

    /// Walks every source's listings until `limit` articles were scraped,
    /// indexing each one as it arrives.
    pub async fn ingest(&self, limit: usize) -> IngestReport {
        let mut report = IngestReport::default();

        for scraper in &self.scrapers {
            if report.scraped >= limit {
                break;
            }
            let logger = self.logger.clone().with_prefix(format!("[{}]", scraper.source()));

            let listings = match scraper.listings().await {
                Ok(listings) => listings,
                Err(e) => {
                    logger.error(&format!("Error fetching listings: {}", e));
                    report.failed_sources += 1;
                    continue;
                }
            };
            logger.info(&format!("Found {} listings", listings.len()));

            for listing in listings {
                if report.scraped >= limit {
                    break;
                }
                let urls = match scraper.listing_urls(&listing).await {
                    Ok(urls) => urls,
                    Err(e) => {
                        logger.warn(&format!("Error processing listing {}: {}", listing, e));
                        report.failed_listings += 1;
                        continue;
                    }
                };
                report.discovered += urls.len();
                self.scrape_listing(scraper.as_ref(), urls, limit, &logger, &mut report)
                    .await;
            }
        }

        self.logger.info(&format!("News ingestion finished: {}", report));
        report
    }

    async fn scrape_listing(
        &self,
        scraper: &dyn Scraper,
        urls: Vec<String>,
        limit: usize,
        logger: &Logger,
        report: &mut IngestReport,
    ) {
        let mut pages = pin!(stream::iter(urls)
            .map(|url| async move {
                let result = scraper.scrape_article(&url).await;
                (url, result)
            })
            .buffered(SCRAPE_CONCURRENCY));

        while let Some((url, result)) = pages.next().await {
            match result {
                Ok(article) => {
                    report.scraped += 1;
                    self.index_one(article, logger, report).await;
                }
                Err(e) => {
                    logger.warn(&format!("Error scraping article {}: {}", url, e));
                    report.failed_scrape += 1;
                }
            }
            if report.scraped >= limit {
                break;
            }
        }
    }

    /// Scrapes a single URL with the first scraper that handles it and
    /// indexes the result. Errors are returned, not skipped.
    pub async fn ingest_url(&self, url: &str) -> Result<Article> {
        let scraper = self
            .scrapers
            .iter()
            .find(|s| s.can_handle(url))
            .ok_or_else(|| Error::Scraping(format!("No scraper found for URL: {}", url)))?;

        let article = scraper.scrape_article(url).await?;
        self.index.index(article.clone()).await?;
        Ok(article)
    }

    /// Indexes articles that were obtained some other way.
    pub async fn ingest_articles(&self, articles: Vec<Article>) -> IngestReport {
        let mut report = IngestReport {
            discovered: articles.len(),
            scraped: articles.len(),
            ..IngestReport::default()
        };
        for article in articles {
            self.index_one(article, &self.logger, &mut report).await;
        }
        report
    }

    async fn index_one(&self, article: Article, logger: &Logger, report: &mut IngestReport) {
        let title = article.title.clone();
        match self.index.index(article).await {
            Ok(()) => {
                logger.debug(&format!("Indexed article: {}", title));
                report.indexed += 1;
            }
            Err(e) => {
                logger.warn(&format!("Error indexing article {}: {}", title, e));
                report.failed_index += 1;
            }
        }
    }
}
