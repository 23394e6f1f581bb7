use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use nq_core::{ArticleIndex, SimilarityResult};
use nq_inference::{Config, EmbeddingGenerator};
use nq_scrapers::scrapers::sitemap::REUTERS_SITEMAP;
use nq_scrapers::{init_logging, IngestReport, IngestionManager, SitemapScraper};
use nq_web::AppState;
use tracing::{info, warn, Level};

mod demo;

#[derive(Parser, Debug)]
#[command(author, version, about = "Index news articles and search them by similarity", long_about = None)]
struct Cli {
    /// Credential for the embedding backend
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    #[arg(long, default_value = "hash-sine", global = true)]
    model: String,
    #[arg(long, default_value = "memory", global = true)]
    index: String,
    /// Seconds allowed for a single embedding call
    #[arg(long, default_value_t = 10, global = true)]
    embedding_timeout: u64,
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct IngestArgs {
    /// Maximum number of articles to scrape
    #[arg(long, default_value_t = 50)]
    limit: usize,
    #[arg(long, default_value = REUTERS_SITEMAP)]
    sitemap_url: String,
    #[arg(long, default_value = "reuters")]
    source: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape the sitemap and index the articles found
    Ingest(IngestArgs),
    /// Serve the search API
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3001)]
        port: u16,
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        /// Ingest before serving
        #[arg(long)]
        ingest: bool,
        #[command(flatten)]
        ingest_args: IngestArgs,
    },
    /// Scrape and index a single article URL
    Url {
        url: String,
        #[command(flatten)]
        ingest_args: IngestArgs,
    },
    /// Ingest, then print the articles closest to TEXT
    Search {
        text: String,
        /// Number of results to print
        #[arg(long, default_value_t = 3)]
        top: usize,
        #[command(flatten)]
        ingest_args: IngestArgs,
    },
    /// Index the built-in sample articles and run the sample queries
    Demo {
        #[arg(long, default_value_t = 2)]
        top: usize,
    },
}

fn ingestion_manager(index: Arc<dyn ArticleIndex>, args: &IngestArgs) -> anyhow::Result<IngestionManager> {
    let mut manager = IngestionManager::new(index);
    manager.add_scraper(Box::new(SitemapScraper::new(args.source.clone(), &args.sitemap_url)?));
    info!("🦗 Scrapers initialized: {}", manager.sources().join(", "));
    Ok(manager)
}

fn print_report(report: &IngestReport) {
    println!("✅ {}", report);
    if report.failed_index > 0 && report.indexed == 0 {
        warn!("Nothing was indexed; is an embedding API key configured?");
    }
}

fn print_results(query: &str, results: &[SimilarityResult]) {
    println!("\nSearching for: \"{}\"", query);
    if results.is_empty() {
        println!("No results.");
        return;
    }
    for (n, result) in results.iter().enumerate() {
        println!("{}. {} ({:.4})", n + 1, result.article.title, result.score);
        println!("   {}", result.article.url);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = Config {
        api_key: cli.api_key.clone(),
        model_name: Some(cli.model.clone()),
        timeout: Duration::from_secs(cli.embedding_timeout),
        ..Config::default()
    };
    let generator = EmbeddingGenerator::from_config(&config)?;
    let index = nq_storage::create_index(&cli.index, generator)?;
    info!("💾 Index initialized (using {})", cli.index);

    match cli.command {
        Commands::Ingest(args) => {
            let manager = ingestion_manager(index, &args)?;
            let report = manager.ingest(args.limit).await;
            print_report(&report);
        }
        Commands::Serve { port, host, ingest, ingest_args } => {
            if ingest {
                let manager = ingestion_manager(index.clone(), &ingest_args)?;
                print_report(&manager.ingest(ingest_args.limit).await);
            }
            nq_web::serve(AppState::new(index), SocketAddr::new(host, port)).await?;
        }
        Commands::Url { url, ingest_args } => {
            let manager = ingestion_manager(index, &ingest_args)?;
            let article = manager.ingest_url(&url).await?;
            println!("✅ Indexed: {} ({})", article.title, article.url);
        }
        Commands::Search { text, top, ingest_args } => {
            let manager = ingestion_manager(index.clone(), &ingest_args)?;
            print_report(&manager.ingest(ingest_args.limit).await);
            let results = index.search(&text, top).await?;
            print_results(&text, &results);
        }
        Commands::Demo { top } => {
            let manager = IngestionManager::new(index.clone());
            let report = manager.ingest_articles(demo::sample_articles()).await;
            print_report(&report);
            for query in demo::SAMPLE_QUERIES {
                let results = index.search(query, top).await?;
                print_results(query, &results);
            }
        }
    }

    Ok(())
}
