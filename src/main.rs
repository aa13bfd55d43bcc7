use clap::Parser;
use service_bund_crawler::bund::BundCrawler;
use service_bund_crawler::config::Config;
use service_bund_crawler::http::HttpFetcher;
use service_bund_crawler::{run_scrapper, CrawlerError};
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

async fn run(config: Config) -> Result<u64, CrawlerError> {
    let crawler = BundCrawler::new(config.base_url.as_str(), config.tz()?);
    let fetcher = HttpFetcher::new(&config.user_agent)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_scrapper(
        &crawler,
        &fetcher,
        config.start_url(),
        config.walk_options(),
        &mut out,
    )
    .await
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL")
                .unwrap_or_else(|_| "info,hyper=warn,reqwest=info".into()),
        )
        .with(ErrorLayer::default())
        .init();

    let config = Config::parse();

    match run(config).await {
        Ok(count) => info!("Done, {} job offers", count),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
