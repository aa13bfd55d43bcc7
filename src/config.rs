use crate::{CrawlerError, WalkOptions};
use chrono_tz::Tz;
use clap::Parser;
use tokio::time::Duration;

/// Prints the job offers of a service.bund.de category.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Config {
    #[arg(long, default_value = "https://www.service.bund.de/")]
    pub base_url: String,

    /// Category ("Tätigkeitsfeld") to search in
    #[arg(long, default_value = "itundtelekommunikation")]
    pub category: String,

    #[arg(long, default_value_t = 100)]
    pub results_per_page: u32,

    /// Time zone of the application deadlines
    #[arg(long, default_value = "Europe/Berlin")]
    pub time_zone: String,

    /// Seconds to wait between two pages
    #[arg(long, default_value_t = 3)]
    pub delay_secs: u64,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    #[arg(long, default_value = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,
}

impl Config {
    pub fn start_url(&self) -> String {
        format!(
            "{}Content/DE/Stellen/Suche/Formular.html?cl2Categories_Taetigkeitsfeld=taetigkeitsfeld-{}&resultsPerPage={}",
            self.base_url, self.category, self.results_per_page
        )
    }

    pub fn tz(&self) -> Result<Tz, CrawlerError> {
        self.time_zone
            .parse()
            .map_err(|_| CrawlerError::InvalidTimeZone(self.time_zone.clone()))
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            delay: Duration::from_secs(self.delay_secs),
            max_pages: self.max_pages,
        }
    }
}
