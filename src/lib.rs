use std::io::Write;
use tokio::time::Duration;
use tracing::{debug, info};

pub mod bund;
pub mod config;
pub mod http;
pub mod markers;

mod error;

pub use error::{CrawlerError, ExtractionError};

/// Site-specific knowledge: where the results live in a page, how to cut them
/// into fragments, how to read one fragment and where the next page is.
pub trait Crawler {
    type Document;

    fn results<'p>(&self, page: &'p str) -> Result<&'p str, CrawlerError>;
    fn fragments<'p>(&self, results: &'p str) -> markers::Fragments<'p>;
    fn extract(&self, fragment: &str) -> Result<Self::Document, ExtractionError>;
    fn next_page(&self, page: &str) -> Option<String>;
    fn print<W: Write>(&self, out: &mut W, ordinal: u64, doc: &Self::Document)
        -> std::io::Result<()>;
}

/// A fetched page and the cookies it set.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub body: String,
    pub cookies: Vec<String>,
}

#[async_trait::async_trait]
pub trait Fetcher {
    async fn fetch(
        &self,
        url: &str,
        cookies: &[String],
        referer: Option<&str>,
    ) -> Result<Page, CrawlerError>;
}

/// State carried from one page to the next.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub url: String,
    pub cookies: Vec<String>,
    pub referer: Option<String>,
    pub count: u64,
    pub pages: u32,
}

impl PageState {
    pub fn new(url: impl Into<String>) -> Self {
        PageState {
            url: url.into(),
            ..Default::default()
        }
    }

    /// The current URL becomes the referer of `next`.
    pub fn advance(&mut self, next: String) {
        self.referer = Some(std::mem::replace(&mut self.url, next));
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    pub delay: Duration,
    pub max_pages: Option<u32>,
}

/// Walks the result pages starting at `start_url`, printing every record as
/// soon as it is extracted. Returns the number of printed records.
///
/// The first failure ends the walk: records printed before it stay printed,
/// nothing after it is fetched.
pub async fn run_scrapper<C, F, W>(
    crawler: &C,
    fetcher: &F,
    start_url: String,
    options: WalkOptions,
    out: &mut W,
) -> Result<u64, CrawlerError>
where
    C: Crawler,
    F: Fetcher + ?Sized,
    W: Write,
{
    let mut state = PageState::new(start_url);

    loop {
        let page = visit(fetcher, &mut state).await?;
        handle(crawler, &page, &mut state, out)?;

        if options.max_pages.map_or(false, |max| state.pages >= max) {
            info!("Stopping after {} pages", state.pages);
            break;
        }

        let Some(next) = crawler.next_page(&page) else {
            info!("No more pages");
            break;
        };

        debug!("Next page {}", next);
        state.advance(next);

        debug!("Sleep {:?}", options.delay);
        tokio::time::sleep(options.delay).await;
    }

    Ok(state.count)
}

async fn visit<F>(fetcher: &F, state: &mut PageState) -> Result<String, CrawlerError>
where
    F: Fetcher + ?Sized,
{
    info!("Visit {}", state.url);
    let page = fetcher
        .fetch(&state.url, &state.cookies, state.referer.as_deref())
        .await?;

    debug!("Received {} bytes, {} cookies", page.body.len(), page.cookies.len());
    state.cookies = page.cookies;
    state.pages += 1;
    Ok(page.body)
}

fn handle<C, W>(
    crawler: &C,
    page: &str,
    state: &mut PageState,
    out: &mut W,
) -> Result<(), CrawlerError>
where
    C: Crawler,
    W: Write,
{
    let results = crawler.results(page)?;
    debug!("Results region of {} bytes", results.len());

    for fragment in crawler.fragments(results) {
        let doc = crawler.extract(fragment)?;
        state.count += 1;
        crawler.print(out, state.count, &doc)?;
        out.flush()?;
    }

    Ok(())
}
