use crate::{CrawlerError, Fetcher, Page};
use reqwest::{
    header::{COOKIE, REFERER, SET_COOKIE},
    Client, RequestBuilder,
};

/// Plain sequential GETs. Cookies are handled by hand: only the pairs set by
/// the last response are sent with the next request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<HttpFetcher, CrawlerError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(HttpFetcher { client })
    }

    fn request(&self, url: &str, cookies: &[String], referer: Option<&str>) -> RequestBuilder {
        let mut request = self.client.get(url);
        if !cookies.is_empty() {
            request = request.header(COOKIE, cookies.join("; "));
        }
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }
        request
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        cookies: &[String],
        referer: Option<&str>,
    ) -> Result<Page, CrawlerError> {
        let response = self.request(url, cookies, referer).send().await?;

        let cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(cookie_pair)
            .collect();

        let body = response.text().await?;
        Ok(Page { body, cookies })
    }
}

/// `name=value` part of a `Set-Cookie` header value.
fn cookie_pair(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?.trim();
    match pair.split_once('=') {
        Some((name, _)) if !name.trim().is_empty() => Some(pair.to_string()),
        _ => None,
    }
}
