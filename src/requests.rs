use reqwest::{Client, ClientBuilder, Response};

use crate::ratelimit::RateLimiter;

/// The page-fetch capability the scrapers are generic over. Tests swap
/// in canned pages; the binary uses [`RequestClient`].
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch_page(&self, url: &str) -> anyhow::Result<String>;
}

pub struct RequestClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = ClientBuilder::new().build()?;
        let rate_limiter = RateLimiter::new();
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        // Wait (non-blocking) until we're allowed to make a request according
        // to our self-imposed rate-limiting policy.
        self.rate_limiter.wait_until_ready().await;

        let response = self.client.get(url).send().await?;
        Ok(response)
    }
}

impl PageFetcher for RequestClient {
    async fn fetch_page(&self, url: &str) -> anyhow::Result<String> {
        let response = self.fetch_url_response(url).await?;
        // A non-success status poisons the whole batch, same as a
        // transport failure.
        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}
