use crate::model::{ScraperError, SourceQuery};
use crate::scraper::traits::Scraper;

use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const RETRY_DELAY_MS: u64 = 200;

pub struct ScraperImpl {
    client: Client,
    retries: u32,
}

impl ScraperImpl {
    /// `retries` extra attempts are made on transport errors and timeouts only.
    pub fn new(retries: u32) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self { client, retries })
    }

    async fn fetch_once(&self, query: &SourceQuery) -> Result<String, ScraperError> {
        let mut request = self.client.get(&query.url).timeout(query.timeout);
        for (name, value) in &query.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&query.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::InvalidResponse {
                url: query.url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                ScraperError::Timeout { url: query.url.clone() }
            } else {
                ScraperError::BodyRead {
                    url: query.url.clone(),
                    message: e.to_string(),
                }
            }
        })
    }
}

#[async_trait::async_trait]
impl Scraper for ScraperImpl {
    async fn fetch(&self, query: &SourceQuery) -> Result<String, ScraperError> {
        let mut attempt = 0;
        loop {
            debug!("GET {} (attempt {})", query.url, attempt + 1);
            match self.fetch_once(query).await {
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!("Retrying {} after error: {}", query.url, e);
                    sleep(Duration::from_millis(RETRY_DELAY_MS * u64::from(attempt))).await;
                }
                other => return other,
            }
        }
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> ScraperError {
    if e.is_timeout() {
        ScraperError::Timeout { url: url.to_string() }
    } else {
        ScraperError::HttpError {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
