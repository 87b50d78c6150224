use crate::model::{ModelKey, Offer, ParserError, ScraperError, SourceQuery};

/// Network layer: performs one outbound GET and returns the response body.
#[async_trait::async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch(&self, query: &SourceQuery) -> Result<String, ScraperError>;
}

/// A single listing site: how to query it and how to read its result pages.
pub trait Site: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fails with `ScraperError::UnsupportedModel` when the site has no mapping for `model`.
    fn build_query(&self, model: &ModelKey) -> Result<SourceQuery, ScraperError>;

    /// Offers in document order. No matches is an empty list, not an error.
    fn parse(&self, html: &str) -> Result<Vec<Offer>, ParserError>;
}
