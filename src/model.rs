// Core structs: ModelKey, Offer, SourceQuery, OfferEvent and the error types
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Canonical model identifier shared by every site, e.g. `VFR800`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModelKey(String);

impl ModelKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub link: String,
    pub site: &'static str,
}

impl Offer {
    pub fn new(site: &'static str, link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            site,
        }
    }
}

/// Fully formed outbound request for one site. Built fresh for every request.
#[derive(Debug, Clone)]
pub struct SourceQuery {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

/// One value on a source's output stream.
#[derive(Debug)]
pub enum OfferEvent {
    Offer(Offer),
    Failed(SourceError),
}

#[derive(Debug, Default)]
pub struct AggregationResult {
    pub offers: Vec<Offer>,
    pub error: Option<SourceError>,
}

impl AggregationResult {
    /// Errors suppress offers: a failed aggregation reports only its first error.
    pub fn into_result(self) -> Result<Vec<Offer>, SourceError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.offers),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    #[error("Undefined model")]
    UndefinedModel { query: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScraperError {
    #[error("{site}: undefined model {model}")]
    UnsupportedModel { site: &'static str, model: ModelKey },
    #[error("request: {url}, error: {message}")]
    HttpError { url: String, message: String },
    #[error("request: {url}, timed out")]
    Timeout { url: String },
    #[error("request: {url}, status: {status}")]
    InvalidResponse { url: String, status: u16 },
    #[error("request: {url}, body read failed: {message}")]
    BodyRead { url: String, message: String },
}

impl ScraperError {
    /// Transport level failures that may succeed on another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::HttpError { .. } | Self::Timeout { .. })
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParserError {
    #[error("html parse error: {0}")]
    HtmlParseError(String),
}

/// Terminal error of a single source.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] ScraperError),
    #[error(transparent)]
    Parse(#[from] ParserError),
}
