// Listing sites the service knows how to query.
pub mod auto_ru;
pub mod avito;

pub use auto_ru::AutoRuSite;
pub use avito::AvitoSite;

use crate::config::{AppConfig, USER_AGENT};
use crate::model::{ParserError, SourceQuery};
use crate::scraper::Site;
use ::scraper::Selector;
use std::sync::Arc;
use std::time::Duration;

/// Sites queried for every request, in configuration order.
pub fn configured_sites(config: &AppConfig) -> Vec<Arc<dyn Site>> {
    vec![
        Arc::new(AutoRuSite::new(&config.auto_ru_url, config.fetch_timeout())),
        Arc::new(AvitoSite::new(&config.avito_url, config.fetch_timeout())),
    ]
}

pub(crate) fn search_query(url: String, timeout: Duration) -> SourceQuery {
    SourceQuery {
        url,
        headers: vec![("User-Agent".to_string(), USER_AGENT.to_string())],
        timeout,
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::HtmlParseError(e.to_string()))
}
