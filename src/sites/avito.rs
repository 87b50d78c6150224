// avito.ru search: URL building and listing extraction
use crate::catalog;
use crate::model::{ModelKey, Offer, ParserError, ScraperError, SourceQuery};
use crate::scraper::Site;
use crate::sites::{search_query, selector};
use ::scraper::Html;
use reqwest::Url;
use std::time::Duration;

pub const SITE_NAME: &str = "avito.ru";

pub struct AvitoSite {
    base_url: String,
    timeout: Duration,
}

impl AvitoSite {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout,
        }
    }
}

impl Site for AvitoSite {
    fn name(&self) -> &'static str {
        SITE_NAME
    }

    fn build_query(&self, model: &ModelKey) -> Result<SourceQuery, ScraperError> {
        let term =
            catalog::avito_model(model.as_str()).ok_or_else(|| ScraperError::UnsupportedModel {
                site: SITE_NAME,
                model: model.clone(),
            })?;

        let url = Url::parse_with_params(&self.base_url, &[("q", term)]).map_err(|e| {
            ScraperError::HttpError {
                url: self.base_url.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(search_query(url.into(), self.timeout))
    }

    fn parse(&self, html: &str) -> Result<Vec<Offer>, ParserError> {
        let document = Html::parse_document(html);
        let item_selector = selector("a.item-description-title-link[href]")?;
        let origin = Url::parse(&self.base_url).ok();

        let offers = document
            .select(&item_selector)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(|href| {
                // listing links are site-relative
                let link = origin
                    .as_ref()
                    .and_then(|base| base.join(href).ok())
                    .map(String::from)
                    .unwrap_or_else(|| href.to_string());
                Offer::new(SITE_NAME, link)
            })
            .collect();

        Ok(offers)
    }
}
