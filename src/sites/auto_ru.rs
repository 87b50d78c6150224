// auto.ru catalogue: URL building and listing extraction
use crate::catalog;
use crate::model::{ModelKey, Offer, ParserError, ScraperError, SourceError, SourceQuery};
use crate::scraper::{Scraper, Site};
use crate::sites::{search_query, selector};
use ::scraper::Html;
use std::time::Duration;
use tracing::info;

pub const SITE_NAME: &str = "auto.ru";

/// Catalogue entries that look like vendors but are not.
const NOT_VENDORS: &[&str] = &["sale"];

pub struct AutoRuSite {
    base_url: String,
    timeout: Duration,
}

impl AutoRuSite {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url, timeout }
    }

    pub fn vendors_query(&self) -> SourceQuery {
        search_query(self.base_url.clone(), self.timeout)
    }

    /// Vendor slugs from `motorcycle/used/<vendor>/` links, first-seen order, no duplicates.
    pub fn parse_vendors(&self, html: &str) -> Result<Vec<String>, ParserError> {
        let document = Html::parse_document(html);
        let link_selector = selector("a[href]")?;

        let mut vendors: Vec<String> = Vec::new();
        for element in document.select(&link_selector) {
            let Some(slug) = element.value().attr("href").and_then(vendor_slug) else {
                continue;
            };
            if NOT_VENDORS.contains(&slug) || vendors.iter().any(|v| v == slug) {
                continue;
            }
            vendors.push(slug.to_string());
        }

        Ok(vendors)
    }
}

fn vendor_slug(href: &str) -> Option<&str> {
    let (_, rest) = href.split_once("motorcycle/used/")?;
    let (slug, _) = rest.split_once('/')?;
    let is_word = !slug.is_empty() && slug.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_word.then_some(slug)
}

impl Site for AutoRuSite {
    fn name(&self) -> &'static str {
        SITE_NAME
    }

    fn build_query(&self, model: &ModelKey) -> Result<SourceQuery, ScraperError> {
        let (path, id) =
            catalog::auto_ru_model(model.as_str()).ok_or_else(|| ScraperError::UnsupportedModel {
                site: SITE_NAME,
                model: model.clone(),
            })?;

        let url = format!("{}{}?m[]={}", self.base_url, path, id);
        Ok(search_query(url, self.timeout))
    }

    fn parse(&self, html: &str) -> Result<Vec<Offer>, ParserError> {
        let document = Html::parse_document(html);
        let offer_selector = selector("a.offer-list[href]")?;

        let offers = document
            .select(&offer_selector)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(|href| Offer::new(SITE_NAME, href))
            .collect();

        Ok(offers)
    }
}

/// Lists motorcycle vendors from the catalogue root page.
pub async fn list_vendors(
    site: &AutoRuSite,
    scraper: &dyn Scraper,
) -> Result<Vec<String>, SourceError> {
    let html = scraper.fetch(&site.vendors_query()).await?;
    let vendors = site.parse_vendors(&html)?;
    info!("{} vendors listed on {}", vendors.len(), SITE_NAME);
    Ok(vendors)
}
