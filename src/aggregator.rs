// Fan-out over all sources, fan-in of their offers with first-error-wins semantics.
use crate::model::{AggregationResult, ModelKey, OfferEvent};
use crate::scraper::SourceAdapter;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

/// Queries every source concurrently and merges offers in arrival order.
///
/// Offers from one source keep their relative order; no order holds across
/// sources. The first failure is kept as the terminal error and later ones are
/// dropped. Every source is drained until its task has finished, so a slow
/// source delays the result until its own fetch timeout fires.
pub async fn aggregate(model: &ModelKey, sources: &[SourceAdapter]) -> AggregationResult {
    let mut result = AggregationResult::default();
    let mut active = FuturesUnordered::new();

    for source in sources {
        active.push(next_event(source.name(), source.fetch_offers(model.clone())));
    }

    while let Some((site, event, rx)) = active.next().await {
        match event {
            Some(OfferEvent::Offer(offer)) => {
                debug!("{}: {}", offer.site, offer.link);
                result.offers.push(offer);
                active.push(next_event(site, rx));
            }
            Some(OfferEvent::Failed(e)) => {
                if result.error.is_none() {
                    result.error = Some(e);
                } else {
                    warn!("{}: ignoring error after first failure: {}", site, e);
                }
            }
            None => debug!("{}: finished", site),
        }
    }

    info!(
        "Aggregated {} offers for {} from {} sources (failed: {})",
        result.offers.len(),
        model,
        sources.len(),
        result.error.is_some()
    );
    result
}

async fn next_event(
    site: &'static str,
    mut rx: Receiver<OfferEvent>,
) -> (&'static str, Option<OfferEvent>, Receiver<OfferEvent>) {
    let event = rx.recv().await;
    (site, event, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScraperError, SourceError};
    use crate::scraper::adapter::testing::{FakeScraper, LineSite, Reply};
    use rand::Rng;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn body(links: &[String]) -> Reply {
        Reply::Body(links.join("\n"))
    }

    #[tokio::test]
    async fn one_failure_is_terminal_and_every_task_completes() {
        let good = LineSite("good");
        let bad = LineSite("bad");
        let scraper = Arc::new(
            FakeScraper::default()
                .reply(&good.url("VFR800"), Reply::Body("http://g/1\nhttp://g/2".into()))
                .delay(&good.url("VFR800"), Duration::from_millis(50))
                .reply(&bad.url("VFR800"), Reply::Status(500)),
        );
        let bad_url = bad.url("VFR800");
        let sources = vec![
            SourceAdapter::new(Arc::new(good), scraper.clone()),
            SourceAdapter::new(Arc::new(bad), scraper.clone()),
        ];

        let result = aggregate(&ModelKey::new("VFR800"), &sources).await;

        assert_eq!(
            result.error,
            Some(SourceError::Fetch(ScraperError::InvalidResponse {
                url: bad_url,
                status: 500
            }))
        );
        assert_eq!(scraper.completed.load(Ordering::SeqCst), 2);
        assert!(result.into_result().is_err());
    }

    #[tokio::test]
    async fn first_error_wins() {
        let first = LineSite("first");
        let second = LineSite("second");
        let scraper = Arc::new(
            FakeScraper::default()
                .reply(&first.url("R6"), Reply::Status(503))
                .reply(&second.url("R6"), Reply::Status(404))
                .delay(&second.url("R6"), Duration::from_millis(80)),
        );
        let first_url = first.url("R6");
        let sources = vec![
            SourceAdapter::new(Arc::new(first), scraper.clone()),
            SourceAdapter::new(Arc::new(second), scraper.clone()),
        ];

        let result = aggregate(&ModelKey::new("R6"), &sources).await;

        assert_eq!(
            result.error,
            Some(SourceError::Fetch(ScraperError::InvalidResponse {
                url: first_url,
                status: 503
            }))
        );
        assert_eq!(scraper.completed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_source_is_not_an_error() {
        let full = LineSite("full");
        let empty = LineSite("empty");
        let scraper = Arc::new(
            FakeScraper::default()
                .reply(&full.url("R6"), Reply::Body("http://f/1".into()))
                .reply(&empty.url("R6"), Reply::Body(String::new())),
        );
        let sources = vec![
            SourceAdapter::new(Arc::new(full), scraper.clone()),
            SourceAdapter::new(Arc::new(empty), scraper),
        ];

        let offers = aggregate(&ModelKey::new("R6"), &sources)
            .await
            .into_result()
            .unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].link, "http://f/1");
    }

    #[tokio::test]
    async fn no_sources_yields_empty_result() {
        let result = aggregate(&ModelKey::new("R6"), &[]).await;
        assert!(result.offers.is_empty());
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn merge_keeps_every_offer_and_per_source_order_under_any_interleaving() {
        let mut rng = rand::rng();

        for round in 0..20 {
            let m = rng.random_range(0..40);
            let n = rng.random_range(0..40);
            let left_links: Vec<String> = (0..m).map(|i| format!("http://left/{round}/{i}")).collect();
            let right_links: Vec<String> =
                (0..n).map(|i| format!("http://right/{round}/{i}")).collect();

            let left = LineSite("left");
            let right = LineSite("right");
            let scraper = Arc::new(
                FakeScraper::default()
                    .reply(&left.url("VFR800"), body(&left_links))
                    .delay(&left.url("VFR800"), Duration::from_millis(rng.random_range(0..15)))
                    .reply(&right.url("VFR800"), body(&right_links))
                    .delay(&right.url("VFR800"), Duration::from_millis(rng.random_range(0..15))),
            );
            let sources = vec![
                SourceAdapter::new(Arc::new(left), scraper.clone()),
                SourceAdapter::new(Arc::new(right), scraper),
            ];

            let offers = aggregate(&ModelKey::new("VFR800"), &sources)
                .await
                .into_result()
                .unwrap();

            assert_eq!(offers.len(), m + n);
            let unique: HashSet<&str> = offers.iter().map(|o| o.link.as_str()).collect();
            assert_eq!(unique.len(), m + n);

            let from = |site: &str| -> Vec<String> {
                offers
                    .iter()
                    .filter(|o| o.site == site)
                    .map(|o| o.link.clone())
                    .collect()
            };
            assert_eq!(from("left"), left_links);
            assert_eq!(from("right"), right_links);
        }
    }
}
