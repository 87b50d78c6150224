use crate::model::{ModelKey, Offer, OfferEvent, SourceError};
use crate::scraper::traits::{Scraper, Site};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const OFFER_BUFFER: usize = 32;

/// Binds a site to the network layer and runs one fetch per call on its own task.
#[derive(Clone)]
pub struct SourceAdapter {
    site: Arc<dyn Site>,
    scraper: Arc<dyn Scraper>,
}

impl SourceAdapter {
    pub fn new(site: Arc<dyn Site>, scraper: Arc<dyn Scraper>) -> Self {
        Self { site, scraper }
    }

    pub fn name(&self) -> &'static str {
        self.site.name()
    }

    /// Spawns the fetch and returns its output stream.
    ///
    /// The stream carries every offer in document order, or a single
    /// `OfferEvent::Failed`, and is closed exactly once when the task ends.
    pub fn fetch_offers(&self, model: ModelKey) -> mpsc::Receiver<OfferEvent> {
        let (tx, rx) = mpsc::channel(OFFER_BUFFER);
        let site = self.site.clone();
        let scraper = self.scraper.clone();

        tokio::spawn(async move {
            match collect_offers(site.as_ref(), scraper.as_ref(), &model).await {
                Ok(offers) => {
                    for offer in offers {
                        if tx.send(OfferEvent::Offer(offer)).await.is_err() {
                            debug!("{}: receiver dropped", site.name());
                            return;
                        }
                    }
                }
                Err(e) => {
                    warn!("{}: {}", site.name(), e);
                    let _ = tx.send(OfferEvent::Failed(e)).await;
                }
            }
        });

        rx
    }
}

async fn collect_offers(
    site: &dyn Site,
    scraper: &dyn Scraper,
    model: &ModelKey,
) -> Result<Vec<Offer>, SourceError> {
    let query = site.build_query(model)?;
    let html = scraper.fetch(&query).await?;
    let offers = site.parse(&html)?;
    info!("{}: {} offers for {}", site.name(), offers.len(), model);
    Ok(offers)
}
