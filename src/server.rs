// HTTP surface: decodes requests, runs resolve + aggregate, always answers 200 with JSON.
use crate::aggregator::aggregate;
use crate::config::AppConfig;
use crate::model::{ModelKey, ResolveError, SourceError};
use crate::normalizer::AliasTable;
use crate::scraper::{Scraper, SourceAdapter};
use crate::sites::{self, AutoRuSite, auto_ru};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Shared per-process state. Everything in it is read-only after startup.
pub struct AppState {
    aliases: AliasTable,
    sources: Vec<SourceAdapter>,
    vendor_site: AutoRuSite,
    scraper: Arc<dyn Scraper>,
}

impl AppState {
    pub fn new(config: &AppConfig, scraper: Arc<dyn Scraper>) -> Self {
        let sources = sites::configured_sites(config)
            .into_iter()
            .map(|site| SourceAdapter::new(site, scraper.clone()))
            .collect();

        Self {
            aliases: AliasTable::new(),
            sources,
            vendor_site: AutoRuSite::new(&config.auto_ru_url, config.fetch_timeout()),
            scraper,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BikeOffersRequest {
    model: String,
}

#[derive(Debug, Serialize)]
struct BikeOffersResponse {
    model: ModelKey,
    offers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct VendorsResponse {
    vendors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/getBikeOffers", post(get_bike_offers))
        .route("/getAutoRuVendors", get(get_auto_ru_vendors))
        .with_state(state)
}

pub async fn serve(port: u16, state: Arc<AppState>) -> Result<(), std::io::Error> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await
}

/// POST /getBikeOffers - `{"model": "<query>"}`
async fn get_bike_offers(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match find_offers(&state, &body).await {
        Ok(found) => json_response(&found),
        Err(e) => error_response(e),
    }
}

/// GET /getAutoRuVendors
async fn get_auto_ru_vendors(State(state): State<Arc<AppState>>) -> Response {
    match auto_ru::list_vendors(&state.vendor_site, state.scraper.as_ref()).await {
        Ok(vendors) => json_response(&VendorsResponse { vendors }),
        Err(e) => error_response(e.into()),
    }
}

async fn find_offers(state: &AppState, body: &[u8]) -> Result<BikeOffersResponse, ApiError> {
    let request: BikeOffersRequest = serde_json::from_slice(body)?;
    let model = state.aliases.resolve(&request.model)?;
    info!("Query {:?} resolved to {}", request.model, model);

    let offers = aggregate(&model, &state.sources).await.into_result()?;

    Ok(BikeOffersResponse {
        model,
        offers: offers.into_iter().map(|o| o.link).collect(),
    })
}

fn error_response(e: ApiError) -> Response {
    warn!("Request failed: {}", e);
    json_response(&ErrorResponse {
        error: e.to_string(),
    })
}

fn json_response<T: Serialize>(payload: &T) -> Response {
    let body = match serde_json::to_vec(payload) {
        Ok(body) => body,
        Err(e) => {
            error!("Response encoding failed: {}", e);
            br#"{"error":"response encoding failed"}"#.to_vec()
        }
    };

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
