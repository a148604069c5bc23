//! HTTP clients for the wine advisor backend.
//!
//! This crate talks to the two remote services the workflow depends on:
//! - the identification service, which reads label fields off a bottle photo
//! - the recommendation service, which ranks wines similar to a resolved record
//!
//! Each client makes exactly one request per call. There is no retry; the
//! request timeout comes from `ApiConfig`.

use async_trait::async_trait;
use wine_types::{ImageAsset, PartialWineRecord, ResolvedWineRecord, WineRecommendation};

pub mod config;
pub mod error;
pub mod identification;
mod json;
pub mod recommendation;

pub use config::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ApiClientError, Result};
pub use identification::{parse_identification, IdentificationClient};
pub use recommendation::{
    parse_recommendations, RecommendationClient, RecommendationQuery, DEFAULT_ALCOHOL,
};

/// Reads label fields from a bottle photograph.
#[async_trait]
pub trait WineIdentifier: Send + Sync {
    async fn identify(&self, image: &ImageAsset) -> Result<PartialWineRecord>;
}

/// Ranks wines for a fully resolved record, best first.
#[async_trait]
pub trait WineRecommender: Send + Sync {
    async fn recommend(&self, record: &ResolvedWineRecord) -> Result<Vec<WineRecommendation>>;
}

/// Build both clients on one shared connection pool.
pub fn connect(config: &ApiConfig) -> Result<(IdentificationClient, RecommendationClient)> {
    let http = config.build_http_client()?;
    tracing::debug!("Using advisor backend at {}", config.base_url);
    Ok((
        IdentificationClient::with_http_client(http.clone(), config),
        RecommendationClient::with_http_client(http, config),
    ))
}
