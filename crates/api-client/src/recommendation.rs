//! Client for the recommendation service.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, info, warn};
use wine_types::{
    ResolvedWineRecord, WineCategory, WineRecommendation, UNKNOWN_APPELLATION, UNKNOWN_CEPAGE,
    UNKNOWN_CUVEE, UNKNOWN_REGION, UNKNOWN_TYPE, UNKNOWN_WINERY,
};

use crate::config::ApiConfig;
use crate::error::{ApiClientError, Result};
use crate::json;
use crate::WineRecommender;

const PREDICT_PATH: &str = "predict";

/// Alcohol sent when the label did not show one
pub const DEFAULT_ALCOHOL: f64 = 0.0;

/// Query parameters of the `predict` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationQuery<'a> {
    pub winery: &'a str,
    pub type_of_wine: WineCategory,
    pub alcohol: f64,
    pub appellation: &'a str,
    pub region: &'a str,
    pub vintage: i32,
}

impl<'a> From<&'a ResolvedWineRecord> for RecommendationQuery<'a> {
    fn from(record: &'a ResolvedWineRecord) -> Self {
        Self {
            winery: &record.winery,
            type_of_wine: record.category,
            alcohol: record.alcohol.unwrap_or(DEFAULT_ALCOHOL),
            appellation: &record.appellation,
            region: &record.region,
            vintage: record.vintage,
        }
    }
}

/// Fetches ranked recommendations for a resolved record.
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    http: reqwest::Client,
    url: String,
}

impl RecommendationClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::with_http_client(config.build_http_client()?, config))
    }

    /// Reuse an existing connection pool
    pub fn with_http_client(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            http,
            url: config.endpoint(PREDICT_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WineRecommender for RecommendationClient {
    async fn recommend(&self, record: &ResolvedWineRecord) -> Result<Vec<WineRecommendation>> {
        let start = Instant::now();
        let query = RecommendationQuery::from(record);
        debug!("Requesting recommendations with {:?}", query);

        let response = self.http.get(self.url.as_str()).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Recommendation service returned HTTP {}", status.as_u16());
            return Err(ApiClientError::Status(status.as_u16()));
        }

        let body: Map<String, Value> = response
            .json()
            .await
            .map_err(|e| ApiClientError::Decode(e.to_string()))?;
        let recommendations = parse_recommendations(&body);

        info!(
            "Received {} recommendations in {:.2?}",
            recommendations.len(),
            start.elapsed()
        );
        Ok(recommendations)
    }
}

/// Read the service's `key -> result` object, keeping its order.
///
/// Missing or unreadable fields fall back to their unknown sentinel; a
/// malformed entry never drops the rest of the list.
pub fn parse_recommendations(body: &Map<String, Value>) -> Vec<WineRecommendation> {
    body.iter()
        .map(|(key, value)| match value {
            Value::Object(fields) => parse_recommendation(key, fields),
            other => {
                warn!("Recommendation {} is not an object: {}", key, other);
                WineRecommendation::unknown(key.as_str())
            }
        })
        .collect()
}

fn parse_recommendation(key: &str, fields: &Map<String, Value>) -> WineRecommendation {
    let text = |name: &str, sentinel: &str| {
        fields
            .get(name)
            .and_then(json::text)
            .unwrap_or_else(|| sentinel.to_string())
    };
    let float = |name: &str| fields.get(name).and_then(json::float);

    WineRecommendation {
        key: key.to_string(),
        winery: text("winery", UNKNOWN_WINERY),
        cuvee: text("cuvee", UNKNOWN_CUVEE),
        vintage: fields.get("vintage").and_then(json::year),
        type_of_wine: text("type_of_wine", UNKNOWN_TYPE),
        region: text("region", UNKNOWN_REGION),
        appellation: text("appellation", UNKNOWN_APPELLATION),
        cepage: text("cepage", UNKNOWN_CEPAGE),
        alcohol: float("alcohol"),
        price_usd: float("price_usd"),
        rating: float("rating"),
        distance: float("distance"),
    }
}
