//! Client for the label identification service.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, info, warn};
use wine_types::{ImageAsset, PartialWineRecord, RecordField};

use crate::config::ApiConfig;
use crate::error::{ApiClientError, Result};
use crate::json;
use crate::WineIdentifier;

const IDENTIFICATION_PATH: &str = "uploadfile_identification";

/// Multipart field the service reads the image from
const FILE_FIELD: &str = "file";

/// Uploads bottle photos and reads back the extracted label fields.
#[derive(Debug, Clone)]
pub struct IdentificationClient {
    http: reqwest::Client,
    url: String,
}

impl IdentificationClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::with_http_client(config.build_http_client()?, config))
    }

    /// Reuse an existing connection pool
    pub fn with_http_client(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            http,
            url: config.endpoint(IDENTIFICATION_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WineIdentifier for IdentificationClient {
    /// Single multipart upload, no retry.
    ///
    /// Any non-2xx status is an error and its body is not read.
    async fn identify(&self, image: &ImageAsset) -> Result<PartialWineRecord> {
        let start = Instant::now();
        debug!(
            "Uploading {} ({} bytes, {}) for identification",
            image.filename(),
            image.len(),
            image.mime_type()
        );

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.filename().to_string())
            .mime_str(image.mime_type())
            .map_err(|e| ApiClientError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self.http.post(self.url.as_str()).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Identification service returned HTTP {}", status.as_u16());
            return Err(ApiClientError::Status(status.as_u16()));
        }

        let body: Map<String, Value> = response
            .json()
            .await
            .map_err(|e| ApiClientError::Decode(e.to_string()))?;
        let record = parse_identification(&body);

        info!(
            "Identified label in {:.2?}, missing fields: {:?}",
            start.elapsed(),
            record.missing_fields()
        );
        Ok(record)
    }
}

/// Read the service's `field -> [value]` object into a record.
///
/// A missing key, `null`, an empty list or an unreadable value all mean
/// absent. Lists longer than one are logged and only the first element
/// is kept.
pub fn parse_identification(body: &Map<String, Value>) -> PartialWineRecord {
    PartialWineRecord {
        winery: first_value(body, RecordField::Winery).and_then(json::text),
        vintage: first_value(body, RecordField::Vintage).and_then(json::year),
        alcohol: first_value(body, RecordField::Alcohol).and_then(json::float),
        appellation: first_value(body, RecordField::Appellation).and_then(json::text),
        region: first_value(body, RecordField::Region).and_then(json::text),
    }
}

fn first_value(body: &Map<String, Value>, field: RecordField) -> Option<&Value> {
    match body.get(field.as_str())? {
        Value::Array(items) => {
            if items.len() > 1 {
                warn!(
                    "Identification returned {} values for {}, keeping the first",
                    items.len(),
                    field
                );
            }
            items.first()
        }
        Value::Null => None,
        scalar => Some(scalar),
    }
}
