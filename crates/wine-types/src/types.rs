//! Core domain types for the wine advisor workflow.
//!
//! Data flows strictly forward through these types:
//! `ImageAsset` + `WineCategory` -> `PartialWineRecord` -> `ResolvedWineRecord`
//! -> `Vec<WineRecommendation>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, WineError};

/// Lowest vintage year the input surface accepts
pub const MIN_VINTAGE: i32 = 1800;

/// Highest vintage year the input surface accepts
pub const MAX_VINTAGE: i32 = 2100;

// =============================================================================
// Submission Inputs
// =============================================================================

/// A bottle photograph as supplied by the input surface.
///
/// Owned by a single submission and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    bytes: Vec<u8>,
    filename: String,
    mime_type: String,
}

impl ImageAsset {
    /// Wrap raw image bytes. Empty blobs are rejected.
    pub fn new(
        bytes: Vec<u8>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Result<Self> {
        let filename = filename.into();
        if bytes.is_empty() {
            return Err(WineError::EmptyImage { filename });
        }
        Ok(Self {
            bytes,
            filename,
            mime_type: mime_type.into(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The closed set of wine categories a user can pick from.
///
/// Serializes to the token the recommendation service expects for
/// `type_of_wine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WineCategory {
    #[serde(rename = "blanc")]
    StillWhite,
    #[serde(rename = "rouge")]
    StillRed,
    #[serde(rename = "rose")]
    Rose,
    #[serde(rename = "effervescent")]
    Sparkling,
    #[serde(rename = "fortifie")]
    Fortified,
}

impl WineCategory {
    pub const ALL: [WineCategory; 5] = [
        WineCategory::StillWhite,
        WineCategory::StillRed,
        WineCategory::Rose,
        WineCategory::Sparkling,
        WineCategory::Fortified,
    ];

    /// Human-facing name
    pub fn display_name(self) -> &'static str {
        match self {
            WineCategory::StillWhite => "still-white",
            WineCategory::StillRed => "still-red",
            WineCategory::Rose => "rosé",
            WineCategory::Sparkling => "sparkling",
            WineCategory::Fortified => "fortified",
        }
    }

    /// Value sent as `type_of_wine` to the recommendation service
    pub fn wire_token(self) -> &'static str {
        match self {
            WineCategory::StillWhite => "blanc",
            WineCategory::StillRed => "rouge",
            WineCategory::Rose => "rose",
            WineCategory::Sparkling => "effervescent",
            WineCategory::Fortified => "fortifie",
        }
    }
}

impl fmt::Display for WineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for WineCategory {
    type Err = WineError;

    /// Accepts display names and wire tokens, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        WineCategory::ALL
            .into_iter()
            .find(|c| c.display_name() == wanted || c.wire_token() == wanted)
            .ok_or_else(|| WineError::UnknownCategory(s.to_string()))
    }
}

/// A vintage year entered through the input surface.
///
/// Construction enforces the inclusive range
/// [`MIN_VINTAGE`, `MAX_VINTAGE`], so out-of-range years never reach the
/// field resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vintage(i32);

impl Vintage {
    pub fn new(year: i32) -> Result<Self> {
        if (MIN_VINTAGE..=MAX_VINTAGE).contains(&year) {
            Ok(Self(year))
        } else {
            Err(WineError::VintageOutOfRange { year })
        }
    }

    pub fn year(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Vintage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Identification Records
// =============================================================================

/// Attributes the identification service extracts from a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Winery,
    Vintage,
    Alcohol,
    Appellation,
    Region,
}

impl RecordField {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordField::Winery => "winery",
            RecordField::Vintage => "vintage",
            RecordField::Alcohol => "alcohol",
            RecordField::Appellation => "appellation",
            RecordField::Region => "region",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the identification service.
///
/// Each attribute holds at most one value; `None` means the service
/// could not read it from the label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialWineRecord {
    pub winery: Option<String>,
    pub vintage: Option<i32>,
    /// Alcohol by volume as a fraction (0.135 for 13.5%)
    pub alcohol: Option<f64>,
    pub appellation: Option<String>,
    pub region: Option<String>,
}

impl PartialWineRecord {
    /// Fields with no value, in declaration order
    pub fn missing_fields(&self) -> Vec<RecordField> {
        let mut missing = Vec::new();
        if self.winery.is_none() {
            missing.push(RecordField::Winery);
        }
        if self.vintage.is_none() {
            missing.push(RecordField::Vintage);
        }
        if self.alcohol.is_none() {
            missing.push(RecordField::Alcohol);
        }
        if self.appellation.is_none() {
            missing.push(RecordField::Appellation);
        }
        if self.region.is_none() {
            missing.push(RecordField::Region);
        }
        missing
    }
}

/// A record ready for the recommendation service.
///
/// Only the field resolver builds these, so winery, vintage, appellation
/// and region are always present and the winery is already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWineRecord {
    pub winery: String,
    pub vintage: i32,
    pub alcohol: Option<f64>,
    pub appellation: String,
    pub region: String,
    pub category: WineCategory,
}

// =============================================================================
// Recommendations
// =============================================================================

pub const UNKNOWN_WINERY: &str = "Unknown Winery";
pub const UNKNOWN_CUVEE: &str = "No Cuvee";
pub const UNKNOWN_TYPE: &str = "Unknown Type";
pub const UNKNOWN_REGION: &str = "Unknown Region";
pub const UNKNOWN_APPELLATION: &str = "Unknown Appellation";
pub const UNKNOWN_CEPAGE: &str = "Unknown Cepage";

/// One ranked result from the recommendation service.
///
/// Text fields the service left out hold their `UNKNOWN_*` sentinel;
/// numeric fields the service left out are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct WineRecommendation {
    /// Key of this entry in the service response
    pub key: String,
    pub winery: String,
    pub cuvee: String,
    pub vintage: Option<i32>,
    pub type_of_wine: String,
    pub region: String,
    pub appellation: String,
    /// Grape-variety blend
    pub cepage: String,
    /// Alcohol by volume as a fraction
    pub alcohol: Option<f64>,
    pub price_usd: Option<f64>,
    /// Score out of 100
    pub rating: Option<f64>,
    pub distance: Option<f64>,
}

impl WineRecommendation {
    /// An entry with every field set to its unknown sentinel
    pub fn unknown(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            winery: UNKNOWN_WINERY.to_string(),
            cuvee: UNKNOWN_CUVEE.to_string(),
            vintage: None,
            type_of_wine: UNKNOWN_TYPE.to_string(),
            region: UNKNOWN_REGION.to_string(),
            appellation: UNKNOWN_APPELLATION.to_string(),
            cepage: UNKNOWN_CEPAGE.to_string(),
            alcohol: None,
            price_usd: None,
            rating: None,
            distance: None,
        }
    }
}
