//! # Wine Types Crate
//!
//! Domain types shared by every stage of the wine advisor workflow.
//!
//! ## Main Components
//!
//! - **types**: submission inputs (ImageAsset, WineCategory, Vintage),
//!   identification records and recommendation results
//! - **error**: validation errors for raw input

pub mod error;
pub mod types;

pub use error::{Result, WineError};
pub use types::{
    // Submission inputs
    ImageAsset,
    Vintage,
    WineCategory,
    // Records
    PartialWineRecord,
    RecordField,
    ResolvedWineRecord,
    // Results
    WineRecommendation,
    // Constants
    MAX_VINTAGE,
    MIN_VINTAGE,
    UNKNOWN_APPELLATION,
    UNKNOWN_CEPAGE,
    UNKNOWN_CUVEE,
    UNKNOWN_REGION,
    UNKNOWN_TYPE,
    UNKNOWN_WINERY,
};
