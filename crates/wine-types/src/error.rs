//! Error types for the wine-types crate.
//!
//! These cover validation of values handed in by the input surface
//! (a typed vintage, a selected category, an uploaded image) before
//! they enter the workflow.

use thiserror::Error;

use crate::types::{MAX_VINTAGE, MIN_VINTAGE};

/// Errors raised when constructing domain values from raw input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WineError {
    /// Vintage year outside the accepted input range
    #[error("Vintage {year} is outside the accepted range {}-{}", MIN_VINTAGE, MAX_VINTAGE)]
    VintageOutOfRange { year: i32 },

    /// Category text that does not name one of the five wine categories
    #[error("Unknown wine category: {0}")]
    UnknownCategory(String),

    /// Image upload with no content
    #[error("Image {filename} is empty")]
    EmptyImage { filename: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, WineError>;
