//! Failures surfaced to the user.
//!
//! Every variant renders as a single line suitable for display. All of
//! them end the current submission; retrying means a fresh submission.

use api_client::ApiClientError;
use thiserror::Error;
use wine_types::RecordField;

#[derive(Error, Debug)]
pub enum WorkflowError {
    /// "Process" was requested before both inputs were supplied
    #[error("Please upload a wine image and select a wine type")]
    MissingInput {
        missing_image: bool,
        missing_category: bool,
    },

    #[error("Unable to identify the wine, please try again")]
    IdentificationFailed(#[source] ApiClientError),

    /// Appellation or region absent after identification
    #[error("The label did not show the {0}, so this wine cannot be matched")]
    PreconditionViolation(RecordField),

    #[error("No recommendations found, please try again")]
    RecommendationFailed(#[source] ApiClientError),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
