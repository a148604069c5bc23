//! Advisor crate for the wine advisor workflow.
//!
//! This crate contains the orchestrator that takes one submission (bottle
//! photo + wine category) through identification, field resolution and
//! recommendation, plus the per-submission state it operates on.

pub mod error;
pub mod orchestrator;
pub mod state;

pub use error::WorkflowError;
pub use orchestrator::Orchestrator;
pub use state::{Submission, WorkflowState};
