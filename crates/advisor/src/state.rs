//! Per-submission workflow state.
//!
//! A `Submission` is created fresh for every bottle a user submits and is
//! passed explicitly to the orchestrator; nothing is shared between
//! submissions.

use std::fmt;

use tracing::warn;
use wine_types::{
    ImageAsset, PartialWineRecord, RecordField, ResolvedWineRecord, WineCategory,
    WineRecommendation,
};

use crate::error::WorkflowError;

/// Stages of one submission.
///
/// ```text
/// Idle -> AwaitingSubmission -> Identifying -> ResolvingFields -> Recommending -> Presenting
///                                    |               |  ^  |            |
///                                    v               +--+  v            v
///                                  Failed          (Incomplete)       Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Idle,
    AwaitingSubmission,
    Identifying,
    ResolvingFields,
    Recommending,
    Presenting,
    Failed,
}

impl WorkflowState {
    /// Presenting and Failed end a submission
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowState::Presenting | WorkflowState::Failed)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::Idle => "idle",
            WorkflowState::AwaitingSubmission => "awaiting submission",
            WorkflowState::Identifying => "identifying",
            WorkflowState::ResolvingFields => "resolving fields",
            WorkflowState::Recommending => "recommending",
            WorkflowState::Presenting => "presenting",
            WorkflowState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Identification output with the chosen category merged in
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingRecord {
    pub record: PartialWineRecord,
    pub category: WineCategory,
    pub missing: Vec<RecordField>,
}

/// Everything one submission owns.
#[derive(Debug)]
pub struct Submission {
    pub(crate) state: WorkflowState,
    pub(crate) image: Option<ImageAsset>,
    pub(crate) category: Option<WineCategory>,
    pub(crate) pending: Option<PendingRecord>,
    pub(crate) resolved: Option<ResolvedWineRecord>,
    pub(crate) recommendations: Vec<WineRecommendation>,
    pub(crate) failure: Option<String>,
}

impl Submission {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            image: None,
            category: None,
            pending: None,
            resolved: None,
            recommendations: Vec::new(),
            failure: None,
        }
    }

    /// Convenience for surfaces that have both inputs up front
    pub fn with_inputs(image: ImageAsset, category: WineCategory) -> Self {
        let mut submission = Self::new();
        submission.attach_image(image);
        submission.select_category(category);
        submission
    }

    /// Supply or replace the photo. Ignored once processing has started.
    pub fn attach_image(&mut self, image: ImageAsset) {
        if self.accepts_input() {
            self.image = Some(image);
            self.refresh_readiness();
        } else {
            warn!("Ignoring image for a submission already {}", self.state);
        }
    }

    /// Supply or replace the category. Ignored once processing has started.
    pub fn select_category(&mut self, category: WineCategory) {
        if self.accepts_input() {
            self.category = Some(category);
            self.refresh_readiness();
        } else {
            warn!("Ignoring category for a submission already {}", self.state);
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn category(&self) -> Option<WineCategory> {
        self.category
            .or_else(|| self.pending.as_ref().map(|p| p.category))
            .or_else(|| self.resolved.as_ref().map(|r| r.category))
    }

    /// Record as identified so far, while fields are being resolved
    pub fn pending_record(&self) -> Option<&PartialWineRecord> {
        self.pending.as_ref().map(|p| &p.record)
    }

    /// Fields the user still has to supply
    pub fn missing_fields(&self) -> &[RecordField] {
        self.pending
            .as_ref()
            .map(|p| p.missing.as_slice())
            .unwrap_or(&[])
    }

    /// The record that was sent for recommendation
    pub fn resolved_record(&self) -> Option<&ResolvedWineRecord> {
        self.resolved.as_ref()
    }

    /// Results in the service's ranking order; empty unless Presenting
    pub fn recommendations(&self) -> &[WineRecommendation] {
        &self.recommendations
    }

    /// One-line message of the error that ended this submission
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    fn accepts_input(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::Idle | WorkflowState::AwaitingSubmission
        )
    }

    fn refresh_readiness(&mut self) {
        self.state = if self.image.is_some() && self.category.is_some() {
            WorkflowState::AwaitingSubmission
        } else {
            WorkflowState::Idle
        };
    }

    /// Drop everything gathered so far and end in Failed, keeping the
    /// message of `err` for later ticks. Hands `err` back to the caller.
    pub(crate) fn fail(&mut self, err: WorkflowError) -> WorkflowError {
        self.image = None;
        self.category = None;
        self.pending = None;
        self.resolved = None;
        self.recommendations.clear();
        self.failure = Some(err.to_string());
        self.state = WorkflowState::Failed;
        err
    }
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}
