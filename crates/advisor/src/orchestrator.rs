//! # Advisor Orchestrator
//!
//! This module sequences one submission through the workflow:
//! 1. Identify the label from the photo
//! 2. Merge in the chosen category
//! 3. Resolve missing fields with the user (may take several ticks)
//! 4. Normalize the winery and check required fields
//! 5. Request recommendations
//! 6. Hand the ranked list to presentation
//!
//! Stages run strictly one after another; at most one remote call is in
//! flight per submission. Waiting for the user is not a blocking read: the
//! surface calls `resume` again whenever new input arrives.

use std::time::Instant;

use api_client::{
    ApiClientError, ApiConfig, IdentificationClient, RecommendationClient, WineIdentifier,
    WineRecommender,
};
use pipeline::{resolve, FieldCollector, ResolveError, Resolution};
use tracing::{debug, info, warn};

use crate::error::{Result, WorkflowError};
use crate::state::{PendingRecord, Submission, WorkflowState};

/// Drives submissions through identification, resolution and recommendation.
///
/// Holds no per-submission state, so one orchestrator can serve any number
/// of submissions.
pub struct Orchestrator<I, R> {
    identifier: I,
    recommender: R,
}

impl Orchestrator<IdentificationClient, RecommendationClient> {
    /// Orchestrator talking to the real services
    pub fn connect(config: &ApiConfig) -> std::result::Result<Self, ApiClientError> {
        let (identifier, recommender) = api_client::connect(config)?;
        Ok(Self::new(identifier, recommender))
    }
}

impl<I, R> Orchestrator<I, R>
where
    I: WineIdentifier,
    R: WineRecommender,
{
    pub fn new(identifier: I, recommender: R) -> Self {
        Self {
            identifier,
            recommender,
        }
    }

    /// The user's "process" action; the only way a submission starts.
    ///
    /// # Returns
    /// * `Ok(ResolvingFields)` - waiting for the user, call `resume` on input
    /// * `Ok(Presenting)` - recommendations are ready
    /// * `Err(MissingInput)` - image or category absent, nothing started
    /// * `Err(..)` - any other failure; the submission is now `Failed`
    pub async fn process<C>(
        &self,
        submission: &mut Submission,
        collector: &mut C,
    ) -> Result<WorkflowState>
    where
        C: FieldCollector + ?Sized,
    {
        if !matches!(
            submission.state,
            WorkflowState::Idle | WorkflowState::AwaitingSubmission
        ) {
            warn!("Process requested for a submission already {}", submission.state);
            return Ok(submission.state);
        }

        let (image, category) = match (submission.image.take(), submission.category.take()) {
            (Some(image), Some(category)) => (image, category),
            (image, category) => {
                let err = WorkflowError::MissingInput {
                    missing_image: image.is_none(),
                    missing_category: category.is_none(),
                };
                submission.image = image;
                submission.category = category;
                return Err(err);
            }
        };

        submission.state = WorkflowState::Identifying;
        info!(
            "Identifying {} ({} bytes) as {}",
            image.filename(),
            image.len(),
            category
        );
        let start = Instant::now();
        let identified = self.identifier.identify(&image).await;
        drop(image);

        let record = match identified {
            Ok(record) => record,
            Err(e) => {
                warn!("Identification failed after {:.2?}: {}", start.elapsed(), e);
                return Err(submission.fail(WorkflowError::IdentificationFailed(e)));
            }
        };
        info!("Identification finished in {:.2?}", start.elapsed());

        submission.pending = Some(PendingRecord {
            missing: record.missing_fields(),
            record,
            category,
        });
        submission.state = WorkflowState::ResolvingFields;

        self.resume(submission, collector).await
    }

    /// Re-entry point called on every input-surface change.
    ///
    /// Only acts while `ResolvingFields`; in any other state it returns the
    /// current state untouched.
    pub async fn resume<C>(
        &self,
        submission: &mut Submission,
        collector: &mut C,
    ) -> Result<WorkflowState>
    where
        C: FieldCollector + ?Sized,
    {
        let pending = match (submission.state, submission.pending.take()) {
            (WorkflowState::ResolvingFields, Some(pending)) => pending,
            (state, pending) => {
                debug!("Nothing to resume in state {}", state);
                submission.pending = pending;
                return Ok(state);
            }
        };

        let category = pending.category;
        let resolved = match resolve(pending.record, category, collector) {
            Ok(Resolution::Resolved(resolved)) => resolved,
            Ok(Resolution::Incomplete { record, missing }) => {
                info!("Waiting for user input: {:?}", missing);
                submission.pending = Some(PendingRecord {
                    record,
                    category,
                    missing,
                });
                return Ok(WorkflowState::ResolvingFields);
            }
            Err(ResolveError::MissingRequiredField(field)) => {
                warn!("Cannot request recommendations without {}", field);
                return Err(submission.fail(WorkflowError::PreconditionViolation(field)));
            }
        };

        submission.state = WorkflowState::Recommending;
        info!(
            "Requesting recommendations for {} {} ({})",
            resolved.winery, resolved.vintage, resolved.category
        );
        let start = Instant::now();
        match self.recommender.recommend(&resolved).await {
            Ok(recommendations) => {
                info!(
                    "Presenting {} recommendations after {:.2?}",
                    recommendations.len(),
                    start.elapsed()
                );
                submission.recommendations = recommendations;
                submission.resolved = Some(resolved);
                submission.state = WorkflowState::Presenting;
                Ok(WorkflowState::Presenting)
            }
            Err(e) => {
                warn!("Recommendation failed after {:.2?}: {}", start.elapsed(), e);
                Err(submission.fail(WorkflowError::RecommendationFailed(e)))
            }
        }
    }
}
