//! Completion of partially identified records.
//!
//! The identification service regularly misses the producer or the vintage
//! on hard-to-read labels. Those two fields can be supplied by the user;
//! appellation and region cannot, and their absence is fatal.

use thiserror::Error;
use tracing::debug;
use wine_types::{PartialWineRecord, RecordField, ResolvedWineRecord, WineCategory};

use crate::normalizer::normalize;
use crate::traits::FieldCollector;

/// Outcome of one resolution attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Every required field is present
    Resolved(ResolvedWineRecord),

    /// Still waiting on the user.
    ///
    /// `record` carries whatever was collected on this attempt so the next
    /// attempt does not ask again; `missing` lists the fields still absent.
    Incomplete {
        record: PartialWineRecord,
        missing: Vec<RecordField>,
    },
}

/// Errors that stop a record from ever resolving
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A field that is never collected interactively is absent
    #[error("The label did not yield a {0} and it cannot be entered manually")]
    MissingRequiredField(RecordField),
}

/// Try to turn a partial record into one ready for recommendation.
///
/// ## Algorithm
/// 1. Winery: keep it if present and non-blank after normalization,
///    otherwise ask the collector; the kept value is normalized
/// 2. Vintage: keep it if present, otherwise ask the collector
/// 3. If either is still absent, return `Incomplete`
/// 4. Appellation and region must be present, otherwise
///    `MissingRequiredField`
///
/// Collectors are only invoked for absent fields.
pub fn resolve<C>(
    mut record: PartialWineRecord,
    category: WineCategory,
    collector: &mut C,
) -> Result<Resolution, ResolveError>
where
    C: FieldCollector + ?Sized,
{
    record.winery = record.winery.as_deref().map(normalize).filter(|w| !w.is_empty());
    if record.winery.is_none() {
        debug!("Winery missing, asking collector");
        record.winery = collector
            .collect_winery()
            .map(|w| normalize(&w))
            .filter(|w| !w.is_empty());
    }

    if record.vintage.is_none() {
        debug!("Vintage missing, asking collector");
        record.vintage = collector.collect_vintage().map(|v| v.year());
    }

    let (winery, vintage) = match (record.winery.clone(), record.vintage) {
        (Some(winery), Some(vintage)) => (winery, vintage),
        _ => {
            let mut missing = Vec::with_capacity(2);
            if record.winery.is_none() {
                missing.push(RecordField::Winery);
            }
            if record.vintage.is_none() {
                missing.push(RecordField::Vintage);
            }
            debug!("Record incomplete, still missing: {:?}", missing);
            return Ok(Resolution::Incomplete { record, missing });
        }
    };

    let appellation = record
        .appellation
        .ok_or(ResolveError::MissingRequiredField(RecordField::Appellation))?;
    let region = record
        .region
        .ok_or(ResolveError::MissingRequiredField(RecordField::Region))?;

    Ok(Resolution::Resolved(ResolvedWineRecord {
        winery,
        vintage,
        alcohol: record.alcohol,
        appellation,
        region,
        category,
    }))
}
