//! Record processing between identification and recommendation.
//!
//! This crate provides:
//! - `normalize` for turning producer names into matching keys
//! - the FieldCollector trait for user-supplied values
//! - `resolve` for completing a partial record
//!
//! ## Architecture
//! Everything here is synchronous and free of I/O:
//! 1. The resolver fills winery/vintage from the collector when absent
//! 2. The winery is normalized
//! 3. Appellation and region are checked
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{resolve, FnCollector, Resolution};
//!
//! let mut collector = FnCollector::new(|| prompt_winery(), || prompt_vintage());
//! match resolve(partial, WineCategory::StillRed, &mut collector)? {
//!     Resolution::Resolved(record) => submit(record),
//!     Resolution::Incomplete { record, .. } => wait_for_input(record),
//! }
//! ```

pub mod normalizer;
pub mod resolver;
pub mod traits;

// Re-export main types
pub use normalizer::normalize;
pub use resolver::{resolve, ResolveError, Resolution};
pub use traits::{FieldCollector, FnCollector};
