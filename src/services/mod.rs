//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository layer and the HTTP surface. They
//! orchestrate repository calls and implement the scheduling rules: the
//! holiday gate, the overlap scans, conflict classification, and the day
//! timeline aggregation.

pub mod availability;
pub mod classifier;
pub mod day_schedule;
pub mod holiday_gate;
pub mod overlap;
pub mod reference_cache;

pub use availability::check_availability;
pub use day_schedule::day_conflicts;
pub use reference_cache::{ReferenceCache, DEFAULT_REFERENCE_TTL};
