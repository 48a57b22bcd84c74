#![warn(clippy::all, missing_docs)]

//! Match grading lifecycle for the league manager.
//!
//! This crate derives a match's grading status and delay from its kick-off,
//! its recorded grade, and the current instant, enriches raw match records
//! for display, decides who may edit details and grades, and groups
//! enriched matches for the grades panel. Nothing here is persisted: every
//! value is recomputed from its inputs on each call.

pub mod clock;
pub mod config;
pub mod enrich;
pub mod error;
pub mod models;
pub mod panel;
pub mod policy;
pub mod status;

pub use clock::{Clock, Delay, FixedClock, GradingWindows, SystemClock};
pub use config::GradingConfig;
pub use enrich::{Counterpart, EnrichedMatch, MatchEnricher};
pub use error::{GradingError, ReferenceKind, Result};
pub use models::{Match, Role, Roster, Team, User};
pub use panel::{bucket, matches_on, search, GradeBuckets, GradeSummary, GradeTab};
pub use policy::{EditPermissions, EditabilityPolicy};
pub use status::{BadgeScheme, GradeAssessment, GradeStatus, GradeStatusCalculator};
