//! Error taxonomy for the grading core.

use std::fmt;

use thiserror::Error;

/// Convenience alias for results produced by the grading core.
pub type Result<T> = std::result::Result<T, GradingError>;

/// Which roster a failed lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Home or away team.
    Team,
    /// Assigned referee.
    Referee,
    /// Assigned observer.
    Observer,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Team => "team",
            Self::Referee => "referee",
            Self::Observer => "observer",
        };
        f.write_str(label)
    }
}

/// Failures surfaced by classification and enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// A referenced team or user is missing from the supplied roster.
    #[error("{kind} `{id}` referenced by match `{match_id}` is not in the roster")]
    ReferenceResolution {
        /// Roster the lookup was made against.
        kind: ReferenceKind,
        /// Identifier that could not be resolved.
        id: String,
        /// Match holding the reference.
        match_id: String,
    },
    /// The match record breaks the grade/submission pairing.
    #[error("{}", invariant_message(.match_id.as_deref(), .reason))]
    InvariantViolation {
        /// Offending match, when known.
        match_id: Option<String>,
        /// What is inconsistent about the record.
        reason: &'static str,
    },
}

impl GradingError {
    /// Attach a match id to an invariant violation raised without one.
    pub fn for_match(self, id: &str) -> Self {
        match self {
            Self::InvariantViolation {
                match_id: None,
                reason,
            } => Self::InvariantViolation {
                match_id: Some(id.to_string()),
                reason,
            },
            other => other,
        }
    }
}

fn invariant_message(match_id: Option<&str>, reason: &str) -> String {
    match match_id {
        Some(id) => format!("match `{id}` is inconsistent: {reason}"),
        None => format!("match record is inconsistent: {reason}"),
    }
}
