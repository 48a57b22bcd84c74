//! Grade status classification.
//!
//! Status is never stored: it is recomputed from a match's kick-off, its
//! recorded grade, and the current instant every time it is needed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::{Delay, GradingWindows};
use crate::error::{GradingError, Result};

/// Where a match stands in the grading lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    /// Grading has not opened yet.
    Expected,
    /// Admission window elapsed without grading having opened. Unreachable
    /// while grading opens before the admission deadline.
    Pending,
    /// Grading is open and no grade was recorded.
    Overdue,
    /// A grade was recorded.
    Received,
}

impl GradeStatus {
    /// All statuses in tab order.
    pub const ALL: [GradeStatus; 4] = [
        GradeStatus::Received,
        GradeStatus::Overdue,
        GradeStatus::Pending,
        GradeStatus::Expected,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expected => "Expected",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
            Self::Received => "Received",
        }
    }
}

impl fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Badge styling attached to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeScheme {
    /// Nothing to act on yet.
    Neutral,
    /// Needs attention.
    Warning,
    /// Late.
    Danger,
    /// Done.
    Success,
}

impl BadgeScheme {
    /// Color token used by the frontend badge.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Neutral => "gray",
            Self::Warning => "orange",
            Self::Danger => "red",
            Self::Success => "green",
        }
    }
}

/// Result of classifying one match at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAssessment {
    /// Lifecycle status.
    pub status: GradeStatus,
    /// Badge styling for the status.
    pub badge_scheme: BadgeScheme,
    /// Lateness past the admission deadline, if any.
    pub delay: Option<Delay>,
}

impl GradeAssessment {
    fn new(status: GradeStatus, badge_scheme: BadgeScheme, delay: Option<Delay>) -> Self {
        Self {
            status,
            badge_scheme,
            delay,
        }
    }

    /// Delay rendered as `{d}d{h}h{m}m`; empty when there is none.
    pub fn delay_label(&self) -> String {
        self.delay.map(|delay| delay.to_string()).unwrap_or_default()
    }
}

/// Pure classifier parameterised by grading windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeStatusCalculator {
    windows: GradingWindows,
}

impl GradeStatusCalculator {
    /// Calculator using the given windows.
    pub fn new(windows: GradingWindows) -> Self {
        Self { windows }
    }

    /// Windows this calculator classifies against.
    pub fn windows(&self) -> GradingWindows {
        self.windows
    }

    /// Classify a match from its raw grading fields.
    ///
    /// A grade value and its submission instant must be both present or both
    /// absent; anything else is rejected with
    /// [`GradingError::InvariantViolation`].
    pub fn classify(
        &self,
        scheduled: DateTime<Utc>,
        grade: Option<f64>,
        submitted_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<GradeAssessment> {
        let submitted_at = match (grade, submitted_at) {
            (Some(_), Some(at)) => Some(at),
            (None, None) => None,
            (Some(_), None) => return Err(invariant("grade recorded without a submission date")),
            (None, Some(_)) => return Err(invariant("submission date recorded without a grade")),
        };

        let deadline = self.windows.admission_deadline(scheduled);

        if self.windows.grading_opens(scheduled) < now {
            return Ok(match submitted_at {
                Some(at) => GradeAssessment::new(
                    GradeStatus::Received,
                    BadgeScheme::Success,
                    Delay::past(deadline, at),
                ),
                None => GradeAssessment::new(
                    GradeStatus::Overdue,
                    BadgeScheme::Danger,
                    Delay::past(deadline, now),
                ),
            });
        }

        if deadline > now {
            return Ok(GradeAssessment::new(
                GradeStatus::Expected,
                BadgeScheme::Neutral,
                None,
            ));
        }

        Ok(GradeAssessment::new(
            GradeStatus::Pending,
            BadgeScheme::Warning,
            None,
        ))
    }
}

fn invariant(reason: &'static str) -> GradingError {
    warn!(reason, "rejecting inconsistent grade fields");
    GradingError::InvariantViolation {
        match_id: None,
        reason,
    }
}
