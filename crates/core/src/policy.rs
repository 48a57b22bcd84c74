//! Role- and time-gated edit permissions.

use chrono::{DateTime, Utc};

use crate::clock::GradingWindows;
use crate::enrich::EnrichedMatch;
use crate::models::Role;
use crate::status::GradeStatus;

/// Which edit actions are available for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditPermissions {
    /// Match details (date, stadium, teams, officials).
    pub details: bool,
    /// Referee grade.
    pub grade: bool,
}

/// Decides who may edit what, and until when.
///
/// Nothing is cached: callers consult the policy with the current instant on
/// every render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditabilityPolicy {
    windows: GradingWindows,
}

impl EditabilityPolicy {
    /// Policy using `windows` for the admission deadline.
    pub fn new(windows: GradingWindows) -> Self {
        Self { windows }
    }

    /// Admins may edit details until kick-off.
    pub fn can_edit_details(&self, role: Role, scheduled: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        role == Role::Admin && now < scheduled
    }

    /// Admins and observers may edit a grade that is not yet received at any
    /// time, and a received grade until the admission deadline.
    pub fn can_edit_grade(
        &self,
        role: Role,
        status: GradeStatus,
        scheduled: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        let authorized = matches!(role, Role::Admin | Role::Observer);
        let received = status == GradeStatus::Received;
        authorized && (!received || !self.windows.deadline_passed(scheduled, now))
    }

    /// Both permissions for `role` on an enriched match at `now`.
    pub fn permissions(&self, role: Role, enriched: &EnrichedMatch, now: DateTime<Utc>) -> EditPermissions {
        EditPermissions {
            details: self.can_edit_details(role, enriched.match_date, now),
            grade: self.can_edit_grade(role, enriched.status(), enriched.match_date, now),
        }
    }
}
