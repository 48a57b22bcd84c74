//! Time primitives: the current-instant source, grading windows, and the
//! compact delay representation shown next to late grades.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Hours after kick-off after which a missing grade counts against the observer.
pub const GRADING_OPENS_AFTER_HOURS: i64 = 2;
/// Hours after kick-off at which the admission window closes.
pub const GRADE_ADMISSION_TIME_WINDOW: i64 = 4;

const DATE_FORMAT: &str = "%d-%m-%Y";
const TIME_FORMAT: &str = "%H:%M";
const DATETIME_FORMAT: &str = "%d-%m-%Y %H:%M";
const NOT_AVAILABLE: &str = "N/A";

/// Source of the current instant.
pub trait Clock {
    /// The instant every derived value is computed against.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Offsets from kick-off that drive grade classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradingWindows {
    /// Time after kick-off at which grading opens.
    pub grading_opens_after: Duration,
    /// Length of the admission window measured from kick-off.
    pub admission_window: Duration,
}

impl Default for GradingWindows {
    fn default() -> Self {
        Self::from_hours(GRADING_OPENS_AFTER_HOURS, GRADE_ADMISSION_TIME_WINDOW)
    }
}

impl GradingWindows {
    /// Build windows from whole hours; spans past chrono's range saturate.
    pub fn from_hours(grading_opens_after: i64, admission_window: i64) -> Self {
        Self {
            grading_opens_after: saturating_hours(grading_opens_after),
            admission_window: saturating_hours(admission_window),
        }
    }

    /// Instant after which a grade is either received or overdue.
    pub fn grading_opens(&self, scheduled: DateTime<Utc>) -> DateTime<Utc> {
        saturating_add(scheduled, self.grading_opens_after)
    }

    /// End of the admission window.
    pub fn admission_deadline(&self, scheduled: DateTime<Utc>) -> DateTime<Utc> {
        saturating_add(scheduled, self.admission_window)
    }

    /// Whether the admission deadline lies strictly before `now`.
    pub fn deadline_passed(&self, scheduled: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.admission_deadline(scheduled) < now
    }
}

fn saturating_hours(hours: i64) -> Duration {
    Duration::try_hours(hours).unwrap_or(if hours < 0 { Duration::MIN } else { Duration::MAX })
}

fn saturating_add(instant: DateTime<Utc>, span: Duration) -> DateTime<Utc> {
    instant.checked_add_signed(span).unwrap_or(if span < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Elapsed time past a deadline, split into whole days, hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delay {
    /// Whole days.
    pub days: i64,
    /// Remaining whole hours (0..24).
    pub hours: i64,
    /// Remaining whole minutes (0..60).
    pub minutes: i64,
}

impl Delay {
    /// Delay of `instant` past `deadline`.
    ///
    /// Returns `None` when `instant` is not at least a full minute late, which
    /// is also when the rendered string would be empty.
    pub fn past(deadline: DateTime<Utc>, instant: DateTime<Utc>) -> Option<Self> {
        Self::from_duration(instant - deadline)
    }

    /// Split a positive duration; sub-minute and negative spans yield `None`.
    pub fn from_duration(elapsed: Duration) -> Option<Self> {
        let total_minutes = elapsed.num_minutes();
        if total_minutes <= 0 {
            return None;
        }
        Some(Self {
            days: elapsed.num_days(),
            hours: elapsed.num_hours() % 24,
            minutes: total_minutes % 60,
        })
    }

    /// Total span covered by the delay, truncated to minutes.
    pub fn as_duration(&self) -> Duration {
        Duration::days(self.days) + Duration::hours(self.hours) + Duration::minutes(self.minutes)
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d", self.days)?;
        }
        if self.hours > 0 {
            write!(f, "{}h", self.hours)?;
        }
        if self.minutes > 0 {
            write!(f, "{}m", self.minutes)?;
        }
        Ok(())
    }
}

/// Render an instant as `DD-MM-YYYY` in the given offset.
pub fn date_label(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format(DATE_FORMAT).to_string()
}

/// Render an instant as `HH:mm` in the given offset.
pub fn time_label(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format(TIME_FORMAT).to_string()
}

/// Render an optional instant as `DD-MM-YYYY HH:mm`, or `N/A` when absent.
pub fn datetime_label(instant: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    instant
        .map(|value| value.with_timezone(&offset).format(DATETIME_FORMAT).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
