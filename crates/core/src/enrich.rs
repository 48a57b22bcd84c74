#![allow(missing_docs)]

//! Builds the enriched view of a match shared by every grading surface.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{date_label, datetime_label, time_label, Clock};
use crate::config::GradingConfig;
use crate::error::{GradingError, ReferenceKind, Result};
use crate::models::{Match, Role, Roster};
use crate::status::{GradeAssessment, GradeStatus, GradeStatusCalculator};

/// Match plus derived grading state and display-ready names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMatch {
    pub id: String,
    pub match_date: DateTime<Utc>,
    pub stadium: String,
    pub home_team_id: String,
    pub home_team: String,
    pub away_team_id: String,
    pub away_team: String,
    pub referee_id: String,
    pub referee: String,
    pub observer_id: String,
    pub observer: String,
    pub referee_grade: Option<f64>,
    pub referee_grade_date: Option<DateTime<Utc>>,
    pub grade_status: GradeAssessment,
    /// `DD-MM-YYYY`.
    pub date_label: String,
    /// `HH:mm`.
    pub time_label: String,
    /// `DD-MM-YYYY HH:mm`, or `N/A` before a grade is submitted.
    pub grade_date_label: String,
}

/// Name and role of the person a grade row is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counterpart<'a> {
    pub name: &'a str,
    pub role: Role,
}

impl EnrichedMatch {
    pub fn status(&self) -> GradeStatus {
        self.grade_status.status
    }

    /// Participant shown to `viewer`: observers see the referee they grade,
    /// everyone else sees the observer.
    pub fn counterpart(&self, viewer: Role) -> Counterpart<'_> {
        self.counterpart_with(viewer == Role::Observer)
    }

    pub fn counterpart_with(&self, show_referee: bool) -> Counterpart<'_> {
        if show_referee {
            Counterpart {
                name: &self.referee,
                role: Role::Referee,
            }
        } else {
            Counterpart {
                name: &self.observer,
                role: Role::Observer,
            }
        }
    }

    /// Lowercased team and official names, space separated.
    pub fn search_text(&self) -> String {
        [
            self.home_team.as_str(),
            self.away_team.as_str(),
            self.referee.as_str(),
            self.observer.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Resolves roster names and attaches grade status to raw matches.
#[derive(Debug, Clone, Copy)]
pub struct MatchEnricher<'a> {
    roster: &'a Roster,
    calculator: GradeStatusCalculator,
    offset: FixedOffset,
}

impl<'a> MatchEnricher<'a> {
    /// Enricher with default windows and UTC labels.
    pub fn new(roster: &'a Roster) -> Self {
        Self {
            roster,
            calculator: GradeStatusCalculator::default(),
            offset: Utc.fix(),
        }
    }

    pub fn with_config(roster: &'a Roster, config: &GradingConfig) -> Self {
        Self {
            roster,
            calculator: config.calculator(),
            offset: config.offset(),
        }
    }

    pub fn calculator(&self) -> GradeStatusCalculator {
        self.calculator
    }

    /// Enrich one match as seen at `now`.
    ///
    /// Fails when a team or official is missing from the roster, or when the
    /// grade fields are half recorded.
    pub fn enrich(&self, record: &Match, now: DateTime<Utc>) -> Result<EnrichedMatch> {
        let grade_status = self
            .calculator
            .classify(
                record.match_date,
                record.referee_grade,
                record.referee_grade_date,
                now,
            )
            .map_err(|err| err.for_match(&record.id))?;

        let home_team = self.team_name(record, &record.home_team_id)?;
        let away_team = self.team_name(record, &record.away_team_id)?;
        let referee = self.user_name(record, &record.referee_id, ReferenceKind::Referee)?;
        let observer = self.user_name(record, &record.observer_id, ReferenceKind::Observer)?;

        debug!(match_id = %record.id, status = %grade_status.status, "enriched match");

        Ok(EnrichedMatch {
            id: record.id.clone(),
            match_date: record.match_date,
            stadium: record.stadium.clone(),
            home_team_id: record.home_team_id.clone(),
            home_team,
            away_team_id: record.away_team_id.clone(),
            away_team,
            referee_id: record.referee_id.clone(),
            referee,
            observer_id: record.observer_id.clone(),
            observer,
            referee_grade: record.referee_grade,
            referee_grade_date: record.referee_grade_date,
            grade_status,
            date_label: date_label(record.match_date, self.offset),
            time_label: time_label(record.match_date, self.offset),
            grade_date_label: datetime_label(record.referee_grade_date, self.offset),
        })
    }

    /// Enrich every match, keeping input order and stopping at the first failure.
    pub fn enrich_all(&self, records: &[Match], now: DateTime<Utc>) -> Result<Vec<EnrichedMatch>> {
        debug!(
            matches = records.len(),
            teams = self.roster.team_count(),
            users = self.roster.user_count(),
            %now,
            "enriching matches"
        );
        records.iter().map(|record| self.enrich(record, now)).collect()
    }

    /// Enrich every match against a single reading of `clock`.
    pub fn enrich_all_at<C: Clock + ?Sized>(
        &self,
        records: &[Match],
        clock: &C,
    ) -> Result<Vec<EnrichedMatch>> {
        self.enrich_all(records, clock.now())
    }

    fn team_name(&self, record: &Match, id: &str) -> Result<String> {
        self.roster
            .team(id)
            .map(|team| team.name.clone())
            .ok_or_else(|| unresolved(record, id, ReferenceKind::Team))
    }

    fn user_name(&self, record: &Match, id: &str, kind: ReferenceKind) -> Result<String> {
        self.roster
            .user(id)
            .map(|user| user.full_name())
            .ok_or_else(|| unresolved(record, id, kind))
    }
}

fn unresolved(record: &Match, id: &str, kind: ReferenceKind) -> GradingError {
    warn!(match_id = %record.id, %kind, id, "roster lookup failed");
    GradingError::ReferenceResolution {
        kind,
        id: id.to_string(),
        match_id: record.id.clone(),
    }
}
