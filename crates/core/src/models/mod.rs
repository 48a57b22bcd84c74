//! Shared domain models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Match record as delivered by the league backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Stable identifier.
    pub id: String,
    /// Scheduled kick-off.
    pub match_date: DateTime<Utc>,
    /// Venue name.
    #[serde(default)]
    pub stadium: String,
    /// Home team reference.
    pub home_team_id: String,
    /// Away team reference.
    pub away_team_id: String,
    /// Assigned referee reference.
    pub referee_id: String,
    /// Assigned observer reference.
    pub observer_id: String,
    /// Grade given to the referee, once recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referee_grade: Option<f64>,
    /// When the grade was submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referee_grade_date: Option<DateTime<Utc>>,
}

impl Match {
    /// Whether a grade value has been recorded.
    pub fn is_graded(&self) -> bool {
        self.referee_grade.is_some()
    }
}

/// Role of a league member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// League administrator.
    Admin,
    /// Observer grading referees.
    Observer,
    /// Match referee.
    Referee,
}

/// League team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// League member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role within the league.
    pub role: Role,
}

impl User {
    /// Returns the name shown next to a match, e.g. `Jane Doe`.
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            (first, "") => first.to_string(),
            ("", last) => last.to_string(),
            (first, last) => format!("{first} {last}"),
        }
    }
}

/// Teams and users available for name resolution.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teams: HashMap<String, Team>,
    users: HashMap<String, User>,
}

impl Roster {
    /// Build a roster from team and user listings.
    pub fn new(
        teams: impl IntoIterator<Item = Team>,
        users: impl IntoIterator<Item = User>,
    ) -> Self {
        Self {
            teams: teams.into_iter().map(|team| (team.id.clone(), team)).collect(),
            users: users.into_iter().map(|user| (user.id.clone(), user)).collect(),
        }
    }

    /// Look up a team by id.
    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.get(id)
    }

    /// Look up a user by id.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Number of teams known to the roster.
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Number of users known to the roster.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn match_deserializes_from_backend_payload() -> anyhow::Result<()> {
        let raw = json!({
            "id": "m-1",
            "matchDate": "2024-01-01T12:00:00Z",
            "stadium": "Arena",
            "homeTeamId": "t-1",
            "awayTeamId": "t-2",
            "refereeId": "u-1",
            "observerId": "u-2",
            "refereeGrade": 8.4,
            "refereeGradeDate": "2024-01-01T15:45:00Z"
        });
        let parsed: Match = serde_json::from_value(raw)?;
        assert!(parsed.is_graded());
        assert_eq!(parsed.referee_grade, Some(8.4));

        let ungraded: Match = serde_json::from_value(json!({
            "id": "m-2",
            "matchDate": "2024-01-01T12:00:00Z",
            "homeTeamId": "t-1",
            "awayTeamId": "t-2",
            "refereeId": "u-1",
            "observerId": "u-2"
        }))?;
        assert!(!ungraded.is_graded());
        assert!(ungraded.referee_grade_date.is_none());
        assert!(ungraded.stadium.is_empty());
        Ok(())
    }

    #[test]
    fn full_name_skips_blank_parts() {
        let mut user = User {
            id: "u-1".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            role: Role::Referee,
        };
        assert_eq!(user.full_name(), "Jane Doe");
        user.last_name = " ".to_string();
        assert_eq!(user.full_name(), "Jane");
    }

    #[test]
    fn roster_indexes_by_id() {
        let roster = Roster::new(
            vec![Team {
                id: "t-1".to_string(),
                name: "Lions".to_string(),
            }],
            Vec::new(),
        );
        assert_eq!(roster.team("t-1").map(|team| team.name.as_str()), Some("Lions"));
        assert!(roster.user("u-1").is_none());
        assert_eq!(roster.team_count(), 1);
        assert_eq!(roster.user_count(), 0);
    }
}
