//! Grouping and filtering of enriched matches for the grades panel.

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use crate::enrich::EnrichedMatch;
use crate::status::GradeStatus;

/// Tabs of the grades panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeTab {
    /// Every match.
    All,
    /// Only matches with the given status.
    Status(GradeStatus),
}

impl GradeTab {
    /// All tabs in display order.
    pub const ORDER: [GradeTab; 5] = [
        GradeTab::All,
        GradeTab::Status(GradeStatus::Received),
        GradeTab::Status(GradeStatus::Overdue),
        GradeTab::Status(GradeStatus::Pending),
        GradeTab::Status(GradeStatus::Expected),
    ];

    /// Tab caption.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Status(status) => status.label(),
        }
    }
}

/// Matches partitioned by status, each bucket in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeBuckets<'a> {
    /// Every match.
    pub all: Vec<&'a EnrichedMatch>,
    /// Received matches.
    pub received: Vec<&'a EnrichedMatch>,
    /// Overdue matches.
    pub overdue: Vec<&'a EnrichedMatch>,
    /// Pending matches.
    pub pending: Vec<&'a EnrichedMatch>,
    /// Expected matches.
    pub expected: Vec<&'a EnrichedMatch>,
}

impl<'a> GradeBuckets<'a> {
    /// Partition `matches` by their precomputed status.
    pub fn bucket<I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a EnrichedMatch>,
    {
        let mut buckets = Self::default();
        for enriched in matches {
            buckets.all.push(enriched);
            match enriched.status() {
                GradeStatus::Received => buckets.received.push(enriched),
                GradeStatus::Overdue => buckets.overdue.push(enriched),
                GradeStatus::Pending => buckets.pending.push(enriched),
                GradeStatus::Expected => buckets.expected.push(enriched),
            }
        }
        buckets
    }

    /// Search by `text`, then partition what is left.
    pub fn filtered(matches: &'a [EnrichedMatch], text: &str) -> Self {
        Self::bucket(search(matches, text))
    }

    /// Bucket backing a tab.
    pub fn tab(&self, tab: GradeTab) -> &[&'a EnrichedMatch] {
        match tab {
            GradeTab::All => &self.all,
            GradeTab::Status(status) => self.status(status),
        }
    }

    /// Bucket holding matches with `status`.
    pub fn status(&self, status: GradeStatus) -> &[&'a EnrichedMatch] {
        match status {
            GradeStatus::Received => &self.received,
            GradeStatus::Overdue => &self.overdue,
            GradeStatus::Pending => &self.pending,
            GradeStatus::Expected => &self.expected,
        }
    }
}

/// Partition `matches` by status.
pub fn bucket(matches: &[EnrichedMatch]) -> GradeBuckets<'_> {
    GradeBuckets::bucket(matches)
}

/// Case-insensitive substring search over team and official names.
///
/// Blank queries return every match. Input order is preserved.
pub fn search<'a>(matches: &'a [EnrichedMatch], text: &str) -> Vec<&'a EnrichedMatch> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return matches.iter().collect();
    }
    matches
        .iter()
        .filter(|enriched| enriched.search_text().contains(&needle))
        .collect()
}

/// Matches whose kick-off falls on `date` in the given offset.
pub fn matches_on<'a>(
    matches: &'a [EnrichedMatch],
    date: NaiveDate,
    offset: FixedOffset,
) -> Vec<&'a EnrichedMatch> {
    matches
        .iter()
        .filter(|enriched| enriched.match_date.with_timezone(&offset).date_naive() == date)
        .collect()
}

/// Per-status counts for the summary heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSummary {
    /// Number of matches counted.
    pub total: usize,
    /// Received matches.
    pub received: usize,
    /// Overdue matches.
    pub overdue: usize,
    /// Pending matches.
    pub pending: usize,
    /// Expected matches.
    pub expected: usize,
}

impl GradeSummary {
    /// Count `matches` by status.
    pub fn from_matches<'a, I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a EnrichedMatch>,
    {
        matches
            .into_iter()
            .fold(Self::default(), |mut summary, enriched| {
                summary.total += 1;
                match enriched.status() {
                    GradeStatus::Received => summary.received += 1,
                    GradeStatus::Overdue => summary.overdue += 1,
                    GradeStatus::Pending => summary.pending += 1,
                    GradeStatus::Expected => summary.expected += 1,
                }
                summary
            })
    }

    /// Count for one status.
    pub fn count(&self, status: GradeStatus) -> usize {
        match status {
            GradeStatus::Received => self.received,
            GradeStatus::Overdue => self.overdue,
            GradeStatus::Pending => self.pending,
            GradeStatus::Expected => self.expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::tests::{kickoff, raw_match, roster};
    use crate::enrich::MatchEnricher;
    use crate::models::Match;
    use chrono::{DateTime, Duration, Utc};

    fn fixture(now: DateTime<Utc>) -> crate::Result<Vec<EnrichedMatch>> {
        let roster = roster();
        let enricher = MatchEnricher::new(&roster);

        let received = Match {
            referee_grade: Some(8.0),
            referee_grade_date: Some(kickoff() + Duration::hours(3)),
            ..raw_match("received")
        };
        let overdue = raw_match("overdue");
        let expected = Match {
            match_date: now - Duration::hours(1),
            home_team_id: "t-3".to_string(),
            referee_id: "u-3".to_string(),
            ..raw_match("expected")
        };
        let late_received = Match {
            referee_grade: Some(6.0),
            referee_grade_date: Some(kickoff() + Duration::hours(7)),
            away_team_id: "t-3".to_string(),
            ..raw_match("late")
        };
        let upcoming = Match {
            match_date: now + Duration::days(1),
            ..raw_match("upcoming")
        };

        enricher.enrich_all(&[received, overdue, expected, late_received, upcoming], now)
    }

    fn ids(matches: &[&EnrichedMatch]) -> Vec<String> {
        matches.iter().map(|enriched| enriched.id.clone()).collect()
    }

    fn now() -> DateTime<Utc> {
        kickoff() + Duration::hours(8)
    }

    #[test]
    fn buckets_partition_by_status() -> crate::Result<()> {
        let matches = fixture(now())?;
        let buckets = bucket(&matches);

        assert_eq!(ids(&buckets.all), ["received", "overdue", "expected", "late", "upcoming"]);
        assert_eq!(ids(&buckets.received), ["received", "late"]);
        assert_eq!(ids(&buckets.overdue), ["overdue"]);
        assert_eq!(ids(&buckets.expected), ["expected", "upcoming"]);
        assert!(buckets.pending.is_empty());

        let covered: usize = GradeStatus::ALL
            .iter()
            .map(|status| buckets.status(*status).len())
            .sum();
        assert_eq!(covered, matches.len());
        assert_eq!(buckets.tab(GradeTab::All).len(), matches.len());
        assert_eq!(
            buckets.tab(GradeTab::Status(GradeStatus::Overdue)).len(),
            1
        );
        Ok(())
    }

    #[test]
    fn search_matches_names_case_insensitively() -> crate::Result<()> {
        let matches = fixture(now())?;

        assert_eq!(ids(&search(&matches, "VALLEY")), ["expected", "late"]);
        assert_eq!(ids(&search(&matches, "zielinski")), ["expected"]);
        assert_eq!(ids(&search(&matches, "nowak")).len(), matches.len());
        assert!(search(&matches, "nobody").is_empty());
        assert_eq!(search(&matches, "   ").len(), matches.len());
        assert_eq!(search(&matches, "").len(), matches.len());
        Ok(())
    }

    #[test]
    fn filtered_buckets_compose_search() -> crate::Result<()> {
        let matches = fixture(now())?;
        let buckets = GradeBuckets::filtered(&matches, "rovers");
        assert_eq!(ids(&buckets.all), ["expected", "late"]);
        assert_eq!(ids(&buckets.received), ["late"]);
        assert_eq!(ids(&buckets.expected), ["expected"]);
        Ok(())
    }

    #[test]
    fn summary_counts_statuses() -> crate::Result<()> {
        let matches = fixture(now())?;
        let summary = GradeSummary::from_matches(&matches);
        assert_eq!(
            summary,
            GradeSummary {
                total: 5,
                received: 2,
                overdue: 1,
                pending: 0,
                expected: 2,
            }
        );
        assert_eq!(summary.count(GradeStatus::Received), 2);
        Ok(())
    }

    #[test]
    fn matches_on_uses_local_calendar_day() -> crate::Result<()> {
        let matches = fixture(now())?;
        let utc = FixedOffset::east_opt(0).unwrap();
        let day = kickoff().date_naive();
        assert_eq!(ids(&matches_on(&matches, day, utc)), ["received", "overdue", "expected", "late"]);

        let next_day = day.succ_opt().unwrap();
        assert_eq!(ids(&matches_on(&matches, next_day, utc)), ["upcoming"]);

        let far_east = FixedOffset::east_opt(14 * 3600).unwrap();
        assert_eq!(ids(&matches_on(&matches, next_day, far_east)), ["received", "overdue", "expected", "late"]);
        Ok(())
    }

    #[test]
    fn tab_labels_in_order() {
        let labels: Vec<&str> = GradeTab::ORDER.iter().map(GradeTab::label).collect();
        assert_eq!(labels, ["All", "Received", "Overdue", "Pending", "Expected"]);
    }
}
