//! Aggregate moderation statistics and the current moderator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Today,
    #[default]
    Week,
    Month,
}

impl StatsPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            StatsPeriod::Today => "today",
            StatsPeriod::Week => "week",
            StatsPeriod::Month => "month",
        }
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Window the statistics are computed over. Explicit dates narrow the period.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsFilter {
    pub period: Option<StatsPeriod>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl StatsFilter {
    pub fn for_period(period: StatsPeriod) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }

    /// Query pairs for the statistics endpoints; absent or blank values are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(period) = self.period {
            pairs.push(("period", period.as_str().to_string()));
        }
        let dates = [("startDate", &self.start_date), ("endDate", &self.end_date)];
        for (key, value) in dates {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSummary {
    pub total_reviewed: u64,
    pub total_reviewed_today: u64,
    pub total_reviewed_this_week: u64,
    pub total_reviewed_this_month: u64,
    pub approved_percentage: f64,
    pub rejected_percentage: f64,
    pub request_changes_percentage: f64,
    /// Seconds.
    pub average_review_time: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityPoint {
    pub date: String,
    pub approved: u64,
    pub rejected: u64,
    pub request_changes: u64,
}

/// Share of each decision, in percent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecisionShare {
    pub approved: f64,
    pub rejected: f64,
    pub request_changes: f64,
}

/// Reviewed ads per category name.
pub type CategoryCounts = BTreeMap<String, u64>;

/// Everything the statistics screen shows for one filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsReport {
    pub summary: StatsSummary,
    pub activity: Vec<ActivityPoint>,
    pub decisions: DecisionShare,
    pub categories: CategoryCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moderator {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::{StatsFilter, StatsPeriod};

    #[test]
    fn blank_dates_are_left_out_of_the_query() {
        let filter = StatsFilter {
            period: Some(StatsPeriod::Month),
            start_date: Some("2026-01-01".to_string()),
            end_date: Some("  ".to_string()),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("period", "month".to_string()),
                ("startDate", "2026-01-01".to_string())
            ]
        );
    }

    #[test]
    fn empty_filter_has_no_query() {
        assert!(StatsFilter::default().query_pairs().is_empty());
    }
}
