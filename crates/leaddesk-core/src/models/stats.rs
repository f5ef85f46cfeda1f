//! Aggregate statistics for the dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default window for daily statistics.
pub const DEFAULT_DAILY_STATS_DAYS: u32 = 7;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewStats {
    pub total_leads: i64,
    pub active_leads: i64,
    pub closed_leads: i64,
    pub total_messages: i64,
    pub managers_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerStats {
    pub manager_id: i64,
    pub manager_name: String,
    pub total_leads: i64,
    pub active_leads: i64,
    pub closed_leads: i64,
    pub total_messages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub new_leads: i64,
    pub closed_leads: i64,
    pub messages_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Last24HoursStats {
    pub new_leads: i64,
    pub closed_leads: i64,
    pub messages_count: i64,
    pub active_conversations: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerStats24h {
    pub manager_id: i64,
    pub manager_name: String,
    pub new_leads: i64,
    pub closed_leads: i64,
    pub messages_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyManagerStats {
    pub date: NaiveDate,
    pub manager_id: i64,
    pub manager_name: String,
    pub new_leads: i64,
    pub closed_leads: i64,
    pub messages_count: i64,
}

/// Filters for `/stats/daily/managers`. Explicit dates take precedence over
/// `days` on the server side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyManagerStatsParams {
    pub days: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager_id: Option<i64>,
}

impl DailyManagerStatsParams {
    /// Query string pairs for the fields that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(days) = self.days {
            pairs.push(("days", days.to_string()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(id) = self.manager_id {
            pairs.push(("manager_id", id.to_string()));
        }
        pairs
    }
}
