use serde::{Deserialize, Serialize};

/// Rollup for a single day, keyed by "YYYY-MM-DD". Work/break time is in
/// minutes and fractional (planned seconds / 60).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: String,
    pub total_work_time: f64,
    pub total_break_time: f64,
    pub completed_sessions: u32,
    pub interrupted_sessions: u32,
    pub total_interruptions: u32,
    pub most_productive_hour: u32,
}

/// Rollup for one week, keyed by the Monday that starts it ("YYYY-MM-DD").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStat {
    pub week_start: String,
    pub total_work_time: f64,
    pub total_break_time: f64,
    pub completed_sessions: u32,
    pub average_sessions_per_day: f64,
    pub most_productive_day: String,
}

/// Rollup for one month, keyed by "YYYY-MM". The per-day average divides by a
/// fixed 30 regardless of the month's actual length (kept for compatibility
/// with historical data).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    pub month: String,
    pub total_work_time: f64,
    pub total_break_time: f64,
    pub completed_sessions: u32,
    pub average_sessions_per_day: f64,
    pub most_productive_week: String,
}

/// A closed run of consecutive goal-meeting days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreakInterval {
    pub start_date: String,
    pub end_date: String,
    pub length: u32,
}

/// Consecutive days meeting the daily focus-time goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub current: u32,
    pub longest: u32,
    pub history: Vec<StreakInterval>,
    /// Last date already counted toward the current streak. Guards the
    /// increment so recomputing stats twice in one day is a no-op.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_goal_date: Option<String>,
}

/// All derived statistics, recomputed from the session ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroStats {
    pub daily_stats: Vec<DailyStat>,
    pub weekly_stats: Vec<WeeklyStat>,
    pub monthly_stats: Vec<MonthlyStat>,
    pub streaks: StreakRecord,
}
