//! Statistics aggregation: daily upserts as work sessions complete, plus the
//! weekly/monthly rollups and streak tracking recomputed by `update_stats`.

mod types;

pub use types::{
    DailyStat, MonthlyStat, PomodoroStats, StreakInterval, StreakRecord, WeeklyStat,
};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};

const DATE_FMT: &str = "%Y-%m-%d";
const MONTH_FMT: &str = "%Y-%m";

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

/// Monday that starts the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Fold a just-completed work session into today's daily bucket
/// (create-if-absent, else accumulate). Called from the phase switch.
pub fn record_completed_work(
    stats: &mut PomodoroStats,
    duration_secs: u32,
    interruptions: u32,
    now: DateTime<Utc>,
) {
    let today = date_key(now.date_naive());
    let work_minutes = f64::from(duration_secs) / 60.0;

    match stats.daily_stats.iter_mut().find(|day| day.date == today) {
        Some(day) => {
            day.total_work_time += work_minutes;
            day.completed_sessions += 1;
            day.total_interruptions += interruptions;
        }
        None => stats.daily_stats.push(DailyStat {
            date: today,
            total_work_time: work_minutes,
            total_break_time: 0.0,
            completed_sessions: 1,
            interrupted_sessions: u32::from(interruptions > 0),
            total_interruptions: interruptions,
            most_productive_hour: now.hour(),
        }),
    }
}

/// Recompute streaks and the current week/month rollups from the daily table.
/// Idempotent: with no new completed sessions, a second call changes nothing.
pub fn update_stats(stats: &mut PomodoroStats, daily_goal: u32, today: NaiveDate) {
    update_streak(stats, daily_goal, today);

    let week = week_start(today);
    update_weekly(stats, week, today);
    update_monthly(stats, week, today);
}

fn update_streak(stats: &mut PomodoroStats, daily_goal: u32, today: NaiveDate) {
    let today_str = date_key(today);
    let goal_met = stats
        .daily_stats
        .iter()
        .find(|day| day.date == today_str)
        .map(|day| day.total_work_time >= f64::from(daily_goal))
        .unwrap_or(false);

    let streaks = &mut stats.streaks;
    if goal_met {
        // Count each day at most once, no matter how often stats refresh.
        if streaks.last_goal_date.as_deref() != Some(today_str.as_str()) {
            streaks.current += 1;
            if streaks.current > streaks.longest {
                streaks.longest = streaks.current;
            }
            streaks.last_goal_date = Some(today_str);
        }
    } else if streaks.current > 0 {
        streaks.history.push(StreakInterval {
            start_date: date_key(today - Duration::days(i64::from(streaks.current))),
            end_date: date_key(today - Duration::days(1)),
            length: streaks.current,
        });
        streaks.current = 0;
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FMT).ok()
}

fn update_weekly(stats: &mut PomodoroStats, week: NaiveDate, today: NaiveDate) {
    let week_end = week + Duration::days(7);
    let (work, breaks, sessions) = stats
        .daily_stats
        .iter()
        .filter(|day| {
            parse_date(&day.date)
                .map(|date| date >= week && date < week_end)
                .unwrap_or(false)
        })
        .fold((0.0, 0.0, 0u32), |(work, breaks, sessions), day| {
            (
                work + day.total_work_time,
                breaks + day.total_break_time,
                sessions + day.completed_sessions,
            )
        });

    let week_key = date_key(week);
    let average = f64::from(sessions) / 7.0;
    match stats
        .weekly_stats
        .iter_mut()
        .find(|entry| entry.week_start == week_key)
    {
        Some(entry) => {
            entry.total_work_time = work;
            entry.total_break_time = breaks;
            entry.completed_sessions = sessions;
            entry.average_sessions_per_day = average;
        }
        None => stats.weekly_stats.push(WeeklyStat {
            week_start: week_key,
            total_work_time: work,
            total_break_time: breaks,
            completed_sessions: sessions,
            average_sessions_per_day: average,
            most_productive_day: date_key(today),
        }),
    }
}

fn update_monthly(stats: &mut PomodoroStats, week: NaiveDate, today: NaiveDate) {
    let month_key = today.format(MONTH_FMT).to_string();
    let (work, breaks, sessions) = stats
        .daily_stats
        .iter()
        .filter(|day| day.date.starts_with(&month_key))
        .fold((0.0, 0.0, 0u32), |(work, breaks, sessions), day| {
            (
                work + day.total_work_time,
                breaks + day.total_break_time,
                sessions + day.completed_sessions,
            )
        });

    // Fixed 30-day divisor regardless of calendar month length.
    let average = f64::from(sessions) / 30.0;
    match stats
        .monthly_stats
        .iter_mut()
        .find(|entry| entry.month == month_key)
    {
        Some(entry) => {
            entry.total_work_time = work;
            entry.total_break_time = breaks;
            entry.completed_sessions = sessions;
            entry.average_sessions_per_day = average;
        }
        None => stats.monthly_stats.push(MonthlyStat {
            month: month_key,
            total_work_time: work,
            total_break_time: breaks,
            completed_sessions: sessions,
            average_sessions_per_day: average,
            most_productive_week: date_key(week),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(date: &str, work_minutes: f64, sessions: u32) -> DailyStat {
        DailyStat {
            date: date.into(),
            total_work_time: work_minutes,
            total_break_time: 0.0,
            completed_sessions: sessions,
            interrupted_sessions: 0,
            total_interruptions: 0,
            most_productive_hour: 9,
        }
    }

    #[test]
    fn record_creates_then_accumulates_daily_bucket() {
        let mut stats = PomodoroStats::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 14, 30, 0).unwrap();

        record_completed_work(&mut stats, 1500, 2, now);
        assert_eq!(stats.daily_stats.len(), 1);
        let bucket = &stats.daily_stats[0];
        assert_eq!(bucket.date, "2024-03-04");
        assert_eq!(bucket.total_work_time, 25.0);
        assert_eq!(bucket.completed_sessions, 1);
        assert_eq!(bucket.interrupted_sessions, 1);
        assert_eq!(bucket.total_interruptions, 2);
        assert_eq!(bucket.most_productive_hour, 14);

        record_completed_work(&mut stats, 1500, 0, now);
        assert_eq!(stats.daily_stats.len(), 1);
        let bucket = &stats.daily_stats[0];
        assert_eq!(bucket.total_work_time, 50.0);
        assert_eq!(bucket.completed_sessions, 2);
        assert_eq!(bucket.total_interruptions, 2);
    }

    #[test]
    fn streak_increments_once_per_goal_day() {
        let mut stats = PomodoroStats::default();
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        stats.daily_stats.push(day("2024-03-04", 200.0, 8));

        update_stats(&mut stats, 8, today);
        assert_eq!(stats.streaks.current, 1);
        assert_eq!(stats.streaks.longest, 1);

        // Second refresh the same day must not double-count.
        update_stats(&mut stats, 8, today);
        assert_eq!(stats.streaks.current, 1);
        assert_eq!(stats.streaks.longest, 1);
    }

    #[test]
    fn streak_grows_across_consecutive_days() {
        let mut stats = PomodoroStats::default();
        for (date, day_num) in [("2024-03-04", 4), ("2024-03-05", 5), ("2024-03-06", 6)] {
            stats.daily_stats.push(day(date, 210.0, 8));
            let today = NaiveDate::from_ymd_opt(2024, 3, day_num).unwrap();
            update_stats(&mut stats, 8, today);
        }
        assert_eq!(stats.streaks.current, 3);
        assert_eq!(stats.streaks.longest, 3);
    }

    #[test]
    fn missed_goal_closes_streak_into_history() {
        let mut stats = PomodoroStats::default();
        stats.daily_stats.push(day("2024-03-04", 210.0, 8));
        stats.daily_stats.push(day("2024-03-05", 210.0, 8));
        update_stats(&mut stats, 8, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        update_stats(&mut stats, 8, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(stats.streaks.current, 2);

        // No work logged on the 6th.
        update_stats(&mut stats, 8, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(stats.streaks.current, 0);
        assert_eq!(stats.streaks.longest, 2);
        assert_eq!(
            stats.streaks.history,
            vec![StreakInterval {
                start_date: "2024-03-04".into(),
                end_date: "2024-03-05".into(),
                length: 2,
            }]
        );

        // Idempotent after the close as well.
        update_stats(&mut stats, 8, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(stats.streaks.history.len(), 1);
    }

    #[test]
    fn weekly_rollup_sums_the_monday_window() {
        let mut stats = PomodoroStats::default();
        stats.daily_stats.push(day("2024-03-04", 50.0, 2)); // Monday
        stats.daily_stats.push(day("2024-03-06", 25.0, 1)); // Wednesday
        stats.daily_stats.push(day("2024-03-11", 75.0, 3)); // next Monday

        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        update_stats(&mut stats, 8, today);

        assert_eq!(stats.weekly_stats.len(), 1);
        let week = &stats.weekly_stats[0];
        assert_eq!(week.week_start, "2024-03-04");
        assert_eq!(week.total_work_time, 75.0);
        assert_eq!(week.completed_sessions, 3);
        assert_eq!(week.average_sessions_per_day, 3.0 / 7.0);
        assert_eq!(week.most_productive_day, "2024-03-06");
    }

    #[test]
    fn monthly_rollup_uses_fixed_thirty_day_divisor() {
        let mut stats = PomodoroStats::default();
        stats.daily_stats.push(day("2024-02-01", 25.0, 1));
        stats.daily_stats.push(day("2024-02-29", 50.0, 2));
        stats.daily_stats.push(day("2024-03-01", 25.0, 1));

        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        update_stats(&mut stats, 8, today);

        assert_eq!(stats.monthly_stats.len(), 1);
        let month = &stats.monthly_stats[0];
        assert_eq!(month.month, "2024-02");
        assert_eq!(month.total_work_time, 75.0);
        assert_eq!(month.completed_sessions, 3);
        assert_eq!(month.average_sessions_per_day, 3.0 / 30.0);
    }

    #[test]
    fn update_stats_is_idempotent_for_rollups() {
        let mut stats = PomodoroStats::default();
        stats.daily_stats.push(day("2024-03-04", 50.0, 2));
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        update_stats(&mut stats, 8, today);
        let first = stats.clone();
        update_stats(&mut stats, 8, today);
        assert_eq!(stats, first);
    }

    #[test]
    fn week_start_is_monday() {
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(week_start(monday), monday);
    }
}
