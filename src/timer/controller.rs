use anyhow::{anyhow, Result};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    clock::{Clock, SystemClock},
    models::{Interruption, Session},
    settings::{PomodoroSettings, SettingsPatch},
    stats::{self, PomodoroStats},
    store::{keys, KvStore},
};

use super::TimerState;

/// Default daily goal, in minutes of focus time.
pub const DEFAULT_DAILY_GOAL: u32 = 8;

const MANUAL_PAUSE: &str = "manual_pause";

/// The timer slice as persisted: countdown state plus the counters that ride
/// along with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    pub state: TimerState,
    pub total_focus_time: u64,
    pub daily_goal: u32,
}

/// Read-only view handed to the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSnapshot {
    pub state: TimerState,
    pub settings: PomodoroSettings,
    pub sessions: Vec<Session>,
    pub stats: PomodoroStats,
    pub total_focus_time: u64,
    pub daily_goal: u32,
}

/// The Pomodoro state machine. Owns the countdown, the session ledger, and
/// the derived statistics; the surrounding UI dispatches commands and reads
/// snapshots. Single writer, no interior locking: the caller sequences every
/// operation, including calling `switch_phase` exactly once when the
/// countdown crosses zero.
pub struct TimerController {
    settings: PomodoroSettings,
    state: TimerState,
    sessions: Vec<Session>,
    stats: PomodoroStats,
    total_focus_time: u64,
    daily_goal: u32,
    clock: Box<dyn Clock>,
}

impl TimerController {
    pub fn new(settings: PomodoroSettings, clock: Box<dyn Clock>) -> Self {
        let state = TimerState::idle(&settings);
        Self {
            settings,
            state,
            sessions: Vec::new(),
            stats: PomodoroStats::default(),
            total_focus_time: 0,
            daily_goal: DEFAULT_DAILY_GOAL,
            clock,
        }
    }

    pub fn with_system_clock(settings: PomodoroSettings) -> Self {
        Self::new(settings, Box::new(SystemClock))
    }

    /// Begin (or resume) the countdown. Entering a work phase opens a fresh
    /// ledger entry; resuming into a break does not.
    pub fn start(&mut self) {
        self.state.is_active = true;
        self.state.is_running = true;

        if !self.state.is_break {
            let session = Session::new_work(
                Uuid::new_v4().to_string(),
                self.clock.now(),
                self.settings.work_duration,
            );
            info!("Opened work session {}", session.id);
            self.sessions.push(session);
        }
    }

    /// Halt the countdown. A pause during work is recorded against the open
    /// session as a zero-length interruption stamped at the pause instant.
    pub fn pause(&mut self) {
        self.state.is_active = false;
        self.state.is_running = false;

        if !self.state.is_break {
            let now = self.clock.now();
            if let Some(session) = self.sessions.last_mut() {
                session.interruptions.push(Interruption {
                    start_time: now,
                    end_time: now,
                    reason: MANUAL_PAUSE.into(),
                });
            }
        }
    }

    /// Return to Idle at the top of a work phase. A still-open session is
    /// stamped with an end time but never marked completed; it stays in the
    /// ledger as abandoned.
    pub fn reset(&mut self) {
        self.state.is_active = false;
        self.state.is_running = false;
        self.state.time_remaining = self.settings.work_duration;
        self.state.is_break = false;
        self.state.current_session = 0;

        let now = self.clock.now();
        if let Some(session) = self.sessions.last_mut() {
            if !session.completed {
                warn!("Abandoning session {} on reset", session.id);
                session.end_time = Some(now);
            }
        }
    }

    /// One second of countdown. Floors at zero and never switches phase;
    /// the caller invokes `switch_phase` on observing zero.
    pub fn tick(&mut self) {
        if self.state.time_remaining > 0 {
            self.state.time_remaining -= 1;
        }
    }

    /// Phase transition, invoked when the countdown reaches zero. Completes
    /// the open work session, folds it into today's stats, advances to the
    /// next phase, and applies the auto-start settings.
    pub fn switch_phase(&mut self) {
        let now = self.clock.now();

        if !self.state.is_break {
            if let Some(session) = self.sessions.last_mut() {
                session.completed = true;
                session.end_time = Some(now);
                self.total_focus_time += u64::from(session.duration / 60);
                stats::record_completed_work(
                    &mut self.stats,
                    session.duration,
                    session.interruptions.len() as u32,
                    now,
                );
                info!(
                    "Completed work session {} ({} interruptions)",
                    session.id,
                    session.interruptions.len()
                );
            }
        }

        if self.state.is_break {
            self.state.is_break = false;
            self.state.time_remaining = self.settings.work_duration;
        } else {
            self.state.current_session += 1;
            self.state.is_break = true;
            self.state.time_remaining =
                if self.state.current_session % self.settings.sessions_until_long_break == 0 {
                    self.settings.long_break_duration
                } else {
                    self.settings.break_duration
                };
        }

        self.state.is_active = if self.state.is_break {
            self.settings.auto_start_breaks
        } else {
            self.settings.auto_start_pomodoros
        };
        self.state.is_running = self.state.is_active;
    }

    /// Merge a partial settings update. Validation failures leave everything
    /// untouched. When no phase is in flight the countdown resynchronizes to
    /// the current phase's (possibly changed) duration; an active countdown
    /// keeps running until the next phase switch.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<()> {
        patch.validate()?;
        self.settings.apply(patch);

        if !self.state.is_active {
            self.state.time_remaining = self.state.phase_duration(&self.settings);
        }
        Ok(())
    }

    /// Recompute streaks and weekly/monthly rollups from the daily table.
    pub fn update_stats(&mut self) {
        stats::update_stats(&mut self.stats, self.daily_goal, self.clock.now().date_naive());
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn stats(&self) -> &PomodoroStats {
        &self.stats
    }

    pub fn total_focus_time(&self) -> u64 {
        self.total_focus_time
    }

    pub fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    pub fn set_daily_goal(&mut self, minutes: u32) {
        self.daily_goal = minutes;
    }

    pub fn snapshot(&self) -> PomodoroSnapshot {
        PomodoroSnapshot {
            state: self.state.clone(),
            settings: self.settings.clone(),
            sessions: self.sessions.clone(),
            stats: self.stats.clone(),
            total_focus_time: self.total_focus_time,
            daily_goal: self.daily_goal,
        }
    }

    /// Rebuild the core from the key-value store, substituting defaults for
    /// any record absent on first run.
    pub fn load(store: &KvStore, clock: Box<dyn Clock>) -> Result<Self> {
        let settings: PomodoroSettings = store.get_json(keys::SETTINGS)?.unwrap_or_default();
        let record: Option<TimerRecord> = store.get_json(keys::TIMER)?;
        let sessions: Vec<Session> = store.get_json(keys::SESSIONS)?.unwrap_or_default();
        let stats: PomodoroStats = store.get_json(keys::STATS)?.unwrap_or_default();

        let (state, total_focus_time, daily_goal) = match record {
            Some(record) => (record.state, record.total_focus_time, record.daily_goal),
            None => (TimerState::idle(&settings), 0, DEFAULT_DAILY_GOAL),
        };

        Ok(Self {
            settings,
            state,
            sessions,
            stats,
            total_focus_time,
            daily_goal,
            clock,
        })
    }

    /// Persist all four slices. Each record is written independently; one
    /// failing write does not stop the others, and every failure is reported.
    pub fn save(&self, store: &KvStore) -> Result<()> {
        let timer_record = TimerRecord {
            state: self.state.clone(),
            total_focus_time: self.total_focus_time,
            daily_goal: self.daily_goal,
        };

        let writes: [(&str, Result<()>); 4] = [
            (keys::SETTINGS, store.put_json(keys::SETTINGS, &self.settings)),
            (keys::TIMER, store.put_json(keys::TIMER, &timer_record)),
            (keys::SESSIONS, store.put_json(keys::SESSIONS, &self.sessions)),
            (keys::STATS, store.put_json(keys::STATS, &self.stats)),
        ];

        let mut failures = Vec::new();
        for (key, result) in writes {
            if let Err(err) = result {
                error!("Failed to persist '{key}': {err:#}");
                failures.push(format!("{key}: {err:#}"));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("failed to persist: {}", failures.join("; ")))
        }
    }
}
