//! Pomodoro timer and progress statistics core.
//!
//! The crate owns the countdown state machine, the append-only session
//! ledger, and the daily/weekly/monthly/streak rollups derived from it. The
//! surrounding UI layer dispatches commands (`start`, `pause`, `reset`,
//! `tick`, `switch_phase`, `update_settings`, `update_stats`), owns the
//! one-second clock while the timer is running, and reads state snapshots
//! for display. State persists best-effort to a local key-value store, one
//! JSON record per slice.

pub mod clock;
pub mod models;
pub mod settings;
pub mod stats;
pub mod store;
pub mod timer;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{Interruption, Session, SessionKind};
pub use settings::{PomodoroSettings, SettingsPatch};
pub use stats::{
    DailyStat, MonthlyStat, PomodoroStats, StreakInterval, StreakRecord, WeeklyStat,
};
pub use store::KvStore;
pub use timer::{PomodoroSnapshot, TimerController, TimerRecord, TimerState};
