use serde::{Deserialize, Serialize};

use crate::settings::PomodoroSettings;

/// Countdown snapshot owned by the timer state machine.
///
/// `is_active` says a phase is in flight (possibly paused); `is_running` says
/// the external one-second clock should be ticking it right now.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Seconds left in the current phase, floored at zero.
    pub time_remaining: u32,
    pub is_break: bool,
    pub is_running: bool,
    pub is_active: bool,
    /// Completed work cycles since the last reset.
    pub current_session: u32,
}

impl TimerState {
    pub fn idle(settings: &PomodoroSettings) -> Self {
        Self {
            time_remaining: settings.work_duration,
            is_break: false,
            is_running: false,
            is_active: false,
            current_session: 0,
        }
    }

    /// Planned length of the phase the countdown is currently in. The break
    /// arm distinguishes short and long breaks by the completed-cycle count.
    pub fn phase_duration(&self, settings: &PomodoroSettings) -> u32 {
        if !self.is_break {
            settings.work_duration
        } else if self.is_long_break(settings) {
            settings.long_break_duration
        } else {
            settings.break_duration
        }
    }

    pub fn is_long_break(&self, settings: &PomodoroSettings) -> bool {
        self.current_session > 0
            && self.current_session % settings.sessions_until_long_break == 0
    }
}
