use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Configurable timer durations and behavior. All durations are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    pub work_duration: u32,
    pub break_duration: u32,
    pub long_break_duration: u32,
    pub sessions_until_long_break: u32,
    pub auto_start_breaks: bool,
    pub auto_start_pomodoros: bool,
    pub alarm_sound: String,
    pub tick_sound: bool,
    pub volume: f32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_duration: 25 * 60,
            break_duration: 5 * 60,
            long_break_duration: 15 * 60,
            sessions_until_long_break: 4,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
            alarm_sound: "bell".into(),
            tick_sound: true,
            volume: 0.7,
        }
    }
}

impl PomodoroSettings {
    /// Longest duration any phase can have under these settings.
    pub fn max_phase_duration(&self) -> u32 {
        self.work_duration
            .max(self.break_duration)
            .max(self.long_break_duration)
    }

    /// Merge a validated patch into these settings.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(value) = patch.work_duration {
            self.work_duration = value;
        }
        if let Some(value) = patch.break_duration {
            self.break_duration = value;
        }
        if let Some(value) = patch.long_break_duration {
            self.long_break_duration = value;
        }
        if let Some(value) = patch.sessions_until_long_break {
            self.sessions_until_long_break = value;
        }
        if let Some(value) = patch.auto_start_breaks {
            self.auto_start_breaks = value;
        }
        if let Some(value) = patch.auto_start_pomodoros {
            self.auto_start_pomodoros = value;
        }
        if let Some(ref value) = patch.alarm_sound {
            self.alarm_sound = value.clone();
        }
        if let Some(value) = patch.tick_sound {
            self.tick_sound = value;
        }
        if let Some(value) = patch.volume {
            self.volume = value;
        }
    }
}

/// Partial settings update as dispatched by the UI layer. Absent fields are
/// left untouched on merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub work_duration: Option<u32>,
    pub break_duration: Option<u32>,
    pub long_break_duration: Option<u32>,
    pub sessions_until_long_break: Option<u32>,
    pub auto_start_breaks: Option<bool>,
    pub auto_start_pomodoros: Option<bool>,
    pub alarm_sound: Option<String>,
    pub tick_sound: Option<bool>,
    pub volume: Option<f32>,
}

impl SettingsPatch {
    /// Reject invalid values before any field is merged.
    pub fn validate(&self) -> Result<()> {
        if self.work_duration == Some(0) {
            return Err(anyhow!("workDuration must be greater than zero"));
        }
        if self.break_duration == Some(0) {
            return Err(anyhow!("breakDuration must be greater than zero"));
        }
        if self.long_break_duration == Some(0) {
            return Err(anyhow!("longBreakDuration must be greater than zero"));
        }
        if self.sessions_until_long_break == Some(0) {
            return Err(anyhow!("sessionsUntilLongBreak must be greater than zero"));
        }
        if let Some(volume) = self.volume {
            if !(0.0..=1.0).contains(&volume) {
                return Err(anyhow!("volume must be between 0 and 1, got {volume}"));
            }
        }
        Ok(())
    }
}
