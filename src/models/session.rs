use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which countdown mode a ledgered session belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SessionKind {
    Work,
    Break,
    LongBreak,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
            SessionKind::LongBreak => "long-break",
        }
    }
}

/// A pause recorded against an open session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Interruption {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reason: String,
}

/// One ledgered work or break interval. Created when a work phase starts,
/// completed when the phase naturally expires, and left incomplete (with an
/// end timestamp) if the timer is reset mid-cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub completed: bool,
    /// Planned length in seconds.
    pub duration: u32,
    pub interruptions: Vec<Interruption>,
}

impl Session {
    pub fn new_work(id: String, start_time: DateTime<Utc>, duration: u32) -> Self {
        Self {
            id,
            start_time,
            end_time: None,
            kind: SessionKind::Work,
            completed: false,
            duration,
            interruptions: Vec::new(),
        }
    }

    /// Open means neither completed nor abandoned.
    pub fn is_open(&self) -> bool {
        !self.completed && self.end_time.is_none()
    }
}
