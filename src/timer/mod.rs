pub mod controller;
pub mod state;

pub use controller::{PomodoroSnapshot, TimerController, TimerRecord};
pub use state::TimerState;
