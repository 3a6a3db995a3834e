//! Demo runner: the external collaborator that owns the one-second clock.
//!
//! Runs `taskmaster [cycles]` work/break cycles against the real clock,
//! calling `switch_phase` exactly once per zero crossing and persisting at
//! every phase boundary. `RUST_LOG=debug` for verbose output.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::info;

use taskmaster::{
    utils::format::format_clock, KvStore, PomodoroSettings, SystemClock, TimerController,
};

fn data_dir() -> Result<std::path::PathBuf> {
    let base = dirs::data_local_dir().ok_or_else(|| anyhow!("no local data directory"))?;
    Ok(base.join("taskmaster"))
}

fn run_phase(timer: &mut TimerController, label: &str) {
    while timer.state().time_remaining > 0 {
        thread::sleep(Duration::from_secs(1));
        timer.tick();
        print!("\r{} {}  ", label, format_clock(timer.state().time_remaining));
        let _ = std::io::stdout().flush();
    }
    println!();
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cycles: u32 = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid cycle count '{arg}'"))?,
        None => 1,
    };

    let store = KvStore::open(data_dir()?.join("taskmaster.sqlite3"))?;
    let mut timer = TimerController::load(&store, Box::new(SystemClock))
        .unwrap_or_else(|err| {
            log::warn!("Starting fresh, could not load saved state: {err:#}");
            TimerController::with_system_clock(PomodoroSettings::default())
        });

    info!(
        "Running {cycles} work cycle(s) of {} each",
        format_clock(timer.settings().work_duration)
    );

    for cycle in 1..=cycles {
        timer.start();
        run_phase(&mut timer, "work ");
        timer.switch_phase();
        timer.update_stats();
        timer.save(&store)?;

        let completed = timer.stats().daily_stats.last().map(|d| d.completed_sessions);
        info!(
            "Cycle {cycle}/{cycles} complete ({} sessions today, streak {})",
            completed.unwrap_or(0),
            timer.stats().streaks.current
        );

        if cycle < cycles {
            timer.start();
            run_phase(&mut timer, "break");
            timer.switch_phase();
            timer.save(&store)?;
        }
    }

    timer.save(&store)?;
    Ok(())
}
