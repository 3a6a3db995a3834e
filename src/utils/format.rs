//! Display helpers for the countdown: mm:ss rendering and phase progress.

/// Format a second count as "mm:ss". Minutes are not clamped to two digits,
/// so a 90-minute deep-work phase renders as "90:00".
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Fraction of the current phase already elapsed, in [0, 1].
pub fn phase_progress(remaining: u32, total: u32) -> f64 {
    if total == 0 {
        return 1.0;
    }
    let elapsed = total.saturating_sub(remaining);
    f64::from(elapsed) / f64::from(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(5400), "90:00");
    }

    #[test]
    fn progress_fraction() {
        assert_eq!(phase_progress(1500, 1500), 0.0);
        assert_eq!(phase_progress(750, 1500), 0.5);
        assert_eq!(phase_progress(0, 1500), 1.0);
    }

    #[test]
    fn progress_with_zero_total_is_complete() {
        assert_eq!(phase_progress(0, 0), 1.0);
    }

    #[test]
    fn progress_clamps_overlong_remaining() {
        // remaining should never exceed total, but saturate rather than wrap
        assert_eq!(phase_progress(2000, 1500), 0.0);
    }
}
