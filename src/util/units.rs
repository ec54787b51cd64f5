//! Units formatting utilities
//!
//! Human-readable formatting of run durations and iteration rates.

use std::time::Duration;

/// Format a duration with the coarsest fitting units
///
/// # Examples
/// ```
/// use rnbench::util::units::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(30)), "30s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 3600 {
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if total_secs >= 60 {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{}m {}s", minutes, seconds)
    } else if total_secs > 0 {
        if millis >= 10 {
            format!("{}.{:02}s", total_secs, millis / 10)
        } else {
            format!("{}s", total_secs)
        }
    } else {
        format!("{}ms", millis)
    }
}

/// Iterations completed per second; zero for an empty duration
pub fn iterations_per_second(iterations: u32, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        iterations as f64 / secs
    } else {
        0.0
    }
}

/// Format an iteration rate with K/M suffixes
pub fn format_rate(per_second: f64) -> String {
    if per_second >= 1_000_000.0 {
        format!("{:.1}M it/s", per_second / 1_000_000.0)
    } else if per_second >= 1_000.0 {
        format!("{:.1}K it/s", per_second / 1_000.0)
    } else {
        format!("{:.1} it/s", per_second)
    }
}
