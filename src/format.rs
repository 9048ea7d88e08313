//! Compact human-readable durations for crack-time display.

use crate::score::{DAY, HOUR, MINUTE, YEAR};

/// Formats a duration in seconds using its largest whole unit.
///
/// Non-finite input renders as `∞`, non-positive as `0s`, and very long
/// spans collapse to `> 1K years`, `> 1M years` or `> 1B years`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "∞".to_string();
    }
    if seconds <= 0.0 {
        return "0s".to_string();
    }

    let seconds = seconds.floor();
    if seconds < MINUTE {
        return format!("{seconds:.0}s");
    }
    if seconds < HOUR {
        return format!("{:.0}m", (seconds / MINUTE).floor());
    }
    if seconds < DAY {
        return format!("{:.0}h", (seconds / HOUR).floor());
    }
    if seconds < YEAR {
        return format!("{:.0}d", (seconds / DAY).floor());
    }

    let years = (seconds / YEAR).floor();
    if years > 1e9 {
        "> 1B years".to_string()
    } else if years > 1e6 {
        "> 1M years".to_string()
    } else if years > 1e3 {
        "> 1K years".to_string()
    } else {
        format!("{years:.0}y")
    }
}
