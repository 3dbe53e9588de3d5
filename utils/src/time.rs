//! Human-readable durations for CLI output.

use std::time::Duration;

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Render a duration using its two most significant non-zero units.
///
/// Sub-second durations render as milliseconds.
pub fn format_duration(d: Duration) -> String {
    let mut remaining = d.as_secs();
    if remaining == 0 {
        return format!("{}ms", d.subsec_millis());
    }
    let mut parts = Vec::with_capacity(2);
    for (size, suffix) in UNITS {
        if parts.len() == 2 {
            break;
        }
        let count = remaining / size;
        if count > 0 {
            parts.push(format!("{count}{suffix}"));
            remaining %= size;
        } else if !parts.is_empty() {
            break;
        }
    }
    parts.join(" ")
}
