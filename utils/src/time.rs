//! Time formatting helpers.

use std::time::Duration;

/// Format an elapsed duration for log output, e.g. `850ms`, `12.40s`, `3m 5s`.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs == 0 {
        format!("{}ms", elapsed.as_millis())
    } else if secs < 60 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_range() {
        assert_eq!(format_duration(Duration::from_millis(850)), "850ms");
        assert_eq!(format_duration(Duration::from_millis(12_400)), "12.40s");
        assert_eq!(format_duration(Duration::from_secs(185)), "3m 5s");
        assert_eq!(format_duration(Duration::from_secs(7_380)), "2h 3m");
    }
}
