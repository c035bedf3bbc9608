//! Time and duration helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp, e.g. a scheduled auto-shutdown.
pub type Timestamp = DateTime<Utc>;

/// Convert fractional Unix epoch seconds into a [`Timestamp`].
///
/// Returns `None` for values outside chrono's representable range or
/// non-finite input.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn from_epoch_seconds(epoch: f64) -> Option<Timestamp> {
    if !epoch.is_finite() {
        return None;
    }
    let millis = (epoch * 1000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// Render a number of seconds as `"{d}d {h}h {m}m"`, dropping the day part
/// when it is zero.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_epoch_seconds_to_timestamp() {
        let ts = from_epoch_seconds(1_700_000_000.5).unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
        assert_eq!(ts.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn should_reject_non_finite_epoch() {
        assert!(from_epoch_seconds(f64::NAN).is_none());
        assert!(from_epoch_seconds(f64::INFINITY).is_none());
    }

    #[test]
    fn should_format_duration_without_days() {
        assert_eq!(format_duration(0), "0h 0m");
        assert_eq!(format_duration(3_660), "1h 1m");
    }

    #[test]
    fn should_format_duration_with_days() {
        assert_eq!(format_duration(2 * 86_400 + 5 * 3_600 + 7 * 60 + 59), "2d 5h 7m");
    }
}
