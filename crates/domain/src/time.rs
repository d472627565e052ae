//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp carried by every outbound vector.
pub type Timestamp = DateTime<Utc>;

/// Wire format of protocol timestamps: ISO 8601, UTC, no offset suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp the way the protocol expects it.
#[must_use]
pub fn format(ts: &Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_format_without_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 20, 12, 5, 9).unwrap();
        assert_eq!(format(&ts), "2024-03-20T12:05:09.000000");
    }

    #[test]
    fn should_keep_microseconds() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 20, 12, 5, 9).unwrap()
            + chrono::Duration::microseconds(26_490);
        assert_eq!(format(&ts), "2024-03-20T12:05:09.026490");
    }
}
