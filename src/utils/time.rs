use chrono::{DateTime, Duration, Timelike, Utc};

/// Display format used for demo alert timestamps.
pub const SAMPLE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A closed `[since, until]` window ending at an anchor instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeWindow {
    /// The `length` immediately preceding `anchor`, `anchor` included.
    pub fn trailing(anchor: DateTime<Utc>, length: Duration) -> Self {
        Self {
            since: anchor - length,
            until: anchor,
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.since && timestamp <= self.until
    }
}

/// Hour of day in UTC, 0..=23.
pub fn utc_hour(timestamp: DateTime<Utc>) -> u32 {
    timestamp.hour()
}

/// Timestamp `hours` before `reference`, formatted for demo payloads.
pub fn format_hours_before(reference: DateTime<Utc>, hours: i64) -> String {
    (reference - Duration::hours(hours))
        .format(SAMPLE_TIMESTAMP_FORMAT)
        .to_string()
}
