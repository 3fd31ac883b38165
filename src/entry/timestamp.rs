//! Millisecond-precision entry timestamps.
//!
//! A `Timestamp` is the identity of a journal entry: its decimal rendering is
//! the on-disk filename, and its local-calendar day is the grouping key for
//! the listing. There is no separate surrogate ID.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch.
///
/// Ordering, equality and hashing all follow the underlying integer, so a
/// `Timestamp` works directly as a map key and sorts chronologically.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The current instant.
    ///
    /// With the `backdate-new-entries` feature enabled, the result is shifted
    /// back by one day so freshly created entries land on yesterday's listing.
    pub fn now() -> Self {
        let millis = Utc::now().timestamp_millis();
        if cfg!(feature = "backdate-new-entries") {
            Timestamp(millis - Duration::days(1).num_milliseconds())
        } else {
            Timestamp(millis)
        }
    }

    /// Builds a timestamp from raw milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Raw milliseconds since the Unix epoch.
    pub fn millis(self) -> i64 {
        self.0
    }

    /// Renders the storage key for this timestamp.
    ///
    /// The decimal millisecond count IS the entry's filename in the archive
    /// directory.
    pub fn file_stem(self) -> String {
        self.0.to_string()
    }

    /// Parses a storage key back into a timestamp.
    ///
    /// Returns `None` for anything that is not a plain decimal integer, which
    /// lets directory scans skip foreign files quietly.
    pub fn parse_file_stem(stem: &str) -> Option<Self> {
        stem.parse::<i64>().ok().map(Timestamp)
    }

    /// The local-calendar date this instant falls on.
    pub fn day(self) -> NaiveDate {
        self.datetime().date_naive()
    }

    /// The timestamp of local midnight on this instant's day.
    ///
    /// Day-level search index entries are represented by this value, so every
    /// entry of a given day maps to the same day timestamp.
    pub fn start_of_day(self) -> Timestamp {
        let midnight = self.day().and_time(NaiveTime::MIN);
        // DST transitions can make local midnight ambiguous or skip it
        // entirely; take the earliest valid instant of the day.
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .or_else(|| {
                Local
                    .from_local_datetime(&(midnight + Duration::hours(1)))
                    .earliest()
            })
            .map(|dt| Timestamp(dt.timestamp_millis()))
            .unwrap_or(self)
    }

    fn datetime(self) -> DateTime<Local> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
            .unwrap_or(DateTime::UNIX_EPOCH)
            .with_timezone(&Local)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
