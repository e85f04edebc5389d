//! Point-in-time copy of the full employee list.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use super::Employee;

/// Immutable list of employees fetched together.
///
/// A snapshot is replaced wholesale on refresh; it is never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<Employee>,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Capture `entries` as fetched at `fetched_at`.
    #[must_use]
    pub fn new(entries: Vec<Employee>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            entries,
            fetched_at,
        }
    }

    /// Entries in upstream order.
    #[must_use]
    pub fn entries(&self) -> &[Employee] {
        self.entries.as_slice()
    }

    /// Instant the upstream list call completed.
    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Whether the snapshot is still younger than `ttl` at `now`.
    ///
    /// A zero TTL is never fresh. A `now` earlier than the fetch instant means
    /// the clock stepped backwards, so the snapshot is treated as stale. A TTL
    /// reaching past the representable date range never expires.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    ///
    /// use chrono::{TimeDelta, TimeZone, Utc};
    /// use directory_gateway::domain::Snapshot;
    ///
    /// let fetched = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("valid time");
    /// let snapshot = Snapshot::new(Vec::new(), fetched);
    /// let ttl = Duration::from_secs(30);
    /// assert!(snapshot.is_fresh(fetched + TimeDelta::seconds(29), ttl));
    /// assert!(!snapshot.is_fresh(fetched + TimeDelta::seconds(30), ttl));
    /// ```
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if now < self.fetched_at {
            return false;
        }
        TimeDelta::from_std(ttl)
            .ok()
            .and_then(|window| self.fetched_at.checked_add_signed(window))
            .is_none_or(|expiry| now < expiry)
    }
}
