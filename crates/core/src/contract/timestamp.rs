//! Microsecond-precision record timestamps
//!
//! Every record carries `created_at` and `modified_at`. Both are stored in
//! documents as plain JSON integers (microseconds since the Unix epoch), so
//! any store that can hold a number can hold a timestamp.
//!
//! ## Monotonicity
//!
//! `Timestamp::now()` never returns the same value twice within a process.
//! Two saves of the same record in the same microsecond still produce a
//! strictly larger `modified_at` on the second save.
//!
//! ```
//! use warehaus_core::Timestamp;
//!
//! let a = Timestamp::now();
//! let b = Timestamp::now();
//! assert!(b > a);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Highest timestamp handed out so far.
static LAST_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Microseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Current time, strictly greater than any timestamp previously
    /// returned by this function.
    ///
    /// Falls back to the last issued value plus one when the system clock
    /// is behind (NTP step, clock before epoch).
    pub fn now() -> Self {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_micros() as u64;
        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let next = wall.max(last.saturating_add(1));
            match LAST_ISSUED.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return Timestamp(next),
                Err(observed) => last = observed,
            }
        }
    }

    /// Create a timestamp from microseconds since epoch
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Timestamp(micros)
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Timestamp(secs.saturating_mul(1_000_000))
    }

    /// Microseconds since Unix epoch
    #[inline]
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Seconds since Unix epoch (truncates)
    #[inline]
    pub const fn as_secs(&self) -> u64 {
        self.0 / 1_000_000
    }

    /// Duration since an earlier timestamp, `None` if `earlier` is later.
    pub fn duration_since(&self, earlier: Timestamp) -> Option<Duration> {
        self.0.checked_sub(earlier.0).map(Duration::from_micros)
    }

    /// Add a duration, saturating at `u64::MAX` microseconds.
    pub fn saturating_add(&self, duration: Duration) -> Self {
        Timestamp(self.0.saturating_add(duration.as_micros() as u64))
    }

    /// Read a timestamp back out of a document field.
    ///
    /// Returns `None` for anything that is not a non-negative integer.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_u64().map(Timestamp)
    }

    /// The document representation of this timestamp.
    pub fn to_value(self) -> Value {
        Value::from(self.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:06}", self.0 / 1_000_000, self.0 % 1_000_000)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        ts.to_value()
    }
}

impl From<u64> for Timestamp {
    fn from(micros: u64) -> Self {
        Timestamp(micros)
    }
}
