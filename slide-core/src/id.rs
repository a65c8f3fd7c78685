//! Timestamp-derived creation ids.
//!
//! Every element is keyed by the local time at which it was created, with
//! millisecond precision (`YYYY-MM-DD HH:MM:SS.mmm`). Two elements created in
//! the same millisecond would collide, so [`IdGenerator`] keeps the last
//! issued instant and moves forward by one millisecond whenever the clock has
//! not advanced.

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Format used for creation ids.
pub const CREATION_ID_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Unique identifier of an element for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreationId(String);

impl CreationId {
    /// Wrap an existing id string (e.g. one received from the host page).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the id for the given instant.
    #[must_use]
    pub fn from_instant(instant: NaiveDateTime) -> Self {
        Self(instant.format(CREATION_ID_FORMAT).to_string())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CreationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CreationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Source of the current time for id generation.
pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that always reports the same instant.
///
/// Useful in tests and for deterministic replays: the generator still issues
/// distinct ids because it steps forward past the last issued instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Issues strictly increasing creation ids.
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last: Option<NaiveDateTime>,
}

impl IdGenerator {
    /// Create a generator backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create a generator backed by a custom clock.
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: None,
        }
    }

    /// Issue the next id.
    pub fn next_id(&mut self) -> CreationId {
        // Ids only carry millisecond precision, so compare at that precision.
        let now = truncate_to_millis(self.clock.now());
        let instant = match self.last {
            Some(last) if now <= last => {
                tracing::trace!("clock has not advanced past {last}, bumping id by 1ms");
                last + Duration::milliseconds(1)
            }
            _ => now,
        };
        self.last = Some(instant);
        CreationId::from_instant(instant)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

fn truncate_to_millis(instant: NaiveDateTime) -> NaiveDateTime {
    let millis = instant.nanosecond() / 1_000_000 * 1_000_000;
    instant.with_nanosecond(millis).unwrap_or(instant)
}
