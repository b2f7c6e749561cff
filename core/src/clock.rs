//! Wall-clock access and customer id assignment.
//!
//! Nothing in the queue store reads the system time directly; it asks a
//! `Clock`. Tests drive time with `ManualClock`.

use crate::types::CustomerId;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same instant,
/// so a test can keep one handle and give another to the store.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Strictly increasing customer ids.
///
/// Ids follow the clock in milliseconds, but two customers added in the
/// same millisecond (or after the clock steps backwards) still get
/// distinct ids: next = max(now_ms, last + 1).
#[derive(Debug, Clone, Default)]
pub struct CustomerIdSequence {
    last: CustomerId,
}

impl CustomerIdSequence {
    /// Resume after the largest id already in use.
    pub fn resume_after(last: CustomerId) -> Self {
        Self { last }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> CustomerId {
        let millis = now.timestamp_millis().max(0) as CustomerId;
        let id = millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    pub fn last(&self) -> CustomerId {
        self.last
    }
}
