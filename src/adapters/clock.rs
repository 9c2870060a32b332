//! Clock adapters: the system wall clock and a frozen clock for deterministic runs.

use crate::ports::ClockPort;
use chrono::{DateTime, Utc};

pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
