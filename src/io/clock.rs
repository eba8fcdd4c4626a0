//! Wall clock capability
//!
//! The window gate only needs local hours and minutes; injecting the clock
//! keeps the gate testable without touching the host clock.

use chrono::{Local, NaiveTime};

pub trait Clock: Send + Sync {
    /// Current local time of day.
    fn now(&self) -> NaiveTime;
}

/// System wall clock in the host's local timezone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}
