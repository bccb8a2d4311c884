//! Simulation time and timer model.
//!
//! The protocol entities in this workspace are driven by an external
//! discrete-event loop: every operation receives the current simulation
//! time, and pending timers are plain expiry deadlines fired when the
//! driver advances the clock. No threads, no blocking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A point in simulation time, in milliseconds since simulation start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime(u64);

impl SimTime {
    /// Simulation start.
    pub const ZERO: SimTime = SimTime(0);

    /// Creates a time from milliseconds.
    pub const fn from_ms(ms: u64) -> Self {
        Self(ms)
    }

    /// Returns the value in milliseconds.
    pub const fn as_ms(&self) -> u64 {
        self.0
    }

    /// Saturating difference between two times, in milliseconds.
    pub fn elapsed_since(&self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u64> for SimTime {
    type Output = SimTime;

    fn add(self, ms: u64) -> SimTime {
        SimTime(self.0 + ms)
    }
}

impl AddAssign<u64> for SimTime {
    fn add_assign(&mut self, ms: u64) {
        self.0 += ms;
    }
}

impl Sub<SimTime> for SimTime {
    type Output = u64;

    fn sub(self, other: SimTime) -> u64 {
        self.0.saturating_sub(other.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// A single-instance logical timer.
///
/// At most one instance is outstanding at a time: scheduling while running
/// replaces the previous deadline. The owning entity polls the timer from
/// its time-advance path and reacts when `take_expired` reports true.
#[derive(Debug, Default, Clone)]
pub struct SimTimer {
    expiry: Option<SimTime>,
}

impl SimTimer {
    /// Creates an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules (or reschedules) the timer to fire at `at`.
    pub fn schedule(&mut self, at: SimTime) {
        self.expiry = Some(at);
    }

    /// Cancels any pending instance.
    pub fn cancel(&mut self) {
        self.expiry = None;
    }

    /// Returns true if an instance is pending.
    pub fn is_running(&self) -> bool {
        self.expiry.is_some()
    }

    /// Returns the pending deadline, if any.
    pub fn expires_at(&self) -> Option<SimTime> {
        self.expiry
    }

    /// Fires the timer if its deadline has been reached.
    ///
    /// Returns true exactly once per scheduled instance; the timer returns
    /// to idle on expiry.
    pub fn take_expired(&mut self, now: SimTime) -> bool {
        match self.expiry {
            Some(at) if at <= now => {
                self.expiry = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_time_arithmetic() {
        let t = SimTime::from_ms(100);
        assert_eq!((t + 50).as_ms(), 150);
        assert_eq!(t + 50 - t, 50);
        assert_eq!(t - (t + 50), 0); // saturating
        assert_eq!(format!("{t}"), "100ms");
    }

    #[test]
    fn test_timer_lifecycle() {
        let mut timer = SimTimer::new();
        assert!(!timer.is_running());

        timer.schedule(SimTime::from_ms(100));
        assert!(timer.is_running());
        assert_eq!(timer.expires_at(), Some(SimTime::from_ms(100)));

        assert!(!timer.take_expired(SimTime::from_ms(99)));
        assert!(timer.is_running());

        assert!(timer.take_expired(SimTime::from_ms(100)));
        assert!(!timer.is_running());

        // Fires only once per instance
        assert!(!timer.take_expired(SimTime::from_ms(200)));
    }

    #[test]
    fn test_timer_reschedule_replaces() {
        let mut timer = SimTimer::new();
        timer.schedule(SimTime::from_ms(100));
        timer.schedule(SimTime::from_ms(300));
        assert!(!timer.take_expired(SimTime::from_ms(150)));
        assert!(timer.take_expired(SimTime::from_ms(300)));
    }

    #[test]
    fn test_timer_cancel() {
        let mut timer = SimTimer::new();
        timer.schedule(SimTime::from_ms(10));
        timer.cancel();
        assert!(!timer.take_expired(SimTime::from_ms(20)));
    }
}
