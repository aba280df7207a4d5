//! Time sources for the host bridge.
//!
//! The engine never reads the time. The bridge measures elapsed play time
//! with a `Stopwatch` driven by a `Clock`, so tests can swap the system
//! clock for a `ManualClock` and step time by hand.

use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Time since some fixed origin. Never goes backwards.
    fn now(&self) -> Duration;
}

/// Wall-clock time since construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn advance_secs(&mut self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Accumulates running time across pauses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    accumulated: Duration,
    running_since: Option<Duration>,
}

impl Stopwatch {
    /// A running stopwatch started at `now`.
    #[must_use]
    pub fn started(now: Duration) -> Self {
        Self {
            accumulated: Duration::ZERO,
            running_since: Some(now),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Total running time up to `now`.
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + now.saturating_sub(since),
            None => self.accumulated,
        }
    }

    /// Start or stop. Does nothing if already in the requested state.
    pub fn set_running(&mut self, running: bool, now: Duration) {
        match (self.running_since, running) {
            (None, true) => self.running_since = Some(now),
            (Some(since), false) => {
                self.accumulated += now.saturating_sub(since);
                self.running_since = None;
            }
            _ => {}
        }
    }

    /// Zero the count and start running from `now`.
    pub fn restart(&mut self, now: Duration) {
        *self = Self::started(now);
    }
}

/// Format whole seconds as `MM:SS`. Minutes keep counting past 99.
#[must_use]
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
