#![forbid(unsafe_code)]

//! Deadline-based debouncing.
//!
//! A [`Debouncer`] holds at most one pending value. Scheduling replaces the
//! pending value and pushes the deadline out; polling at or after the
//! deadline yields the value exactly once. Time is passed in explicitly so
//! the host loop (and tests) control the clock.
//!
//! ```
//! use seekbox_widgets::debounce::Debouncer;
//! use web_time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut d = Debouncer::new(Duration::from_millis(300));
//! d.schedule("a", start);
//! d.schedule("ap", start + Duration::from_millis(100));
//! assert_eq!(d.poll(start + Duration::from_millis(399)), None);
//! assert_eq!(d.poll(start + Duration::from_millis(400)), Some("ap"));
//! assert_eq!(d.poll(start + Duration::from_millis(900)), None);
//! ```

use web_time::{Duration, Instant};

/// Single-slot debouncer.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    period: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            pending: None,
        }
    }

    /// Quiet period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Change the quiet period. A pending deadline is left as scheduled.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    /// Replace any pending value; it fires at `now + period`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.period));
    }

    /// Drop the pending value, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will fire.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, d)| *d)
    }
}
