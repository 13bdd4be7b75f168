//! Debouncing of the search input.
//!
//! Converts a rapidly changing raw query into a settled query once the input has been
//! quiet for a fixed interval. Host timers cannot be cancelled and carry no identity,
//! but they all share the same duration, so they fire in the order they were
//! scheduled. Each input change therefore bumps a generation and schedules one timer;
//! a settle only happens when the timer of the latest change fires.

use std::time::Duration;

/// Default quiet interval before a query settles.
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(500);

/// Debounce state for the search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    quiet_interval: Duration,
    raw: String,
    settled: String,
    /// Generation of the most recent input change (number of timers scheduled).
    scheduled: u64,
    /// Number of debounce timers that have fired so far.
    fired: u64,
    /// Timer whose firing settles the query, `None` when nothing is waiting.
    settle_on: Option<u64>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(quiet_interval: Duration) -> Self {
        Self {
            quiet_interval,
            raw: String::new(),
            settled: String::new(),
            scheduled: 0,
            fired: 0,
            settle_on: None,
        }
    }

    #[must_use]
    pub const fn quiet_interval(&self) -> Duration {
        self.quiet_interval
    }

    /// The value as typed.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The last value that settled.
    #[must_use]
    pub fn settled(&self) -> &str {
        &self.settled
    }

    /// Whether a change is waiting for its quiet interval to elapse.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.settle_on.is_some()
    }

    /// Stores a new raw value and returns the delay of the timer to schedule.
    ///
    /// Nothing is observable downstream until the matching timer fires.
    pub fn on_input_change(&mut self, raw: impl Into<String>) -> Duration {
        self.raw = raw.into();
        self.scheduled += 1;
        self.settle_on = Some(self.scheduled);
        tracing::trace!(generation = self.scheduled, raw = %self.raw, "debounce timer scheduled");
        self.quiet_interval
    }

    /// Records that one debounce timer fired.
    ///
    /// Returns the settled value when this timer belongs to the latest change, `None`
    /// while newer changes are still waiting.
    pub fn on_timer_elapsed(&mut self) -> Option<String> {
        if self.fired >= self.scheduled {
            tracing::trace!("timer fired with no outstanding debounce timer");
            return None;
        }

        self.fired += 1;
        if self.settle_on != Some(self.fired) {
            tracing::trace!(fired = self.fired, scheduled = self.scheduled, "superseded debounce timer");
            return None;
        }

        self.settle_on = None;
        self.settled.clone_from(&self.raw);
        tracing::debug!(settled = %self.settled, "query settled");
        Some(self.settled.clone())
    }

    /// Settles the current raw value immediately, bypassing the quiet interval.
    ///
    /// Timers still outstanding are absorbed when they fire without settling again.
    pub fn settle_now(&mut self) -> String {
        self.settle_on = None;
        self.settled.clone_from(&self.raw);
        tracing::debug!(settled = %self.settled, "query settled immediately");
        self.settled.clone()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_settles_only_final_value() {
        let mut debouncer = Debouncer::default();

        for raw in ["d", "du", "dun", "dune"] {
            assert_eq!(debouncer.on_input_change(raw), DEFAULT_QUIET_INTERVAL);
        }

        assert_eq!(debouncer.on_timer_elapsed(), None);
        assert_eq!(debouncer.on_timer_elapsed(), None);
        assert_eq!(debouncer.on_timer_elapsed(), None);
        assert_eq!(debouncer.on_timer_elapsed().as_deref(), Some("dune"));
        assert_eq!(debouncer.settled(), "dune");
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn raw_updates_immediately_without_settling() {
        let mut debouncer = Debouncer::default();
        debouncer.on_input_change("heat");
        assert_eq!(debouncer.raw(), "heat");
        assert_eq!(debouncer.settled(), "");
        assert!(debouncer.is_pending());
    }

    #[test]
    fn change_after_quiet_interval_settles_again() {
        let mut debouncer = Debouncer::default();

        debouncer.on_input_change("a");
        assert_eq!(debouncer.on_timer_elapsed().as_deref(), Some("a"));

        debouncer.on_input_change("ab");
        assert_eq!(debouncer.on_timer_elapsed().as_deref(), Some("ab"));
    }

    #[test]
    fn change_while_timer_pending_supersedes_it() {
        let mut debouncer = Debouncer::default();

        debouncer.on_input_change("a");
        debouncer.on_input_change("ab");
        // Timer for "a" fires after "ab" was typed.
        assert_eq!(debouncer.on_timer_elapsed(), None);
        debouncer.on_input_change("abc");
        assert_eq!(debouncer.on_timer_elapsed(), None);
        assert_eq!(debouncer.on_timer_elapsed().as_deref(), Some("abc"));
    }

    #[test]
    fn empty_string_settles() {
        let mut debouncer = Debouncer::default();

        debouncer.on_input_change("x");
        debouncer.on_input_change("");
        debouncer.on_timer_elapsed();
        assert_eq!(debouncer.on_timer_elapsed().as_deref(), Some(""));
    }

    #[test]
    fn stray_timers_are_ignored() {
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.on_timer_elapsed(), None);

        debouncer.on_input_change("q");
        assert_eq!(debouncer.on_timer_elapsed().as_deref(), Some("q"));
        assert_eq!(debouncer.on_timer_elapsed(), None);
    }

    #[test]
    fn settle_now_absorbs_outstanding_timers() {
        let mut debouncer = Debouncer::default();

        debouncer.on_input_change("al");
        debouncer.on_input_change("alien");
        assert_eq!(debouncer.settle_now(), "alien");

        assert_eq!(debouncer.on_timer_elapsed(), None);
        assert_eq!(debouncer.on_timer_elapsed(), None);

        debouncer.on_input_change("aliens");
        assert_eq!(debouncer.on_timer_elapsed().as_deref(), Some("aliens"));
    }
}
