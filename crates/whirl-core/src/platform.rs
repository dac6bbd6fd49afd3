//! Platform abstraction traits for the tick runtime.
//!
//! These traits let the runtime delegate wake-up scheduling and clock
//! responsibilities to the host, so the core stays free of any direct
//! timing or windowing dependency.

use std::time::Duration;

/// Schedules tick processing on behalf of the runtime.
///
/// Called whenever the tick queue goes non-empty. Event-loop hosts wake
/// their loop here so it calls [`RuntimeHandle::drain_ticks`] again;
/// polling hosts use the no-op [`DefaultScheduler`] and watch
/// [`Runtime::needs_tick`] instead. Implementations must be safe to use
/// from multiple threads.
///
/// [`RuntimeHandle::drain_ticks`]: crate::RuntimeHandle::drain_ticks
/// [`DefaultScheduler`]: crate::DefaultScheduler
/// [`Runtime::needs_tick`]: crate::Runtime::needs_tick
pub trait TickScheduler: Send + Sync {
    /// Request that the host schedule another tick drain.
    fn schedule_tick(&self);
}

/// Monotonic time source for hosts that pace ticks and stamp input.
///
/// Only the duration reading is required; the millisecond and nanosecond
/// views are derived from it. Pointer timestamps are `i64` milliseconds,
/// tick timestamps are `u64` nanoseconds.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the time elapsed since `since`.
    fn elapsed(&self, since: Self::Instant) -> Duration;

    /// Elapsed whole milliseconds since `since`, for pointer timestamps.
    fn elapsed_millis(&self, since: Self::Instant) -> i64 {
        self.elapsed(since).as_millis() as i64
    }

    /// Elapsed nanoseconds since `since`, for tick timestamps.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        self.elapsed(since).as_nanos() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(Duration);

    impl Clock for FixedClock {
        type Instant = ();

        fn now(&self) -> Self::Instant {}

        fn elapsed(&self, _since: Self::Instant) -> Duration {
            self.0
        }
    }

    #[test]
    fn derived_readings_follow_the_duration() {
        let clock = FixedClock(Duration::from_micros(2_500));
        assert_eq!(clock.elapsed_millis(()), 2);
        assert_eq!(clock.elapsed_nanos(()), 2_500_000);
    }
}
