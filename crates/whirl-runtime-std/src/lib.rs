//! Wall-clock tick pumping for hosts without an event loop.
//!
//! [`StdRuntime`] owns the tick runtime plus the 60 Hz pacing a picker
//! host needs. Input handling happens between pumps; once a gesture ends,
//! [`StdRuntime::pump_until_idle`] sleeps out each tick interval and
//! drains the queue with wall-clock timestamps until no animation wants
//! another tick.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use whirl_core::{Clock, DefaultScheduler, Runtime, RuntimeHandle, TICK_INTERVAL_SECS};

/// Clock implementation backed by [`std::time`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed(&self, since: Self::Instant) -> Duration {
        since.elapsed()
    }
}

/// Tick runtime paced off the wall clock.
///
/// The runtime is polled, not woken: registrations mark the queue
/// non-empty, and the pump sleeps until the next 60 Hz deadline before
/// each drain. Tick timestamps are nanoseconds since construction.
pub struct StdRuntime {
    runtime: Runtime,
    clock: StdClock,
    epoch: Instant,
    next_deadline: Cell<Instant>,
    interval: Duration,
}

impl StdRuntime {
    pub fn new() -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let clock = StdClock;
        let epoch = clock.now();
        let interval = Duration::from_secs_f32(TICK_INTERVAL_SECS);
        Self {
            runtime,
            clock,
            epoch,
            next_deadline: Cell::new(epoch + interval),
            interval,
        }
    }

    /// Returns a handle for wiring engines to this runtime.
    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Sleeps until the next tick deadline, then drains the queue once.
    ///
    /// Returns `false` without sleeping when nothing is registered. The
    /// deadline advances by one interval per tick; after a stall longer
    /// than an interval it re-anchors to the present rather than draining
    /// a burst of overdue ticks.
    pub fn pump_tick(&self) -> bool {
        if !self.runtime.needs_tick() {
            return false;
        }

        let deadline = self.next_deadline.get();
        let wait = deadline.saturating_duration_since(self.clock.now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.runtime
            .handle()
            .drain_ticks(self.clock.elapsed_nanos(self.epoch));

        let now = self.clock.now();
        let mut next = deadline + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_deadline.set(next);
        true
    }

    /// Pumps paced ticks until no callback remains registered.
    ///
    /// Returns the number of ticks drained. An animation that re-registers
    /// forever (infinite inertia) never goes idle; hosts running one should
    /// call [`StdRuntime::pump_tick`] on their own terms instead.
    pub fn pump_until_idle(&self) -> u64 {
        let mut drained = 0;
        while self.pump_tick() {
            drained += 1;
        }
        drained
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("needs_tick", &self.runtime.needs_tick())
            .field("next_deadline", &self.next_deadline.get())
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
