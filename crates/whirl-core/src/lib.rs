//! Core tick runtime for the whirl picker wheel.
//!
//! Animation in the wheel is tick-driven: each step of a settle or fling is
//! a one-shot callback queued on a [`Runtime`], and the host pumps
//! [`RuntimeHandle::drain_ticks`] from its frame loop (~60 Hz). Callbacks
//! re-register themselves while work remains; cancelling an animation is
//! removing its pending callback, which is synchronous and complete before
//! the cancel call returns.

mod platform;
mod runtime;
mod tick_clock;

pub use platform::{Clock, TickScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle, TickCallbackId};
pub use tick_clock::{TickClock, TickRegistration};

/// Nominal tick length the animation layer integrates velocity over.
///
/// Hosts are free to drain faster or slower; the engine's physics assume
/// this interval per tick, matching a 60 Hz frame loop.
pub const TICK_INTERVAL_SECS: f32 = 1.0 / 60.0;
