//! Testing utilities and harness for the whirl picker wheel.
//!
//! [`WheelRobot`] drives a fully wired wheel with synthesized gestures and
//! deterministic simulated time; [`RecordingObserver`] captures what the
//! wheel reported so tests can assert on the whole notification history.

pub mod recording;
pub mod robot;

pub use recording::RecordingObserver;
pub use robot::{WheelRobot, FRAME_MS, FRAME_NANOS};
