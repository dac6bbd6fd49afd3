//! Input layer for the whirl picker wheel: pointer batches in, semantic
//! gesture callbacks out.
//!
//! [`PointerBatch`] is the boundary with platform event plumbing. The
//! [`TwoFingerGestureDetector`] folds a batch stream into pan, rotation,
//! pinch, and release-velocity callbacks on a [`GestureListener`], backed
//! by an impulse-strategy [`VelocityTracker1D`]. Nothing in this crate
//! knows what a wheel is; the scroll engine lives downstream.

mod detector;
mod types;
mod velocity;

pub use detector::{
    GestureEnd, GestureListener, TwoFingerGestureDetector, MAX_GESTURE_VELOCITY,
};
pub use types::{PointerAction, PointerBatch, PointerId, PointerVec, TouchPoint};
pub use velocity::{VelocityTracker1D, ASSUME_STOPPED_MS};
