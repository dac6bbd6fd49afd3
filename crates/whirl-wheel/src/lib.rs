//! Rotary picker wheel: drag to scroll a list wrapped around a cylinder,
//! release to fling, always come to rest centered on an item.
//!
//! [`WheelEngine`] holds the scroll state and runs the inertial and
//! snapping animation on a [`whirl_core::Runtime`]. [`WheelController`]
//! feeds it from pointer batches through gesture detection, and a
//! [`WheelObserver`] receives offset changes for redraw plus a settle
//! notification whenever the wheel comes to rest on an item. Geometry is
//! fixed at a 120 degree visible arc; item spacing follows from the
//! configured number of visible slots and the calibrated viewport
//! height.

mod config;
mod controller;
mod engine;
mod error;
mod geometry;
mod items;

pub use config::WheelConfig;
pub use controller::{WheelController, WheelGestureBridge};
pub use engine::{WheelEngine, WheelObserver};
pub use error::WheelError;
pub use geometry::{projection_scale, WheelGeometry, ANGULAR_SPAN_DEG};
pub use items::{ItemTable, NO_DATA_LABEL};
