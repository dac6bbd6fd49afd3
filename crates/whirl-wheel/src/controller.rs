//! Glue between raw pointer batches and the scroll engine.
//!
//! The controller owns a gesture detector and forwards its callbacks:
//! touching the wheel freezes any running animation, vertical drag moves
//! the offset sample by sample, and lifting hands the tracked velocity to
//! the engine as a fling. Cancelled gestures release with zero velocity
//! so the wheel still snaps onto an item instead of stopping between
//! two of them. Pinch and twist deltas are not consumed by the wheel;
//! they are surfaced through optional hooks for effects such as camera
//! zoom.

use whirl_input::{GestureEnd, GestureListener, PointerBatch, TwoFingerGestureDetector};

use crate::engine::WheelEngine;

type DeltaHook = Box<dyn FnMut(f32)>;

/// Gesture listener that drives a [`WheelEngine`].
pub struct WheelGestureBridge {
    engine: WheelEngine,
    pinch: Option<DeltaHook>,
    twist: Option<DeltaHook>,
}

impl WheelGestureBridge {
    fn new(engine: WheelEngine) -> Self {
        Self {
            engine,
            pinch: None,
            twist: None,
        }
    }
}

impl GestureListener for WheelGestureBridge {
    fn on_down(&mut self, _x: f32, _y: f32, _time_ms: i64) {
        self.engine.stop_animation();
    }

    fn on_moved(&mut self, _dx: f32, dy: f32, _delta_ms: i64) {
        self.engine.update_offset(dy);
    }

    fn on_rotated(&mut self, delta_deg: f32, _delta_ms: i64) {
        if let Some(hook) = self.twist.as_mut() {
            hook(delta_deg);
        }
    }

    fn on_scaled(&mut self, delta_distance: f32, _delta_ms: i64) {
        if let Some(hook) = self.pinch.as_mut() {
            hook(delta_distance);
        }
    }

    fn on_up(&mut self, end: &GestureEnd) {
        self.engine.start_animation(end.y_velocity);
    }

    fn on_cancel(&mut self) {
        // A cancelled gesture still has to leave the wheel on an item.
        self.engine.start_animation(0.0);
    }
}

/// Routes pointer batches from the windowing layer into the wheel.
pub struct WheelController {
    detector: TwoFingerGestureDetector<WheelGestureBridge>,
}

impl WheelController {
    pub fn new(engine: WheelEngine) -> Self {
        let max_velocity = engine.config().max_gesture_velocity;
        Self {
            detector: TwoFingerGestureDetector::with_max_velocity(
                WheelGestureBridge::new(engine),
                max_velocity,
            ),
        }
    }

    /// Feeds one pointer batch through gesture detection.
    pub fn handle_batch(&mut self, batch: &PointerBatch) {
        self.detector.on_touch_event(batch);
    }

    pub fn is_in_gesture(&self) -> bool {
        self.detector.is_in_gesture()
    }

    pub fn engine(&self) -> WheelEngine {
        self.detector.listener().engine.clone()
    }

    /// Receives two-finger distance deltas, for pinch-driven effects.
    pub fn set_pinch_listener(&mut self, hook: impl FnMut(f32) + 'static) {
        self.detector.listener_mut().pinch = Some(Box::new(hook));
    }

    /// Receives two-finger rotation deltas in degrees.
    pub fn set_twist_listener(&mut self, hook: impl FnMut(f32) + 'static) {
        self.detector.listener_mut().twist = Some(Box::new(hook));
    }
}
