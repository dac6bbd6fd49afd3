//! Turns raw pointer batches into semantic gesture callbacks.
//!
//! The detector tracks at most two concurrent pointers. The first pointer
//! down becomes the primary and drives pan deltas and release velocity; a
//! second pointer adds rotation and pinch deltas derived from the vector
//! between the two. Extra pointers beyond the second are ignored until one
//! of the tracked pointers lifts.

use crate::types::{PointerAction, PointerBatch, PointerId, TouchPoint};
use crate::velocity::VelocityTracker1D;

/// Default cap on reported release velocity, px/s. Matches the platform
/// maximum fling velocity on a baseline density.
pub const MAX_GESTURE_VELOCITY: f32 = 8_000.0;

/// Inter-pointer distances at or below this are treated as zero, so twist
/// deltas from a degenerate pinch never reach the listener.
const MIN_TWIST_DISTANCE: f32 = 1e-3;

/// Summary of a finished gesture, built once when the last pointer lifts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEnd {
    /// Final primary pointer position.
    pub up_x: f32,
    pub up_y: f32,
    /// Timestamp of the up batch, ms.
    pub up_time_ms: i64,
    /// Elapsed ms between the up batch and the previous processed sample.
    pub last_delta_ms: i64,
    /// Trailing-window velocities of the primary pointer, px/s, capped.
    pub x_velocity: f32,
    pub y_velocity: f32,
}

/// Receiver for gesture callbacks. Every method has a no-op default so
/// implementors only write the ones they care about.
pub trait GestureListener {
    /// First pointer contacted the surface.
    fn on_down(&mut self, x: f32, y: f32, time_ms: i64) {
        let _ = (x, y, time_ms);
    }

    /// Primary pointer moved by `(dx, dy)` since the previous sample.
    fn on_moved(&mut self, dx: f32, dy: f32, delta_ms: i64) {
        let _ = (dx, dy, delta_ms);
    }

    /// Two-pointer vector rotated by `delta_deg` since the previous sample.
    fn on_rotated(&mut self, delta_deg: f32, delta_ms: i64) {
        let _ = (delta_deg, delta_ms);
    }

    /// Two-pointer distance changed by `delta_distance` pixels.
    fn on_scaled(&mut self, delta_distance: f32, delta_ms: i64) {
        let _ = (delta_distance, delta_ms);
    }

    /// Last pointer lifted; `end` carries the release velocity.
    fn on_up(&mut self, end: &GestureEnd) {
        let _ = end;
    }

    /// Gesture was revoked. No velocity is reported.
    fn on_cancel(&mut self) {}
}

/// Angle and length of the vector between the two tracked pointers.
#[derive(Clone, Copy, Debug)]
struct TwistSample {
    angle_deg: f32,
    distance: f32,
}

impl TwistSample {
    fn between(a: TouchPoint, b: TouchPoint) -> Self {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        Self {
            angle_deg: dy.atan2(dx).to_degrees(),
            distance: dx.hypot(dy),
        }
    }

    fn is_degenerate(&self) -> bool {
        self.distance <= MIN_TWIST_DISTANCE
    }
}

/// Normalizes an angle delta into `(-180, 180]` so a twist across the
/// atan2 seam reads as a small rotation, not a near-360 swing.
fn wrap_degrees(delta: f32) -> f32 {
    let mut wrapped = delta % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Stateful gesture classifier over a stream of [`PointerBatch`]es.
///
/// Feed every platform batch to [`on_touch_event`](Self::on_touch_event);
/// the listener receives down/moved/rotated/scaled/up/cancel callbacks in
/// batch order. Between gestures the detector holds no pointer state.
pub struct TwoFingerGestureDetector<L: GestureListener> {
    listener: L,
    max_velocity: f32,
    primary: Option<PointerId>,
    secondary: Option<PointerId>,
    /// Previous sample of the primary pointer. `None` right after a primary
    /// handoff whose batch did not carry the survivor's position.
    anchor: Option<TouchPoint>,
    twist: Option<TwistSample>,
    last_time_ms: i64,
    tracker_x: VelocityTracker1D,
    tracker_y: VelocityTracker1D,
}

impl<L: GestureListener> TwoFingerGestureDetector<L> {
    pub fn new(listener: L) -> Self {
        Self::with_max_velocity(listener, MAX_GESTURE_VELOCITY)
    }

    pub fn with_max_velocity(listener: L, max_velocity: f32) -> Self {
        Self {
            listener,
            max_velocity,
            primary: None,
            secondary: None,
            anchor: None,
            twist: None,
            last_time_ms: 0,
            tracker_x: VelocityTracker1D::new(),
            tracker_y: VelocityTracker1D::new(),
        }
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    /// True while at least one tracked pointer is down.
    pub fn is_in_gesture(&self) -> bool {
        self.primary.is_some()
    }

    /// Processes one platform batch, emitting listener callbacks as needed.
    pub fn on_touch_event(&mut self, batch: &PointerBatch) {
        match batch.action {
            PointerAction::Down => self.handle_down(batch),
            PointerAction::PointerDown => self.handle_pointer_down(batch),
            PointerAction::Move => self.handle_move(batch),
            PointerAction::PointerUp => self.handle_pointer_up(batch),
            PointerAction::Up => self.handle_up(batch),
            PointerAction::Cancel => self.handle_cancel(),
        }
    }

    fn handle_down(&mut self, batch: &PointerBatch) {
        let Some(point) = batch.point(batch.changed) else {
            log::warn!(
                "down batch missing its own pointer {}, ignoring",
                batch.changed
            );
            return;
        };
        self.clear_gesture();
        self.primary = Some(point.id);
        self.anchor = Some(point);
        self.last_time_ms = batch.time_ms;
        self.track(batch.time_ms, point);
        self.listener.on_down(point.x, point.y, batch.time_ms);
    }

    fn handle_pointer_down(&mut self, batch: &PointerBatch) {
        let Some(primary) = self.primary else {
            return;
        };
        if self.secondary.is_some() || batch.changed == primary {
            // Third finger, or a duplicate report for the primary. Ignored.
            return;
        }
        let Some(point) = batch.point(batch.changed) else {
            log::warn!(
                "pointer-down batch missing its own pointer {}, ignoring",
                batch.changed
            );
            return;
        };
        self.secondary = Some(point.id);
        self.twist = self.twist_sample(batch);
        if let Some(primary_point) = batch.point(primary) {
            self.track(batch.time_ms, primary_point);
        }
    }

    fn handle_move(&mut self, batch: &PointerBatch) {
        let Some(primary) = self.primary else {
            return;
        };
        let Some(point) = batch.point(primary) else {
            // The batch dropped our pointer without a pointer-up. Nothing
            // to measure this round.
            return;
        };

        let delta_ms = (batch.time_ms - self.last_time_ms).max(0);
        self.track(batch.time_ms, point);

        // Deltas come from the previous sample, not the down point, so a
        // long drag never compounds rounding drift.
        if let Some(anchor) = self.anchor {
            self.listener
                .on_moved(point.x - anchor.x, point.y - anchor.y, delta_ms);
        }
        self.anchor = Some(point);
        self.last_time_ms = batch.time_ms;

        if self.secondary.is_some() {
            if let Some(current) = self.twist_sample(batch) {
                if let Some(previous) = self.twist {
                    let (rotated, scaled) = if current.is_degenerate() || previous.is_degenerate()
                    {
                        (0.0, 0.0)
                    } else {
                        (
                            wrap_degrees(current.angle_deg - previous.angle_deg),
                            current.distance - previous.distance,
                        )
                    };
                    self.listener.on_rotated(rotated, delta_ms);
                    self.listener.on_scaled(scaled, delta_ms);
                }
                self.twist = Some(current);
            }
        }
    }

    fn handle_pointer_up(&mut self, batch: &PointerBatch) {
        let Some(primary) = self.primary else {
            return;
        };
        if batch.changed == primary {
            self.promote_survivor(batch, primary);
        } else if Some(batch.changed) == self.secondary {
            // Back to single-pointer pan. Dropping the twist sample here is
            // what keeps the downgrade free of a spurious rotation jump.
            self.secondary = None;
            self.twist = None;
        }
        // A pointer we never tracked lifting is not our business.
    }

    /// The primary lifted while other pointers remain. Hands the gesture to
    /// the tracked secondary, or failing that to any other pointer still in
    /// the batch, re-anchoring pan and velocity at its position.
    fn promote_survivor(&mut self, batch: &PointerBatch, outgoing: PointerId) {
        let survivor = self.secondary.take().or_else(|| {
            batch
                .pointers
                .iter()
                .map(|point| point.id)
                .find(|&id| id != outgoing)
        });
        self.twist = None;

        let Some(survivor) = survivor else {
            log::warn!("pointer-up for the only tracked pointer, treating as cancel");
            self.clear_gesture();
            self.listener.on_cancel();
            return;
        };

        self.primary = Some(survivor);
        self.anchor = batch.point(survivor);
        self.tracker_x.reset();
        self.tracker_y.reset();
        if let Some(point) = self.anchor {
            self.track(batch.time_ms, point);
        }
        self.last_time_ms = batch.time_ms;
    }

    fn handle_up(&mut self, batch: &PointerBatch) {
        let Some(primary) = self.primary else {
            return;
        };
        if let Some(point) = batch.point(primary) {
            self.track(batch.time_ms, point);
        }

        let (up_x, up_y) = match batch.point(primary).or(self.anchor) {
            Some(point) => (point.x, point.y),
            None => (0.0, 0.0),
        };
        let end = GestureEnd {
            up_x,
            up_y,
            up_time_ms: batch.time_ms,
            last_delta_ms: (batch.time_ms - self.last_time_ms).max(0),
            x_velocity: self.tracker_x.velocity_capped(self.max_velocity),
            y_velocity: self.tracker_y.velocity_capped(self.max_velocity),
        };
        self.clear_gesture();
        self.listener.on_up(&end);
    }

    fn handle_cancel(&mut self) {
        if self.primary.is_none() {
            return;
        }
        self.clear_gesture();
        self.listener.on_cancel();
    }

    fn twist_sample(&self, batch: &PointerBatch) -> Option<TwistSample> {
        let primary = batch.point(self.primary?).or(self.anchor)?;
        let secondary = batch.point(self.secondary?)?;
        Some(TwistSample::between(primary, secondary))
    }

    fn track(&mut self, time_ms: i64, point: TouchPoint) {
        self.tracker_x.add_sample(time_ms, point.x);
        self.tracker_y.add_sample(time_ms, point.y);
    }

    fn clear_gesture(&mut self) {
        self.primary = None;
        self.secondary = None;
        self.anchor = None;
        self.twist = None;
        self.tracker_x.reset();
        self.tracker_y.reset();
    }
}
