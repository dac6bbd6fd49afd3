//! Gesture robot for driving a wheel end to end in tests.
//!
//! The robot owns the whole stack: a tick runtime, an engine wired to a
//! [`RecordingObserver`], and a controller fed with synthesized pointer
//! batches. Time is simulated: every move advances the stream clock by one
//! frame, and [`WheelRobot::tick`] drains animation ticks with matching
//! timestamps, so tests are deterministic regardless of the machine they
//! run on.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use whirl_core::{DefaultScheduler, Runtime};
use whirl_input::{PointerBatch, TouchPoint};
use whirl_wheel::{WheelConfig, WheelController, WheelEngine, WheelObserver};

use crate::recording::RecordingObserver;

/// Milliseconds the stream clock advances per synthesized move.
pub const FRAME_MS: i64 = 16;
/// Nanoseconds between drained animation ticks.
pub const FRAME_NANOS: u64 = 16_666_667;

const PRIMARY_ID: u64 = 0;
const SECONDARY_ID: u64 = 1;

/// Scripted finger plus tick pump over a fully wired wheel.
pub struct WheelRobot {
    runtime: Runtime,
    controller: WheelController,
    recording: Rc<RecordingObserver>,
    pinch_deltas: Rc<RefCell<Vec<f32>>>,
    twist_deltas: Rc<RefCell<Vec<f32>>>,
    finger: Option<TouchPoint>,
    time_ms: i64,
    ticks_drained: u64,
}

impl WheelRobot {
    /// Builds a calibrated wheel holding `labels`.
    ///
    /// Panics on an invalid config or viewport; robot construction failing
    /// is a test bug, not a condition to handle.
    pub fn new(config: WheelConfig, labels: &[&str], viewport_height_px: f32) -> Self {
        let robot = Self::uncalibrated(config, labels);
        robot
            .engine()
            .calibrate(viewport_height_px)
            .expect("robot viewport rejected");
        robot.recording.clear();
        robot
    }

    /// Builds the stack without calibrating, for exercising the deferred
    /// pre-layout paths.
    pub fn uncalibrated(config: WheelConfig, labels: &[&str]) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let engine =
            WheelEngine::new(runtime.handle(), config).expect("robot config rejected");
        let recording = Rc::new(RecordingObserver::new());
        engine.set_observer(Some(recording.clone() as Rc<dyn WheelObserver>));
        engine.set_data(labels.iter().map(|label| label.to_string()).collect());

        let mut controller = WheelController::new(engine);
        let pinch_deltas = Rc::new(RefCell::new(Vec::new()));
        let pinch_log = pinch_deltas.clone();
        controller.set_pinch_listener(move |delta| pinch_log.borrow_mut().push(delta));
        let twist_deltas = Rc::new(RefCell::new(Vec::new()));
        let twist_log = twist_deltas.clone();
        controller.set_twist_listener(move |delta| twist_log.borrow_mut().push(delta));

        Self {
            runtime,
            controller,
            recording,
            pinch_deltas,
            twist_deltas,
            finger: None,
            time_ms: 0,
            ticks_drained: 0,
        }
    }

    pub fn engine(&self) -> WheelEngine {
        self.controller.engine()
    }

    pub fn recording(&self) -> Rc<RecordingObserver> {
        self.recording.clone()
    }

    pub fn pinch_deltas(&self) -> Vec<f32> {
        self.pinch_deltas.borrow().clone()
    }

    pub fn twist_deltas(&self) -> Vec<f32> {
        self.twist_deltas.borrow().clone()
    }

    pub fn now_ms(&self) -> i64 {
        self.time_ms
    }

    /// Feeds a hand-built batch, for sequences the gesture helpers do not
    /// cover.
    pub fn feed(&mut self, batch: &PointerBatch) {
        self.controller.handle_batch(batch);
    }

    /// Puts the primary finger down at `(x, y)`.
    pub fn press(&mut self, x: f32, y: f32) {
        let point = TouchPoint {
            id: PRIMARY_ID,
            x,
            y,
        };
        self.finger = Some(point);
        let batch = PointerBatch::down(point, self.time_ms);
        self.controller.handle_batch(&batch);
    }

    /// Moves the finger by `(dx, dy)` in one frame.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        let mut point = self.finger.expect("move_by before press");
        point.x += dx;
        point.y += dy;
        self.finger = Some(point);
        self.time_ms += FRAME_MS;
        let batch = PointerBatch::moved(&[point], self.time_ms);
        self.controller.handle_batch(&batch);
    }

    /// Splits a movement into `steps` equal one-frame moves, like the
    /// sampled stream a real drag produces.
    pub fn drag_by(&mut self, dx: f32, dy: f32, steps: usize) {
        assert!(steps > 0, "drag_by needs at least one step");
        let step_x = dx / steps as f32;
        let step_y = dy / steps as f32;
        for _ in 0..steps {
            self.move_by(step_x, step_y);
        }
    }

    /// Lets the finger rest in place, without generating a batch. A rest
    /// longer than the tracker's stop window zeroes the release velocity.
    pub fn hold(&mut self, ms: i64) {
        self.time_ms += ms;
    }

    /// Lifts the finger where it is. The release velocity comes from the
    /// move stream fed so far.
    pub fn release(&mut self) {
        let point = self.finger.take().expect("release before press");
        self.time_ms += FRAME_MS;
        let batch = PointerBatch::up(point, self.time_ms);
        self.controller.handle_batch(&batch);
    }

    /// Aborts the gesture the way a window losing focus does.
    pub fn cancel_gesture(&mut self) {
        self.finger = None;
        let batch = PointerBatch::cancel(self.time_ms);
        self.controller.handle_batch(&batch);
    }

    /// Runs a whole press-drag-release in one call.
    pub fn swipe(&mut self, x: f32, y: f32, dx: f32, dy: f32, steps: usize) {
        self.press(x, y);
        self.drag_by(dx, dy, steps);
        self.release();
    }

    /// Adds a second finger, spreads it horizontally by `spread_px`, and
    /// lifts it. The primary finger stays put.
    pub fn pinch_open(&mut self, spread_px: f32) {
        let primary = self.finger.expect("pinch_open before press");
        let mut secondary = TouchPoint {
            id: SECONDARY_ID,
            x: primary.x + 100.0,
            y: primary.y,
        };

        let batch = PointerBatch::pointer_down(&[primary, secondary], SECONDARY_ID, self.time_ms);
        self.controller.handle_batch(&batch);

        secondary.x += spread_px;
        self.time_ms += FRAME_MS;
        let batch = PointerBatch::moved(&[primary, secondary], self.time_ms);
        self.controller.handle_batch(&batch);

        self.time_ms += FRAME_MS;
        let batch = PointerBatch::pointer_up(&[primary, secondary], SECONDARY_ID, self.time_ms);
        self.controller.handle_batch(&batch);
    }

    /// Drains `count` animation ticks with frame-spaced timestamps.
    pub fn tick(&mut self, count: usize) {
        let handle = self.runtime.handle();
        for _ in 0..count {
            self.ticks_drained += 1;
            handle.drain_ticks(self.ticks_drained * FRAME_NANOS);
        }
    }

    /// Ticks until no animation is pending. Panics after `max_ticks`, so a
    /// non-converging animation fails the test instead of hanging it.
    pub fn run_until_idle(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while !self.idle() {
            assert!(
                ticks < max_ticks,
                "animation still running after {ticks} ticks"
            );
            self.tick(1);
            ticks += 1;
        }
        ticks
    }

    pub fn idle(&self) -> bool {
        !self.runtime.handle().has_pending_ticks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_items() -> Vec<&'static str> {
        vec![
            "item-0", "item-1", "item-2", "item-3", "item-4", "item-5", "item-6", "item-7",
            "item-8", "item-9",
        ]
    }

    #[test]
    fn swipe_flings_and_settles_on_an_item_boundary() {
        let mut robot = WheelRobot::new(WheelConfig::default(), &ten_items(), 600.0);

        robot.swipe(100.0, 400.0, 0.0, -120.0, 4);
        let engine = robot.engine();
        assert!(engine.is_animating());

        let ticks = robot.run_until_idle(200);
        assert!(ticks < 100, "spent {ticks} ticks");
        robot.recording().assert_settled_once_on(6);
        assert!((engine.angle_deg() - 90.0).abs() < 1e-2);
    }

    #[test]
    fn holding_still_before_release_snaps_without_inertia() {
        let mut robot = WheelRobot::new(WheelConfig::default(), &ten_items(), 600.0);

        robot.press(100.0, 400.0);
        robot.drag_by(0.0, -100.0, 4);
        robot.hold(60);
        robot.release();

        let engine = robot.engine();
        assert_eq!(engine.velocity(), 0.0);

        robot.run_until_idle(100);
        robot.recording().assert_settled_once_on(1);
        assert!((engine.angle_deg() - 15.0).abs() < 1e-2);
    }

    #[test]
    fn pinch_reaches_the_hook_without_scrolling() {
        let mut robot = WheelRobot::new(WheelConfig::default(), &ten_items(), 600.0);

        robot.press(100.0, 300.0);
        robot.pinch_open(24.0);

        assert_eq!(robot.pinch_deltas(), vec![24.0]);
        assert_eq!(robot.twist_deltas(), vec![0.0]);
        assert_eq!(robot.engine().offset_px(), 0.0);
    }
}
