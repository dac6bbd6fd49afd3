//! The scroll engine: owns the wheel's offset, velocity, and settle
//! animation.
//!
//! All motion is tick-driven. A fling registers one slide callback per
//! tick; each tick advances the offset, decays the velocity, and
//! re-registers itself until the speed drops below the fling threshold,
//! at which point snapping takes over and steps the offset onto an item
//! boundary in fixed angular increments. Overscroll is detected before a
//! slide tick moves, so an out-of-bounds wheel always recovers to the
//! nearest bound before anything else happens. Cancellation is dropping
//! the pending registration, which is synchronous: after
//! [`WheelEngine::stop_animation`] returns no stale tick can fire.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use whirl_core::{RuntimeHandle, TickRegistration, TICK_INTERVAL_SECS};

use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::geometry::WheelGeometry;
use crate::items::ItemTable;

/// Absorbs f32 round-trip error between offsets and angles, so an item
/// placed by `set_item` reads back as exactly that item and a wheel
/// resting on a bound is treated as on it.
const ANGLE_EPSILON_DEG: f32 = 1e-3;

/// Receiver for engine state changes. The renderer redraws from
/// `on_offset_changed`; selection consumers listen for `on_settled`.
pub trait WheelObserver {
    /// Offset moved, by a drag or by one animation tick.
    fn on_offset_changed(&self, offset_px: f32, angle_deg: f32) {
        let _ = (offset_px, angle_deg);
    }

    /// The wheel came to rest centered on `index`. Fired once per rest
    /// state: on `set_item`, on `set_data`, and when settling finishes.
    fn on_settled(&self, index: usize, label: &str) {
        let _ = (index, label);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TickKind {
    /// Inertial slide: advance by velocity, decay, check bounds.
    Slide,
    /// Step toward the chosen item boundary.
    SnapItem,
    /// Step back inside the scrollable range. Stiffer than `SnapItem`.
    SnapRecover,
}

/// Callbacks gathered during a state mutation, delivered after the
/// engine borrow is released so observers may re-enter the engine.
#[derive(Default)]
struct Notices {
    offset: Option<(f32, f32)>,
    settled: Option<(usize, String)>,
}

struct EngineInner {
    config: WheelConfig,
    geometry: WheelGeometry,
    items: ItemTable,
    /// Accumulated scroll distance in pixels. Negative offsets point
    /// deeper into the list: the centered angle is `-offset * otd`.
    offset_px: f32,
    /// Inertial velocity in px/s. Only animation ticks mutate it.
    velocity: f32,
    /// Angular target of the active snap.
    will_to_deg: f32,
    /// Item to center once calibration establishes the pixel mapping.
    pending_item: Option<usize>,
    observer: Option<Rc<dyn WheelObserver>>,
    registration: Option<TickRegistration>,
}

impl EngineInner {
    fn angle_deg(&self) -> f32 {
        match self.geometry.offset_to_degree() {
            Some(otd) => -self.offset_px * otd,
            None => 0.0,
        }
    }

    /// Applies a drag or slide delta with rubber-band resistance.
    ///
    /// Resistance divides the movement while the wheel is beyond either
    /// bound, and on a bound when the movement points further out. Motion
    /// strictly inside the range is never damped.
    fn apply_offset_delta(&mut self, moved_px: f32, notes: &mut Notices) {
        let mut effective = moved_px;
        if self.geometry.is_calibrated() {
            let angle = self.angle_deg();
            let max = self.geometry.max_offset_deg();
            let beyond = angle > max || angle < 0.0;
            let outward_at_bound = (angle.abs() <= ANGLE_EPSILON_DEG && moved_px > 0.0)
                || ((angle - max).abs() <= ANGLE_EPSILON_DEG && moved_px < 0.0);
            if beyond || outward_at_bound {
                effective /= self.config.resistance_factor;
            }
        }
        self.offset_px += effective;
        notes.offset = Some((self.offset_px, self.angle_deg()));
    }

    /// One inertial tick. Returns the kind of tick to schedule next, or
    /// `None` when the animation chain ends here.
    fn slide_tick(&mut self, notes: &mut Notices) -> Option<TickKind> {
        if !self.geometry.is_calibrated() {
            return None;
        }

        // Bounds are checked before moving, so an overshoot from the
        // previous tick is visible for exactly one frame and then pulled
        // back.
        let angle = self.angle_deg();
        let max = self.geometry.max_offset_deg();
        if angle > max {
            self.velocity = 0.0;
            self.will_to_deg = max;
            return Some(TickKind::SnapRecover);
        }
        if angle < 0.0 {
            self.velocity = 0.0;
            self.will_to_deg = 0.0;
            return Some(TickKind::SnapRecover);
        }

        self.apply_offset_delta(self.velocity * TICK_INTERVAL_SECS, notes);

        if self.velocity.abs() <= self.config.min_fling_velocity {
            self.velocity = 0.0;
            self.will_to_deg = self.geometry.snap_target_deg(self.angle_deg());
            return Some(TickKind::SnapItem);
        }

        if !self.config.infinite_inertia() {
            let decay = self.config.decay_per_tick;
            self.velocity = if self.velocity.abs() <= decay {
                0.0
            } else if self.velocity > 0.0 {
                self.velocity - decay
            } else {
                self.velocity + decay
            };
        }
        Some(TickKind::Slide)
    }

    /// One snapping tick toward `will_to_deg`. Within one step of the
    /// target it lands exactly on it and reports the settled item.
    fn snap_tick(&mut self, kind: TickKind, notes: &mut Notices) -> Option<TickKind> {
        let Some(otd) = self.geometry.offset_to_degree() else {
            return None;
        };
        let step_deg = match kind {
            TickKind::SnapRecover => self.config.overscroll_step_deg,
            _ => self.config.snap_step_deg,
        };

        let angle = self.angle_deg();
        if (angle - self.will_to_deg).abs() <= step_deg {
            self.offset_px = -self.will_to_deg / otd;
            notes.offset = Some((self.offset_px, self.angle_deg()));
            let index = (self.will_to_deg / self.geometry.pitch_deg()).round() as usize;
            notes.settled = Some((index, self.items.center_label(index).to_string()));
            return None;
        }

        if angle < self.will_to_deg {
            self.offset_px -= step_deg / otd;
        } else {
            self.offset_px += step_deg / otd;
        }
        notes.offset = Some((self.offset_px, self.angle_deg()));
        Some(kind)
    }
}

/// Tick-driven scroll engine for the picker wheel.
///
/// Clones share the same wheel. The engine is single-threaded; drive it
/// from the thread that drains the runtime.
pub struct WheelEngine {
    inner: Rc<RefCell<EngineInner>>,
    runtime: RuntimeHandle,
}

impl Clone for WheelEngine {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            runtime: self.runtime.clone(),
        }
    }
}

impl WheelEngine {
    /// Builds an engine with an empty item table. Fails when the config
    /// does not validate.
    pub fn new(runtime: RuntimeHandle, config: WheelConfig) -> Result<Self, WheelError> {
        config.validate()?;
        let mut geometry = WheelGeometry::new(config.visible_items);
        let items = ItemTable::from_labels(Vec::new(), geometry.padding_count() / 2);
        geometry.set_item_count(items.unpadded_len());
        Ok(Self {
            inner: Rc::new(RefCell::new(EngineInner {
                config,
                geometry,
                items,
                offset_px: 0.0,
                velocity: 0.0,
                will_to_deg: 0.0,
                pending_item: None,
                observer: None,
                registration: None,
            })),
            runtime,
        })
    }

    pub fn new_with_observer(
        runtime: RuntimeHandle,
        config: WheelConfig,
        observer: Rc<dyn WheelObserver>,
    ) -> Result<Self, WheelError> {
        let engine = Self::new(runtime, config)?;
        engine.inner.borrow_mut().observer = Some(observer);
        Ok(engine)
    }

    pub fn set_observer(&self, observer: Option<Rc<dyn WheelObserver>>) {
        self.inner.borrow_mut().observer = observer;
    }

    /// Establishes the pixel-to-degree mapping from the laid-out viewport
    /// height, then centers the deferred item (or, on the first
    /// calibration, the configured initial item).
    ///
    /// Recalibrating resets the wheel to item 0: the old offset was
    /// measured against a radius that no longer exists.
    pub fn calibrate(&self, viewport_height_px: f32) -> Result<(), WheelError> {
        if !(viewport_height_px > 0.0) {
            return Err(WheelError::InvalidViewport {
                height_px: viewport_height_px,
            });
        }
        let index = {
            let mut state = self.inner.borrow_mut();
            let recalibration = state.geometry.is_calibrated();
            state.geometry.calibrate(viewport_height_px);
            let fallback = if recalibration {
                0
            } else {
                state.config.initial_item
            };
            state.pending_item.take().unwrap_or(fallback)
        };
        self.set_item(index)
    }

    /// Applies a drag movement in pixels, with out-of-bounds resistance.
    /// Always reports the new offset to the observer.
    pub fn update_offset(&self, moved_px: f32) {
        if !moved_px.is_finite() {
            log::warn!("ignoring non-finite drag delta {moved_px}");
            return;
        }
        let mut notes = Notices::default();
        self.inner.borrow_mut().apply_offset_delta(moved_px, &mut notes);
        self.deliver(notes);
    }

    /// Centers item `index`, cancelling any animation.
    ///
    /// The index may be anything up to and including the item count; the
    /// top end centers the first back-padding slot. Before calibration
    /// the index is stored and applied when layout completes; the settle
    /// notification still fires immediately.
    pub fn set_item(&self, index: usize) -> Result<(), WheelError> {
        let mut notes = Notices::default();
        {
            let mut state = self.inner.borrow_mut();
            let max = state.items.unpadded_len();
            if index > max {
                return Err(WheelError::IndexOutOfRange { index, max });
            }

            state.velocity = 0.0;
            state.registration = None;

            match state.geometry.offset_to_degree() {
                None => state.pending_item = Some(index),
                Some(otd) => {
                    state.offset_px = -(index as f32) * state.geometry.pitch_deg() / otd;
                    notes.offset = Some((state.offset_px, state.angle_deg()));
                }
            }
            notes.settled = Some((index, state.items.center_label(index).to_string()));
        }
        self.deliver(notes);
        Ok(())
    }

    /// Replaces the item list. Resets offset and velocity, cancels any
    /// animation and deferred item, and reports item 0 as current.
    pub fn set_data(&self, labels: Vec<String>) {
        let mut notes = Notices::default();
        {
            let mut state = self.inner.borrow_mut();
            state.registration = None;
            state.velocity = 0.0;
            state.will_to_deg = 0.0;
            state.pending_item = None;
            let pad = state.geometry.padding_count() / 2;
            state.items = ItemTable::from_labels(labels, pad);
            let count = state.items.unpadded_len();
            state.geometry.set_item_count(count);
            state.offset_px = 0.0;
            notes.offset = Some((0.0, 0.0));
            notes.settled = Some((0, state.items.center_label(0).to_string()));
        }
        self.deliver(notes);
    }

    /// Hands the wheel its release velocity and starts the inertial
    /// animation. A zero velocity degenerates to an immediate snap.
    pub fn start_animation(&self, velocity: f32) {
        let velocity = if velocity.is_finite() {
            velocity
        } else {
            // A NaN here would poison the offset on the first tick.
            log::warn!("non-finite fling velocity {velocity}, snapping instead");
            0.0
        };
        {
            let mut state = self.inner.borrow_mut();
            state.velocity = velocity;
            state.registration = None;
        }
        schedule_tick(&self.inner, &self.runtime, TickKind::Slide);
    }

    /// Cancels any pending tick. Safe to call repeatedly; after it
    /// returns, no queued tick of this engine can fire.
    pub fn stop_animation(&self) {
        self.inner.borrow_mut().registration = None;
    }

    /// Adjusts the per-tick velocity decay. Zero or negative switches to
    /// infinite inertia, matching [`WheelConfig::decay_per_tick`].
    pub fn set_decay_per_tick(&self, decay: f32) {
        self.inner.borrow_mut().config.decay_per_tick = decay;
    }

    /// Index of the item currently nearest the center. Before calibration
    /// this is the deferred item, if any.
    pub fn current_index(&self) -> usize {
        let state = self.inner.borrow();
        if !state.geometry.is_calibrated() {
            return state.pending_item.unwrap_or(0);
        }
        let pitch = state.geometry.pitch_deg();
        let index = ((state.angle_deg() + ANGLE_EPSILON_DEG) / pitch).floor().max(0.0) as usize;
        index.min(state.items.unpadded_len())
    }

    /// Label `slots_from_center` positions away from the centered slot,
    /// for renderers walking the visible window. Padding and past-the-end
    /// slots read as blank.
    pub fn window_label(&self, slots_from_center: isize) -> String {
        let center = self.current_index() as isize;
        let state = self.inner.borrow();
        let padded = center + state.items.pad() as isize + slots_from_center;
        state.items.label_at(padded).to_string()
    }

    pub fn offset_px(&self) -> f32 {
        self.inner.borrow().offset_px
    }

    /// Centered angle in degrees; 0 until calibration.
    pub fn angle_deg(&self) -> f32 {
        self.inner.borrow().angle_deg()
    }

    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    pub fn is_calibrated(&self) -> bool {
        self.inner.borrow().geometry.is_calibrated()
    }

    /// Snapshot of the tuning the engine runs with.
    pub fn config(&self) -> WheelConfig {
        self.inner.borrow().config
    }

    pub fn item_count(&self) -> usize {
        self.inner.borrow().items.unpadded_len()
    }

    pub fn pitch_deg(&self) -> f32 {
        self.inner.borrow().geometry.pitch_deg()
    }

    pub fn max_offset_deg(&self) -> f32 {
        self.inner.borrow().geometry.max_offset_deg()
    }

    pub fn wheel_radius_px(&self) -> Option<f32> {
        self.inner.borrow().geometry.wheel_radius_px()
    }

    fn deliver(&self, notes: Notices) {
        deliver_notices(&self.inner, notes);
    }
}

/// Delivers gathered notices with no engine borrow held, so observers may
/// call back into the engine.
fn deliver_notices(inner: &Rc<RefCell<EngineInner>>, notes: Notices) {
    let observer = inner.borrow().observer.clone();
    let Some(observer) = observer else {
        return;
    };
    if let Some((offset_px, angle_deg)) = notes.offset {
        observer.on_offset_changed(offset_px, angle_deg);
    }
    if let Some((index, label)) = notes.settled {
        observer.on_settled(index, &label);
    }
}

/// Queues the next animation tick. The callback holds only a weak
/// reference, so an engine dropped mid-animation simply stops.
fn schedule_tick(inner: &Rc<RefCell<EngineInner>>, runtime: &RuntimeHandle, kind: TickKind) {
    let weak: Weak<RefCell<EngineInner>> = Rc::downgrade(inner);
    let runtime_for_tick = runtime.clone();
    let registration = runtime.tick_clock().with_tick_nanos(move |_now_nanos| {
        if let Some(inner) = weak.upgrade() {
            run_tick(&inner, &runtime_for_tick, kind);
        }
    });
    inner.borrow_mut().registration = Some(registration);
}

fn run_tick(inner: &Rc<RefCell<EngineInner>>, runtime: &RuntimeHandle, kind: TickKind) {
    let mut notes = Notices::default();
    let next = {
        let mut state = inner.borrow_mut();
        // This tick's registration is spent.
        state.registration = None;
        match kind {
            TickKind::Slide => state.slide_tick(&mut notes),
            TickKind::SnapItem | TickKind::SnapRecover => state.snap_tick(kind, &mut notes),
        }
    };

    if let Some(next_kind) = next {
        schedule_tick(inner, runtime, next_kind);
    }
    deliver_notices(inner, notes);
}
