//! Observer that records every engine notification for later assertions.

use std::cell::RefCell;

use whirl_wheel::WheelObserver;

/// Captures offset and settle notifications in arrival order.
///
/// Attach one through [`whirl_wheel::WheelEngine::set_observer`] (the
/// robot does this for you) and assert on the captured history after
/// driving the wheel.
#[derive(Default)]
pub struct RecordingObserver {
    offsets: RefCell<Vec<(f32, f32)>>,
    settles: RefCell<Vec<(usize, String)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.offsets.borrow_mut().clear();
        self.settles.borrow_mut().clear();
    }

    /// All `(offset_px, angle_deg)` notifications, oldest first.
    pub fn offsets(&self) -> Vec<(f32, f32)> {
        self.offsets.borrow().clone()
    }

    /// All `(index, label)` settle notifications, oldest first.
    pub fn settles(&self) -> Vec<(usize, String)> {
        self.settles.borrow().clone()
    }

    pub fn settle_count(&self) -> usize {
        self.settles.borrow().len()
    }

    pub fn last_settle(&self) -> Option<(usize, String)> {
        self.settles.borrow().last().cloned()
    }

    /// Highest angle seen in any offset notification, or negative
    /// infinity when none arrived. Useful for spotting overscroll
    /// transients.
    pub fn max_angle_deg(&self) -> f32 {
        self.offsets
            .borrow()
            .iter()
            .map(|(_, angle)| *angle)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn min_angle_deg(&self) -> f32 {
        self.offsets
            .borrow()
            .iter()
            .map(|(_, angle)| *angle)
            .fold(f32::INFINITY, f32::min)
    }

    /// Panics unless exactly one settle arrived, on `index`.
    pub fn assert_settled_once_on(&self, index: usize) {
        let settles = self.settles.borrow();
        assert_eq!(
            settles.len(),
            1,
            "expected one settle, recorded {settles:?}"
        );
        assert_eq!(settles[0].0, index, "settled on {settles:?}");
    }
}

impl WheelObserver for RecordingObserver {
    fn on_offset_changed(&self, offset_px: f32, angle_deg: f32) {
        self.offsets.borrow_mut().push((offset_px, angle_deg));
    }

    fn on_settled(&self, index: usize, label: &str) {
        self.settles.borrow_mut().push((index, label.to_string()));
    }
}
