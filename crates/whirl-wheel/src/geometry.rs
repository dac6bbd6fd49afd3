//! Angular bookkeeping for the wheel face.
//!
//! The wheel renders a fixed 120 degree window. Item spacing (pitch) is
//! derived from the configured visible-item count, and the pixel-to-degree
//! calibration comes from the projected wheel radius at layout time. Until
//! [`WheelGeometry::calibrate`] runs, offsets cannot be mapped to angles and
//! the engine defers any item positioning.

/// Total angular window the wheel face spans, in degrees.
pub const ANGULAR_SPAN_DEG: f32 = 120.0;

/// Dragging one wheel radius worth of pixels sweeps this many degrees.
const RADIUS_SWEEP_DEG: f32 = 30.0;

/// Scale the renderer applies so the front face reads at natural size.
pub fn projection_scale() -> f32 {
    1.0 / (1.0 - (ANGULAR_SPAN_DEG / 2.0).to_radians().cos())
}

#[derive(Clone, Copy, Debug)]
pub struct WheelGeometry {
    pitch_deg: f32,
    max_offset_deg: f32,
    wheel_radius_px: Option<f32>,
    offset_to_degree: Option<f32>,
}

impl WheelGeometry {
    /// Builds geometry for a validated visible-item count.
    pub fn new(visible_items: u32) -> Self {
        Self {
            pitch_deg: ANGULAR_SPAN_DEG / (visible_items + 1) as f32,
            max_offset_deg: 0.0,
            wheel_radius_px: None,
            offset_to_degree: None,
        }
    }

    /// Angular spacing between adjacent items.
    pub fn pitch_deg(&self) -> f32 {
        self.pitch_deg
    }

    /// Upper bound of the scrollable angular range. Zero for a single item.
    pub fn max_offset_deg(&self) -> f32 {
        self.max_offset_deg
    }

    /// Total number of placeholder slots the item list is padded with.
    /// Always even, so it splits cleanly front and back.
    pub fn padding_count(&self) -> usize {
        (ANGULAR_SPAN_DEG / self.pitch_deg) as usize
    }

    /// Recomputes the scrollable range for a new unpadded item count.
    pub fn set_item_count(&mut self, unpadded_len: usize) {
        self.max_offset_deg = self.pitch_deg * unpadded_len.saturating_sub(1) as f32;
    }

    /// Fixes the pixel-to-degree conversion from the laid-out viewport.
    ///
    /// The wheel radius is the projected depth of the face: half the
    /// viewport height scaled by the sine of the half-span.
    pub fn calibrate(&mut self, viewport_height_px: f32) {
        let radius = viewport_height_px / 2.0 * (ANGULAR_SPAN_DEG / 2.0).to_radians().sin();
        self.wheel_radius_px = Some(radius);
        self.offset_to_degree = Some(RADIUS_SWEEP_DEG / radius);
    }

    pub fn is_calibrated(&self) -> bool {
        self.offset_to_degree.is_some()
    }

    /// Degrees per pixel of scroll offset, once calibrated.
    pub fn offset_to_degree(&self) -> Option<f32> {
        self.offset_to_degree
    }

    pub fn wheel_radius_px(&self) -> Option<f32> {
        self.wheel_radius_px
    }

    /// Picks the item boundary a resting wheel should settle on.
    ///
    /// Remainders of half a pitch or more round up to the next boundary,
    /// so a flick that carries the wheel most of the way to an item never
    /// falls back to the previous one. The half-pitch tie rounds up.
    pub fn snap_target_deg(&self, angle_deg: f32) -> f32 {
        let remainder = angle_deg % self.pitch_deg;
        let index = (angle_deg / self.pitch_deg) as i32;
        if remainder >= self.pitch_deg / 2.0 {
            (index + 1) as f32 * self.pitch_deg
        } else {
            index as f32 * self.pitch_deg
        }
    }
}
