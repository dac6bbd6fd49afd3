use crate::error::WheelError;

/// Tuning block for the wheel engine. All values have working defaults;
/// construct with `WheelConfig::default()` and override fields as needed.
///
/// Velocities are in pixels per second, angles in degrees. One tick is
/// [`whirl_core::TICK_INTERVAL_SECS`] of animation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelConfig {
    /// How many items the wheel face shows at once. Odd, 1 through 11.
    pub visible_items: u32,
    /// Velocity removed on every inertial tick. Zero or negative switches
    /// the wheel to infinite inertia: it never slows down on its own.
    pub decay_per_tick: f32,
    /// Below this speed the inertial slide ends and snapping takes over.
    pub min_fling_velocity: f32,
    /// Divisor applied to drag deltas while the wheel is out of bounds.
    pub resistance_factor: f32,
    /// Degrees per tick when settling onto an item.
    pub snap_step_deg: f32,
    /// Degrees per tick when recovering from overscroll. Stiffer than the
    /// item snap so the wheel does not linger outside its range.
    pub overscroll_step_deg: f32,
    /// Item centered once layout calibration completes.
    pub initial_item: usize,
    /// Cap on the release velocity the gesture layer may report.
    pub max_gesture_velocity: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            visible_items: 7,
            decay_per_tick: 50.0,
            min_fling_velocity: 50.0,
            resistance_factor: 4.0,
            snap_step_deg: 0.5,
            overscroll_step_deg: 2.0,
            initial_item: 0,
            max_gesture_velocity: whirl_input::MAX_GESTURE_VELOCITY,
        }
    }
}

impl WheelConfig {
    pub fn validate(&self) -> Result<(), WheelError> {
        if self.visible_items < 1 || self.visible_items > 11 || self.visible_items % 2 == 0 {
            return Err(WheelError::InvalidVisibleItems {
                given: self.visible_items,
            });
        }
        if !(self.resistance_factor > 0.0) {
            return Err(WheelError::InvalidTuning {
                field: "resistance_factor",
                value: self.resistance_factor,
            });
        }
        if !(self.snap_step_deg > 0.0) {
            return Err(WheelError::InvalidTuning {
                field: "snap_step_deg",
                value: self.snap_step_deg,
            });
        }
        if !(self.overscroll_step_deg > 0.0) {
            return Err(WheelError::InvalidTuning {
                field: "overscroll_step_deg",
                value: self.overscroll_step_deg,
            });
        }
        if !(self.min_fling_velocity >= 0.0) {
            return Err(WheelError::InvalidTuning {
                field: "min_fling_velocity",
                value: self.min_fling_velocity,
            });
        }
        if !(self.max_gesture_velocity > 0.0) || !self.max_gesture_velocity.is_finite() {
            return Err(WheelError::InvalidTuning {
                field: "max_gesture_velocity",
                value: self.max_gesture_velocity,
            });
        }
        Ok(())
    }

    /// True when the wheel should keep its release velocity forever.
    pub fn infinite_inertia(&self) -> bool {
        self.decay_per_tick <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(WheelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn every_odd_count_up_to_eleven_is_accepted() {
        for visible in [1, 3, 5, 7, 9, 11] {
            let config = WheelConfig {
                visible_items: visible,
                ..WheelConfig::default()
            };
            assert_eq!(config.validate(), Ok(()), "visible_items {visible}");
        }
    }

    #[test]
    fn even_and_out_of_range_counts_are_rejected() {
        for visible in [0, 2, 6, 12, 13] {
            let config = WheelConfig {
                visible_items: visible,
                ..WheelConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(WheelError::InvalidVisibleItems { given: visible }),
                "visible_items {visible}"
            );
        }
    }

    #[test]
    fn nonpositive_resistance_is_rejected() {
        let config = WheelConfig {
            resistance_factor: 0.0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WheelError::InvalidTuning {
                field: "resistance_factor",
                ..
            })
        ));
    }

    #[test]
    fn velocity_cap_must_be_positive_and_finite() {
        for cap in [0.0, -200.0, f32::INFINITY, f32::NAN] {
            let config = WheelConfig {
                max_gesture_velocity: cap,
                ..WheelConfig::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(WheelError::InvalidTuning {
                        field: "max_gesture_velocity",
                        ..
                    })
                ),
                "cap {cap}"
            );
        }
    }

    #[test]
    fn nonpositive_decay_means_infinite_inertia() {
        let mut config = WheelConfig::default();
        assert!(!config.infinite_inertia());
        config.decay_per_tick = 0.0;
        assert!(config.infinite_inertia());
        config.decay_per_tick = -5.0;
        assert!(config.infinite_inertia());
    }
}
