#[derive(Debug, Clone, PartialEq)]
pub enum WheelError {
    /// Visible-item count must be an odd number between 1 and 11.
    InvalidVisibleItems { given: u32 },
    /// A tuning value was outside its usable range.
    InvalidTuning { field: &'static str, value: f32 },
    /// `set_item` index beyond the scrollable range.
    IndexOutOfRange { index: usize, max: usize },
    /// Calibration needs a positive viewport height.
    InvalidViewport { height_px: f32 },
}

impl std::fmt::Display for WheelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WheelError::InvalidVisibleItems { given } => {
                write!(f, "visible items must be odd and within 1..=11, got {given}")
            }
            WheelError::InvalidTuning { field, value } => {
                write!(f, "config field {field} has unusable value {value}")
            }
            WheelError::IndexOutOfRange { index, max } => {
                write!(f, "item index {index} out of range 0..={max}")
            }
            WheelError::InvalidViewport { height_px } => {
                write!(f, "viewport height must be positive, got {height_px}")
            }
        }
    }
}

impl std::error::Error for WheelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let err = WheelError::InvalidVisibleItems { given: 4 };
        assert_eq!(
            err.to_string(),
            "visible items must be odd and within 1..=11, got 4"
        );

        let err = WheelError::IndexOutOfRange { index: 9, max: 5 };
        assert_eq!(err.to_string(), "item index 9 out of range 0..=5");
    }
}
