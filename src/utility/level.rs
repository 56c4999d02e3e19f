pub const MINUS_INFINITY_DECIBELS: f64 = -128.0;

/// A meter reading that can be viewed as linear gain or in decibels
///
/// Silence reads as [`MINUS_INFINITY_DECIBELS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Level {
    linear: f64,
}

impl Level {
    /// Silence (0.0 / -inf dB)
    pub fn zero() -> Self {
        Level::from_linear(0.0)
    }

    /// Convert to dB
    pub fn as_db(&self) -> f64 {
        if self.linear <= 1e-9 {
            MINUS_INFINITY_DECIBELS
        } else {
            20.0 * self.linear.log10()
        }
    }

    /// Create a level from a linear envelope value
    pub fn from_linear(linear_gain: f64) -> Self {
        Self {
            linear: linear_gain,
        }
    }

    /// Create a level from a linear envelope value
    pub fn from_linear_f32(linear_gain: f32) -> Self {
        Self::from_linear(linear_gain as f64)
    }

    /// Convert to linear gain
    pub fn as_linear(&self) -> f64 {
        self.linear
    }

    /// Convert to linear gain
    pub fn as_linear_f32(&self) -> f32 {
        self.linear as f32
    }

    /// The signal has reached full scale
    pub fn is_clipping(&self) -> bool {
        self.linear >= 1.0
    }

    /// Check if the value represents silence
    pub fn is_zero(&self) -> bool {
        self.linear.abs() < 1e-9
    }
}
