use std::{
    ops::{Add, Sub},
    time::Duration,
};

type FixedPoint = fixed::types::I32F32;

/// A fixed-point representation of a point on a monotonic clock
///
/// The raw bits fit in a single `i64`, so a timestamp can be shared between
/// threads through an `AtomicI64` without tearing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timestamp {
    seconds: FixedPoint,
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::zero()
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.seconds.cmp(&other.seconds)
    }
}

impl Sub for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            seconds: self.seconds.saturating_sub(rhs.seconds),
        }
    }
}

impl Add for Timestamp {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            seconds: self.seconds.saturating_add(rhs.seconds),
        }
    }
}

impl Timestamp {
    /// Zero seconds
    pub fn zero() -> Self {
        Self {
            seconds: FixedPoint::ZERO,
        }
    }

    pub(crate) fn from_raw_i64(raw_value: i64) -> Self {
        Self {
            seconds: FixedPoint::from_bits(raw_value),
        }
    }

    pub(crate) fn as_raw_i64(&self) -> i64 {
        self.seconds.to_bits()
    }

    /// Create a timestamp from a number of seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            seconds: FixedPoint::saturating_from_num(seconds),
        }
    }

    /// Create a timestamp from a number of milliseconds
    pub fn from_millis(milliseconds: u64) -> Self {
        Self::from_seconds(milliseconds as f64 / 1_000.0)
    }

    /// Create a timestamp from a duration
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_seconds(duration.as_secs_f64())
    }

    /// Get the number of seconds
    pub fn as_seconds(&self) -> f64 {
        self.seconds.to_num()
    }

    /// Get the number of whole milliseconds
    pub fn as_millis(&self) -> i64 {
        (self.as_seconds() * 1_000.0).round() as i64
    }

    /// Increment by a duration
    pub fn incremented_by(&self, duration: Duration) -> Self {
        *self + Self::from_duration(duration)
    }

    /// Check whether less than `threshold` separates this timestamp from an
    /// earlier one
    pub fn is_within(&self, earlier: Timestamp, threshold: Duration) -> bool {
        *self - earlier < Self::from_duration(threshold)
    }
}
