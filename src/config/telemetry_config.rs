use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::MAXIMUM_CHANNEL_COUNT;

/// Settings shared by the realtime and UI halves of the telemetry relay
///
/// Every field has a default, so a partial document deserializes into a
/// complete config:
///
/// ```json
/// { "channel_count": 2, "activity_threshold_ms": 500 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub channel_count: usize,
    pub sample_capacity: usize,
    pub display_window: usize,
    pub activity_threshold_ms: u64,
    pub poll_interval_ms: u64,
    pub level_decay: f32,
    pub level_floor: f32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            channel_count: MAXIMUM_CHANNEL_COUNT,
            sample_capacity: crate::SAMPLE_QUEUE_CAPACITY,
            display_window: crate::SAMPLE_QUEUE_CAPACITY,
            activity_threshold_ms: 700,
            poll_interval_ms: 100,
            level_decay: 0.99992,
            level_floor: 0.001,
        }
    }
}

impl TelemetryConfig {
    pub fn with_channel_count(self, channel_count: usize) -> Self {
        Self {
            channel_count,
            ..self
        }
    }

    pub fn with_sample_capacity(self, sample_capacity: usize) -> Self {
        Self {
            sample_capacity,
            ..self
        }
    }

    pub fn with_display_window(self, display_window: usize) -> Self {
        Self {
            display_window,
            ..self
        }
    }

    pub fn with_activity_threshold(self, threshold: Duration) -> Self {
        Self {
            activity_threshold_ms: u64::try_from(threshold.as_millis()).unwrap_or(u64::MAX),
            ..self
        }
    }

    pub fn with_poll_interval(self, interval: Duration) -> Self {
        Self {
            poll_interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            ..self
        }
    }

    pub fn with_level_decay(self, level_decay: f32) -> Self {
        Self {
            level_decay,
            ..self
        }
    }

    pub fn with_level_floor(self, level_floor: f32) -> Self {
        Self {
            level_floor,
            ..self
        }
    }

    pub fn activity_threshold(&self) -> Duration {
        Duration::from_millis(self.activity_threshold_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check every field, reporting the first one that is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAXIMUM_CHANNEL_COUNT).contains(&self.channel_count) {
            return Err(ConfigError::ChannelCount(self.channel_count));
        }

        if self.sample_capacity == 0 {
            return Err(ConfigError::SampleCapacity);
        }

        if self.display_window == 0 {
            return Err(ConfigError::DisplayWindow);
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::PollInterval);
        }

        if self.activity_threshold_ms <= self.poll_interval_ms {
            return Err(ConfigError::ActivityThreshold {
                threshold_ms: self.activity_threshold_ms,
                poll_interval_ms: self.poll_interval_ms,
            });
        }

        if !(self.level_decay > 0.0 && self.level_decay < 1.0) {
            return Err(ConfigError::LevelDecay(self.level_decay));
        }

        if !(0.0..1.0).contains(&self.level_floor) {
            return Err(ConfigError::LevelFloor(self.level_floor));
        }

        Ok(())
    }

    /// Validate and return the config
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}
