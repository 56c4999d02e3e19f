use std::fmt;

/// A reason a [`TelemetryConfig`](crate::TelemetryConfig) was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The channel count must be between one and the maximum channel count
    ChannelCount(usize),
    /// Sample queues must hold at least one sample
    SampleCapacity,
    /// The scope window must hold at least one sample
    DisplayWindow,
    /// The poll timer needs a non-zero interval
    PollInterval,
    /// The activity threshold must outlast the poll interval
    ActivityThreshold { threshold_ms: u64, poll_interval_ms: u64 },
    /// The decay factor must lie strictly between zero and one
    LevelDecay(f32),
    /// The snap-to-zero floor must lie in `[0, 1)`
    LevelFloor(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ChannelCount(count) => write!(
                f,
                "channel count {} is outside 1..={}",
                count,
                crate::MAXIMUM_CHANNEL_COUNT
            ),
            ConfigError::SampleCapacity => write!(f, "sample capacity must be non-zero"),
            ConfigError::DisplayWindow => write!(f, "display window must be non-zero"),
            ConfigError::PollInterval => write!(f, "poll interval must be non-zero"),
            ConfigError::ActivityThreshold {
                threshold_ms,
                poll_interval_ms,
            } => write!(
                f,
                "activity threshold {}ms must be longer than the poll interval {}ms",
                threshold_ms, poll_interval_ms
            ),
            ConfigError::LevelDecay(decay) => {
                write!(f, "level decay {} is outside (0, 1)", decay)
            }
            ConfigError::LevelFloor(floor) => {
                write!(f, "level floor {} is outside [0, 1)", floor)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
