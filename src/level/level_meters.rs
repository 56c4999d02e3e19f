use std::sync::atomic::Ordering;

use atomic_float::AtomicF32;

use crate::Level;

/// Per-channel envelope values published by the realtime thread
pub struct LevelMeters {
    levels: Vec<AtomicF32>,
}

impl LevelMeters {
    pub fn new(channel_count: usize) -> Self {
        Self {
            levels: (0..channel_count).map(|_| AtomicF32::new(0.0)).collect(),
        }
    }

    pub fn channel_count(&self) -> usize {
        self.levels.len()
    }

    pub fn store(&self, channel: usize, value: f32) {
        if let Some(level) = self.levels.get(channel) {
            level.store(value, Ordering::Release);
        }
    }

    pub fn load(&self, channel: usize) -> f32 {
        self.levels
            .get(channel)
            .map_or(0.0, |level| level.load(Ordering::Acquire))
    }

    /// Zero every channel from `first_channel` onwards
    pub fn silence_from(&self, first_channel: usize) {
        for level in self.levels.iter().skip(first_channel) {
            level.store(0.0, Ordering::Release);
        }
    }

    /// Copy the current values into `destination`, one entry per channel
    pub fn read_into(&self, destination: &mut [Level]) {
        for (level, value) in destination.iter_mut().zip(self.levels.iter()) {
            *level = Level::from_linear_f32(value.load(Ordering::Acquire));
        }
    }
}
