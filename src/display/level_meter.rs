use crate::{Level, TelemetryListener};

/// What a level meter widget draws
#[derive(Default)]
pub struct LevelMeterModel {
    levels: Vec<Level>,
    clipping: Vec<bool>,
    needs_repaint: bool,
}

impl LevelMeterModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, channel: usize) -> Level {
        self.levels.get(channel).copied().unwrap_or_default()
    }

    /// A channel's level in dB, for the numeric readout
    pub fn level_db(&self, channel: usize) -> f64 {
        self.level(channel).as_db()
    }

    pub fn is_clipping(&self, channel: usize) -> bool {
        self.clipping.get(channel).copied().unwrap_or(false)
    }

    /// Length of a channel's bar when the meter is `meter_width` wide
    pub fn bar_width(&self, channel: usize, meter_width: f32) -> f32 {
        (self.level(channel).as_linear_f32() * meter_width).min(meter_width)
    }

    /// Returns true once after each update
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }
}

impl TelemetryListener for LevelMeterModel {
    fn on_level_changed(&mut self, levels: &[Level]) {
        self.levels.clear();
        self.levels.extend_from_slice(levels);

        self.clipping.clear();
        self.clipping
            .extend(levels.iter().map(|level| level.is_clipping()));

        self.needs_repaint = true;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::utility::MINUS_INFINITY_DECIBELS;

    #[test]
    fn flags_clipping_per_channel() {
        let mut meter = LevelMeterModel::new();
        meter.on_level_changed(&[Level::from_linear(1.0), Level::from_linear(0.5)]);

        assert!(meter.is_clipping(0));
        assert!(!meter.is_clipping(1));

        meter.on_level_changed(&[Level::from_linear(0.2), Level::from_linear(0.5)]);
        assert!(!meter.is_clipping(0));
    }

    #[test]
    fn bar_never_overflows_meter() {
        let mut meter = LevelMeterModel::new();
        meter.on_level_changed(&[Level::from_linear(1.5), Level::from_linear(0.25)]);

        assert_relative_eq!(meter.bar_width(0, 100.0), 100.0);
        assert_relative_eq!(meter.bar_width(1, 100.0), 25.0);
        assert_relative_eq!(meter.bar_width(5, 100.0), 0.0);
    }

    #[test]
    fn reads_levels_in_decibels() {
        let mut meter = LevelMeterModel::new();
        meter.on_level_changed(&[Level::from_linear(0.5), Level::zero()]);

        assert_relative_eq!(meter.level_db(0), -6.0206, epsilon = 1e-3);
        assert_relative_eq!(meter.level_db(1), MINUS_INFINITY_DECIBELS);
        assert_relative_eq!(meter.level_db(4), MINUS_INFINITY_DECIBELS);
    }

    #[test]
    fn repaint_is_requested_once_per_update() {
        let mut meter = LevelMeterModel::new();
        assert!(!meter.take_repaint());

        meter.on_level_changed(&[Level::zero()]);
        assert!(meter.take_repaint());
        assert!(!meter.take_repaint());
    }
}
