use rand::Rng;

use super::SampleConsumer;

const MINIMUM_HEIGHT: usize = 50;
const MAXIMUM_HEIGHT: usize = 150;

/// The most recent window of samples per channel, ready for drawing a
/// waveform
pub struct SignalScope {
    samples: Vec<Vec<f32>>,
    channel_count: usize,
}

impl SignalScope {
    pub fn new(channel_count: usize, window: usize) -> Self {
        assert!(channel_count > 0);
        assert!(window > 0);

        Self {
            samples: (0..channel_count).map(|_| vec![0.0; window]).collect(),
            channel_count: 1,
        }
    }

    /// Pull whatever the relay has queued into the window
    ///
    /// New samples are written from the start of each channel's window;
    /// slots that receive nothing keep their previous value. Returns the
    /// total number of samples drained.
    pub fn refresh(&mut self, consumer: &mut SampleConsumer) -> usize {
        self.channel_count = consumer
            .active_channel_count()
            .clamp(1, self.samples.len());

        let mut drained = 0;
        for (channel, window) in self.samples.iter_mut().enumerate().take(self.channel_count) {
            let window_length = window.len();
            drained += consumer.drain(channel, window, window_length);
        }

        drained
    }

    /// Empty the relay and zero the window
    pub fn clear(&mut self, consumer: &mut SampleConsumer) {
        consumer.clear();

        for window in self.samples.iter_mut() {
            window.fill(0.0);
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn window(&self) -> usize {
        self.samples[0].len()
    }

    pub fn samples(&self, channel: usize) -> Option<&[f32]> {
        self.samples.get(channel).map(|window| window.as_slice())
    }

    /// The sample drawn at `column` when the window is stretched over `width`
    /// columns
    pub fn sample_at_column(&self, channel: usize, column: usize, width: usize) -> Option<f32> {
        let window = self.samples.get(channel)?;
        if width == 0 {
            return None;
        }

        let index = (column * window.len() / width).min(window.len() - 1);
        Some(window[index])
    }

    /// A sample picked at random from the window, for a numeric readout
    pub fn readout(&self, channel: usize) -> Option<f32> {
        let window = self.samples.get(channel)?;
        let index = rand::rng().random_range(0..window.len());
        Some(window[index])
    }

    /// Height in pixels for the current channel count, growing linearly
    /// from one channel to the maximum
    pub fn preferred_height(&self) -> usize {
        let maximum_channels = crate::MAXIMUM_CHANNEL_COUNT;
        let channels = self.channel_count.clamp(1, maximum_channels);

        MINIMUM_HEIGHT + (MAXIMUM_HEIGHT - MINIMUM_HEIGHT) * (channels - 1) / (maximum_channels - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::sample_relay;

    #[test]
    fn refresh_keeps_stale_tail() {
        let (mut producer, mut consumer) = sample_relay(1, 8);
        let mut scope = SignalScope::new(1, 4);

        producer.push_block(&[&[1.0, 2.0, 3.0, 4.0]]);
        assert_eq!(scope.refresh(&mut consumer), 4);

        producer.push_block(&[&[9.0]]);
        assert_eq!(scope.refresh(&mut consumer), 1);

        assert_eq!(scope.samples(0), Some(&[9.0, 2.0, 3.0, 4.0][..]));
    }

    #[test]
    fn clear_zeroes_window_and_queue() {
        let (mut producer, mut consumer) = sample_relay(2, 8);
        let mut scope = SignalScope::new(2, 4);

        producer.push_block(&[&[1.0; 4], &[1.0; 4]]);
        scope.refresh(&mut consumer);
        producer.push_block(&[&[1.0; 4], &[1.0; 4]]);

        scope.clear(&mut consumer);

        assert_eq!(consumer.pending(0), 0);
        assert!(scope.samples(1).unwrap().iter().all(|sample| *sample == 0.0));
    }

    #[test]
    fn height_follows_channel_count() {
        let (mut producer, mut consumer) = sample_relay(8, 8);
        let mut scope = SignalScope::new(8, 4);
        assert_eq!(scope.preferred_height(), 50);

        let block: &[f32] = &[0.0];
        producer.push_block(&[block; 8]);
        scope.refresh(&mut consumer);
        assert_eq!(scope.preferred_height(), 150);

        producer.push_block(&[block; 2]);
        scope.refresh(&mut consumer);
        assert_eq!(scope.preferred_height(), 64);
    }

    #[test]
    fn columns_stretch_over_window() {
        let (mut producer, mut consumer) = sample_relay(1, 8);
        let mut scope = SignalScope::new(1, 4);

        producer.push_block(&[&[0.0, 0.1, 0.2, 0.3]]);
        scope.refresh(&mut consumer);

        assert_eq!(scope.sample_at_column(0, 0, 8), Some(0.0));
        assert_eq!(scope.sample_at_column(0, 3, 8), Some(0.1));
        assert_eq!(scope.sample_at_column(0, 7, 8), Some(0.3));
        assert_eq!(scope.sample_at_column(0, 0, 0), None);
    }

    #[test]
    fn readout_comes_from_window() {
        let (mut producer, mut consumer) = sample_relay(1, 8);
        let mut scope = SignalScope::new(1, 4);

        producer.push_block(&[&[0.5; 4]]);
        scope.refresh(&mut consumer);

        assert_eq!(scope.readout(0), Some(0.5));
        assert_eq!(scope.readout(3), None);
    }
}
