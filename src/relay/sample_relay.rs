use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crossbeam::queue::ArrayQueue;

struct ChannelQueues {
    queues: Vec<ArrayQueue<f32>>,
    active_channel_count: AtomicUsize,
}

/// The realtime end of a sample relay
///
/// There is exactly one producer per relay, and pushing needs `&mut self`, so
/// two threads can never push into the same relay at once.
pub struct SampleProducer {
    shared: Arc<ChannelQueues>,
}

/// The UI end of a sample relay
pub struct SampleConsumer {
    shared: Arc<ChannelQueues>,
}

/// Create a relay with one bounded queue per channel
///
/// All queue storage is allocated here; nothing on the push path allocates.
pub fn sample_relay(channel_count: usize, capacity: usize) -> (SampleProducer, SampleConsumer) {
    assert!(channel_count > 0);
    assert!(capacity > 0);

    let shared = Arc::new(ChannelQueues {
        queues: (0..channel_count)
            .map(|_| ArrayQueue::new(capacity))
            .collect(),
        active_channel_count: AtomicUsize::new(1),
    });

    (
        SampleProducer {
            shared: Arc::clone(&shared),
        },
        SampleConsumer { shared },
    )
}

impl SampleProducer {
    /// Queue a sample, dropping it if the channel's queue is full
    pub fn push(&mut self, channel: usize, sample: f32) {
        if let Some(queue) = self.shared.queues.get(channel) {
            let _ = queue.push(sample);
        }
    }

    /// Queue every channel of a planar block
    ///
    /// Channels beyond the relay's channel count are ignored. The number of
    /// channels pushed is published for the consumer.
    pub fn push_block(&mut self, channels: &[&[f32]]) {
        let channel_count = channels.len().min(self.shared.queues.len());

        self.shared
            .active_channel_count
            .store(channel_count, Ordering::Release);

        for (queue, samples) in self.shared.queues.iter().zip(channels) {
            for sample in samples.iter() {
                if queue.push(*sample).is_err() {
                    break;
                }
            }
        }
    }

    pub fn channel_count(&self) -> usize {
        self.shared.queues.len()
    }

    pub fn capacity(&self) -> usize {
        self.shared.queues[0].capacity()
    }
}

impl SampleConsumer {
    /// Move up to `max_count` queued samples, oldest first, into `destination`
    ///
    /// Returns how many samples were written. Slots past that count are left
    /// untouched.
    pub fn drain(&mut self, channel: usize, destination: &mut [f32], max_count: usize) -> usize {
        let queue = match self.shared.queues.get(channel) {
            Some(queue) => queue,
            None => return 0,
        };

        let max_count = max_count.min(destination.len());
        let mut drained = 0;

        while drained < max_count {
            match queue.pop() {
                Some(sample) => {
                    destination[drained] = sample;
                    drained += 1;
                }
                None => break,
            }
        }

        drained
    }

    /// Discard everything that is queued on every channel
    pub fn clear(&mut self) {
        for queue in self.shared.queues.iter() {
            while queue.pop().is_some() {}
        }
    }

    /// The number of channels in the most recent pushed block
    pub fn active_channel_count(&self) -> usize {
        self.shared.active_channel_count.load(Ordering::Acquire)
    }

    pub fn pending(&self, channel: usize) -> usize {
        self.shared
            .queues
            .get(channel)
            .map_or(0, |queue| queue.len())
    }

    pub fn channel_count(&self) -> usize {
        self.shared.queues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_fifo_order() {
        let (mut producer, mut consumer) = sample_relay(2, 8);

        for sample in [0.1, 0.2, 0.3] {
            producer.push(1, sample);
        }

        let mut destination = [0.0_f32; 8];
        let drained = consumer.drain(1, &mut destination, 8);

        assert_eq!(drained, 3);
        assert_eq!(&destination[..drained], &[0.1, 0.2, 0.3]);
        assert_eq!(consumer.pending(0), 0);
    }

    #[test]
    fn full_queue_drops_newest() {
        let (mut producer, mut consumer) = sample_relay(1, 4);

        for index in 0..10 {
            producer.push(0, index as f32);
        }

        let mut destination = [0.0_f32; 10];
        let drained = consumer.drain(0, &mut destination, 10);

        assert_eq!(drained, 4);
        assert_eq!(&destination[..drained], &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn drain_respects_max_count() {
        let (mut producer, mut consumer) = sample_relay(1, 16);

        for index in 0..6 {
            producer.push(0, index as f32);
        }

        let mut destination = [-1.0_f32; 6];
        assert_eq!(consumer.drain(0, &mut destination, 2), 2);
        assert_eq!(destination, [0.0, 1.0, -1.0, -1.0, -1.0, -1.0]);

        assert_eq!(consumer.drain(0, &mut destination, 10), 4);
        assert_eq!(&destination[..4], &[2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn empty_or_unknown_channel_drains_nothing() {
        let (mut producer, mut consumer) = sample_relay(2, 4);
        let mut destination = [0.0_f32; 4];

        assert_eq!(consumer.drain(0, &mut destination, 4), 0);

        producer.push(7, 1.0);
        assert_eq!(consumer.drain(7, &mut destination, 4), 0);
    }

    #[test]
    fn push_block_publishes_channel_count() {
        let (mut producer, consumer) = sample_relay(8, 16);
        let left = [0.5_f32; 4];
        let right = [-0.5_f32; 4];

        producer.push_block(&[&left, &right]);

        assert_eq!(consumer.active_channel_count(), 2);
        assert_eq!(consumer.pending(0), 4);
        assert_eq!(consumer.pending(1), 4);
        assert_eq!(consumer.pending(2), 0);
    }

    #[test]
    fn empty_block_publishes_no_channels() {
        let (mut producer, consumer) = sample_relay(2, 4);
        producer.push_block(&[&[0.5], &[0.5]]);

        producer.push_block(&[]);

        assert_eq!(consumer.active_channel_count(), 0);
        assert_eq!(consumer.pending(0), 1);
    }

    #[test]
    fn clear_discards_queued_samples() {
        let (mut producer, mut consumer) = sample_relay(2, 4);
        producer.push(0, 1.0);
        producer.push(1, 1.0);

        consumer.clear();

        assert_eq!(consumer.pending(0), 0);
        assert_eq!(consumer.pending(1), 0);
    }

    #[test]
    fn hands_samples_across_threads() {
        let (mut producer, mut consumer) = sample_relay(1, 1024);

        let handle = std::thread::spawn(move || {
            for index in 0..1024 {
                producer.push(0, index as f32);
            }
        });

        handle.join().expect("Producer thread panicked");

        let mut destination = vec![0.0_f32; 1024];
        let drained = consumer.drain(0, &mut destination, 1024);

        assert_eq!(drained, 1024);
        assert!(destination
            .iter()
            .enumerate()
            .all(|(index, sample)| *sample == index as f32));
    }
}
