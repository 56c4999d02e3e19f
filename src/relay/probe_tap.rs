use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use super::SampleProducer;

/// A sample producer that only forwards while a display is subscribed
///
/// Lives on the realtime thread. The matching [`ProbeSwitch`] stays with the
/// UI and flips the subscription with a single atomic store.
pub struct ProbeTap {
    producer: SampleProducer,
    subscribed: Arc<AtomicBool>,
}

/// The UI side of a [`ProbeTap`]
#[derive(Clone)]
pub struct ProbeSwitch {
    subscribed: Arc<AtomicBool>,
}

pub fn probe_tap(producer: SampleProducer) -> (ProbeTap, ProbeSwitch) {
    let subscribed = Arc::new(AtomicBool::new(false));

    (
        ProbeTap {
            producer,
            subscribed: Arc::clone(&subscribed),
        },
        ProbeSwitch { subscribed },
    )
}

impl ProbeTap {
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }

    /// Forward a planar block if a display is listening
    pub fn push_block(&mut self, channels: &[&[f32]]) {
        if self.is_subscribed() {
            self.producer.push_block(channels);
        }
    }
}

impl ProbeSwitch {
    pub fn subscribe(&self) {
        self.subscribed.store(true, Ordering::Release);
    }

    pub fn unsubscribe(&self) {
        self.subscribed.store(false, Ordering::Release);
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::sample_relay;

    #[test]
    fn only_forwards_while_subscribed() {
        let (producer, consumer) = sample_relay(1, 16);
        let (mut tap, switch) = probe_tap(producer);
        let block = [0.25_f32; 4];

        tap.push_block(&[&block]);
        assert_eq!(consumer.pending(0), 0);

        switch.subscribe();
        tap.push_block(&[&block]);
        assert_eq!(consumer.pending(0), 4);

        switch.unsubscribe();
        tap.push_block(&[&block]);
        assert_eq!(consumer.pending(0), 4);
    }
}
