use std::sync::Arc;

use itertools::izip;

use crate::{midi, ActivityTracker, LevelEnvelope, LevelMeters};

/// The realtime half of the telemetry relay
///
/// Owned by the audio thread. Processing a block never blocks, locks or
/// allocates: envelopes are preallocated and everything shared with the UI is
/// an atomic word.
pub struct TelemetrySource {
    tracker: Arc<ActivityTracker>,
    meters: Arc<LevelMeters>,
    envelopes: Vec<LevelEnvelope>,
    prepared_channel_count: usize,
}

impl TelemetrySource {
    pub(crate) fn new(
        tracker: Arc<ActivityTracker>,
        meters: Arc<LevelMeters>,
        envelope: LevelEnvelope,
    ) -> Self {
        let channel_count = meters.channel_count();

        Self {
            tracker,
            meters,
            envelopes: vec![envelope; channel_count],
            prepared_channel_count: channel_count,
        }
    }

    /// Reset the meters before playback starts
    ///
    /// Call this before the first block, outside the realtime callback.
    pub fn prepare(&mut self, channel_count: usize) {
        self.prepared_channel_count = channel_count.min(self.envelopes.len());

        for envelope in self.envelopes.iter_mut() {
            envelope.reset();
        }

        self.meters.silence_from(0);

        log::debug!(
            "Prepared telemetry for {} channels",
            self.prepared_channel_count
        );
    }

    pub fn prepared_channel_count(&self) -> usize {
        self.prepared_channel_count
    }

    /// Meter a planar block and mark activity
    ///
    /// Each channel runs its own envelope. Channels that are missing from the
    /// block, or beyond the prepared channel count, drop to zero. Audio activity is recorded for every block, MIDI
    /// activity only when a direction carried a non system exclusive event.
    pub fn process_block<'a, 'b, In, Out>(
        &mut self,
        channels: &[&[f32]],
        midi_in: In,
        midi_out: Out,
    ) where
        In: IntoIterator<Item = &'a [u8]>,
        Out: IntoIterator<Item = &'b [u8]>,
    {
        let channel_count = channels.len().min(self.prepared_channel_count);

        for (channel, envelope, samples) in
            izip!(0..channel_count, self.envelopes.iter_mut(), channels)
        {
            let value = envelope.process_samples(samples);
            self.meters.store(channel, value);
        }

        for envelope in self.envelopes.iter_mut().skip(channel_count) {
            envelope.reset();
        }
        self.meters.silence_from(channel_count);

        self.tracker.record_audio_processed();

        if midi::has_real_events(midi_in) {
            self.tracker.record_midi_in();
        }

        if midi::has_real_events(midi_out) {
            self.tracker.record_midi_out();
        }
    }

    /// Record MIDI traffic that arrives outside an audio block
    pub fn record_midi(&self, direction: midi::MidiDirection) {
        match direction {
            midi::MidiDirection::In => self.tracker.record_midi_in(),
            midi::MidiDirection::Out => self.tracker.record_midi_out(),
        }
    }
}
