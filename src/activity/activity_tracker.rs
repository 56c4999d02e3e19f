use std::{
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    time::Duration,
};

use super::Clock;
use crate::Timestamp;

const NEVER: i64 = i64::MIN;

/// Something the tracker watches for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    MidiIn,
    MidiOut,
    Audio,
}

/// Whether each activity happened recently, as seen by one poll
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityState {
    pub midi_in: bool,
    pub midi_out: bool,
    pub audio: bool,
}

impl ActivityState {
    pub fn is_active(&self, activity: Activity) -> bool {
        match activity {
            Activity::MidiIn => self.midi_in,
            Activity::MidiOut => self.midi_out,
            Activity::Audio => self.audio,
        }
    }
}

/// Last-seen times for MIDI input, MIDI output and audio processing
///
/// Written from the processing thread and read from the UI thread. Each time
/// is a single atomic word, so a poll never sees a torn value.
pub struct ActivityTracker {
    clock: Arc<dyn Clock>,
    midi_in: AtomicI64,
    midi_out: AtomicI64,
    audio: AtomicI64,
}

impl ActivityTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            midi_in: AtomicI64::new(NEVER),
            midi_out: AtomicI64::new(NEVER),
            audio: AtomicI64::new(NEVER),
        }
    }

    fn slot(&self, activity: Activity) -> &AtomicI64 {
        match activity {
            Activity::MidiIn => &self.midi_in,
            Activity::MidiOut => &self.midi_out,
            Activity::Audio => &self.audio,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn record_midi_in(&self) {
        self.record_at(Activity::MidiIn, self.clock.now());
    }

    pub fn record_midi_out(&self) {
        self.record_at(Activity::MidiOut, self.clock.now());
    }

    pub fn record_audio_processed(&self) {
        self.record_at(Activity::Audio, self.clock.now());
    }

    pub fn record_at(&self, activity: Activity, time: Timestamp) {
        self.slot(activity)
            .store(time.as_raw_i64(), Ordering::Release);
    }

    /// When the activity was last recorded, if ever
    pub fn last_seen(&self, activity: Activity) -> Option<Timestamp> {
        match self.slot(activity).load(Ordering::Acquire) {
            NEVER => None,
            raw => Some(Timestamp::from_raw_i64(raw)),
        }
    }

    fn is_active(&self, activity: Activity, now: Timestamp, threshold: Duration) -> bool {
        self.last_seen(activity)
            .is_some_and(|last_seen| now.is_within(last_seen, threshold))
    }

    /// Derive the active flags at `now`
    ///
    /// Reads only; calling it any number of times has no effect on later
    /// polls.
    pub fn poll(&self, now: Timestamp, threshold: Duration) -> ActivityState {
        ActivityState {
            midi_in: self.is_active(Activity::MidiIn, now, threshold),
            midi_out: self.is_active(Activity::MidiOut, now, threshold),
            audio: self.is_active(Activity::Audio, now, threshold),
        }
    }
}
