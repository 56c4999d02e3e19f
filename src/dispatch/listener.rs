use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Level, MidiDirection};

/// Identifies one registration with a [`ListenerRegistry`](super::ListenerRegistry)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    pub fn generate() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A display that reacts to telemetry
///
/// Every method has an empty default so a widget only implements what it
/// draws.
pub trait TelemetryListener {
    /// Called on every poll with the envelope of each channel
    fn on_level_changed(&mut self, _levels: &[Level]) {}

    /// Called when MIDI traffic starts or stops in one direction
    fn on_midi_activity_changed(&mut self, _direction: MidiDirection, _active: bool) {}

    /// Called when audio processing starts or stops
    fn on_audio_activity_changed(&mut self, _active: bool) {}

    /// Called once per poll after the level update
    fn on_tick(&mut self) {}
}
