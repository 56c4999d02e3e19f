use crate::{MidiDirection, TelemetryListener};

/// What the MIDI blinker and DSP power indicator draw
#[derive(Default)]
pub struct ActivityIndicatorModel {
    midi_in: bool,
    midi_out: bool,
    audio_processed: bool,
    needs_repaint: bool,
}

impl ActivityIndicatorModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_midi_in_lit(&self) -> bool {
        self.midi_in
    }

    pub fn is_midi_out_lit(&self) -> bool {
        self.midi_out
    }

    pub fn is_processing_audio(&self) -> bool {
        self.audio_processed
    }

    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }
}

impl TelemetryListener for ActivityIndicatorModel {
    fn on_midi_activity_changed(&mut self, direction: MidiDirection, active: bool) {
        match direction {
            MidiDirection::In => self.midi_in = active,
            MidiDirection::Out => self.midi_out = active,
        }

        self.needs_repaint = true;
    }

    fn on_audio_activity_changed(&mut self, active: bool) {
        self.audio_processed = active;
        self.needs_repaint = true;
    }
}
