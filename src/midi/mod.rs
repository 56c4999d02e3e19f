//! Classification of raw MIDI messages for activity tracking.
//!
//! A message is the raw byte sequence of one event, status byte first.
//! System exclusive dumps are bulk transfers rather than performance data, so
//! they do not count as activity.

const SYSTEM_EXCLUSIVE: u8 = 0xF0;

/// Direction of MIDI traffic relative to the processor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MidiDirection {
    In,
    Out,
}

pub fn is_sysex(message: &[u8]) -> bool {
    message.first() == Some(&SYSTEM_EXCLUSIVE)
}

/// True if any message is a real (non system exclusive) event
pub fn has_real_events<'a, I>(messages: I) -> bool
where
    I: IntoIterator<Item = &'a [u8]>,
{
    messages
        .into_iter()
        .any(|message| !message.is_empty() && !is_sysex(message))
}
