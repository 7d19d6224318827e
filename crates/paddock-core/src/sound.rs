//! Sound cue output.
//!
//! The session emits named cues; a [`SoundSink`] decides what to do with
//! them. [`MutedSink`] drops everything.

use paddock_types::SoundCue;

/// Receiver of sound cues.
pub trait SoundSink: Send {
    /// Called once per cue, in emission order.
    fn play(&mut self, cue: SoundCue);
}

/// Drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutedSink;

impl SoundSink for MutedSink {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Keeps every cue it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Cues received so far.
    pub cues: Vec<SoundCue>,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}
