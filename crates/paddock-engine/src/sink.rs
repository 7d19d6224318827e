//! Sound sink that writes cues to the log.

use tracing::info;

use paddock_core::SoundSink;
use paddock_types::SoundCue;

/// Logs every cue; there is no audio device here.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, cue: SoundCue) {
        info!(sound = cue.name(), "Sound cue");
    }
}
