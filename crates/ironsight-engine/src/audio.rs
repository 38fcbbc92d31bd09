//! Shot sound cue.
//!
//! The audio device is an external collaborator behind [`ShotAudio`]. The
//! cue starts muted; the first shot raises it to the configured volume and
//! every shot rewinds the clip and plays it from the start.

use tracing::{debug, info};

/// A single preloaded sound clip.
pub trait ShotAudio {
    /// Sets playback volume (1.0 is unity gain).
    fn set_volume(&mut self, volume: f32);
    /// Seeks to the start and plays.
    fn rewind_and_play(&mut self);
}

/// Audio sink that records what would have been played.
///
/// Used when no output device is wired up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggedAudio {
    volume: f32,
    plays: u32,
}

impl LoggedAudio {
    /// Creates a silent sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            volume: 0.0,
            plays: 0,
        }
    }

    /// Current volume.
    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    /// Times the clip was started.
    #[must_use]
    pub const fn plays(&self) -> u32 {
        self.plays
    }
}

impl ShotAudio for LoggedAudio {
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        debug!(volume, "shot volume set");
    }

    fn rewind_and_play(&mut self) {
        self.plays += 1;
        debug!(plays = self.plays, volume = self.volume, "shot played");
    }
}

/// Drives a [`ShotAudio`] clip from trigger pulls.
#[derive(Debug)]
pub struct ShotCue<A> {
    audio: A,
    volume: f32,
    armed: bool,
}

impl<A: ShotAudio> ShotCue<A> {
    /// Wraps a clip, muting it until the first shot.
    pub fn new(mut audio: A, volume: f32) -> Self {
        audio.set_volume(0.0);
        Self {
            audio,
            volume,
            armed: false,
        }
    }

    /// Plays the cue for one shot.
    pub fn shot(&mut self) {
        if !self.armed {
            self.audio.set_volume(self.volume);
            self.armed = true;
            info!(volume = self.volume, "shot audio armed");
        }
        self.audio.rewind_and_play();
    }

    /// Underlying clip.
    pub const fn audio(&self) -> &A {
        &self.audio
    }
}
