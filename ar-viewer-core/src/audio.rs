//! Ambient scene audio: starts with the AR session (honoring the
//! configured delay), stops and rewinds when it ends, and offers an
//! audio-graph tap to the capture subsystem.

use std::time::Duration;

use crate::models::error::ViewerError;
use crate::models::scene::AudioConfig;
use crate::traits::audio::{AudioOutput, AudioTapHandle};

/// Global attenuation applied on top of the scene's configured volume.
pub const MASTER_VOLUME: f32 = 0.3;

pub struct AmbientAudio {
    output: Box<dyn AudioOutput>,
    config: Option<AudioConfig>,
    muted: bool,
    playing: bool,
    session_active: bool,
    pending_delay: Option<Duration>,
}

impl AmbientAudio {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            config: None,
            muted: false,
            playing: false,
            session_active: false,
            pending_delay: None,
        }
    }

    /// Load the scene's audio source. Skipped entirely when the scene has
    /// no audio block; no audio control is surfaced then.
    pub fn configure(&mut self, config: &AudioConfig, url: &str) -> Result<(), ViewerError> {
        self.output.load(
            url,
            config.looping,
            config.effective_volume() * MASTER_VOLUME,
        )?;
        self.config = Some(config.clone());
        Ok(())
    }

    pub fn has_audio(&self) -> bool {
        self.config.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn handle_session_started(&mut self) {
        self.session_active = true;
        let Some(config) = self.config.as_ref() else {
            return;
        };
        if self.muted {
            return;
        }

        let delay = config.delay_seconds();
        if delay > 0.0 {
            self.pending_delay = Some(Duration::from_secs_f64(delay));
        } else {
            self.start_playback();
        }
    }

    /// Drive the start-delay countdown.
    pub fn tick(&mut self, delta: Duration) {
        let Some(remaining) = self.pending_delay else {
            return;
        };
        if remaining <= delta {
            self.pending_delay = None;
            if self.session_active && !self.muted {
                self.start_playback();
            }
        } else {
            self.pending_delay = Some(remaining - delta);
        }
    }

    pub fn handle_session_ended(&mut self) {
        self.session_active = false;
        self.pending_delay = None;
        if self.config.is_some() {
            self.output.pause();
            self.output.rewind();
        }
        self.playing = false;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.output.set_muted(muted);
        if muted {
            self.output.pause();
            self.playing = false;
        } else if self.session_active && self.config.is_some() && self.pending_delay.is_none() {
            self.start_playback();
        }
    }

    /// Tap the playing audio for mixing into a recording. Returns `None`
    /// when nothing is playing or the tap setup fails; the recording
    /// then proceeds video-only.
    pub fn try_tap(&mut self) -> Option<AudioTapHandle> {
        if !self.playing {
            return None;
        }
        match self.output.create_tap() {
            Ok(tap) => Some(tap),
            Err(e) => {
                log::warn!("audio mix setup failed, recording video-only: {}", e);
                None
            }
        }
    }

    pub fn release_tap(&mut self, tap: AudioTapHandle) {
        self.output.release_tap(tap);
    }

    fn start_playback(&mut self) {
        match self.output.play() {
            Ok(()) => self.playing = true,
            // Autoplay policies and codec issues land here; the viewer
            // stays usable without audio.
            Err(e) => log::warn!("ambient audio could not start: {}", e),
        }
    }
}
