use crate::models::error::ViewerError;

/// Opaque token for an audio-graph tap on the ambient audio element
/// (source node → destination node whose stream carries the audio tracks).
/// Owned by exactly one recording; released when the recording ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioTapHandle(pub u64);

/// The persistent ambient audio element.
pub trait AudioOutput {
    /// Load a source. Volume is the final effective value (scene volume
    /// with master attenuation already applied).
    fn load(&mut self, url: &str, looping: bool, volume: f32) -> Result<(), ViewerError>;

    fn play(&mut self) -> Result<(), ViewerError>;

    fn pause(&mut self);

    /// Rewind to the start without playing.
    fn rewind(&mut self);

    fn set_muted(&mut self, muted: bool);

    fn is_loaded(&self) -> bool;

    /// Tap this output for mixing into a recording. Failure here must
    /// downgrade the recording to video-only, never abort it.
    fn create_tap(&mut self) -> Result<AudioTapHandle, ViewerError>;

    fn release_tap(&mut self, tap: AudioTapHandle);
}
