use crate::models::error::ViewerError;
use crate::traits::audio::AudioTapHandle;
use crate::traits::surface::StreamHandle;

/// Platform media recorder bound to a surface stream.
///
/// Recorded data flows back through the capture controller's
/// `push_recorded_chunk`, and stop completion through
/// `notify_recorder_stopped`; accumulated fragments must not be read
/// before that signal fires.
pub trait RecorderBackend {
    /// Whether the platform can record media at all.
    fn is_available(&self) -> bool;

    /// Support probe for a single encoding format candidate.
    fn supports_mime_type(&self, mime_type: &str) -> bool;

    /// Start recording the stream, optionally with mixed-in audio tracks.
    fn start(
        &mut self,
        stream: StreamHandle,
        audio: Option<AudioTapHandle>,
        mime_type: &str,
    ) -> Result<(), ViewerError>;

    /// Request stop. The platform delivers any buffered fragments and then
    /// signals completion via `notify_recorder_stopped`.
    fn stop(&mut self);
}
