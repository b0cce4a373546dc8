use crate::models::capture_item::{MediaBlob, MediaContainer};
use crate::models::error::ViewerError;

/// External transcoding engine for best-effort container re-encodes.
///
/// Never required for correctness: when unavailable or failing, the
/// originally recorded media is delivered unchanged.
pub trait Transcoder {
    fn is_available(&self) -> bool;

    fn transcode(
        &mut self,
        input: &MediaBlob,
        target: MediaContainer,
    ) -> Result<MediaBlob, ViewerError>;
}

/// Always-unavailable engine for platforms without one.
pub struct NoTranscoder;

impl Transcoder for NoTranscoder {
    fn is_available(&self) -> bool {
        false
    }

    fn transcode(
        &mut self,
        _input: &MediaBlob,
        _target: MediaContainer,
    ) -> Result<MediaBlob, ViewerError> {
        Err(ViewerError::TranscodeFailed("no transcoding engine".into()))
    }
}
