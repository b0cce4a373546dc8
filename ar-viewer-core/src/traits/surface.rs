use crate::models::capture_item::MediaBlob;
use crate::models::error::ViewerError;

/// Completion callback for an asynchronous surface snapshot.
///
/// `None` means the platform produced an empty encode; the capture
/// subsystem logs and drops it rather than surfacing an error.
pub type SnapshotCallback = Box<dyn FnOnce(Option<MediaBlob>)>;

/// Opaque token for a live stream captured off the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHandle(pub u64);

/// The render surface (canvas + graphics context).
///
/// A single process-wide resource: only the render loop issues draw calls
/// against it; the capture subsystem only reads from it and must never
/// block the draw loop to do so.
pub trait RenderSurface {
    /// Issue one draw call. Runs every tick, AR session or not.
    fn render(&mut self) -> Result<(), ViewerError>;

    /// Request a still-image encode of the current content.
    ///
    /// `quality` is a 0..=1 encoder hint. The callback may fire
    /// synchronously or on a later turn of the platform loop.
    fn request_snapshot(&mut self, quality: f32, on_ready: SnapshotCallback);

    /// Open a live stream off the surface at the given frame rate.
    fn capture_stream(&mut self, frame_rate: u32) -> Result<StreamHandle, ViewerError>;

    /// Release a stream previously opened with `capture_stream`.
    fn release_stream(&mut self, stream: StreamHandle);
}
