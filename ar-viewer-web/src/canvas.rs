use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ar_viewer_core::models::capture_item::MediaBlob;
use ar_viewer_core::models::error::ViewerError;
use ar_viewer_core::traits::surface::{RenderSurface, SnapshotCallback, StreamHandle};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, HtmlCanvasElement, MediaStream};

/// Maps core stream/tap handles to the live `MediaStream`s behind them.
///
/// Shared between the surface (which mints video streams), the audio
/// output (which mints tap streams) and the recorder backend (which
/// resolves both).
#[derive(Default)]
pub struct MediaStreamRegistry {
    next_id: u64,
    streams: HashMap<u64, MediaStream>,
}

pub type SharedRegistry = Rc<RefCell<MediaStreamRegistry>>;

pub fn shared_registry() -> SharedRegistry {
    Rc::new(RefCell::new(MediaStreamRegistry::default()))
}

impl MediaStreamRegistry {
    pub fn insert(&mut self, stream: MediaStream) -> u64 {
        self.next_id += 1;
        self.streams.insert(self.next_id, stream);
        self.next_id
    }

    pub fn get(&self, id: u64) -> Option<MediaStream> {
        self.streams.get(&id).cloned()
    }

    pub fn remove(&mut self, id: u64) {
        self.streams.remove(&id);
    }
}

/// Render surface over the viewer's canvas.
///
/// The draw call itself belongs to the underlying 3D runtime; it is
/// injected as a JS function so this type stays a thin adapter.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    draw: js_sys::Function,
    registry: SharedRegistry,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, draw: js_sys::Function, registry: SharedRegistry) -> Self {
        Self {
            canvas,
            draw,
            registry,
        }
    }
}

async fn read_blob(blob: Blob) -> Option<Vec<u8>> {
    let buffer = wasm_bindgen_futures::JsFuture::from(blob.array_buffer())
        .await
        .ok()?;
    Some(js_sys::Uint8Array::new(&buffer).to_vec())
}

impl RenderSurface for CanvasSurface {
    fn render(&mut self) -> Result<(), ViewerError> {
        self.draw
            .call0(&JsValue::NULL)
            .map(|_| ())
            .map_err(|e| ViewerError::RenderFailed(format!("{:?}", e)))
    }

    fn request_snapshot(&mut self, quality: f32, on_ready: SnapshotCallback) {
        let callback = Closure::once(move |blob: Option<Blob>| match blob {
            Some(blob) => wasm_bindgen_futures::spawn_local(async move {
                let data = read_blob(blob).await;
                on_ready(data.map(|d| MediaBlob::new(d, "image/jpeg")));
            }),
            None => on_ready(None),
        });

        let result = self.canvas.to_blob_with_type_and_encoder_options(
            callback.as_ref().unchecked_ref(),
            "image/jpeg",
            &JsValue::from_f64(quality as f64),
        );
        if let Err(e) = result {
            log::warn!("canvas toBlob failed: {:?}", e);
        }
        // The browser owns the callback from here.
        callback.forget();
    }

    fn capture_stream(&mut self, frame_rate: u32) -> Result<StreamHandle, ViewerError> {
        let stream = self
            .canvas
            .capture_stream_with_frame_request_rate(frame_rate as f64)
            .map_err(|e| ViewerError::CaptureFailed(format!("captureStream: {:?}", e)))?;
        let id = self.registry.borrow_mut().insert(stream);
        Ok(StreamHandle(id))
    }

    fn release_stream(&mut self, stream: StreamHandle) {
        self.registry.borrow_mut().remove(stream.0);
    }
}
