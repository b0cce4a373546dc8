use std::cell::RefCell;
use std::rc::Rc;

use ar_viewer_core::models::error::ViewerError;
use ar_viewer_core::traits::audio::AudioTapHandle;
use ar_viewer_core::traits::recorder::RecorderBackend;
use ar_viewer_core::traits::surface::StreamHandle;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobEvent, MediaRecorder, MediaRecorderOptions, MediaStream};

use crate::canvas::SharedRegistry;

/// `MediaRecorder`-backed recorder.
///
/// Recorded blobs are buffered until the recorder's own stop event, then
/// their bytes are forwarded in order through `on_chunk` and completion
/// is signalled through `on_stopped`; the embedder routes those to the
/// viewer's `push_recorded_chunk` / `notify_recorder_stopped`.
pub struct WebMediaRecorder {
    registry: SharedRegistry,
    recorder: Option<MediaRecorder>,
    pending: Rc<RefCell<Vec<Blob>>>,
    on_chunk: Rc<dyn Fn(Vec<u8>)>,
    on_stopped: Rc<dyn Fn()>,
    callbacks: Vec<Closure<dyn FnMut(BlobEvent)>>,
    stop_callback: Option<Closure<dyn FnMut()>>,
}

impl WebMediaRecorder {
    pub fn new(
        registry: SharedRegistry,
        on_chunk: impl Fn(Vec<u8>) + 'static,
        on_stopped: impl Fn() + 'static,
    ) -> Self {
        Self {
            registry,
            recorder: None,
            pending: Rc::new(RefCell::new(Vec::new())),
            on_chunk: Rc::new(on_chunk),
            on_stopped: Rc::new(on_stopped),
            callbacks: Vec::new(),
            stop_callback: None,
        }
    }

    fn combined_stream(
        &self,
        video: &MediaStream,
        audio: Option<&MediaStream>,
    ) -> Result<MediaStream, JsValue> {
        let Some(audio) = audio else {
            return Ok(video.clone());
        };

        let combined = MediaStream::new()?;
        for track in video.get_video_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
                combined.add_track(&track);
            }
        }
        for track in audio.get_audio_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
                combined.add_track(&track);
            }
        }
        Ok(combined)
    }
}

impl RecorderBackend for WebMediaRecorder {
    fn is_available(&self) -> bool {
        web_sys::window()
            .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("MediaRecorder")).unwrap_or(false))
            .unwrap_or(false)
    }

    fn supports_mime_type(&self, mime_type: &str) -> bool {
        MediaRecorder::is_type_supported(mime_type)
    }

    fn start(
        &mut self,
        stream: StreamHandle,
        audio: Option<AudioTapHandle>,
        mime_type: &str,
    ) -> Result<(), ViewerError> {
        let registry = self.registry.borrow();
        let video = registry
            .get(stream.0)
            .ok_or_else(|| ViewerError::CaptureFailed("unknown surface stream".into()))?;
        let audio_stream = audio.and_then(|tap| registry.get(tap.0));
        drop(registry);

        let combined = self
            .combined_stream(&video, audio_stream.as_ref())
            .map_err(|e| ViewerError::CaptureFailed(format!("stream merge: {:?}", e)))?;

        let options = MediaRecorderOptions::new();
        options.set_mime_type(mime_type);
        let recorder =
            MediaRecorder::new_with_media_stream_and_media_recorder_options(&combined, &options)
                .map_err(|e| ViewerError::CaptureFailed(format!("MediaRecorder: {:?}", e)))?;

        self.pending.borrow_mut().clear();

        let pending = Rc::clone(&self.pending);
        let on_data = Closure::<dyn FnMut(BlobEvent)>::new(move |event: BlobEvent| {
            if let Some(blob) = event.data() {
                if blob.size() > 0.0 {
                    pending.borrow_mut().push(blob);
                }
            }
        });
        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
        self.callbacks.push(on_data);

        let pending = Rc::clone(&self.pending);
        let on_chunk = Rc::clone(&self.on_chunk);
        let on_stopped = Rc::clone(&self.on_stopped);
        let on_stop = Closure::<dyn FnMut()>::new(move || {
            let blobs: Vec<Blob> = pending.borrow_mut().drain(..).collect();
            let on_chunk = Rc::clone(&on_chunk);
            let on_stopped = Rc::clone(&on_stopped);
            // Blob bytes are only reachable asynchronously; drain them in
            // order, then signal completion.
            wasm_bindgen_futures::spawn_local(async move {
                for blob in blobs {
                    if let Ok(buffer) =
                        wasm_bindgen_futures::JsFuture::from(blob.array_buffer()).await
                    {
                        on_chunk(js_sys::Uint8Array::new(&buffer).to_vec());
                    }
                }
                on_stopped();
            });
        });
        recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));
        self.stop_callback = Some(on_stop);

        recorder
            .start()
            .map_err(|e| ViewerError::CaptureFailed(format!("recorder start: {:?}", e)))?;
        self.recorder = Some(recorder);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            if let Err(e) = recorder.stop() {
                log::warn!("recorder stop failed: {:?}", e);
                // Deliver the completion signal anyway so the capture
                // controller does not wait forever.
                (self.on_stopped)();
            }
        }
    }
}
