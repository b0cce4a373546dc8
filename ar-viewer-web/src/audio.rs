use std::collections::HashMap;

use ar_viewer_core::models::error::ViewerError;
use ar_viewer_core::traits::audio::{AudioOutput, AudioTapHandle};
use wasm_bindgen::JsValue;
use web_sys::{
    AudioContext, HtmlAudioElement, MediaElementAudioSourceNode, MediaStreamAudioDestinationNode,
};

use crate::canvas::SharedRegistry;

fn js_err(context: &str, e: JsValue) -> ViewerError {
    ViewerError::AudioOutput(format!("{}: {:?}", context, e))
}

/// Persistent `<audio>` element plus the audio-graph tap used to mix its
/// output into recordings (element source → stream destination).
pub struct WebAudioOutput {
    element: HtmlAudioElement,
    registry: SharedRegistry,
    context: Option<AudioContext>,
    // createMediaElementSource may only run once per element; cache it.
    source: Option<MediaElementAudioSourceNode>,
    taps: HashMap<u64, MediaStreamAudioDestinationNode>,
    loaded: bool,
}

impl WebAudioOutput {
    pub fn new(element: HtmlAudioElement, registry: SharedRegistry) -> Self {
        Self {
            element,
            registry,
            context: None,
            source: None,
            taps: HashMap::new(),
            loaded: false,
        }
    }

    fn ensure_graph(
        &mut self,
    ) -> Result<(AudioContext, MediaElementAudioSourceNode), ViewerError> {
        if let (Some(context), Some(source)) = (self.context.clone(), self.source.clone()) {
            return Ok((context, source));
        }

        let context = AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
        let source = context
            .create_media_element_source(&self.element)
            .map_err(|e| js_err("createMediaElementSource", e))?;
        // Keep the element audible while tapped.
        source
            .connect_with_audio_node(&context.destination())
            .map_err(|e| js_err("connect destination", e))?;
        self.context = Some(context.clone());
        self.source = Some(source.clone());
        Ok((context, source))
    }
}

impl AudioOutput for WebAudioOutput {
    fn load(&mut self, url: &str, looping: bool, volume: f32) -> Result<(), ViewerError> {
        // CORS so the audio graph and recorder may read the samples.
        self.element.set_cross_origin(Some("anonymous"));
        self.element.set_src(url);
        self.element.set_loop(looping);
        self.element.set_volume(volume as f64);
        self.element.set_preload("auto");
        self.loaded = true;
        Ok(())
    }

    fn play(&mut self) -> Result<(), ViewerError> {
        let promise = self.element.play().map_err(|e| js_err("play", e))?;
        // Autoplay rejections surface through the promise; log, don't fail
        // the session over it.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                log::warn!("ambient audio could not start (autoplay policy?): {:?}", e);
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            log::warn!("audio pause failed: {:?}", e);
        }
    }

    fn rewind(&mut self) {
        self.element.set_current_time(0.0);
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn create_tap(&mut self) -> Result<AudioTapHandle, ViewerError> {
        let (context, source) = self.ensure_graph()?;
        let destination = context
            .create_media_stream_destination()
            .map_err(|e| js_err("createMediaStreamDestination", e))?;
        source
            .connect_with_audio_node(&destination)
            .map_err(|e| js_err("connect tap", e))?;

        let id = self.registry.borrow_mut().insert(destination.stream());
        self.taps.insert(id, destination);
        Ok(AudioTapHandle(id))
    }

    fn release_tap(&mut self, tap: AudioTapHandle) {
        if let Some(destination) = self.taps.remove(&tap.0) {
            if let Some(source) = self.source.as_ref() {
                if let Err(e) = source.disconnect_with_audio_node(&destination) {
                    log::debug!("tap disconnect failed: {:?}", e);
                }
            }
        }
        self.registry.borrow_mut().remove(tap.0);
    }
}
