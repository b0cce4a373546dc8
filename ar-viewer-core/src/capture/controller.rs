use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::audio::AmbientAudio;
use crate::capture::codec::{container_for_mime, probe_mime_type};
use crate::capture::recorder::{
    RecorderResources, StopAction, TimerEvent, VideoRecorder, MAX_RECORD_TIME,
};
use crate::models::capture_item::{CaptureItem, CaptureKind, MediaBlob, MediaContainer};
use crate::models::state::RecordingMode;
use crate::traits::delegate::ViewerDelegate;
use crate::traits::recorder::RecorderBackend;
use crate::traits::surface::RenderSurface;
use crate::traits::transcoder::Transcoder;

/// Capture policy knobs.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Hold duration past which a press becomes a video recording.
    pub long_press_threshold: Duration,
    /// Encoder quality hint for photos.
    pub screenshot_quality: f32,
    /// Frame rate of the surface stream fed to the recorder.
    pub stream_frame_rate: u32,
    /// Hard ceiling on recording length.
    pub max_record_time: Duration,
    /// Filename prefix for delivered items.
    pub filename_prefix: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            long_press_threshold: Duration::from_millis(300),
            screenshot_quality: 0.92,
            stream_frame_rate: 30,
            max_record_time: MAX_RECORD_TIME,
            filename_prefix: "ar".into(),
        }
    }
}

enum PressState {
    Idle,
    Held { held: Duration, long_fired: bool },
}

/// Produces `CaptureItem`s from the live render surface on user demand:
/// short press → photo, long press → video until release.
///
/// Owns the recorder state machine and the gesture state; reads from the
/// surface and the ambient audio through per-call context so it never
/// holds the draw path hostage.
pub struct CaptureController {
    config: CaptureConfig,
    backend: Box<dyn RecorderBackend>,
    transcoder: Box<dyn Transcoder>,
    recorder: VideoRecorder,
    press: PressState,
    delegate: Option<Arc<dyn ViewerDelegate>>,
    sequence: Arc<AtomicU64>,
}

impl CaptureController {
    pub fn new(
        backend: Box<dyn RecorderBackend>,
        transcoder: Box<dyn Transcoder>,
        config: CaptureConfig,
    ) -> Self {
        let max = config.max_record_time;
        Self {
            config,
            backend,
            transcoder,
            recorder: VideoRecorder::new(max),
            press: PressState::Idle,
            delegate: None,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn ViewerDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn recording_mode(&self) -> Option<RecordingMode> {
        self.recorder.mode()
    }

    pub fn recording_elapsed(&self) -> Duration {
        self.recorder.elapsed()
    }

    /// Capture-button press began.
    pub fn press_started(&mut self) {
        if matches!(self.press, PressState::Held { .. }) {
            return;
        }
        self.press = PressState::Held {
            held: Duration::ZERO,
            long_fired: false,
        };
    }

    /// Capture-button press ended: a short press takes a photo, releasing
    /// a long press stops the recording it started.
    pub fn press_released(&mut self, surface: &mut dyn RenderSurface) {
        let PressState::Held { long_fired, .. } = self.press else {
            return;
        };
        self.press = PressState::Idle;

        if long_fired {
            self.stop_video_recording();
        } else {
            self.capture_photo(surface);
        }
    }

    /// Per-frame drive: crosses the long-press threshold and advances the
    /// recording timer (which enforces the hard cap).
    pub fn tick(
        &mut self,
        delta: Duration,
        surface: &mut dyn RenderSurface,
        audio: Option<&mut AmbientAudio>,
    ) {
        let mut crossed_threshold = false;
        if let PressState::Held { held, long_fired } = &mut self.press {
            *held += delta;
            if !*long_fired && *held >= self.config.long_press_threshold {
                *long_fired = true;
                crossed_threshold = true;
            }
        }
        if crossed_threshold {
            self.start_video_recording(surface, audio);
        }

        match self.recorder.tick(delta) {
            TimerEvent::None => {}
            TimerEvent::Second(elapsed) => {
                if let Some(ref delegate) = self.delegate {
                    delegate.on_recording_tick(elapsed);
                }
            }
            TimerEvent::CapReached => {
                log::info!("recording reached the maximum length, stopping");
                self.stop_video_recording();
            }
        }
    }

    /// Still-image capture of the current surface content.
    ///
    /// Asynchronous; an empty encode is logged and produces nothing. This
    /// never propagates an error into the caller's event handler.
    pub fn capture_photo(&mut self, surface: &mut dyn RenderSurface) {
        let Some(delegate) = self.delegate.clone() else {
            log::debug!("photo requested with no capture consumer attached");
            return;
        };
        let sequence = Arc::clone(&self.sequence);

        surface.request_snapshot(
            self.config.screenshot_quality,
            Box::new(move |blob| match blob {
                Some(blob) if !blob.is_empty() => {
                    let item = CaptureItem::new(
                        CaptureKind::Photo,
                        blob,
                        MediaContainer::Jpeg,
                        MediaContainer::Jpeg,
                        sequence.fetch_add(1, Ordering::SeqCst),
                    );
                    delegate.on_capture_item(item);
                }
                _ => log::warn!("screenshot produced no data"),
            }),
        );
    }

    /// Begin a recording off the surface stream.
    ///
    /// Falls back to simulated mode whenever real capture is impossible
    /// (no recorder, no supported format, no stream, recorder init
    /// failure) so the button's press-and-hold UX stays consistent.
    pub fn start_video_recording(
        &mut self,
        surface: &mut dyn RenderSurface,
        mut audio: Option<&mut AmbientAudio>,
    ) {
        if !self.recorder.is_idle() {
            return;
        }

        if !self.backend.is_available() {
            log::warn!("media recording unavailable, running simulated timer");
            self.start_simulated();
            return;
        }

        let Some(mime_type) = probe_mime_type(self.backend.as_ref()) else {
            log::warn!("no supported recording format, running simulated timer");
            self.start_simulated();
            return;
        };

        let stream = match surface.capture_stream(self.config.stream_frame_rate) {
            Ok(stream) => stream,
            Err(e) => {
                log::warn!("surface stream unavailable ({}), running simulated timer", e);
                self.start_simulated();
                return;
            }
        };

        // Best-effort audio mix; a missing or failed tap means video-only.
        let audio_tap = audio.as_deref_mut().and_then(|a| a.try_tap());

        if let Err(e) = self.backend.start(stream, audio_tap, mime_type) {
            log::warn!("recorder start failed ({}), running simulated timer", e);
            surface.release_stream(stream);
            if let (Some(tap), Some(a)) = (audio_tap, audio.as_deref_mut()) {
                a.release_tap(tap);
            }
            self.start_simulated();
            return;
        }

        self.recorder.start_real(
            mime_type,
            RecorderResources {
                stream,
                audio_tap,
            },
        );
        self.notify_recording_started(RecordingMode::Real);
    }

    /// Stop an in-progress recording and finalize it into the gallery.
    pub fn stop_video_recording(&mut self) {
        match self.recorder.begin_stop(false) {
            StopAction::None => {}
            StopAction::SimulatedStopped => self.notify_recording_stopped(),
            // Final data is assembled in notify_recorder_stopped once the
            // backend confirms; reading fragments earlier risks
            // incomplete media.
            StopAction::AwaitBackend => self.backend.stop(),
        }
    }

    /// Session-end cleanup: force-stop and discard. A recording is not
    /// meaningful once the AR view has ended, so nothing from this path
    /// reaches the gallery.
    pub fn force_stop_discard(&mut self) {
        match self.recorder.begin_stop(true) {
            StopAction::None => {}
            StopAction::SimulatedStopped => self.notify_recording_stopped(),
            StopAction::AwaitBackend => self.backend.stop(),
        }
        self.press = PressState::Idle;
    }

    /// Platform delivery of one recorded fragment.
    pub fn push_recorded_chunk(&mut self, data: Vec<u8>) {
        self.recorder.push_chunk(data);
    }

    /// Platform stop-completion signal: assemble, optionally re-encode,
    /// and hand off the finished item.
    pub fn notify_recorder_stopped(
        &mut self,
        surface: &mut dyn RenderSurface,
        audio: Option<&mut AmbientAudio>,
    ) {
        let Some(stopped) = self.recorder.finish_stop() else {
            return;
        };

        surface.release_stream(stopped.resources.stream);
        if let (Some(tap), Some(a)) = (stopped.resources.audio_tap, audio) {
            a.release_tap(tap);
        }

        self.notify_recording_stopped();

        if stopped.discard {
            log::info!("discarding recording stopped by session end");
            return;
        }
        if stopped.chunks.is_empty() {
            log::warn!("recording produced no data");
            return;
        }

        let data: Vec<u8> = stopped.chunks.concat();
        let source_container = container_for_mime(stopped.mime_type);
        let mut container = source_container;
        let mut blob = MediaBlob::new(data, stopped.mime_type.to_string());

        if container == MediaContainer::WebM && self.transcoder.is_available() {
            match self.transcoder.transcode(&blob, MediaContainer::Mp4) {
                Ok(converted) => {
                    container = MediaContainer::Mp4;
                    blob = converted;
                }
                Err(e) => log::warn!("re-encode failed, keeping original container: {}", e),
            }
        }

        let item = CaptureItem::new(
            CaptureKind::Video,
            blob,
            container,
            source_container,
            self.sequence.fetch_add(1, Ordering::SeqCst),
        );
        if let Some(ref delegate) = self.delegate {
            delegate.on_capture_item(item);
        }
    }

    pub fn file_name_for(&self, item: &CaptureItem) -> String {
        item.file_name(&self.config.filename_prefix)
    }

    fn start_simulated(&mut self) {
        self.recorder.start_simulated();
        self.notify_recording_started(RecordingMode::Simulated);
    }

    fn notify_recording_started(&self, mode: RecordingMode) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_recording_started(mode);
            delegate.on_recording_tick(0);
        }
    }

    fn notify_recording_stopped(&self) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_recording_stopped();
        }
    }
}
