use std::sync::Arc;

use crate::audio::AmbientAudio;
use crate::capture::controller::{CaptureConfig, CaptureController};
use crate::config::scene_asset_url;
use crate::models::error::ViewerError;
use crate::models::pose::SceneAnchor;
use crate::models::scene::SceneDescriptor;
use crate::models::state::{PlacementState, SessionState};
use crate::placement::hit_test::HitTestAdapter;
use crate::placement::tracker::{PlacementConfig, PlacementTracker};
use crate::render::animation::{select_clip, AnimationPlayer};
use crate::render::frame_loop::FrameLoop;
use crate::session::lifecycle::SessionController;
use crate::traits::assets::{AssetLoader, SceneModel, SceneNode};
use crate::traits::audio::AudioOutput;
use crate::traits::delegate::ViewerDelegate;
use crate::traits::recorder::RecorderBackend;
use crate::traits::runtime::{ArRuntime, FrameContext, SessionFeatures};
use crate::traits::surface::RenderSurface;
use crate::traits::transcoder::Transcoder;

/// Platform implementations the viewer is wired with.
pub struct ViewerBackends {
    pub surface: Box<dyn RenderSurface>,
    pub runtime: Box<dyn ArRuntime>,
    pub recorder: Box<dyn RecorderBackend>,
    pub transcoder: Box<dyn Transcoder>,
    pub audio_output: Box<dyn AudioOutput>,
    pub asset_loader: Box<dyn AssetLoader>,
    pub reticle: Box<dyn SceneNode>,
}

/// The viewer: one owned state object wiring scene content, placement,
/// session lifecycle, capture and ambient audio together.
///
/// All control flow is explicit: the platform glue forwards frame
/// callbacks to `tick`, user gestures to `select` / the capture press
/// methods, and session/recorder completion signals to the `notify_*`
/// methods. Nothing here is process-global, so multiple viewers can
/// coexist (and tests don't interfere).
pub struct ArViewer {
    descriptor: SceneDescriptor,
    base_url: String,
    scene_id: String,

    surface: Box<dyn RenderSurface>,
    asset_loader: Box<dyn AssetLoader>,
    model: Option<Box<dyn SceneModel>>,
    reticle: Box<dyn SceneNode>,

    frame_loop: FrameLoop,
    hit_test: HitTestAdapter,
    placement: PlacementTracker,
    session: SessionController,
    capture: CaptureController,
    audio: AmbientAudio,

    delegate: Option<Arc<dyn ViewerDelegate>>,
    last_placement: PlacementState,
}

impl ArViewer {
    pub fn new(
        descriptor: SceneDescriptor,
        base_url: impl Into<String>,
        scene_id: impl Into<String>,
        backends: ViewerBackends,
    ) -> Self {
        Self {
            descriptor,
            base_url: base_url.into(),
            scene_id: scene_id.into(),
            surface: backends.surface,
            asset_loader: backends.asset_loader,
            model: None,
            reticle: backends.reticle,
            frame_loop: FrameLoop::new(AnimationPlayer::new()),
            hit_test: HitTestAdapter::new(),
            placement: PlacementTracker::new(PlacementConfig::default()),
            session: SessionController::new(backends.runtime, SessionFeatures::immersive_ar()),
            capture: CaptureController::new(
                backends.recorder,
                backends.transcoder,
                CaptureConfig::default(),
            ),
            audio: AmbientAudio::new(backends.audio_output),
            delegate: None,
            last_placement: PlacementState::Searching,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn ViewerDelegate>) {
        self.session.set_delegate(Arc::clone(&delegate));
        self.capture.set_delegate(Arc::clone(&delegate));
        self.delegate = Some(delegate);
    }

    /// Load the model asset, pick the animation clip, and prepare the
    /// ambient audio. Failures here are fatal to initialization, except
    /// audio, which degrades to a silent viewer.
    pub fn initialize(&mut self) -> Result<(), ViewerError> {
        self.descriptor.validate()?;
        let model_ref = self
            .descriptor
            .model
            .as_ref()
            .map(|m| m.url.clone())
            .unwrap_or_default();

        let model_url = scene_asset_url(&self.base_url, &self.scene_id, &model_ref);
        let mut model = self.asset_loader.load_model(&model_url)?;

        // Invisible until placed; never rendered mid-transition.
        model.set_visible(false);
        self.reticle.set_visible(false);

        if let Some(clip) = select_clip(model.clips(), &self.descriptor.animations) {
            self.frame_loop.animation_mut().play(clip);
        }
        self.model = Some(model);

        if let Some(audio_cfg) = self.descriptor.audio.clone() {
            if !audio_cfg.url.trim().is_empty() {
                let url = scene_asset_url(&self.base_url, &self.scene_id, &audio_cfg.url);
                if let Err(e) = self.audio.configure(&audio_cfg, &url) {
                    log::warn!("ambient audio unavailable: {}", e);
                }
            }
        }
        Ok(())
    }

    /// Request the immersive AR session.
    pub fn start_ar(&mut self) -> Result<(), ViewerError> {
        self.session.start()?;
        // Status fan-out has already run inside the controller; dependent
        // collaborators act after it.
        self.audio.handle_session_started();
        Ok(())
    }

    /// User-driven session end; the platform confirms through
    /// `notify_session_ended`.
    pub fn end_ar(&mut self) {
        self.session.end();
    }

    /// Platform-driven session end. Resets every piece of session-scoped
    /// state so the next `start_ar` begins from a clean slate; any
    /// in-progress recording is force-stopped and discarded.
    pub fn notify_session_ended(&mut self) {
        if !self.session.handle_session_end() {
            return;
        }

        self.hit_test.reset();
        self.placement.reset();
        self.reticle.set_visible(false);
        if let Some(model) = self.model.as_mut() {
            model.set_visible(false);
        }
        self.frame_loop.reset_clock();
        self.capture.force_stop_discard();
        self.audio.handle_session_ended();
        self.notify_placement_if_changed();
    }

    /// One frame: animation, sampling/placement, capture timers, ambient
    /// audio countdown, draw. Runs identically with and without an AR
    /// frame context.
    pub fn tick(&mut self, timestamp_ms: f64, frame: Option<&dyn FrameContext>) {
        let outcome = self.frame_loop.tick(
            timestamp_ms,
            frame,
            self.session.session_mut(),
            &mut self.hit_test,
            &mut self.placement,
            self.surface.as_mut(),
        );

        if let Some(anchor) = outcome.auto_placed {
            self.apply_anchor(&anchor);
        }
        self.sync_reticle();
        self.notify_placement_if_changed();

        self.capture
            .tick(outcome.delta, self.surface.as_mut(), Some(&mut self.audio));
        self.audio.tick(outcome.delta);
    }

    /// User "select" (tap). Commits placement when a reticle is showing;
    /// a tap during search never places at an undefined location.
    pub fn select(&mut self) {
        if !self.session.is_active() {
            return;
        }
        if let Some(anchor) = self.placement.on_select() {
            self.apply_anchor(&anchor);
        }
        self.notify_placement_if_changed();
    }

    // --- Capture pass-through ---

    pub fn capture_press_started(&mut self) {
        self.capture.press_started();
    }

    pub fn capture_press_released(&mut self) {
        self.capture.press_released(self.surface.as_mut());
    }

    pub fn capture_photo(&mut self) {
        self.capture.capture_photo(self.surface.as_mut());
    }

    /// Platform delivery of one recorded media fragment.
    pub fn push_recorded_chunk(&mut self, data: Vec<u8>) {
        self.capture.push_recorded_chunk(data);
    }

    /// Platform recorder stop-completion signal.
    pub fn notify_recorder_stopped(&mut self) {
        self.capture
            .notify_recorder_stopped(self.surface.as_mut(), Some(&mut self.audio));
    }

    // --- Audio ---

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    /// Whether the scene has ambient audio (drives the mute control's
    /// visibility in the UI collaborator).
    pub fn has_ambient_audio(&self) -> bool {
        self.audio.has_audio()
    }

    // --- State accessors ---

    pub fn descriptor(&self) -> &SceneDescriptor {
        &self.descriptor
    }

    pub fn placement_state(&self) -> PlacementState {
        self.placement.state()
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_recording(&self) -> bool {
        self.capture.is_recording()
    }

    pub fn current_clip(&self) -> Option<&str> {
        self.frame_loop.animation().current_clip()
    }

    fn apply_anchor(&mut self, anchor: &SceneAnchor) {
        if let Some(model) = self.model.as_mut() {
            model.set_transform(&anchor.transform);
            model.set_visible(true);
        }
        self.reticle.set_visible(false);
    }

    fn sync_reticle(&mut self) {
        match self.placement.reticle_pose().copied() {
            Some(pose) => {
                self.reticle.set_transform(&pose);
                self.reticle.set_visible(true);
            }
            None => self.reticle.set_visible(false),
        }
    }

    fn notify_placement_if_changed(&mut self) {
        let state = self.placement.state();
        if state != self.last_placement {
            self.last_placement = state;
            if let Some(ref delegate) = self.delegate {
                delegate.on_placement_changed(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::capture_item::CaptureItem;
    use crate::models::error::ViewerError;
    use crate::models::pose::RigidTransform;
    use crate::models::scene::AnimationClip;
    use crate::support::Support;
    use crate::traits::audio::AudioTapHandle;
    use crate::traits::runtime::{ArSessionHandle, HitTestSource};
    use crate::traits::surface::{SnapshotCallback, StreamHandle};
    use glam::{Quat, Vec3};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct NodeState {
        visible: Option<bool>,
        transform: Option<RigidTransform>,
    }

    struct Node {
        state: Arc<Mutex<NodeState>>,
        clips: Vec<AnimationClip>,
    }

    impl SceneNode for Node {
        fn set_visible(&mut self, visible: bool) {
            self.state.lock().visible = Some(visible);
        }

        fn set_transform(&mut self, transform: &RigidTransform) {
            self.state.lock().transform = Some(*transform);
        }
    }

    impl SceneModel for Node {
        fn clips(&self) -> &[AnimationClip] {
            &self.clips
        }
    }

    struct Loader {
        model_state: Arc<Mutex<NodeState>>,
        clips: Vec<AnimationClip>,
        loaded_urls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl AssetLoader for Loader {
        fn load_model(&mut self, url: &str) -> Result<Box<dyn SceneModel>, ViewerError> {
            if self.fail {
                return Err(ViewerError::AssetLoad("corrupt file".into()));
            }
            self.loaded_urls.lock().push(url.to_string());
            Ok(Box::new(Node {
                state: Arc::clone(&self.model_state),
                clips: self.clips.clone(),
            }))
        }
    }

    struct Surface {
        draws: Arc<Mutex<usize>>,
    }

    impl RenderSurface for Surface {
        fn render(&mut self) -> Result<(), ViewerError> {
            *self.draws.lock() += 1;
            Ok(())
        }

        fn request_snapshot(&mut self, _quality: f32, on_ready: SnapshotCallback) {
            on_ready(Some(crate::models::capture_item::MediaBlob::new(
                vec![1, 2],
                "image/jpeg",
            )));
        }

        fn capture_stream(&mut self, _frame_rate: u32) -> Result<StreamHandle, ViewerError> {
            Ok(StreamHandle(1))
        }

        fn release_stream(&mut self, _stream: StreamHandle) {}
    }

    struct Session {
        source_requests: Arc<Mutex<usize>>,
    }

    impl ArSessionHandle for Session {
        fn request_hit_test_source(&mut self) -> Result<HitTestSource, ViewerError> {
            *self.source_requests.lock() += 1;
            Ok(HitTestSource(1))
        }

        fn end(&mut self) {}
    }

    struct Runtime {
        support: Support,
        source_requests: Arc<Mutex<usize>>,
    }

    impl ArRuntime for Runtime {
        fn check_support(&self) -> Support {
            self.support
        }

        fn request_session(
            &mut self,
            _features: &SessionFeatures,
        ) -> Result<Box<dyn ArSessionHandle>, ViewerError> {
            Ok(Box::new(Session {
                source_requests: Arc::clone(&self.source_requests),
            }))
        }
    }

    struct Frame {
        hits: Vec<RigidTransform>,
        viewer: Option<RigidTransform>,
    }

    impl FrameContext for Frame {
        fn viewer_pose(&self) -> Option<RigidTransform> {
            self.viewer
        }

        fn hit_test(&self, _source: HitTestSource) -> Result<Vec<RigidTransform>, ViewerError> {
            Ok(self.hits.clone())
        }
    }

    struct Recorder;

    impl RecorderBackend for Recorder {
        fn is_available(&self) -> bool {
            true
        }

        fn supports_mime_type(&self, mime_type: &str) -> bool {
            mime_type == "video/webm"
        }

        fn start(
            &mut self,
            _stream: StreamHandle,
            _audio: Option<AudioTapHandle>,
            _mime_type: &str,
        ) -> Result<(), ViewerError> {
            Ok(())
        }

        fn stop(&mut self) {}
    }

    struct SilentOutput;

    impl AudioOutput for SilentOutput {
        fn load(&mut self, _url: &str, _looping: bool, _volume: f32) -> Result<(), ViewerError> {
            Ok(())
        }

        fn play(&mut self) -> Result<(), ViewerError> {
            Ok(())
        }

        fn pause(&mut self) {}

        fn rewind(&mut self) {}

        fn set_muted(&mut self, _muted: bool) {}

        fn is_loaded(&self) -> bool {
            false
        }

        fn create_tap(&mut self) -> Result<AudioTapHandle, ViewerError> {
            Err(ViewerError::AudioOutput("no graph".into()))
        }

        fn release_tap(&mut self, _tap: AudioTapHandle) {}
    }

    #[derive(Default)]
    struct Sink {
        started: Mutex<usize>,
        ended: Mutex<usize>,
        placement: Mutex<Vec<PlacementState>>,
        items: Mutex<Vec<CaptureItem>>,
    }

    impl ViewerDelegate for Sink {
        fn on_session_started(&self) {
            *self.started.lock() += 1;
        }

        fn on_session_ended(&self) {
            *self.ended.lock() += 1;
        }

        fn on_placement_changed(&self, state: PlacementState) {
            self.placement.lock().push(state);
        }

        fn on_capture_item(&self, item: CaptureItem) {
            self.items.lock().push(item);
        }
    }

    struct World {
        viewer: ArViewer,
        sink: Arc<Sink>,
        model_state: Arc<Mutex<NodeState>>,
        reticle_state: Arc<Mutex<NodeState>>,
        source_requests: Arc<Mutex<usize>>,
        loaded_urls: Arc<Mutex<Vec<String>>>,
        draws: Arc<Mutex<usize>>,
    }

    fn world(descriptor_json: &str, clips: Vec<AnimationClip>) -> World {
        let descriptor: SceneDescriptor = serde_json::from_str(descriptor_json).unwrap();
        let model_state = Arc::new(Mutex::new(NodeState::default()));
        let reticle_state = Arc::new(Mutex::new(NodeState::default()));
        let source_requests = Arc::new(Mutex::new(0));
        let loaded_urls = Arc::new(Mutex::new(Vec::new()));
        let draws = Arc::new(Mutex::new(0));

        let backends = ViewerBackends {
            surface: Box::new(Surface {
                draws: Arc::clone(&draws),
            }),
            runtime: Box::new(Runtime {
                support: Support::Supported,
                source_requests: Arc::clone(&source_requests),
            }),
            recorder: Box::new(Recorder),
            transcoder: Box::new(crate::traits::transcoder::NoTranscoder),
            audio_output: Box::new(SilentOutput),
            asset_loader: Box::new(Loader {
                model_state: Arc::clone(&model_state),
                clips,
                loaded_urls: Arc::clone(&loaded_urls),
                fail: false,
            }),
            reticle: Box::new(Node {
                state: Arc::clone(&reticle_state),
                clips: Vec::new(),
            }),
        };

        let mut viewer = ArViewer::new(descriptor, "https://cdn.example.com", "toy", backends);
        let sink = Arc::new(Sink::default());
        viewer.set_delegate(Arc::clone(&sink) as Arc<dyn ViewerDelegate>);
        World {
            viewer,
            sink,
            model_state,
            reticle_state,
            source_requests,
            loaded_urls,
            draws,
        }
    }

    fn spin_clips() -> Vec<AnimationClip> {
        vec![
            AnimationClip {
                name: "Idle".into(),
                duration_secs: 1.0,
            },
            AnimationClip {
                name: "Spin".into(),
                duration_secs: 2.0,
            },
        ]
    }

    const TOY_SCENE: &str =
        r#"{ "model": { "url": "toy.glb" }, "animations": ["Spin"] }"#;

    #[test]
    fn end_to_end_placement_scenario() {
        let mut w = world(TOY_SCENE, spin_clips());
        w.viewer.initialize().unwrap();

        // The requested clip plays; no audio control is shown.
        assert_eq!(w.viewer.current_clip(), Some("Spin"));
        assert!(!w.viewer.has_ambient_audio());
        assert_eq!(
            w.loaded_urls.lock()[0],
            "https://cdn.example.com/scenes/toy/toy.glb"
        );
        assert_eq!(w.model_state.lock().visible, Some(false));

        w.viewer.start_ar().unwrap();
        assert_eq!(*w.sink.started.lock(), 1);

        // Three searching frames.
        let empty = Frame {
            hits: vec![],
            viewer: Some(RigidTransform::IDENTITY),
        };
        for i in 0..3 {
            w.viewer.tick(i as f64 * 16.0, Some(&empty));
            assert_eq!(w.viewer.placement_state(), PlacementState::Searching);
        }
        assert_eq!(w.model_state.lock().visible, Some(false));

        // One valid sample, then a select.
        let hit_pose = RigidTransform::new(Vec3::new(0.5, 0.0, -1.0), Quat::IDENTITY);
        let tracked = Frame {
            hits: vec![hit_pose],
            viewer: Some(RigidTransform::IDENTITY),
        };
        w.viewer.tick(48.0, Some(&tracked));
        assert_eq!(w.viewer.placement_state(), PlacementState::Tracking);
        assert_eq!(w.reticle_state.lock().visible, Some(true));

        w.viewer.select();

        assert_eq!(w.viewer.placement_state(), PlacementState::Placed);
        assert_eq!(w.model_state.lock().visible, Some(true));
        assert_eq!(w.model_state.lock().transform, Some(hit_pose));
        assert_eq!(w.reticle_state.lock().visible, Some(false));

        // Exactly one PLACED transition was observed.
        let placed_transitions = w
            .sink
            .placement
            .lock()
            .iter()
            .filter(|s| **s == PlacementState::Placed)
            .count();
        assert_eq!(placed_transitions, 1);

        // The hit-test source was subscribed exactly once.
        assert_eq!(*w.source_requests.lock(), 1);
    }

    #[test]
    fn select_before_any_sample_does_nothing() {
        let mut w = world(TOY_SCENE, spin_clips());
        w.viewer.initialize().unwrap();
        w.viewer.start_ar().unwrap();

        w.viewer.select();

        assert_eq!(w.viewer.placement_state(), PlacementState::Searching);
        assert_eq!(w.model_state.lock().visible, Some(false));
    }

    #[test]
    fn select_outside_a_session_does_nothing() {
        let mut w = world(TOY_SCENE, spin_clips());
        w.viewer.initialize().unwrap();
        w.viewer.select();
        assert_eq!(w.viewer.placement_state(), PlacementState::Searching);
    }

    #[test]
    fn renders_before_and_without_a_session() {
        let mut w = world(TOY_SCENE, spin_clips());
        w.viewer.initialize().unwrap();

        w.viewer.tick(0.0, None);
        w.viewer.tick(16.0, None);
        assert_eq!(*w.draws.lock(), 2);
    }

    #[test]
    fn session_end_resets_to_a_clean_slate() {
        let mut w = world(TOY_SCENE, spin_clips());
        w.viewer.initialize().unwrap();
        w.viewer.start_ar().unwrap();

        let tracked = Frame {
            hits: vec![RigidTransform::IDENTITY],
            viewer: Some(RigidTransform::IDENTITY),
        };
        w.viewer.tick(0.0, Some(&tracked));
        w.viewer.select();
        assert_eq!(w.viewer.placement_state(), PlacementState::Placed);

        w.viewer.notify_session_ended();

        assert_eq!(*w.sink.ended.lock(), 1);
        assert_eq!(w.viewer.session_state(), SessionState::Idle);
        assert_eq!(w.viewer.placement_state(), PlacementState::Searching);
        assert_eq!(w.model_state.lock().visible, Some(false));
        assert_eq!(w.reticle_state.lock().visible, Some(false));

        // A second session subscribes a fresh hit-test source.
        w.viewer.start_ar().unwrap();
        w.viewer.tick(100.0, Some(&tracked));
        assert_eq!(*w.source_requests.lock(), 2);
        assert_eq!(w.viewer.placement_state(), PlacementState::Tracking);
    }

    #[test]
    fn session_end_discards_a_running_recording() {
        let mut w = world(TOY_SCENE, spin_clips());
        w.viewer.initialize().unwrap();
        w.viewer.start_ar().unwrap();

        w.viewer.capture_press_started();
        w.viewer.tick(0.0, None);
        w.viewer.tick(400.0, None);
        assert!(w.viewer.is_recording());
        w.viewer.push_recorded_chunk(vec![1, 2, 3]);

        w.viewer.notify_session_ended();
        assert!(!w.viewer.is_recording());

        w.viewer.notify_recorder_stopped();
        assert!(w.sink.items.lock().is_empty());
    }

    #[test]
    fn auto_place_falls_back_to_the_viewer_pose() {
        let mut w = world(TOY_SCENE, spin_clips());
        w.viewer.initialize().unwrap();
        w.viewer.start_ar().unwrap();

        let viewer_pose = RigidTransform::new(Vec3::new(0.0, 1.6, 0.0), Quat::IDENTITY);
        let empty = Frame {
            hits: vec![],
            viewer: Some(viewer_pose),
        };

        w.viewer.tick(0.0, Some(&empty));
        w.viewer.tick(5000.0, Some(&empty));

        assert_eq!(w.viewer.placement_state(), PlacementState::Placed);
        let state = w.model_state.lock();
        assert_eq!(state.visible, Some(true));
        assert_eq!(
            state.transform.unwrap().position,
            Vec3::new(0.0, 1.6, -1.5)
        );
    }

    #[test]
    fn short_press_through_the_viewer_takes_a_photo() {
        let mut w = world(TOY_SCENE, spin_clips());
        w.viewer.initialize().unwrap();

        w.viewer.capture_press_started();
        w.viewer.tick(0.0, None);
        w.viewer.tick(100.0, None);
        w.viewer.capture_press_released();

        let items = w.sink.items.lock();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, crate::models::capture_item::CaptureKind::Photo);
    }

    #[test]
    fn missing_clip_preference_falls_back_to_first() {
        let mut w = world(
            r#"{ "model": { "url": "toy.glb" }, "animations": ["Nope"] }"#,
            spin_clips(),
        );
        w.viewer.initialize().unwrap();
        assert_eq!(w.viewer.current_clip(), Some("Idle"));
    }

    #[test]
    fn clipless_model_plays_nothing() {
        let mut w = world(TOY_SCENE, Vec::new());
        w.viewer.initialize().unwrap();
        assert!(w.viewer.current_clip().is_none());
    }

    #[test]
    fn failing_asset_load_is_fatal() {
        let descriptor: SceneDescriptor = serde_json::from_str(TOY_SCENE).unwrap();
        let backends = ViewerBackends {
            surface: Box::new(Surface {
                draws: Arc::new(Mutex::new(0)),
            }),
            runtime: Box::new(Runtime {
                support: Support::Supported,
                source_requests: Arc::new(Mutex::new(0)),
            }),
            recorder: Box::new(Recorder),
            transcoder: Box::new(crate::traits::transcoder::NoTranscoder),
            audio_output: Box::new(SilentOutput),
            asset_loader: Box::new(Loader {
                model_state: Arc::new(Mutex::new(NodeState::default())),
                clips: Vec::new(),
                loaded_urls: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            }),
            reticle: Box::new(Node {
                state: Arc::new(Mutex::new(NodeState::default())),
                clips: Vec::new(),
            }),
        };
        let mut viewer = ArViewer::new(descriptor, "https://b", "s", backends);
        assert!(matches!(
            viewer.initialize(),
            Err(ViewerError::AssetLoad(_))
        ));
    }

    #[test]
    fn audio_scene_exposes_the_audio_control() {
        let mut w = world(
            r#"{ "model": { "url": "toy.glb" }, "audio": { "url": "t.mp3" } }"#,
            Vec::new(),
        );
        w.viewer.initialize().unwrap();
        assert!(w.viewer.has_ambient_audio());
    }
}
