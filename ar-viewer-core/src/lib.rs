//! # ar-viewer-core
//!
//! Platform-agnostic AR viewer core library.
//!
//! Provides scene-descriptor handling, hit-test-driven placement, the
//! frame-synchronized render/update loop, session lifecycle, and the
//! photo/video capture subsystem. Platform backends (WebXR/browser, test
//! doubles) implement the seams in `traits/` and plug into the generic
//! `ArViewer` orchestrator.
//!
//! ## Architecture
//!
//! ```text
//! ar-viewer-core (this crate)
//! ├── traits/      ← ArRuntime, RenderSurface, RecorderBackend, AudioOutput,
//! │                  Transcoder, SceneFetcher, AssetLoader, ViewerDelegate
//! ├── models/      ← ViewerError, states, RigidTransform, SceneDescriptor,
//! │                  CaptureItem
//! ├── placement/   ← HitTestAdapter, PlacementTracker
//! ├── render/      ← AnimationPlayer, FrameLoop
//! ├── session/     ← SessionController
//! ├── capture/     ← codec probing, VideoRecorder, CaptureController
//! ├── audio        ← AmbientAudio
//! ├── config       ← scene descriptor loading
//! └── viewer       ← ArViewer (owned orchestrator)
//! ```

pub mod audio;
pub mod capture;
pub mod config;
pub mod models;
pub mod placement;
pub mod render;
pub mod session;
pub mod support;
pub mod traits;
pub mod viewer;

// Re-export key types at crate root for convenience.
pub use audio::AmbientAudio;
pub use capture::controller::{CaptureConfig, CaptureController};
pub use capture::recorder::MAX_RECORD_TIME;
pub use config::{load_scene_descriptor, SCENE_FETCH_TIMEOUT};
pub use models::capture_item::{CaptureItem, CaptureKind, MediaBlob, MediaContainer};
pub use models::error::{FetchError, ViewerError};
pub use models::pose::{RigidTransform, SceneAnchor, TrackingSample};
pub use models::scene::{AnimationClip, SceneDescriptor};
pub use models::state::{PlacementState, RecordingMode, SessionState};
pub use placement::hit_test::HitTestAdapter;
pub use placement::tracker::{PlacementConfig, PlacementTracker};
pub use render::animation::AnimationPlayer;
pub use render::frame_loop::FrameLoop;
pub use session::lifecycle::SessionController;
pub use support::Support;
pub use traits::delegate::{format_elapsed, ViewerDelegate};
pub use viewer::{ArViewer, ViewerBackends};
