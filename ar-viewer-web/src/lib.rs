//! # ar-viewer-web
//!
//! WebXR/browser backend for ar-viewer-kit.
//!
//! Provides:
//! - `CanvasSurface` — render surface over an `HtmlCanvasElement`
//!   (snapshot via `toBlob`, live stream via `captureStream`)
//! - `WebMediaRecorder` — `MediaRecorder` backend with mime-type probing
//! - `WebAudioOutput` — persistent `<audio>` element plus the
//!   `AudioContext` tap used for mixing into recordings
//! - `xr` — WebXR session/hit-test glue implementing the core runtime
//!   traits
//!
//! ## Platform Requirements
//! - `wasm32-unknown-unknown` target; the whole crate is empty elsewhere
//! - The WebXR bindings are unstable in `web-sys` and additionally need
//!   `RUSTFLAGS=--cfg=web_sys_unstable_apis`
//!
//! ## Usage
//! ```ignore
//! use ar_viewer_core::{ArViewer, ViewerBackends};
//! use ar_viewer_web::{CanvasSurface, WebAudioOutput, WebMediaRecorder};
//!
//! let registry = ar_viewer_web::shared_registry();
//! let surface = CanvasSurface::new(canvas, draw_fn, registry.clone());
//! let recorder = WebMediaRecorder::new(registry.clone(), on_chunk, on_stopped);
//! ```

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod recorder;
#[cfg(all(target_arch = "wasm32", web_sys_unstable_apis))]
pub mod xr;

#[cfg(target_arch = "wasm32")]
pub use audio::WebAudioOutput;
#[cfg(target_arch = "wasm32")]
pub use canvas::{shared_registry, CanvasSurface, MediaStreamRegistry, SharedRegistry};
#[cfg(target_arch = "wasm32")]
pub use recorder::WebMediaRecorder;
