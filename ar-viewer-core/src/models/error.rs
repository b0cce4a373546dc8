use thiserror::Error;

/// Errors surfaced by the viewer core.
///
/// Configuration and fetch variants are fatal to initialization; everything
/// else is contained within its owning component and expressed as a
/// fallback or a transient status event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("scene configuration invalid: {0}")]
    Config(String),

    #[error("scene fetch timed out")]
    FetchTimeout,

    #[error("scene fetch failed: HTTP {0}")]
    FetchHttp(u16),

    #[error("scene fetch failed: {0}")]
    FetchNetwork(String),

    #[error("model asset load failed: {0}")]
    AssetLoad(String),

    #[error("immersive AR not available on this platform")]
    ArUnavailable,

    #[error("AR session request rejected: {0}")]
    SessionRejected(String),

    #[error("hit-test source request rejected: {0}")]
    HitTestRejected(String),

    #[error("capture failed: {0}")]
    CaptureFailed(String),

    #[error("no supported recording format")]
    RecordingUnsupported,

    #[error("transcode failed: {0}")]
    TranscodeFailed(String),

    #[error("audio output error: {0}")]
    AudioOutput(String),

    #[error("render failed: {0}")]
    RenderFailed(String),
}

/// Failure modes of the scene-descriptor fetch.
///
/// Timeout is reported distinctly from an unreachable host or a non-2xx
/// status so the user-facing error can say which one happened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("{0}")]
    Network(String),
}

impl From<FetchError> for ViewerError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => ViewerError::FetchTimeout,
            FetchError::Http(status) => ViewerError::FetchHttp(status),
            FetchError::Network(msg) => ViewerError::FetchNetwork(msg),
        }
    }
}
