use crate::models::error::ViewerError;
use crate::models::pose::RigidTransform;
use crate::support::Support;

/// Capabilities negotiated when requesting an immersive AR session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFeature {
    /// Surface hit-testing against the sensed environment.
    HitTest,
    /// A floor-aligned spatial reference frame.
    FloorReferenceSpace,
    /// In-view UI overlay rendered on top of the camera feed.
    UiOverlay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFeatures {
    pub required: Vec<SessionFeature>,
    pub optional: Vec<SessionFeature>,
}

impl SessionFeatures {
    /// The standard immersive-AR configuration: hit-testing and a floor
    /// reference frame are required, the UI overlay is nice to have.
    pub fn immersive_ar() -> Self {
        Self {
            required: vec![SessionFeature::HitTest, SessionFeature::FloorReferenceSpace],
            optional: vec![SessionFeature::UiOverlay],
        }
    }
}

impl Default for SessionFeatures {
    fn default() -> Self {
        Self::immersive_ar()
    }
}

/// Opaque token for a platform hit-test subscription.
///
/// Minted by the session when the source is granted; the platform maps it
/// back to its own object. Owned by exactly one session lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestSource(pub u64);

/// Platform entry point for immersive AR.
pub trait ArRuntime {
    /// One-shot capability probe for the immersive AR mode itself.
    fn check_support(&self) -> Support;

    /// Request a session with the given capabilities.
    ///
    /// Errors distinguish a rejected configuration from absent AR support
    /// (the latter is already ruled out by `check_support`).
    fn request_session(
        &mut self,
        features: &SessionFeatures,
    ) -> Result<Box<dyn ArSessionHandle>, ViewerError>;
}

/// A granted platform session.
pub trait ArSessionHandle {
    /// Obtain a hit-test source bound to the viewer's forward ray.
    fn request_hit_test_source(&mut self) -> Result<HitTestSource, ViewerError>;

    /// Ask the platform to end the session. The platform confirms through
    /// the viewer's `notify_session_ended`, not through this call.
    fn end(&mut self);
}

/// Per-frame pose context delivered by the platform frame callback.
///
/// Absent entirely when no AR session is active; the render loop then
/// simply skips the sampling step.
pub trait FrameContext {
    /// Current viewer (camera) pose, if tracked this frame.
    fn viewer_pose(&self) -> Option<RigidTransform>;

    /// Hit-test result poses for the given source, best first. An empty
    /// list is the normal no-surface case, not an error.
    fn hit_test(&self, source: HitTestSource) -> Result<Vec<RigidTransform>, ViewerError>;
}
