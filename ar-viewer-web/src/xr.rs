//! WebXR session and hit-test glue.
//!
//! The core traits are synchronous (the viewer runs on one logical
//! thread), while the WebXR entry points are promises. The async
//! negotiation therefore happens in the helpers here (`detect_support`
//! and `request_immersive_session`), and the granted objects are wrapped
//! into a `WebXrRuntime` the session controller consumes synchronously.

use std::cell::RefCell;
use std::rc::Rc;

use ar_viewer_core::models::error::ViewerError;
use ar_viewer_core::models::pose::RigidTransform;
use ar_viewer_core::support::Support;
use ar_viewer_core::traits::runtime::{
    ArRuntime, ArSessionHandle, FrameContext, HitTestSource, SessionFeature, SessionFeatures,
};
use glam::Mat4;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    XrFrame, XrHitTestOptionsInit, XrHitTestResult, XrHitTestSource, XrReferenceSpace,
    XrReferenceSpaceType, XrRigidTransform, XrSession, XrSessionInit, XrSessionMode,
};

fn feature_name(feature: SessionFeature) -> &'static str {
    match feature {
        SessionFeature::HitTest => "hit-test",
        SessionFeature::FloorReferenceSpace => "local-floor",
        SessionFeature::UiOverlay => "dom-overlay",
    }
}

fn transform_from_xr(transform: &XrRigidTransform) -> Option<RigidTransform> {
    let matrix = transform.matrix();
    if matrix.len() != 16 {
        return None;
    }
    let mut cols = [0.0f32; 16];
    cols.copy_from_slice(&matrix);
    Some(RigidTransform::from_matrix(&Mat4::from_cols_array(&cols)))
}

/// Probe `navigator.xr` for immersive AR.
pub async fn detect_support() -> Support {
    let Some(window) = web_sys::window() else {
        return Support::Unsupported;
    };
    let navigator = window.navigator();
    let has_xr = js_sys::Reflect::has(&navigator, &JsValue::from_str("xr")).unwrap_or(false);
    if !has_xr {
        return Support::Unsupported;
    }

    match JsFuture::from(navigator.xr().is_session_supported(XrSessionMode::ImmersiveAr)).await {
        Ok(value) => {
            if value.as_bool().unwrap_or(false) {
                Support::Supported
            } else {
                Support::Unsupported
            }
        }
        Err(e) => {
            log::warn!("isSessionSupported probe failed: {:?}", e);
            Support::Unknown
        }
    }
}

/// Everything a granted immersive session comes with.
pub struct XrSessionResources {
    pub session: XrSession,
    pub reference_space: XrReferenceSpace,
    pub viewer_space: XrReferenceSpace,
}

/// Negotiate the immersive session and its reference spaces.
pub async fn request_immersive_session(
    features: &SessionFeatures,
) -> Result<XrSessionResources, ViewerError> {
    let window =
        web_sys::window().ok_or_else(|| ViewerError::SessionRejected("no window".into()))?;
    let xr = window.navigator().xr();

    let init = XrSessionInit::new();
    let required = js_sys::Array::new();
    for feature in &features.required {
        required.push(&JsValue::from_str(feature_name(*feature)));
    }
    let optional = js_sys::Array::new();
    for feature in &features.optional {
        optional.push(&JsValue::from_str(feature_name(*feature)));
    }
    init.set_required_features(&required);
    init.set_optional_features(&optional);

    let session: XrSession =
        JsFuture::from(xr.request_session_with_options(XrSessionMode::ImmersiveAr, &init))
            .await
            .map_err(|e| ViewerError::SessionRejected(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|_| ViewerError::SessionRejected("unexpected session object".into()))?;

    let reference_space: XrReferenceSpace =
        JsFuture::from(session.request_reference_space(XrReferenceSpaceType::LocalFloor))
            .await
            .map_err(|e| ViewerError::SessionRejected(format!("reference space: {:?}", e)))?
            .dyn_into()
            .map_err(|_| ViewerError::SessionRejected("unexpected reference space".into()))?;

    let viewer_space: XrReferenceSpace =
        JsFuture::from(session.request_reference_space(XrReferenceSpaceType::Viewer))
            .await
            .map_err(|e| ViewerError::SessionRejected(format!("viewer space: {:?}", e)))?
            .dyn_into()
            .map_err(|_| ViewerError::SessionRejected("unexpected viewer space".into()))?;

    Ok(XrSessionResources {
        session,
        reference_space,
        viewer_space,
    })
}

/// Attach a session-ended listener; route it to the viewer's
/// `notify_session_ended`.
pub fn on_session_end(session: &XrSession, handler: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut()>::new(handler);
    session.set_onend(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}

struct SessionShared {
    session: XrSession,
    reference_space: XrReferenceSpace,
    viewer_space: XrReferenceSpace,
    hit_source: RefCell<Option<XrHitTestSource>>,
}

/// Runtime handed to the session controller after the async negotiation
/// already ran: `check_support` reports the probe result, and
/// `request_session` consumes the pre-granted session.
pub struct WebXrRuntime {
    support: Support,
    granted: Option<Rc<SessionShared>>,
}

impl WebXrRuntime {
    pub fn unavailable(support: Support) -> Self {
        Self {
            support,
            granted: None,
        }
    }

    /// Wrap granted session resources. Returns the runtime plus the frame
    /// factory the render-loop glue uses to build per-frame contexts.
    pub fn granted(resources: XrSessionResources) -> (Self, WebXrFramer) {
        let shared = Rc::new(SessionShared {
            session: resources.session,
            reference_space: resources.reference_space,
            viewer_space: resources.viewer_space,
            hit_source: RefCell::new(None),
        });
        (
            Self {
                support: Support::Supported,
                granted: Some(Rc::clone(&shared)),
            },
            WebXrFramer { shared },
        )
    }
}

impl ArRuntime for WebXrRuntime {
    fn check_support(&self) -> Support {
        self.support
    }

    fn request_session(
        &mut self,
        _features: &SessionFeatures,
    ) -> Result<Box<dyn ArSessionHandle>, ViewerError> {
        match self.granted.take() {
            Some(shared) => Ok(Box::new(WebXrSession { shared })),
            None => Err(ViewerError::SessionRejected(
                "session was not granted by the platform".into(),
            )),
        }
    }
}

pub struct WebXrSession {
    shared: Rc<SessionShared>,
}

impl ArSessionHandle for WebXrSession {
    /// Kicks off the async platform request and resolves the source into
    /// the shared slot; sampling stays invalid until it lands, which the
    /// placement machinery treats as SEARCHING.
    fn request_hit_test_source(&mut self) -> Result<HitTestSource, ViewerError> {
        let options = XrHitTestOptionsInit::new(&self.shared.viewer_space);
        let promise = self
            .shared
            .session
            .request_hit_test_source(&options)
            .map_err(|e| ViewerError::HitTestRejected(format!("{:?}", e)))?;

        let shared = Rc::clone(&self.shared);
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(source) => {
                    *shared.hit_source.borrow_mut() = source.dyn_into().ok();
                }
                Err(e) => log::warn!("hit-test source request rejected: {:?}", e),
            }
        });
        Ok(HitTestSource(1))
    }

    fn end(&mut self) {
        // Completion is observed through the session's `end` event, which
        // the embedder routes to `notify_session_ended`.
        let _ = self.shared.session.end();
    }
}

/// Builds a `FrameContext` per platform frame callback.
pub struct WebXrFramer {
    shared: Rc<SessionShared>,
}

impl WebXrFramer {
    pub fn frame_context(&self, frame: XrFrame) -> WebXrFrame {
        WebXrFrame {
            frame,
            shared: Rc::clone(&self.shared),
        }
    }
}

pub struct WebXrFrame {
    frame: XrFrame,
    shared: Rc<SessionShared>,
}

impl FrameContext for WebXrFrame {
    fn viewer_pose(&self) -> Option<RigidTransform> {
        let pose = self.frame.get_viewer_pose(&self.shared.reference_space)?;
        transform_from_xr(&pose.transform())
    }

    fn hit_test(&self, _source: HitTestSource) -> Result<Vec<RigidTransform>, ViewerError> {
        let source = self.shared.hit_source.borrow();
        let Some(source) = source.as_ref() else {
            return Ok(Vec::new());
        };

        let mut poses = Vec::new();
        for result in self.frame.get_hit_test_results(source).iter() {
            let Ok(result) = result.dyn_into::<XrHitTestResult>() else {
                continue;
            };
            if let Some(pose) = result.get_pose(&self.shared.reference_space) {
                if let Some(transform) = transform_from_xr(&pose.transform()) {
                    poses.push(transform);
                }
            }
        }
        Ok(poses)
    }
}
