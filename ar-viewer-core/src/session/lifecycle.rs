use std::sync::Arc;

use crate::models::error::ViewerError;
use crate::models::state::SessionState;
use crate::support::Support;
use crate::traits::delegate::ViewerDelegate;
use crate::traits::runtime::{ArRuntime, ArSessionHandle, SessionFeatures};

/// Requests and releases the platform's immersive AR session and
/// broadcasts state transitions.
///
/// State machine: idle → requesting → active → ending → idle. The
/// controller is the only owner of `SessionState`; everything else reacts
/// to the delegate's status events.
pub struct SessionController {
    runtime: Box<dyn ArRuntime>,
    features: SessionFeatures,
    state: SessionState,
    session: Option<Box<dyn ArSessionHandle>>,
    delegate: Option<Arc<dyn ViewerDelegate>>,
}

impl SessionController {
    pub fn new(runtime: Box<dyn ArRuntime>, features: SessionFeatures) -> Self {
        Self {
            runtime,
            features,
            state: SessionState::Idle,
            session: None,
            delegate: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn ViewerDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn session_mut(&mut self) -> Option<&mut (dyn ArSessionHandle + 'static)> {
        self.session.as_deref_mut()
    }

    /// Request a session.
    ///
    /// Capability absence and a rejected configuration fail with distinct
    /// error kinds; both are also fanned out as `on_session_failed`.
    /// Re-entry while a request is in flight (or a session is active) is
    /// a guarded no-op; re-attempts after failure are user-driven.
    pub fn start(&mut self) -> Result<(), ViewerError> {
        if !self.state.is_idle() {
            log::debug!("session start ignored in state {:?}", self.state);
            return Ok(());
        }

        self.state = SessionState::Requesting;

        match self.runtime.check_support() {
            Support::Supported => {}
            Support::Unsupported => {
                self.state = SessionState::Idle;
                let err = ViewerError::ArUnavailable;
                self.notify_failed(&err);
                return Err(err);
            }
            Support::Unknown => {
                log::warn!("AR capability probe failed, treating as unavailable");
                self.state = SessionState::Idle;
                let err = ViewerError::ArUnavailable;
                self.notify_failed(&err);
                return Err(err);
            }
        }

        match self.runtime.request_session(&self.features) {
            Ok(session) => {
                self.session = Some(session);
                self.state = SessionState::Active;
                if let Some(ref delegate) = self.delegate {
                    delegate.on_session_started();
                }
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Idle;
                let err = match e {
                    ViewerError::SessionRejected(_) => e,
                    other => ViewerError::SessionRejected(other.to_string()),
                };
                self.notify_failed(&err);
                Err(err)
            }
        }
    }

    /// User-driven end. The platform confirms through
    /// `handle_session_end`.
    pub fn end(&mut self) {
        if !self.state.is_active() {
            return;
        }
        self.state = SessionState::Ending;
        if let Some(session) = self.session.as_mut() {
            session.end();
        }
    }

    /// Platform-driven session end.
    ///
    /// Synchronously drops the session handle and returns to idle so a
    /// subsequent `start()` begins from a clean slate. Idempotent; returns
    /// whether a session was actually being torn down, and the caller
    /// resets its own session-scoped state (hit-test source, placement,
    /// capture) within the same call.
    pub fn handle_session_end(&mut self) -> bool {
        if self.session.is_none() && self.state.is_idle() {
            return false;
        }

        self.session = None;
        self.state = SessionState::Idle;
        if let Some(ref delegate) = self.delegate {
            delegate.on_session_ended();
        }
        true
    }

    fn notify_failed(&self, err: &ViewerError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_session_failed(&err.to_string());
        }
    }
}
