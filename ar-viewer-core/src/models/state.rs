/// Placement state machine.
///
/// State transitions:
/// ```text
/// searching ↔ tracking → placed
///     └──────(grace-period auto-place)──→ placed
/// ```
/// `Placed` is terminal for the session: tracking updates no longer move
/// the object, so a later change in the surface estimate cannot make it
/// drift or jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    /// No valid surface found yet; reticle hidden.
    Searching,
    /// A tracking sample exists; reticle follows it, object not committed.
    Tracking,
    /// An anchor has been committed; tracking no longer applies.
    Placed,
}

impl PlacementState {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed)
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking)
    }
}

/// AR session lifecycle, owned exclusively by the session controller.
///
/// ```text
/// idle → requesting → active → ending → idle
///            └──(rejected)──→ idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Requesting,
    Active,
    Ending,
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// How a recording is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingMode {
    /// A platform recorder is producing actual media.
    Real,
    /// No encoding format is supported; only the timer/UI state runs so
    /// the capture button behaves consistently. Produces no media.
    Simulated,
}
