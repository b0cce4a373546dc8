use crate::models::capture_item::CaptureItem;
use crate::models::state::{PlacementState, RecordingMode};

/// Event delegate for viewer notifications.
///
/// Status events are level-triggered: only the latest state matters to
/// subscribers, and fan-out is synchronous: a notification is delivered
/// before dependent collaborators act on the same transition.
///
/// All methods default to no-ops so collaborators implement only what
/// they consume.
pub trait ViewerDelegate {
    /// The AR session became active.
    fn on_session_started(&self) {}

    /// The AR session ended (user- or platform-driven).
    fn on_session_ended(&self) {}

    /// The session could not be started.
    fn on_session_failed(&self, _reason: &str) {}

    /// Placement state machine transitioned.
    fn on_placement_changed(&self, _state: PlacementState) {}

    /// A recording (real or simulated) started.
    fn on_recording_started(&self, _mode: RecordingMode) {}

    /// Once-per-second elapsed update while recording, for the timer UI.
    fn on_recording_tick(&self, _elapsed_secs: u64) {}

    /// Recording finished or was discarded; the indicator should clear.
    fn on_recording_stopped(&self) {}

    /// A completed capture, handed off to the gallery collaborator. The
    /// item is owned by the receiver from here on.
    fn on_capture_item(&self, _item: CaptureItem) {}
}

/// Format a whole-second elapsed count as `MM:SS`, switching to
/// `HH:MM:SS` past an hour.
pub fn format_elapsed(seconds: u64) -> String {
    if seconds >= 3600 {
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    } else {
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formats_minutes_and_hours() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(60), "01:00");
        assert_eq!(format_elapsed(600), "10:00");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(3600), "01:00:00");
        assert_eq!(format_elapsed(3723), "01:02:03");
    }
}
