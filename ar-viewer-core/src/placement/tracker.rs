use std::time::Duration;

use crate::models::pose::{RigidTransform, SceneAnchor, TrackingSample};
use crate::models::state::PlacementState;

/// Placement policy knobs.
#[derive(Debug, Clone, Copy)]
pub struct PlacementConfig {
    /// Grace period after session start before auto-placement kicks in
    /// when no surface has been found at all.
    pub auto_place_grace: Duration,
    /// How far ahead of the viewer the auto-placed object lands, metres.
    pub auto_place_distance: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            auto_place_grace: Duration::from_secs(4),
            auto_place_distance: 1.5,
        }
    }
}

/// Turns tracking samples and user taps into a committed anchor.
///
/// The reticle pose is `Some` exactly while the reticle should be shown.
/// Placement is terminal: once `Placed`, samples are ignored and the
/// anchor never changes until `reset`.
pub struct PlacementTracker {
    config: PlacementConfig,
    state: PlacementState,
    reticle_pose: Option<RigidTransform>,
    anchor: Option<SceneAnchor>,
    session_elapsed: Duration,
    saw_valid_sample: bool,
}

impl PlacementTracker {
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            state: PlacementState::Searching,
            reticle_pose: None,
            anchor: None,
            session_elapsed: Duration::ZERO,
            saw_valid_sample: false,
        }
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn reticle_pose(&self) -> Option<&RigidTransform> {
        self.reticle_pose.as_ref()
    }

    pub fn anchor(&self) -> Option<&SceneAnchor> {
        self.anchor.as_ref()
    }

    /// Feed this frame's tracking sample.
    ///
    /// Ignored once placed: the committed anchor must not drift if the
    /// surface estimate later changes.
    pub fn on_frame_sample(&mut self, sample: &TrackingSample) {
        if self.state.is_placed() {
            return;
        }

        match sample.pose() {
            Some(pose) => {
                self.saw_valid_sample = true;
                self.state = PlacementState::Tracking;
                self.reticle_pose = Some(*pose);
            }
            None => {
                self.state = PlacementState::Searching;
                self.reticle_pose = None;
            }
        }
    }

    /// User tap. Commits the reticle pose as the anchor when tracking;
    /// a tap while searching never places at an undefined location.
    pub fn on_select(&mut self) -> Option<SceneAnchor> {
        if self.state.is_placed() {
            return None;
        }

        let pose = match (self.state, self.reticle_pose) {
            (PlacementState::Tracking, Some(pose)) => pose,
            _ => return None,
        };

        let anchor = SceneAnchor::committed(pose);
        self.commit(anchor);
        Some(anchor)
    }

    /// Advance the session clock; fires the auto-placement fallback when
    /// the grace period expires without any surface ever being found.
    ///
    /// Uses the live viewer pose, not a stale sample. Once any valid
    /// sample has been seen the fallback is disarmed for good; the user
    /// can commit by tap from there.
    pub fn tick(
        &mut self,
        delta: Duration,
        viewer_pose: Option<&RigidTransform>,
    ) -> Option<SceneAnchor> {
        if self.state.is_placed() || self.saw_valid_sample {
            return None;
        }

        self.session_elapsed += delta;
        if self.session_elapsed < self.config.auto_place_grace {
            return None;
        }

        let viewer = viewer_pose?;
        let anchor =
            SceneAnchor::auto_placed(viewer.stepped_forward(self.config.auto_place_distance));
        self.commit(anchor);
        log::info!("no surface found within grace period, auto-placing in front of viewer");
        Some(anchor)
    }

    /// Back to the post-construction state; called on session end.
    pub fn reset(&mut self) {
        self.state = PlacementState::Searching;
        self.reticle_pose = None;
        self.anchor = None;
        self.session_elapsed = Duration::ZERO;
        self.saw_valid_sample = false;
    }

    fn commit(&mut self, anchor: SceneAnchor) {
        self.anchor = Some(anchor);
        self.state = PlacementState::Placed;
        self.reticle_pose = None;
    }
}

impl Default for PlacementTracker {
    fn default() -> Self {
        Self::new(PlacementConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn pose(x: f32, y: f32, z: f32) -> RigidTransform {
        RigidTransform::new(Vec3::new(x, y, z), Quat::IDENTITY)
    }

    #[test]
    fn select_while_searching_is_a_no_op() {
        let mut tracker = PlacementTracker::default();
        assert_eq!(tracker.state(), PlacementState::Searching);

        assert!(tracker.on_select().is_none());
        assert_eq!(tracker.state(), PlacementState::Searching);
        assert!(tracker.anchor().is_none());
    }

    #[test]
    fn valid_sample_shows_reticle_and_tracks() {
        let mut tracker = PlacementTracker::default();
        tracker.on_frame_sample(&TrackingSample::tracked(pose(0.0, 1.0, -2.0)));

        assert_eq!(tracker.state(), PlacementState::Tracking);
        assert_eq!(tracker.reticle_pose(), Some(&pose(0.0, 1.0, -2.0)));
    }

    #[test]
    fn invalid_sample_hides_reticle_again() {
        let mut tracker = PlacementTracker::default();
        tracker.on_frame_sample(&TrackingSample::tracked(pose(0.0, 0.0, 0.0)));
        tracker.on_frame_sample(&TrackingSample::invalid());

        assert_eq!(tracker.state(), PlacementState::Searching);
        assert!(tracker.reticle_pose().is_none());
    }

    #[test]
    fn select_commits_current_reticle_pose() {
        let mut tracker = PlacementTracker::default();
        tracker.on_frame_sample(&TrackingSample::tracked(pose(1.0, 0.0, -1.0)));

        let anchor = tracker.on_select().expect("should commit");
        assert_eq!(anchor.transform, pose(1.0, 0.0, -1.0));
        assert!(!anchor.auto_placed);
        assert_eq!(tracker.state(), PlacementState::Placed);
        assert!(tracker.reticle_pose().is_none());
    }

    #[test]
    fn placement_is_sticky_under_later_samples() {
        let mut tracker = PlacementTracker::default();
        tracker.on_frame_sample(&TrackingSample::tracked(pose(1.0, 0.0, -1.0)));
        tracker.on_select().unwrap();

        for i in 0..20 {
            tracker.on_frame_sample(&TrackingSample::tracked(pose(i as f32, 5.0, 5.0)));
            tracker.on_frame_sample(&TrackingSample::invalid());
        }

        assert_eq!(tracker.state(), PlacementState::Placed);
        assert_eq!(tracker.anchor().unwrap().transform, pose(1.0, 0.0, -1.0));
        assert!(tracker.on_select().is_none());
    }

    #[test]
    fn auto_place_fires_after_grace_with_viewer_pose() {
        let mut tracker = PlacementTracker::default();
        let viewer = pose(0.0, 1.6, 0.0);

        assert!(tracker.tick(Duration::from_secs(3), Some(&viewer)).is_none());
        let anchor = tracker
            .tick(Duration::from_secs(2), Some(&viewer))
            .expect("grace expired");

        assert!(anchor.auto_placed);
        // 1.5 m along the identity forward (-Z).
        assert_eq!(anchor.transform.position, Vec3::new(0.0, 1.6, -1.5));
        assert_eq!(tracker.state(), PlacementState::Placed);
    }

    #[test]
    fn auto_place_waits_for_a_viewer_pose() {
        let mut tracker = PlacementTracker::default();
        assert!(tracker.tick(Duration::from_secs(10), None).is_none());
        assert_eq!(tracker.state(), PlacementState::Searching);

        // Pose shows up a frame later: fallback fires then.
        let viewer = pose(0.0, 0.0, 0.0);
        assert!(tracker.tick(Duration::ZERO, Some(&viewer)).is_some());
    }

    #[test]
    fn any_valid_sample_disarms_auto_place() {
        let mut tracker = PlacementTracker::default();
        tracker.on_frame_sample(&TrackingSample::tracked(pose(0.0, 0.0, -1.0)));
        tracker.on_frame_sample(&TrackingSample::invalid());

        let viewer = pose(0.0, 0.0, 0.0);
        assert!(tracker
            .tick(Duration::from_secs(60), Some(&viewer))
            .is_none());
        assert_eq!(tracker.state(), PlacementState::Searching);
    }

    #[test]
    fn reset_returns_to_post_construction_state() {
        let mut tracker = PlacementTracker::default();
        tracker.on_frame_sample(&TrackingSample::tracked(pose(1.0, 2.0, 3.0)));
        tracker.on_select().unwrap();
        tracker.reset();

        assert_eq!(tracker.state(), PlacementState::Searching);
        assert!(tracker.reticle_pose().is_none());
        assert!(tracker.anchor().is_none());

        // The grace timer restarts and the fallback is re-armed.
        let viewer = pose(0.0, 0.0, 0.0);
        assert!(tracker.tick(Duration::from_secs(1), Some(&viewer)).is_none());
        assert!(tracker.tick(Duration::from_secs(4), Some(&viewer)).is_some());
    }
}
