use crate::models::pose::TrackingSample;
use crate::traits::runtime::{ArSessionHandle, FrameContext, HitTestSource};

/// Wraps the platform session's hit-testing capability: at most one
/// `TrackingSample` per frame, one source subscription per session.
pub struct HitTestAdapter {
    source: Option<HitTestSource>,
    requested: bool,
}

impl HitTestAdapter {
    pub fn new() -> Self {
        Self {
            source: None,
            requested: false,
        }
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Request the hit-test source bound to the viewer ray.
    ///
    /// Called every frame; the `requested` flag makes repeat calls no-ops
    /// so the platform is never double-subscribed. A rejected request is
    /// logged and swallowed; placement then stays in SEARCHING.
    pub fn ensure_source(&mut self, session: &mut (dyn ArSessionHandle + 'static)) {
        if self.requested {
            return;
        }
        self.requested = true;

        match session.request_hit_test_source() {
            Ok(source) => self.source = Some(source),
            Err(e) => log::warn!("hit-test source request rejected: {}", e),
        }
    }

    /// Sample the frame's hit-test results. Zero results and sampling
    /// errors both yield an invalid sample; errors must not escape into
    /// the render loop.
    pub fn sample(&self, frame: &dyn FrameContext) -> TrackingSample {
        let Some(source) = self.source else {
            return TrackingSample::invalid();
        };

        match frame.hit_test(source) {
            Ok(poses) => match poses.first() {
                Some(pose) => TrackingSample::tracked(*pose),
                None => TrackingSample::invalid(),
            },
            Err(e) => {
                log::warn!("hit-test sampling failed: {}", e);
                TrackingSample::invalid()
            }
        }
    }

    /// Drop the source reference so the next session starts clean.
    /// Skipping this would double-subscribe or reuse a stale source.
    pub fn reset(&mut self) {
        self.source = None;
        self.requested = false;
    }
}

impl Default for HitTestAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::ViewerError;
    use crate::models::pose::RigidTransform;
    use glam::Vec3;

    struct FakeSession {
        requests: usize,
        reject: bool,
    }

    impl ArSessionHandle for FakeSession {
        fn request_hit_test_source(&mut self) -> Result<HitTestSource, ViewerError> {
            self.requests += 1;
            if self.reject {
                Err(ViewerError::HitTestRejected("denied".into()))
            } else {
                Ok(HitTestSource(7))
            }
        }

        fn end(&mut self) {}
    }

    struct FakeFrame {
        hits: Vec<RigidTransform>,
        fail: bool,
    }

    impl FrameContext for FakeFrame {
        fn viewer_pose(&self) -> Option<RigidTransform> {
            None
        }

        fn hit_test(&self, _source: HitTestSource) -> Result<Vec<RigidTransform>, ViewerError> {
            if self.fail {
                Err(ViewerError::HitTestRejected("lost".into()))
            } else {
                Ok(self.hits.clone())
            }
        }
    }

    #[test]
    fn source_is_requested_exactly_once() {
        let mut session = FakeSession {
            requests: 0,
            reject: false,
        };
        let mut adapter = HitTestAdapter::new();

        adapter.ensure_source(&mut session);
        adapter.ensure_source(&mut session);
        adapter.ensure_source(&mut session);

        assert_eq!(session.requests, 1);
        assert!(adapter.has_source());
    }

    #[test]
    fn rejected_request_leaves_sampling_invalid() {
        let mut session = FakeSession {
            requests: 0,
            reject: true,
        };
        let mut adapter = HitTestAdapter::new();
        adapter.ensure_source(&mut session);

        assert!(!adapter.has_source());
        let frame = FakeFrame {
            hits: vec![RigidTransform::IDENTITY],
            fail: false,
        };
        assert!(!adapter.sample(&frame).is_valid());
    }

    #[test]
    fn first_hit_wins() {
        let mut session = FakeSession {
            requests: 0,
            reject: false,
        };
        let mut adapter = HitTestAdapter::new();
        adapter.ensure_source(&mut session);

        let first = RigidTransform::new(Vec3::new(0.0, 1.0, 0.0), glam::Quat::IDENTITY);
        let frame = FakeFrame {
            hits: vec![first, RigidTransform::IDENTITY],
            fail: false,
        };
        let sample = adapter.sample(&frame);
        assert_eq!(sample.pose(), Some(&first));
    }

    #[test]
    fn sampling_error_is_contained() {
        let mut session = FakeSession {
            requests: 0,
            reject: false,
        };
        let mut adapter = HitTestAdapter::new();
        adapter.ensure_source(&mut session);

        let frame = FakeFrame {
            hits: vec![],
            fail: true,
        };
        assert!(!adapter.sample(&frame).is_valid());
    }

    #[test]
    fn reset_allows_a_fresh_subscription() {
        let mut session = FakeSession {
            requests: 0,
            reject: false,
        };
        let mut adapter = HitTestAdapter::new();
        adapter.ensure_source(&mut session);
        adapter.reset();

        assert!(!adapter.has_source());
        adapter.ensure_source(&mut session);
        assert_eq!(session.requests, 2);
    }
}
