use std::time::Duration;

use crate::models::pose::SceneAnchor;
use crate::placement::hit_test::HitTestAdapter;
use crate::placement::tracker::PlacementTracker;
use crate::render::animation::AnimationPlayer;
use crate::traits::runtime::{ArSessionHandle, FrameContext};
use crate::traits::surface::RenderSurface;

/// What one tick did, for the orchestrator to react to.
#[derive(Debug, Clone, Copy)]
pub struct TickOutcome {
    pub delta: Duration,
    /// Anchor committed by the auto-placement fallback this tick, if any.
    pub auto_placed: Option<SceneAnchor>,
}

/// Derives frame deltas from the platform's timestamp stream.
pub struct FrameClock {
    last_timestamp_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp_ms: None,
        }
    }

    /// Delta since the previous tick. The first tick, and any timestamp
    /// that runs backwards, yields zero.
    pub fn delta(&mut self, timestamp_ms: f64) -> Duration {
        let delta = match self.last_timestamp_ms {
            Some(last) if timestamp_ms > last => Duration::from_secs_f64((timestamp_ms - last) / 1000.0),
            _ => Duration::ZERO,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        delta
    }

    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// The single per-frame driver.
///
/// Runs identically with and without an AR session: a missing frame
/// context just skips the sampling step, and the draw call is issued
/// unconditionally so the scene renders before a session starts and keeps
/// rendering through placement search. Failures inside the sampling step
/// or the draw are logged and never terminate the loop.
pub struct FrameLoop {
    clock: FrameClock,
    animation: AnimationPlayer,
}

impl FrameLoop {
    pub fn new(animation: AnimationPlayer) -> Self {
        Self {
            clock: FrameClock::new(),
            animation,
        }
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationPlayer {
        &mut self.animation
    }

    /// One update-and-draw.
    ///
    /// Ordering per tick: delta → animation → hit-test sampling →
    /// placement update → draw. Sampling always happens before the draw,
    /// so a commit is visible no later than the next tick's draw call.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        timestamp_ms: f64,
        frame: Option<&dyn FrameContext>,
        session: Option<&mut (dyn ArSessionHandle + 'static)>,
        hit_test: &mut HitTestAdapter,
        placement: &mut PlacementTracker,
        surface: &mut dyn RenderSurface,
    ) -> TickOutcome {
        let delta = self.clock.delta(timestamp_ms);
        self.animation.advance(delta);

        let mut auto_placed = None;
        if let Some(frame) = frame {
            if let Some(session) = session {
                hit_test.ensure_source(session);
            }

            let sample = hit_test.sample(frame);
            placement.on_frame_sample(&sample);

            let viewer_pose = frame.viewer_pose();
            auto_placed = placement.tick(delta, viewer_pose.as_ref());
        }

        if let Err(e) = surface.render() {
            log::error!("draw call failed: {}", e);
        }

        TickOutcome { delta, auto_placed }
    }

    /// Forget the previous timestamp, e.g. when the frame source changes
    /// at session boundaries.
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }
}
