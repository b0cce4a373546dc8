use std::time::Duration;

use crate::models::scene::AnimationClip;

/// Pick the clip to play: the first clip the descriptor asks for if the
/// model actually has it, otherwise the model's first clip.
pub fn select_clip<'a>(
    available: &'a [AnimationClip],
    preferred: &[String],
) -> Option<&'a AnimationClip> {
    if available.is_empty() {
        return None;
    }

    if let Some(wanted) = preferred.first() {
        if let Some(clip) = available.iter().find(|c| &c.name == wanted) {
            return Some(clip);
        }
    }
    available.first()
}

/// Playback clock for the single active clip. Clips loop.
pub struct AnimationPlayer {
    active: Option<ActiveClip>,
}

struct ActiveClip {
    name: String,
    duration_secs: f64,
    time_secs: f64,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn play(&mut self, clip: &AnimationClip) {
        self.active = Some(ActiveClip {
            name: clip.name.clone(),
            duration_secs: clip.duration_secs,
            time_secs: 0.0,
        });
    }

    pub fn stop(&mut self) {
        self.active = None;
    }

    pub fn current_clip(&self) -> Option<&str> {
        self.active.as_ref().map(|c| c.name.as_str())
    }

    pub fn time_secs(&self) -> f64 {
        self.active.as_ref().map(|c| c.time_secs).unwrap_or(0.0)
    }

    /// Advance playback by the frame delta, wrapping at the clip length.
    pub fn advance(&mut self, delta: Duration) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.duration_secs <= 0.0 {
            return;
        }

        active.time_secs = (active.time_secs + delta.as_secs_f64()) % active.duration_secs;
    }
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}
