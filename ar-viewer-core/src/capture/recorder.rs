use std::time::Duration;

use crate::models::state::RecordingMode;
use crate::traits::audio::AudioTapHandle;
use crate::traits::surface::StreamHandle;

/// Any in-progress recording is force-stopped at this ceiling.
pub const MAX_RECORD_TIME: Duration = Duration::from_secs(600);

/// Session-scoped platform resources held by one recording.
#[derive(Debug, Clone, Copy)]
pub struct RecorderResources {
    pub stream: StreamHandle,
    pub audio_tap: Option<AudioTapHandle>,
}

/// Timer outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    None,
    /// A whole-second boundary passed; value is total elapsed seconds.
    Second(u64),
    /// The hard ceiling was reached; the owner must stop the recording.
    CapReached,
}

/// What `begin_stop` set in motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAction {
    /// Nothing was in progress.
    None,
    /// The simulated timer stopped; there is no media to wait for.
    SimulatedStopped,
    /// The backend was asked to stop; the final data must not be read
    /// until `finish_stop` runs on the stop-completion signal.
    AwaitBackend,
}

/// Drained state of a finished real recording.
pub struct StoppedRecording {
    pub mime_type: &'static str,
    /// Binary fragments in arrival order.
    pub chunks: Vec<Vec<u8>>,
    pub resources: RecorderResources,
    /// Media is to be dropped, not delivered (session-end cleanup path).
    pub discard: bool,
}

enum Phase {
    Idle,
    Real {
        mime_type: &'static str,
        chunks: Vec<Vec<u8>>,
        resources: RecorderResources,
    },
    Simulated,
    Stopping {
        mime_type: &'static str,
        chunks: Vec<Vec<u8>>,
        resources: RecorderResources,
        discard: bool,
    },
}

/// Transient recording state machine.
///
/// Exists logically only between record-start and record-stop; on stop it
/// is drained into at most one recording result and returns to idle.
pub struct VideoRecorder {
    phase: Phase,
    elapsed: Duration,
    reported_secs: u64,
    max_duration: Duration,
}

impl VideoRecorder {
    pub fn new(max_duration: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            elapsed: Duration::ZERO,
            reported_secs: 0,
            max_duration,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// True while a real or simulated recording is running (not while
    /// awaiting stop completion).
    pub fn is_recording(&self) -> bool {
        matches!(self.phase, Phase::Real { .. } | Phase::Simulated)
    }

    pub fn is_stopping(&self) -> bool {
        matches!(self.phase, Phase::Stopping { .. })
    }

    pub fn mode(&self) -> Option<RecordingMode> {
        match self.phase {
            Phase::Real { .. } => Some(RecordingMode::Real),
            Phase::Simulated => Some(RecordingMode::Simulated),
            _ => None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn start_real(&mut self, mime_type: &'static str, resources: RecorderResources) {
        debug_assert!(self.is_idle());
        self.reset_timer();
        self.phase = Phase::Real {
            mime_type,
            chunks: Vec::new(),
            resources,
        };
    }

    pub fn start_simulated(&mut self) {
        debug_assert!(self.is_idle());
        self.reset_timer();
        self.phase = Phase::Simulated;
    }

    /// Append a delivered media fragment. Accepted while recording and
    /// while stopping, since the platform flushes buffered data before the
    /// stop-completion signal fires.
    pub fn push_chunk(&mut self, data: Vec<u8>) {
        if data.is_empty() {
            return;
        }
        match &mut self.phase {
            Phase::Real { chunks, .. } | Phase::Stopping { chunks, .. } => chunks.push(data),
            _ => log::debug!("dropping media chunk delivered while not recording"),
        }
    }

    /// Advance the recording timer.
    pub fn tick(&mut self, delta: Duration) -> TimerEvent {
        if !self.is_recording() {
            return TimerEvent::None;
        }

        self.elapsed += delta;
        if self.elapsed >= self.max_duration {
            return TimerEvent::CapReached;
        }

        let whole = self.elapsed.as_secs();
        if whole > self.reported_secs {
            self.reported_secs = whole;
            TimerEvent::Second(whole)
        } else {
            TimerEvent::None
        }
    }

    /// Stop whatever is running. For a real recording the accumulated
    /// fragments are *not* drained here; they are handed out by
    /// `finish_stop` once the backend confirms.
    pub fn begin_stop(&mut self, discard: bool) -> StopAction {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => StopAction::None,
            Phase::Simulated => StopAction::SimulatedStopped,
            Phase::Real {
                mime_type,
                chunks,
                resources,
            } => {
                self.phase = Phase::Stopping {
                    mime_type,
                    chunks,
                    resources,
                    discard,
                };
                StopAction::AwaitBackend
            }
            Phase::Stopping {
                mime_type,
                chunks,
                resources,
                discard: already,
            } => {
                // Keep waiting; a later discard request wins.
                self.phase = Phase::Stopping {
                    mime_type,
                    chunks,
                    resources,
                    discard: already || discard,
                };
                StopAction::AwaitBackend
            }
        }
    }

    /// Consume the stop-completion signal, draining the recording.
    /// Returns `None` when no real recording was being stopped.
    pub fn finish_stop(&mut self) -> Option<StoppedRecording> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Stopping {
                mime_type,
                chunks,
                resources,
                discard,
            } => Some(StoppedRecording {
                mime_type,
                chunks,
                resources,
                discard,
            }),
            other => {
                self.phase = other;
                log::debug!("stop-completion signal with no recording being stopped");
                None
            }
        }
    }

    fn reset_timer(&mut self) {
        self.elapsed = Duration::ZERO;
        self.reported_secs = 0;
    }
}
