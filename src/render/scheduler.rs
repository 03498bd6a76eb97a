/// Whether a frame request is outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum SchedulerState {
    /// No frame pending.
    #[default]
    Idle,
    /// A frame was requested and has not been serviced yet.
    Pending,
}

/// Producer of a repaint request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Invalidation {
    /// Viewport scroll offset changed.
    Scroll,
    /// Host element or viewport was resized.
    Resize,
    /// Caller asked for a repaint.
    Explicit,
}

/// How a serviced frame ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FrameOutcome {
    /// The surface was repainted.
    Painted,
    /// Painting was skipped (malformed geometry, missing surface).
    Skipped,
}

/// Counters describing how much work the scheduler coalesced away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SchedulerStats {
    /// Invalidation signals received.
    pub signals: u64,
    /// Frame requests issued to the frame clock.
    pub frames_requested: u64,
    /// Signals absorbed by an already pending frame.
    pub coalesced: u64,
    /// Frames that ended in a paint.
    pub paints: u64,
    /// Frames that ended without painting.
    pub skipped: u64,
}

/// Two-state coalescer: at most one frame request is outstanding at any time.
///
/// The scheduler never talks to the frame clock itself; [`invalidate`](Self::invalidate)
/// tells the caller whether it must issue a request. The paint always reads the latest state
/// at fire time, not the state at request time.
#[derive(Clone, Debug, Default)]
pub struct RenderScheduler {
    state: SchedulerState,
    stats: SchedulerStats,
}

impl RenderScheduler {
    /// Idle scheduler with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Dirty flag: `true` while a paint is requested but not yet executed.
    pub fn is_dirty(&self) -> bool {
        self.state == SchedulerState::Pending
    }

    /// Counters so far.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Record a producer signal. Returns `true` when the caller must request a frame.
    pub fn invalidate(&mut self, reason: Invalidation) -> bool {
        self.stats.signals = self.stats.signals.saturating_add(1);
        match self.state {
            SchedulerState::Idle => {
                self.state = SchedulerState::Pending;
                self.stats.frames_requested = self.stats.frames_requested.saturating_add(1);
                tracing::trace!(?reason, "frame requested");
                true
            }
            SchedulerState::Pending => {
                self.stats.coalesced = self.stats.coalesced.saturating_add(1);
                false
            }
        }
    }

    /// Called from the frame callback. Returns `true` when a paint should run.
    ///
    /// A callback that fires while idle (a stale request) does nothing.
    pub fn begin_frame(&mut self) -> bool {
        self.state == SchedulerState::Pending
    }

    /// Close the frame started by [`begin_frame`](Self::begin_frame) and return to idle.
    pub fn finish_frame(&mut self, outcome: FrameOutcome) {
        if self.state == SchedulerState::Idle {
            return;
        }
        self.state = SchedulerState::Idle;
        match outcome {
            FrameOutcome::Painted => self.stats.paints = self.stats.paints.saturating_add(1),
            FrameOutcome::Skipped => self.stats.skipped = self.stats.skipped.saturating_add(1),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
