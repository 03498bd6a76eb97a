use std::{
    cell::{Cell, RefCell},
    time::{Duration, Instant},
};

/// Refresh interval used when the host has no native frame primitive (60 Hz).
pub const FALLBACK_FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Timestamp handed to a frame callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameTime {
    /// 0-based index of the refresh cycle that fired the callback.
    pub frame: u64,
    /// Virtual time since the clock started (`frame * interval`).
    pub elapsed: Duration,
}

/// One-shot callback run at the next refresh.
pub type FrameCallback = Box<dyn FnOnce(FrameTime)>;

/// Frame-scheduling primitive supplied by the host.
///
/// `request_frame` must invoke `callback` exactly once, asynchronously, before the next visual
/// update. It must never run the callback from inside `request_frame`.
pub trait FrameClock {
    /// Queue `callback` for the next refresh.
    fn request_frame(&self, callback: FrameCallback);
}

/// Frame clock stepped by hand. Used by tests and by hosts that own their refresh loop.
///
/// Each [`tick`](Self::tick) is one refresh cycle: it fires the callbacks queued before the
/// tick started. Callbacks queued while the tick runs wait for the next one.
pub struct ManualFrameClock {
    queue: RefCell<Vec<FrameCallback>>,
    frame: Cell<u64>,
    interval: Duration,
}

impl ManualFrameClock {
    /// Clock advancing virtual time by [`FALLBACK_FRAME_INTERVAL`] per tick.
    pub fn new() -> Self {
        Self::with_interval(FALLBACK_FRAME_INTERVAL)
    }

    /// Clock advancing virtual time by `interval` per tick.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            queue: RefCell::new(Vec::new()),
            frame: Cell::new(0),
            interval,
        }
    }

    /// Number of callbacks waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of ticks run so far.
    pub fn frames_elapsed(&self) -> u64 {
        self.frame.get()
    }

    /// Run one refresh cycle and return how many callbacks fired.
    pub fn tick(&self) -> usize {
        // The queue borrow must end before callbacks run: they may request new frames.
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let frame = self.frame.get();
        self.frame.set(frame.saturating_add(1));

        let time = FrameTime {
            frame,
            elapsed: self.interval.saturating_mul(u32::try_from(frame).unwrap_or(u32::MAX)),
        };
        let fired = batch.len();
        for callback in batch {
            callback(time);
        }
        fired
    }
}

impl Default for ManualFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ManualFrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualFrameClock")
            .field("pending", &self.pending())
            .field("frame", &self.frame.get())
            .field("interval", &self.interval)
            .finish()
    }
}

impl FrameClock for ManualFrameClock {
    fn request_frame(&self, callback: FrameCallback) {
        self.queue.borrow_mut().push(callback);
    }
}

/// Fixed-interval timer fallback for hosts without a native refresh signal.
#[derive(Debug)]
pub struct IntervalFrameClock {
    inner: ManualFrameClock,
    interval: Duration,
    next_deadline: Cell<Instant>,
}

impl IntervalFrameClock {
    /// Timer ticking every [`FALLBACK_FRAME_INTERVAL`].
    pub fn new() -> Self {
        Self::with_interval(FALLBACK_FRAME_INTERVAL)
    }

    /// Timer ticking every `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            inner: ManualFrameClock::with_interval(interval),
            interval,
            next_deadline: Cell::new(Instant::now() + interval),
        }
    }

    /// Number of callbacks waiting for the next deadline.
    pub fn pending(&self) -> usize {
        self.inner.pending()
    }

    /// Sleep until the next deadline, then fire queued callbacks.
    ///
    /// Returns immediately with `0` when nothing is queued.
    pub fn pump(&self) -> usize {
        if self.inner.pending() == 0 {
            return 0;
        }
        let now = Instant::now();
        let deadline = self.next_deadline.get();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        // Missed deadlines are skipped instead of replayed in a burst.
        let after = Instant::now();
        let mut next = deadline + self.interval;
        if self.interval.is_zero() {
            next = after;
        }
        while next <= after && !self.interval.is_zero() {
            next += self.interval;
        }
        self.next_deadline.set(next);
        self.inner.tick()
    }

    /// Pump until no callbacks remain or `max_frames` cycles ran; returns cycles run.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pump() > 0 {
            frames += 1;
        }
        frames
    }
}

impl Default for IntervalFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for IntervalFrameClock {
    fn request_frame(&self, callback: FrameCallback) {
        self.inner.request_frame(callback);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
