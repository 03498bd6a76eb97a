use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

use crate::assets::decode::ImageResource;
use crate::assets::fetch::ImageFetcher;
use crate::foundation::error::{CrossfadeError, CrossfadeResult};

/// Default bound on how long a pair may take to load.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Both images of one widget.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePair {
    /// Shown at blend 0.
    pub start: ImageResource,
    /// Shown at blend 1.
    pub end: ImageResource,
}

/// Completion for a pair load. Called exactly once.
pub type PairCallback = Box<dyn FnOnce(CrossfadeResult<ImagePair>)>;

/// Progress of a pair load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum LoadStatus {
    /// At least one image is outstanding.
    Pending,
    /// Both images arrived and the completion ran with them.
    Ready,
    /// A fetch failed or the deadline passed; the completion ran with `LoadFailure`.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Start,
    End,
}

struct PairState {
    start: Option<ImageResource>,
    end: Option<ImageResource>,
    status: LoadStatus,
    deadline: Option<Instant>,
    on_complete: Option<PairCallback>,
}

impl PairState {
    /// Record one fetch result. Returns the completion to run, if this result settled the load.
    fn settle(
        &mut self,
        slot: Slot,
        result: CrossfadeResult<ImageResource>,
    ) -> Option<(PairCallback, CrossfadeResult<ImagePair>)> {
        if self.status != LoadStatus::Pending {
            return None;
        }
        match result {
            Ok(image) => {
                match slot {
                    Slot::Start => self.start = Some(image),
                    Slot::End => self.end = Some(image),
                }
                let (Some(start), Some(end)) = (&self.start, &self.end) else {
                    return None;
                };
                let pair = ImagePair {
                    start: start.clone(),
                    end: end.clone(),
                };
                self.status = LoadStatus::Ready;
                self.on_complete.take().map(|cb| (cb, Ok(pair)))
            }
            Err(err) => {
                self.status = LoadStatus::Failed;
                let err = match err {
                    CrossfadeError::LoadFailure(_) => err,
                    other => CrossfadeError::load_failure(format!("{slot:?} image: {other:#}")),
                };
                self.on_complete.take().map(|cb| (cb, Err(err)))
            }
        }
    }

    fn expire(&mut self, now: Instant) -> Option<(PairCallback, CrossfadeResult<ImagePair>)> {
        if self.status != LoadStatus::Pending {
            return None;
        }
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.status = LoadStatus::Failed;
        let missing = match (&self.start, &self.end) {
            (None, None) => "start and end images",
            (None, Some(_)) => "start image",
            _ => "end image",
        };
        self.on_complete.take().map(|cb| {
            (
                cb,
                Err(CrossfadeError::load_failure(format!(
                    "timed out waiting for {missing}"
                ))),
            )
        })
    }
}

/// Handle to an in-flight pair load.
#[derive(Clone)]
pub struct PairLoad {
    state: Rc<RefCell<PairState>>,
}

impl std::fmt::Debug for PairLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.state.borrow();
        f.debug_struct("PairLoad")
            .field("status", &s.status)
            .field("start_ready", &s.start.is_some())
            .field("end_ready", &s.end.is_some())
            .field("deadline", &s.deadline)
            .finish()
    }
}

impl PairLoad {
    /// Current progress.
    pub fn status(&self) -> LoadStatus {
        self.state.borrow().status
    }

    /// Fail the load with `LoadFailure` if its deadline passed. Returns `true` when it expired
    /// the load just now.
    pub fn expire_if_overdue(&self, now: Instant) -> bool {
        let settled = self.state.borrow_mut().expire(now);
        run(settled)
    }
}

fn run(settled: Option<(PairCallback, CrossfadeResult<ImagePair>)>) -> bool {
    match settled {
        Some((cb, result)) => {
            cb(result);
            true
        }
        None => false,
    }
}

fn deliver(state: &Rc<RefCell<PairState>>, slot: Slot, result: CrossfadeResult<ImageResource>) {
    // The borrow ends before the completion runs; it may inspect the load.
    let settled = state.borrow_mut().settle(slot, result);
    run(settled);
}

/// Fetch `start` and `end` and call `on_complete` once both are ready.
///
/// Fetches that complete synchronously count toward completion, so `on_complete` may run
/// before this function returns. The first failure completes the load with `LoadFailure`;
/// later results are ignored. With a `timeout`, [`PairLoad::expire_if_overdue`] bounds the
/// wait. Empty references fail with `MissingSource` without fetching anything.
pub fn load_pair(
    fetcher: &dyn ImageFetcher,
    start: &str,
    end: &str,
    timeout: Option<Duration>,
    on_complete: PairCallback,
) -> CrossfadeResult<PairLoad> {
    if start.trim().is_empty() {
        return Err(CrossfadeError::missing_source("a start image is required"));
    }
    if end.trim().is_empty() {
        return Err(CrossfadeError::missing_source("an end image is required"));
    }

    let state = Rc::new(RefCell::new(PairState {
        start: None,
        end: None,
        status: LoadStatus::Pending,
        deadline: timeout.map(|t| Instant::now() + t),
        on_complete: Some(on_complete),
    }));

    for (slot, source) in [(Slot::Start, start), (Slot::End, end)] {
        if state.borrow().status != LoadStatus::Pending {
            break;
        }
        let st = Rc::clone(&state);
        fetcher.fetch(source, Box::new(move |result| deliver(&st, slot, result)));
    }

    Ok(PairLoad { state })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
