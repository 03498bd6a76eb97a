use super::*;

#[test]
fn first_signal_requests_rest_coalesce() {
    let mut sched = RenderScheduler::new();
    assert_eq!(sched.state(), SchedulerState::Idle);

    let requests = (0..100)
        .map(|i| {
            let reason = if i % 3 == 0 {
                Invalidation::Resize
            } else {
                Invalidation::Scroll
            };
            sched.invalidate(reason)
        })
        .filter(|&r| r)
        .count();

    assert_eq!(requests, 1);
    assert!(sched.is_dirty());
    let stats = sched.stats();
    assert_eq!(stats.signals, 100);
    assert_eq!(stats.frames_requested, 1);
    assert_eq!(stats.coalesced, 99);
}

#[test]
fn frame_cycle_returns_to_idle() {
    let mut sched = RenderScheduler::new();
    assert!(sched.invalidate(Invalidation::Explicit));
    assert!(sched.begin_frame());
    // Signals during the paint are still absorbed by the frame in flight.
    assert!(!sched.invalidate(Invalidation::Scroll));
    sched.finish_frame(FrameOutcome::Painted);
    assert_eq!(sched.state(), SchedulerState::Idle);
    assert!(!sched.is_dirty());

    assert!(sched.invalidate(Invalidation::Scroll));
    assert_eq!(sched.stats().frames_requested, 2);
    assert_eq!(sched.stats().paints, 1);
}

#[test]
fn stale_callback_while_idle_is_noop() {
    let mut sched = RenderScheduler::new();
    assert!(!sched.begin_frame());
    sched.finish_frame(FrameOutcome::Painted);
    assert_eq!(sched.stats(), SchedulerStats::default());
}

#[test]
fn skipped_frames_are_counted_separately() {
    let mut sched = RenderScheduler::new();
    sched.invalidate(Invalidation::Resize);
    assert!(sched.begin_frame());
    sched.finish_frame(FrameOutcome::Skipped);
    assert_eq!(sched.state(), SchedulerState::Idle);
    assert_eq!(sched.stats().skipped, 1);
    assert_eq!(sched.stats().paints, 0);
}
