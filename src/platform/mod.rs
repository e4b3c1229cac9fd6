//! Platform abstraction layer
//!
//! The game runs on two independent timers: a display-synchronised frame
//! callback and a fixed-rate spawn interval. `Scheduler` hides how those are
//! requested and cancelled:
//! - `WebScheduler` (wasm): `requestAnimationFrame` / `setInterval`
//! - `ManualScheduler`: records requests; the caller fires them (native, tests)

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebScheduler;

/// Handle to a requested display frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Handle to a running interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalHandle(pub i32);

/// Requests and cancels the two timers that drive a session
pub trait Scheduler {
    /// Ask for one callback on the next display frame
    fn request_frame(&mut self) -> FrameHandle;
    /// Drop a frame request before it fires
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Start a repeating timer with the given period
    fn start_interval(&mut self, period_ms: u32) -> IntervalHandle;
    /// Stop a repeating timer
    fn stop_interval(&mut self, handle: IntervalHandle);
}

/// Scheduler that only records what was asked of it
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending_frames: Vec<FrameHandle>,
    intervals: Vec<(IntervalHandle, u32)>,
    /// Every frame cancellation, in order
    pub cancelled_frames: Vec<FrameHandle>,
    /// Every interval stop, in order
    pub stopped_intervals: Vec<IntervalHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Frame requests that have been neither fired nor cancelled
    pub fn pending_frames(&self) -> &[FrameHandle] {
        &self.pending_frames
    }

    /// Fire the oldest pending frame request (consumes it)
    pub fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        if self.pending_frames.is_empty() {
            None
        } else {
            Some(self.pending_frames.remove(0))
        }
    }

    /// Running intervals with their periods
    pub fn active_intervals(&self) -> &[(IntervalHandle, u32)] {
        &self.intervals
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.allocate());
        self.pending_frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending_frames.retain(|h| *h != handle);
        self.cancelled_frames.push(handle);
    }

    fn start_interval(&mut self, period_ms: u32) -> IntervalHandle {
        let handle = IntervalHandle(self.allocate());
        self.intervals.push((handle, period_ms));
        handle
    }

    fn stop_interval(&mut self, handle: IntervalHandle) {
        self.intervals.retain(|(h, _)| *h != handle);
        self.stopped_intervals.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_frames_fire_in_order() {
        let mut sched = ManualScheduler::new();
        let a = sched.request_frame();
        let b = sched.request_frame();
        assert_eq!(sched.take_pending_frame(), Some(a));
        assert_eq!(sched.pending_frames(), &[b]);
        sched.cancel_frame(b);
        assert!(sched.pending_frames().is_empty());
        assert_eq!(sched.cancelled_frames, vec![b]);
        assert_eq!(sched.take_pending_frame(), None);
    }

    #[test]
    fn test_manual_intervals() {
        let mut sched = ManualScheduler::new();
        let h = sched.start_interval(1000);
        assert_eq!(sched.active_intervals(), &[(h, 1000)]);
        sched.stop_interval(h);
        assert!(sched.active_intervals().is_empty());
        assert_eq!(sched.stopped_intervals, vec![h]);
    }
}
