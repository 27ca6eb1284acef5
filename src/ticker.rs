//! Tick sources.
//!
//! The lifecycle controller never loops on its own. It asks a [`TickSource`]
//! for the next frame, gets a [`TickHandle`] back, and is called again when
//! the host fires that frame. Stopping means cancelling the one pending
//! handle, so a torn-down controller leaves nothing scheduled.
//!
//! [`ManualTicker`] is the deterministic implementation used for tests and
//! headless rendering: frames fire only when the caller says so.

use std::collections::VecDeque;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Schedules "advance one frame" callbacks.
pub trait TickSource {
    /// Ask for one more frame.
    fn request_tick(&mut self) -> TickHandle;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_tick(&mut self, handle: TickHandle);

    /// Requests that have neither fired nor been cancelled.
    fn pending(&self) -> usize;
}

/// Tick source that fires only when told to.
#[derive(Debug, Default)]
pub struct ManualTicker {
    next_id: u64,
    queue: VecDeque<TickHandle>,
    fired: u64,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the oldest pending request, if any.
    pub fn fire(&mut self) -> Option<TickHandle> {
        let handle = self.queue.pop_front()?;
        self.fired += 1;
        Some(handle)
    }

    /// Total requests fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

impl TickSource for ManualTicker {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.queue.push_back(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.queue.retain(|h| *h != handle);
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_fire_in_order() {
        let mut ticker = ManualTicker::new();
        let a = ticker.request_tick();
        let b = ticker.request_tick();
        assert_ne!(a, b);
        assert_eq!(ticker.pending(), 2);
        assert_eq!(ticker.fire(), Some(a));
        assert_eq!(ticker.fire(), Some(b));
        assert_eq!(ticker.fire(), None);
        assert_eq!(ticker.fired(), 2);
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut ticker = ManualTicker::new();
        let a = ticker.request_tick();
        ticker.cancel_tick(a);
        assert_eq!(ticker.pending(), 0);
        assert_eq!(ticker.fire(), None);
        // Cancelling twice is harmless.
        ticker.cancel_tick(a);
    }
}
