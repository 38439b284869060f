//! Platform abstraction layer
//!
//! Frame loop control shared by the browser driver (requestAnimationFrame)
//! and the native headless driver.

use std::cell::Cell;
use std::rc::Rc;

/// Shared run flag for a self-rescheduling frame loop.
///
/// Clones observe the same flag. A stopped loop finishes its current frame
/// and does not reschedule.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    frames: Rc<Cell<u64>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        if !self.running.replace(true) {
            log::debug!("Frame loop started");
        }
    }

    pub fn stop(&self) {
        if self.running.replace(false) {
            log::debug!("Frame loop stopped after {} frames", self.frames.get());
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Record one completed frame. Returns whether to schedule the next one.
    pub fn frame_done(&self) -> bool {
        self.frames.set(self.frames.get() + 1);
        self.is_running()
    }

    /// Frames completed since creation
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_stopped() {
        let handle = LoopHandle::new();
        assert!(!handle.is_running());
        assert_eq!(handle.frames(), 0);
    }

    #[test]
    fn test_clones_share_flag() {
        let handle = LoopHandle::new();
        let driver = handle.clone();
        handle.start();
        assert!(driver.frame_done());
        assert!(driver.frame_done());
        handle.stop();
        assert!(!driver.frame_done());
        assert_eq!(handle.frames(), 3);
    }

    #[test]
    fn test_restart_after_stop() {
        let handle = LoopHandle::new();
        handle.start();
        handle.stop();
        handle.start();
        assert!(handle.is_running());
    }
}
