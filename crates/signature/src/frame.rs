//! Coalesced work for the next animation frame

use std::fmt::Debug;

use tracing::debug;

/// Handle of a scheduled frame task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// A single pending task that runs on the next animation frame
///
/// Scheduling while a task is already pending cancels the older one, so only
/// the most recent request survives until the frame fires.
#[derive(Debug)]
pub struct FrameSlot<T> {
    pending: Option<(FrameHandle, T)>,
    next_handle: u64,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self {
            pending: None,
            next_handle: 1,
        }
    }
}

impl<T: Debug> FrameSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task`, replacing any pending one
    pub fn schedule(&mut self, task: T) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;

        if let Some((old, superseded)) = self.pending.replace((handle, task)) {
            debug!(
                "FrameSlot: cancelled pending frame {:?} ({:?}) in favour of {:?}",
                old, superseded, handle
            );
        }
        handle
    }

    /// Take the pending task for execution
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|(_, task)| task)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_writer_wins() {
        let mut slot = FrameSlot::new();
        let first = slot.schedule(1);
        let second = slot.schedule(2);
        let third = slot.schedule(3);

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(slot.take(), Some(3));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_take_empties_slot() {
        let mut slot = FrameSlot::new();
        assert!(!slot.is_pending());
        slot.schedule("resize");
        assert!(slot.is_pending());
        assert_eq!(slot.take(), Some("resize"));
        assert!(!slot.is_pending());
    }
}
