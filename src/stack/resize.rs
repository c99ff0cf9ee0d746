//! Resize debouncing
//!
//! A burst of resize events collapses into a single re-layout once the
//! burst settles. The timer itself lives in the browser; this tracks the
//! handle of the one pending timer.

/// Trailing-edge debounce state for one listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounce {
    delay_ms: i32,
    pending: Option<i32>,
}

impl Debounce {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms: delay_ms.max(0),
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> i32 {
        self.delay_ms
    }

    /// Record a newly scheduled timer.
    ///
    /// Returns the handle of the timer it supersedes, which must be cleared.
    pub fn arm(&mut self, handle: i32) -> Option<i32> {
        self.pending.replace(handle)
    }

    /// Forget the pending timer, returning its handle for clearing
    pub fn cancel(&mut self) -> Option<i32> {
        self.pending.take()
    }

    /// Called when the pending timer fires. Returns false if nothing was
    /// pending, i.e. the timer had been cancelled.
    pub fn settle(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Whether a settled resize should re-layout.
///
/// Some browsers fire resize while the document is hidden and has no
/// height; laying out then would measure everything as zero.
pub fn should_relayout(root_scroll_height: i32) -> bool {
    root_scroll_height > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_keeps_only_last_timer() {
        let mut debounce = Debounce::new(500);
        assert_eq!(debounce.arm(1), None);
        assert_eq!(debounce.arm(2), Some(1));
        assert_eq!(debounce.arm(3), Some(2));

        assert!(debounce.is_pending());
        assert!(debounce.settle());
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_settle_runs_once() {
        let mut debounce = Debounce::new(500);
        debounce.arm(7);
        assert!(debounce.settle());
        assert!(!debounce.settle());
    }

    #[test]
    fn test_cancel() {
        let mut debounce = Debounce::new(500);
        assert_eq!(debounce.cancel(), None);
        debounce.arm(4);
        assert_eq!(debounce.cancel(), Some(4));
        assert!(!debounce.settle());
    }

    #[test]
    fn test_negative_delay_clamped() {
        assert_eq!(Debounce::new(-1).delay_ms(), 0);
    }

    #[test]
    fn test_hidden_document_skips_relayout() {
        assert!(!should_relayout(0));
        assert!(should_relayout(1));
    }
}
