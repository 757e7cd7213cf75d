//! Bounds-checked slide navigation.

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The current slide changed; presentation should scroll to the top.
    Moved { from: usize, to: usize },
    /// Request was at a boundary, out of range, or a jump to the current slide.
    Unchanged,
}

impl NavOutcome {
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Current-slide index over a fixed number of slides.
///
/// Invariant: `current < len` whenever `len > 0`; `current == 0` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    current: usize,
    len: usize,
}

impl Navigator {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.len == 0 || self.current == self.len - 1
    }

    /// Move to the next slide; no-op on the last one.
    pub fn advance(&mut self) -> NavOutcome {
        if self.is_last() {
            return NavOutcome::Unchanged;
        }
        self.move_to(self.current + 1)
    }

    /// Move to the previous slide; no-op on the first one.
    pub fn retreat(&mut self) -> NavOutcome {
        if self.is_first() {
            return NavOutcome::Unchanged;
        }
        self.move_to(self.current - 1)
    }

    /// Jump to `index`; out-of-range requests are ignored.
    pub fn jump_to(&mut self, index: usize) -> NavOutcome {
        if index >= self.len || index == self.current {
            return NavOutcome::Unchanged;
        }
        self.move_to(index)
    }

    /// `(current + 1) / len`, or `None` when there are no slides.
    #[must_use]
    pub fn progress_fraction(&self) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        // Slide counts are far below 2^52.
        #[allow(clippy::cast_precision_loss)]
        let fraction = (self.current + 1) as f64 / self.len as f64;
        Some(fraction)
    }

    fn move_to(&mut self, to: usize) -> NavOutcome {
        let from = self.current;
        self.current = to;
        tracing::debug!(from, to, "slide changed");
        NavOutcome::Moved { from, to }
    }
}
