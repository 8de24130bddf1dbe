//! Pointer-drag gesture recognition.
//!
//! A drag released with horizontal travel exceeding the configured
//! threshold is a swipe; travel at or below the threshold is a no-op. A
//! recognized swipe consumes the pointer release, so the caller must not
//! also deliver it as a click.

/// Direction the pointer travelled between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Dragged left — advance to the next item.
    Left,
    /// Dragged right — go back to the previous item.
    Right,
}

/// Tracks one pointer drag at a time.
#[derive(Debug, Clone)]
pub struct DragTracker {
    threshold: f64,
    origin: Option<f64>,
}

impl DragTracker {
    /// `threshold` is the horizontal travel, in layout units, a release
    /// must exceed to count as a swipe.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            origin: None,
        }
    }

    /// Pointer pressed at horizontal position `x`. A second press replaces
    /// any drag still in progress.
    pub fn begin(&mut self, x: f64) {
        self.origin = Some(x);
    }

    /// Pointer released at horizontal position `x`.
    ///
    /// Returns the recognized swipe, or `None` when no drag was in
    /// progress or the travel stayed within the threshold. Either way the
    /// tracker is ready for the next drag.
    pub fn end(&mut self, x: f64) -> Option<SwipeDirection> {
        let origin = self.origin.take()?;
        let travel = x - origin;

        if travel > self.threshold {
            Some(SwipeDirection::Right)
        } else if travel < -self.threshold {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }

    /// Abandons the drag in progress, if any.
    pub fn cancel(&mut self) {
        self.origin = None;
    }

    /// Whether a press without a matching release is being tracked.
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}
