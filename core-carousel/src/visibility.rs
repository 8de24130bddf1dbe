//! Viewport visibility tracking.
//!
//! Reports whether the carousel's screen region is currently visible,
//! transitioning when at least the configured fraction of the region's
//! area is within the viewport. The signal is delivered through a
//! `tokio::sync::watch` channel as changes occur; the initial state is
//! "not visible" until the first measurement. Measurement never blocks
//! and never errors.

use tokio::sync::watch;
use tracing::trace;

/// Axis-aligned rectangle in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn intersection_area(&self, other: &Rect) -> f64 {
        let left = self.x.max(other.x);
        let right = (self.x + self.width).min(other.x + other.width);
        let top = self.y.max(other.y);
        let bottom = (self.y + self.height).min(other.y + other.height);

        (right - left).max(0.0) * (bottom - top).max(0.0)
    }
}

/// Fraction of `region`'s area that lies within `viewport`, in [0, 1].
///
/// A degenerate region (zero area) counts as fully outside.
pub fn visible_fraction(region: &Rect, viewport: &Rect) -> f64 {
    let area = region.area();
    if area == 0.0 {
        return 0.0;
    }
    region.intersection_area(viewport) / area
}

/// Publishes a boolean visibility signal for one screen region.
pub struct VisibilityTracker {
    threshold: f64,
    sender: watch::Sender<bool>,
}

impl VisibilityTracker {
    /// `threshold` is the minimum visible fraction that counts as
    /// "visible"; the region counts as visible when the fraction reaches
    /// the threshold.
    pub fn new(threshold: f64) -> Self {
        let (sender, _) = watch::channel(false);
        Self { threshold, sender }
    }

    /// Subscribes to visibility transitions. The receiver observes the
    /// current value immediately and every change afterwards.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }

    /// Feeds one measurement and returns the resulting visibility.
    ///
    /// Subscribers are only woken when the boolean actually flips.
    pub fn measure(&self, region: &Rect, viewport: &Rect) -> bool {
        let fraction = visible_fraction(region, viewport);
        let visible = fraction >= self.threshold;

        self.sender.send_if_modified(|current| {
            if *current != visible {
                trace!(fraction, visible, "Visibility transition");
                *current = visible;
                true
            } else {
                false
            }
        });

        visible
    }

    /// Latest published visibility.
    pub fn is_visible(&self) -> bool {
        *self.sender.borrow()
    }
}
