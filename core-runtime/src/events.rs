//! # Event Bus System
//!
//! Provides an event-driven architecture for the Channel Showcase Core
//! using `tokio::sync::broadcast`. This module enables decoupled
//! communication between the data-loading side and the presentation layer
//! through typed events.
//!
//! ## Overview
//!
//! The event bus system consists of:
//! - **Event Types**: Strongly-typed enum hierarchies for the feed and
//!   carousel domains
//! - **EventBus**: Central broadcast channel for publishing events
//! - **EventStream**: Wrapper for consuming events with filtering
//! - **Subscription Management**: Multiple subscribers can listen
//!   independently
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, CarouselEvent};
//!
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! event_bus
//!     .emit(CoreEvent::Carousel(CarouselEvent::Advanced { index: 1 }))
//!     .ok();
//! ```
//!
//! ## Error Handling
//!
//! The event bus uses `tokio::sync::broadcast`, which can produce two
//! kinds of receive errors:
//!
//! - **`RecvError::Lagged(n)`**: Subscriber was too slow and missed `n`
//!   events. Non-fatal; the subscriber can continue receiving new events.
//! - **`RecvError::Closed`**: All senders have been dropped. This
//!   indicates shutdown.
//!
//! Subscribers should handle `Lagged` gracefully and treat `Closed` as a
//! signal to exit.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
///
/// This is the main event type published and received through the event
/// bus. It wraps domain-specific event types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Remote data feed events
    Feed(FeedEvent),
    /// Carousel state machine events
    Carousel(CarouselEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Feed(e) => e.description(),
            CoreEvent::Carousel(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Feed(FeedEvent::Failed { .. }) => EventSeverity::Error,
            CoreEvent::Feed(FeedEvent::VideosLoaded { .. })
            | CoreEvent::Feed(FeedEvent::StatsLoaded { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

/// Page section a feed event concerns.
///
/// A failed fetch degrades only its own section; the rest of the page
/// keeps rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedSection {
    /// The video gallery
    Videos,
    /// The channel statistics band
    Stats,
}

impl fmt::Display for FeedSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSection::Videos => write!(f, "videos"),
            FeedSection::Stats => write!(f, "stats"),
        }
    }
}

// ============================================================================
// Feed Events
// ============================================================================

/// Events related to remote data loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum FeedEvent {
    /// A section started loading.
    Loading {
        /// The section being loaded.
        section: FeedSection,
    },
    /// The video list finished loading.
    VideosLoaded {
        /// Number of videos received.
        count: usize,
    },
    /// Channel statistics finished loading.
    StatsLoaded {
        /// Subscriber count reported upstream.
        subscriber_count: u64,
        /// Aggregate view count reported upstream.
        view_count: u64,
        /// Published video count reported upstream.
        video_count: u64,
    },
    /// A section failed to load after retries were exhausted.
    Failed {
        /// The section that failed.
        section: FeedSection,
        /// Human-readable error message.
        message: String,
        /// Whether the rest of the page keeps functioning.
        degraded: bool,
    },
}

impl FeedEvent {
    fn description(&self) -> &str {
        match self {
            FeedEvent::Loading { .. } => "Section loading",
            FeedEvent::VideosLoaded { .. } => "Videos loaded",
            FeedEvent::StatsLoaded { .. } => "Channel statistics loaded",
            FeedEvent::Failed { .. } => "Section failed to load",
        }
    }
}

// ============================================================================
// Carousel Events
// ============================================================================

/// Events related to the carousel state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum CarouselEvent {
    /// The current index changed (tick, command, or gesture).
    Advanced {
        /// New current index.
        index: usize,
    },
    /// Autoplay was paused.
    Paused,
    /// Autoplay was resumed.
    Resumed,
    /// The item list was replaced wholesale.
    ItemsReplaced {
        /// Number of items after replacement.
        count: usize,
    },
    /// The carousel region entered or left the viewport.
    VisibilityChanged {
        /// Whether the region is now visible.
        visible: bool,
    },
}

impl CarouselEvent {
    fn description(&self) -> &str {
        match self {
            CarouselEvent::Advanced { .. } => "Carousel advanced",
            CarouselEvent::Paused => "Autoplay paused",
            CarouselEvent::Resumed => "Autoplay resumed",
            CarouselEvent::ItemsReplaced { .. } => "Carousel items replaced",
            CarouselEvent::VisibilityChanged { .. } => "Carousel visibility changed",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to events.
///
/// Uses `tokio::sync::broadcast` internally, which provides:
/// - Multiple producers (clone the `EventBus`)
/// - Multiple consumers (each `subscribe()` creates a new receiver)
/// - Non-blocking sends (events are cloned for each subscriber)
/// - Lagging detection (slow subscribers get `RecvError::Lagged`)
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events to buffer per subscriber.
    ///   When a subscriber falls behind by more than this amount, it will
    ///   receive a `RecvError::Lagged` error.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event.
    /// Returns an error if there are no active subscribers.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive events.
    ///
    /// Each call creates an independent receiver that will receive all
    /// future events. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

/// Type alias for event filter functions.
type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with filtering capabilities.
///
/// Provides a more ergonomic API for consuming events with optional
/// filtering by event type or severity.
///
/// # Example
///
/// ```rust
/// use core_runtime::events::{EventBus, EventStream, CoreEvent};
///
/// let event_bus = EventBus::new(100);
/// let carousel_stream = EventStream::new(event_bus.subscribe())
///     .filter(|event| matches!(event, CoreEvent::Carousel(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    /// Creates a new event stream from a receiver.
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Adds a filter function to this stream.
    ///
    /// Only events that match the filter will be returned by `recv()`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Receives the next event that passes the filter (if any).
    ///
    /// Events that don't match the filter are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n`
    /// events. Returns `RecvError::Closed` if all senders were dropped.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;

            let Some(filter) = &self.filter else {
                return Ok(event);
            };

            if filter(&event) {
                return Ok(event);
            }
        }
    }
}
