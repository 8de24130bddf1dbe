//! # Carousel Playback State Machine
//!
//! Owns the rotating gallery's state: the item list, the current index,
//! the paused flag and the visibility flag. Reacts to timer ticks,
//! keyboard events, pointer-drag gestures and explicit prev/next
//! commands, and keeps autoplay synchronized with on-screen visibility.
//!
//! ## State Machine
//!
//! ```text
//! items empty        → inert (no autoplay, no navigation)
//! items non-empty    → active, sub-state {is_paused, is_visible}
//!     autoplay runs ⟺ !is_paused && is_visible
//! ```
//!
//! Every transition returns the new state implicitly plus an explicit
//! [`TimerDirective`] telling the driver which timers to cancel or
//! (re)start — so any concurrency runtime can drive the machine
//! uniformly. The bundled [`controller`] drives it on tokio.
//!
//! The machine itself never fails: with an empty item list it renders
//! nothing and accepts no navigation; it has no error state of its own.

pub mod controller;
pub mod gesture;
pub mod input;
pub mod state;
pub mod visibility;

pub use controller::{CarouselConfig, CarouselHandle, CarouselSnapshot};
pub use gesture::{DragTracker, SwipeDirection};
pub use input::Key;
pub use state::{CarouselInput, CarouselState, TimerDirective};
pub use visibility::{Rect, VisibilityTracker};
