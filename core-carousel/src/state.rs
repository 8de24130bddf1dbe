//! Pure carousel state and transitions.
//!
//! Transitions mutate the state in place and return a [`Transition`]
//! describing what the driver must do: which autoplay-timer action to
//! take and which event (if any) to publish. No timers live here.

use core_runtime::events::CarouselEvent;

/// What the driver must do with the autoplay timer after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    /// Leave the timer as it is.
    Unchanged,
    /// (Re)start the timer from a full interval.
    Restart,
    /// Cancel the timer; no tick may fire until a later Restart.
    Cancel,
}

/// Result of applying one input.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub timer: TimerDirective,
    pub event: Option<CarouselEvent>,
}

impl Transition {
    fn none() -> Self {
        Self {
            timer: TimerDirective::Unchanged,
            event: None,
        }
    }
}

/// Inputs the state machine reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselInput<T> {
    /// Autoplay timer fired.
    Tick,
    /// Explicit next command (button or ArrowRight).
    Next,
    /// Explicit prev command (button or ArrowLeft).
    Prev,
    /// Pause/resume toggle (control or Space).
    TogglePause,
    /// The tracked region entered or left the viewport.
    VisibilityChanged(bool),
    /// Fresh data arrived; replaces the item list wholesale.
    ReplaceItems(Vec<T>),
}

/// Carousel state: item list, cursor and the two autoplay gates.
///
/// Invariant: `current_index` is a valid index whenever `items` is
/// non-empty. With no items the carousel is inert.
#[derive(Debug, Clone)]
pub struct CarouselState<T> {
    items: Vec<T>,
    current_index: usize,
    is_paused: bool,
    is_visible: bool,
}

impl<T> Default for CarouselState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CarouselState<T> {
    /// Creates an inert carousel: no items, unpaused, not yet visible.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current_index: 0,
            is_paused: false,
            is_visible: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_item(&self) -> Option<&T> {
        self.items.get(self.current_index)
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Whether the carousel has nothing to show and ignores navigation.
    pub fn is_inert(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the autoplay timer should currently be running.
    pub fn autoplay_active(&self) -> bool {
        !self.items.is_empty() && !self.is_paused && self.is_visible
    }

    fn timer_for_current_gates(&self) -> TimerDirective {
        if self.autoplay_active() {
            TimerDirective::Restart
        } else {
            TimerDirective::Cancel
        }
    }

    /// Applies one input and reports the timer action and event to emit.
    pub fn apply(&mut self, input: CarouselInput<T>) -> Transition {
        match input {
            CarouselInput::Tick => {
                // A tick can race a pause or visibility change that already
                // cancelled the timer; an inactive machine ignores it.
                if !self.autoplay_active() {
                    return Transition::none();
                }
                self.current_index = (self.current_index + 1) % self.items.len();
                Transition {
                    timer: TimerDirective::Unchanged,
                    event: Some(CarouselEvent::Advanced {
                        index: self.current_index,
                    }),
                }
            }

            CarouselInput::Next => self.step(1),
            CarouselInput::Prev => self.step(-1),

            CarouselInput::TogglePause => {
                if self.is_inert() {
                    return Transition::none();
                }
                self.is_paused = !self.is_paused;
                Transition {
                    timer: self.timer_for_current_gates(),
                    event: Some(if self.is_paused {
                        CarouselEvent::Paused
                    } else {
                        CarouselEvent::Resumed
                    }),
                }
            }

            CarouselInput::VisibilityChanged(visible) => {
                if visible == self.is_visible {
                    return Transition::none();
                }
                self.is_visible = visible;
                Transition {
                    timer: self.timer_for_current_gates(),
                    event: Some(CarouselEvent::VisibilityChanged { visible }),
                }
            }

            CarouselInput::ReplaceItems(items) => {
                self.items = items;
                if self.current_index >= self.items.len() {
                    self.current_index = 0;
                }
                Transition {
                    timer: self.timer_for_current_gates(),
                    event: Some(CarouselEvent::ItemsReplaced {
                        count: self.items.len(),
                    }),
                }
            }
        }
    }

    /// Manual navigation; does not alter `is_paused`.
    fn step(&mut self, direction: isize) -> Transition {
        if self.is_inert() {
            return Transition::none();
        }

        let len = self.items.len();
        self.current_index =
            (self.current_index as isize + direction).rem_euclid(len as isize) as usize;

        Transition {
            timer: TimerDirective::Unchanged,
            event: Some(CarouselEvent::Advanced {
                index: self.current_index,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_state(len: usize) -> CarouselState<u32> {
        let mut state = CarouselState::new();
        state.apply(CarouselInput::ReplaceItems((0..len as u32).collect()));
        state.apply(CarouselInput::VisibilityChanged(true));
        state
    }

    #[test]
    fn test_next_wraps_around() {
        let mut state = active_state(5);
        for _ in 0..4 {
            state.apply(CarouselInput::Next);
        }
        assert_eq!(state.current_index(), 4);

        let transition = state.apply(CarouselInput::Next);
        assert_eq!(state.current_index(), 0);
        assert_eq!(
            transition.event,
            Some(CarouselEvent::Advanced { index: 0 })
        );
    }

    #[test]
    fn test_prev_wraps_backwards() {
        let mut state = active_state(5);
        assert_eq!(state.current_index(), 0);

        state.apply(CarouselInput::Prev);
        assert_eq!(state.current_index(), 4);
    }

    #[test]
    fn test_tick_advances_only_while_active() {
        let mut state = active_state(3);

        state.apply(CarouselInput::Tick);
        assert_eq!(state.current_index(), 1);

        state.apply(CarouselInput::TogglePause);
        state.apply(CarouselInput::Tick);
        assert_eq!(state.current_index(), 1);

        state.apply(CarouselInput::TogglePause);
        state.apply(CarouselInput::Tick);
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn test_tick_ignored_while_not_visible() {
        let mut state: CarouselState<u32> = CarouselState::new();
        state.apply(CarouselInput::ReplaceItems(vec![1, 2, 3]));
        assert!(!state.is_visible());

        state.apply(CarouselInput::Tick);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_manual_navigation_does_not_alter_pause() {
        let mut state = active_state(3);
        state.apply(CarouselInput::TogglePause);
        assert!(state.is_paused());

        state.apply(CarouselInput::Next);
        assert!(state.is_paused());
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_pause_toggle_directives() {
        let mut state = active_state(3);

        let paused = state.apply(CarouselInput::TogglePause);
        assert_eq!(paused.timer, TimerDirective::Cancel);
        assert_eq!(paused.event, Some(CarouselEvent::Paused));

        let resumed = state.apply(CarouselInput::TogglePause);
        assert_eq!(resumed.timer, TimerDirective::Restart);
        assert_eq!(resumed.event, Some(CarouselEvent::Resumed));
    }

    #[test]
    fn test_visibility_change_rearms_or_cancels_timer() {
        let mut state: CarouselState<u32> = CarouselState::new();
        state.apply(CarouselInput::ReplaceItems(vec![1, 2]));

        let shown = state.apply(CarouselInput::VisibilityChanged(true));
        assert_eq!(shown.timer, TimerDirective::Restart);

        let hidden = state.apply(CarouselInput::VisibilityChanged(false));
        assert_eq!(hidden.timer, TimerDirective::Cancel);
        // Index and pause flag untouched.
        assert_eq!(state.current_index(), 0);
        assert!(!state.is_paused());
    }

    #[test]
    fn test_redundant_visibility_signal_is_a_noop() {
        let mut state = active_state(2);
        let transition = state.apply(CarouselInput::VisibilityChanged(true));
        assert_eq!(transition, Transition::none());
    }

    #[test]
    fn test_replace_with_shorter_list_resets_index() {
        let mut state = active_state(5);
        for _ in 0..4 {
            state.apply(CarouselInput::Next);
        }
        assert_eq!(state.current_index(), 4);

        state.apply(CarouselInput::ReplaceItems(vec![0, 1]));
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_replace_keeps_index_when_still_in_range() {
        let mut state = active_state(5);
        state.apply(CarouselInput::Next);
        assert_eq!(state.current_index(), 1);

        state.apply(CarouselInput::ReplaceItems(vec![7, 8, 9]));
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_replace_with_empty_cancels_timer() {
        let mut state = active_state(3);
        let transition = state.apply(CarouselInput::ReplaceItems(Vec::new()));

        assert!(state.is_inert());
        assert_eq!(transition.timer, TimerDirective::Cancel);
    }

    #[test]
    fn test_empty_carousel_accepts_no_navigation() {
        let mut state: CarouselState<u32> = CarouselState::new();

        assert_eq!(state.apply(CarouselInput::Next), Transition::none());
        assert_eq!(state.apply(CarouselInput::Prev), Transition::none());
        assert_eq!(state.apply(CarouselInput::TogglePause), Transition::none());
        assert_eq!(state.current_index(), 0);
    }
}
