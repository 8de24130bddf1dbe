//! Async driver for the carousel state machine.
//!
//! Runs the machine in a background task: a `select!` loop over the
//! command channel, the visibility signal, the autoplay timer and a
//! cancellation token. The timer is re-armed or cancelled exactly as the
//! machine's [`TimerDirective`]s dictate, so a stale tick never fires
//! against a torn-down or empty carousel.

use crate::gesture::{DragTracker, SwipeDirection};
use crate::input::{map_key, Key};
use crate::state::{CarouselInput, CarouselState, TimerDirective};
use core_runtime::events::{CoreEvent, EventBus};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Driver settings.
#[derive(Debug, Clone, Copy)]
pub struct CarouselConfig {
    /// Fixed autoplay advancement interval.
    pub tick_interval: Duration,
    /// Horizontal travel a drag must exceed to count as a swipe.
    pub drag_threshold: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(5),
            drag_threshold: 50.0,
        }
    }
}

/// Point-in-time view of the machine for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselSnapshot {
    pub item_count: usize,
    pub current_index: usize,
    pub is_paused: bool,
    pub is_visible: bool,
}

enum Command<T> {
    Next,
    Prev,
    TogglePause,
    ReplaceItems(Vec<T>),
    Key(Key),
    PointerDown(f64),
    PointerUp(f64),
}

/// Handle to a running carousel driver.
///
/// Commands are fire-and-forget; state is observed through
/// [`snapshot`](CarouselHandle::snapshot) or the event bus. Dropping the
/// handle tears the driver down.
pub struct CarouselHandle<T> {
    commands: mpsc::Sender<Command<T>>,
    snapshot: watch::Receiver<CarouselSnapshot>,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> CarouselHandle<T> {
    /// Spawns the driver task.
    ///
    /// `visibility` is the tracker's signal; the machine starts not
    /// visible and follows it from the first change on.
    pub fn spawn(
        config: CarouselConfig,
        visibility: watch::Receiver<bool>,
        event_bus: EventBus,
    ) -> Self {
        let (commands, command_rx) = mpsc::channel(32);
        let (snapshot_tx, snapshot_rx) = watch::channel(CarouselSnapshot {
            item_count: 0,
            current_index: 0,
            is_paused: false,
            is_visible: false,
        });
        let token = CancellationToken::new();

        let task = tokio::spawn(run_driver(
            config,
            command_rx,
            visibility,
            event_bus,
            snapshot_tx,
            token.clone(),
        ));

        Self {
            commands,
            snapshot: snapshot_rx,
            token,
            task,
        }
    }

    pub async fn next(&self) {
        let _ = self.commands.send(Command::Next).await;
    }

    pub async fn prev(&self) {
        let _ = self.commands.send(Command::Prev).await;
    }

    pub async fn toggle_pause(&self) {
        let _ = self.commands.send(Command::TogglePause).await;
    }

    /// Replaces the item list wholesale, as on a data refresh.
    pub async fn replace_items(&self, items: Vec<T>) {
        let _ = self.commands.send(Command::ReplaceItems(items)).await;
    }

    /// Forwards a key press. Returns whether the host must suppress the
    /// key's default behavior (true for Space, which would scroll).
    pub async fn press_key(&self, key: Key) -> bool {
        let suppress = map_key::<T>(key).suppress_default;
        let _ = self.commands.send(Command::Key(key)).await;
        suppress
    }

    pub async fn pointer_down(&self, x: f64) {
        let _ = self.commands.send(Command::PointerDown(x)).await;
    }

    pub async fn pointer_up(&self, x: f64) {
        let _ = self.commands.send(Command::PointerUp(x)).await;
    }

    /// Latest published state.
    pub fn snapshot(&self) -> CarouselSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Watch channel mirroring every state change.
    pub fn snapshot_stream(&self) -> watch::Receiver<CarouselSnapshot> {
        self.snapshot.clone()
    }

    /// Stops the driver; pending timers never fire afterwards.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Stops the driver and waits for the task to finish.
    pub async fn shutdown_and_wait(self) {
        self.token.cancel();
        let _ = self.task.await;
    }
}

struct Driver<T> {
    state: CarouselState<T>,
    drag: DragTracker,
    ticker: Option<Interval>,
    tick_interval: Duration,
    event_bus: EventBus,
    snapshot_tx: watch::Sender<CarouselSnapshot>,
}

impl<T: Clone> Driver<T> {
    fn apply(&mut self, input: CarouselInput<T>) {
        let transition = self.state.apply(input);

        match transition.timer {
            TimerDirective::Restart => {
                self.ticker = Some(interval_at(
                    Instant::now() + self.tick_interval,
                    self.tick_interval,
                ));
            }
            TimerDirective::Cancel => self.ticker = None,
            TimerDirective::Unchanged => {}
        }

        if let Some(event) = transition.event {
            self.event_bus.emit(CoreEvent::Carousel(event)).ok();
        }

        self.snapshot_tx.send_replace(CarouselSnapshot {
            item_count: self.state.items().len(),
            current_index: self.state.current_index(),
            is_paused: self.state.is_paused(),
            is_visible: self.state.is_visible(),
        });
    }

    fn handle_command(&mut self, command: Command<T>) {
        match command {
            Command::Next => self.apply(CarouselInput::Next),
            Command::Prev => self.apply(CarouselInput::Prev),
            Command::TogglePause => self.apply(CarouselInput::TogglePause),
            Command::ReplaceItems(items) => self.apply(CarouselInput::ReplaceItems(items)),
            Command::Key(key) => self.apply(map_key(key).input),
            Command::PointerDown(x) => self.drag.begin(x),
            Command::PointerUp(x) => match self.drag.end(x) {
                Some(SwipeDirection::Left) => self.apply(CarouselInput::Next),
                Some(SwipeDirection::Right) => self.apply(CarouselInput::Prev),
                None => {}
            },
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn run_driver<T: Clone + Send + Sync + 'static>(
    config: CarouselConfig,
    mut commands: mpsc::Receiver<Command<T>>,
    mut visibility: watch::Receiver<bool>,
    event_bus: EventBus,
    snapshot_tx: watch::Sender<CarouselSnapshot>,
    token: CancellationToken,
) {
    let mut driver = Driver {
        state: CarouselState::new(),
        drag: DragTracker::new(config.drag_threshold),
        ticker: None,
        tick_interval: config.tick_interval,
        event_bus,
        snapshot_tx,
    };
    let mut visibility_open = true;

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Carousel driver stopped");
                break;
            }

            result = visibility.changed(), if visibility_open => {
                match result {
                    Ok(()) => {
                        let visible = *visibility.borrow_and_update();
                        driver.apply(CarouselInput::VisibilityChanged(visible));
                    }
                    Err(_) => {
                        // Tracker gone; without measurements the region
                        // counts as not visible.
                        visibility_open = false;
                        driver.apply(CarouselInput::VisibilityChanged(false));
                    }
                }
            }

            command = commands.recv() => {
                match command {
                    Some(command) => driver.handle_command(command),
                    None => {
                        debug!("Carousel handle dropped; driver stopping");
                        break;
                    }
                }
            }

            _ = next_tick(&mut driver.ticker) => {
                driver.apply(CarouselInput::Tick);
            }
        }
    }

    // The timer dies with the driver; nothing can fire after this point.
    driver.ticker = None;
}
