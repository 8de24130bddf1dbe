//! Integration tests driving the carousel controller end to end.

use core_carousel::visibility::{Rect, VisibilityTracker};
use core_carousel::{CarouselConfig, CarouselHandle, CarouselSnapshot, Key};
use core_runtime::events::{CarouselEvent, CoreEvent, EventBus};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::time::timeout;

fn fast_config() -> CarouselConfig {
    CarouselConfig {
        tick_interval: Duration::from_millis(40),
        drag_threshold: 50.0,
    }
}

async fn wait_for_event(
    rx: &mut broadcast::Receiver<CoreEvent>,
    predicate: impl Fn(&CarouselEvent) -> bool,
) -> CarouselEvent {
    loop {
        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event bus closed");
        if let CoreEvent::Carousel(carousel_event) = event {
            if predicate(&carousel_event) {
                return carousel_event;
            }
        }
    }
}

async fn wait_for_snapshot(
    rx: &mut watch::Receiver<CarouselSnapshot>,
    predicate: impl FnMut(&CarouselSnapshot) -> bool,
) -> CarouselSnapshot {
    timeout(Duration::from_secs(2), rx.wait_for(predicate))
        .await
        .expect("timed out waiting for snapshot")
        .expect("driver stopped")
        .clone()
}

#[tokio::test]
async fn autoplay_advances_while_visible_and_unpaused() {
    let bus = EventBus::new(64);
    let mut events = bus.subscribe();
    let (visibility_tx, visibility_rx) = watch::channel(false);

    let handle: CarouselHandle<u32> =
        CarouselHandle::spawn(fast_config(), visibility_rx, bus.clone());

    handle.replace_items(vec![10, 20, 30]).await;
    visibility_tx.send(true).unwrap();

    wait_for_event(&mut events, |e| {
        matches!(e, CarouselEvent::Advanced { index: 1 })
    })
    .await;
    wait_for_event(&mut events, |e| {
        matches!(e, CarouselEvent::Advanced { index: 2 })
    })
    .await;

    // Wrap-around on the next tick.
    wait_for_event(&mut events, |e| {
        matches!(e, CarouselEvent::Advanced { index: 0 })
    })
    .await;

    handle.shutdown_and_wait().await;
}

#[tokio::test]
async fn pausing_stops_ticks_until_resumed() {
    let bus = EventBus::new(64);
    let mut events = bus.subscribe();
    let (visibility_tx, visibility_rx) = watch::channel(false);

    let handle: CarouselHandle<u32> =
        CarouselHandle::spawn(fast_config(), visibility_rx, bus.clone());

    handle.replace_items(vec![1, 2, 3]).await;
    visibility_tx.send(true).unwrap();

    wait_for_event(&mut events, |e| matches!(e, CarouselEvent::Advanced { .. })).await;

    handle.toggle_pause().await;
    wait_for_event(&mut events, |e| matches!(e, CarouselEvent::Paused)).await;
    let paused_at = handle.snapshot().current_index;

    // Several intervals pass without a tick.
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(handle.snapshot().current_index, paused_at);
    assert!(handle.snapshot().is_paused);

    handle.toggle_pause().await;
    wait_for_event(&mut events, |e| matches!(e, CarouselEvent::Resumed)).await;
    wait_for_event(&mut events, |e| matches!(e, CarouselEvent::Advanced { .. })).await;

    handle.shutdown_and_wait().await;
}

#[tokio::test]
async fn hiding_the_region_stops_autoplay() {
    let bus = EventBus::new(64);
    let mut events = bus.subscribe();
    let (visibility_tx, visibility_rx) = watch::channel(false);

    let handle: CarouselHandle<u32> =
        CarouselHandle::spawn(fast_config(), visibility_rx, bus.clone());

    handle.replace_items(vec![1, 2]).await;
    visibility_tx.send(true).unwrap();
    wait_for_event(&mut events, |e| matches!(e, CarouselEvent::Advanced { .. })).await;

    visibility_tx.send(false).unwrap();
    wait_for_event(&mut events, |e| {
        matches!(e, CarouselEvent::VisibilityChanged { visible: false })
    })
    .await;

    let index_when_hidden = handle.snapshot().current_index;
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(handle.snapshot().current_index, index_when_hidden);
    // Hiding changed neither pause state nor index.
    assert!(!handle.snapshot().is_paused);

    handle.shutdown_and_wait().await;
}

#[tokio::test]
async fn manual_navigation_and_keys_work_while_paused() {
    let bus = EventBus::new(64);
    let (_visibility_tx, visibility_rx) = watch::channel(false);

    let handle: CarouselHandle<u32> =
        CarouselHandle::spawn(fast_config(), visibility_rx, bus.clone());
    let mut snapshots = handle.snapshot_stream();

    handle.replace_items(vec![1, 2, 3, 4, 5]).await;

    // next, next, next: 0 -> 1 -> 2 -> 3.
    handle.next().await;
    handle.next().await;
    handle.next().await;
    wait_for_snapshot(&mut snapshots, |snapshot| snapshot.current_index == 3).await;

    // ArrowLeft steps back without suppressing the default behavior.
    let suppress = handle.press_key(Key::ArrowLeft).await;
    assert!(!suppress);
    wait_for_snapshot(&mut snapshots, |snapshot| snapshot.current_index == 2).await;

    // Space pauses and must suppress the default scroll.
    assert!(handle.press_key(Key::Space).await);
    wait_for_snapshot(&mut snapshots, |snapshot| snapshot.is_paused).await;

    handle.shutdown_and_wait().await;
}

#[tokio::test]
async fn drag_gesture_navigates_only_past_threshold() {
    let bus = EventBus::new(64);
    let (_visibility_tx, visibility_rx) = watch::channel(false);

    let handle: CarouselHandle<u32> =
        CarouselHandle::spawn(fast_config(), visibility_rx, bus.clone());
    let mut snapshots = handle.snapshot_stream();

    handle.replace_items(vec![1, 2, 3]).await;
    wait_for_snapshot(&mut snapshots, |snapshot| snapshot.item_count == 3).await;

    // 30 units of travel: below the threshold, no transition.
    handle.pointer_down(100.0).await;
    handle.pointer_up(70.0).await;

    // 60 units leftward: exactly one Next.
    handle.pointer_down(200.0).await;
    handle.pointer_up(140.0).await;

    let snapshot = wait_for_snapshot(&mut snapshots, |snapshot| snapshot.current_index == 1).await;
    assert_eq!(snapshot.current_index, 1);

    handle.shutdown_and_wait().await;
}

#[tokio::test]
async fn empty_carousel_stays_inert() {
    let bus = EventBus::new(64);
    let (visibility_tx, visibility_rx) = watch::channel(false);

    let handle: CarouselHandle<u32> =
        CarouselHandle::spawn(fast_config(), visibility_rx, bus.clone());

    visibility_tx.send(true).unwrap();
    handle.next().await;
    handle.prev().await;
    handle.toggle_pause().await;

    tokio::time::sleep(Duration::from_millis(120)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.item_count, 0);
    assert_eq!(snapshot.current_index, 0);
    assert!(!snapshot.is_paused);

    handle.shutdown_and_wait().await;
}

#[tokio::test]
async fn shutdown_cancels_pending_timers() {
    let bus = EventBus::new(64);
    let mut events = bus.subscribe();
    let (visibility_tx, visibility_rx) = watch::channel(false);

    let handle: CarouselHandle<u32> =
        CarouselHandle::spawn(fast_config(), visibility_rx, bus.clone());

    handle.replace_items(vec![1, 2]).await;
    visibility_tx.send(true).unwrap();
    wait_for_event(&mut events, |e| matches!(e, CarouselEvent::Advanced { .. })).await;

    handle.shutdown_and_wait().await;

    // No tick may fire against the destroyed carousel.
    tokio::time::sleep(Duration::from_millis(150)).await;
    loop {
        match events.try_recv() {
            Ok(CoreEvent::Carousel(CarouselEvent::Advanced { .. })) => {
                panic!("tick fired after teardown")
            }
            Ok(_) => continue,
            Err(broadcast::error::TryRecvError::Empty)
            | Err(broadcast::error::TryRecvError::Closed) => break,
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
        }
    }
}

#[tokio::test]
async fn data_refresh_resets_out_of_range_index() {
    let bus = EventBus::new(64);
    let (_visibility_tx, visibility_rx) = watch::channel(false);

    let handle: CarouselHandle<u32> =
        CarouselHandle::spawn(fast_config(), visibility_rx, bus.clone());
    let mut snapshots = handle.snapshot_stream();

    handle.replace_items(vec![1, 2, 3, 4, 5]).await;
    for _ in 0..4 {
        handle.next().await;
    }
    wait_for_snapshot(&mut snapshots, |snapshot| snapshot.current_index == 4).await;

    handle.replace_items(vec![9, 9]).await;
    let snapshot = wait_for_snapshot(&mut snapshots, |snapshot| snapshot.item_count == 2).await;
    assert_eq!(snapshot.current_index, 0);

    handle.shutdown_and_wait().await;
}

#[tokio::test]
async fn tracker_signal_gates_autoplay_at_threshold() {
    let bus = EventBus::new(64);
    let mut events = bus.subscribe();

    let tracker = VisibilityTracker::new(0.2);
    let handle: CarouselHandle<u32> =
        CarouselHandle::spawn(fast_config(), tracker.subscribe(), bus.clone());

    handle.replace_items(vec![1, 2, 3]).await;

    // 20% of the region inside the viewport: visible, autoplay starts.
    let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
    let region = Rect::new(0.0, 720.0, 100.0, 400.0);
    assert!(tracker.measure(&region, &viewport));

    wait_for_event(&mut events, |e| matches!(e, CarouselEvent::Advanced { .. })).await;

    handle.shutdown_and_wait().await;
}
