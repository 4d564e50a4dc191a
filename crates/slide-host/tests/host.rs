use std::time::Duration;

use slide_core::{
    Direction, EventKind, EventPayload, EventRecorder, FixedMeasure, ItemId, Measure, Origin,
    SharedMeasure, SliderConfig, SliderId, SliderStyle,
};
use slide_host::{HostHandle, HostInput, SliderHost};
use tokio::task::JoinHandle;
use tokio::time::sleep;

fn items(n: usize) -> Vec<ItemId> {
    (1..=n).map(|i| ItemId::new(format!("card-{i}"))).collect()
}

fn spawn_host(
    count: usize,
    config: SliderConfig,
    measure: impl Measure + 'static,
) -> (HostHandle, EventRecorder, JoinHandle<slide_core::SliderState>) {
    let (host, handle) =
        SliderHost::new(SliderId::new("gallery"), items(count), config, Box::new(measure)).unwrap();
    let recorder = EventRecorder::new();
    host.subscribe(recorder.subscriber());
    let task = tokio::spawn(host.run());
    (handle, recorder, task)
}

/// Let the host loop drain what was sent without moving far in time
async fn settle() {
    sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn test_host_mounts_and_navigates() {
    let (handle, recorder, task) = spawn_host(10, SliderConfig::default(), FixedMeasure(3.0));
    settle().await;
    assert_eq!(recorder.kinds(), vec![EventKind::Ready]);

    handle.click(Direction::Next).await.unwrap();
    handle.click(Direction::Next).await.unwrap();
    settle().await;

    assert_eq!(recorder.count(EventKind::Change), 1);
    assert_eq!(recorder.last().unwrap().state.current_page, 2);

    sleep(Duration::from_millis(300)).await;
    handle.jump_to(4).await.unwrap();
    settle().await;

    let last = recorder.last().unwrap();
    assert_eq!(last.state.current_page, 4);
    assert_eq!(
        last.payload,
        EventPayload::Change {
            direction: Direction::Next,
            origin: Origin::PaginationDots,
        }
    );

    handle.destroy().await.unwrap();
    let state = task.await.unwrap();
    assert!(!state.is_ready);
    assert_eq!(recorder.last().unwrap().kind, EventKind::Destroy);
}

#[tokio::test(start_paused = true)]
async fn test_host_autoplay_runs_to_the_last_page() {
    let config = SliderConfig {
        autoplay: true,
        playback_interval_ms: 1000,
        ..SliderConfig::default()
    };
    let (handle, recorder, task) = spawn_host(9, config, FixedMeasure(3.0));

    sleep(Duration::from_millis(3500)).await;

    assert_eq!(
        recorder.kinds(),
        vec![
            EventKind::Ready,
            EventKind::AutoplayStart,
            EventKind::Change,
            EventKind::Change,
            EventKind::AutoplayStop,
        ]
    );

    drop(handle);
    let state = task.await.unwrap();
    assert_eq!(state.current_page, 3);
}

#[tokio::test(start_paused = true)]
async fn test_host_debounces_resize_signals() {
    let measure = SharedMeasure::new(3.0);
    let (handle, recorder, task) = spawn_host(10, SliderConfig::default(), measure.clone());
    settle().await;

    measure.set(2.0);
    for _ in 0..3 {
        handle.resize().await.unwrap();
        sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(recorder.count(EventKind::Resize), 0);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(recorder.count(EventKind::Resize), 1);
    let event = recorder.last().unwrap();
    assert_eq!(event.state.total_page, 5);
    assert_eq!(
        event.payload,
        EventPayload::Resize {
            old_visible_count: 3,
            new_visible_count: 2,
            has_rerendered: true,
        }
    );

    handle.destroy().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_host_swipe_moves_to_next_page() {
    let (handle, recorder, task) = spawn_host(10, SliderConfig::default(), FixedMeasure(3.0));
    handle.gesture_start(400.0).await.unwrap();
    handle.gesture_move(320.0).await.unwrap();
    handle.gesture_end().await.unwrap();
    settle().await;

    assert_eq!(
        recorder.kinds(),
        vec![
            EventKind::Ready,
            EventKind::SwipeStart,
            EventKind::Change,
            EventKind::SwipeEnd,
        ]
    );

    handle.destroy().await.unwrap();
    assert_eq!(task.await.unwrap().current_page, 2);
}

#[tokio::test(start_paused = true)]
async fn test_host_reconfigure_switches_style() {
    let (handle, recorder, task) = spawn_host(4, SliderConfig::default(), FixedMeasure(2.0));
    settle().await;

    handle
        .reconfigure(SliderConfig {
            style: SliderStyle::Fade,
            ..SliderConfig::default()
        })
        .await
        .unwrap();
    settle().await;

    let event = recorder.last().unwrap();
    assert_eq!(event.kind, EventKind::Resize);
    assert_eq!(event.state.visible_count, 1);
    assert_eq!(event.state.total_page, 4);

    handle.destroy().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_handle_reports_closed_host() {
    let (handle, _recorder, task) = spawn_host(3, SliderConfig::default(), FixedMeasure(1.0));
    handle.destroy().await.unwrap();
    task.await.unwrap();

    assert!(handle.is_closed());
    assert!(handle.click(Direction::Next).await.is_err());
}

#[test]
fn test_host_input_json_shape() {
    let input: HostInput =
        serde_json::from_str(r#"{"type":"click","direction":"previous"}"#).unwrap();
    assert_eq!(
        input,
        HostInput::Click {
            direction: Direction::Previous,
        }
    );

    let input: HostInput = serde_json::from_str(r#"{"type":"jump_to","page":3}"#).unwrap();
    assert_eq!(input, HostInput::JumpTo { page: 3 });

    let input: HostInput = serde_json::from_str(r#"{"type":"gesture_end"}"#).unwrap();
    assert_eq!(input, HostInput::GestureEnd);
}
