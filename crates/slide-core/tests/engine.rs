use std::time::Duration;

use slide_core::{
    Command, Direction, EventKind, EventPayload, EventRecorder, FixedMeasure, ItemId, ManualScheduler,
    Measure, Origin, Rejection, SharedMeasure, SliderConfig, SliderEngine, SliderError, SliderId,
    SliderStyle,
};

fn items(n: usize) -> Vec<ItemId> {
    (1..=n).map(|i| ItemId::new(format!("slide-{i}"))).collect()
}

fn engine_with(
    count: usize,
    config: SliderConfig,
    measure: impl Measure + 'static,
) -> (SliderEngine, EventRecorder) {
    let engine = SliderEngine::new(
        SliderId::new("hero"),
        items(count),
        config,
        Box::new(measure),
        ManualScheduler::new(),
    )
    .unwrap();
    let recorder = EventRecorder::new();
    engine.subscribe(recorder.subscriber());
    (engine, recorder)
}

fn mounted(count: usize, visible: f64, config: SliderConfig) -> (SliderEngine, EventRecorder) {
    let (mut engine, recorder) = engine_with(count, config, FixedMeasure(visible));
    engine.mount();
    (engine, recorder)
}

fn looping() -> SliderConfig {
    SliderConfig {
        loop_around: true,
        ..SliderConfig::default()
    }
}

const TRANSITION: Duration = Duration::from_millis(250);
const DEBOUNCE: Duration = Duration::from_millis(500);

#[test]
fn test_mount_publishes_ready_with_first_window() {
    let (engine, recorder) = mounted(10, 3.0, SliderConfig::default());

    assert_eq!(recorder.kinds(), vec![EventKind::Ready]);
    let state = engine.state();
    assert!(state.is_ready);
    assert_eq!(state.visible_count, 3);
    assert_eq!(state.total_page, 4);
    assert_eq!(state.current_page, 1);
    assert_eq!(engine.window(), &engine.items()[0..3]);
}

#[test]
fn test_lock_rejects_moves_until_transition_ends() {
    let (mut engine, recorder) = mounted(10, 3.0, SliderConfig::default());

    assert_eq!(engine.click(Direction::Next), Ok(()));
    assert_eq!(engine.click(Direction::Next), Err(Rejection::Transitioning));
    assert_eq!(engine.jump_to(4), Err(Rejection::Transitioning));
    assert_eq!(recorder.count(EventKind::Change), 1);
    assert_eq!(engine.state().current_page, 2);

    engine.advance_clock(TRANSITION - Duration::from_millis(1));
    assert!(engine.state().is_transitioning);

    engine.advance_clock(Duration::from_millis(1));
    assert!(!engine.state().is_transitioning);
    assert_eq!(engine.click(Direction::Next), Ok(()));
    assert_eq!(engine.state().current_page, 3);
}

#[test]
fn test_change_event_carries_new_state_and_metadata() {
    let (mut engine, recorder) = mounted(10, 3.0, SliderConfig::default());
    engine.click(Direction::Next).unwrap();

    let event = recorder.last().unwrap();
    assert_eq!(event.kind, EventKind::Change);
    assert_eq!(event.qualified_name(), "hero:change");
    assert_eq!(event.state.current_page, 2);
    assert_eq!(event.state.offset, 3);
    assert_eq!(
        event.payload,
        EventPayload::Change {
            direction: Direction::Next,
            origin: Origin::Controls,
        }
    );
}

#[test]
fn test_loop_wraps_from_last_page_to_first() {
    let (mut engine, recorder) = mounted(12, 3.0, looping());

    engine.jump_to(4).unwrap();
    engine.advance_clock(TRANSITION);
    engine.click(Direction::Next).unwrap();

    let state = engine.state();
    assert_eq!(state.current_page, 1);
    assert_eq!(state.offset, 0);
    assert_eq!(engine.window(), &engine.items()[0..3]);
    assert_eq!(
        recorder.last().unwrap().payload,
        EventPayload::Change {
            direction: Direction::Next,
            origin: Origin::Controls,
        }
    );
}

#[test]
fn test_loop_wraps_backward_to_last_page() {
    let (mut engine, _recorder) = mounted(10, 3.0, looping());

    engine.click(Direction::Previous).unwrap();

    let state = engine.state();
    assert_eq!(state.current_page, 4);
    assert_eq!(state.offset, 9);
    assert_eq!(engine.window(), &engine.items()[9..10]);
}

#[test]
fn test_boundary_without_loop_is_a_no_op() {
    let (mut engine, recorder) = mounted(6, 3.0, SliderConfig::default());

    assert_eq!(
        engine.click(Direction::Previous),
        Err(Rejection::AtBoundary(Direction::Previous))
    );

    engine.click(Direction::Next).unwrap();
    engine.advance_clock(TRANSITION);
    let before = engine.state().clone();
    let published = recorder.events().len();

    assert_eq!(
        engine.click(Direction::Next),
        Err(Rejection::AtBoundary(Direction::Next))
    );
    assert_eq!(engine.state(), &before);
    assert_eq!(recorder.events().len(), published);
    assert!(engine.controls().next_disabled);
}

#[test]
fn test_jump_clamps_out_of_range_pages() {
    let (mut engine, _recorder) = mounted(10, 2.0, SliderConfig::default());

    engine.jump_to(99).unwrap();

    let state = engine.state();
    assert_eq!(state.current_page, 5);
    assert_eq!(state.offset, 8);
    assert_eq!(engine.window(), &engine.items()[8..10]);

    engine.advance_clock(TRANSITION);
    engine.jump_to(0).unwrap();
    assert_eq!(engine.state().current_page, 1);
}

#[test]
fn test_short_swipe_only_publishes_swipe_events() {
    let (mut engine, recorder) = mounted(10, 3.0, SliderConfig::default());

    engine.gesture_start(300.0).unwrap();
    assert!(engine.state().is_transitioning);
    engine.gesture_move(251.0);
    engine.gesture_end();

    assert_eq!(
        recorder.kinds(),
        vec![EventKind::Ready, EventKind::SwipeStart, EventKind::SwipeEnd]
    );
    assert_eq!(engine.state().current_page, 1);
    assert!(engine.state().is_transitioning);

    engine.advance_clock(TRANSITION);
    assert!(!engine.state().is_transitioning);
}

#[test]
fn test_decisive_swipe_navigates_next() {
    let (mut engine, recorder) = mounted(10, 3.0, SliderConfig::default());

    engine.gesture_start(300.0).unwrap();
    engine.gesture_move(280.0);
    engine.gesture_move(249.0);
    engine.gesture_end();

    assert_eq!(
        recorder.kinds(),
        vec![
            EventKind::Ready,
            EventKind::SwipeStart,
            EventKind::Change,
            EventKind::SwipeEnd,
        ]
    );
    let change = &recorder.events()[2];
    assert_eq!(
        change.payload,
        EventPayload::Change {
            direction: Direction::Next,
            origin: Origin::Swipe,
        }
    );
    assert_eq!(engine.state().current_page, 2);
}

#[test]
fn test_swipe_towards_blocked_boundary_does_nothing() {
    let (mut engine, recorder) = mounted(10, 3.0, SliderConfig::default());

    engine.gesture_start(100.0).unwrap();
    engine.gesture_move(400.0);
    engine.gesture_end();

    assert_eq!(recorder.count(EventKind::Change), 0);
    assert_eq!(engine.state().current_page, 1);
}

#[test]
fn test_gestures_can_be_disabled() {
    let config = SliderConfig {
        allow_gesture: false,
        ..SliderConfig::default()
    };
    let (mut engine, recorder) = mounted(10, 3.0, config);

    assert_eq!(engine.gesture_start(0.0), Err(Rejection::GesturesDisabled));
    assert_eq!(recorder.count(EventKind::SwipeStart), 0);
}

#[test]
fn test_gesture_start_is_rejected_while_transitioning() {
    let (mut engine, _recorder) = mounted(10, 3.0, SliderConfig::default());

    engine.click(Direction::Next).unwrap();
    assert_eq!(engine.gesture_start(0.0), Err(Rejection::Transitioning));
}

#[test]
fn test_resize_with_new_count_restarts_pagination() {
    let measure = SharedMeasure::new(3.0);
    let (mut engine, recorder) = engine_with(10, SliderConfig::default(), measure.clone());
    engine.mount();
    engine.click(Direction::Next).unwrap();
    engine.advance_clock(TRANSITION);

    measure.set(2.0);
    engine.viewport_changed();
    engine.advance_clock(DEBOUNCE);

    let event = recorder.last().unwrap();
    assert_eq!(event.kind, EventKind::Resize);
    assert_eq!(
        event.payload,
        EventPayload::Resize {
            old_visible_count: 3,
            new_visible_count: 2,
            has_rerendered: true,
        }
    );
    let state = engine.state();
    assert_eq!(state.total_page, 5);
    assert_eq!(state.current_page, 1);
    assert_eq!(state.offset, 0);
    assert_eq!(engine.window(), &engine.items()[0..2]);
}

#[test]
fn test_resize_with_same_count_keeps_position() {
    let (mut engine, recorder) = mounted(10, 3.0, SliderConfig::default());
    engine.click(Direction::Next).unwrap();
    engine.advance_clock(TRANSITION);

    engine.viewport_changed();
    engine.advance_clock(DEBOUNCE);

    assert_eq!(
        recorder.last().unwrap().payload,
        EventPayload::Resize {
            old_visible_count: 3,
            new_visible_count: 3,
            has_rerendered: false,
        }
    );
    assert_eq!(engine.state().current_page, 2);
}

#[test]
fn test_resize_signals_are_coalesced() {
    let (mut engine, recorder) = mounted(10, 3.0, SliderConfig::default());

    engine.viewport_changed();
    engine.advance_clock(Duration::from_millis(300));
    engine.viewport_changed();
    engine.advance_clock(Duration::from_millis(300));
    engine.viewport_changed();
    engine.advance_clock(Duration::from_millis(499));
    assert_eq!(recorder.count(EventKind::Resize), 0);

    engine.advance_clock(Duration::from_millis(1));
    assert_eq!(recorder.count(EventKind::Resize), 1);
    assert_eq!(engine.scheduler().pending(), 0);
}

#[test]
fn test_autoplay_stops_itself_on_last_page() {
    let config = SliderConfig {
        autoplay: true,
        playback_interval_ms: 1000,
        ..SliderConfig::default()
    };
    let (mut engine, recorder) = mounted(9, 3.0, config);
    assert!(engine.is_autoplaying());

    engine.advance_clock(Duration::from_secs(10));

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
    assert!(recorder
        .events()
        .iter()
        .filter(|event| event.kind == EventKind::Change)
        .all(|event| event.payload
            == EventPayload::Change {
                direction: Direction::Next,
                origin: Origin::Autoplay,
            }));
    assert_eq!(engine.state().current_page, 3);
    assert!(!engine.is_autoplaying());
    assert_eq!(engine.scheduler().pending(), 0);
}

#[test]
fn test_autoplay_keeps_going_when_looping() {
    let config = SliderConfig {
        autoplay: true,
        loop_around: true,
        playback_interval_ms: 1000,
        ..SliderConfig::default()
    };
    let (mut engine, recorder) = mounted(9, 3.0, config);

    engine.advance_clock(Duration::from_millis(4100));

    assert_eq!(recorder.count(EventKind::Change), 4);
    assert_eq!(recorder.count(EventKind::AutoplayStop), 0);
    assert_eq!(engine.state().current_page, 2);
    assert!(engine.is_autoplaying());
}

#[test]
fn test_manual_navigation_stops_autoplay() {
    let config = SliderConfig {
        autoplay: true,
        ..SliderConfig::default()
    };
    let (mut engine, recorder) = mounted(9, 3.0, config);

    engine.click(Direction::Next).unwrap();

    assert_eq!(
        recorder.kinds(),
        vec![
            EventKind::Ready,
            EventKind::AutoplayStart,
            EventKind::AutoplayStop,
            EventKind::Change,
        ]
    );
    assert!(!engine.is_autoplaying());
}

#[test]
fn test_unmeasurable_slider_recovers_after_resize() {
    let measure = SharedMeasure::new(0.0);
    let (mut engine, recorder) = engine_with(10, SliderConfig::default(), measure.clone());
    engine.mount();

    assert!(!engine.state().is_ready);
    assert!(recorder.events().is_empty());
    assert_eq!(engine.click(Direction::Next), Err(Rejection::NotReady));
    assert_eq!(engine.gesture_start(0.0), Err(Rejection::NotReady));

    measure.set(4.0);
    engine.viewport_changed();
    engine.advance_clock(DEBOUNCE);

    assert_eq!(recorder.kinds(), vec![EventKind::Ready, EventKind::Resize]);
    let state = engine.state();
    assert!(state.is_ready);
    assert_eq!(state.visible_count, 4);
    assert_eq!(state.total_page, 3);
}

#[test]
fn test_invalid_measurement_suspends_navigation() {
    let measure = SharedMeasure::new(3.0);
    let (mut engine, recorder) = engine_with(10, SliderConfig::default(), measure.clone());
    engine.mount();

    measure.set(0.0);
    engine.viewport_changed();
    engine.advance_clock(DEBOUNCE);

    assert!(!engine.state().is_ready);
    assert_eq!(engine.click(Direction::Next), Err(Rejection::NotReady));
    assert_eq!(engine.jump_to(3), Err(Rejection::NotReady));
    assert_eq!(engine.gesture_start(400.0), Err(Rejection::NotReady));
    assert_eq!(recorder.kinds(), vec![EventKind::Ready]);

    measure.set(3.0);
    engine.viewport_changed();
    engine.advance_clock(DEBOUNCE);

    assert!(engine.state().is_ready);
    assert_eq!(engine.state().current_page, 1);
    assert_eq!(recorder.kinds(), vec![EventKind::Ready, EventKind::Resize]);
    assert_eq!(engine.click(Direction::Next), Ok(()));
    assert_eq!(engine.state().current_page, 2);
}

#[test]
fn test_dispatched_swipe_cannot_bypass_lock() {
    let (mut engine, recorder) = mounted(12, 3.0, SliderConfig::default());
    engine.click(Direction::Next).unwrap();

    for _ in 0..2 {
        assert_eq!(
            engine.dispatch(Command::GestureResolved(Direction::Next)),
            Err(Rejection::Transitioning)
        );
    }

    assert_eq!(recorder.count(EventKind::Change), 1);
    assert_eq!(engine.state().current_page, 2);
    assert!(engine.state().is_transitioning);

    engine.advance_clock(TRANSITION);
    assert_eq!(
        engine.dispatch(Command::GestureResolved(Direction::Next)),
        Ok(())
    );
    assert_eq!(engine.state().current_page, 3);
}

#[test]
fn test_single_item_styles_show_one_item() {
    let config = SliderConfig {
        style: SliderStyle::Fade,
        ..SliderConfig::default()
    };
    let (engine, _recorder) = mounted(5, 0.0, config);

    assert_eq!(engine.state().visible_count, 1);
    assert_eq!(engine.state().total_page, 5);
}

#[test]
fn test_reconfigure_remeasures_for_new_style() {
    let (mut engine, recorder) = mounted(6, 3.0, SliderConfig::default());

    let config = SliderConfig {
        style: SliderStyle::Carousel,
        ..SliderConfig::default()
    };
    engine.reconfigure(config).unwrap();

    assert_eq!(engine.state().visible_count, 1);
    assert_eq!(engine.state().total_page, 6);
    assert_eq!(
        recorder.last().unwrap().payload,
        EventPayload::Resize {
            old_visible_count: 3,
            new_visible_count: 1,
            has_rerendered: true,
        }
    );

    let invalid = SliderConfig {
        playback_interval_ms: 0,
        ..SliderConfig::default()
    };
    assert!(matches!(
        engine.reconfigure(invalid),
        Err(SliderError::Config(_))
    ));
}

#[test]
fn test_destroy_cancels_everything() {
    let config = SliderConfig {
        autoplay: true,
        ..SliderConfig::default()
    };
    let (mut engine, recorder) = mounted(9, 3.0, config);

    engine.gesture_start(0.0).unwrap();
    engine.viewport_changed();
    assert_eq!(engine.scheduler().pending(), 2);

    engine.destroy();

    assert_eq!(engine.scheduler().pending(), 0);
    assert!(engine.is_torn_down());
    assert!(!engine.is_autoplaying());
    assert_eq!(recorder.last().unwrap().kind, EventKind::Destroy);
    assert_eq!(recorder.count(EventKind::AutoplayStop), 0);
    assert_eq!(engine.notifier().subscriber_count(), 0);

    let published = recorder.events().len();
    assert_eq!(engine.click(Direction::Next), Err(Rejection::TornDown));
    engine.gesture_end();
    engine.viewport_changed();
    engine.advance_clock(Duration::from_secs(60));
    engine.destroy();
    assert_eq!(recorder.events().len(), published);
}

#[test]
fn test_construction_rejects_bad_item_lists() {
    let empty = SliderEngine::new(
        SliderId::new("empty"),
        Vec::new(),
        SliderConfig::default(),
        Box::new(FixedMeasure(1.0)),
        ManualScheduler::new(),
    );
    assert!(matches!(empty, Err(SliderError::NoItems)));

    let duplicate = SliderEngine::new(
        SliderId::new("dup"),
        vec![ItemId::from("a"), ItemId::from("b"), ItemId::from("a")],
        SliderConfig::default(),
        Box::new(FixedMeasure(1.0)),
        ManualScheduler::new(),
    );
    match duplicate {
        Err(SliderError::DuplicateItem(id)) => assert_eq!(id, ItemId::from("a")),
        other => panic!("expected duplicate item error, got {:?}", other.err()),
    }
}

#[test]
fn test_pagination_view_tracks_current_page() {
    let (mut engine, _recorder) = mounted(10, 3.0, SliderConfig::default());
    engine.jump_to(3).unwrap();

    let view = engine.pagination().unwrap();
    assert_eq!(view.label.as_deref(), Some("3/4"));
}
