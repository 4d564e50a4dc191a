//! Pure navigation transitions
//!
//! `request_move` maps a state and a command to the next state plus the side
//! effects the engine must carry out, in order. Nothing here touches timers or
//! subscribers, so every rule can be checked without a host.

use std::time::Duration;

use super::{Command, Direction, Origin, Rejection};
use crate::events::{EventKind, EventPayload};
use crate::pagination::{
    clamp_page, is_at_boundary, is_wrapping, jump_direction, page_offset, step_page,
};
use crate::state::{ItemId, SliderState};
use crate::window::{compute_window, WindowRequest};

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Manual interaction preempts autoplay
    StopAutoplay,
    /// Publish a notification carrying the new state
    Notify { kind: EventKind, payload: EventPayload },
    /// Release the movement lock after this long
    ScheduleUnlock(Duration),
}

/// Next state and the effects to run after installing it
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SliderState,
    pub effects: Vec<Effect>,
}

/// Apply a navigation command.
///
/// Rejected commands leave nothing behind: no state change, no effect.
pub fn request_move(
    state: &SliderState,
    items: &[ItemId],
    command: Command,
) -> Result<Transition, Rejection> {
    ensure_ready(state)?;
    if state.is_transitioning {
        return Err(Rejection::Transitioning);
    }
    plan_move(state, items, command)
}

/// Resolve a swipe for the gesture that took the movement lock at its start.
///
/// Only the engine may call this, and only while it records that gesture as
/// the lock owner.
pub(crate) fn request_gesture_move(
    state: &SliderState,
    items: &[ItemId],
    direction: Direction,
) -> Result<Transition, Rejection> {
    ensure_ready(state)?;
    plan_move(state, items, Command::GestureResolved(direction))
}

fn ensure_ready(state: &SliderState) -> Result<(), Rejection> {
    if !state.is_ready || state.visible_count == 0 {
        return Err(Rejection::NotReady);
    }
    Ok(())
}

fn plan_move(
    state: &SliderState,
    items: &[ItemId],
    command: Command,
) -> Result<Transition, Rejection> {
    let visible_count = state.visible_count;
    let current = state.current_page;
    let total = state.total_page;
    let origin = command.origin();

    let (direction, page, offset, window) = match command {
        Command::Advance { direction, .. } | Command::GestureResolved(direction) => {
            let wrapping = is_wrapping(state.config.loop_around, direction, current, total);
            if !wrapping && is_at_boundary(direction, current, total) {
                return Err(Rejection::AtBoundary(direction));
            }

            let page = step_page(direction, current, total, wrapping);
            let step = i64::try_from(visible_count).unwrap_or(i64::MAX);
            let offset = match (wrapping, direction) {
                (true, _) => page_offset(page, visible_count),
                (false, Direction::Next) => state.offset.saturating_add(step),
                (false, Direction::Previous) => state.offset.saturating_sub(step),
            };
            let window = compute_window(
                items,
                &state.current_window,
                WindowRequest::Step {
                    direction,
                    wrapping,
                },
                visible_count,
            );
            (direction, page, offset, window)
        }
        Command::JumpTo {
            page, direction, ..
        } => {
            let target = clamp_page(page, total);
            let direction = direction.unwrap_or_else(|| jump_direction(current, target));
            let window = compute_window(
                items,
                &state.current_window,
                WindowRequest::JumpToPage(target),
                visible_count,
            );
            (direction, target, page_offset(target, visible_count), window)
        }
    };

    let mut effects = Vec::with_capacity(3);
    if state.config.autoplay && origin != Origin::Autoplay {
        effects.push(Effect::StopAutoplay);
    }
    effects.push(Effect::Notify {
        kind: EventKind::Change,
        payload: EventPayload::Change { direction, origin },
    });
    effects.push(Effect::ScheduleUnlock(state.config.transition_duration()));

    Ok(Transition {
        state: SliderState {
            current_window: window,
            current_page: page,
            offset,
            is_transitioning: true,
            ..state.clone()
        },
        effects,
    })
}

/// State with the movement lock set or cleared
pub fn with_lock(state: &SliderState, locked: bool) -> SliderState {
    SliderState {
        is_transitioning: locked,
        ..state.clone()
    }
}
