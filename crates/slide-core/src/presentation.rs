//! State the presentation layer derives from a snapshot
//!
//! Nothing here is stored; it is recomputed from [`SliderState`] whenever the
//! host renders.

use serde::Serialize;

use crate::config::SliderStyle;
use crate::pagination::disablement;
use crate::state::{ItemId, SliderState};

/// Previous/next button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub previous_disabled: bool,
    pub next_disabled: bool,
    /// Controls are switched off, or everything fits on one page
    pub hidden: bool,
}

pub fn control_state(state: &SliderState) -> ControlState {
    let config = &state.config;

    if !state.is_ready {
        return ControlState {
            previous_disabled: true,
            next_disabled: true,
            hidden: !config.controls,
        };
    }

    let disabled = disablement(config.loop_around, state.current_page, state.total_page);
    ControlState {
        previous_disabled: disabled.previous,
        next_disabled: disabled.next,
        hidden: !config.controls || (config.hide_single_pagination && state.total_page == 1),
    }
}

/// Pagination indicators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    /// `"<page><divider><total>"`, when numbers are shown
    pub label: Option<String>,
    /// One entry per page, true for the current one, when dots are shown
    pub dots: Vec<bool>,
}

/// Pagination indicators, or `None` while there are no pages to show
pub fn pagination_view(state: &SliderState) -> Option<PaginationView> {
    if !state.is_ready || state.total_page == 0 {
        return None;
    }

    let style = state.config.pagination_style;
    let label = style.shows_numbers().then(|| {
        format!(
            "{}{}{}",
            state.current_page, state.config.pagination_divider, state.total_page
        )
    });
    let dots = if style.shows_dots() {
        (1..=state.total_page)
            .map(|page| page == state.current_page)
            .collect()
    } else {
        Vec::new()
    };

    Some(PaginationView { label, dots })
}

/// Position of an item relative to the active one in the carousel style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideRole {
    Active,
    Previous,
    Next,
    Inactive,
}

/// What the presentation layer has to do to show the current window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum RenderPlan {
    /// Translate the track by `offset` item widths
    Track { offset: i64 },
    /// Per-item visibility
    Fade { visible: Vec<bool> },
    /// Per-item role around the active item
    Carousel { roles: Vec<SlideRole> },
}

pub fn render_plan(state: &SliderState, items: &[ItemId]) -> Option<RenderPlan> {
    if !state.is_ready {
        return None;
    }

    let plan = match state.config.style {
        SliderStyle::Default => RenderPlan::Track {
            offset: state.offset,
        },
        SliderStyle::Fade => RenderPlan::Fade {
            visible: items
                .iter()
                .map(|item| state.current_window.contains(item))
                .collect(),
        },
        SliderStyle::Carousel => RenderPlan::Carousel {
            roles: carousel_roles(state, items),
        },
    };
    Some(plan)
}

fn carousel_roles(state: &SliderState, items: &[ItemId]) -> Vec<SlideRole> {
    let len = items.len();
    let active = state
        .current_window
        .first()
        .and_then(|first| items.iter().position(|item| item == first))
        .unwrap_or(0);
    let previous = (active + len - 1) % len;
    let next = (active + 1) % len;

    (0..len)
        .map(|index| {
            if index == active {
                SlideRole::Active
            } else if index == previous {
                SlideRole::Previous
            } else if index == next {
                SlideRole::Next
            } else {
                SlideRole::Inactive
            }
        })
        .collect()
}

/// Horizontal track translation in pixels for an offset in item widths
pub fn track_translate(offset: i64, item_width: f64, gap: f64) -> f64 {
    -(offset as f64) * (item_width + gap)
}
