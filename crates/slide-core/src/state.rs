//! Slider state snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SliderConfig;

/// Identity of one item, supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identity of a slider instance, assigned by whoever creates it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliderId(pub String);

impl SliderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete navigation state of a slider.
///
/// Transitions never edit a snapshot in place; they build the next one, so a
/// snapshot handed to subscribers stays valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderState {
    /// False until a usable measurement exists, and again after teardown
    pub is_ready: bool,

    pub item_count: usize,

    /// Items shown at once; zero only while not ready
    pub visible_count: usize,

    /// Items currently shown, in order
    pub current_window: Vec<ItemId>,

    /// 1-indexed; zero only while not ready
    pub current_page: usize,

    pub total_page: usize,

    /// Item widths scrolled past the origin
    pub offset: i64,

    /// Movement lock
    pub is_transitioning: bool,

    pub config: SliderConfig,
}

impl SliderState {
    /// State of a slider that has not been measured yet
    pub fn unmeasured(item_count: usize, config: SliderConfig) -> Self {
        Self {
            is_ready: false,
            item_count,
            visible_count: 0,
            current_window: Vec::new(),
            current_page: 0,
            total_page: 0,
            offset: 0,
            is_transitioning: false,
            config,
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_page
    }
}
