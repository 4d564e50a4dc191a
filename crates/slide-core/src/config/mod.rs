//! Slider configuration
//!
//! Configuration is set once when a slider is built and only changes through
//! an explicit reconfiguration. It can be read from JSON or from
//! attribute-style key/value pairs (see [`attributes`]).

pub mod attributes;

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use attributes::parse_duration_attr;

/// Default pointer travel before a drag counts as a swipe
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Presentation contract used to move between windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderStyle {
    /// Continuous translation of a track holding every item
    #[default]
    Default,
    /// Cross-fade, one item at a time
    Fade,
    /// Active item centred with its neighbours on either side
    Carousel,
}

impl SliderStyle {
    /// Styles that always present exactly one item
    pub fn is_single_item(self) -> bool {
        matches!(self, SliderStyle::Fade | SliderStyle::Carousel)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(SliderStyle::Default),
            "fade" => Some(SliderStyle::Fade),
            "carousel" => Some(SliderStyle::Carousel),
            _ => None,
        }
    }
}

/// Which pagination indicators the presentation layer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationStyle {
    #[default]
    Numbers,
    Dots,
    Both,
    None,
}

impl PaginationStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "numbers" => Some(PaginationStyle::Numbers),
            "dots" => Some(PaginationStyle::Dots),
            "both" => Some(PaginationStyle::Both),
            "none" => Some(PaginationStyle::None),
            _ => None,
        }
    }

    pub fn shows_numbers(self) -> bool {
        matches!(self, PaginationStyle::Numbers | PaginationStyle::Both)
    }

    pub fn shows_dots(self) -> bool {
        matches!(self, PaginationStyle::Dots | PaginationStyle::Both)
    }
}

/// Configuration for a single slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Wrap from the last page to the first and back
    #[serde(rename = "loop")]
    pub loop_around: bool,

    /// Advance automatically every `playback_interval_ms`
    pub autoplay: bool,

    /// Autoplay period in milliseconds
    pub playback_interval_ms: u64,

    /// How long the movement lock is held after a transition
    pub transition_duration_ms: u64,

    /// Quiescence window applied to resize signals
    pub resize_debounce_ms: u64,

    /// Whether drag gestures navigate
    pub allow_gesture: bool,

    /// Minimum pointer travel for a swipe
    pub swipe_threshold: f64,

    pub style: SliderStyle,

    pub pagination_style: PaginationStyle,

    /// Separator between current and total page in the numeric label
    pub pagination_divider: String,

    /// Hide controls when everything fits on one page
    pub hide_single_pagination: bool,

    /// Whether previous/next controls are shown at all
    pub controls: bool,

    /// Prefix notification names with the widget id
    pub prepend_id: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            loop_around: false,
            autoplay: false,
            playback_interval_ms: 5000,
            transition_duration_ms: 250,
            resize_debounce_ms: 500,
            allow_gesture: true,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            style: SliderStyle::Default,
            pagination_style: PaginationStyle::Numbers,
            pagination_divider: "/".to_string(),
            hide_single_pagination: true,
            controls: true,
            prepend_id: true,
        }
    }
}

impl SliderConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SliderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Check that timings and thresholds are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playback_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "playback_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.transition_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "transition_duration_ms must be greater than zero".to_string(),
            ));
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "swipe_threshold must be a finite, non-negative distance (got {})",
                self.swipe_threshold
            )));
        }
        Ok(())
    }

    pub fn playback_interval(&self) -> Duration {
        Duration::from_millis(self.playback_interval_ms)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}
