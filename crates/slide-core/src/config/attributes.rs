//! Attribute-style configuration
//!
//! Hosts that describe a slider with markup attributes (`loop`,
//! `slider-style="fade"`, `transition-duration="0.3s"`, ...) can hand the raw
//! key/value pairs to [`SliderConfig::from_attributes`].

use std::time::Duration;

use tracing::warn;

use super::{ConfigError, PaginationStyle, SliderConfig, SliderStyle};

impl SliderConfig {
    /// Build a configuration from attribute pairs.
    ///
    /// Boolean attributes are enabled by their presence unless their value is
    /// `"false"`. Unknown style names keep the default, unknown keys are ignored.
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = SliderConfig::default();

        for (key, value) in attributes {
            match key {
                "loop" => config.loop_around = flag(value),
                "autoplay" => config.autoplay = flag(value),
                "allow-swiping" => config.allow_gesture = flag(value),
                "controls" => config.controls = flag(value),
                "prepend-id" => config.prepend_id = flag(value),
                "hide-single-pagination" => config.hide_single_pagination = flag(value),
                "playback-rate" => {
                    config.playback_interval_ms = millis(&parse_duration_attr(key, value)?);
                }
                "transition-duration" => {
                    config.transition_duration_ms = millis(&parse_duration_attr(key, value)?);
                }
                "resize-debounce" => {
                    config.resize_debounce_ms = millis(&parse_duration_attr(key, value)?);
                }
                "swipe-threshold" => {
                    config.swipe_threshold = value.trim().parse().map_err(|_| invalid(key, value))?;
                }
                "slider-style" => match SliderStyle::parse(value) {
                    Some(style) => config.style = style,
                    None => warn!("Ignoring unknown slider style {:?}", value),
                },
                "pagination-style" => match PaginationStyle::parse(value) {
                    Some(style) => config.pagination_style = style,
                    None => warn!("Ignoring unknown pagination style {:?}", value),
                },
                "pagination-numbers-divider" => {
                    if !value.is_empty() {
                        config.pagination_divider = value.to_string();
                    }
                }
                _ => {}
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse a duration attribute.
///
/// Bare numbers are milliseconds. Suffixed values go through humantime
/// (`250ms`, `1s`, `2m`); fractional seconds such as `0.3s` are accepted too.
pub fn parse_duration_attr(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let trimmed = value.trim();

    if let Ok(ms) = trimmed.parse::<f64>() {
        return from_millis_f64(ms).ok_or_else(|| invalid(key, value));
    }

    if let Ok(duration) = humantime::parse_duration(trimmed) {
        return Ok(duration);
    }

    let fractional = if let Some(ms) = trimmed.strip_suffix("ms") {
        ms.trim().parse::<f64>().ok()
    } else if let Some(secs) = trimmed.strip_suffix('s') {
        secs.trim().parse::<f64>().ok().map(|secs| secs * 1000.0)
    } else {
        None
    };

    fractional
        .and_then(from_millis_f64)
        .ok_or_else(|| invalid(key, value))
}

fn flag(value: &str) -> bool {
    value != "false"
}

fn millis(duration: &Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn from_millis_f64(ms: f64) -> Option<Duration> {
    if ms.is_finite() && ms >= 0.0 {
        Some(Duration::from_micros((ms * 1000.0).round() as u64))
    } else {
        None
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
