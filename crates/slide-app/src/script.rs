//! Interaction scripts for the simulator
//! Includes the built-in demo used when no script file is given

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use slide_core::{Direction, LayoutMeasure, SliderConfig};
use slide_host::HostInput;

/// Widths the simulated viewport is laid out with
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Layout {
    pub container_width: f64,
    pub item_width: f64,
    #[serde(default)]
    pub gap: f64,
}

impl Layout {
    pub fn measure(&self) -> LayoutMeasure {
        LayoutMeasure {
            container_width: self.container_width,
            item_width: self.item_width,
            gap: self.gap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Viewport {
    pub container_width: f64,
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Action {
    /// Change the container width, then signal a resize
    SetViewport { set_viewport: Viewport },
    Input(HostInput),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    pub action: Action,
}

/// A timed interaction script
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    pub item_count: usize,
    pub layout: Layout,
    /// Used when no configuration file is given
    #[serde(default)]
    pub config: Option<SliderConfig>,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Keep running this long after the start before tearing down
    #[serde(default)]
    pub run_for_ms: Option<u64>,
}

impl Script {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut script: Script = serde_json::from_str(json).context("Invalid script")?;
        script.steps.sort_by_key(|step| step.at_ms);
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json_str(&contents)
    }

    /// Time at which the simulation is torn down
    pub fn end_ms(&self) -> u64 {
        let last_step = self.steps.last().map(|step| step.at_ms).unwrap_or(0);
        self.run_for_ms.unwrap_or(last_step).max(last_step)
    }

    /// Ten cards three to a page: autoplay, a click, a swipe, a narrower
    /// viewport and a jump past the end
    pub fn demo() -> Self {
        let step = |at_ms, action| Step { at_ms, action };
        let input = Action::Input;

        Script {
            item_count: 10,
            layout: Layout {
                container_width: 960.0,
                item_width: 300.0,
                gap: 20.0,
            },
            config: Some(SliderConfig {
                autoplay: true,
                playback_interval_ms: 1000,
                ..SliderConfig::default()
            }),
            steps: vec![
                step(
                    1500,
                    input(HostInput::Click {
                        direction: Direction::Next,
                    }),
                ),
                step(2000, input(HostInput::GestureStart { position: 400.0 })),
                step(2050, input(HostInput::GestureMove { position: 320.0 })),
                step(2100, input(HostInput::GestureEnd)),
                step(
                    2600,
                    Action::SetViewport {
                        set_viewport: Viewport {
                            container_width: 640.0,
                        },
                    },
                ),
                step(3300, input(HostInput::JumpTo { page: 99 })),
                step(
                    3800,
                    input(HostInput::Click {
                        direction: Direction::Next,
                    }),
                ),
            ],
            run_for_ms: Some(4000),
        }
    }
}
