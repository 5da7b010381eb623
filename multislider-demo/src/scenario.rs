//! Scripted slider sessions loaded from TOML.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use multislider::{GestureEvent, MultiSlider, PointerPosition, SliderConfig, TrackGeometry};
use serde::Deserialize;

/// Scenario used when no file is given on the command line.
pub const BUILTIN: &str = include_str!("../scenarios/basic.toml");

/// A slider setup plus the actions to replay against it.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub geometry: TrackGeometry,
    #[serde(default)]
    pub values: Vec<f32>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One scripted input. Pointer coordinates are in track space.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Began { x: f32, y: f32 },
    Moved { x: f32, y: f32 },
    Ended,
    Cancelled,
    Increment { index: usize },
    Decrement { index: usize },
    SetValue { index: usize, value: f32 },
    SetThumbCount { count: usize },
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(source: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(source)?;
        scenario.slider.validate()?;
        Ok(scenario)
    }
}

impl Action {
    /// Applies the action to `slider`.
    pub fn apply(self, slider: &mut MultiSlider) {
        match self {
            Action::Began { x, y } => {
                slider.handle_gesture(GestureEvent::Began(PointerPosition::new(x, y)));
            }
            Action::Moved { x, y } => {
                slider.handle_gesture(GestureEvent::Moved(PointerPosition::new(x, y)));
            }
            Action::Ended => {
                slider.handle_gesture(GestureEvent::Ended);
            }
            Action::Cancelled => {
                slider.handle_gesture(GestureEvent::Cancelled);
            }
            Action::Increment { index } => {
                slider.increment(index);
            }
            Action::Decrement { index } => {
                slider.decrement(index);
            }
            Action::SetValue { index, value } => {
                slider.set_value_at(index, value);
            }
            Action::SetThumbCount { count } => slider.set_thumb_count(count),
        }
    }
}
