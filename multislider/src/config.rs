//! Public configuration surface of a [`crate::MultiSlider`].

use std::collections::BTreeSet;

use derive_setters::Setters;
use thiserror::Error;

use crate::{
    ordering::DistanceConstraint,
    position::Orientation,
    range::ValueRange,
};

/// What a cancelled drag leaves behind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CancelBehavior {
    /// Keep the last value committed during the drag.
    #[default]
    KeepLast,
    /// Restore the value the thumb had when the drag began.
    Revert,
}

/// Problems [`SliderConfig::validate`] reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("slider bounds must be finite, got {minimum}..{maximum}")]
    NonFiniteBound { minimum: f32, maximum: f32 },
    #[error("minimum value {minimum} must be below maximum value {maximum}")]
    EmptyRange { minimum: f32, maximum: f32 },
    #[error("snap step must be zero or positive, got {0}")]
    InvalidSnapStep(f32),
    #[error("minimum gap must be a number, got {0}")]
    InvalidMinimumGap(f32),
    #[error("touch radius must be positive, got {0}")]
    InvalidTouchRadius(f32),
}

/// Slider configuration.
///
/// Every field has a builder-style setter of the same name:
///
/// ```
/// use multislider::{Orientation, SliderConfig};
///
/// let config = SliderConfig::default()
///     .maximum_value(100.0)
///     .snap_step_size(5.0)
///     .orientation(Orientation::Horizontal)
///     .disable_thumb(0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Setters)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SliderConfig {
    pub minimum_value: f32,
    pub maximum_value: f32,
    /// Snap grid spacing, measured from `minimum_value`. `0` disables snapping.
    pub snap_step_size: f32,
    /// Notify on every accepted drag move instead of only when the drag ends.
    pub is_continuous: bool,
    pub orientation: Orientation,
    /// Smallest separation between adjacent thumbs, in value units.
    ///
    /// Negative means half a thumb's visual extent, `0` lets thumbs cross.
    pub minimum_gap: f32,
    /// Thumbs that cannot be dragged or stepped.
    pub disabled_thumb_indices: BTreeSet<usize>,
    /// Emit snap feedback when a drag crosses a snap step.
    pub is_haptic_snap_enabled: bool,
    pub cancel_behavior: CancelBehavior,
    /// Accept drag gestures at all.
    pub is_drag_enabled: bool,
    /// Labels show the distance from the previous thumb instead of the value.
    pub is_value_label_relative: bool,
    /// Hit-test radius around each thumb centre, in track units.
    ///
    /// Defaults to half of the larger of the thumb extent and the minimum
    /// touch target.
    #[setters(strip_option)]
    pub touch_radius: Option<f32>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            minimum_value: 0.0,
            maximum_value: 1.0,
            snap_step_size: 0.0,
            is_continuous: true,
            orientation: Orientation::default(),
            minimum_gap: DistanceConstraint::HalfThumb.to_sentinel(),
            disabled_thumb_indices: BTreeSet::new(),
            is_haptic_snap_enabled: true,
            cancel_behavior: CancelBehavior::default(),
            is_drag_enabled: true,
            is_value_label_relative: false,
            touch_radius: None,
        }
    }
}

impl SliderConfig {
    /// Marks one more thumb as disabled.
    pub fn disable_thumb(mut self, index: usize) -> Self {
        self.disabled_thumb_indices.insert(index);
        self
    }

    pub fn is_thumb_disabled(&self, index: usize) -> bool {
        self.disabled_thumb_indices.contains(&index)
    }

    pub fn distance_constraint(&self) -> DistanceConstraint {
        DistanceConstraint::from_sentinel(self.minimum_gap)
    }

    /// The value range this configuration describes.
    ///
    /// Invalid bounds are normalized (see [`ValueRange::new`]); call
    /// [`validate`](Self::validate) first to reject them instead.
    pub fn range(&self) -> ValueRange {
        ValueRange::new(self.minimum_value, self.maximum_value, self.snap_step_size)
    }

    /// Checks the configuration without normalizing anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (minimum, maximum) = (self.minimum_value, self.maximum_value);
        if !minimum.is_finite() || !maximum.is_finite() {
            return Err(ConfigError::NonFiniteBound { minimum, maximum });
        }
        if minimum >= maximum {
            return Err(ConfigError::EmptyRange { minimum, maximum });
        }
        if !self.snap_step_size.is_finite() || self.snap_step_size < 0.0 {
            return Err(ConfigError::InvalidSnapStep(self.snap_step_size));
        }
        if self.minimum_gap.is_nan() || self.minimum_gap.is_infinite() {
            return Err(ConfigError::InvalidMinimumGap(self.minimum_gap));
        }
        if let Some(radius) = self.touch_radius
            && !(radius.is_finite() && radius > 0.0)
        {
            return Err(ConfigError::InvalidTouchRadius(radius));
        }
        Ok(())
    }
}
