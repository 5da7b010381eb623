//! Track geometry: mapping values to offsets along the track and back.
//!
//! # Coordinate system
//!
//! Offsets are measured from the track origin in control coordinates, where
//! x grows to the right and y grows downward. Larger values always sit toward
//! the visually "positive" end of the track:
//!
//! - [`Orientation::Horizontal`]: the minimum is at offset `0` (left), the
//!   maximum at `track_length` (right).
//! - [`Orientation::Vertical`]: the maximum is at offset `0` (top), the
//!   minimum at `track_length` (bottom).
//!
//! Every function here is pure, so rendering code outside the slider can
//! reuse it to place thumbs.

use crate::range::ValueRange;

/// Axis along which the thumbs travel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// A pointer location relative to the track origin.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The coordinate that runs along the track for `orientation`.
    pub fn axis_offset(self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Builds a pointer sitting at `offset` along the track, with the cross
    /// axis coordinate set to zero.
    pub fn on_axis(offset: f32, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(offset, 0.0),
            Orientation::Vertical => Self::new(0.0, offset),
        }
    }
}

/// Measurements pushed in by the rendering layer.
///
/// `track_length` is the distance a thumb centre can travel; `thumb_extent`
/// is the thumb's size along the same axis.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TrackGeometry {
    pub track_length: f32,
    pub thumb_extent: f32,
}

impl TrackGeometry {
    pub const fn new(track_length: f32, thumb_extent: f32) -> Self {
        Self {
            track_length,
            thumb_extent,
        }
    }

    /// Converts a physical length along the track into value units.
    ///
    /// Returns `0.0` until the track has been measured.
    pub fn value_span_of(&self, extent: f32, range: &ValueRange) -> f32 {
        if self.track_length <= 0.0 || !extent.is_finite() {
            return 0.0;
        }
        (extent.max(0.0) / self.track_length) * range.span()
    }

    /// Half a thumb expressed in value units.
    pub fn half_thumb_value_span(&self, range: &ValueRange) -> f32 {
        self.value_span_of(self.thumb_extent / 2.0, range)
    }
}

/// Offset along the track of the thumb centre for `value`.
pub fn position_for_value(
    range: &ValueRange,
    value: f32,
    track_length: f32,
    orientation: Orientation,
) -> f32 {
    let length = track_length.max(0.0);
    let fraction = range.normalize(value);
    match orientation {
        Orientation::Horizontal => fraction * length,
        Orientation::Vertical => (1.0 - fraction) * length,
    }
}

/// Value whose thumb centre would sit at `offset` along the track.
///
/// Offsets beyond either end clamp to the nearest bound; an unmeasured track
/// (`track_length <= 0`) maps everything to the minimum.
pub fn value_for_position(
    range: &ValueRange,
    offset: f32,
    track_length: f32,
    orientation: Orientation,
) -> f32 {
    if track_length <= 0.0 || offset.is_nan() {
        return range.minimum();
    }
    let fraction = (offset / track_length).clamp(0.0, 1.0);
    let fraction = match orientation {
        Orientation::Horizontal => fraction,
        Orientation::Vertical => 1.0 - fraction,
    };
    range.denormalize(fraction)
}
