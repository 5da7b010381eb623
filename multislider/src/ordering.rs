//! Keeps neighbouring thumbs apart.
//!
//! With a positive gap the thumb values stay ascending by index and at least
//! `gap` apart; with a zero gap thumbs are free to cross and overlap.

use crate::range::ValueRange;

/// How far apart adjacent thumbs must stay.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum DistanceConstraint {
    /// Half of a thumb's visual extent, converted to value units.
    #[default]
    HalfThumb,
    /// Thumbs may cross.
    Unconstrained,
    /// An explicit gap in value units.
    Fixed(f32),
}

impl DistanceConstraint {
    /// Decodes the configuration sentinel: negative means half a thumb, zero
    /// means no constraint, positive is an explicit gap.
    pub fn from_sentinel(minimum_gap: f32) -> Self {
        if minimum_gap < 0.0 {
            Self::HalfThumb
        } else if minimum_gap > 0.0 {
            Self::Fixed(minimum_gap)
        } else {
            // Zero and NaN.
            Self::Unconstrained
        }
    }

    pub fn to_sentinel(self) -> f32 {
        match self {
            Self::HalfThumb => -1.0,
            Self::Unconstrained => 0.0,
            Self::Fixed(gap) => gap,
        }
    }

    /// Gap in value units, given half a thumb in value units.
    pub fn resolve(self, half_thumb_value_span: f32) -> f32 {
        match self {
            Self::HalfThumb => half_thumb_value_span.max(0.0),
            Self::Unconstrained => 0.0,
            Self::Fixed(gap) => gap,
        }
    }
}

/// Direction a dragged thumb is heading, relative to its committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelDirection {
    Increasing,
    Decreasing,
    Stationary,
}

impl TravelDirection {
    pub fn between(from: f32, to: f32) -> Self {
        if to > from {
            Self::Increasing
        } else if to < from {
            Self::Decreasing
        } else {
            Self::Stationary
        }
    }
}

/// Clamps thumb values against their neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbOrderingPolicy {
    gap: f32,
}

impl ThumbOrderingPolicy {
    pub fn new(gap: f32) -> Self {
        let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
        Self { gap }
    }

    pub fn unconstrained() -> Self {
        Self { gap: 0.0 }
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn is_constrained(&self) -> bool {
        self.gap > 0.0
    }

    /// Returns the value thumb `index` may take when asked to move from
    /// `values[index]` to `candidate`.
    ///
    /// Neighbours are read from `values` as last committed. When both
    /// neighbours squeeze the thumb harder than the track allows, the bound in
    /// the direction of travel wins so the thumb never snaps back behind the
    /// pointer; a stationary thumb stays put.
    pub fn permit(&self, values: &[f32], index: usize, candidate: f32, range: &ValueRange) -> f32 {
        if !self.is_constrained() || index >= values.len() {
            return candidate;
        }

        let current = values[index];
        let (lower, upper) = self.bounds(values, index, range);

        let permitted = match (lower, upper) {
            (Some(lower), Some(upper)) if lower > upper => {
                match TravelDirection::between(current, candidate) {
                    TravelDirection::Increasing => lower,
                    TravelDirection::Decreasing => upper,
                    TravelDirection::Stationary => candidate,
                }
            }
            _ => {
                let mut value = candidate;
                if let Some(lower) = lower {
                    value = value.max(lower);
                }
                if let Some(upper) = upper {
                    value = value.min(upper);
                }
                value
            }
        };

        range.clamp(permitted)
    }

    /// Lowest and highest values allowed for thumb `index`, kept on the snap
    /// grid when the range snaps.
    pub fn bounds(
        &self,
        values: &[f32],
        index: usize,
        range: &ValueRange,
    ) -> (Option<f32>, Option<f32>) {
        if !self.is_constrained() {
            return (None, None);
        }
        let lower = index
            .checked_sub(1)
            .and_then(|previous| values.get(previous))
            .map(|previous| range.snap_up(previous + self.gap));
        let upper = values
            .get(index + 1)
            .map(|next| range.snap_down(next - self.gap));
        (lower, upper)
    }

    /// Re-establishes the gap across a whole value set.
    ///
    /// A forward pass pushes crowded values up, a backward pass pulls them
    /// back under the maximum, and a final clamp keeps everything in range
    /// when the track is too short to honour the gap.
    pub fn enforce_all(&self, values: &mut [f32], range: &ValueRange) {
        if self.is_constrained() {
            for index in 1..values.len() {
                let floor = range.snap_up(values[index - 1] + self.gap);
                if values[index] < floor {
                    values[index] = floor;
                }
            }
            if let Some(last) = values.last_mut() {
                *last = range.clamp(*last);
            }
            for index in (0..values.len().saturating_sub(1)).rev() {
                let ceiling = range.snap_down(values[index + 1] - self.gap);
                if values[index] > ceiling {
                    values[index] = ceiling;
                }
            }
        }
        for value in values.iter_mut() {
            *value = range.clamp(*value);
        }
    }
}
