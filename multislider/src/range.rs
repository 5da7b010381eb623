//! Value bounds and the snap grid shared by every thumb.
//!
//! [`ValueRange`] is plain arithmetic: it never stores thumb values itself.
//! The slider re-runs its values through [`ValueRange::constrain`] whenever
//! the range changes, so values never silently fall out of bounds.

use tracing::warn;

/// Relative tolerance used when deciding whether a value already sits on a
/// snap grid point.
const GRID_TOLERANCE: f32 = 1e-4;

/// Inclusive value bounds plus an optional snap step.
///
/// A `snap_step` of `0.0` means continuous values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    minimum: f32,
    maximum: f32,
    snap_step: f32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 1.0,
            snap_step: 0.0,
        }
    }
}

impl ValueRange {
    /// Creates a range.
    ///
    /// `maximum <= minimum`, non-finite bounds and negative or non-finite
    /// steps are programmer errors: they panic in debug builds and are
    /// normalized in release builds (bounds swapped, bad steps treated as
    /// continuous, non-finite bounds replaced by the defaults).
    pub fn new(minimum: f32, maximum: f32, snap_step: f32) -> Self {
        debug_assert!(
            minimum.is_finite() && maximum.is_finite(),
            "slider bounds must be finite, got {minimum}..{maximum}"
        );
        debug_assert!(
            minimum < maximum,
            "slider minimum {minimum} must be below maximum {maximum}"
        );
        debug_assert!(
            snap_step.is_finite() && snap_step >= 0.0,
            "snap step must be a non-negative number, got {snap_step}"
        );

        let (mut minimum, mut maximum) = (minimum, maximum);
        if !minimum.is_finite() || !maximum.is_finite() {
            warn!(minimum, maximum, "non-finite slider bounds, using 0..1");
            minimum = 0.0;
            maximum = 1.0;
        }
        if maximum < minimum {
            warn!(minimum, maximum, "inverted slider bounds, swapping");
            std::mem::swap(&mut minimum, &mut maximum);
        }
        let snap_step = if snap_step.is_finite() && snap_step >= 0.0 {
            snap_step
        } else {
            warn!(snap_step, "invalid snap step, disabling snapping");
            0.0
        };

        Self {
            minimum,
            maximum,
            snap_step,
        }
    }

    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn snap_step(&self) -> f32 {
        self.snap_step
    }

    /// Distance between the bounds; zero for a degenerate range.
    pub fn span(&self) -> f32 {
        self.maximum - self.minimum
    }

    pub fn is_snapping(&self) -> bool {
        self.snap_step > 0.0
    }

    /// Restricts `value` to `[minimum, maximum]`. NaN maps to the minimum.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.minimum;
        }
        value.clamp(self.minimum, self.maximum)
    }

    /// Rounds `value` to the nearest `minimum + k * snap_step`.
    ///
    /// Ties on the step index resolve to the even index, so `0.625` with a
    /// step of `0.25` lands on `0.5` (index 2.5 -> 2) while `0.875` lands on
    /// `1.0` (index 3.5 -> 4). Identity when snapping is off.
    pub fn snap(&self, value: f32) -> f32 {
        if !self.is_snapping() || !value.is_finite() {
            return value;
        }
        let index = ((value - self.minimum) / self.snap_step).round_ties_even();
        self.grid_point(index)
    }

    /// Smallest grid point at or above `value`.
    pub fn snap_up(&self, value: f32) -> f32 {
        if !self.is_snapping() || !value.is_finite() {
            return value;
        }
        let index = self.grid_index(value);
        let rounded = index.round();
        if (index - rounded).abs() <= GRID_TOLERANCE {
            self.grid_point(rounded)
        } else {
            self.grid_point(index.ceil())
        }
    }

    /// Largest grid point at or below `value`.
    pub fn snap_down(&self, value: f32) -> f32 {
        if !self.is_snapping() || !value.is_finite() {
            return value;
        }
        let index = self.grid_index(value);
        let rounded = index.round();
        if (index - rounded).abs() <= GRID_TOLERANCE {
            self.grid_point(rounded)
        } else {
            self.grid_point(index.floor())
        }
    }

    /// Snap, then clamp: the rule applied to every value entering the set.
    pub fn constrain(&self, value: f32) -> f32 {
        self.clamp(self.snap(value))
    }

    /// Maps a value to `[0, 1]`. A degenerate range maps everything to `0`.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.minimum) / span
    }

    /// Inverse of [`normalize`](Self::normalize), clamped to the range.
    pub fn denormalize(&self, fraction: f32) -> f32 {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction };
        self.clamp(self.minimum + fraction * self.span())
    }

    fn grid_index(&self, value: f32) -> f32 {
        (value - self.minimum) / self.snap_step
    }

    fn grid_point(&self, index: f32) -> f32 {
        index.mul_add(self.snap_step, self.minimum)
    }
}
