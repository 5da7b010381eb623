//! The slider controller: value set, configuration and drag handling in one
//! place.
//!
//! ## Usage
//!
//! Feed pointer gestures in track coordinates and read the values back.
//! Rendering code pushes measurements with [`MultiSlider::set_geometry`] and
//! places thumbs from [`MultiSlider::thumb_offsets`].
//!
//! ```
//! use multislider::{MultiSlider, Orientation, PointerPosition, SliderConfig, TrackGeometry};
//!
//! let config = SliderConfig::default()
//!     .orientation(Orientation::Horizontal)
//!     .minimum_gap(0.1);
//! let mut slider = MultiSlider::new(config)
//!     .with_geometry(TrackGeometry::new(200.0, 24.0))
//!     .with_values(&[0.25, 0.75]);
//!
//! assert!(slider.begin_drag(PointerPosition::new(50.0, 0.0)));
//! slider.drag_to(PointerPosition::new(190.0, 0.0));
//! slider.end_drag();
//!
//! // The first thumb stops one gap short of the second.
//! assert!((slider.values()[0] - 0.65).abs() < 1e-5);
//! ```

use tracing::{debug, instrument};

use crate::{
    callback::CallbackWith,
    config::{CancelBehavior, SliderConfig},
    event::{ChangeCause, DragPhase, EventBatch, SliderEvent, SliderListeners, SnapFeedback, ValueChange},
    label::{LabelMode, ValueLabels},
    ordering::ThumbOrderingPolicy,
    position::{PointerPosition, TrackGeometry, position_for_value},
    range::ValueRange,
};

use drag::{DragContext, DragController};
use values::ThumbValues;

pub use drag::{DragSession, DragState, MIN_TOUCH_TARGET, hit_test};

mod drag;
mod values;

/// Fraction of the span an increment or decrement moves a thumb when the
/// range does not snap.
const ACCESSIBILITY_STEP: f32 = 0.05;

/// Pointer gestures, in track coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Began(PointerPosition),
    Moved(PointerPosition),
    Ended,
    Cancelled,
}

/// A slider with any number of thumbs sharing one track.
#[derive(Debug, Clone, Default)]
pub struct MultiSlider {
    config: SliderConfig,
    range: ValueRange,
    geometry: TrackGeometry,
    values: ThumbValues,
    drag: DragController,
    listeners: SliderListeners,
    labels: ValueLabels,
}

impl MultiSlider {
    /// Creates a slider with no thumbs.
    pub fn new(config: SliderConfig) -> Self {
        Self {
            range: config.range(),
            config,
            ..Self::default()
        }
    }

    /// Sets the initial values.
    pub fn with_values(mut self, values: &[f32]) -> Self {
        self.set_values(values);
        self
    }

    pub fn with_geometry(mut self, geometry: TrackGeometry) -> Self {
        self.set_geometry(geometry);
        self
    }

    /// Sets the change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(ValueChange) + Send + Sync + 'static,
    {
        self.listeners.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the change handler using a shared callback.
    pub fn on_change_shared(mut self, on_change: impl Into<CallbackWith<ValueChange>>) -> Self {
        self.listeners.on_change = on_change.into();
        self
    }

    /// Sets the snap feedback handler, typically a haptic trigger.
    pub fn on_snap_feedback<F>(mut self, on_snap_feedback: F) -> Self
    where
        F: Fn(SnapFeedback) + Send + Sync + 'static,
    {
        self.listeners.on_snap_feedback = CallbackWith::new(on_snap_feedback);
        self
    }

    /// Sets the drag lifecycle handler.
    pub fn on_drag<F>(mut self, on_drag: F) -> Self
    where
        F: Fn(DragPhase) + Send + Sync + 'static,
    {
        self.listeners.on_drag = CallbackWith::new(on_drag);
        self
    }

    /// Sets the label text strategy.
    pub fn labels(mut self, labels: ValueLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn values(&self) -> &[f32] {
        self.values.as_slice()
    }

    pub fn value_at(&self, index: usize) -> Option<f32> {
        self.values.get(index)
    }

    pub fn thumb_count(&self) -> usize {
        self.values.len()
    }

    pub fn configuration(&self) -> &SliderConfig {
        &self.config
    }

    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    /// The gap currently enforced between adjacent thumbs, in value units.
    pub fn minimum_gap(&self) -> f32 {
        self.policy().gap()
    }

    /// Each thumb's position as a fraction of the track, for rendering.
    pub fn normalized_positions(&self) -> Vec<f32> {
        self.values()
            .iter()
            .map(|value| self.range.normalize(*value))
            .collect()
    }

    /// Each thumb centre's offset along the track, for rendering.
    pub fn thumb_offsets(&self) -> Vec<f32> {
        self.values()
            .iter()
            .map(|value| {
                position_for_value(
                    &self.range,
                    *value,
                    self.geometry.track_length,
                    self.config.orientation,
                )
            })
            .collect()
    }

    /// Label text for thumb `index`.
    pub fn value_label(&self, index: usize) -> Option<String> {
        self.labels.text(self.values(), index, self.label_mode())
    }

    pub fn value_labels(&self) -> Vec<String> {
        self.labels.texts(self.values(), self.label_mode())
    }

    /// Replaces all values and resizes the thumb count to match.
    ///
    /// Values are snapped, clamped and spread to the minimum gap. A drag in
    /// progress survives only if its thumb still exists.
    #[instrument(level = "debug", skip_all, fields(count = values.len()))]
    pub fn set_values(&mut self, values: &[f32]) {
        let mut events = EventBatch::new();
        let before = self.values.clone();
        let policy = self.policy();
        self.values.replace_all(values, &self.range, &policy);
        self.abandon_stale_drag(&mut events);
        if self.values != before {
            events.push(self.change(None, ChangeCause::Programmatic));
        }
        self.listeners.dispatch(events);
    }

    /// Grows by repeating the last value (or the minimum) or shrinks by
    /// truncation. A count of zero is ignored.
    pub fn set_thumb_count(&mut self, count: usize) {
        if count == 0 {
            debug!("ignoring request for zero thumbs");
            return;
        }
        if count == self.values.len() {
            return;
        }
        let mut events = EventBatch::new();
        self.values.resize(count, &self.range);
        self.abandon_stale_drag(&mut events);
        events.push(self.change(None, ChangeCause::Programmatic));
        self.listeners.dispatch(events);
    }

    /// Sets one thumb, honouring the range and its neighbours. Returns the
    /// stored value, or `None` for an index past the last thumb.
    pub fn set_value_at(&mut self, index: usize, value: f32) -> Option<f32> {
        self.commit_single(index, value, ChangeCause::Programmatic)
    }

    /// Moves a thumb one step up: one snap step, or 5% of the span.
    pub fn increment(&mut self, index: usize) -> Option<f32> {
        self.step(index, 1.0)
    }

    /// Moves a thumb one step down.
    pub fn decrement(&mut self, index: usize) -> Option<f32> {
        self.step(index, -1.0)
    }

    /// Replaces the configuration and re-validates every value in one pass.
    ///
    /// A drag in progress is cancelled (keeping its last value) when drags
    /// are switched off, its thumb becomes disabled or the orientation flips.
    pub fn set_configuration(&mut self, config: SliderConfig) {
        let mut events = EventBatch::new();
        let orientation_changed = self.config.orientation != config.orientation;
        self.config = config;
        self.range = self.config.range();
        let policy = self.policy();

        let before = self.values.clone();
        self.values.revalidate(&self.range, &policy);

        if let Some(index) = self.drag.session().map(|session| session.thumb_index)
            && (!self.config.is_drag_enabled
                || self.config.is_thumb_disabled(index)
                || orientation_changed)
        {
            let ctx = DragContext {
                config: &self.config,
                range: &self.range,
                policy: &policy,
                geometry: self.geometry,
            };
            self.drag
                .cancel(CancelBehavior::KeepLast, &mut self.values, &ctx, &mut events);
        }

        if self.values != before {
            events.push(self.change(None, ChangeCause::Configuration));
        }
        self.listeners.dispatch(events);
    }

    /// Edits the configuration in place, then re-validates like
    /// [`set_configuration`](Self::set_configuration).
    pub fn update_configuration(&mut self, edit: impl FnOnce(&mut SliderConfig)) {
        let mut config = self.config.clone();
        edit(&mut config);
        self.set_configuration(config);
    }

    /// Stores the track measurements reported by the rendering layer.
    ///
    /// A half-thumb gap depends on the thumb extent, so values are
    /// re-validated whenever the resolved gap changes.
    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        let previous_gap = self.policy().gap();
        self.geometry = geometry;
        let policy = self.policy();
        if policy.gap() == previous_gap {
            return;
        }

        let mut events = EventBatch::new();
        let before = self.values.clone();
        self.values.revalidate(&self.range, &policy);
        if self.values != before {
            debug!(gap = policy.gap(), "geometry changed the thumb gap");
            events.push(self.change(None, ChangeCause::Configuration));
        }
        self.listeners.dispatch(events);
    }

    /// Routes a pointer gesture and returns the resulting drag state.
    pub fn handle_gesture(&mut self, gesture: GestureEvent) -> DragState {
        match gesture {
            GestureEvent::Began(pointer) => {
                self.begin_drag(pointer);
            }
            GestureEvent::Moved(pointer) => self.drag_to(pointer),
            GestureEvent::Ended => self.end_drag(),
            GestureEvent::Cancelled => self.cancel_drag(),
        }
        self.drag_state()
    }

    /// Starts dragging the thumb under `pointer`, if any.
    pub fn begin_drag(&mut self, pointer: PointerPosition) -> bool {
        let mut events = EventBatch::new();
        let policy = self.policy();
        let ctx = DragContext {
            config: &self.config,
            range: &self.range,
            policy: &policy,
            geometry: self.geometry,
        };
        let started = self.drag.begin(pointer, &self.values, &ctx, &mut events);
        self.listeners.dispatch(events);
        started
    }

    pub fn drag_to(&mut self, pointer: PointerPosition) {
        let mut events = EventBatch::new();
        let policy = self.policy();
        let ctx = DragContext {
            config: &self.config,
            range: &self.range,
            policy: &policy,
            geometry: self.geometry,
        };
        self.drag.track(pointer, &mut self.values, &ctx, &mut events);
        self.listeners.dispatch(events);
    }

    pub fn end_drag(&mut self) {
        let mut events = EventBatch::new();
        self.drag.end(&self.values, &mut events);
        self.listeners.dispatch(events);
    }

    /// Cancels the drag using the configured [`CancelBehavior`].
    pub fn cancel_drag(&mut self) {
        let mut events = EventBatch::new();
        let policy = self.policy();
        let ctx = DragContext {
            config: &self.config,
            range: &self.range,
            policy: &policy,
            geometry: self.geometry,
        };
        self.drag
            .cancel(self.config.cancel_behavior, &mut self.values, &ctx, &mut events);
        self.listeners.dispatch(events);
    }

    fn policy(&self) -> ThumbOrderingPolicy {
        let half_thumb = self.geometry.half_thumb_value_span(&self.range);
        ThumbOrderingPolicy::new(self.config.distance_constraint().resolve(half_thumb))
    }

    fn label_mode(&self) -> LabelMode {
        if self.config.is_value_label_relative {
            LabelMode::Relative {
                minimum: self.range.minimum(),
            }
        } else {
            LabelMode::Absolute
        }
    }

    fn change(&self, index: Option<usize>, cause: ChangeCause) -> SliderEvent {
        SliderEvent::Changed(ValueChange {
            values: self.values().to_vec(),
            index,
            cause,
        })
    }

    fn abandon_stale_drag(&mut self, events: &mut EventBatch) {
        if self
            .drag
            .session()
            .is_some_and(|session| session.thumb_index >= self.values.len())
        {
            self.drag.abandon(events);
        }
    }

    fn step(&mut self, index: usize, direction: f32) -> Option<f32> {
        if self.config.is_thumb_disabled(index) {
            debug!(index, "ignoring step on a disabled thumb");
            return None;
        }
        let current = self.values.get(index)?;
        let delta = if self.range.is_snapping() {
            self.range.snap_step()
        } else {
            self.range.span() * ACCESSIBILITY_STEP
        };
        self.commit_single(index, current + direction * delta, ChangeCause::Step)
    }

    fn commit_single(&mut self, index: usize, value: f32, cause: ChangeCause) -> Option<f32> {
        let Some(previous) = self.values.get(index) else {
            debug!(index, count = self.values.len(), "no thumb at index");
            return None;
        };
        let policy = self.policy();
        let committed = self.values.commit(index, value, &self.range, &policy)?;
        if committed != previous {
            let mut events = EventBatch::new();
            events.push(self.change(Some(index), cause));
            self.listeners.dispatch(events);
        }
        Some(committed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::position::Orientation;

    fn assert_values(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{actual:?} vs {expected:?}");
        }
    }

    fn recording(config: SliderConfig) -> (MultiSlider, Arc<Mutex<Vec<ValueChange>>>) {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        let slider = MultiSlider::new(config)
            .with_geometry(TrackGeometry::new(100.0, 20.0))
            .on_change(move |change| sink.lock().push(change));
        (slider, changes)
    }

    fn free() -> SliderConfig {
        SliderConfig::default()
            .orientation(Orientation::Horizontal)
            .minimum_gap(0.0)
    }

    #[test]
    fn test_set_values_resizes_and_notifies() {
        let (mut slider, changes) = recording(free());
        slider.set_values(&[0.2, 1.4, -3.0]);
        assert_values(slider.values(), &[0.2, 1.0, 0.0]);
        assert_eq!(slider.thumb_count(), 3);

        let changes = changes.lock();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].cause, ChangeCause::Programmatic);
        assert_eq!(changes[0].index, None);
    }

    #[test]
    fn test_set_values_unchanged_is_silent() {
        let (mut slider, changes) = recording(free());
        slider.set_values(&[0.2, 0.4]);
        slider.set_values(&[0.2, 0.4]);
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_set_values_enforces_gap() {
        let (mut slider, _) = recording(free().minimum_gap(0.25));
        slider.set_values(&[0.5, 0.5, 0.5]);
        assert_values(slider.values(), &[0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_set_values_keeps_session_with_valid_index() {
        let (mut slider, _) = recording(free());
        slider.set_values(&[0.1, 0.9]);
        assert!(slider.begin_drag(PointerPosition::new(90.0, 0.0)));
        slider.set_values(&[0.1, 0.8, 0.95]);
        assert_eq!(slider.drag_state(), DragState::Tracking(1));
    }

    #[test]
    fn test_set_values_cancels_session_with_stale_index() {
        let phases = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&phases);
        let mut slider = MultiSlider::new(free())
            .with_geometry(TrackGeometry::new(100.0, 20.0))
            .with_values(&[0.1, 0.9])
            .on_drag(move |phase| sink.lock().push(phase));
        assert!(slider.begin_drag(PointerPosition::new(90.0, 0.0)));
        slider.set_values(&[0.4]);
        assert_eq!(slider.drag_state(), DragState::Idle);
        assert!(matches!(
            phases.lock().last(),
            Some(DragPhase::Cancelled { index: 1 })
        ));
    }

    #[test]
    fn test_thumb_count_zero_is_ignored() {
        let (mut slider, changes) = recording(free());
        slider.set_values(&[0.3]);
        slider.set_thumb_count(0);
        assert_eq!(slider.thumb_count(), 1);
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_thumb_count_from_empty_uses_minimum() {
        let (mut slider, changes) = recording(free().minimum_value(-2.0));
        slider.set_thumb_count(2);
        assert_values(slider.values(), &[-2.0, -2.0]);
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_set_value_at_honours_neighbours() {
        let (mut slider, changes) = recording(free().minimum_gap(0.1));
        slider.set_values(&[0.1, 0.5, 0.9]);
        assert_eq!(slider.set_value_at(5, 0.2), None);
        let stored = slider.set_value_at(1, 0.95).unwrap();
        assert!((stored - 0.8).abs() < 1e-5);
        assert_eq!(changes.lock().last().map(|change| change.index), Some(Some(1)));
    }

    #[test]
    fn test_configuration_change_reclamps_values() {
        let (mut slider, changes) = recording(free());
        slider.set_values(&[0.2, 0.9]);
        slider.update_configuration(|config| {
            config.maximum_value = 0.5;
            config.snap_step_size = 0.25;
        });
        assert_values(slider.values(), &[0.25, 0.5]);
        assert_eq!(
            changes.lock().last().map(|change| change.cause),
            Some(ChangeCause::Configuration)
        );
    }

    #[test]
    fn test_disabling_dragged_thumb_cancels_drag() {
        let (mut slider, _) = recording(free());
        slider.set_values(&[0.5]);
        assert!(slider.begin_drag(PointerPosition::new(50.0, 0.0)));
        slider.drag_to(PointerPosition::new(70.0, 0.0));
        slider.update_configuration(|config| {
            config.disabled_thumb_indices.insert(0);
        });
        assert_eq!(slider.drag_state(), DragState::Idle);
        assert_values(slider.values(), &[0.7]);
    }

    #[test]
    fn test_measuring_track_spreads_values_to_half_thumb_gap() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        let mut slider = MultiSlider::new(SliderConfig::default().orientation(Orientation::Horizontal))
            .with_values(&[0.5, 0.5])
            .on_change(move |change| sink.lock().push(change));
        assert_eq!(slider.minimum_gap(), 0.0);

        slider.set_geometry(TrackGeometry::new(100.0, 20.0));
        assert!((slider.minimum_gap() - 0.1).abs() < 1e-6);
        assert_values(slider.values(), &[0.5, 0.6]);
        assert_eq!(
            changes.lock().last().map(|change| change.cause),
            Some(ChangeCause::Configuration)
        );

        // A small drag must not pull the thumb back against the pointer.
        assert!(slider.begin_drag(PointerPosition::new(50.0, 0.0)));
        slider.drag_to(PointerPosition::new(50.5, 0.0));
        slider.end_drag();
        assert!(slider.values()[0] >= 0.5 - 1e-5, "{:?}", slider.values());
        assert!(slider.values()[1] - slider.values()[0] >= 0.1 - 1e-5);
    }

    #[test]
    fn test_geometry_with_same_gap_is_silent() {
        let (mut slider, changes) = recording(free());
        slider.set_values(&[0.5, 0.5]);
        slider.set_geometry(TrackGeometry::new(300.0, 10.0));
        assert_values(slider.values(), &[0.5, 0.5]);
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_orientation_change_cancels_drag() {
        let (mut slider, _) = recording(free());
        slider.set_values(&[0.5]);
        assert!(slider.begin_drag(PointerPosition::new(50.0, 0.0)));
        slider.drag_to(PointerPosition::new(60.0, 0.0));
        slider.update_configuration(|config| config.orientation = Orientation::Vertical);
        assert_eq!(slider.drag_state(), DragState::Idle);
        slider.drag_to(PointerPosition::new(60.0, 90.0));
        assert_values(slider.values(), &[0.6]);
    }

    #[test]
    fn test_increment_uses_snap_step_or_span_fraction() {
        let (mut slider, _) = recording(free().snap_step_size(0.25));
        slider.set_values(&[0.5]);
        assert_eq!(slider.increment(0), Some(0.75));
        assert_eq!(slider.decrement(0), Some(0.5));

        let (mut continuous, _) = recording(free().maximum_value(10.0));
        continuous.set_values(&[5.0]);
        let stepped = continuous.increment(0).unwrap();
        assert!((stepped - 5.5).abs() < 1e-5);
    }

    #[test]
    fn test_increment_skips_disabled_thumbs() {
        let (mut slider, changes) = recording(free().disable_thumb(0));
        slider.set_values(&[0.5]);
        assert_eq!(slider.increment(0), None);
        assert_values(slider.values(), &[0.5]);
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_half_thumb_gap_follows_geometry() {
        let slider = MultiSlider::new(SliderConfig::default())
            .with_geometry(TrackGeometry::new(200.0, 40.0));
        assert!((slider.minimum_gap() - 0.1).abs() < 1e-6);

        let unmeasured = MultiSlider::new(SliderConfig::default());
        assert_eq!(unmeasured.minimum_gap(), 0.0);
    }

    #[test]
    fn test_rendering_reads_positions() {
        let (mut slider, _) = recording(free().minimum_value(-1.0));
        slider.set_values(&[-1.0, 0.0, 1.0]);
        assert_values(&slider.normalized_positions(), &[0.0, 0.5, 1.0]);
        assert_values(&slider.thumb_offsets(), &[0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_value_labels_follow_relative_mode() {
        let (mut slider, _) = recording(free().is_value_label_relative(true));
        slider.set_values(&[0.25, 0.75]);
        assert_eq!(slider.value_labels(), ["0.25", "0.5"]);
        slider.update_configuration(|config| config.is_value_label_relative = false);
        assert_eq!(slider.value_label(1).as_deref(), Some("0.75"));
    }

    #[test]
    fn test_handle_gesture_reports_state() {
        let (mut slider, _) = recording(free());
        slider.set_values(&[0.5]);
        assert_eq!(
            slider.handle_gesture(GestureEvent::Began(PointerPosition::new(5.0, 0.0))),
            DragState::Idle
        );
        assert_eq!(
            slider.handle_gesture(GestureEvent::Began(PointerPosition::new(52.0, 0.0))),
            DragState::Tracking(0)
        );
        slider.handle_gesture(GestureEvent::Moved(PointerPosition::new(62.0, 0.0)));
        assert_eq!(slider.handle_gesture(GestureEvent::Ended), DragState::Idle);
        assert_values(slider.values(), &[0.6]);
    }
}
