use tracing::{debug, trace};

use crate::{
    config::{CancelBehavior, SliderConfig},
    event::{ChangeCause, DragPhase, EventBatch, SliderEvent, SnapFeedback, ValueChange},
    ordering::ThumbOrderingPolicy,
    position::{Orientation, PointerPosition, TrackGeometry, position_for_value, value_for_position},
    range::ValueRange,
};

use super::values::ThumbValues;

/// Smallest comfortable touch target along the track; the default hit radius
/// is half of this or half a thumb, whichever is larger.
pub const MIN_TOUCH_TARGET: f32 = 40.0;

/// Drag controller state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Tracking(usize),
}

/// The gesture currently moving a thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub thumb_index: usize,
    pub start_value: f32,
    pub is_active: bool,
    /// Pointer offset along the track when the drag began.
    pointer_start: f32,
    /// Thumb centre offset along the track when the drag began.
    thumb_start: f32,
    /// Last value listeners were told about for this thumb.
    announced_value: f32,
}

/// Everything a drag step reads besides the value set.
pub(crate) struct DragContext<'a> {
    pub config: &'a SliderConfig,
    pub range: &'a ValueRange,
    pub policy: &'a ThumbOrderingPolicy,
    pub geometry: TrackGeometry,
}

impl DragContext<'_> {
    fn touch_radius(&self) -> f32 {
        self.config
            .touch_radius
            .unwrap_or_else(|| self.geometry.thumb_extent.max(MIN_TOUCH_TARGET) / 2.0)
    }
}

/// Finds the thumb whose centre is closest to `pointer_offset` along the
/// track, among thumbs no farther than `radius`. Ties go to the lower index.
pub fn hit_test(
    values: &[f32],
    range: &ValueRange,
    track_length: f32,
    orientation: Orientation,
    pointer_offset: f32,
    radius: f32,
) -> Option<usize> {
    let mut closest: Option<(usize, f32)> = None;
    for (index, value) in values.iter().enumerate() {
        let centre = position_for_value(range, *value, track_length, orientation);
        let distance = (centre - pointer_offset).abs();
        if distance > radius {
            continue;
        }
        if closest.is_none_or(|(_, best)| distance < best) {
            closest = Some((index, distance));
        }
    }
    closest.map(|(index, _)| index)
}

/// Single-pointer drag state machine: `Idle` <-> `Tracking(index)`.
#[derive(Debug, Default, Clone)]
pub(crate) struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn state(&self) -> DragState {
        match self.session {
            Some(session) => DragState::Tracking(session.thumb_index),
            None => DragState::Idle,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Starts tracking the thumb under `pointer`. Returns whether a drag
    /// began; misses and disabled thumbs leave the controller idle.
    pub fn begin(
        &mut self,
        pointer: PointerPosition,
        values: &ThumbValues,
        ctx: &DragContext<'_>,
        events: &mut EventBatch,
    ) -> bool {
        if let Some(session) = &self.session {
            debug!(index = session.thumb_index, "drag already in progress, ignoring new gesture");
            return false;
        }
        if !ctx.config.is_drag_enabled {
            debug!("drag gestures disabled");
            return false;
        }

        let orientation = ctx.config.orientation;
        let pointer_offset = pointer.axis_offset(orientation);
        let Some(index) = hit_test(
            values.as_slice(),
            ctx.range,
            ctx.geometry.track_length,
            orientation,
            pointer_offset,
            ctx.touch_radius(),
        ) else {
            trace!(pointer_offset, "gesture missed every thumb");
            return false;
        };
        if ctx.config.is_thumb_disabled(index) {
            debug!(index, "gesture landed on a disabled thumb");
            return false;
        }
        let Some(start_value) = values.get(index) else {
            return false;
        };

        self.session = Some(DragSession {
            thumb_index: index,
            start_value,
            is_active: true,
            pointer_start: pointer_offset,
            thumb_start: position_for_value(
                ctx.range,
                start_value,
                ctx.geometry.track_length,
                orientation,
            ),
            announced_value: start_value,
        });
        debug!(index, start_value, "drag started");
        events.push(SliderEvent::Drag(DragPhase::Started { index, pointer }));
        true
    }

    /// Moves the tracked thumb by the pointer's travel since the drag began.
    pub fn track(
        &mut self,
        pointer: PointerPosition,
        values: &mut ThumbValues,
        ctx: &DragContext<'_>,
        events: &mut EventBatch,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if ctx.geometry.track_length <= 0.0 {
            debug!("track not measured yet, ignoring drag move");
            return;
        }

        let index = session.thumb_index;
        let Some(previous) = values.get(index) else {
            return;
        };
        let orientation = ctx.config.orientation;
        let offset = session.thumb_start + (pointer.axis_offset(orientation) - session.pointer_start);
        let raw = value_for_position(ctx.range, offset, ctx.geometry.track_length, orientation);
        let Some(committed) = values.commit(index, raw, ctx.range, ctx.policy) else {
            return;
        };
        trace!(index, offset, raw, committed, "drag move");

        if committed == previous {
            return;
        }
        if ctx.config.is_haptic_snap_enabled && ctx.range.is_snapping() {
            events.push(SliderEvent::Snapped(SnapFeedback {
                index,
                value: committed,
            }));
        }
        if ctx.config.is_continuous {
            session.announced_value = committed;
            events.push(drag_change(values, index));
        }
    }

    /// Finishes the drag, announcing the final value if listeners have not
    /// seen it yet.
    pub fn end(&mut self, values: &ThumbValues, events: &mut EventBatch) {
        let Some(session) = self.session.take() else {
            return;
        };
        let index = session.thumb_index;
        if values.get(index).is_some_and(|value| value != session.announced_value) {
            events.push(drag_change(values, index));
        }
        debug!(index, "drag ended");
        events.push(SliderEvent::Drag(DragPhase::Ended { index }));
    }

    /// Cancels the drag, keeping or reverting the thumb per `behavior`.
    pub fn cancel(
        &mut self,
        behavior: CancelBehavior,
        values: &mut ThumbValues,
        ctx: &DragContext<'_>,
        events: &mut EventBatch,
    ) {
        let Some(session) = self.session.take() else {
            return;
        };
        let index = session.thumb_index;
        if behavior == CancelBehavior::Revert {
            values.commit(index, session.start_value, ctx.range, ctx.policy);
        }
        if values.get(index).is_some_and(|value| value != session.announced_value) {
            events.push(drag_change(values, index));
        }
        debug!(index, ?behavior, "drag cancelled");
        events.push(SliderEvent::Drag(DragPhase::Cancelled { index }));
    }

    /// Drops the session without touching values, for when the tracked thumb
    /// no longer exists.
    pub fn abandon(&mut self, events: &mut EventBatch) {
        if let Some(session) = self.session.take() {
            debug!(index = session.thumb_index, "drag abandoned");
            events.push(SliderEvent::Drag(DragPhase::Cancelled {
                index: session.thumb_index,
            }));
        }
    }
}

fn drag_change(values: &ThumbValues, index: usize) -> SliderEvent {
    SliderEvent::Changed(ValueChange {
        values: values.as_slice().to_vec(),
        index: Some(index),
        cause: ChangeCause::Drag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENGTH: f32 = 100.0;

    fn horizontal() -> SliderConfig {
        SliderConfig::default()
            .orientation(Orientation::Horizontal)
            .minimum_gap(0.0)
    }

    fn context<'a>(
        config: &'a SliderConfig,
        range: &'a ValueRange,
        policy: &'a ThumbOrderingPolicy,
    ) -> DragContext<'a> {
        DragContext {
            config,
            range,
            policy,
            geometry: TrackGeometry::new(LENGTH, 20.0),
        }
    }

    fn values_of(raw: &[f32], range: &ValueRange) -> ThumbValues {
        let mut values = ThumbValues::default();
        values.replace_all(raw, range, &ThumbOrderingPolicy::unconstrained());
        values
    }

    fn at(x: f32) -> PointerPosition {
        PointerPosition::new(x, 5.0)
    }

    #[test]
    fn test_hit_test_picks_closest_within_radius() {
        let range = ValueRange::default();
        let values = [0.1, 0.5, 0.9];
        let hit = |offset| hit_test(&values, &range, LENGTH, Orientation::Horizontal, offset, 20.0);
        assert_eq!(hit(12.0), Some(0));
        assert_eq!(hit(44.0), Some(1));
        assert_eq!(hit(95.0), Some(2));

        let apart = [0.1, 0.9];
        let miss = hit_test(&apart, &range, LENGTH, Orientation::Horizontal, 50.0, 20.0);
        assert_eq!(miss, None);
    }

    #[test]
    fn test_hit_test_tie_prefers_lower_index() {
        let range = ValueRange::default();
        let values = [0.4, 0.6];
        let hit = hit_test(&values, &range, LENGTH, Orientation::Horizontal, 50.0, 20.0);
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn test_hit_test_vertical_uses_inverted_axis() {
        let range = ValueRange::default();
        let values = [0.2, 0.8];
        // Value 0.8 sits 20 units below the top.
        let hit = hit_test(&values, &range, LENGTH, Orientation::Vertical, 22.0, 10.0);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn test_begin_rejects_disabled_thumb() {
        let config = horizontal().disable_thumb(1);
        let range = config.range();
        let policy = ThumbOrderingPolicy::unconstrained();
        let ctx = context(&config, &range, &policy);
        let values = values_of(&[0.1, 0.5], &range);
        let mut controller = DragController::default();
        let mut events = EventBatch::new();

        assert!(!controller.begin(at(50.0), &values, &ctx, &mut events));
        assert_eq!(controller.state(), DragState::Idle);
        assert!(events.is_empty());

        assert!(controller.begin(at(10.0), &values, &ctx, &mut events));
        assert_eq!(controller.state(), DragState::Tracking(0));
        assert!(controller.session().is_some_and(|session| session.is_active));
    }

    #[test]
    fn test_begin_respects_drag_switch() {
        let config = horizontal().is_drag_enabled(false);
        let range = config.range();
        let policy = ThumbOrderingPolicy::unconstrained();
        let ctx = context(&config, &range, &policy);
        let values = values_of(&[0.5], &range);
        let mut controller = DragController::default();
        let mut events = EventBatch::new();
        assert!(!controller.begin(at(50.0), &values, &ctx, &mut events));
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_track_moves_by_pointer_delta() {
        let config = horizontal();
        let range = config.range();
        let policy = ThumbOrderingPolicy::unconstrained();
        let ctx = context(&config, &range, &policy);
        let mut values = values_of(&[0.5], &range);
        let mut controller = DragController::default();
        let mut events = EventBatch::new();

        // Grab the thumb 8 units right of its centre; it must not jump.
        assert!(controller.begin(at(58.0), &values, &ctx, &mut events));
        controller.track(at(58.0), &mut values, &ctx, &mut events);
        assert_eq!(values.get(0), Some(0.5));

        controller.track(at(78.0), &mut values, &ctx, &mut events);
        let moved = values.get(0).unwrap();
        assert!((moved - 0.7).abs() < 1e-5, "{moved}");
    }

    #[test]
    fn test_snap_feedback_once_per_step() {
        let config = horizontal().snap_step_size(0.25);
        let range = config.range();
        let policy = ThumbOrderingPolicy::unconstrained();
        let ctx = context(&config, &range, &policy);
        let mut values = values_of(&[0.5], &range);
        let mut controller = DragController::default();
        let mut events = EventBatch::new();

        controller.begin(at(50.0), &values, &ctx, &mut events);
        events.clear();
        for x in [52.0, 55.0, 60.0, 63.0, 70.0, 74.0] {
            controller.track(at(x), &mut values, &ctx, &mut events);
        }
        let snaps: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                SliderEvent::Snapped(feedback) => Some(feedback.value),
                _ => None,
            })
            .collect();
        assert_eq!(snaps, [0.75]);
    }

    #[test]
    fn test_discrete_mode_announces_on_end_only() {
        let config = horizontal().is_continuous(false);
        let range = config.range();
        let policy = ThumbOrderingPolicy::unconstrained();
        let ctx = context(&config, &range, &policy);
        let mut values = values_of(&[0.3], &range);
        let mut controller = DragController::default();
        let mut events = EventBatch::new();

        controller.begin(at(30.0), &values, &ctx, &mut events);
        controller.track(at(50.0), &mut values, &ctx, &mut events);
        controller.track(at(70.0), &mut values, &ctx, &mut events);
        assert!(!events.iter().any(|event| matches!(event, SliderEvent::Changed(_))));

        controller.end(&values, &mut events);
        let changes = events
            .iter()
            .filter(|event| matches!(event, SliderEvent::Changed(_)))
            .count();
        assert_eq!(changes, 1);
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_cancel_reverts_or_keeps() {
        for (behavior, expected) in [(CancelBehavior::Revert, 0.3), (CancelBehavior::KeepLast, 0.7)] {
            let config = horizontal().cancel_behavior(behavior);
            let range = config.range();
            let policy = ThumbOrderingPolicy::unconstrained();
            let ctx = context(&config, &range, &policy);
            let mut values = values_of(&[0.3], &range);
            let mut controller = DragController::default();
            let mut events = EventBatch::new();

            controller.begin(at(30.0), &values, &ctx, &mut events);
            controller.track(at(70.0), &mut values, &ctx, &mut events);
            controller.cancel(config.cancel_behavior, &mut values, &ctx, &mut events);

            let value = values.get(0).unwrap();
            assert!((value - expected).abs() < 1e-5, "{behavior:?}: {value}");
            assert_eq!(controller.state(), DragState::Idle);
            assert!(matches!(
                events.last(),
                Some(SliderEvent::Drag(DragPhase::Cancelled { index: 0 }))
            ));
        }
    }

    #[test]
    fn test_moves_while_idle_are_ignored() {
        let config = horizontal();
        let range = config.range();
        let policy = ThumbOrderingPolicy::unconstrained();
        let ctx = context(&config, &range, &policy);
        let mut values = values_of(&[0.3], &range);
        let mut controller = DragController::default();
        let mut events = EventBatch::new();
        controller.track(at(90.0), &mut values, &ctx, &mut events);
        controller.end(&values, &mut events);
        assert_eq!(values.get(0), Some(0.3));
        assert!(events.is_empty());
    }
}
