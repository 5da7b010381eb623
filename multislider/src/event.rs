//! Notifications a slider emits to its collaborators.

use smallvec::SmallVec;

use crate::{callback::CallbackWith, position::PointerPosition};

/// Why the value set changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeCause {
    /// A drag moved a thumb (or ended/cancelled after moving one).
    Drag,
    /// `set_values`, `set_value_at` or `set_thumb_count`.
    Programmatic,
    /// A configuration change re-validated the values.
    Configuration,
    /// An increment or decrement action.
    Step,
}

/// The full value set after a change.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub values: Vec<f32>,
    /// The thumb that moved, when a single one did.
    pub index: Option<usize>,
    pub cause: ChangeCause,
}

impl ValueChange {
    /// `(index, value)` pairs, the shape label collaborators consume.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.values.iter().copied().enumerate()
    }
}

/// A dragged thumb landed on a new snap step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapFeedback {
    pub index: usize,
    pub value: f32,
}

/// Drag lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    Started { index: usize, pointer: PointerPosition },
    Ended { index: usize },
    Cancelled { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SliderEvent {
    Changed(ValueChange),
    Snapped(SnapFeedback),
    Drag(DragPhase),
}

/// Events collected during one call, dispatched once state is settled.
pub(crate) type EventBatch = SmallVec<[SliderEvent; 4]>;

/// Callbacks receiving slider notifications. All default to no-ops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliderListeners {
    pub on_change: CallbackWith<ValueChange>,
    pub on_snap_feedback: CallbackWith<SnapFeedback>,
    pub on_drag: CallbackWith<DragPhase>,
}

impl SliderListeners {
    pub(crate) fn dispatch(&self, events: EventBatch) {
        for event in events {
            match event {
                SliderEvent::Changed(change) => self.on_change.call(change),
                SliderEvent::Snapped(feedback) => self.on_snap_feedback.call(feedback),
                SliderEvent::Drag(phase) => self.on_drag.call(phase),
            }
        }
    }
}
