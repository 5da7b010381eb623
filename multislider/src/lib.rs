//! multislider is the value and interaction engine behind a slider with any
//! number of thumbs on a single track.
//!
//! It owns no pixels. A UI layer feeds it pointer gestures and track
//! measurements, and reads back thumb values and positions:
//!
//! - [`ValueRange`] holds the bounds and the snap grid.
//! - [`position_for_value`] and [`value_for_position`] map between values
//!   and offsets along the track, for either [`Orientation`].
//! - [`ThumbOrderingPolicy`] keeps adjacent thumbs a minimum gap apart.
//! - [`MultiSlider`] owns the values, runs the drag state machine and emits
//!   [`ValueChange`], [`SnapFeedback`] and [`DragPhase`] notifications.
//! - [`ValueLabels`] produces label text for label collaborators.
//!
//! # Threading
//!
//! Everything is synchronous. Mutations take `&mut self`, so a slider shared
//! with other threads needs an outer lock. Listeners run after each call has
//! settled its state, in the order the events happened.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use multislider::{GestureEvent, MultiSlider, Orientation, PointerPosition, SliderConfig, TrackGeometry};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let mut slider = MultiSlider::new(
//!     SliderConfig::default()
//!         .orientation(Orientation::Horizontal)
//!         .snap_step_size(0.25)
//!         .minimum_gap(0.0),
//! )
//! .with_geometry(TrackGeometry::new(100.0, 20.0))
//! .with_values(&[0.0, 1.0])
//! .on_change(move |change| sink.lock().unwrap().push(change.values));
//!
//! slider.handle_gesture(GestureEvent::Began(PointerPosition::new(2.0, 0.0)));
//! slider.handle_gesture(GestureEvent::Moved(PointerPosition::new(40.0, 0.0)));
//! slider.handle_gesture(GestureEvent::Ended);
//!
//! assert_eq!(slider.values(), [0.5, 1.0]);
//! assert_eq!(seen.lock().unwrap().last(), Some(&vec![0.5, 1.0]));
//! ```

pub mod callback;
pub mod config;
pub mod event;
pub mod label;
pub mod ordering;
pub mod position;
pub mod range;
pub mod slider;

pub use callback::CallbackWith;
pub use config::{CancelBehavior, ConfigError, SliderConfig};
pub use event::{ChangeCause, DragPhase, SliderListeners, SnapFeedback, ValueChange};
pub use label::{LabelMode, LabelTextFn, NumberFormat, ValueLabels};
pub use ordering::{DistanceConstraint, ThumbOrderingPolicy, TravelDirection};
pub use position::{
    Orientation, PointerPosition, TrackGeometry, position_for_value, value_for_position,
};
pub use range::ValueRange;
pub use slider::{DragSession, DragState, GestureEvent, MIN_TOUCH_TARGET, MultiSlider, hit_test};
