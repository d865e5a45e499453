//! Input handling: pointer event types, the container viewport, and the
//! click-vs-drag state machine.

/// Platform-agnostic pointer events and the container viewport.
pub mod event;
/// Click-vs-drag state machine and drag rectangles.
pub mod gesture;
/// DOM bindings for browser hosts.
#[cfg(feature = "web")]
pub mod web;

pub use event::{MouseButton, PointerEvent, Viewport};
pub use gesture::{DragRect, Gesture, GestureState, GestureTracker};
