use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{MouseButton, Viewport};

/// Where the primary button is in its press/release cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// Button up.
    #[default]
    Idle,
    /// Button down, pointer has not moved past the drag threshold.
    Pressed,
    /// Button down and moving: a drag rectangle is being drawn.
    Dragging,
}

/// Screen rectangle spanned by a drag, in container-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragRect {
    /// Press position (one corner).
    pub start: Vec2,
    /// Current or release position (opposite corner).
    pub end: Vec2,
}

impl DragRect {
    /// Top-left corner.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        self.start.min(self.end)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.start.max(self.end)
    }

    /// Width of the rectangle.
    #[must_use]
    pub fn width(&self) -> f32 {
        (self.end.x - self.start.x).abs()
    }

    /// Height of the rectangle.
    #[must_use]
    pub fn height(&self) -> f32 {
        (self.end.y - self.start.y).abs()
    }

    /// Rectangle in client (page) pixels for a box drawn over `viewport`:
    /// `(left, top, width, height)`.
    #[must_use]
    pub fn client_box(&self, viewport: &Viewport) -> (f32, f32, f32, f32) {
        let min = self.min();
        (
            min.x + viewport.left,
            min.y + viewport.top,
            self.width(),
            self.height(),
        )
    }
}

/// What a pointer release means for the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Nothing to do (non-primary button, release without press).
    None,
    /// Press and release without a drag.
    Click {
        /// Release position, container-relative pixels.
        position: Vec2,
        /// Whether the modifier was held at press time.
        extend: bool,
    },
    /// Press, drag, release.
    Area {
        /// Dragged rectangle.
        rect: DragRect,
        /// Whether the modifier was held at press time.
        extend: bool,
    },
}

/// Click-vs-drag state machine for the primary button.
///
/// All positions are container-relative pixels.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    state: GestureState,
    ctrl_held: bool,
    press: Vec2,
    last: Vec2,
    drag_threshold: f32,
}

impl GestureTracker {
    /// Tracker that starts a drag once the pointer moved more than
    /// `drag_threshold` pixels while pressed.
    #[must_use]
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            drag_threshold: drag_threshold.max(0.0),
            ..Self::default()
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Modifier flag captured at the last primary press.
    #[must_use]
    pub fn ctrl_held(&self) -> bool {
        self.ctrl_held
    }

    /// Drag rectangle while dragging, for drawing the selection box.
    #[must_use]
    pub fn drag_rect(&self) -> Option<DragRect> {
        (self.state == GestureState::Dragging).then_some(DragRect {
            start: self.press,
            end: self.last,
        })
    }

    /// Whether releasing `button` now would produce a [`Gesture::Click`].
    #[must_use]
    pub fn would_click(&self, button: MouseButton) -> bool {
        button.is_primary() && self.state == GestureState::Pressed
    }

    /// Button pressed. Only the primary button starts a gesture.
    pub fn pointer_down(
        &mut self,
        button: MouseButton,
        position: Vec2,
        ctrl: bool,
    ) {
        if !button.is_primary() {
            return;
        }
        self.state = GestureState::Pressed;
        self.ctrl_held = ctrl;
        self.press = position;
        self.last = position;
    }

    /// Pointer moved. Returns `true` while a drag is in progress.
    pub fn pointer_move(&mut self, position: Vec2) -> bool {
        self.last = position;
        if self.state == GestureState::Pressed
            && position.distance(self.press) > self.drag_threshold
        {
            self.state = GestureState::Dragging;
        }
        self.state == GestureState::Dragging
    }

    /// Button released. Non-primary releases are ignored and leave the
    /// state untouched; a primary release always returns to `Idle` and
    /// clears the modifier flag.
    pub fn pointer_up(
        &mut self,
        button: MouseButton,
        position: Vec2,
    ) -> Gesture {
        if !button.is_primary() {
            return Gesture::None;
        }
        let extend = self.ctrl_held;
        let previous = self.state;
        self.state = GestureState::Idle;
        self.ctrl_held = false;

        match previous {
            GestureState::Idle => Gesture::None,
            GestureState::Pressed => Gesture::Click { position, extend },
            GestureState::Dragging => Gesture::Area {
                rect: DragRect {
                    start: self.press,
                    end: self.last,
                },
                extend,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_release_is_a_click() {
        let mut t = GestureTracker::new(0.0);
        t.pointer_down(MouseButton::Left, Vec2::new(5.0, 5.0), true);
        assert_eq!(t.state(), GestureState::Pressed);
        assert!(t.ctrl_held());

        let g = t.pointer_up(MouseButton::Left, Vec2::new(5.0, 5.0));
        assert_eq!(
            g,
            Gesture::Click {
                position: Vec2::new(5.0, 5.0),
                extend: true
            }
        );
        assert_eq!(t.state(), GestureState::Idle);
        assert!(!t.ctrl_held());
    }

    #[test]
    fn move_while_pressed_turns_into_area() {
        let mut t = GestureTracker::new(0.0);
        t.pointer_down(MouseButton::Left, Vec2::new(10.0, 10.0), false);
        assert!(t.pointer_move(Vec2::new(40.0, 30.0)));
        assert_eq!(t.state(), GestureState::Dragging);
        let rect = t.drag_rect().unwrap();
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 20.0);

        let g = t.pointer_up(MouseButton::Left, Vec2::new(99.0, 99.0));
        let Gesture::Area { rect, extend } = g else {
            panic!("expected area gesture, got {g:?}");
        };
        assert!(!extend);
        assert_eq!(rect.end, Vec2::new(40.0, 30.0));
        assert!(t.drag_rect().is_none());
    }

    #[test]
    fn move_below_threshold_stays_a_click() {
        let mut t = GestureTracker::new(4.0);
        t.pointer_down(MouseButton::Left, Vec2::ZERO, false);
        assert!(!t.pointer_move(Vec2::new(2.0, 2.0)));
        let g = t.pointer_up(MouseButton::Left, Vec2::new(2.0, 2.0));
        assert!(matches!(g, Gesture::Click { .. }));
    }

    #[test]
    fn move_without_press_does_nothing() {
        let mut t = GestureTracker::new(0.0);
        assert!(!t.pointer_move(Vec2::new(50.0, 50.0)));
        assert_eq!(t.state(), GestureState::Idle);
    }

    #[test]
    fn non_primary_buttons_are_ignored() {
        let mut t = GestureTracker::new(0.0);
        t.pointer_down(MouseButton::Right, Vec2::ZERO, true);
        assert_eq!(t.state(), GestureState::Idle);

        t.pointer_down(MouseButton::Left, Vec2::ZERO, true);
        let g = t.pointer_up(MouseButton::Middle, Vec2::ZERO);
        assert_eq!(g, Gesture::None);
        assert_eq!(t.state(), GestureState::Pressed);
        assert!(t.ctrl_held());
    }

    #[test]
    fn would_click_only_while_pressed() {
        let mut t = GestureTracker::new(4.0);
        assert!(!t.would_click(MouseButton::Left));
        t.pointer_down(MouseButton::Left, Vec2::ZERO, false);
        assert!(t.would_click(MouseButton::Left));
        assert!(!t.would_click(MouseButton::Right));

        let _ = t.pointer_move(Vec2::new(10.0, 0.0));
        assert!(!t.would_click(MouseButton::Left));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut t = GestureTracker::new(0.0);
        let g = t.pointer_up(MouseButton::Left, Vec2::ZERO);
        assert_eq!(g, Gesture::None);
    }

    #[test]
    fn client_box_offsets_by_viewport() {
        let rect = DragRect {
            start: Vec2::new(50.0, 40.0),
            end: Vec2::new(10.0, 20.0),
        };
        let vp = Viewport {
            left: 100.0,
            top: 200.0,
            width: 640.0,
            height: 480.0,
        };
        assert_eq!(rect.client_box(&vp), (110.0, 220.0, 40.0, 20.0));
    }
}
