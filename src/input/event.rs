use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Platform-agnostic pointer events.
///
/// Coordinates are client (page) pixels, the same space the container's
/// [`Viewport`] is expressed in.
///
/// # Example
///
/// ```ignore
/// engine.handle_event(
///     &mut scene,
///     PointerEvent::Down {
///         button: MouseButton::Left,
///         x: 120.0,
///         y: 80.0,
///         ctrl: false,
///     },
/// )?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PointerEvent {
    /// Button pressed.
    Down {
        /// Which button went down.
        button: MouseButton,
        /// Horizontal client position.
        x: f32,
        /// Vertical client position.
        y: f32,
        /// Whether the multi-select modifier (ctrl) was held.
        ctrl: bool,
    },
    /// Pointer moved.
    Move {
        /// Horizontal client position.
        x: f32,
        /// Vertical client position.
        y: f32,
    },
    /// Button released.
    Up {
        /// Which button was released.
        button: MouseButton,
        /// Horizontal client position.
        x: f32,
        /// Vertical client position.
        y: f32,
    },
}

impl PointerEvent {
    /// Client position carried by the event.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        match *self {
            Self::Down { x, y, .. }
            | Self::Move { x, y }
            | Self::Up { x, y, .. } => Vec2::new(x, y),
        }
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Any other button, by DOM button index.
    Other(i16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            other => Self::Other(other),
        }
    }

    /// Whether this is the primary button.
    #[must_use]
    pub fn is_primary(self) -> bool {
        self == Self::Left
    }
}

/// Bounding rectangle of the pointer-event surface, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Viewport {
    /// Viewport anchored at the page origin.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Width / height, or `1.0` for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Client position → container-relative pixels.
    #[must_use]
    pub fn to_local(&self, client: Vec2) -> Vec2 {
        client - Vec2::new(self.left, self.top)
    }

    /// Container-relative pixels → normalized device coordinates
    /// (`x' = x/w*2-1`, `y' = -(y/h)*2+1`). A zero-sized viewport maps
    /// everything to the centre.
    #[must_use]
    pub fn to_ndc(&self, local: Vec2) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (local.x / self.width) * 2.0 - 1.0,
            -(local.y / self.height) * 2.0 + 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn local_subtracts_container_origin() {
        let vp = Viewport {
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 100.0,
        };
        let local = vp.to_local(Vec2::new(60.0, 70.0));
        assert_eq!(local, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn dom_buttons() {
        assert!(MouseButton::from_dom(0).is_primary());
        assert_eq!(MouseButton::from_dom(2), MouseButton::Right);
        assert_eq!(MouseButton::from_dom(4), MouseButton::Other(4));
    }

    #[test]
    fn degenerate_viewport_maps_to_centre() {
        let vp = Viewport::new(0.0, 0.0);
        assert_eq!(vp.to_ndc(Vec2::new(5.0, 5.0)), Vec2::ZERO);
        assert_eq!(vp.aspect(), 1.0);
    }
}
