//! Interactive object selection.
//!
//! [`SelectionEngine`] turns pointer gestures into selection changes:
//! clicks are resolved through a [`RayPicker`](crate::picking::RayPicker),
//! drags through bounding-volume containment. Selected objects are
//! highlighted by inserting overlay clones next to them in the scene graph;
//! the originals are never modified. Changes are announced through
//! `select` / `deselect` events.

mod area;
mod engine;
mod overlay;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use area::objects_in_volume;
pub use engine::{PointerResponse, SelectionEngine};

use crate::scene::ObjectId;

/// One entry of the selected set: an overlay and the object it highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Overlay clone inserted into the scene graph.
    pub overlay: ObjectId,
    /// Original object the overlay was cloned from.
    pub origin: ObjectId,
}

/// Names of the events emitted by the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SelectionEventKind {
    /// The selected set was (re)computed by a gesture.
    Select,
    /// Objects were removed from the selected set.
    Deselect,
}

impl SelectionEventKind {
    /// Event name as used by listeners (`"select"` / `"deselect"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Deselect => "deselect",
        }
    }
}

impl fmt::Display for SelectionEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "deselect" => Ok(Self::Deselect),
            other => Err(format!("unknown selection event '{other}'")),
        }
    }
}

/// Payload delivered to selection listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "objects")]
pub enum SelectionEvent {
    /// Full selected set, in selection order.
    Select(Vec<Selection>),
    /// Originals that were deselected: one id for a single deselect, empty
    /// after a deselect-all.
    Deselect(Vec<ObjectId>),
}

impl SelectionEvent {
    /// Kind of this event.
    #[must_use]
    pub fn kind(&self) -> SelectionEventKind {
        match self {
            Self::Select(_) => SelectionEventKind::Select,
            Self::Deselect(_) => SelectionEventKind::Deselect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_round_trip() {
        for kind in [SelectionEventKind::Select, SelectionEventKind::Deselect] {
            assert_eq!(kind.name().parse::<SelectionEventKind>(), Ok(kind));
        }
        assert!("hover".parse::<SelectionEventKind>().is_err());
    }

    #[test]
    fn event_payload_serializes_with_name() {
        let event = SelectionEvent::Deselect(vec![ObjectId(3)]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "deselect");
        assert_eq!(json["objects"][0], 3);
    }
}
