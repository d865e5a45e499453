use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pointer gesture interpretation.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Gesture", inline)]
#[serde(default)]
pub struct GestureOptions {
    /// Distance in pixels the pointer must travel while pressed before the
    /// gesture counts as a drag. `0` turns any movement into a drag.
    #[schemars(title = "Drag Threshold", range(min = 0.0, max = 32.0))]
    pub drag_threshold: f32,
}
