use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hit-testing parameters for click and area selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Picking", inline)]
#[serde(default)]
pub struct PickingOptions {
    /// World-space distance within which a ray counts as hitting a line
    /// segment.
    #[schemars(title = "Line Threshold", range(min = 0.0))]
    pub line_threshold: f32,
    /// When set, the area-selection volume is flattened onto this z plane
    /// instead of spanning the two unprojected corner depths.
    #[schemars(title = "Area Plane Z")]
    pub area_plane_z: Option<f32>,
}

impl Default for PickingOptions {
    fn default() -> Self {
        Self {
            line_threshold: 1.0,
            area_plane_z: Some(0.0),
        }
    }
}
