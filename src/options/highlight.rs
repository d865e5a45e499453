use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::Material;

/// Appearance of selection overlays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Highlight", inline)]
#[serde(default)]
pub struct HighlightOptions {
    /// Overlay colour as `0xRRGGBB` in sRGB.
    #[schemars(title = "Color")]
    pub color: u32,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self { color: 0x0000ff }
    }
}

impl HighlightOptions {
    /// Build the shared overlay material for these options.
    #[must_use]
    pub fn material(&self) -> Material {
        Material::highlight(self.color)
    }
}
