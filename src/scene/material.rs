//! Flat-colour render materials.

use serde::{Deserialize, Serialize};

/// Unlit, flat-colour material. Colours are stored in linear space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Linear RGB colour.
    pub color: [f32; 3],
    /// Whether fragments are tested against the depth buffer.
    pub depth_test: bool,
    /// Whether fragments write to the depth buffer.
    pub depth_write: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            depth_test: true,
            depth_write: true,
        }
    }
}

impl Material {
    /// Depth-tested material with the given sRGB hex colour.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        Self {
            color: srgb_hex_to_linear(hex),
            ..Self::default()
        }
    }

    /// Material used for selection overlays: drawn on top of everything
    /// (no depth test, no depth write) in the given sRGB hex colour.
    #[must_use]
    pub fn highlight(hex: u32) -> Self {
        Self {
            color: srgb_hex_to_linear(hex),
            depth_test: false,
            depth_write: false,
        }
    }
}

/// Convert one sRGB channel in `[0, 1]` to linear space.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

/// Convert a `0xRRGGBB` sRGB colour to linear RGB.
#[must_use]
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [
        srgb_to_linear(channel(16)),
        srgb_to_linear(channel(8)),
        srgb_to_linear(channel(0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_is_blue_and_ignores_depth() {
        let m = Material::highlight(0x0000ff);
        assert_eq!(m.color[0], 0.0);
        assert_eq!(m.color[1], 0.0);
        assert!((m.color[2] - 1.0).abs() < 1e-5);
        assert!(!m.depth_test);
        assert!(!m.depth_write);
    }

    #[test]
    fn midtone_is_darker_in_linear_space() {
        let [r, g, b] = srgb_hex_to_linear(0x808080);
        assert!((r - 0.2158).abs() < 1e-3);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
