use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// NDC depth used when a screen point has to be lifted into the scene
/// without a depth sample (area selection). Halfway between the near and
/// far planes in the `[0, 1]` depth range.
pub const REFERENCE_DEPTH: f32 = 0.5;

/// Projection model of a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in degrees.
        fovy: f32,
    },
    /// Orthographic projection, the usual choice for flat drawings.
    Orthographic {
        /// Visible world-space height; width follows the aspect ratio.
        height: f32,
    },
}

/// Camera defined by eye position, target, and projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Projection model.
    pub projection: Projection,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

/// World-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray start.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Camera {
    /// Top-down orthographic camera looking at `target` along -Z.
    #[must_use]
    pub fn top_down(target: Vec3, height: f32, aspect: f32) -> Self {
        Self {
            eye: target + Vec3::new(0.0, 0.0, 100.0),
            target,
            up: Vec3::Y,
            aspect,
            projection: Projection::Orthographic { height },
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// View matrix (world → camera).
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix. Both variants use the `[0, 1]` depth range.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fovy } => Mat4::perspective_rh(
                fovy.to_radians(),
                self.aspect,
                self.znear,
                self.zfar,
            ),
            Projection::Orthographic { height } => {
                let half_h = height * 0.5;
                let half_w = half_h * self.aspect;
                Mat4::orthographic_rh(
                    -half_w, half_w, -half_h, half_h, self.znear, self.zfar,
                )
            }
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Map a point in normalized device coordinates (x, y in `[-1, 1]`,
    /// z in `[0, 1]`) back into world space.
    #[must_use]
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.build_matrix().inverse().project_point3(ndc)
    }

    /// Map a world-space point into normalized device coordinates.
    #[must_use]
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.build_matrix().project_point3(world)
    }

    /// Picking ray through a normalized screen coordinate, starting on the
    /// near plane.
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.build_matrix().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn orthographic_unproject_maps_corners_to_view_extent() {
        let camera = Camera::top_down(Vec3::ZERO, 20.0, 2.0);
        let top_right = camera.unproject(Vec3::new(1.0, 1.0, REFERENCE_DEPTH));
        assert!((top_right.x - 20.0).abs() < 1e-3);
        assert!((top_right.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn project_inverts_unproject() {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            projection: Projection::Perspective { fovy: 45.0 },
            znear: 0.1,
            zfar: 100.0,
        };
        let world = Vec3::new(1.0, -0.5, 2.0);
        assert_close(camera.unproject(camera.project(world)), world);
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = Camera::top_down(Vec3::new(5.0, 5.0, 0.0), 10.0, 1.0);
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert_close(ray.direction, Vec3::NEG_Z);
        assert!((ray.origin.x - 5.0).abs() < 1e-3);
        assert!((ray.origin.y - 5.0).abs() < 1e-3);
    }
}
