//! Ray picking: resolve a normalized pointer position to the nearest scene
//! object under it.
//!
//! The selection engine only depends on the [`RayPicker`] trait, so hosts
//! with their own hit-testing (GPU id buffers, a worker, a BVH) can plug it
//! in. [`MeshRaycaster`] is the CPU implementation used when none is given.

mod raycaster;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub use raycaster::MeshRaycaster;

use crate::camera::Camera;
use crate::scene::{ObjectId, SceneGraph};

/// Nearest hit returned by a [`RayPicker`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// Object that was hit.
    pub object: ObjectId,
    /// Distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Hit-testing service consumed by the selection engine.
pub trait RayPicker {
    /// Return the nearest object under `pointer` (normalized device
    /// coordinates), or `None` when nothing is hit.
    fn raycast(
        &self,
        scene: &SceneGraph,
        camera: &Camera,
        pointer: Vec2,
    ) -> Option<Intersection>;
}
