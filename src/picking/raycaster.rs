use glam::{Mat4, Vec2, Vec3};

use super::{Intersection, RayPicker};
use crate::camera::{Camera, Ray};
use crate::scene::{ObjectId, SceneGraph, Topology};

const PARALLEL_EPSILON: f32 = 1e-7;

/// CPU ray picker over a fixed list of candidate meshes.
///
/// The candidate list is a snapshot: objects added to the scene after
/// construction are never hit. Candidates that were removed or hidden
/// since are skipped.
#[derive(Debug, Clone)]
pub struct MeshRaycaster {
    candidates: Vec<ObjectId>,
    line_threshold: f32,
}

impl MeshRaycaster {
    /// Picker over an explicit candidate list.
    #[must_use]
    pub fn new(candidates: Vec<ObjectId>, line_threshold: f32) -> Self {
        Self {
            candidates,
            line_threshold,
        }
    }

    /// Picker over every object under `root` (inclusive) that carries
    /// geometry. Selection overlays and their subtrees are left out.
    #[must_use]
    pub fn from_scene(
        scene: &SceneGraph,
        root: ObjectId,
        line_threshold: f32,
    ) -> Self {
        let mut candidates = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(obj) = scene.get(id) else {
                continue;
            };
            if obj.selected {
                continue;
            }
            if obj.geometry.is_some() {
                candidates.push(id);
            }
            stack.extend(obj.children().iter().rev());
        }
        log::debug!("ray picker snapshot: {} candidates", candidates.len());
        Self::new(candidates, line_threshold)
    }

    /// Candidate snapshot, in scene traversal order.
    #[must_use]
    pub fn candidates(&self) -> &[ObjectId] {
        &self.candidates
    }

    fn intersect_object(
        &self,
        scene: &SceneGraph,
        id: ObjectId,
        ray: &Ray,
    ) -> Option<(f32, Vec3)> {
        let obj = scene.get(id)?;
        if !obj.visible {
            return None;
        }
        let geometry = obj.geometry.as_ref()?;
        let world = scene.world_transform(id);

        let slack = match geometry.topology() {
            Topology::Triangles => 0.0,
            Topology::Lines => self.line_threshold,
        };
        let bounds = geometry.bounding_box()?.transform(&world).padded(slack);
        let _ = bounds.ray_entry(ray.origin, ray.direction)?;

        geometry
            .primitives()
            .filter_map(|prim| {
                let [a, b, c] = world_vertices(&world, prim);
                match geometry.topology() {
                    Topology::Triangles => ray_triangle(ray, a, b, c),
                    Topology::Lines => {
                        ray_segment(ray, a, b, self.line_threshold)
                    }
                }
            })
            .min_by(|x, y| x.total_cmp(y))
            .map(|t| (t, ray.at(t)))
    }
}

impl RayPicker for MeshRaycaster {
    fn raycast(
        &self,
        scene: &SceneGraph,
        camera: &Camera,
        pointer: Vec2,
    ) -> Option<Intersection> {
        let ray = camera.ray_from_ndc(pointer);
        let mut nearest: Option<Intersection> = None;
        for &id in &self.candidates {
            let Some((distance, point)) = self.intersect_object(scene, id, &ray)
            else {
                continue;
            };
            if nearest.is_none_or(|n| distance < n.distance) {
                nearest = Some(Intersection {
                    object: id,
                    distance,
                    point,
                });
            }
        }
        nearest
    }
}

fn world_vertices(world: &Mat4, prim: [Vec3; 3]) -> [Vec3; 3] {
    prim.map(|v| world.transform_point3(v))
}

/// Möller–Trumbore, double-sided. Returns the ray distance to the hit.
fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = det.recip();
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Closest approach between the ray and segment `a..b`. Returns the ray
/// distance of the closest point when the gap is within `threshold`.
fn ray_segment(ray: &Ray, a: Vec3, b: Vec3, threshold: f32) -> Option<f32> {
    let seg = b - a;
    let w0 = ray.origin - a;
    let seg_len_sq = seg.length_squared();
    let d_dot_seg = ray.direction.dot(seg);
    let d_dot_w0 = ray.direction.dot(w0);
    let seg_dot_w0 = seg.dot(w0);

    let denom = seg_len_sq - d_dot_seg * d_dot_seg;
    let seg_t = if seg_len_sq <= PARALLEL_EPSILON {
        0.0
    } else if denom.abs() <= PARALLEL_EPSILON {
        // Parallel: any segment point is equally close; take the start.
        0.0
    } else {
        ((seg_dot_w0 - d_dot_seg * d_dot_w0) / denom).clamp(0.0, 1.0)
    };

    let on_segment = a + seg * seg_t;
    let ray_t = ray.direction.dot(on_segment - ray.origin).max(0.0);
    let gap = ray.at(ray_t).distance(on_segment);
    (gap <= threshold).then_some(ray_t)
}
