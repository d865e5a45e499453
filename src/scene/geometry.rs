//! Vertex geometry attached to scene objects.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;

/// How consecutive vertices (or index triples/pairs) form primitives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Every three vertices form a triangle.
    #[default]
    Triangles,
    /// Every two vertices form a line segment (drawing entities).
    Lines,
}

/// Object-space vertex data. Shared between an object and its overlay
/// clones through an `Arc`, never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    positions: Vec<Vec3>,
    indices: Option<Vec<u32>>,
    topology: Topology,
    #[serde(skip)]
    bounds: Option<Aabb>,
}

impl Geometry {
    /// Non-indexed geometry.
    #[must_use]
    pub fn new(topology: Topology, positions: Vec<Vec3>) -> Self {
        let bounds = Aabb::from_points(&positions);
        Self {
            positions,
            indices: None,
            topology,
            bounds,
        }
    }

    /// Indexed geometry. Indices that point past the vertex list are
    /// ignored when primitives are enumerated.
    #[must_use]
    pub fn indexed(
        topology: Topology,
        positions: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            indices: Some(indices),
            ..Self::new(topology, positions)
        }
    }

    /// Line-segment geometry from a polyline (`n` points, `n - 1` segments).
    #[must_use]
    pub fn polyline(points: &[Vec3]) -> Self {
        let positions = points
            .windows(2)
            .flat_map(|pair| [pair[0], pair[1]])
            .collect();
        Self::new(Topology::Lines, positions)
    }

    /// Axis-aligned quad in the XY plane made of two triangles.
    #[must_use]
    pub fn quad(min: Vec3, max: Vec3) -> Self {
        let a = Vec3::new(min.x, min.y, min.z);
        let b = Vec3::new(max.x, min.y, min.z);
        let c = Vec3::new(max.x, max.y, max.z);
        let d = Vec3::new(min.x, max.y, max.z);
        Self::indexed(
            Topology::Triangles,
            vec![a, b, c, d],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    /// Primitive topology.
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Raw vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Object-space bounds, `None` when the geometry has no vertices.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.bounds.or_else(|| Aabb::from_points(&self.positions))
    }

    /// Iterate primitives as vertex arrays: triangles yield three vertices,
    /// lines yield two (the third slot repeats the second).
    pub fn primitives(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        let stride = match self.topology {
            Topology::Triangles => 3,
            Topology::Lines => 2,
        };
        let count = self
            .indices
            .as_ref()
            .map_or(self.positions.len(), Vec::len)
            / stride;
        (0..count).filter_map(move |i| {
            let vertex = |k: usize| self.vertex(i * stride + k);
            match self.topology {
                Topology::Triangles => {
                    Some([vertex(0)?, vertex(1)?, vertex(2)?])
                }
                Topology::Lines => {
                    let (a, b) = (vertex(0)?, vertex(1)?);
                    Some([a, b, b])
                }
            }
        })
    }

    fn vertex(&self, slot: usize) -> Option<Vec3> {
        let index = match &self.indices {
            Some(indices) => *indices.get(slot)? as usize,
            None => slot,
        };
        self.positions.get(index).copied()
    }
}
