use std::fmt;
use std::sync::Arc;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use super::geometry::Geometry;
use super::material::Material;

/// Arbitrary per-object metadata (drawing layer, handle, block name, ...).
pub type UserData = serde_json::Map<String, serde_json::Value>;

/// Stable identity of a node in a [`SceneGraph`](super::SceneGraph).
///
/// Ids are allocated by the graph and never reused, so a removed overlay's
/// id can not alias a later object.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the scene graph.
///
/// Objects are built detached with the `with_*` helpers and then handed
/// to [`SceneGraph::add`](super::SceneGraph::add), which assigns the id
/// and links the parent.
#[derive(Debug, Clone, Default)]
pub struct SceneObject {
    pub(super) id: ObjectId,
    pub(super) parent: Option<ObjectId>,
    pub(super) children: Vec<ObjectId>,
    /// Node name. Named nodes are the atomic units of area selection.
    pub name: String,
    /// Transform relative to the parent.
    pub transform: Mat4,
    /// Shared vertex data, if this node renders anything.
    pub geometry: Option<Arc<Geometry>>,
    /// Shared material reference.
    pub material: Option<Arc<Material>>,
    /// Free-form metadata. Never copied onto overlays.
    pub user_data: Option<UserData>,
    /// Set on selection overlays.
    pub selected: bool,
    /// Hidden objects are skipped by ray picking.
    pub visible: bool,
}

impl SceneObject {
    /// New visible, empty node with an identity transform.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            visible: true,
            ..Self::default()
        }
    }

    /// Attach geometry.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(Arc::new(geometry));
        self
    }

    /// Attach a material.
    #[must_use]
    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    /// Set the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    /// Attach metadata.
    #[must_use]
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = Some(user_data);
        self
    }

    /// Id assigned by the owning graph.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Parent node, `None` for scene roots.
    #[must_use]
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }
}
