//! Arena scene graph holding the objects that can be picked and
//! highlighted.
//!
//! Objects live in a flat id-keyed map; hierarchy is expressed through
//! parent/children id links. The graph owns every object, so callers (the
//! selection engine included) only ever hold [`ObjectId`]s.

/// Axis-aligned bounding boxes.
pub mod bounds;
/// Vertex geometry and primitive topology.
pub mod geometry;
/// Flat-colour materials.
pub mod material;
mod object;

use glam::Mat4;
use rustc_hash::FxHashMap;

pub use bounds::Aabb;
pub use geometry::{Geometry, Topology};
pub use material::Material;
pub use object::{ObjectId, SceneObject, UserData};

use crate::error::SelectError;

/// Owns every [`SceneObject`] and the links between them.
#[derive(Debug, Default)]
pub struct SceneGraph {
    objects: FxHashMap<ObjectId, SceneObject>,
    roots: Vec<ObjectId>,
    next_id: u64,
}

impl SceneGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the graph has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Top-level objects in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Whether `id` refers to a live object.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Look up an object.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Look up an object mutably.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Insert `object` under `parent` (or as a root) and return its id.
    ///
    /// # Errors
    ///
    /// [`SelectError::UnknownObject`] if `parent` is not in the graph.
    pub fn add(
        &mut self,
        parent: Option<ObjectId>,
        mut object: SceneObject,
    ) -> Result<ObjectId, SelectError> {
        match parent {
            Some(parent_id) => {
                let id = self.allocate_id();
                self.objects
                    .get_mut(&parent_id)
                    .ok_or(SelectError::UnknownObject(parent_id))?
                    .children
                    .push(id);
                object.id = id;
                object.parent = Some(parent_id);
                object.children.clear();
                let _ = self.objects.insert(id, object);
                Ok(id)
            }
            None => {
                let id = self.allocate_id();
                object.id = id;
                object.parent = None;
                object.children.clear();
                self.roots.push(id);
                let _ = self.objects.insert(id, object);
                Ok(id)
            }
        }
    }

    /// Detach `id` from its parent and drop it together with its whole
    /// subtree. Returns the removed object, or `None` if it was unknown.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let parent = self.objects.get(&id)?.parent;
        match parent.and_then(|p| self.objects.get_mut(&p)) {
            Some(parent_obj) => parent_obj.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }

        let subtree = self.descendants(id);
        let mut removed = None;
        for node in subtree {
            let obj = self.objects.remove(&node);
            if node == id {
                removed = obj;
            }
        }
        removed
    }

    /// Visit `root` and every descendant depth-first, parents before
    /// children, children in order. Unknown roots visit nothing.
    pub fn traverse(
        &self,
        root: ObjectId,
        mut visitor: impl FnMut(&SceneObject),
    ) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(obj) = self.objects.get(&id) else {
                continue;
            };
            visitor(obj);
            stack.extend(obj.children.iter().rev());
        }
    }

    /// Ids of `root` and all of its descendants, in traversal order.
    #[must_use]
    pub fn descendants(&self, root: ObjectId) -> Vec<ObjectId> {
        let mut ids = Vec::new();
        self.traverse(root, |obj| ids.push(obj.id));
        ids
    }

    /// Object-to-world transform (product of all ancestor transforms).
    #[must_use]
    pub fn world_transform(&self, id: ObjectId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(obj) = self.objects.get(&current) else {
                break;
            };
            matrix = obj.transform * matrix;
            cursor = obj.parent;
        }
        matrix
    }

    /// World-space bounds of every geometry in the subtree rooted at `id`.
    /// `None` when the subtree carries no geometry.
    #[must_use]
    pub fn bounding_box_of(&self, id: ObjectId) -> Option<Aabb> {
        let parent_world = self
            .objects
            .get(&id)?
            .parent
            .map_or(Mat4::IDENTITY, |p| self.world_transform(p));
        self.subtree_bounds(id, parent_world)
    }

    fn subtree_bounds(&self, id: ObjectId, parent_world: Mat4) -> Option<Aabb> {
        let obj = self.objects.get(&id)?;
        let world = parent_world * obj.transform;
        let own = obj
            .geometry
            .as_ref()
            .and_then(|g| g.bounding_box())
            .map(|b| b.transform(&world));
        obj.children
            .iter()
            .filter_map(|&child| self.subtree_bounds(child, world))
            .fold(own, |acc, b| match acc {
                Some(a) => Some(a.merge(&b)),
                None => Some(b),
            })
    }

    /// Copy the subtree rooted at `id` and attach the copy to `parent`.
    ///
    /// Names, transforms, geometry, materials and visibility are copied;
    /// metadata is not. Every copied node gets a fresh id. The source
    /// subtree is left untouched.
    ///
    /// # Errors
    ///
    /// [`SelectError::UnknownObject`] if `id` or `parent` is not in the
    /// graph.
    pub fn clone_subtree(
        &mut self,
        id: ObjectId,
        parent: Option<ObjectId>,
    ) -> Result<ObjectId, SelectError> {
        let source = self
            .objects
            .get(&id)
            .ok_or(SelectError::UnknownObject(id))?;
        let copy = SceneObject {
            name: source.name.clone(),
            transform: source.transform,
            geometry: source.geometry.clone(),
            material: source.material.clone(),
            user_data: None,
            selected: source.selected,
            visible: source.visible,
            ..SceneObject::default()
        };
        let children = source.children.clone();

        let copy_id = self.add(parent, copy)?;
        for child in children {
            let _ = self.clone_subtree(child, Some(copy_id))?;
        }
        Ok(copy_id)
    }

    fn allocate_id(&mut self) -> ObjectId {
        self.next_id += 1;
        ObjectId(self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use serde_json::json;

    use super::*;

    fn square(name: &str, x: f32) -> SceneObject {
        SceneObject::new(name).with_geometry(Geometry::quad(
            Vec3::new(x, 0.0, 0.0),
            Vec3::new(x + 1.0, 1.0, 0.0),
        ))
    }

    #[test]
    fn add_links_parent_and_children() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("root")).unwrap();
        let a = scene.add(Some(root), square("a", 0.0)).unwrap();
        let b = scene.add(Some(root), square("b", 2.0)).unwrap();

        assert_eq!(scene.roots(), &[root]);
        assert_eq!(scene.get(root).unwrap().children(), &[a, b]);
        assert_eq!(scene.get(b).unwrap().parent(), Some(root));
        assert_eq!(scene.descendants(root), vec![root, a, b]);
    }

    #[test]
    fn add_under_unknown_parent_fails() {
        let mut scene = SceneGraph::new();
        let err = scene.add(Some(ObjectId(42)), SceneObject::new("x"));
        assert!(matches!(err, Err(SelectError::UnknownObject(ObjectId(42)))));
        assert!(scene.is_empty());
    }

    #[test]
    fn remove_drops_whole_subtree() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("root")).unwrap();
        let group = scene.add(Some(root), SceneObject::new("group")).unwrap();
        let leaf = scene.add(Some(group), square("leaf", 0.0)).unwrap();

        let removed = scene.remove(group).unwrap();
        assert_eq!(removed.name, "group");
        assert!(!scene.contains(leaf));
        assert!(scene.get(root).unwrap().children().is_empty());
        assert!(scene.remove(group).is_none());
    }

    #[test]
    fn bounding_box_follows_ancestor_transforms() {
        let mut scene = SceneGraph::new();
        let root = scene
            .add(
                None,
                SceneObject::new("root").with_transform(Mat4::from_translation(
                    Vec3::new(10.0, 0.0, 0.0),
                )),
            )
            .unwrap();
        let a = scene.add(Some(root), square("a", 0.0)).unwrap();
        let _ = scene.add(Some(root), square("b", 2.0)).unwrap();

        let leaf = scene.bounding_box_of(a).unwrap();
        assert_eq!(leaf.min, Vec3::new(10.0, 0.0, 0.0));
        let all = scene.bounding_box_of(root).unwrap();
        assert_eq!(all.max, Vec3::new(13.0, 1.0, 0.0));
    }

    #[test]
    fn empty_group_has_no_bounds() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("root")).unwrap();
        assert!(scene.bounding_box_of(root).is_none());
    }

    #[test]
    fn clone_subtree_copies_hierarchy_but_not_metadata() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("root")).unwrap();
        let meta = json!({ "layer": "walls", "handle": "1F" });
        let block = scene
            .add(
                Some(root),
                SceneObject::new("block")
                    .with_user_data(meta.as_object().unwrap().clone()),
            )
            .unwrap();
        let _ = scene.add(Some(block), square("line", 0.0)).unwrap();

        let copy = scene.clone_subtree(block, Some(root)).unwrap();

        assert_ne!(copy, block);
        let copied = scene.get(copy).unwrap();
        assert_eq!(copied.name, "block");
        assert!(copied.user_data.is_none());
        assert_eq!(copied.children().len(), 1);
        assert_eq!(
            scene.get(block).unwrap().user_data.as_ref(),
            meta.as_object()
        );
        assert_eq!(scene.get(root).unwrap().children().len(), 2);
    }
}
