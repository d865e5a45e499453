use std::sync::Arc;

use crate::error::SelectError;
use crate::scene::{Material, ObjectId, SceneGraph, UserData};

/// Metadata key carrying the original's id on stamped overlays.
pub(crate) const ORIGIN_ID_KEY: &str = "originID";

/// Clone `original` into a highlight overlay under the same parent.
///
/// The overlay root is flagged `selected`, every material in the copied
/// subtree is swapped for `material`, and with `stamp_origin` the root's
/// metadata gets an `originID` entry. The original subtree, its metadata
/// and its materials are left as they were.
pub(crate) fn spawn_overlay(
    scene: &mut SceneGraph,
    original: ObjectId,
    material: &Arc<Material>,
    stamp_origin: bool,
) -> Result<ObjectId, SelectError> {
    let parent = scene
        .get(original)
        .ok_or(SelectError::UnknownObject(original))?
        .parent();
    let overlay = scene.clone_subtree(original, parent)?;

    for id in scene.descendants(overlay) {
        if let Some(node) = scene.get_mut(id) {
            if node.material.is_some() {
                node.material = Some(Arc::clone(material));
            }
        }
    }

    if let Some(root) = scene.get_mut(overlay) {
        root.selected = true;
        if stamp_origin {
            let _ = root
                .user_data
                .get_or_insert_with(UserData::new)
                .insert(ORIGIN_ID_KEY.to_owned(), original.0.into());
        }
    }
    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::{Geometry, SceneObject};

    #[test]
    fn overlay_swaps_materials_in_whole_subtree() {
        let mut scene = SceneGraph::new();
        let paint = Arc::new(Material::from_hex(0xff0000));
        let root = scene.add(None, SceneObject::new("root")).unwrap();
        let block = scene
            .add(
                Some(root),
                SceneObject::new("block").with_material(Arc::clone(&paint)),
            )
            .unwrap();
        let _ = scene
            .add(
                Some(block),
                SceneObject::new("edge")
                    .with_geometry(Geometry::polyline(&[Vec3::ZERO, Vec3::X]))
                    .with_material(Arc::clone(&paint)),
            )
            .unwrap();
        let _ = scene.add(Some(block), SceneObject::new("bare")).unwrap();
        let highlight = Arc::new(Material::highlight(0x0000ff));

        let overlay =
            spawn_overlay(&mut scene, block, &highlight, false).unwrap();

        let copied = scene.descendants(overlay);
        assert_eq!(copied.len(), 3);
        for id in &copied[..2] {
            let m = scene.get(*id).unwrap().material.as_ref().unwrap();
            assert!(Arc::ptr_eq(m, &highlight));
        }
        assert!(scene.get(copied[2]).unwrap().material.is_none());
        for id in scene.descendants(block) {
            if let Some(m) = scene.get(id).unwrap().material.as_ref() {
                assert!(Arc::ptr_eq(m, &paint));
            }
        }
        assert!(scene.get(overlay).unwrap().selected);
        assert!(!scene.get(block).unwrap().selected);
    }

    #[test]
    fn stamp_writes_origin_id_on_overlay_root_only() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("root")).unwrap();
        let a = scene.add(Some(root), SceneObject::new("a")).unwrap();
        let highlight = Arc::new(Material::highlight(0x0000ff));

        let overlay = spawn_overlay(&mut scene, a, &highlight, true).unwrap();
        let meta = scene.get(overlay).unwrap().user_data.as_ref().unwrap();
        assert_eq!(meta[ORIGIN_ID_KEY], serde_json::json!(a.0));
        assert!(scene.get(a).unwrap().user_data.is_none());
    }

    #[test]
    fn root_original_gets_root_overlay() {
        let mut scene = SceneGraph::new();
        let lone = scene.add(None, SceneObject::new("lone")).unwrap();
        let highlight = Arc::new(Material::highlight(0x0000ff));
        let overlay =
            spawn_overlay(&mut scene, lone, &highlight, false).unwrap();
        assert_eq!(scene.get(overlay).unwrap().parent(), None);
        assert_eq!(scene.roots(), &[lone, overlay]);
    }
}
