use crate::scene::{Aabb, ObjectId, SceneGraph};

/// Objects at or under `root` whose world bounds lie entirely inside
/// `volume`.
///
/// The walk starts at `root` itself. A named node whose subtree bounds
/// fit is an atomic match and its children are not visited; unnamed nodes
/// and named nodes that do not fit are descended into. Overlay subtrees
/// (nodes flagged `selected`) are skipped. Results come in traversal
/// order.
#[must_use]
pub fn objects_in_volume(
    scene: &SceneGraph,
    root: ObjectId,
    volume: &Aabb,
) -> Vec<ObjectId> {
    let mut matched = Vec::new();
    collect(scene, root, volume, &mut matched);
    matched
}

fn collect(
    scene: &SceneGraph,
    id: ObjectId,
    volume: &Aabb,
    matched: &mut Vec<ObjectId>,
) {
    let Some(node) = scene.get(id) else {
        return;
    };
    if node.selected {
        return;
    }
    // no geometry anywhere below: nothing can match
    let Some(bounds) = scene.bounding_box_of(id) else {
        return;
    };
    if !node.name.is_empty() && volume.contains_box(&bounds) {
        matched.push(id);
        return;
    }
    for &child in node.children() {
        collect(scene, child, volume, matched);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::scene::{Geometry, SceneObject};

    fn tile(name: &str, x: f32, y: f32) -> SceneObject {
        SceneObject::new(name).with_geometry(Geometry::quad(
            Vec3::new(x, y, 0.0),
            Vec3::new(x + 1.0, y + 1.0, 0.0),
        ))
    }

    fn flat(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Aabb {
        Aabb::from_corners(
            Vec3::new(min_x, min_y, 0.0),
            Vec3::new(max_x, max_y, 0.0),
        )
    }

    #[test]
    fn named_block_matches_as_a_whole() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("")).unwrap();
        let block = scene.add(Some(root), SceneObject::new("block")).unwrap();
        let _ = scene.add(Some(block), tile("part-a", 0.0, 0.0)).unwrap();
        let _ = scene.add(Some(block), tile("part-b", 2.0, 0.0)).unwrap();

        let hits = objects_in_volume(&scene, root, &flat(-1.0, -1.0, 4.0, 2.0));
        assert_eq!(hits, vec![block]);
    }

    #[test]
    fn partial_overlap_descends_into_children() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("")).unwrap();
        let block = scene.add(Some(root), SceneObject::new("block")).unwrap();
        let inside = scene.add(Some(block), tile("inside", 0.0, 0.0)).unwrap();
        let _ = scene.add(Some(block), tile("outside", 9.0, 0.0)).unwrap();

        let hits = objects_in_volume(&scene, root, &flat(-1.0, -1.0, 2.0, 2.0));
        assert_eq!(hits, vec![inside]);
    }

    #[test]
    fn unnamed_nodes_are_never_matched_directly() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("")).unwrap();
        let group = scene.add(Some(root), SceneObject::new("")).unwrap();
        let a = scene.add(Some(group), tile("a", 0.0, 0.0)).unwrap();
        let b = scene.add(Some(group), tile("b", 2.0, 0.0)).unwrap();

        let hits = objects_in_volume(&scene, root, &flat(-1.0, -1.0, 4.0, 2.0));
        assert_eq!(hits, vec![a, b]);
    }

    #[test]
    fn geometry_free_nodes_and_overlays_are_skipped() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("")).unwrap();
        let _ = scene.add(Some(root), SceneObject::new("empty")).unwrap();
        let mut overlay = tile("overlay", 0.0, 0.0);
        overlay.selected = true;
        let _ = scene.add(Some(root), overlay).unwrap();

        let hits = objects_in_volume(&scene, root, &flat(-5.0, -5.0, 5.0, 5.0));
        assert!(hits.is_empty());
    }

    #[test]
    fn containment_uses_world_bounds() {
        let mut scene = SceneGraph::new();
        let root = scene
            .add(
                None,
                SceneObject::new("")
                    .with_transform(Mat4::from_translation(Vec3::X * 10.0)),
            )
            .unwrap();
        let a = scene.add(Some(root), tile("a", 0.0, 0.0)).unwrap();

        assert!(objects_in_volume(&scene, root, &flat(-1.0, -1.0, 2.0, 2.0))
            .is_empty());
        let hits =
            objects_in_volume(&scene, root, &flat(9.0, -1.0, 12.0, 2.0));
        assert_eq!(hits, vec![a]);
    }

    #[test]
    fn named_root_that_fits_matches_as_a_whole() {
        let mut scene = SceneGraph::new();
        let root = scene.add(None, SceneObject::new("drawing")).unwrap();
        let _ = scene.add(Some(root), tile("a", 0.0, 0.0)).unwrap();
        let _ = scene.add(Some(root), tile("b", 2.0, 0.0)).unwrap();

        let hits = objects_in_volume(&scene, root, &flat(-1.0, -1.0, 4.0, 2.0));
        assert_eq!(hits, vec![root]);
    }
}
