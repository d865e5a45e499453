use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use super::area::objects_in_volume;
use super::overlay::spawn_overlay;
use super::{Selection, SelectionEvent, SelectionEventKind};
use crate::camera::{Camera, REFERENCE_DEPTH};
use crate::error::SelectError;
use crate::events::{EventNotifier, ListenerId};
use crate::input::{
    DragRect, Gesture, GestureTracker, PointerEvent, Viewport,
};
use crate::options::SelectionOptions;
use crate::picking::{MeshRaycaster, RayPicker};
use crate::scene::{Aabb, Material, ObjectId, SceneGraph};

/// What the host should do after [`SelectionEngine::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerResponse {
    /// Suppress the platform's default action for the event (set after a
    /// click was resolved).
    pub prevent_default: bool,
    /// Selection box to draw while dragging; `None` means no box.
    pub drag: Option<DragRect>,
}

/// Pointer-driven selection over one subtree of a [`SceneGraph`].
///
/// The engine owns the selected set, the gesture state machine, the
/// highlight material and the event listeners. The scene graph is
/// borrowed per call, so the host keeps ownership of it.
///
/// # Example
///
/// ```ignore
/// let mut engine = SelectionEngine::new(
///     &scene,
///     Viewport::new(800.0, 600.0),
///     Camera::top_down(Vec3::ZERO, 50.0, 800.0 / 600.0),
///     drawing,
///     SelectionOptions::default(),
/// )?;
/// let _ = engine.on(SelectionEventKind::Select, |event| {
///     log::info!("selected: {event:?}");
///     Ok(())
/// });
/// engine.handle_event(&mut scene, pointer_event)?;
/// ```
pub struct SelectionEngine {
    viewport: Viewport,
    camera: Camera,
    root: ObjectId,
    picker: Box<dyn RayPicker>,
    pointer: Vec2,
    material: Arc<Material>,
    selected: Vec<Selection>,
    gesture: GestureTracker,
    events: EventNotifier<SelectionEventKind, SelectionEvent>,
    options: SelectionOptions,
}

impl fmt::Debug for SelectionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("viewport", &self.viewport)
            .field("root", &self.root)
            .field("pointer", &self.pointer)
            .field("selected", &self.selected)
            .field("gesture", &self.gesture.state())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl SelectionEngine {
    /// Engine over the subtree at `root`, picking with a
    /// [`MeshRaycaster`] snapshot of that subtree taken now.
    ///
    /// # Errors
    ///
    /// [`SelectError::UnknownObject`] if `root` is not in `scene`.
    pub fn new(
        scene: &SceneGraph,
        viewport: Viewport,
        camera: Camera,
        root: ObjectId,
        options: SelectionOptions,
    ) -> Result<Self, SelectError> {
        let picker = MeshRaycaster::from_scene(
            scene,
            root,
            options.picking.line_threshold,
        );
        Self::with_picker(
            scene,
            viewport,
            camera,
            root,
            options,
            Box::new(picker),
        )
    }

    /// Engine using a host-supplied hit-testing service.
    ///
    /// # Errors
    ///
    /// [`SelectError::UnknownObject`] if `root` is not in `scene`.
    pub fn with_picker(
        scene: &SceneGraph,
        viewport: Viewport,
        camera: Camera,
        root: ObjectId,
        options: SelectionOptions,
        picker: Box<dyn RayPicker>,
    ) -> Result<Self, SelectError> {
        if !scene.contains(root) {
            return Err(SelectError::UnknownObject(root));
        }
        let material = Arc::new(options.highlight.material());
        let gesture = GestureTracker::new(options.gesture.drag_threshold);
        log::debug!(
            "selection engine over {root} ({}x{} viewport)",
            viewport.width,
            viewport.height
        );
        Ok(Self {
            viewport,
            camera,
            root,
            picker,
            pointer: Vec2::ZERO,
            material,
            selected: Vec::new(),
            gesture,
            events: EventNotifier::new(),
            options,
        })
    }

    // -- Listeners --

    /// Register a handler for `select` or `deselect` events.
    pub fn on(
        &mut self,
        kind: SelectionEventKind,
        handler: impl FnMut(&SelectionEvent) -> Result<(), SelectError>
            + 'static,
    ) -> ListenerId {
        self.events.on(kind, handler)
    }

    /// Unregister a handler. Returns `false` if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    // -- Accessors --

    /// Selected set in selection order.
    #[must_use]
    pub fn selected(&self) -> &[Selection] {
        &self.selected
    }

    /// Whether `original` has an overlay in the selected set.
    #[must_use]
    pub fn is_selected(&self, original: ObjectId) -> bool {
        self.selected.iter().any(|s| s.origin == original)
    }

    /// Last click position in normalized device coordinates.
    #[must_use]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Default highlight material shared by every overlay.
    #[must_use]
    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Subtree the engine selects from.
    #[must_use]
    pub fn root(&self) -> ObjectId {
        self.root
    }

    /// Camera used for picking and area unprojection.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replace the camera (after the host moved or resized it).
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Pointer-event surface bounds.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replace the viewport (after the container moved or resized).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    /// Gesture state machine, for hosts that draw their own feedback.
    #[must_use]
    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    /// Current drag rectangle, container-relative, while dragging.
    #[must_use]
    pub fn drag_rect(&self) -> Option<DragRect> {
        self.gesture.drag_rect()
    }

    /// Re-snapshot the pickable objects under the root with the built-in
    /// [`MeshRaycaster`], replacing any host-supplied picker.
    pub fn rebuild_picker(&mut self, scene: &SceneGraph) {
        self.picker = Box::new(MeshRaycaster::from_scene(
            scene,
            self.root,
            self.options.picking.line_threshold,
        ));
    }

    // -- Pointer input --

    /// Feed one pointer event through the gesture state machine and apply
    /// the resulting click or area selection.
    ///
    /// # Errors
    ///
    /// Listener failures from the resulting `select` / `deselect` events.
    /// The selected set is already updated when they are reported.
    pub fn handle_event(
        &mut self,
        scene: &mut SceneGraph,
        event: PointerEvent,
    ) -> Result<PointerResponse, SelectError> {
        let local = self.viewport.to_local(event.position());
        match event {
            PointerEvent::Down { button, ctrl, .. } => {
                self.gesture.pointer_down(button, local, ctrl);
                Ok(PointerResponse::default())
            }
            PointerEvent::Move { .. } => {
                let _ = self.gesture.pointer_move(local);
                Ok(PointerResponse {
                    prevent_default: false,
                    drag: self.gesture.drag_rect(),
                })
            }
            PointerEvent::Up { button, .. } => {
                match self.gesture.pointer_up(button, local) {
                    Gesture::None => Ok(PointerResponse::default()),
                    Gesture::Click { position, extend } => {
                        self.click_select(scene, position, extend)?;
                        Ok(PointerResponse {
                            prevent_default: true,
                            drag: None,
                        })
                    }
                    Gesture::Area { rect, extend } => {
                        self.area_select(scene, rect, extend)?;
                        Ok(PointerResponse::default())
                    }
                }
            }
        }
    }

    /// Whether `event` is the release that completes a click. Checked
    /// before [`Self::handle_event`] so callers can react to the click even
    /// when a listener fails.
    #[must_use]
    pub fn click_pending(&self, event: &PointerEvent) -> bool {
        matches!(
            *event,
            PointerEvent::Up { button, .. } if self.gesture.would_click(button)
        )
    }

    /// Click at container-relative `position`.
    ///
    /// Without `extend` the selection is cleared first. The nearest hit is
    /// then toggled when `extend` is set and it is already selected, and
    /// added otherwise. A hit on an object missing from `scene` counts as
    /// a miss. A `select` event with the full set is always emitted, even
    /// when nothing was hit.
    ///
    /// # Errors
    ///
    /// The first listener failure; every step still runs.
    pub fn click_select(
        &mut self,
        scene: &mut SceneGraph,
        position: Vec2,
        extend: bool,
    ) -> Result<(), SelectError> {
        let mut outcome = Ok(());
        if !extend {
            outcome = outcome.and(self.deselect_all(scene));
        }

        self.pointer = self.viewport.to_ndc(position);
        let hit = self
            .picker
            .raycast(scene, &self.camera, self.pointer)
            .filter(|hit| {
                let known = scene.contains(hit.object);
                if !known {
                    log::warn!("picker returned unknown object {}", hit.object);
                }
                known
            });
        if let Some(hit) = hit {
            if extend && self.is_selected(hit.object) {
                let toggled = self.deselect(scene, hit.object).map(|_| ());
                outcome = outcome.and(toggled);
            } else {
                outcome = outcome.and(self.select(scene, &[hit.object], None));
            }
        }
        log::debug!("click at {position} hit {:?}", hit.map(|h| h.object));

        outcome.and(self.emit_select())
    }

    /// Drag release over `rect`.
    ///
    /// Without `extend` the selection is cleared first. Every matched
    /// object that is not already selected is then added, and a `select`
    /// event with the full set is emitted.
    ///
    /// # Errors
    ///
    /// The first listener failure; every step still runs.
    pub fn area_select(
        &mut self,
        scene: &mut SceneGraph,
        rect: DragRect,
        extend: bool,
    ) -> Result<(), SelectError> {
        let matched = self
            .objects_in_rect(scene, rect.start, rect.end)
            .unwrap_or_default();
        let mut outcome = Ok(());
        if !extend {
            outcome = outcome.and(self.deselect_all(scene));
        }
        let fresh: Vec<ObjectId> = matched
            .into_iter()
            .filter(|&id| !self.is_selected(id))
            .collect();
        log::debug!(
            "area {}..{} matched {} new object(s)",
            rect.min(),
            rect.max(),
            fresh.len()
        );
        outcome = outcome.and(self.select(scene, &fresh, None));

        outcome.and(self.emit_select())
    }

    /// Objects whose world bounds lie inside the volume spanned by the
    /// container-relative screen points `start` and `end`, or `None` when
    /// nothing matches.
    ///
    /// Both points are unprojected at [`REFERENCE_DEPTH`]. With
    /// `picking.area_plane_z` set, the volume is flattened onto that plane.
    #[must_use]
    pub fn objects_in_rect(
        &self,
        scene: &SceneGraph,
        start: Vec2,
        end: Vec2,
    ) -> Option<Vec<ObjectId>> {
        let lift = |p: Vec2| {
            let ndc = self.viewport.to_ndc(p);
            self.camera.unproject(ndc.extend(REFERENCE_DEPTH))
        };
        let mut volume = Aabb::from_corners(lift(start), lift(end));
        if let Some(z) = self.options.picking.area_plane_z {
            volume.min.z = z;
            volume.max.z = z;
        }
        let matched = objects_in_volume(scene, self.root, &volume);
        (!matched.is_empty()).then_some(matched)
    }

    // -- Selection set --

    /// Add an overlay for each of `targets`, in order, highlighted with
    /// `material` or the engine's default. Emits nothing.
    ///
    /// Selecting an already selected object adds a second overlay; click
    /// and area selection never do that.
    ///
    /// # Errors
    ///
    /// [`SelectError::UnknownObject`] if any target is missing, in which
    /// case nothing is selected.
    pub fn select(
        &mut self,
        scene: &mut SceneGraph,
        targets: &[ObjectId],
        material: Option<Arc<Material>>,
    ) -> Result<(), SelectError> {
        if let Some(&missing) =
            targets.iter().find(|&&id| !scene.contains(id))
        {
            return Err(SelectError::UnknownObject(missing));
        }
        let material = material.unwrap_or_else(|| Arc::clone(&self.material));
        let stamp = self.options.origin_id.stamps_now();
        for &origin in targets {
            let overlay = spawn_overlay(scene, origin, &material, stamp)?;
            self.selected.push(Selection { overlay, origin });
        }
        if !targets.is_empty() {
            log::debug!(
                "selected {} object(s), {} total",
                targets.len(),
                self.selected.len()
            );
        }
        Ok(())
    }

    /// Remove the first overlay of `original` and emit `deselect` with its
    /// id. Returns `Ok(false)` without emitting when it was not selected.
    ///
    /// # Errors
    ///
    /// A `deselect` listener failure, reported after the overlay is gone.
    pub fn deselect(
        &mut self,
        scene: &mut SceneGraph,
        original: ObjectId,
    ) -> Result<bool, SelectError> {
        let Some(index) =
            self.selected.iter().position(|s| s.origin == original)
        else {
            return Ok(false);
        };
        let entry = self.selected.remove(index);
        let _ = scene.remove(entry.overlay);
        log::debug!("deselected {original}");
        self.emit(&SelectionEvent::Deselect(vec![original]))?;
        Ok(true)
    }

    /// Remove every overlay and emit `deselect` with an empty list. The
    /// event fires even when nothing was selected.
    ///
    /// # Errors
    ///
    /// A `deselect` listener failure, reported after the set is cleared.
    pub fn deselect_all(
        &mut self,
        scene: &mut SceneGraph,
    ) -> Result<(), SelectError> {
        for entry in self.selected.drain(..) {
            let _ = scene.remove(entry.overlay);
        }
        self.emit(&SelectionEvent::Deselect(Vec::new()))
    }

    fn emit_select(&mut self) -> Result<(), SelectError> {
        let event = SelectionEvent::Select(self.selected.clone());
        self.emit(&event)
    }

    fn emit(&mut self, event: &SelectionEvent) -> Result<(), SelectError> {
        self.events.trigger(event.kind(), event)
    }
}
