//! Browser bindings: DOM pointer events, container bounds and the drag
//! rectangle drawn while area-selecting.
//!
//! [`bind_container`] is the one-call setup for a page: it listens for
//! pointer events on the container element, keeps the engine's viewport
//! in sync with the element's layout, and shows the selection box while
//! dragging.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use super::event::{MouseButton, PointerEvent, Viewport};
use super::gesture::DragRect;
use crate::scene::SceneGraph;
use crate::selection::SelectionEngine;

const POINTER_EVENTS: [&str; 3] = ["pointerdown", "pointermove", "pointerup"];

const BOX_STYLE: [(&str, &str); 5] = [
    ("position", "absolute"),
    ("border", "1px solid #ffffff"),
    ("background-color", "blue"),
    ("opacity", "0.25"),
    ("pointer-events", "none"),
];

/// Route `log` output to the browser console and panics to
/// `console.error`. Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}

impl Viewport {
    /// Current layout bounds of `element` (`getBoundingClientRect`).
    #[must_use]
    pub fn from_element(element: &Element) -> Self {
        let rect = element.get_bounding_client_rect();
        Self {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }
}

impl PointerEvent {
    /// Convert a DOM `pointerdown` / `pointermove` / `pointerup` event.
    /// Other event types give `None`.
    #[must_use]
    pub fn from_dom(event: &web_sys::PointerEvent) -> Option<Self> {
        let x = event.client_x() as f32;
        let y = event.client_y() as f32;
        let button = MouseButton::from_dom(event.button());
        match event.type_().as_str() {
            "pointerdown" => Some(Self::Down {
                button,
                x,
                y,
                ctrl: event.ctrl_key(),
            }),
            "pointermove" => Some(Self::Move { x, y }),
            "pointerup" => Some(Self::Up { button, x, y }),
            _ => None,
        }
    }
}

/// Translucent rectangle shown under `document.body` while dragging.
#[derive(Debug)]
pub struct SelectionBoxOverlay {
    document: Document,
    element: Option<HtmlElement>,
}

impl SelectionBoxOverlay {
    /// Overlay for `document`; nothing is inserted until the first
    /// [`update`](Self::update) with a rectangle.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            element: None,
        }
    }

    /// Whether the box is currently in the page.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.element.is_some()
    }

    /// Show the box over `rect` (container-relative, positioned through
    /// `viewport`), or remove it when `rect` is `None`.
    ///
    /// # Errors
    ///
    /// DOM failures while creating or styling the element.
    pub fn update(
        &mut self,
        rect: Option<DragRect>,
        viewport: &Viewport,
    ) -> Result<(), JsValue> {
        let Some(rect) = rect else {
            self.hide();
            return Ok(());
        };
        let element = match &self.element {
            Some(element) => element.clone(),
            None => self.create()?,
        };
        let (left, top, width, height) = rect.client_box(viewport);
        let style = element.style();
        style.set_property("left", &format!("{left}px"))?;
        style.set_property("top", &format!("{top}px"))?;
        style.set_property("width", &format!("{width}px"))?;
        style.set_property("height", &format!("{height}px"))?;
        Ok(())
    }

    /// Remove the box from the page, if shown.
    pub fn hide(&mut self) {
        if let Some(element) = self.element.take() {
            element.remove();
        }
    }

    fn create(&mut self) -> Result<HtmlElement, JsValue> {
        let element: HtmlElement = self
            .document
            .create_element("div")?
            .dyn_into()
            .map_err(JsValue::from)?;
        let style = element.style();
        for (name, value) in BOX_STYLE {
            style.set_property(name, value)?;
        }
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        let _ = body.append_child(&element)?;
        self.element = Some(element.clone());
        Ok(element)
    }
}

impl Drop for SelectionBoxOverlay {
    fn drop(&mut self) {
        self.hide();
    }
}

/// Pointer listeners installed by [`bind_container`]. Dropping the
/// binding removes them; [`forget`](Self::forget) keeps them for the
/// lifetime of the page.
pub struct ContainerBinding {
    target: Element,
    handler: Option<Closure<dyn FnMut(web_sys::PointerEvent)>>,
}

impl ContainerBinding {
    /// Leave the listeners installed and release the Rust side.
    pub fn forget(mut self) {
        if let Some(handler) = self.handler.take() {
            handler.forget();
        }
    }
}

impl Drop for ContainerBinding {
    fn drop(&mut self) {
        let Some(handler) = self.handler.take() else {
            return;
        };
        for kind in POINTER_EVENTS {
            if let Err(e) = self.target.remove_event_listener_with_callback(
                kind,
                handler.as_ref().unchecked_ref(),
            ) {
                log::warn!("failed to remove {kind} listener: {e:?}");
            }
        }
    }
}

/// Wire pointer events on `container` to `engine`.
///
/// The viewport is refreshed from the container's layout on every event,
/// qualifying clicks get `preventDefault()`, and the drag rectangle is
/// drawn with a [`SelectionBoxOverlay`]. Engine errors (listener
/// failures) are logged. Selection listeners must not borrow `engine` or
/// `scene` themselves: both are mutably borrowed while events are
/// delivered.
///
/// # Errors
///
/// Fails when the container is detached from a document or a listener
/// can not be installed.
pub fn bind_container(
    container: &Element,
    engine: Rc<RefCell<SelectionEngine>>,
    scene: Rc<RefCell<SceneGraph>>,
) -> Result<ContainerBinding, JsValue> {
    let document = container.owner_document().ok_or_else(|| {
        JsValue::from_str("container is not attached to a document")
    })?;
    let mut overlay = SelectionBoxOverlay::new(document);
    let target = container.clone();

    let handler = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(
        move |event: web_sys::PointerEvent| {
            let Some(pointer) = PointerEvent::from_dom(&event) else {
                return;
            };
            let viewport = Viewport::from_element(&target);
            let mut engine = engine.borrow_mut();
            engine.set_viewport(viewport);

            // a click suppresses the default action even if a listener fails
            let clicking = engine.click_pending(&pointer);
            let outcome =
                engine.handle_event(&mut scene.borrow_mut(), pointer);
            if let Err(e) = overlay.update(engine.drag_rect(), &viewport) {
                log::warn!("selection box update failed: {e:?}");
            }
            let prevent = match outcome {
                Ok(response) => response.prevent_default,
                Err(e) => {
                    log::warn!("pointer handling failed: {e}");
                    clicking
                }
            };
            if prevent {
                event.prevent_default();
            }
        },
    );

    for kind in POINTER_EVENTS {
        container.add_event_listener_with_callback(
            kind,
            handler.as_ref().unchecked_ref(),
        )?;
    }
    log::debug!("selection bound to container");
    Ok(ContainerBinding {
        target: container.clone(),
        handler: Some(handler),
    })
}
