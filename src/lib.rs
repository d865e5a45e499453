// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Test code may unwrap and panic freely
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

//! Interactive object selection for 3D scene viewers.
//!
//! Clicks pick the nearest object under the pointer; drags select every
//! named object whose bounds fit inside the dragged rectangle. Selected
//! objects are highlighted with overlay clones inserted next to them in
//! the scene graph, so the originals (their metadata and materials) are
//! never touched. Hosts observe changes through `select` / `deselect`
//! events.
//!
//! # Key entry points
//!
//! - [`selection::SelectionEngine`] - gesture handling and the selected set
//! - [`scene::SceneGraph`] - arena scene graph the engine selects from
//! - [`picking::RayPicker`] - pluggable hit-testing, with
//!   [`picking::MeshRaycaster`] as the CPU default
//! - [`options::SelectionOptions`] - highlight colour, drag threshold and
//!   picking parameters, loadable from TOML
//!
//! # Architecture
//!
//! Pointer events go through [`input::GestureTracker`], which tells a
//! click from a drag. Clicks are resolved with the engine's
//! [`picking::RayPicker`]; drags are unprojected through the
//! [`camera::Camera`] into a world-space box and matched by bounding-box
//! containment. With the `web` feature, `input::web` wires all of this
//! to a DOM container element.

pub mod camera;
pub mod error;
pub mod events;
pub mod input;
pub mod options;
pub mod picking;
pub mod scene;
pub mod selection;

pub use error::SelectError;
pub use selection::{
    Selection, SelectionEngine, SelectionEvent, SelectionEventKind,
};
