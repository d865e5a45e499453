//! Camera model used to turn screen positions into world-space rays and
//! points.

/// Core camera struct, projection variants and picking rays.
pub mod core;

pub use self::core::{Camera, Projection, Ray, REFERENCE_DEPTH};
