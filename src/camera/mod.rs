//! Camera system for 3D scene viewing.
//!
//! Provides an orbital camera with damped rotation, panning and zoom,
//! fit-to-bounds framing and frustum extraction for pick culling.

/// Orbit camera controller driven by drags, wheel and fit requests.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Camera distance needed to frame a bounding volume.
pub mod fit;
/// View frustum extraction and containment tests.
pub mod frustum;
/// Spherical orbit state with goal/current damping.
pub mod orbit;

pub use controller::OrbitController;
pub use self::core::{Camera, CameraUniform};
