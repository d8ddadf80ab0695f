//! Camera system for the card scene.
//!
//! Provides a perspective camera, spherical-coordinate poses around a
//! look-at target, and the pointer-driven orbit controller.

/// Core camera struct and render snapshot.
pub mod core;
/// Pointer-driven orbit controller.
pub mod orbit;
/// Spherical coordinates and camera poses.
pub mod spherical;

pub use self::core::{Camera, CameraSnapshot};
pub use orbit::{OrbitController, ZoomBand};
pub use spherical::{CameraPose, Spherical};
