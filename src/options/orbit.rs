use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit", inline)]
#[serde(default)]
/// Pointer sensitivity and zoom limits of the orbit camera.
pub struct OrbitOptions {
    /// Radians of rotation per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// World units of zoom per wheel delta unit.
    #[schemars(title = "Zoom Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub zoom_speed: f32,
    /// Polar angle is kept this far away from both poles.
    #[schemars(skip)]
    pub polar_margin: f32,
    /// Closest zoom in sphere mode.
    #[schemars(skip)]
    pub sphere_min_radius: f32,
    /// Farthest zoom in sphere mode.
    #[schemars(skip)]
    pub sphere_max_radius: f32,
    /// Closest zoom in grid mode, as a fraction of the grid camera radius.
    #[schemars(skip)]
    pub grid_min_factor: f32,
    /// Farthest zoom in grid mode, as a multiple of the grid camera radius.
    #[schemars(skip)]
    pub grid_max_factor: f32,
    /// Pointer travel (pixels) after which a press counts as a drag.
    #[schemars(skip)]
    pub drag_threshold: f32,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_speed: 0.008,
            polar_margin: 0.05,
            sphere_min_radius: 2.5,
            sphere_max_radius: 30.0,
            grid_min_factor: 0.4,
            grid_max_factor: 2.5,
            drag_threshold: 3.0,
        }
    }
}
