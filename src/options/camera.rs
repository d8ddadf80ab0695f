use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, canonical poses and focus distances.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 110.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Orbit radius of the canonical sphere-mode pose.
    #[schemars(title = "Sphere View Distance", range(min = 5.0, max = 40.0), extend("step" = 0.5))]
    pub sphere_radius: f32,
    /// Distance from a focused card in sphere mode.
    #[schemars(title = "Sphere Focus Distance", range(min = 1.0, max = 10.0), extend("step" = 0.1))]
    pub sphere_focus_distance: f32,
    /// Distance from a focused card in grid mode, in card widths.
    #[schemars(title = "Grid Focus Distance", range(min = 1.0, max = 5.0), extend("step" = 0.1))]
    pub grid_focus_widths: f32,
    /// Grid-mode camera distance: `max(extent, min_extent) * scale + offset`.
    #[schemars(skip)]
    pub grid_min_extent: f32,
    /// Multiplier applied to the grid footprint.
    #[schemars(skip)]
    pub grid_extent_scale: f32,
    /// Constant added to the scaled grid footprint.
    #[schemars(skip)]
    pub grid_extent_offset: f32,
    /// Grid-mode camera distance used when there are no cards.
    #[schemars(skip)]
    pub grid_empty_radius: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            sphere_radius: 15.0,
            sphere_focus_distance: 3.5,
            grid_focus_widths: 2.0,
            grid_min_extent: 6.0,
            grid_extent_scale: 1.2,
            grid_extent_offset: 8.0,
            grid_empty_radius: 10.0,
        }
    }
}
