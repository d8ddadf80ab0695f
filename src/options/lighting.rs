use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Ambient, point and directional light parameters.
pub struct LightingOptions {
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub ambient: f32,
    /// Point light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub point_intensity: f32,
    /// Point light color (linear RGB).
    #[schemars(skip)]
    pub point_color: [f32; 3],
    /// Point light world position.
    #[schemars(skip)]
    pub point_position: [f32; 3],
    /// Distance at which the point light falls off to zero.
    #[schemars(skip)]
    pub point_range: f32,
    /// Directional light intensity.
    #[schemars(title = "Fill Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub directional_intensity: f32,
    /// Directional light position (it shines toward the origin).
    #[schemars(skip)]
    pub directional_position: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.8,
            point_intensity: 1.2,
            point_color: [0.678, 0.847, 0.902],
            point_position: [10.0, 20.0, 20.0],
            point_range: 200.0,
            directional_intensity: 0.6,
            directional_position: [-15.0, 15.0, 10.0],
        }
    }
}
