use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Card dimensions and arrangement parameters.
pub struct LayoutOptions {
    /// Card quad width in world units.
    #[schemars(skip)]
    pub card_width: f32,
    /// Card quad height in world units.
    #[schemars(skip)]
    pub card_height: f32,
    /// Gap between neighbouring grid cells.
    #[schemars(title = "Grid Margin", range(min = 0.0, max = 3.0), extend("step" = 0.1))]
    pub card_margin: f32,
    /// Radius of the sphere the cards are distributed on.
    #[schemars(title = "Sphere Radius", range(min = 2.0, max = 20.0), extend("step" = 0.5))]
    pub sphere_radius: f32,
}

impl LayoutOptions {
    /// Horizontal and vertical distance between grid cell centers.
    #[must_use]
    pub fn grid_spacing(&self) -> (f32, f32) {
        (
            self.card_width + self.card_margin,
            self.card_height + self.card_margin,
        )
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            card_width: 2.4,
            card_height: 1.8,
            card_margin: 0.6,
            sphere_radius: 8.0,
        }
    }
}
