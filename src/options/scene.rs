use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Background and decorative particle field.
pub struct SceneOptions {
    /// Clear color (linear RGB).
    #[schemars(skip)]
    pub background: [f32; 3],
    /// Number of decorative particles.
    #[schemars(title = "Particles", range(min = 0, max = 10000), extend("step" = 100))]
    pub particle_count: u32,
    /// Edge length of the cube the particles are scattered in.
    #[schemars(skip)]
    pub particle_extent: f32,
    /// Point size of a particle.
    #[schemars(skip)]
    pub particle_size: f32,
    /// Base particle color (linear RGB).
    #[schemars(skip)]
    pub particle_color: [f32; 3],
    /// Per-particle brightness jitter (± this fraction).
    #[schemars(skip)]
    pub particle_jitter: f32,
    /// Particle opacity.
    #[schemars(title = "Particle Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub particle_opacity: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            background: [0.02, 0.02, 0.04],
            particle_count: 1500,
            particle_extent: 80.0,
            particle_size: 0.1,
            particle_color: [0.376, 0.647, 0.98],
            particle_jitter: 0.2,
            particle_opacity: 0.6,
        }
    }
}
