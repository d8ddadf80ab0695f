//! Static scene setup: background, lights and the decorative particle
//! field. Built once per viewer; the renderer receives it with every frame.

use glam::Vec3;
use rand::Rng;
use serde::Serialize;

use crate::options::{LightingOptions, SceneOptions};

/// Point light with linear falloff to zero at `range`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointLight {
    /// World position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
    /// Falloff distance.
    pub range: f32,
}

/// White directional light shining from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionalLight {
    /// Normalized direction the light travels.
    pub direction: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
}

/// Scene lights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lights {
    /// White ambient intensity.
    pub ambient: f32,
    /// Colored point light.
    pub point: PointLight,
    /// Directional key light.
    pub directional: DirectionalLight,
}

impl Lights {
    /// Lights from options.
    #[must_use]
    pub fn from_options(opts: &LightingOptions) -> Self {
        let from = Vec3::from_array(opts.directional_position);
        let direction = (-from).try_normalize().unwrap_or(Vec3::NEG_Y);
        Self {
            ambient: opts.ambient,
            point: PointLight {
                position: opts.point_position,
                color: opts.point_color,
                intensity: opts.point_intensity,
                range: opts.point_range,
            },
            directional: DirectionalLight {
                direction: direction.to_array(),
                intensity: opts.directional_intensity,
            },
        }
    }
}

/// Point-sprite particles scattered in a cube around the origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleField {
    /// Particle centers.
    pub positions: Vec<[f32; 3]>,
    /// Per-particle linear RGB color.
    pub colors: Vec<[f32; 3]>,
    /// Sprite size.
    pub size: f32,
    /// Sprite opacity.
    pub opacity: f32,
}

impl ParticleField {
    /// Scatter `particle_count` particles uniformly in a cube of edge
    /// `particle_extent`, each with the base color's lightness jittered.
    pub fn generate<R: Rng + ?Sized>(opts: &SceneOptions, rng: &mut R) -> Self {
        let half = opts.particle_extent / 2.0;
        let count = opts.particle_count as usize;
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        for _ in 0..count {
            let mut coord = || (rng.random::<f32>() - 0.5) * 2.0 * half;
            positions.push([coord(), coord(), coord()]);
            let offset = (rng.random::<f32>() - 0.5) * 2.0 * opts.particle_jitter;
            colors.push(offset_lightness(opts.particle_color, offset));
        }
        Self {
            positions,
            colors,
            size: opts.particle_size,
            opacity: opts.particle_opacity,
        }
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Everything in the scene that is not a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSetup {
    /// Clear color.
    pub background: [f32; 3],
    /// Lights.
    pub lights: Lights,
    /// Decorative particles.
    pub particles: ParticleField,
}

impl SceneSetup {
    /// Build the scene from options with the given random source.
    pub fn new<R: Rng + ?Sized>(
        scene: &SceneOptions,
        lighting: &LightingOptions,
        rng: &mut R,
    ) -> Self {
        let particles = ParticleField::generate(scene, rng);
        log::debug!("Scene ready with {} particles", particles.len());
        Self {
            background: scene.background,
            lights: Lights::from_options(lighting),
            particles,
        }
    }
}

/// Shift the HSL lightness of an RGB color, keeping hue and saturation.
fn offset_lightness(rgb: [f32; 3], offset: f32) -> [f32; 3] {
    let [h, s, l] = rgb_to_hsl(rgb);
    hsl_to_rgb([h, s, (l + offset).clamp(0.0, 1.0)])
}

fn rgb_to_hsl([r, g, b]: [f32; 3]) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;
    if d <= f32::EPSILON {
        return [0.0, 0.0, l];
    }
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    [h / 6.0, s, l]
}

fn hsl_to_rgb([h, s, l]: [f32; 3]) -> [f32; 3] {
    if s <= f32::EPSILON {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
