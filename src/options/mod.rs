//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, layout, animation, orbit, appearance,
//! lighting, scene, links, keybindings) are consolidated here. Options
//! serialize to/from TOML for view presets.

mod animation;
mod appearance;
mod camera;
mod keybindings;
mod layout;
mod lighting;
mod orbit;
mod scene;

use std::path::Path;

pub use animation::AnimationOptions;
pub use appearance::{AppearanceOptions, LinkOptions};
pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use layout::LayoutOptions;
pub use lighting::LightingOptions;
pub use orbit::OrbitOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CardViewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection, canonical poses and focus distances.
    pub camera: CameraOptions,
    /// Card dimensions and arrangement.
    pub layout: LayoutOptions,
    /// Transition timing and idle motion.
    pub animation: AnimationOptions,
    /// Orbit camera sensitivity and limits.
    pub orbit: OrbitOptions,
    /// Card display state and texture composition.
    pub appearance: AppearanceOptions,
    /// Scene lights.
    pub lighting: LightingOptions,
    /// Background and particle field.
    pub scene: SceneOptions,
    /// Article link resolution.
    pub links: LinkOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CardViewError::OptionsParse`] on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, CardViewError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| CardViewError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CardViewError::Io`] if the file cannot be read, or
    /// [`CardViewError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, CardViewError> {
        let content = std::fs::read_to_string(path).map_err(CardViewError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`CardViewError::OptionsParse`] if serialization fails, or
    /// [`CardViewError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CardViewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CardViewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CardViewError::Io)?;
        }
        std::fs::write(path, content).map_err(CardViewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
