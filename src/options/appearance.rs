use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Appearance", inline)]
#[serde(default)]
/// Card display state and texture composition.
pub struct AppearanceOptions {
    /// Opacity of unfocused cards while another card is focused.
    #[schemars(title = "Dimmed Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub dimmed_opacity: f32,
    /// Emissive tint of the focused card.
    #[schemars(skip)]
    pub focused_emissive: [f32; 3],
    /// Card texture width in pixels.
    #[schemars(skip)]
    pub texture_width: u32,
    /// Card texture height in pixels.
    #[schemars(skip)]
    pub texture_height: u32,
    /// Fraction of the card texture given to the thumbnail.
    #[schemars(skip)]
    pub thumbnail_fraction: f32,
    /// Generated placeholder width in pixels.
    #[schemars(skip)]
    pub placeholder_width: u32,
    /// Generated placeholder height in pixels.
    #[schemars(skip)]
    pub placeholder_height: u32,
    /// Number of decorative ring outlines on a placeholder.
    #[schemars(skip)]
    pub placeholder_rings: u32,
    /// Font family for card text. Empty means the system sans-serif.
    #[schemars(title = "Font Family")]
    pub font_family: String,
}

impl Default for AppearanceOptions {
    fn default() -> Self {
        Self {
            dimmed_opacity: 0.15,
            focused_emissive: [17.0 / 255.0; 3],
            texture_width: 640,
            texture_height: 480,
            thumbnail_fraction: 0.7,
            placeholder_width: 480,
            placeholder_height: 360,
            placeholder_rings: 10,
            font_family: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Links", inline)]
#[serde(default)]
/// Where "open article" actions lead.
pub struct LinkOptions {
    /// URL template; `{id}` is replaced by the article id.
    #[schemars(title = "Article URL")]
    pub article_url_template: String,
}

impl LinkOptions {
    /// Resolve the article URL for `id`.
    #[must_use]
    pub fn article_url(&self, id: crate::article::ArticleId) -> String {
        self.article_url_template.replace("{id}", &id.to_string())
    }
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            article_url_template: "https://example.com/article/{id}".into(),
        }
    }
}
