//! Per-frame renderer input.

use serde::Serialize;

use crate::article::{Article, ArticleId};
use crate::camera::CameraSnapshot;
use crate::card::Card;
use crate::controller::{ViewMode, ViewState};
use crate::scene::Lights;

/// Draw data for one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardFrame {
    /// Article the card displays.
    pub id: ArticleId,
    /// Model matrix (column-major, unit scale).
    pub model: [[f32; 4]; 4],
    /// Material opacity.
    pub opacity: f32,
    /// Emissive RGB tint.
    pub emissive: [f32; 3],
    /// Texture width in pixels.
    pub texture_width: u32,
    /// Texture height in pixels.
    pub texture_height: u32,
    /// Whether the texture is a generated placeholder.
    pub placeholder: bool,
}

impl CardFrame {
    fn from_card(card: &Card) -> Self {
        let texture = card.texture();
        Self {
            id: card.id(),
            model: card.transform.matrix().to_cols_array_2d(),
            opacity: card.appearance.opacity,
            emissive: card.appearance.emissive,
            texture_width: texture.width(),
            texture_height: texture.height(),
            placeholder: texture.is_placeholder(),
        }
    }
}

/// Everything a renderer needs to draw one frame.
///
/// The particle field never changes after startup and is not repeated
/// here; fetch it once with [`CardViewer::scene`](super::CardViewer::scene).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Camera matrices and eye.
    pub camera: CameraSnapshot,
    /// Clear color.
    pub background: [f32; 3],
    /// Scene lights.
    pub lights: Lights,
    /// Current (settled or departing) mode.
    pub mode: ViewMode,
    /// Focused card.
    pub focused: Option<ArticleId>,
    /// Record of the focused card, for overlays.
    pub focused_article: Option<Article>,
    /// Whether a transition is running.
    pub transitioning: bool,
    /// Bumped whenever the card set (and so the texture set) is replaced.
    pub texture_revision: u64,
    /// Cards in article order.
    pub cards: Vec<CardFrame>,
}

impl RenderFrame {
    pub(super) fn capture(
        camera: CameraSnapshot,
        background: [f32; 3],
        lights: Lights,
        state: &ViewState,
        focused_article: Option<Article>,
        texture_revision: u64,
    ) -> Self {
        Self {
            camera,
            background,
            lights,
            mode: state.mode(),
            focused: state.focused(),
            focused_article,
            transitioning: state.is_transitioning(),
            texture_revision,
            cards: state.cards().iter().map(CardFrame::from_card).collect(),
        }
    }
}
