//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture, a UI button or a programmatic call, is represented as a
//! `ViewerCommand`. Consumers construct commands and pass them to
//! [`CardViewer::execute`](super::CardViewer::execute).

use serde::Serialize;

use crate::article::ArticleId;

/// A single operation on the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    // ── Pointer ─────────────────────────────────────────────────────
    /// Primary button pressed on the scene: start orbiting.
    PointerDown {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },

    /// Pointer moved while pressed.
    PointerMove {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },

    /// Primary button released.
    PointerUp {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
        /// Whether the press stayed put long enough to count as a click.
        click: bool,
    },

    /// Wheel zoom (positive moves the camera away).
    Zoom {
        /// Wheel delta in pixels.
        delta: f32,
    },

    // ── View ────────────────────────────────────────────────────────
    /// Animate into the grid layout.
    SwitchToGrid,

    /// Animate back onto the sphere.
    SwitchToSphere,

    /// Switch to whichever layout is not current.
    ToggleView,

    /// Leave focus and return to the canonical camera pose.
    ResetView,

    /// Fly the camera to a card.
    FocusCard(ArticleId),

    /// Open the focused card's article.
    OpenFocused,

    // ── Viewport ────────────────────────────────────────────────────
    /// The drawable area changed size.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}

/// Something the host should act on, drained with
/// [`CardViewer::take_events`](super::CardViewer::take_events).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewerEvent {
    /// Every card has been created and placed.
    CardsReady {
        /// Number of cards.
        count: usize,
    },
    /// The user asked to read an article.
    OpenArticle {
        /// Article to open.
        id: ArticleId,
        /// Resolved article URL.
        url: String,
    },
}
