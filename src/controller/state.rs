use std::fmt;

use serde::{Deserialize, Serialize};

use crate::article::ArticleId;
use crate::camera::CameraPose;
use crate::card::CardSet;

/// How cards are arranged when no transition is running.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Cards on a Fibonacci sphere, facing the camera, gently floating.
    #[default]
    Sphere,
    /// Cards in a flat row-major grid.
    Grid,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Sphere => Self::Grid,
            Self::Grid => Self::Sphere,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sphere => write!(f, "sphere"),
            Self::Grid => write!(f, "grid"),
        }
    }
}

/// Kind of the running transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Cards and camera moving into the grid.
    ToGrid,
    /// Cards and camera moving back onto the sphere.
    ToSphere,
    /// Camera flying to a card.
    Focus,
    /// Camera returning to the mode's canonical pose.
    Reset,
}

impl TransitionKind {
    /// Whether cards move (and their orientation is tweened).
    #[must_use]
    pub fn moves_cards(self) -> bool {
        matches!(self, Self::ToGrid | Self::ToSphere)
    }
}

/// Everything the view controller mutates.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub(super) mode: ViewMode,
    pub(super) focused: Option<ArticleId>,
    pub(super) pose: CameraPose,
    pub(super) cards: CardSet,
    pub(super) transition: Option<TransitionKind>,
}

impl ViewState {
    pub(super) fn new(pose: CameraPose) -> Self {
        Self {
            mode: ViewMode::Sphere,
            focused: None,
            pose,
            cards: CardSet::default(),
            transition: None,
        }
    }

    /// Current (or, mid-transition, source) mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Focused card, if any.
    #[must_use]
    pub fn focused(&self) -> Option<ArticleId> {
        self.focused
    }

    /// Current camera pose.
    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Cards.
    #[must_use]
    pub fn cards(&self) -> &CardSet {
        &self.cards
    }

    /// Running transition, if any.
    #[must_use]
    pub fn transition(&self) -> Option<TransitionKind> {
        self.transition
    }

    /// Whether a transition is running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }
}
