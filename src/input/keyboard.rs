use serde::{Deserialize, Serialize};

use crate::viewer::ViewerCommand;

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_view = "Tab"
/// reset_view = "Escape"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Switch to the grid layout.
    GridView,
    /// Switch to the sphere layout.
    SphereView,
    /// Switch to whichever layout is not current.
    ToggleView,
    /// Leave focus and return to the canonical camera pose.
    ResetView,
    /// Open the focused card's article.
    OpenFocused,
}

impl KeyAction {
    /// The parameterless command this action triggers.
    #[must_use]
    pub fn to_command(self) -> ViewerCommand {
        match self {
            Self::GridView => ViewerCommand::SwitchToGrid,
            Self::SphereView => ViewerCommand::SwitchToSphere,
            Self::ToggleView => ViewerCommand::ToggleView,
            Self::ResetView => ViewerCommand::ResetView,
            Self::OpenFocused => ViewerCommand::OpenFocused,
        }
    }
}
