//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns all transient input state (pointer tracking,
//! click/drag discrimination) and the key-binding map. It is the only
//! thing that sits between raw window events and
//! [`CardViewer::execute`](crate::viewer::CardViewer::execute).

use super::event::{InputEvent, MouseButton};
use super::mouse::{ClickResult, InputState};
use crate::options::{KeybindingOptions, Options};
use crate::viewer::ViewerCommand;

/// Converts raw window events into [`ViewerCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input_processor.handle_event(event) {
///     viewer.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("Tab") {
///     viewer.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Pointer tracking and drag detection.
    state: InputState,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Processor with default key bindings and drag threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::from_options(&Options::default())
    }

    /// Processor configured from options.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            state: InputState::new(options.orbit.drag_threshold),
            key_bindings: options.keybindings.clone(),
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        self.state.mouse_pos
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.state.is_pressed()
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, mut bindings: KeybindingOptions) {
        bindings.rebuild_reverse_map();
        self.key_bindings = bindings;
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        self.key_bindings.lookup(key).map(super::keyboard::KeyAction::to_command)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let _ = self.state.handle_mouse_position(x, y);
                self.state
                    .is_pressed()
                    .then_some(ViewerCommand::PointerMove { x, y })
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(ViewerCommand::Zoom { delta }),
        }
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewerCommand> {
        if button != MouseButton::Left {
            return None;
        }
        let (x, y) = self.state.mouse_pos;

        if pressed {
            self.state.handle_mouse_down();
            return Some(ViewerCommand::PointerDown { x, y });
        }

        match self.state.process_mouse_up() {
            ClickResult::NoPress => None,
            ClickResult::Drag => Some(ViewerCommand::PointerUp { x, y, click: false }),
            ClickResult::Click { x, y } => {
                Some(ViewerCommand::PointerUp { x, y, click: true })
            }
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}
