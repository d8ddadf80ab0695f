/// Result of releasing the primary button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ClickResult {
    /// The button was not pressed on the scene.
    NoPress,
    /// The pointer travelled too far while held.
    Drag,
    /// Press and release close together: a click at the release point.
    Click {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
}

/// Tracks pointer position and how far it moved while pressed.
#[derive(Debug, Clone)]
pub(crate) struct InputState {
    pub(crate) mouse_pos: (f32, f32),
    pressed: bool,
    travel: f32,
    drag_threshold: f32,
}

impl InputState {
    /// Idle state; presses that move more than `drag_threshold` pixels
    /// become drags.
    pub(crate) fn new(drag_threshold: f32) -> Self {
        Self {
            mouse_pos: (0.0, 0.0),
            pressed: false,
            travel: 0.0,
            drag_threshold,
        }
    }

    /// Whether the primary button is held.
    pub(crate) fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the current press has become a drag.
    pub(crate) fn is_dragging(&self) -> bool {
        self.pressed && self.travel > self.drag_threshold
    }

    /// Record a press at the current position.
    pub(crate) fn handle_mouse_down(&mut self) {
        self.pressed = true;
        self.travel = 0.0;
    }

    /// Update cursor position; returns the delta from the previous one.
    pub(crate) fn handle_mouse_position(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = (x - self.mouse_pos.0, y - self.mouse_pos.1);
        self.mouse_pos = (x, y);
        if self.pressed {
            self.travel += delta.0.hypot(delta.1);
        }
        delta
    }

    /// Classify a release.
    pub(crate) fn process_mouse_up(&mut self) -> ClickResult {
        let was_pressed = self.pressed;
        let was_dragging = self.is_dragging();
        self.pressed = false;
        self.travel = 0.0;

        if !was_pressed {
            ClickResult::NoPress
        } else if was_dragging {
            ClickResult::Drag
        } else {
            let (x, y) = self.mouse_pos;
            ClickResult::Click { x, y }
        }
    }
}
