use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Transition timing and idle floating motion.
pub struct AnimationOptions {
    /// Duration of a sphere ↔ grid switch, in milliseconds.
    #[schemars(title = "View Switch (ms)", range(min = 0, max = 5000), extend("step" = 50))]
    pub view_switch_ms: u64,
    /// Duration of focus and reset camera flights, in milliseconds.
    #[schemars(title = "Focus (ms)", range(min = 0, max = 5000), extend("step" = 50))]
    pub focus_ms: u64,
    /// Easing curve applied to every transition.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Whether cards float around their sphere slots while idle.
    #[schemars(title = "Idle Float")]
    pub idle_float: bool,
    /// Peak per-axis offset of the idle float.
    #[schemars(title = "Float Amplitude", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub idle_amplitude: f32,
    /// Idle phase advance per elapsed millisecond.
    #[schemars(skip)]
    pub idle_speed: f32,
    /// Per-axis phase stagger multiplied by the card index.
    #[schemars(skip)]
    pub idle_phase: [f32; 3],
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            view_switch_ms: 1500,
            focus_ms: 1000,
            easing: EasingFunction::CubicInOut,
            idle_float: true,
            idle_amplitude: 0.04,
            idle_speed: 0.000_15,
            idle_phase: [0.6, 0.4, 0.8],
        }
    }
}
