// Rotrs Input Processors
// Per-event adapter that rotates relative X/Y motion in place

use std::fmt;

use super::rotation::{RotationConfig, RotationState};
use crate::input::{InputEvent, RelAxis};

/// What a processor did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// The event was recognized and its value replaced
    Handled,
    /// Not ours; the event is untouched and later stages should see it as-is
    Continue,
}

impl Disposition {
    pub fn is_handled(self) -> bool {
        matches!(self, Disposition::Handled)
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Handled => write!(f, "handled"),
            Disposition::Continue => write!(f, "continue"),
        }
    }
}

/// A stage that may rewrite input events in place.
///
/// Implementations are single-writer: the host serializes calls per instance.
pub trait InputProcessor {
    /// Process one event, mutating it only when returning [`Disposition::Handled`].
    fn handle_event(&mut self, event: &mut InputEvent) -> Disposition;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Re-expresses a rotated sensor's X/Y deltas in the device's own frame.
///
/// Each X event is rotated against the last raw Y and vice versa, so only the
/// component for the incoming axis is emitted.
#[derive(Debug, Clone)]
pub struct SensorRotation {
    name: String,
    config: RotationConfig,
    state: RotationState,
}

impl SensorRotation {
    /// Initialize the processor: look up the coefficients once and zero both axes.
    pub fn new(name: impl Into<String>, config: RotationConfig) -> Self {
        let state = RotationState::new(&config);
        let name = name.into();
        log::debug!(
            "sensor rotation '{}' ready: angle {} ({})",
            name,
            config.rotation_angle,
            state.coefficients()
        );
        Self {
            name,
            config,
            state,
        }
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }
}

impl InputProcessor for SensorRotation {
    fn handle_event(&mut self, event: &mut InputEvent) -> Disposition {
        let Some(axis) = RelAxis::from_event(event) else {
            return Disposition::Continue;
        };

        event.value = match axis {
            RelAxis::X => self.state.rotate_x(event.value),
            RelAxis::Y => self.state.rotate_y(event.value),
        };

        log::debug!(
            "{} value: {}, rotate {} : {}, {} : sin {}, cos {}",
            axis,
            event.value,
            self.config.rotation_angle,
            self.state.x(),
            self.state.y(),
            self.state.sin_val(),
            self.state.cos_val()
        );

        Disposition::Handled
    }

    fn name(&self) -> &str {
        &self.name
    }
}
