// Rotrs Input Layer - Event Model
// Linux input_event representation and relative-axis classification

use std::fmt;

/// Event type codes from input-event-codes.h
pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;
pub const EV_ABS: u16 = 0x03;

/// SYN_REPORT closes one hardware report
pub const SYN_REPORT: u16 = 0x00;

/// Relative axis codes
pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_WHEEL: u16 = 0x08;

/// A single input event: type, code and signed value.
///
/// Mirrors the kernel's `struct input_event` minus the timestamp, which the
/// processors never look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl InputEvent {
    pub const fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    /// Relative motion on the X axis
    pub const fn rel_x(value: i32) -> Self {
        Self::new(EV_REL, REL_X, value)
    }

    /// Relative motion on the Y axis
    pub const fn rel_y(value: i32) -> Self {
        Self::new(EV_REL, REL_Y, value)
    }

    /// End-of-report marker
    pub const fn syn_report() -> Self {
        Self::new(EV_SYN, SYN_REPORT, 0)
    }

    pub fn is_syn_report(&self) -> bool {
        self.event_type == EV_SYN && self.code == SYN_REPORT
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match RelAxis::from_event(self) {
            Some(axis) => write!(f, "REL_{} {}", axis, self.value),
            None => write!(
                f,
                "type {:#04x} code {:#04x} value {}",
                self.event_type, self.code, self.value
            ),
        }
    }
}

/// The two planar axes a rotation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelAxis {
    X,
    Y,
}

impl RelAxis {
    /// Classify an event. Only `EV_REL` with `REL_X` or `REL_Y` qualifies.
    pub fn from_event(event: &InputEvent) -> Option<Self> {
        if !is_rel_event(event.event_type) {
            return None;
        }
        match event.code {
            REL_X => Some(RelAxis::X),
            REL_Y => Some(RelAxis::Y),
            _ => None,
        }
    }
}

impl fmt::Display for RelAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelAxis::X => write!(f, "X"),
            RelAxis::Y => write!(f, "Y"),
        }
    }
}

/// Check if an event type is relative motion.
pub fn is_rel_event(event_type: u16) -> bool {
    event_type == EV_REL
}
