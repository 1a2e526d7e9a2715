// Rotrs uinput Output Layer
// Virtual pointer that re-emits processed reports

use evdev::uinput::VirtualDeviceBuilder;
use evdev::{AttributeSet, Key, RelativeAxisType};

use super::state::PressedButtons;
use crate::event::EventReport;
use crate::input::event::EV_SYN;

/// Buttons declared when no source device reported any
const DEFAULT_BUTTONS: &[u16] = &[
    0x110, // BTN_LEFT
    0x111, // BTN_RIGHT
    0x112, // BTN_MIDDLE
    0x113, // BTN_SIDE
    0x114, // BTN_EXTRA
];

/// Error types for uinput operations
#[derive(Debug, thiserror::Error)]
pub enum UInputError {
    #[error("Failed to create virtual device: {0}")]
    DeviceCreation(String),

    #[error("Failed to write event: {0}")]
    WriteError(String),
}

/// Virtual uinput pointer for rotated output
pub struct VirtualPointer {
    device: evdev::uinput::VirtualDevice,
    pressed: PressedButtons,
}

impl VirtualPointer {
    /// Create the virtual pointer.
    ///
    /// `buttons` should be the union of the grabbed devices' buttons; an empty
    /// slice falls back to the five standard mouse buttons.
    pub fn new(name: &str, buttons: &[u16]) -> Result<Self, UInputError> {
        let mut axes = AttributeSet::<RelativeAxisType>::new();
        axes.insert(RelativeAxisType::REL_X);
        axes.insert(RelativeAxisType::REL_Y);
        axes.insert(RelativeAxisType::REL_WHEEL);
        axes.insert(RelativeAxisType::REL_HWHEEL);

        let codes = if buttons.is_empty() {
            DEFAULT_BUTTONS
        } else {
            buttons
        };
        let mut keys = AttributeSet::<Key>::new();
        for &code in codes {
            keys.insert(Key::new(code));
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?
            .name(name)
            .with_relative_axes(&axes)
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?
            .with_keys(&keys)
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?
            .build()
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?;

        log::info!("virtual pointer '{}' created", name);

        Ok(Self {
            device,
            pressed: PressedButtons::new(),
        })
    }

    /// Emit one processed report.
    ///
    /// evdev terminates every batch with its own SYN_REPORT, so SYN events in
    /// the report are not forwarded.
    pub fn emit_report(&mut self, report: &EventReport) -> Result<(), UInputError> {
        let events: Vec<evdev::InputEvent> = report
            .iter()
            .filter(|event| event.event_type != EV_SYN)
            .inspect(|event| self.pressed.observe(event))
            .map(|event| evdev::InputEvent::from(*event))
            .collect();

        if events.is_empty() {
            return Ok(());
        }

        self.device
            .emit(&events)
            .map_err(|e: std::io::Error| UInputError::WriteError(e.to_string()))
    }

    /// Release any button still held on the virtual device
    pub fn release_all(&mut self) -> Result<(), UInputError> {
        let releases: Vec<evdev::InputEvent> = self
            .pressed
            .drain_releases()
            .into_iter()
            .map(evdev::InputEvent::from)
            .collect();

        if releases.is_empty() {
            return Ok(());
        }
        log::debug!("releasing {} held button(s)", releases.len());

        self.device
            .emit(&releases)
            .map_err(|e: std::io::Error| UInputError::WriteError(e.to_string()))
    }

    /// Release held buttons and destroy the device
    pub fn close(mut self) -> Result<(), UInputError> {
        self.release_all()
    }
}

