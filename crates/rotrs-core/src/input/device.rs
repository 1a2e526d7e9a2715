// Rotrs Input Layer - Device Detection
// Capability analysis for relative pointing devices

use super::event::{REL_X, REL_Y};

/// Name prefix of the uinput device rotrs creates, so it never grabs itself
pub const VIRTUAL_DEVICE_PREFIX: &str = "rotrs (virtual)";

/// Relative-axis capabilities extracted from an evdev device
#[derive(Debug, Clone, Default)]
pub struct DeviceCapabilities {
    /// Whether the device reports EV_REL events at all
    pub has_ev_rel: bool,
    /// Supported REL_* codes
    pub rel_axes: Vec<u16>,
}

impl DeviceCapabilities {
    pub fn new(has_ev_rel: bool, rel_axes: Vec<u16>) -> Self {
        Self {
            has_ev_rel,
            rel_axes,
        }
    }

    /// Check if a specific REL_* code is supported
    pub fn supports_axis(&self, code: u16) -> bool {
        self.rel_axes.contains(&code)
    }
}

/// A device is a pointer when it reports relative motion on both planar axes.
///
/// Scroll-only devices (wheel without X/Y) and absolute devices such as
/// touchscreens are excluded; rotating them makes no sense.
pub fn is_pointer(capabilities: &DeviceCapabilities) -> bool {
    capabilities.has_ev_rel
        && capabilities.supports_axis(REL_X)
        && capabilities.supports_axis(REL_Y)
}

/// Check if a device is a virtual device based on its name.
///
/// # Arguments
/// * `name` - The device name from evdev
/// * `prefix` - The virtual device prefix (e.g., "rotrs (virtual)")
pub fn is_virtual_device(name: &str, prefix: &str) -> bool {
    name.contains(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::{REL_HWHEEL, REL_WHEEL};

    fn make_mouse_caps() -> DeviceCapabilities {
        DeviceCapabilities::new(true, vec![REL_X, REL_Y, REL_WHEEL, REL_HWHEEL])
    }

    #[test]
    fn test_is_pointer_with_mouse() {
        assert!(is_pointer(&make_mouse_caps()));
    }

    #[test]
    fn test_is_pointer_requires_both_axes() {
        let caps = DeviceCapabilities::new(true, vec![REL_X, REL_WHEEL]);
        assert!(!is_pointer(&caps));
    }

    #[test]
    fn test_is_pointer_scroll_only() {
        // e.g. a volume knob reporting only the wheel
        let caps = DeviceCapabilities::new(true, vec![REL_WHEEL]);
        assert!(!is_pointer(&caps));
    }

    #[test]
    fn test_is_pointer_without_ev_rel() {
        let caps = DeviceCapabilities::new(false, vec![REL_X, REL_Y]);
        assert!(!is_pointer(&caps));
        assert!(!is_pointer(&DeviceCapabilities::default()));
    }

    #[test]
    fn test_is_virtual_device() {
        assert!(is_virtual_device(
            "rotrs (virtual) pointer",
            VIRTUAL_DEVICE_PREFIX
        ));
        assert!(!is_virtual_device(
            "Logitech USB Optical Mouse",
            VIRTUAL_DEVICE_PREFIX
        ));
    }
}
