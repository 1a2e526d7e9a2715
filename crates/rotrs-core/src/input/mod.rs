// Rotrs Input Layer
// Event model, pointer detection and device filtering

mod device;
pub mod event;
mod filter;

pub use device::{is_pointer, is_virtual_device, DeviceCapabilities, VIRTUAL_DEVICE_PREFIX};
pub use event::{is_rel_event, InputEvent, RelAxis};
pub use filter::matches_device_filter;
