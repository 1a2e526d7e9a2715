// Rotrs Core Library
// Fixed-point rotation of relative pointer motion

pub mod config;
pub mod event;
pub mod input;
pub mod output;
pub mod transform;
pub mod trig;

pub use config::{Config, ConfigError, SensorEntry};
pub use event::{EventReport, ReportFramer};
pub use input::{
    is_pointer, is_rel_event, is_virtual_device, matches_device_filter, DeviceCapabilities,
    InputEvent, RelAxis,
};
pub use output::PressedButtons;
pub use transform::{
    apply_rotation, Disposition, InputProcessor, ProcessorChain, RotationConfig, RotationState,
    SensorRotation,
};
pub use trig::{lookup_sin_cos, normalize_angle, Quadrant, SinCos, FIXED_POINT_SCALE};

#[cfg(feature = "runtime")]
pub use event::{DeviceInfo, EventLoop, EventLoopError, EventLoopResult, PolledEvent};
#[cfg(feature = "runtime")]
pub use output::{UInputError, VirtualPointer};
