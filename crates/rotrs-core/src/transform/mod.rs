// Rotrs Transform Module
// Rotation math, the sensor-rotation processor and per-device chains

pub mod chain;
pub mod processor;
pub mod rotation;

pub use chain::ProcessorChain;
pub use processor::{Disposition, InputProcessor, SensorRotation};
pub use rotation::{apply_rotation, RotationConfig, RotationState};
