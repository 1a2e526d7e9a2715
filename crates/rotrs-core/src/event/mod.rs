// Rotrs Event Handling
// Report framing and the evdev event loop

pub mod report;
#[cfg(feature = "runtime")]
pub mod r#loop;

pub use report::{EventReport, ReportFramer};
#[cfg(feature = "runtime")]
pub use r#loop::{DeviceInfo, EventLoop, EventLoopError, EventLoopResult, PolledEvent};
