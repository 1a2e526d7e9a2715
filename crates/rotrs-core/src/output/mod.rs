// Rotrs Output Layer
// Virtual pointer and its button state

mod state;

#[cfg(feature = "runtime")]
mod uinput;

pub use state::PressedButtons;

#[cfg(feature = "runtime")]
pub use uinput::{UInputError, VirtualPointer};
