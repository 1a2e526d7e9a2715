// Rotrs Output State
// Buttons held down on the virtual pointer

use crate::input::event::EV_KEY;
use crate::input::InputEvent;

/// Button codes currently pressed through the virtual pointer, in press order.
///
/// Tracked so shutdown can release them; a grab released while a button is
/// still down on the virtual device would leave it stuck.
#[derive(Debug, Clone, Default)]
pub struct PressedButtons {
    pressed: Vec<u16>,
}

impl PressedButtons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from an emitted event; non-key events are ignored
    pub fn observe(&mut self, event: &InputEvent) {
        if event.event_type != EV_KEY {
            return;
        }
        match event.value {
            0 => self.pressed.retain(|&code| code != event.code),
            1 if !self.is_pressed(event.code) => self.pressed.push(event.code),
            // Autorepeat or a duplicate press
            _ => {}
        }
    }

    pub fn is_pressed(&self, code: u16) -> bool {
        self.pressed.contains(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    /// Release events for every held button, most recent first
    pub fn drain_releases(&mut self) -> Vec<InputEvent> {
        self.pressed
            .drain(..)
            .rev()
            .map(|code| InputEvent::new(EV_KEY, code, 0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BTN_LEFT: u16 = 0x110;
    const BTN_RIGHT: u16 = 0x111;

    #[test]
    fn test_press_and_release() {
        let mut buttons = PressedButtons::new();
        buttons.observe(&InputEvent::new(EV_KEY, BTN_LEFT, 1));
        assert!(buttons.is_pressed(BTN_LEFT));
        buttons.observe(&InputEvent::new(EV_KEY, BTN_LEFT, 0));
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_duplicate_press_tracked_once() {
        let mut buttons = PressedButtons::new();
        buttons.observe(&InputEvent::new(EV_KEY, BTN_LEFT, 1));
        buttons.observe(&InputEvent::new(EV_KEY, BTN_LEFT, 1));
        buttons.observe(&InputEvent::new(EV_KEY, BTN_LEFT, 2));
        assert_eq!(buttons.drain_releases().len(), 1);
    }

    #[test]
    fn test_motion_is_ignored() {
        let mut buttons = PressedButtons::new();
        buttons.observe(&InputEvent::rel_x(1));
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_drain_releases_most_recent_first() {
        let mut buttons = PressedButtons::new();
        buttons.observe(&InputEvent::new(EV_KEY, BTN_LEFT, 1));
        buttons.observe(&InputEvent::new(EV_KEY, BTN_RIGHT, 1));
        assert_eq!(
            buttons.drain_releases(),
            vec![
                InputEvent::new(EV_KEY, BTN_RIGHT, 0),
                InputEvent::new(EV_KEY, BTN_LEFT, 0)
            ]
        );
        assert!(buttons.is_empty());
    }
}
