// Rotrs Processor Chain
// Ordered processors applied to the events of one source device

use super::processor::{Disposition, InputProcessor};
use crate::input::InputEvent;

/// Processors for one device, run in insertion order.
///
/// Every processor sees every event, each one receiving the output of the
/// previous stage. A `Continue` from one stage never hides the event from the
/// next.
#[derive(Default)]
pub struct ProcessorChain {
    processors: Vec<Box<dyn InputProcessor + Send>>,
}

impl ProcessorChain {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    pub fn push(&mut self, processor: impl InputProcessor + Send + 'static) {
        self.processors.push(Box::new(processor));
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Processor names in chain order
    pub fn names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Run `event` through every stage.
    ///
    /// Returns `Handled` if any stage replaced the value.
    pub fn process(&mut self, event: &mut InputEvent) -> Disposition {
        let mut disposition = Disposition::Continue;
        for processor in self.processors.iter_mut() {
            if processor.handle_event(event).is_handled() {
                disposition = Disposition::Handled;
            }
        }
        disposition
    }

    /// Run every event of a report through the chain, returning how many were handled.
    pub fn process_all<'a>(&mut self, events: impl IntoIterator<Item = &'a mut InputEvent>) -> usize {
        let mut handled = 0;
        for event in events {
            if self.process(event).is_handled() {
                handled += 1;
            }
        }
        handled
    }
}

impl std::fmt::Debug for ProcessorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorChain")
            .field("processors", &self.names())
            .finish()
    }
}
