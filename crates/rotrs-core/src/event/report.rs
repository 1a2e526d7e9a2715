// Rotrs Report Framing
// Group events into SYN_REPORT-terminated reports before re-emitting them

use smallvec::SmallVec;

use crate::input::InputEvent;

/// A mouse report is usually REL_X, REL_Y and the SYN; buttons and wheel add a few.
pub const REPORT_INLINE_CAPACITY: usize = 8;

/// Events of one hardware report, ending with `SYN_REPORT` once complete.
///
/// Reports are emitted as a unit so downstream consumers never see X from
/// one report paired with Y from the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventReport {
    events: SmallVec<[InputEvent; REPORT_INLINE_CAPACITY]>,
}

impl EventReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the last event closes the report
    pub fn is_complete(&self) -> bool {
        self.events.last().is_some_and(InputEvent::is_syn_report)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut InputEvent> {
        self.events.iter_mut()
    }

    pub fn as_slice(&self) -> &[InputEvent] {
        &self.events
    }
}

/// Splits one device's event stream into reports.
#[derive(Debug, Default)]
pub struct ReportFramer {
    pending: EventReport,
}

impl ReportFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event; returns the finished report when `event` is a `SYN_REPORT`.
    pub fn feed(&mut self, event: InputEvent) -> Option<EventReport> {
        self.pending.push(event);
        if event.is_syn_report() {
            Some(std::mem::take(&mut self.pending))
        } else {
            None
        }
    }

    /// Events received since the last `SYN_REPORT`
    pub fn pending(&self) -> &EventReport {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::{EV_KEY, EV_REL, REL_WHEEL};

    #[test]
    fn test_framer_emits_on_syn_report() {
        let mut framer = ReportFramer::new();
        assert!(framer.feed(InputEvent::rel_x(2)).is_none());
        assert!(framer.feed(InputEvent::rel_y(-1)).is_none());
        assert_eq!(framer.pending().len(), 2);

        let report = framer.feed(InputEvent::syn_report()).unwrap();
        assert_eq!(
            report.as_slice(),
            &[
                InputEvent::rel_x(2),
                InputEvent::rel_y(-1),
                InputEvent::syn_report()
            ]
        );
        assert!(report.is_complete());
        assert!(framer.pending().is_empty());
    }

    #[test]
    fn test_bare_syn_is_its_own_report() {
        let mut framer = ReportFramer::new();
        let report = framer.feed(InputEvent::syn_report()).unwrap();
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_incomplete_report() {
        let mut report = EventReport::new();
        assert!(!report.is_complete());
        report.push(InputEvent::new(EV_KEY, 0x110, 1));
        assert!(!report.is_complete());
        report.push(InputEvent::syn_report());
        assert!(report.is_complete());
    }

    #[test]
    fn test_iter_mut_edits_in_place() {
        let mut report = EventReport::new();
        report.push(InputEvent::new(EV_REL, REL_WHEEL, 1));
        for event in report.iter_mut() {
            event.value = -event.value;
        }
        assert_eq!(report.iter().next().unwrap().value, -1);
    }

    #[test]
    fn test_large_report_spills_to_heap() {
        let mut framer = ReportFramer::new();
        for i in 0..(REPORT_INLINE_CAPACITY as i32 * 2) {
            framer.feed(InputEvent::rel_x(i));
        }
        let report = framer.feed(InputEvent::syn_report()).unwrap();
        assert_eq!(report.len(), REPORT_INLINE_CAPACITY * 2 + 1);
    }
}
