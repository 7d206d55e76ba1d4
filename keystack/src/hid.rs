//! Traits and types for HID reporting.
//!
//! Reports only carry the report payloads, framing them for USB or BLE is left to
//! the [`HidReporter`] implementation.

/// Keyboard report: modifier byte and up to 6 pressed keycodes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub keycodes: [u8; 6],
}

/// Media keyboard report, a single consumer page usage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MediaKeyboardReport {
    pub usage_id: u16,
}

/// System control report, a single generic desktop page usage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemControlReport {
    pub usage_id: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Normal keyboard hid report
    KeyboardReport(KeyboardReport),
    /// Media keyboard report
    MediaKeyboardReport(MediaKeyboardReport),
    /// System control report
    SystemControlReport(SystemControlReport),
}

/// HidReporter trait is used for reporting HID messages to the host, via USB, BLE, etc.
pub trait HidReporter {
    /// Send the report to the host. Failures are handled by the reporter.
    fn send_report(&mut self, report: Report);
}

/// Drop all reports
impl HidReporter for () {
    fn send_report(&mut self, _report: Report) {}
}

impl<R: HidReporter> HidReporter for &mut R {
    fn send_report(&mut self, report: Report) {
        (**self).send_report(report)
    }
}
