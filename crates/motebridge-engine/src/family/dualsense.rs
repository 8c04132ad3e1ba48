use motebridge_hid_dualsense_protocol::{OutputSequence, build_output_report, parse_input_report};

use crate::slot::DeviceStatus;
use crate::transport::DeviceLink;

#[derive(Debug, Clone, Default)]
pub struct DualSense {
    leds: u8,
    pub(super) rumble: bool,
    seq: OutputSequence,
}

impl DualSense {
    /// The first output report switches to the full `0x31` report and
    /// releases the lightbar from its boot animation.
    pub(super) fn init(&mut self, link: &DeviceLink<'_>) {
        let seq = self.seq.next();
        link.send(&build_output_report(seq, self.leds, self.rumble, true));
    }

    pub(super) fn parse(&mut self, bytes: &[u8], status: &mut DeviceStatus) -> bool {
        let Some(input) = parse_input_report(bytes) else {
            return false;
        };
        status.report = input.report;
        // Reduced reports carry no status byte.
        if let Some(level) = input.battery {
            status.battery = level;
            status.charging = input.charging;
        }
        if input.full {
            status.ready = true;
        }
        true
    }

    pub(super) fn set_led(&mut self, leds: u8, link: &DeviceLink<'_>) {
        self.leds = leds;
        self.send(link);
    }

    pub(super) fn set_rumble(&mut self, on: bool, link: &DeviceLink<'_>) {
        self.rumble = on;
        self.send(link);
    }

    fn send(&mut self, link: &DeviceLink<'_>) {
        let seq = self.seq.next();
        link.send(&build_output_report(seq, self.leds, self.rumble, false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_report(status_byte: u8) -> Vec<u8> {
        let mut r = vec![0u8; 78];
        r[0] = 0x31;
        r[54] = status_byte;
        r
    }

    const REDUCED: [u8; 10] = [0x01, 0x80, 0x80, 0x80, 0x80, 0x08, 0, 0, 0, 0];

    #[test]
    fn test_reduced_report_keeps_charge_status() {
        let mut pad = DualSense::default();
        let mut status = DeviceStatus::default();

        assert!(pad.parse(&full_report(0x15), &mut status));
        assert!(status.charging);
        let battery = status.battery;

        assert!(pad.parse(&REDUCED, &mut status));
        assert!(status.charging);
        assert_eq!(status.battery, battery);

        assert!(pad.parse(&full_report(0x05), &mut status));
        assert!(!status.charging);
    }
}
