use motebridge_hid_ds4_protocol::{build_output_report, parse_input_report};
use tracing::debug;

use crate::slot::DeviceStatus;
use crate::transport::DeviceLink;

#[derive(Debug, Clone, Default)]
pub struct DualShock4 {
    leds: u8,
    pub(super) rumble: bool,
    full: bool,
}

impl DualShock4 {
    /// Any output report moves the pad from the reduced `0x01` report to
    /// the full `0x11` report.
    pub(super) fn init(&mut self, link: &DeviceLink<'_>) {
        self.send(link);
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
            if !self.full {
                debug!("DualShock 4 full reports started");
                self.full = true;
            }
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

    fn send(&self, link: &DeviceLink<'_>) {
        link.send(&build_output_report(self.leds, self.rumble));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_report(status_byte: u8) -> Vec<u8> {
        let mut r = vec![0u8; 78];
        r[0] = 0x11;
        r[32] = status_byte;
        r
    }

    const REDUCED: [u8; 10] = [0x01, 0x80, 0x80, 0x80, 0x80, 0x08, 0, 0, 0, 0];

    #[test]
    fn test_reduced_report_keeps_charge_status() {
        let mut pad = DualShock4::default();
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
