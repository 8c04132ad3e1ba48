use motebridge_hid_ds3_protocol::{build_enable_report, build_output_report, parse_input_report};

use crate::slot::DeviceStatus;
use crate::transport::DeviceLink;

#[derive(Debug, Clone, Default)]
pub struct DualShock3 {
    leds: u8,
    pub(super) rumble: bool,
}

impl DualShock3 {
    /// The pad stays silent until it gets the enable report.
    pub(super) fn init(&mut self, link: &DeviceLink<'_>) {
        link.send(&build_enable_report());
    }

    pub(super) fn parse(&mut self, bytes: &[u8], status: &mut DeviceStatus) -> bool {
        let Some(input) = parse_input_report(bytes) else {
            return false;
        };
        status.report = input.report;
        status.battery = input.battery;
        status.charging = input.charging;
        status.ready = true;
        true
    }

    pub(super) fn set_led(&mut self, leds: u8, link: &DeviceLink<'_>) {
        self.leds = leds;
        link.send(&build_output_report(self.leds, self.rumble));
    }

    pub(super) fn set_rumble(&mut self, on: bool, link: &DeviceLink<'_>) {
        self.rumble = on;
        link.send(&build_output_report(self.leds, self.rumble));
    }
}
