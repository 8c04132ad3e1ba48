use motebridge_hid_xbox_protocol::{XboxInput, build_rumble_report, parse_input_report};
use motebridge_report::Button;

use crate::slot::DeviceStatus;
use crate::transport::DeviceLink;

#[derive(Debug, Clone, Default)]
pub struct XboxOne {
    pub(super) rumble: bool,
    /// The guide button arrives in its own report.
    guide: bool,
}

impl XboxOne {
    pub(super) fn parse(&mut self, bytes: &[u8], status: &mut DeviceStatus) -> bool {
        match parse_input_report(bytes) {
            Some(XboxInput::Gamepad(mut report)) => {
                if self.guide {
                    report.press(Button::Home);
                }
                status.report = report;
                status.ready = true;
            }
            Some(XboxInput::Guide(pressed)) => {
                self.guide = pressed;
                status.report.set(Button::Home, pressed);
            }
            Some(XboxInput::Battery { level, charging }) => {
                status.battery = level;
                status.charging = charging;
            }
            None => return false,
        }
        true
    }

    pub(super) fn set_rumble(&mut self, on: bool, link: &DeviceLink<'_>) {
        self.rumble = on;
        link.send(&build_rumble_report(on));
    }
}
