//! Switch-family adapter and its calibration handshake.
//!
//! ```text
//! RequestDeviceInfo -> ReadLeftMagic -> ReadLeftData
//!                   -> ReadRightMagic -> ReadRightData -> Steady
//! ```
//!
//! Each step sends one subcommand and waits for the matching `0x21` reply.
//! SPI replies are matched on the echoed address as well, so a late reply
//! to an earlier step never advances the machine.

use motebridge_hid_switch_protocol::{
    AxisExtents, CALIBRATION_BLOCK_LEN, PacketCounter, StickCalibration,
    SubcommandReply, USER_CALIBRATION_MAGIC, build_rumble_report, build_subcommand_report,
    decode_left_calibration, decode_right_calibration, device_type_kind, full_input_mode_args,
    parse_basic_report, parse_full_report, parse_subcommand_reply, player_lights_args,
    report_ids, spi, spi_read_args, subcommands,
};
use motebridge_report::Axis;
use tracing::{debug, info, warn};

use super::FamilyContext;
use crate::slot::DeviceStatus;
use crate::transport::DeviceLink;

const MAGIC_LEN: u8 = 2;
// Fits: the calibration block is 9 bytes.
const BLOCK_LEN: u8 = CALIBRATION_BLOCK_LEN as u8;
const VIBRATION_ON: [u8; 1] = [0x01];

/// Handshake progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakeState {
    #[default]
    RequestDeviceInfo,
    ReadLeftMagic,
    ReadLeftData,
    ReadRightMagic,
    ReadRightData,
    Steady,
}

#[derive(Debug, Clone)]
pub struct Switch {
    state: HandshakeState,
    counter: PacketCounter,
    pub(super) rumble: bool,
    left: StickCalibration,
    right: StickCalibration,
    /// Address of the outstanding SPI read.
    pending_read: Option<u32>,
    extents: [AxisExtents; 4],
    basic_seen: bool,
}

impl Default for Switch {
    fn default() -> Self {
        Self {
            state: HandshakeState::default(),
            counter: PacketCounter::default(),
            rumble: false,
            left: StickCalibration::FALLBACK,
            right: StickCalibration::FALLBACK,
            pending_read: None,
            extents: [AxisExtents::default(); 4],
            basic_seen: false,
        }
    }
}

impl Switch {
    pub fn state(&self) -> HandshakeState {
        self.state
    }

    pub fn calibration(&self) -> (StickCalibration, StickCalibration) {
        (self.left, self.right)
    }

    pub(super) fn init(&mut self, link: &DeviceLink<'_>) {
        self.state = HandshakeState::RequestDeviceInfo;
        self.subcommand(link, subcommands::DEVICE_INFO, &[]);
    }

    pub(super) fn parse(
        &mut self,
        bytes: &[u8],
        status: &mut DeviceStatus,
        ctx: &mut FamilyContext<'_>,
    ) -> bool {
        match bytes.first().copied() {
            Some(report_ids::FULL) => self.parse_full(bytes, status),
            Some(report_ids::REPLY) => {
                if !self.parse_full(bytes, status) {
                    return false;
                }
                if let Some(reply) = parse_subcommand_reply(bytes) {
                    self.on_reply(&reply, status, ctx);
                }
                true
            }
            Some(report_ids::BASIC) => self.parse_basic(bytes, status),
            _ => false,
        }
    }

    fn parse_full(&mut self, bytes: &[u8], status: &mut DeviceStatus) -> bool {
        let Some(input) = parse_full_report(bytes) else {
            return false;
        };
        status.report.set_buttons(input.buttons);
        status.battery = input.battery;
        status.charging = input.charging;
        // Uncalibrated stick values are meaningless; keep the old axes.
        if self.state == HandshakeState::Steady {
            let [lx, ly, rx, ry] = input.sticks;
            let (lx, ly) = self.left.apply(lx, ly);
            let (rx, ry) = self.right.apply(rx, ry);
            status.report.set_axis(Axis::LeftX, i32::from(lx));
            status.report.set_axis(Axis::LeftY, i32::from(ly));
            status.report.set_axis(Axis::RightX, i32::from(rx));
            status.report.set_axis(Axis::RightY, i32::from(ry));
        }
        true
    }

    fn parse_basic(&mut self, bytes: &[u8], status: &mut DeviceStatus) -> bool {
        let Some(input) = parse_basic_report(bytes) else {
            return false;
        };
        // The first basic report after connect carries stale sticks.
        if !self.basic_seen {
            self.basic_seen = true;
            return true;
        }
        status.report.set_buttons(input.buttons);
        let samples = self.extents.iter_mut().zip(input.sticks);
        for (axis, (extents, raw)) in Axis::ALL.into_iter().zip(samples) {
            let value = i32::from(extents.observe_and_apply(raw));
            // Basic report Y grows downwards.
            let value = if matches!(axis, Axis::LeftY | Axis::RightY) {
                -value
            } else {
                value
            };
            status.report.set_axis(axis, value);
        }
        true
    }

    fn on_reply(
        &mut self,
        reply: &SubcommandReply<'_>,
        status: &mut DeviceStatus,
        ctx: &mut FamilyContext<'_>,
    ) {
        if self.state == HandshakeState::Steady {
            return;
        }
        let slot = ctx.link.handle();
        if !reply.ack {
            warn!(slot, subcommand = reply.subcommand, state = ?self.state, "subcommand rejected, skipping calibration");
            self.left = StickCalibration::PASSTHROUGH;
            self.right = StickCalibration::PASSTHROUGH;
            self.finish(&ctx.link, status);
            return;
        }

        match self.state {
            HandshakeState::RequestDeviceInfo => {
                if let Some(device_type) = reply.device_type() {
                    self.on_device_info(device_type, status, ctx);
                }
            }
            HandshakeState::ReadLeftMagic => {
                if let Some(payload) = self.spi_payload(reply) {
                    let user = payload.get(..2) == Some(&USER_CALIBRATION_MAGIC[..]);
                    let address = if user {
                        spi::USER_LEFT_DATA
                    } else {
                        spi::FACTORY_LEFT_DATA
                    };
                    debug!(slot, user, "reading left stick calibration");
                    self.spi_read(&ctx.link, address, BLOCK_LEN);
                    self.state = HandshakeState::ReadLeftData;
                }
            }
            HandshakeState::ReadLeftData => {
                if let Some(block) = self.spi_payload(reply).and_then(calibration_block) {
                    self.left = decode_left_calibration(&block);
                    self.spi_read(&ctx.link, spi::USER_RIGHT_MAGIC, MAGIC_LEN);
                    self.state = HandshakeState::ReadRightMagic;
                }
            }
            HandshakeState::ReadRightMagic => {
                if let Some(payload) = self.spi_payload(reply) {
                    let user = payload.get(..2) == Some(&USER_CALIBRATION_MAGIC[..]);
                    let address = if user {
                        spi::USER_RIGHT_DATA
                    } else {
                        spi::FACTORY_RIGHT_DATA
                    };
                    debug!(slot, user, "reading right stick calibration");
                    self.spi_read(&ctx.link, address, BLOCK_LEN);
                    self.state = HandshakeState::ReadRightData;
                }
            }
            HandshakeState::ReadRightData => {
                if let Some(block) = self.spi_payload(reply).and_then(calibration_block) {
                    self.right = decode_right_calibration(&block);
                    self.finish(&ctx.link, status);
                }
            }
            HandshakeState::Steady => {}
        }
    }

    fn on_device_info(
        &mut self,
        device_type: u8,
        status: &mut DeviceStatus,
        ctx: &mut FamilyContext<'_>,
    ) {
        let kind = device_type_kind(device_type).unwrap_or(ctx.kind);
        let config = (ctx.resolve)(kind);
        let calibration_disabled = config
            .family
            .as_ref()
            .and_then(|f| f.switch())
            .is_some_and(|o| o.disable_calibration);
        info!(slot = ctx.link.handle(), ?kind, device_type, "switch device identified");
        ctx.refined = Some((kind, config));

        self.subcommand(&ctx.link, subcommands::SET_PLAYER_LIGHTS, &player_lights_args(ctx.leds));
        self.subcommand(&ctx.link, subcommands::ENABLE_VIBRATION, &VIBRATION_ON);

        if calibration_disabled || !kind.has_sticks() {
            self.left = StickCalibration::FALLBACK;
            self.right = StickCalibration::FALLBACK;
            self.finish(&ctx.link, status);
        } else {
            self.spi_read(&ctx.link, spi::USER_LEFT_MAGIC, MAGIC_LEN);
            self.state = HandshakeState::ReadLeftMagic;
        }
    }

    /// Payload of an SPI reply answering the outstanding read.
    fn spi_payload<'a>(&self, reply: &SubcommandReply<'a>) -> Option<&'a [u8]> {
        let read = reply.spi_read()?;
        (Some(read.address) == self.pending_read).then_some(read.payload)
    }

    fn finish(&mut self, link: &DeviceLink<'_>, status: &mut DeviceStatus) {
        self.pending_read = None;
        self.subcommand(link, subcommands::SET_INPUT_MODE, &full_input_mode_args());
        self.state = HandshakeState::Steady;
        status.ready = true;
        debug!(slot = link.handle(), "switch handshake complete");
    }

    fn spi_read(&mut self, link: &DeviceLink<'_>, address: u32, len: u8) {
        self.pending_read = Some(address);
        self.subcommand(link, subcommands::SPI_READ, &spi_read_args(address, len));
    }

    fn subcommand(&mut self, link: &DeviceLink<'_>, subcommand: u8, args: &[u8]) {
        let counter = self.counter.next();
        link.send(&build_subcommand_report(counter, self.rumble, subcommand, args));
    }

    pub(super) fn set_led(&mut self, leds: u8, link: &DeviceLink<'_>) {
        self.subcommand(link, subcommands::SET_PLAYER_LIGHTS, &player_lights_args(leds));
    }

    pub(super) fn set_rumble(&mut self, on: bool, link: &DeviceLink<'_>) {
        self.rumble = on;
        let counter = self.counter.next();
        link.send(&build_rumble_report(counter, on));
    }
}

fn calibration_block(payload: &[u8]) -> Option<[u8; CALIBRATION_BLOCK_LEN]> {
    payload.get(..CALIBRATION_BLOCK_LEN)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use motebridge_hid_switch_protocol::AxisCalibration;
    use motebridge_mapping::{ConfigStore, CommonConfig, ResolvedConfig};
    use motebridge_report::{BdAddr, DeviceKind};

    use super::*;
    use crate::mock::MockTransport;

    /// Reply report: neutral full state, ack byte, subcommand, data.
    fn reply(ack: bool, subcommand: u8, data: &[u8]) -> Vec<u8> {
        let mut r = vec![0u8; 15];
        r[0] = report_ids::REPLY;
        r[13] = if ack { 0x80 } else { 0x00 };
        r[14] = subcommand;
        r.extend_from_slice(data);
        r
    }

    fn spi_reply(address: u32, payload: &[u8]) -> Vec<u8> {
        let mut data = address.to_le_bytes().to_vec();
        data.push(payload.len() as u8);
        data.extend_from_slice(payload);
        reply(true, subcommands::SPI_READ, &data)
    }

    fn pack(pairs: [(u16, u16); 3]) -> Vec<u8> {
        pairs
            .iter()
            .flat_map(|&(x, y)| {
                [
                    (x & 0xFF) as u8,
                    (((x >> 8) & 0x0F) | ((y & 0x0F) << 4)) as u8,
                    (y >> 4) as u8,
                ]
            })
            .collect()
    }

    struct Harness {
        transport: MockTransport,
        store: ConfigStore,
        switch: Switch,
        status: DeviceStatus,
        refined: Option<(DeviceKind, ResolvedConfig)>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                transport: MockTransport::new(),
                store: ConfigStore::with_defaults(CommonConfig::default()),
                switch: Switch::default(),
                status: DeviceStatus::default(),
                refined: None,
            }
        }

        fn feed(&mut self, bytes: &[u8]) -> bool {
            let store = &self.store;
            let resolve = |kind| store.resolve(kind, BdAddr::default());
            let mut ctx = FamilyContext {
                link: DeviceLink::new(0, &self.transport),
                kind: DeviceKind::SwitchGeneric,
                leds: 0x1,
                resolve: &resolve,
                refined: None,
            };
            let handled = self.switch.parse(bytes, &mut self.status, &mut ctx);
            if ctx.refined.is_some() {
                self.refined = ctx.refined;
            }
            handled
        }

        /// Subcommand IDs sent to the device since the last call.
        fn sent_subcommands(&self) -> Vec<(u8, Vec<u8>)> {
            self.transport
                .take()
                .into_iter()
                .filter(|r| r.bytes[0] == report_ids::SUBCOMMAND)
                .map(|r| (r.bytes[10], r.bytes[11..16].to_vec()))
                .collect()
        }
    }

    #[test]
    fn test_full_handshake_user_then_factory() {
        let mut h = Harness::new();
        h.switch.init(&DeviceLink::new(0, &h.transport));
        assert_eq!(h.sent_subcommands()[0].0, subcommands::DEVICE_INFO);

        // Pro Controller.
        assert!(h.feed(&reply(true, subcommands::DEVICE_INFO, &[0x03, 0x48, 0x03])));
        let sent = h.sent_subcommands();
        let ids: Vec<u8> = sent.iter().map(|s| s.0).collect();
        assert_eq!(
            ids,
            [subcommands::SET_PLAYER_LIGHTS, subcommands::ENABLE_VIBRATION, subcommands::SPI_READ]
        );
        assert_eq!(&sent[2].1, &[0x10, 0x80, 0, 0, 2]);
        assert_eq!(h.switch.state(), HandshakeState::ReadLeftMagic);
        assert_eq!(h.refined.as_ref().map(|r| r.0), Some(DeviceKind::ProController));

        // Left magic present: user block.
        h.feed(&spi_reply(spi::USER_LEFT_MAGIC, &USER_CALIBRATION_MAGIC));
        assert_eq!(h.sent_subcommands()[0].1, vec![0x12, 0x80, 0, 0, 9]);
        assert_eq!(h.switch.state(), HandshakeState::ReadLeftData);

        // Left block ordered (above, centre, below).
        let left = pack([(1000, 1100), (2000, 2100), (900, 950)]);
        h.feed(&spi_reply(spi::USER_LEFT_DATA, &left));
        assert_eq!(h.switch.state(), HandshakeState::ReadRightMagic);
        assert_eq!(h.sent_subcommands()[0].1, vec![0x1B, 0x80, 0, 0, 2]);

        // Right magic absent: factory block.
        h.feed(&spi_reply(spi::USER_RIGHT_MAGIC, &[0xFF, 0xFF]));
        assert_eq!(h.sent_subcommands()[0].1, vec![0x46, 0x60, 0, 0, 9]);
        assert_eq!(h.switch.state(), HandshakeState::ReadRightData);
        assert!(!h.status.ready);

        // Right block ordered (centre, below, above).
        let right = pack([(2048, 2048), (1400, 1400), (1500, 1500)]);
        h.feed(&spi_reply(spi::FACTORY_RIGHT_DATA, &right));
        assert_eq!(h.switch.state(), HandshakeState::Steady);
        assert!(h.status.ready);
        let sent = h.sent_subcommands();
        assert_eq!(sent[0].0, subcommands::SET_INPUT_MODE);
        assert_eq!(sent[0].1[0], 0x30);

        let (l, r) = h.switch.calibration();
        assert_eq!(l.x, AxisCalibration { min: 1100, center: 2000, max: 3000 });
        assert_eq!(l.y, AxisCalibration { min: 1150, center: 2100, max: 3200 });
        assert_eq!(r.x, AxisCalibration { min: 648, center: 2048, max: 3548 });
    }

    #[test]
    fn test_stale_spi_reply_ignored() {
        let mut h = Harness::new();
        h.feed(&reply(true, subcommands::DEVICE_INFO, &[0x03, 0x48, 0x03]));
        h.feed(&spi_reply(spi::USER_RIGHT_MAGIC, &USER_CALIBRATION_MAGIC));
        assert_eq!(h.switch.state(), HandshakeState::ReadLeftMagic);
    }

    #[test]
    fn test_nack_forces_ready_with_passthrough() {
        let mut h = Harness::new();
        h.feed(&reply(true, subcommands::DEVICE_INFO, &[0x03, 0x48, 0x03]));
        h.feed(&reply(false, subcommands::SPI_READ, &[]));
        assert_eq!(h.switch.state(), HandshakeState::Steady);
        assert!(h.status.ready);
        let (l, r) = h.switch.calibration();
        assert_eq!(l, StickCalibration::PASSTHROUGH);
        assert_eq!(r, StickCalibration::PASSTHROUGH);
    }

    #[test]
    fn test_retro_pad_skips_calibration() {
        let mut h = Harness::new();
        h.feed(&reply(true, subcommands::DEVICE_INFO, &[0x03, 0x48, 0x0B]));
        assert_eq!(h.switch.state(), HandshakeState::Steady);
        assert!(h.status.ready);
        assert_eq!(h.refined.as_ref().map(|r| r.0), Some(DeviceKind::SwitchRetro));
    }

    #[test]
    fn test_disabled_calibration_skips_reads() {
        let mut h = Harness::new();
        h.store.set_default_family(
            DeviceKind::ProController,
            Some(motebridge_mapping::FamilyConfig::Switch(
                motebridge_mapping::SwitchOptions {
                    disable_calibration: true,
                },
            )),
        );
        h.feed(&reply(true, subcommands::DEVICE_INFO, &[0x03, 0x48, 0x03]));
        assert_eq!(h.switch.state(), HandshakeState::Steady);
        let ids: Vec<u8> = h.sent_subcommands().iter().map(|s| s.0).collect();
        assert!(!ids.contains(&subcommands::SPI_READ));
        assert_eq!(h.switch.calibration().0, StickCalibration::FALLBACK);
    }

    #[test]
    fn test_full_report_axes_discarded_before_steady() {
        let mut h = Harness::new();
        let mut full = vec![0u8; 49];
        full[0] = report_ids::FULL;
        full[3] = 0x04; // B on the right byte → South
        full[6..9].copy_from_slice(&pack([(4000, 4000), (0, 0), (0, 0)])[..3]);
        assert!(h.feed(&full));
        assert!(h.status.report.is_pressed(motebridge_report::Button::South));
        assert_eq!(h.status.report.axes(), [0; 4]);
        assert!(!h.status.ready);
    }

    #[test]
    fn test_first_basic_report_discarded() {
        let mut h = Harness::new();
        let mut basic = vec![0u8; 12];
        basic[0] = report_ids::BASIC;
        basic[1] = 0x01; // B → South
        basic[3] = 0x08;
        for i in 0..4 {
            basic[4 + 2 * i..6 + 2 * i].copy_from_slice(&0x8000u16.to_le_bytes());
        }
        // Full down on the left stick.
        basic[6..8].copy_from_slice(&0xFFFFu16.to_le_bytes());

        assert!(h.feed(&basic));
        assert_eq!(h.status.report.buttons(), 0);

        assert!(h.feed(&basic));
        assert!(h.status.report.is_pressed(motebridge_report::Button::South));
        assert_eq!(h.status.report.axis(Axis::LeftX), 0);
        assert!(h.status.report.axis(Axis::LeftY) < -1000);
    }

    #[test]
    fn test_unknown_report_ignored() {
        let mut h = Harness::new();
        assert!(!h.feed(&[0x55, 0, 0]));
        assert!(!h.feed(&[report_ids::FULL, 0, 0]));
        assert!(h.transport.sent().is_empty());
    }
}
