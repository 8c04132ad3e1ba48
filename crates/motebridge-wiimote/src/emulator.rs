//! Host-facing state machine of one emulated remote.

use std::sync::Arc;

use motebridge_cipher::CipherTables;
use motebridge_report::TargetReport;
use tracing::{debug, trace};

use crate::classic::encode_classic;
use crate::core_buttons::encode_core_buttons;
use crate::ids::{command_ids, flags, memory_map, read_errors};
use crate::memory::{ExtensionRegisters, eeprom_read};
use crate::report::{
    InputMode, READ_CHUNK, WireReport, build_ack_report, build_input_report,
    build_read_data_report, build_status_report, status_flags,
};

/// Device-side facts a reply needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostStatus {
    /// Latest remapped report, for the core button bytes.
    pub report: TargetReport,
    /// Battery level `0..=4`.
    pub battery: u8,
}

/// What handling one host command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Reports to send back to the host, in order.
    pub replies: Vec<WireReport>,
    /// New LED mask when it changed.
    pub led: Option<u8>,
    /// New rumble state when it changed.
    pub rumble: Option<bool>,
    /// The host selected a reporting mode.
    pub mode_changed: bool,
}

/// Host-visible state of the emulated remote and its classic extension.
#[derive(Debug, Clone)]
pub struct Emulator {
    mode: InputMode,
    continuous: bool,
    leds: u8,
    rumble: bool,
    ir: bool,
    speaker: bool,
    muted: bool,
    registers: ExtensionRegisters,
    tables: Arc<CipherTables>,
}

impl Emulator {
    pub fn new(tables: Arc<CipherTables>) -> Self {
        Self {
            mode: InputMode::default(),
            continuous: false,
            leds: 0,
            rumble: false,
            ir: false,
            speaker: false,
            muted: false,
            registers: ExtensionRegisters::new(),
            tables,
        }
    }

    /// Back to power-on state, keeping the cipher tables.
    pub fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.tables));
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// `true` when the host asked for a report every tick rather than on
    /// change.
    pub fn continuous(&self) -> bool {
        self.continuous
    }

    pub fn leds(&self) -> u8 {
        self.leds
    }

    pub fn rumble(&self) -> bool {
        self.rumble
    }

    pub fn registers(&self) -> &ExtensionRegisters {
        &self.registers
    }

    /// Handle one host command report. Unknown or truncated commands produce
    /// an empty outcome.
    pub fn handle_command(&mut self, bytes: &[u8], status: &HostStatus) -> CommandOutcome {
        let mut outcome = CommandOutcome::default();
        let Some((&id, rest)) = bytes.split_first() else {
            return outcome;
        };
        if !(command_ids::RUMBLE..=command_ids::IR_ENABLE_2).contains(&id) {
            trace!(id, "ignoring unknown host command");
            return outcome;
        }
        let flag_byte = rest.first().copied().unwrap_or(0);
        let enable = flag_byte & flags::ENABLE != 0;
        let core = encode_core_buttons(&status.report);

        let rumble = flag_byte & flags::RUMBLE != 0;
        if rumble != self.rumble {
            self.rumble = rumble;
            outcome.rumble = Some(rumble);
        }

        match id {
            command_ids::LEDS => {
                let leds = flag_byte >> 4;
                if leds != self.leds {
                    self.leds = leds;
                    outcome.led = Some(leds);
                }
            }
            command_ids::REPORT_MODE => {
                match rest.get(1).copied().and_then(InputMode::from_u8) {
                    Some(mode) => {
                        debug!(mode = mode.id(), continuous = enable, "reporting mode");
                        self.mode = mode;
                        self.continuous = enable;
                        outcome.mode_changed = true;
                    }
                    None => {
                        debug!(?bytes, "unsupported reporting mode");
                        return outcome;
                    }
                }
            }
            command_ids::IR_ENABLE | command_ids::IR_ENABLE_2 => self.ir = enable,
            command_ids::SPEAKER_ENABLE => self.speaker = enable,
            command_ids::SPEAKER_MUTE => self.muted = enable,
            command_ids::STATUS_REQUEST => {
                outcome.replies.push(self.status_report(status));
                return outcome;
            }
            command_ids::WRITE_MEMORY => {
                if let Some(error) = self.write_memory(rest) {
                    outcome.replies.push(build_ack_report(core, id, error));
                }
                return outcome;
            }
            command_ids::READ_MEMORY => {
                self.read_memory(rest, core, &mut outcome.replies);
                return outcome;
            }
            _ => {}
        }

        if id != command_ids::RUMBLE && flag_byte & flags::ACKNOWLEDGE != 0 {
            outcome.replies.push(build_ack_report(core, id, read_errors::OK));
        }
        outcome
    }

    /// `0x20` status report describing the emulated device.
    pub fn status_report(&self, status: &HostStatus) -> WireReport {
        let mut bits = status_flags::EXTENSION;
        if status.battery <= 1 {
            bits |= status_flags::BATTERY_LOW;
        }
        if self.speaker && !self.muted {
            bits |= status_flags::SPEAKER;
        }
        if self.ir {
            bits |= status_flags::IR;
        }
        let battery = status.battery.min(4) * 50;
        build_status_report(encode_core_buttons(&status.report), bits, self.leds, battery)
    }

    /// Input report of the current mode for `report`. Extension bytes are
    /// the register file's data block, obfuscated while the cipher is on.
    pub fn encode_input(&mut self, report: &TargetReport) -> WireReport {
        self.registers.set_input_data(&encode_classic(report));
        let extension = self.registers.read(0, self.mode.extension_len());
        build_input_report(self.mode, encode_core_buttons(report), &extension)
    }

    /// Returns the ack error code, `None` for a truncated command.
    fn write_memory(&mut self, rest: &[u8]) -> Option<u8> {
        // space, address (3 bytes, big endian), size, data
        let space = *rest.first()?;
        let address = u32::from_be_bytes([0, *rest.get(1)?, *rest.get(2)?, *rest.get(3)?]);
        let size = usize::from(*rest.get(4)?).min(READ_CHUNK);
        let data = rest.get(5..)?;
        let data = &data[..size.min(data.len())];

        if space & memory_map::SPACE_REGISTERS == 0 {
            trace!(address, "ignoring EEPROM write");
            return Some(read_errors::OK);
        }
        if let Some(offset) = extension_offset(address) {
            if let Some(event) = self.registers.write(offset, data, &self.tables) {
                debug!(?event, "extension register write");
            }
        } else {
            trace!(address, "ignoring write outside the extension block");
        }
        Some(read_errors::OK)
    }

    fn read_memory(&self, rest: &[u8], core: [u8; 2], replies: &mut Vec<WireReport>) {
        let (Some(&space), Some(addr), Some(size)) = (rest.first(), rest.get(1..4), rest.get(4..6))
        else {
            return;
        };
        let address = u32::from_be_bytes([0, addr[0], addr[1], addr[2]]);
        let size = usize::from(u16::from_be_bytes([size[0], size[1]]));

        let data = if space & memory_map::SPACE_REGISTERS != 0 {
            extension_offset(address).map(|offset| self.registers.read(offset, size))
        } else {
            eeprom_read(address, size)
        };

        let Some(data) = data else {
            debug!(address, size, "read of unmapped memory");
            replies.push(build_read_data_report(core, address, &[], read_errors::UNMAPPED));
            return;
        };
        let mut chunk_address = address;
        for chunk in data.chunks(READ_CHUNK) {
            replies.push(build_read_data_report(core, chunk_address, chunk, read_errors::OK));
            chunk_address = chunk_address.wrapping_add(0x10);
        }
    }
}

/// Register offset of `address` inside the extension block.
fn extension_offset(address: u32) -> Option<u8> {
    let offset = address.checked_sub(memory_map::EXTENSION_BLOCK)?;
    u8::try_from(offset).ok()
}
