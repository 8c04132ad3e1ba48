//! Input report layouts of the emulated remote.
//!
//! | Mode | Layout (after the ID byte) | Length |
//! |------|-----------------------------|--------|
//! | `0x30` | BB BB | 3 |
//! | `0x31` | BB BB AA AA AA | 6 |
//! | `0x32` | BB BB + 8 extension | 11 |
//! | `0x33` | BB BB AA AA AA + 12 IR | 18 |
//! | `0x34` | BB BB + 19 extension | 22 |
//! | `0x35` | BB BB AA AA AA + 16 extension | 22 |
//! | `0x36` | BB BB + 10 IR + 9 extension | 22 |
//! | `0x37` | BB BB AA AA AA + 10 IR + 6 extension | 22 |
//! | `0x3D` | 21 extension | 22 |
//!
//! `BB` are the core button bytes, `AA` the accelerometer (reported at rest)
//! and IR bytes are reported as "no point tracked" (`0xFF`).

use crate::ids::input_ids;

/// Longest report the emulated device sends.
pub const MAX_REPORT_LEN: usize = 22;

/// Accelerometer at rest, gravity on Z.
pub const NEUTRAL_ACCEL: [u8; 3] = [0x80, 0x80, 0x9A];

const IR_EMPTY: u8 = 0xFF;

/// Input reporting modes selectable with the report-mode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum InputMode {
    #[default]
    Core = 0x30,
    CoreAccel = 0x31,
    CoreExt8 = 0x32,
    CoreAccelIr12 = 0x33,
    CoreExt19 = 0x34,
    CoreAccelExt16 = 0x35,
    CoreIr10Ext9 = 0x36,
    CoreAccelIr10Ext6 = 0x37,
    Ext21 = 0x3D,
}

impl InputMode {
    pub const fn from_u8(id: u8) -> Option<Self> {
        Some(match id {
            0x30 => Self::Core,
            0x31 => Self::CoreAccel,
            0x32 => Self::CoreExt8,
            0x33 => Self::CoreAccelIr12,
            0x34 => Self::CoreExt19,
            0x35 => Self::CoreAccelExt16,
            0x36 => Self::CoreIr10Ext9,
            0x37 => Self::CoreAccelIr10Ext6,
            0x3D => Self::Ext21,
            _ => return None,
        })
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Total report length including the ID byte.
    pub const fn report_len(self) -> usize {
        match self {
            Self::Core => 3,
            Self::CoreAccel => 6,
            Self::CoreExt8 => 11,
            Self::CoreAccelIr12 => 18,
            _ => MAX_REPORT_LEN,
        }
    }

    const fn has_core(self) -> bool {
        !matches!(self, Self::Ext21)
    }

    const fn accel_offset(self) -> Option<usize> {
        match self {
            Self::CoreAccel | Self::CoreAccelIr12 | Self::CoreAccelExt16 | Self::CoreAccelIr10Ext6 => {
                Some(3)
            }
            _ => None,
        }
    }

    /// IR byte range as (offset, length).
    const fn ir_range(self) -> Option<(usize, usize)> {
        match self {
            Self::CoreAccelIr12 => Some((6, 12)),
            Self::CoreIr10Ext9 => Some((3, 10)),
            Self::CoreAccelIr10Ext6 => Some((6, 10)),
            _ => None,
        }
    }

    /// Offset of the extension bytes, `None` for modes without them.
    pub const fn extension_offset(self) -> Option<usize> {
        match self {
            Self::CoreExt8 | Self::CoreExt19 => Some(3),
            Self::CoreAccelExt16 => Some(6),
            Self::CoreIr10Ext9 => Some(13),
            Self::CoreAccelIr10Ext6 => Some(16),
            Self::Ext21 => Some(1),
            _ => None,
        }
    }

    /// Number of extension bytes carried.
    pub const fn extension_len(self) -> usize {
        match self.extension_offset() {
            Some(offset) => self.report_len() - offset,
            None => 0,
        }
    }
}

/// A report ready to hand to the host transport.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WireReport {
    bytes: [u8; MAX_REPORT_LEN],
    len: usize,
}

impl WireReport {
    fn zeroed(id: u8, len: usize) -> Self {
        let mut bytes = [0u8; MAX_REPORT_LEN];
        bytes[0] = id;
        Self {
            bytes,
            len: len.min(MAX_REPORT_LEN),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[inline]
    pub fn id(&self) -> u8 {
        self.bytes[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl core::fmt::Debug for WireReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "WireReport(")?;
        for (i, b) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{b:02X}")?;
        }
        write!(f, ")")
    }
}

/// Build an input report. `extension` is copied into the extension region
/// and truncated or zero-padded to its length.
pub fn build_input_report(mode: InputMode, core: [u8; 2], extension: &[u8]) -> WireReport {
    let mut report = WireReport::zeroed(mode.id(), mode.report_len());
    if mode.has_core() {
        report.bytes[1..3].copy_from_slice(&core);
    }
    if let Some(offset) = mode.accel_offset() {
        report.bytes[offset..offset + 3].copy_from_slice(&NEUTRAL_ACCEL);
    }
    if let Some((offset, len)) = mode.ir_range() {
        report.bytes[offset..offset + len].fill(IR_EMPTY);
    }
    if let Some(offset) = mode.extension_offset() {
        let len = mode.extension_len().min(extension.len());
        report.bytes[offset..offset + len].copy_from_slice(&extension[..len]);
    }
    report
}

/// Extension region of an input report, `None` for modes without one or a
/// report too short for its mode.
pub fn extension_bytes(report: &[u8]) -> Option<&[u8]> {
    let mode = InputMode::from_u8(*report.first()?)?;
    let offset = mode.extension_offset()?;
    report.get(offset..mode.report_len())
}

/// Status report flag bits (byte 3).
pub mod status_flags {
    pub const BATTERY_LOW: u8 = 0x01;
    pub const EXTENSION: u8 = 0x02;
    pub const SPEAKER: u8 = 0x04;
    pub const IR: u8 = 0x08;
}

/// `0x20` status: core buttons, flags with the LED mask in the high nibble,
/// two reserved bytes and the battery byte.
pub fn build_status_report(core: [u8; 2], flags: u8, leds: u8, battery: u8) -> WireReport {
    let mut report = WireReport::zeroed(input_ids::STATUS, 7);
    report.bytes[1..3].copy_from_slice(&core);
    report.bytes[3] = (flags & 0x0F) | ((leds & 0x0F) << 4);
    report.bytes[6] = battery;
    report
}

/// `0x22` acknowledgement of command `command` with result `error`.
pub fn build_ack_report(core: [u8; 2], command: u8, error: u8) -> WireReport {
    let mut report = WireReport::zeroed(input_ids::ACK, 5);
    report.bytes[1..3].copy_from_slice(&core);
    report.bytes[3] = command;
    report.bytes[4] = error;
    report
}

/// Bytes of memory carried by one `0x21` reply.
pub const READ_CHUNK: usize = 16;

/// `0x21` memory read chunk. Byte 3 holds `size - 1` in the high nibble and
/// the error in the low nibble, bytes 4-5 the low 16 address bits.
pub fn build_read_data_report(core: [u8; 2], address: u32, data: &[u8], error: u8) -> WireReport {
    let mut report = WireReport::zeroed(input_ids::READ_DATA, 22);
    let len = data.len().min(READ_CHUNK);
    report.bytes[1..3].copy_from_slice(&core);
    // size - 1 fits a nibble
    let size = len.saturating_sub(1) as u8;
    report.bytes[3] = (size << 4) | (error & 0x0F);
    report.bytes[4..6].copy_from_slice(&address.to_be_bytes()[2..4]);
    report.bytes[6..6 + len].copy_from_slice(&data[..len]);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_lengths() -> Result<(), Box<dyn std::error::Error>> {
        let expected = [
            (0x30, 3, 0),
            (0x31, 6, 0),
            (0x32, 11, 8),
            (0x33, 18, 0),
            (0x34, 22, 19),
            (0x35, 22, 16),
            (0x36, 22, 9),
            (0x37, 22, 6),
            (0x3D, 22, 21),
        ];
        for (id, len, ext) in expected {
            let mode = InputMode::from_u8(id).ok_or("unknown mode")?;
            assert_eq!(mode.id(), id);
            assert_eq!(mode.report_len(), len, "mode {id:#04X}");
            assert_eq!(mode.extension_len(), ext, "mode {id:#04X}");
        }
        assert_eq!(InputMode::from_u8(0x38), None);
        Ok(())
    }

    #[test]
    fn test_mode_37_layout() {
        let ext = [1, 2, 3, 4, 5, 6];
        let r = build_input_report(InputMode::CoreAccelIr10Ext6, [0x08, 0x80], &ext);
        let b = r.as_bytes();
        assert_eq!(b.len(), 22);
        assert_eq!(&b[..3], &[0x37, 0x08, 0x80]);
        assert_eq!(&b[3..6], &NEUTRAL_ACCEL);
        assert!(b[6..16].iter().all(|&x| x == 0xFF));
        assert_eq!(&b[16..22], &ext);
        assert_eq!(extension_bytes(b), Some(&ext[..]));
    }

    #[test]
    fn test_mode_3d_has_no_core() {
        let r = build_input_report(InputMode::Ext21, [0xFF, 0xFF], &[0xAB; 6]);
        let b = r.as_bytes();
        assert_eq!(b[0], 0x3D);
        assert_eq!(&b[1..7], &[0xAB; 6]);
        assert!(b[7..].iter().all(|&x| x == 0));
    }

    #[test]
    fn test_core_only_has_no_extension() {
        let r = build_input_report(InputMode::Core, [0x01, 0x02], &[0xAB; 6]);
        assert_eq!(r.as_bytes(), &[0x30, 0x01, 0x02]);
        assert_eq!(extension_bytes(r.as_bytes()), None);
    }

    #[test]
    fn test_status_report() {
        let r = build_status_report([0, 0], status_flags::EXTENSION, 0b0001, 0xC8);
        assert_eq!(r.as_bytes(), &[0x20, 0, 0, 0x12, 0, 0, 0xC8]);
    }

    #[test]
    fn test_read_data_report() {
        let r = build_read_data_report([0, 0], 0x00A4_00FA, &[0, 0, 0xA4, 0x20, 1, 1], 0);
        let b = r.as_bytes();
        assert_eq!(b.len(), 22);
        assert_eq!(&b[..6], &[0x21, 0, 0, 0x50, 0x00, 0xFA]);
        assert_eq!(&b[6..12], &[0, 0, 0xA4, 0x20, 1, 1]);
    }

    #[test]
    fn test_ack_report() {
        let r = build_ack_report([0, 0], 0x16, 0);
        assert_eq!(r.as_bytes(), &[0x22, 0, 0, 0x16, 0]);
    }
}
