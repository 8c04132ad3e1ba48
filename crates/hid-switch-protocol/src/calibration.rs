//! Stick calibration: SPI block decoding, fallbacks and application.
//!
//! Each stick has a 9-byte block holding three packed 12-bit (x, y) pairs.
//! The left block is ordered (max above centre, centre, min below centre),
//! the right block (centre, min below centre, max above centre). A value of
//! `0xFFF` marks an unprogrammed field.

use motebridge_report::{AXIS_MAX, clamp_axis};

/// Length of one stick calibration block.
pub const CALIBRATION_BLOCK_LEN: usize = 9;

/// Marker at the user magic address when a user calibration exists.
pub const USER_CALIBRATION_MAGIC: [u8; 2] = [0xB2, 0xA1];

const UNPROGRAMMED: u16 = 0xFFF;
const RAW_CENTER: u16 = 2048;
const FALLBACK_SPAN: u16 = 1434;
const PASSTHROUGH_SPAN: u16 = 2048;

/// Calibration of one axis, in absolute raw units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCalibration {
    pub min: u16,
    pub center: u16,
    pub max: u16,
}

impl AxisCalibration {
    /// Used for axes with unprogrammed calibration data.
    pub const FALLBACK: AxisCalibration = AxisCalibration::symmetric(RAW_CENTER, FALLBACK_SPAN);

    /// Used when the handshake is aborted: the full 12-bit range.
    pub const PASSTHROUGH: AxisCalibration =
        AxisCalibration::symmetric(RAW_CENTER, PASSTHROUGH_SPAN);

    pub const fn symmetric(center: u16, span: u16) -> Self {
        Self {
            min: center.saturating_sub(span),
            center,
            max: center.saturating_add(span),
        }
    }

    /// Build from a centre and the two distances stored in the SPI block.
    ///
    /// Any `0xFFF` field selects [`FALLBACK`](Self::FALLBACK).
    pub fn from_deltas(center: u16, below: u16, above: u16) -> Self {
        if center == UNPROGRAMMED || below == UNPROGRAMMED || above == UNPROGRAMMED {
            return Self::FALLBACK;
        }
        Self {
            min: center.saturating_sub(below),
            center,
            max: center.saturating_add(above),
        }
    }

    /// Map a raw sample onto `[-AXIS_MAX, AXIS_MAX]`.
    pub fn apply(&self, raw: u16) -> i16 {
        let norm = i32::from(AXIS_MAX);
        let raw = i32::from(raw);
        let center = i32::from(self.center);
        if raw > center {
            let span = i32::from(self.max) - center;
            if span <= 0 {
                return 0;
            }
            clamp_axis(((raw - center) * norm / span).clamp(0, norm))
        } else {
            let span = center - i32::from(self.min);
            if span <= 0 {
                return 0;
            }
            clamp_axis(((center - raw) * -norm / span).clamp(-norm, 0))
        }
    }
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Calibration of both axes of one stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StickCalibration {
    pub x: AxisCalibration,
    pub y: AxisCalibration,
}

impl StickCalibration {
    pub const FALLBACK: StickCalibration = StickCalibration {
        x: AxisCalibration::FALLBACK,
        y: AxisCalibration::FALLBACK,
    };

    pub const PASSTHROUGH: StickCalibration = StickCalibration {
        x: AxisCalibration::PASSTHROUGH,
        y: AxisCalibration::PASSTHROUGH,
    };

    /// Apply to a raw (x, y) pair.
    pub fn apply(&self, x: u16, y: u16) -> (i16, i16) {
        (self.x.apply(x), self.y.apply(y))
    }
}

fn unpack_pairs(block: &[u8; CALIBRATION_BLOCK_LEN]) -> [(u16, u16); 3] {
    core::array::from_fn(|i| {
        let b = &block[i * 3..i * 3 + 3];
        let x = ((u16::from(b[1]) << 8) & 0xF00) | u16::from(b[0]);
        let y = (u16::from(b[2]) << 4) | (u16::from(b[1]) >> 4);
        (x, y)
    })
}

/// Decode a left-stick block: (above, centre, below).
pub fn decode_left_calibration(block: &[u8; CALIBRATION_BLOCK_LEN]) -> StickCalibration {
    let [above, center, below] = unpack_pairs(block);
    StickCalibration {
        x: AxisCalibration::from_deltas(center.0, below.0, above.0),
        y: AxisCalibration::from_deltas(center.1, below.1, above.1),
    }
}

/// Decode a right-stick block: (centre, below, above).
pub fn decode_right_calibration(block: &[u8; CALIBRATION_BLOCK_LEN]) -> StickCalibration {
    let [center, below, above] = unpack_pairs(block);
    StickCalibration {
        x: AxisCalibration::from_deltas(center.0, below.0, above.0),
        y: AxisCalibration::from_deltas(center.1, below.1, above.1),
    }
}

/// Observed extents of a basic-report axis.
///
/// Basic reports have no calibration; extents start at 80 % of the 16-bit
/// range around the centre and widen to include every sample seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisExtents {
    min: u16,
    max: u16,
}

const EXTENT_CENTER: u16 = 0x8000;
const EXTENT_SEED: u16 = 26214; // 80 % of 0x8000

impl Default for AxisExtents {
    fn default() -> Self {
        Self {
            min: EXTENT_CENTER - EXTENT_SEED,
            max: EXTENT_CENTER + EXTENT_SEED,
        }
    }
}

impl AxisExtents {
    /// Widen the extents to cover `raw`.
    pub fn observe(&mut self, raw: u16) {
        self.min = self.min.min(raw);
        self.max = self.max.max(raw);
    }

    pub fn min(&self) -> u16 {
        self.min
    }

    pub fn max(&self) -> u16 {
        self.max
    }

    /// Widen with `raw`, then map it onto the canonical range.
    pub fn observe_and_apply(&mut self, raw: u16) -> i16 {
        self.observe(raw);
        AxisCalibration {
            min: self.min,
            center: EXTENT_CENTER,
            max: self.max,
        }
        .apply(raw)
    }
}
