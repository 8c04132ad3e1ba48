//! Stick axes and native-range normalization.

use serde::{Deserialize, Serialize};

/// Width of the canonical axis range (`-1024..1024` before clamping).
pub const CANON_RANGE: i32 = 2048;

/// Largest canonical axis magnitude. The range is symmetric.
pub const AXIS_MAX: i16 = 1023;

/// One of the four canonical stick axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Axis {
    /// Left stick, positive = right.
    LeftX = 0,
    /// Left stick, positive = up.
    LeftY = 1,
    /// Right stick, positive = right.
    RightX = 2,
    /// Right stick, positive = up.
    RightY = 3,
}

impl Axis {
    /// All axes in storage order.
    pub const ALL: [Axis; 4] = [Axis::LeftX, Axis::LeftY, Axis::RightX, Axis::RightY];

    /// Index into a report's axis array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A stick axis together with a direction along it.
///
/// Mapping tables use these tokens so that "left stick up" can be bound to a
/// button, and a button can drive "right stick left" to full deflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickDirection {
    LeftUp,
    LeftDown,
    LeftLeft,
    LeftRight,
    RightUp,
    RightDown,
    RightLeft,
    RightRight,
}

impl StickDirection {
    /// All eight directions.
    pub const ALL: [StickDirection; 8] = [
        StickDirection::LeftUp,
        StickDirection::LeftDown,
        StickDirection::LeftLeft,
        StickDirection::LeftRight,
        StickDirection::RightUp,
        StickDirection::RightDown,
        StickDirection::RightLeft,
        StickDirection::RightRight,
    ];

    /// Axis this direction moves along.
    pub const fn axis(self) -> Axis {
        match self {
            StickDirection::LeftUp | StickDirection::LeftDown => Axis::LeftY,
            StickDirection::LeftLeft | StickDirection::LeftRight => Axis::LeftX,
            StickDirection::RightUp | StickDirection::RightDown => Axis::RightY,
            StickDirection::RightLeft | StickDirection::RightRight => Axis::RightX,
        }
    }

    /// `true` when this direction points towards positive axis values.
    pub const fn is_positive(self) -> bool {
        matches!(
            self,
            StickDirection::LeftUp
                | StickDirection::LeftRight
                | StickDirection::RightUp
                | StickDirection::RightRight
        )
    }
}

/// Clamp a wide intermediate value into the symmetric canonical range.
#[inline]
pub fn clamp_axis(value: i32) -> i16 {
    // Lossless: the clamp keeps the value inside i16.
    value.clamp(-i32::from(AXIS_MAX), i32::from(AXIS_MAX)) as i16
}

/// Rescale a raw unsigned sample from a native range of `range` distinct
/// values (e.g. 256 for an 8-bit axis) into the canonical range.
///
/// `scaled = (raw - range/2) * CANON_RANGE / range`, clamped. The native
/// midpoint maps to exactly zero and the mapping is monotonic.
pub fn rescale(raw: u32, range: u32) -> i16 {
    if range == 0 {
        return 0;
    }
    let range = i64::from(range);
    let centered = i64::from(raw) - range / 2;
    let scaled = centered * i64::from(CANON_RANGE) / range;
    clamp_axis(scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// [`rescale`] for an axis that is `bits` wide (8 → 0–255, 12 → 0–4095, ...).
#[inline]
pub fn rescale_bits(raw: u32, bits: u32) -> i16 {
    rescale(raw, 1u32 << bits.min(31))
}
