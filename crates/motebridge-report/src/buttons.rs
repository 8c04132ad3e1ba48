//! Button namespaces and the shared dpad direction table.

use serde::{Deserialize, Serialize};

/// A button namespace whose members map onto bits of a `u32` mask.
pub trait ButtonId: Copy + Eq + core::fmt::Debug + 'static {
    /// Every member, in bit order.
    const ALL: &'static [Self];

    /// Bit position of this button.
    fn index(self) -> u32;

    /// Single-bit mask of this button.
    #[inline]
    fn mask(self) -> u32 {
        1u32 << self.index()
    }
}

/// Vendor-neutral source buttons produced by every parser.
///
/// Face buttons are named by position (South = DualShock cross, Xbox A,
/// Switch B) so that default mappings stay positional across families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Button {
    Up = 0,
    Down,
    Left,
    Right,
    South,
    East,
    West,
    North,
    L1,
    R1,
    L2,
    R2,
    L3,
    R3,
    Start,
    Select,
    Home,
    Capture,
    Touchpad,
    Mute,
    /// Joy-Con rail button (left of the rail).
    Sl,
    /// Joy-Con rail button (right of the rail).
    Sr,
}

impl ButtonId for Button {
    const ALL: &'static [Self] = &[
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::South,
        Button::East,
        Button::West,
        Button::North,
        Button::L1,
        Button::R1,
        Button::L2,
        Button::R2,
        Button::L3,
        Button::R3,
        Button::Start,
        Button::Select,
        Button::Home,
        Button::Capture,
        Button::Touchpad,
        Button::Mute,
        Button::Sl,
        Button::Sr,
    ];

    #[inline]
    fn index(self) -> u32 {
        self as u32
    }
}

/// Buttons of the emulated controller: the core remote plus the classic
/// extension pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TargetButton {
    CoreA = 0,
    CoreB,
    CoreOne,
    CoreTwo,
    CorePlus,
    CoreMinus,
    CoreHome,
    CoreUp,
    CoreDown,
    CoreLeft,
    CoreRight,
    A,
    B,
    X,
    Y,
    L,
    R,
    Zl,
    Zr,
    Plus,
    Minus,
    Home,
    Up,
    Down,
    Left,
    Right,
}

impl TargetButton {
    /// `true` for buttons on the remote itself rather than the extension.
    pub const fn is_core(self) -> bool {
        (self as u8) <= (TargetButton::CoreRight as u8)
    }
}

impl ButtonId for TargetButton {
    const ALL: &'static [Self] = &[
        TargetButton::CoreA,
        TargetButton::CoreB,
        TargetButton::CoreOne,
        TargetButton::CoreTwo,
        TargetButton::CorePlus,
        TargetButton::CoreMinus,
        TargetButton::CoreHome,
        TargetButton::CoreUp,
        TargetButton::CoreDown,
        TargetButton::CoreLeft,
        TargetButton::CoreRight,
        TargetButton::A,
        TargetButton::B,
        TargetButton::X,
        TargetButton::Y,
        TargetButton::L,
        TargetButton::R,
        TargetButton::Zl,
        TargetButton::Zr,
        TargetButton::Plus,
        TargetButton::Minus,
        TargetButton::Home,
        TargetButton::Up,
        TargetButton::Down,
        TargetButton::Left,
        TargetButton::Right,
    ];

    #[inline]
    fn index(self) -> u32 {
        self as u32
    }
}

const UP: u32 = 1 << Button::Up as u32;
const DOWN: u32 = 1 << Button::Down as u32;
const LEFT: u32 = 1 << Button::Left as u32;
const RIGHT: u32 = 1 << Button::Right as u32;

/// Hat value meaning "no direction" in the 9-entry table.
pub const DPAD_RELEASED: u8 = 8;

/// N, NE, E, SE, S, SW, W, NW, released.
const DPAD_TABLE: [u32; 9] = [
    UP,
    UP | RIGHT,
    RIGHT,
    RIGHT | DOWN,
    DOWN,
    DOWN | LEFT,
    LEFT,
    LEFT | UP,
    0,
];

/// Decode a zero-based hat value (0 = north, clockwise, 8 = released) into
/// canonical dpad bits. Out-of-table values decode as released.
#[inline]
pub fn hat_buttons(raw: u8) -> u32 {
    DPAD_TABLE.get(usize::from(raw)).copied().unwrap_or(0)
}
