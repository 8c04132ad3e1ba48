//! Mapping tables and the built-in default mapping.

use motebridge_report::{Button, StickDirection, TargetButton};
use serde::{Deserialize, Serialize};

/// Where a mapping reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Button(Button),
    Stick(StickDirection),
}

/// Where a mapping writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Button(TargetButton),
    Stick(StickDirection),
}

/// One source → destination edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingEntry {
    pub source: Source,
    pub destination: Destination,
}

impl MappingEntry {
    pub const fn new(source: Source, destination: Destination) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub const fn button(from: Button, to: TargetButton) -> Self {
        Self::new(Source::Button(from), Destination::Button(to))
    }

    pub const fn stick(from: StickDirection, to: StickDirection) -> Self {
        Self::new(Source::Stick(from), Destination::Stick(to))
    }
}

/// Ordered list of mapping entries. Several entries may share a destination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    pub fn new(entries: Vec<MappingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn push(&mut self, entry: MappingEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<MappingEntry> for MappingTable {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

const DEFAULT_BUTTONS: [(Button, TargetButton); 16] = [
    (Button::South, TargetButton::B),
    (Button::East, TargetButton::A),
    (Button::West, TargetButton::Y),
    (Button::North, TargetButton::X),
    (Button::L1, TargetButton::L),
    (Button::R1, TargetButton::R),
    (Button::L2, TargetButton::Zl),
    (Button::R2, TargetButton::Zr),
    (Button::Start, TargetButton::Plus),
    (Button::Select, TargetButton::Minus),
    (Button::Home, TargetButton::Home),
    (Button::Home, TargetButton::CoreHome),
    (Button::Up, TargetButton::Up),
    (Button::Down, TargetButton::Down),
    (Button::Left, TargetButton::Left),
    (Button::Right, TargetButton::Right),
];

/// The positional default mapping seeded for every device kind.
///
/// Face buttons keep their position (South → B, East → A, West → Y,
/// North → X), shoulders and triggers map to L/R/ZL/ZR, Home drives both the
/// classic and the core Home button, and each stick direction drives the
/// same classic stick direction.
pub fn default_mapping() -> MappingTable {
    DEFAULT_BUTTONS
        .iter()
        .map(|&(from, to)| MappingEntry::button(from, to))
        .chain(StickDirection::ALL.iter().map(|&d| MappingEntry::stick(d, d)))
        .collect()
}
