//! Canonical → target report transformation.

use motebridge_report::{AXIS_MAX, CanonicalReport, StickDirection, TargetReport};

use crate::config::CommonConfig;
use crate::table::{Destination, MappingTable, Source};

fn drive(out: &mut TargetReport, direction: StickDirection, magnitude: i16) {
    let delta = if direction.is_positive() {
        i32::from(magnitude)
    } else {
        -i32::from(magnitude)
    };
    out.accumulate_axis(direction.axis(), delta);
}

/// Apply `table` to `input`.
///
/// The output starts cleared; destinations no entry writes stay released or
/// centred. Button destinations OR together, stick destinations accumulate
/// with clamping. A stick source fires a button destination once its
/// magnitude reaches `common.deadzone`; a pressed button source drives a
/// stick destination to full deflection. Without a table the output is
/// neutral.
pub fn remap(
    input: &CanonicalReport,
    table: Option<&MappingTable>,
    common: &CommonConfig,
) -> TargetReport {
    let mut out = TargetReport::new();
    let Some(table) = table else {
        return out;
    };

    for entry in table.entries() {
        match (entry.source, entry.destination) {
            (Source::Button(button), destination) => {
                if !input.is_pressed(button) {
                    continue;
                }
                match destination {
                    Destination::Button(target) => out.press(target),
                    Destination::Stick(direction) => drive(&mut out, direction, AXIS_MAX),
                }
            }
            (Source::Stick(source), destination) => {
                let magnitude = input.directional_magnitude(source.axis(), source.is_positive());
                match destination {
                    Destination::Stick(direction) => drive(&mut out, direction, magnitude),
                    Destination::Button(target) => {
                        let magnitude = magnitude.unsigned_abs();
                        if magnitude >= common.deadzone {
                            out.press(target);
                        }
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{MappingEntry, default_mapping};
    use motebridge_report::{Axis, Button, TargetButton};

    fn stick_to_button(deadzone: u16, value: i32) -> bool {
        let table = MappingTable::new(vec![MappingEntry::new(
            Source::Stick(StickDirection::LeftRight),
            Destination::Button(TargetButton::CoreRight),
        )]);
        let mut input = CanonicalReport::new();
        input.set_axis(Axis::LeftX, value);
        remap(&input, Some(&table), &CommonConfig { deadzone })
            .is_pressed(TargetButton::CoreRight)
    }

    #[test]
    fn test_deadzone_boundary() {
        assert!(stick_to_button(512, 512));
        assert!(!stick_to_button(512, 511));
        assert!(!stick_to_button(512, -900));
        assert!(stick_to_button(1, 1));
        assert!(!stick_to_button(1, 0));
    }

    #[test]
    fn test_zero_deadzone_always_fires() {
        assert!(stick_to_button(0, 0));
        assert!(stick_to_button(0, -900));
    }

    #[test]
    fn test_or_composition() {
        let table = MappingTable::new(vec![
            MappingEntry::button(Button::South, TargetButton::A),
            MappingEntry::button(Button::East, TargetButton::A),
        ]);
        for (south, east) in [(true, false), (false, true), (true, true), (false, false)] {
            let mut input = CanonicalReport::new();
            input.set(Button::South, south);
            input.set(Button::East, east);
            let out = remap(&input, Some(&table), &CommonConfig::default());
            assert_eq!(out.is_pressed(TargetButton::A), south || east);
            assert_eq!(out.pressed().count(), usize::from(south || east));
        }
    }

    #[test]
    fn test_button_drives_stick() {
        let table = MappingTable::new(vec![
            MappingEntry::new(
                Source::Button(Button::L1),
                Destination::Stick(StickDirection::RightLeft),
            ),
            MappingEntry::new(
                Source::Button(Button::R1),
                Destination::Stick(StickDirection::RightLeft),
            ),
        ]);
        let mut input = CanonicalReport::new();
        input.press(Button::L1);
        input.press(Button::R1);
        let out = remap(&input, Some(&table), &CommonConfig::default());
        assert_eq!(out.axis(Axis::RightX), -AXIS_MAX);
        assert_eq!(out.axis(Axis::RightY), 0);
    }

    #[test]
    fn test_stick_to_stick_sums_with_clamp() {
        let table = MappingTable::new(vec![
            MappingEntry::stick(StickDirection::LeftUp, StickDirection::LeftUp),
            MappingEntry::stick(StickDirection::RightUp, StickDirection::LeftUp),
            MappingEntry::stick(StickDirection::LeftDown, StickDirection::LeftDown),
        ]);
        let mut input = CanonicalReport::new();
        input.set_axis(Axis::LeftY, 700);
        input.set_axis(Axis::RightY, 700);
        let out = remap(&input, Some(&table), &CommonConfig::default());
        assert_eq!(out.axis(Axis::LeftY), AXIS_MAX);

        input.set_axis(Axis::LeftY, -300);
        input.set_axis(Axis::RightY, 100);
        let out = remap(&input, Some(&table), &CommonConfig::default());
        assert_eq!(out.axis(Axis::LeftY), -200);
    }

    #[test]
    fn test_default_mapping_end_to_end() {
        let mut input = CanonicalReport::new();
        input.press(Button::Up);
        input.press(Button::South);
        input.press(Button::Home);
        input.set_axis(Axis::RightX, -400);
        let out = remap(&input, Some(&default_mapping()), &CommonConfig::default());
        assert_eq!(
            out.pressed().collect::<Vec<_>>(),
            vec![
                TargetButton::CoreHome,
                TargetButton::B,
                TargetButton::Home,
                TargetButton::Up
            ]
        );
        assert_eq!(out.axes(), [0, 0, -400, 0]);
    }

    #[test]
    fn test_missing_table_is_neutral() {
        let mut input = CanonicalReport::new();
        input.press(Button::South);
        input.set_axis(Axis::LeftX, 1000);
        assert!(remap(&input, None, &CommonConfig::default()).is_neutral());
    }
}
