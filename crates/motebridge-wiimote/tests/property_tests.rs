//! Property tests for the emulated remote.

use std::sync::Arc;

use motebridge_cipher::CipherTables;
use motebridge_report::{Axis, ButtonId, TargetButton, TargetReport};
use motebridge_wiimote::{
    CLASSIC_DATA_LEN, Emulator, HostStatus, InputMode, decode_classic, extension_bytes,
};
use proptest::prelude::*;

const MODES: [u8; 9] = [0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x3D];

fn write_register(emu: &mut Emulator, offset: u8, data: &[u8]) {
    let mut cmd = [0u8; 22];
    cmd[..6].copy_from_slice(&[0x16, 0x04, 0xA4, 0x00, offset, data.len() as u8]);
    cmd[6..6 + data.len()].copy_from_slice(data);
    emu.handle_command(&cmd, &HostStatus::default());
}

fn target_report(buttons: u32, axes: [i32; 4]) -> TargetReport {
    let mut report = TargetReport::new();
    report.set_buttons(buttons);
    for (axis, value) in Axis::ALL.iter().zip(axes) {
        report.set_axis(*axis, value);
    }
    report
}

fn classic_mask() -> u32 {
    TargetButton::ALL
        .iter()
        .filter(|b| !b.is_core())
        .fold(0, |acc, b| acc | b.mask())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    #[test]
    fn prop_commands_never_panic(data in prop::collection::vec(any::<u8>(), 0..30)) {
        let mut emu = Emulator::new(Arc::new(CipherTables::default()));
        let _ = emu.handle_command(&data, &HostStatus::default());
    }

    /// Each mode produces a report of its documented length.
    #[test]
    fn prop_report_length_matches_mode(
        mode in prop::sample::select(MODES.to_vec()),
        continuous in any::<bool>(),
        buttons in any::<u32>(),
    ) {
        let mut emu = Emulator::new(Arc::new(CipherTables::default()));
        let flag = if continuous { 0x04 } else { 0x00 };
        let out = emu.handle_command(&[0x12, flag, mode], &HostStatus::default());
        prop_assert!(out.mode_changed);
        prop_assert_eq!(emu.continuous(), continuous);

        let wire = emu.encode_input(&target_report(buttons, [0; 4]));
        let expected = InputMode::from_u8(mode).map(InputMode::report_len);
        prop_assert_eq!(Some(wire.len()), expected);
        prop_assert_eq!(wire.id(), mode);
    }

    /// With a derived key and obfuscation enabled, the extension bytes of an
    /// input report decode back to the classic buttons that went in.
    #[test]
    fn prop_obfuscated_extension_decodes(
        seed in any::<[u8; 10]>(),
        row in 0usize..7,
        buttons in any::<u32>(),
        axes in any::<[i16; 4]>(),
    ) {
        let tables = CipherTables::builtin();
        let key = tables.key_material(seed, row);
        let mut emu = Emulator::new(Arc::new(tables.clone()));
        write_register(&mut emu, 0x40, &key[..6]);
        write_register(&mut emu, 0x46, &key[6..12]);
        write_register(&mut emu, 0x4C, &key[12..]);
        write_register(&mut emu, 0xF0, &[0xAA]);
        emu.handle_command(&[0x12, 0x04, 0x37], &HostStatus::default());

        let cipher = emu.registers().active_cipher().copied();
        prop_assert!(cipher.is_some());

        let report = target_report(buttons, axes.map(i32::from));
        let wire = emu.encode_input(&report);
        let ext = extension_bytes(wire.as_bytes());
        prop_assert!(ext.is_some());
        let mut data = [0u8; CLASSIC_DATA_LEN];
        if let (Some(ext), Some(cipher)) = (ext, cipher) {
            data.copy_from_slice(&ext[..CLASSIC_DATA_LEN]);
            cipher.decode(&mut data, 0);
        }
        let decoded = decode_classic(&data);
        prop_assert_eq!(decoded.buttons(), report.buttons() & classic_mask());
    }
}
