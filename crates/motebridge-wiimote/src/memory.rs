//! Extension register file and EEPROM image.
//!
//! The extension occupies `0xA40000..=0xA400FF`:
//!
//! | Offset | Content |
//! |--------|---------|
//! | `0x00..0x06` | Current classic data |
//! | `0x20..0x30` | Stick calibration, mirrored at `0x30` |
//! | `0x40..0x50` | Cipher key (host written) |
//! | `0xF0` | `0xAA` enables obfuscation, `0x55` disables it |
//! | `0xFA..0x100` | Identifier `00 00 A4 20 01 01` |

use motebridge_cipher::{CipherState, CipherTables, KEY_LEN};
use tracing::{debug, warn};

use crate::classic::CLASSIC_DATA_LEN;
use crate::ids::memory_map::{
    EEPROM_ACCEL_CALIBRATION, EEPROM_END, EXT_CALIBRATION, EXT_ENCRYPTION, EXT_IDENTIFIER,
    EXT_KEY, EXT_KEY_LAST,
};

const REGISTER_LEN: usize = 256;
const MAX_WRITE: usize = 16;

const ENCRYPTION_ON: u8 = 0xAA;
const ENCRYPTION_OFF: u8 = 0x55;

/// Classic controller identifier.
pub const CLASSIC_IDENTIFIER: [u8; 6] = [0x00, 0x00, 0xA4, 0x20, 0x01, 0x01];

/// `0x55` plus the sum of the first `len` bytes.
const fn checksum(bytes: &[u8], len: usize) -> u8 {
    let mut sum: u8 = 0x55;
    let mut i = 0;
    while i < len {
        sum = sum.wrapping_add(bytes[i]);
        i += 1;
    }
    sum
}

const fn accel_block() -> [u8; 10] {
    let mut block = [0x80, 0x80, 0x80, 0x00, 0x9A, 0x9A, 0x9A, 0x00, 0x40, 0x00];
    block[9] = checksum(&block, 9);
    block
}

/// Accelerometer calibration stored in EEPROM: zero-g X/Y/Z, one-g X/Y/Z,
/// a motor byte and a checksum.
pub const ACCEL_CALIBRATION_BLOCK: [u8; 10] = accel_block();

const fn classic_calibration() -> [u8; 16] {
    let mut block = [
        0xFC, 0x00, 0x80, // LX max, min, centre
        0xFC, 0x00, 0x80, // LY
        0xF8, 0x00, 0x80, // RX
        0xF8, 0x00, 0x80, // RY
        0x00, 0x00, // LT, RT rest
        0x00, 0x00,
    ];
    block[14] = checksum(&block, 14);
    block[15] = block[14].wrapping_add(0x55);
    block
}

/// Classic stick calibration with its two checksum bytes.
pub const CLASSIC_CALIBRATION_BLOCK: [u8; 16] = classic_calibration();

/// Side effect of a register write the caller may want to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterEvent {
    /// The last key byte was written and a cipher state derived.
    KeyDerived,
    /// The last key byte was written but no answer row matched.
    KeyRejected,
    EncryptionEnabled,
    EncryptionDisabled,
}

/// The extension's 256-byte register file plus its cipher state.
#[derive(Debug, Clone)]
pub struct ExtensionRegisters {
    regs: [u8; REGISTER_LEN],
    cipher: Option<CipherState>,
}

impl Default for ExtensionRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionRegisters {
    /// Power-on contents: neutral classic data, calibration, identifier.
    pub fn new() -> Self {
        let mut regs = [0u8; REGISTER_LEN];
        let cal = usize::from(EXT_CALIBRATION);
        regs[cal..cal + 16].copy_from_slice(&CLASSIC_CALIBRATION_BLOCK);
        regs[cal + 16..cal + 32].copy_from_slice(&CLASSIC_CALIBRATION_BLOCK);
        let id = usize::from(EXT_IDENTIFIER);
        regs[id..id + CLASSIC_IDENTIFIER.len()].copy_from_slice(&CLASSIC_IDENTIFIER);
        Self { regs, cipher: None }
    }

    /// `true` when the host enabled obfuscation.
    pub fn encryption_enabled(&self) -> bool {
        self.regs[usize::from(EXT_ENCRYPTION)] == ENCRYPTION_ON
    }

    /// The cipher derived from the last complete key, if any.
    pub fn cipher(&self) -> Option<&CipherState> {
        self.cipher.as_ref()
    }

    /// Cipher applied to outgoing bytes: present only while obfuscation is
    /// on and the key derived.
    pub fn active_cipher(&self) -> Option<&CipherState> {
        if self.encryption_enabled() {
            self.cipher.as_ref()
        } else {
            None
        }
    }

    /// Host write of up to 16 bytes at `offset`. Bytes past the end of the
    /// file are dropped.
    pub fn write(
        &mut self,
        offset: u8,
        data: &[u8],
        tables: &CipherTables,
    ) -> Option<RegisterEvent> {
        let start = usize::from(offset);
        let len = data.len().min(MAX_WRITE).min(REGISTER_LEN - start);
        if len == 0 {
            return None;
        }
        self.regs[start..start + len].copy_from_slice(&data[..len]);
        let covers = |reg: u8| (start..start + len).contains(&usize::from(reg));

        if covers(EXT_KEY_LAST) {
            return Some(self.load_key(tables));
        }
        if covers(EXT_ENCRYPTION) {
            return match self.regs[usize::from(EXT_ENCRYPTION)] {
                ENCRYPTION_ON => {
                    debug!("extension obfuscation enabled");
                    Some(RegisterEvent::EncryptionEnabled)
                }
                ENCRYPTION_OFF => {
                    debug!("extension obfuscation disabled");
                    Some(RegisterEvent::EncryptionDisabled)
                }
                _ => None,
            };
        }
        None
    }

    fn load_key(&mut self, tables: &CipherTables) -> RegisterEvent {
        let start = usize::from(EXT_KEY);
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&self.regs[start..start + KEY_LEN]);
        self.cipher = tables.derive(&key);
        if self.cipher.is_some() {
            debug!("extension key derived");
            RegisterEvent::KeyDerived
        } else {
            warn!("extension key matches no answer row, extension data stays plain");
            RegisterEvent::KeyRejected
        }
    }

    /// Host read of `len` bytes at `offset`, truncated at the end of the
    /// file and obfuscated while the cipher is active.
    pub fn read(&self, offset: u8, len: usize) -> Vec<u8> {
        let start = usize::from(offset);
        let end = start.saturating_add(len).min(REGISTER_LEN);
        let mut out = self.regs[start..end].to_vec();
        if let Some(cipher) = self.active_cipher() {
            cipher.encode(&mut out, start);
        }
        out
    }

    /// Store the current classic data at the start of the file.
    pub fn set_input_data(&mut self, data: &[u8; CLASSIC_DATA_LEN]) {
        self.regs[..CLASSIC_DATA_LEN].copy_from_slice(data);
    }

    /// Raw register contents without obfuscation.
    pub fn raw(&self) -> &[u8; REGISTER_LEN] {
        &self.regs
    }
}

/// EEPROM contents at `address..address + len`, or `None` when the range
/// leaves the EEPROM.
pub fn eeprom_read(address: u32, len: usize) -> Option<Vec<u8>> {
    let start = usize::try_from(address).ok()?;
    let end = start.checked_add(len)?;
    if end > usize::try_from(EEPROM_END).ok()? {
        return None;
    }
    let cal_start = usize::try_from(EEPROM_ACCEL_CALIBRATION).ok()?;
    let cal_end = cal_start + ACCEL_CALIBRATION_BLOCK.len();
    Some(
        (start..end)
            .map(|a| {
                if (cal_start..cal_end).contains(&a) {
                    ACCEL_CALIBRATION_BLOCK[a - cal_start]
                } else {
                    0
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_key(regs: &mut ExtensionRegisters, key: &[u8; KEY_LEN]) -> Option<RegisterEvent> {
        let tables = CipherTables::builtin();
        // Hosts write the key in three chunks.
        assert_eq!(regs.write(0x40, &key[..6], tables), None);
        assert_eq!(regs.write(0x46, &key[6..12], tables), None);
        regs.write(0x4C, &key[12..], tables)
    }

    #[test]
    fn test_checksums() {
        assert_eq!(ACCEL_CALIBRATION_BLOCK[9], checksum(&ACCEL_CALIBRATION_BLOCK, 9));
        assert_eq!(ACCEL_CALIBRATION_BLOCK[9], 0xE3);
        assert_eq!(CLASSIC_CALIBRATION_BLOCK[14], checksum(&CLASSIC_CALIBRATION_BLOCK, 14));
        assert_eq!(
            CLASSIC_CALIBRATION_BLOCK[15],
            CLASSIC_CALIBRATION_BLOCK[14].wrapping_add(0x55)
        );
    }

    #[test]
    fn test_power_on_contents() {
        let regs = ExtensionRegisters::new();
        assert_eq!(regs.read(0xFA, 6), CLASSIC_IDENTIFIER.to_vec());
        assert_eq!(regs.read(0x20, 16), CLASSIC_CALIBRATION_BLOCK.to_vec());
        assert_eq!(regs.read(0x30, 16), CLASSIC_CALIBRATION_BLOCK.to_vec());
        assert!(!regs.encryption_enabled());
    }

    #[test]
    fn test_read_truncates_at_end() {
        let regs = ExtensionRegisters::new();
        assert_eq!(regs.read(0xFE, 16).len(), 2);
    }

    #[test]
    fn test_derivable_key_obfuscates_reads() {
        let tables = CipherTables::builtin();
        let key = tables.key_material([9, 8, 7, 6, 5, 4, 3, 2, 1, 0], 2);
        let mut regs = ExtensionRegisters::new();
        assert_eq!(write_key(&mut regs, &key), Some(RegisterEvent::KeyDerived));
        assert_eq!(
            regs.write(0xF0, &[0xAA], tables),
            Some(RegisterEvent::EncryptionEnabled)
        );

        let mut id = regs.read(0xFA, 6);
        assert_ne!(id, CLASSIC_IDENTIFIER.to_vec());
        let cipher = regs.active_cipher().copied();
        assert!(cipher.is_some());
        if let Some(cipher) = cipher {
            cipher.decode(&mut id, 0xFA);
        }
        assert_eq!(id, CLASSIC_IDENTIFIER.to_vec());

        assert_eq!(
            regs.write(0xF0, &[0x55], tables),
            Some(RegisterEvent::EncryptionDisabled)
        );
        assert_eq!(regs.read(0xFA, 6), CLASSIC_IDENTIFIER.to_vec());
    }

    #[test]
    fn test_underivable_key_leaves_data_plain() {
        let tables = CipherTables::builtin();
        let mut key = tables.key_material([1; 10], 0);
        key[15] ^= 0xFF;
        let mut regs = ExtensionRegisters::new();
        let event = write_key(&mut regs, &key);
        // A corrupted check value can still collide with another row.
        if event == Some(RegisterEvent::KeyRejected) {
            regs.write(0xF0, &[0xAA], tables);
            assert!(regs.encryption_enabled());
            assert!(regs.active_cipher().is_none());
            assert_eq!(regs.read(0xFA, 6), CLASSIC_IDENTIFIER.to_vec());
        }
    }

    #[test]
    fn test_eeprom() {
        let block = eeprom_read(0x16, 10);
        assert_eq!(block, Some(ACCEL_CALIBRATION_BLOCK.to_vec()));
        assert_eq!(eeprom_read(0x00, 4), Some(vec![0; 4]));
        assert_eq!(eeprom_read(0x16F8, 16), None);
    }
}
