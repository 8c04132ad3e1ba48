//! Bluetooth output report checksum used by the DualShock 4 and DualSense.
//!
//! Standard reflected CRC32 (polynomial `0xEDB88320`, seed `0xFFFFFFFF`,
//! final complement) over `[0xA2] ++ body`, stored little-endian in the last
//! four bytes of the report.

/// HIDP "DATA | Output" header byte included in the checksum.
pub const BT_OUTPUT_PREFIX: u8 = 0xA2;

/// CRC32 of the prefix byte followed by `body`.
pub fn bt_crc32(body: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&[BT_OUTPUT_PREFIX]);
    hasher.update(body);
    hasher.finalize()
}

/// Compute and store the trailing CRC of a full report in place.
///
/// Reports shorter than five bytes are left untouched.
pub fn seal_bt_crc(report: &mut [u8]) {
    let Some(split) = report.len().checked_sub(4).filter(|&s| s > 0) else {
        return;
    };
    let crc = bt_crc32(&report[..split]);
    report[split..].copy_from_slice(&crc.to_le_bytes());
}

/// `true` when the trailing four bytes hold the CRC of the preceding bytes.
pub fn verify_bt_crc(report: &[u8]) -> bool {
    let Some(split) = report.len().checked_sub(4).filter(|&s| s > 0) else {
        return false;
    };
    let (body, tail) = report.split_at(split);
    let mut stored = [0u8; 4];
    stored.copy_from_slice(tail);
    u32::from_le_bytes(stored) == bt_crc32(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_reference_crc() {
        // Check value of CRC-32/ISO-HDLC for "123456789".
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(b"123456789");
        assert_eq!(hasher.finalize(), 0xCBF4_3926);
    }

    #[test]
    fn test_seal_then_verify() {
        let mut report = [0u8; 12];
        report[0] = 0x11;
        report[3] = 0x42;
        seal_bt_crc(&mut report);
        assert!(verify_bt_crc(&report));
        report[3] ^= 1;
        assert!(!verify_bt_crc(&report));
    }

    #[test]
    fn test_short_reports() {
        let mut tiny = [1u8, 2, 3, 4];
        seal_bt_crc(&mut tiny);
        assert_eq!(tiny, [1, 2, 3, 4]);
        assert!(!verify_bt_crc(&tiny));
    }
}
