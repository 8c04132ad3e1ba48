//! Device identity and parser selection.

use motebridge_errors::DeviceError;
use motebridge_hid_ds3_protocol::DS3_PRODUCT_ID;
use motebridge_hid_ds4_protocol::{SONY_VENDOR_ID, product_ids as ds4_ids};
use motebridge_hid_dualsense_protocol::product_ids as dualsense_ids;
use motebridge_hid_switch_protocol::{NINTENDO_VENDOR_ID, product_ids as switch_ids};
use motebridge_hid_xbox_protocol::{MICROSOFT_VENDOR_ID, product_ids as xbox_ids};
use motebridge_report::{BdAddr, DeviceKind};
use serde::{Deserialize, Serialize};

/// What the host's pairing store knows about a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// A first-party remote; the host talks to it directly.
    Official,
    /// A third-party device seen before, identified by vendor/product.
    ThirdPartySeen,
    /// A device that answered the Switch-family handshake earlier.
    ThirdPartySwitchConfirmed,
    Unknown,
}

/// Identity handed over once at connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub address: BdAddr,
    pub classification: Classification,
    pub vendor_id: u16,
    pub product_id: u16,
}

/// Pick the device kind, and with it the parser, for a connecting device.
///
/// Switch-confirmed devices always get the Switch parser. Official remotes
/// are not bridged.
pub fn classify(identity: &DeviceIdentity) -> Result<DeviceKind, DeviceError> {
    match identity.classification {
        Classification::Official => {
            return Err(DeviceError::OfficialController(identity.address.to_string()));
        }
        Classification::ThirdPartySwitchConfirmed => return Ok(DeviceKind::SwitchGeneric),
        Classification::ThirdPartySeen | Classification::Unknown => {}
    }

    let (vid, pid) = (identity.vendor_id, identity.product_id);
    let kind = match vid {
        SONY_VENDOR_ID if pid == DS3_PRODUCT_ID => DeviceKind::DualShock3,
        SONY_VENDOR_ID if ds4_ids::ALL.contains(&pid) => DeviceKind::DualShock4,
        SONY_VENDOR_ID if dualsense_ids::ALL.contains(&pid) => DeviceKind::DualSense,
        NINTENDO_VENDOR_ID if switch_ids::ALL.contains(&pid) => DeviceKind::SwitchGeneric,
        MICROSOFT_VENDOR_ID if xbox_ids::ALL.contains(&pid) => DeviceKind::XboxOne,
        _ => return Err(DeviceError::unsupported(vid, pid)),
    };
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(classification: Classification, vendor_id: u16, product_id: u16) -> DeviceIdentity {
        DeviceIdentity {
            address: BdAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]),
            classification,
            vendor_id,
            product_id,
        }
    }

    #[test]
    fn test_known_devices() {
        let cases = [
            (0x054C, 0x0268, DeviceKind::DualShock3),
            (0x054C, 0x05C4, DeviceKind::DualShock4),
            (0x054C, 0x09CC, DeviceKind::DualShock4),
            (0x054C, 0x0CE6, DeviceKind::DualSense),
            // Switch devices start generic until device info refines them.
            (0x057E, 0x2009, DeviceKind::SwitchGeneric),
            (0x045E, 0x0B13, DeviceKind::XboxOne),
        ];
        for (vid, pid, kind) in cases {
            let got = classify(&identity(Classification::ThirdPartySeen, vid, pid));
            assert_eq!(got, Ok(kind), "{vid:#06x}:{pid:#06x}");
        }
    }

    #[test]
    fn test_switch_confirmed_ignores_ids() {
        let got = classify(&identity(Classification::ThirdPartySwitchConfirmed, 0x1234, 0x5678));
        assert_eq!(got, Ok(DeviceKind::SwitchGeneric));
    }

    #[test]
    fn test_official_not_bridged() {
        let got = classify(&identity(Classification::Official, 0x057E, 0x0306));
        assert!(matches!(got, Err(DeviceError::OfficialController(_))));
    }

    #[test]
    fn test_unsupported() {
        let got = classify(&identity(Classification::Unknown, 0x1234, 0x5678));
        assert_eq!(got, Err(DeviceError::unsupported(0x1234, 0x5678)));
    }
}
