//! Property tests: arbitrary device and host traffic never panics.

use std::sync::Arc;

use motebridge_engine::{Bridge, Classification, DeviceIdentity, EngineConfig, MockTransport};
use motebridge_report::BdAddr;
use proptest::prelude::*;

const DEVICES: [(u16, u16); 5] = [
    (0x054C, 0x0268),
    (0x054C, 0x09CC),
    (0x054C, 0x0CE6),
    (0x057E, 0x2009),
    (0x045E, 0x0B13),
];

fn report_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..100),
        // Keep a plausible report ID in front so parsers get past the first check.
        (
            prop::sample::select(vec![0x01u8, 0x11, 0x21, 0x30, 0x31, 0x3F]),
            prop::collection::vec(any::<u8>(), 0..100)
        )
            .prop_map(|(id, mut rest)| {
                rest.insert(0, id);
                rest
            }),
    ]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(200))]

    #[test]
    fn prop_traffic_never_panics(
        device in prop::sample::select(DEVICES.to_vec()),
        device_reports in prop::collection::vec(report_bytes(), 1..12),
        host_commands in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..24), 0..8),
    ) {
        let transport = Arc::new(MockTransport::new());
        let bridge = Bridge::new(
            EngineConfig { slot_count: 2, ..EngineConfig::default() },
            transport,
        );
        let identity = DeviceIdentity {
            address: BdAddr([1, 2, 3, 4, 5, 6]),
            classification: Classification::ThirdPartySeen,
            vendor_id: device.0,
            product_id: device.1,
        };
        prop_assert!(bridge.connect(1, identity).is_ok());

        for (i, report) in device_reports.iter().enumerate() {
            prop_assert!(bridge.on_device_input(1, report).is_ok());
            if let Some(cmd) = host_commands.get(i) {
                prop_assert!(bridge.on_host_command(1, cmd).is_ok());
            }
            bridge.tick();
        }
        prop_assert!(bridge.disconnect(1).is_ok());
        prop_assert!(!bridge.is_timer_running());
    }
}
