//! Drive one device through the bridge and collect what it sends.

use std::sync::Arc;

use motebridge_cipher::CipherTables;
use motebridge_engine::{
    Bridge, DeviceIdentity, EngineConfig, MockTransport, SlotSnapshot, mock::Direction,
};
use motebridge_report::{DeviceKind, TargetButton, TargetReport};
use motebridge_wiimote::{
    CLASSIC_DATA_LEN, InputMode, decode_classic, decode_core_buttons, extension_bytes,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::capture::{CaptureLine, Event};
use crate::error::CliError;

const HANDLE: usize = 0;

#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub identity: DeviceIdentity,
    /// Run one scheduler pass after every device report.
    pub auto_tick: bool,
    /// Decode input reports sent to the host.
    pub decode: bool,
    /// Extension cipher tables; the built-in set when `None`.
    pub cipher_tables: Option<Arc<CipherTables>>,
}

/// One report the bridge sent.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Capture line that caused the report; 0 for the connect.
    pub line: usize,
    pub direction: &'static str,
    #[serde(serialize_with = "serialize_hex")]
    pub bytes: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<Decoded>,
}

/// Host-side view of an input report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub mode: u8,
    pub core: Vec<TargetButton>,
    pub classic: Vec<TargetButton>,
    pub axes: [i16; 4],
    /// Extension bytes were de-obfuscated before decoding.
    pub obfuscated: bool,
}

#[derive(Debug)]
pub struct Replay {
    pub kind: DeviceKind,
    pub records: Vec<Record>,
    /// Slot state after the last event.
    pub last: Option<SlotSnapshot>,
}

pub fn replay(events: &[CaptureLine], options: &ReplayOptions) -> Result<Replay, CliError> {
    let transport = Arc::new(MockTransport::new());
    let config = EngineConfig {
        slot_count: 1,
        timer_thread: false,
        ..EngineConfig::default()
    };
    let config = match &options.cipher_tables {
        Some(tables) => EngineConfig {
            cipher_tables: Arc::clone(tables),
            ..config
        },
        None => config,
    };
    let bridge = Bridge::new(config, transport.clone());

    let kind = bridge.connect(HANDLE, options.identity)?;
    info!(?kind, events = events.len(), "replaying capture");

    let mut records = Vec::new();
    collect(&transport, &bridge, 0, options.decode, &mut records);

    for CaptureLine { line, event } in events {
        debug!(line, ?event, "event");
        match event {
            Event::Device(bytes) => {
                bridge.on_device_input(HANDLE, bytes)?;
                if options.auto_tick {
                    bridge.tick();
                }
            }
            Event::Host(bytes) => bridge.on_host_command(HANDLE, bytes)?,
            Event::Tick(count) => {
                for _ in 0..*count {
                    bridge.tick();
                }
            }
        }
        collect(&transport, &bridge, *line, options.decode, &mut records);
    }

    let last = bridge.snapshot(HANDLE);
    bridge.shutdown();
    Ok(Replay {
        kind,
        records,
        last,
    })
}

fn collect(
    transport: &MockTransport,
    bridge: &Bridge,
    line: usize,
    decode: bool,
    records: &mut Vec<Record>,
) {
    let snapshot = if decode { bridge.snapshot(HANDLE) } else { None };
    for sent in transport.take() {
        let (direction, decoded) = match sent.direction {
            Direction::ToHost => ("host", snapshot.as_ref().and_then(|s| decode_input(&sent.bytes, s))),
            Direction::ToDevice => ("dev", None),
        };
        records.push(Record {
            line,
            direction,
            bytes: sent.bytes,
            decoded,
        });
    }
}

/// Decode an input report the way the host would see it.
pub fn decode_input(bytes: &[u8], snapshot: &SlotSnapshot) -> Option<Decoded> {
    let mode = InputMode::from_u8(*bytes.first()?)?;

    let mut core = TargetReport::new();
    if mode != InputMode::Ext21 {
        core.set_buttons(decode_core_buttons([*bytes.get(1)?, *bytes.get(2)?]));
    }

    let mut data = [0u8; CLASSIC_DATA_LEN];
    let ext = extension_bytes(bytes).and_then(|ext| ext.get(..CLASSIC_DATA_LEN));
    let classic = match ext {
        Some(ext) => {
            data.copy_from_slice(ext);
            let cipher = snapshot.cipher.filter(|_| snapshot.encryption);
            if let Some(cipher) = cipher {
                cipher.decode(&mut data, 0);
            }
            Some((decode_classic(&data), cipher.is_some()))
        }
        None => None,
    };

    let (classic, axes, obfuscated) = match classic {
        Some((report, obfuscated)) => (report.pressed().collect(), report.axes(), obfuscated),
        None => (Vec::new(), [0; 4], false),
    };
    Some(Decoded {
        mode: mode.id(),
        core: core.pressed().collect(),
        classic,
        axes,
        obfuscated,
    })
}

fn serialize_hex<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}
