//! Output formatting for replay results

use anyhow::Error;
use colored::*;
use serde_json::json;

use crate::replay::{Decoded, Replay};

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": { "message": error.to_string() }
    });
    match serde_json::to_string(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// One JSON object per record, then a summary object.
pub fn print_replay_json(replay: &Replay) -> serde_json::Result<()> {
    for record in &replay.records {
        println!("{}", serde_json::to_string(record)?);
    }
    let summary = json!({
        "success": true,
        "kind": replay.kind,
        "reports": replay.records.len(),
        "ready": replay.last.as_ref().is_some_and(|s| s.status.ready),
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

pub fn print_replay_human(replay: &Replay) {
    println!("{} {}", "Device:".bold(), replay.kind);
    for record in &replay.records {
        let direction = match record.direction {
            "host" => "-> host".green(),
            _ => "-> dev ".cyan(),
        };
        println!("{:>5} {} {}", record.line, direction, spaced_hex(&record.bytes));
        if let Some(decoded) = &record.decoded {
            println!("{:>13} {}", "", describe(decoded).dimmed());
        }
    }
    if let Some(last) = &replay.last {
        println!(
            "{} mode {:#04x}{}, leds {:#x}, ready {}, obfuscation {}",
            "Final:".bold(),
            last.mode.id(),
            if last.continuous { " (continuous)" } else { "" },
            last.leds,
            last.status.ready,
            if last.encryption { "on" } else { "off" },
        );
    }
}

fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(decoded: &Decoded) -> String {
    format!(
        "core {:?} classic {:?} axes {:?}{}",
        decoded.core,
        decoded.classic,
        decoded.axes,
        if decoded.obfuscated { " (decrypted)" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use motebridge_report::TargetButton;

    #[test]
    fn test_spaced_hex() {
        assert_eq!(spaced_hex(&[0x37, 0x00, 0xAB]), "37 00 ab");
        assert_eq!(spaced_hex(&[]), "");
    }

    #[test]
    fn test_describe() {
        let decoded = Decoded {
            mode: 0x37,
            core: vec![TargetButton::CoreHome],
            classic: vec![TargetButton::B],
            axes: [0, 10, 0, 0],
            obfuscated: true,
        };
        assert_eq!(
            describe(&decoded),
            "core [CoreHome] classic [B] axes [0, 10, 0, 0] (decrypted)"
        );
    }
}
