//! motebridge-replay - replay captured controller traffic
//!
//! Feeds a text capture of device reports and host commands through the
//! bridge engine, using a recording transport, and prints every report the
//! bridge sends in response.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod capture;
mod error;
mod output;
mod replay;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use motebridge_cipher::CipherTables;
use motebridge_engine::{Classification, DeviceIdentity};
use motebridge_report::BdAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;
use crate::replay::ReplayOptions;

#[derive(Parser, Debug)]
#[command(name = "motebridge-replay")]
#[command(about = "Replay captured controller traffic through the motebridge engine")]
#[command(version)]
#[command(long_about = "
motebridge-replay drives one emulated device through the bridge. Each line of
the capture is `dev <hex>` (a report from the pad), `host <hex>` (a command
from the host) or `tick [count]` (scheduler passes). Every report the bridge
sends is printed with the capture line that caused it.
")]
struct Cli {
    /// Capture file, or `-` for stdin
    capture: PathBuf,

    /// Vendor ID of the replayed device (hex)
    #[arg(long, value_parser = parse_hex_u16, default_value = "054c")]
    vendor: u16,

    /// Product ID of the replayed device (hex)
    #[arg(long, value_parser = parse_hex_u16, default_value = "09cc")]
    product: u16,

    /// Bluetooth address of the replayed device
    #[arg(long, default_value = "00:00:00:00:00:01")]
    address: BdAddr,

    /// Treat the device as a confirmed Switch-family pad
    #[arg(long)]
    switch_confirmed: bool,

    /// Run one scheduler pass after every device report
    #[arg(long)]
    auto_tick: bool,

    /// Load the extension cipher tables from a raw blob (answer rows then
    /// substitution boxes) instead of the built-in set
    #[arg(long, value_name = "FILE")]
    cipher_tables: Option<PathBuf>,

    /// Decode input reports sent to the host
    #[arg(short, long)]
    decode: bool,

    /// Output JSON lines for machine parsing
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_hex_u16(s: &str) -> Result<u16, CliError> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16)
        .map_err(|err| CliError::InvalidArgument(format!("{s} is not a 16-bit hex value ({err})")))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("motebridge={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            let exit_code = e
                .downcast_ref::<CliError>()
                .map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let text = read_capture(&cli.capture)?;
    let events = capture::parse_capture(&text)?;

    let cipher_tables = match &cli.cipher_tables {
        Some(path) => Some(Arc::new(read_cipher_tables(path)?)),
        None => None,
    };

    let options = ReplayOptions {
        identity: DeviceIdentity {
            address: cli.address,
            classification: if cli.switch_confirmed {
                Classification::ThirdPartySwitchConfirmed
            } else {
                Classification::ThirdPartySeen
            },
            vendor_id: cli.vendor,
            product_id: cli.product,
        },
        auto_tick: cli.auto_tick,
        decode: cli.decode,
        cipher_tables,
    };
    let result = replay::replay(&events, &options)?;

    if cli.json {
        output::print_replay_json(&result).map_err(CliError::from)?;
    } else {
        output::print_replay_human(&result);
    }
    Ok(())
}

fn read_cipher_tables(path: &Path) -> Result<CipherTables> {
    let raw = std::fs::read(path)
        .map_err(CliError::from)
        .with_context(|| format!("reading cipher tables {}", path.display()))?;
    let tables = CipherTables::from_bytes(&raw)
        .map_err(CliError::from)
        .with_context(|| format!("loading cipher tables {}", path.display()))?;
    Ok(tables)
}

fn read_capture(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(CliError::from)
            .context("reading capture from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .map_err(CliError::from)
        .with_context(|| format!("reading capture {}", path.display()))
}
