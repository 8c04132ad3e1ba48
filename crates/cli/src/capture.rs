//! Text capture format.
//!
//! One event per line; `#` starts a comment.
//!
//! ```text
//! dev  11 c0 00 80 80 80 80 28 ...   # report from the device
//! host 12 04 37                      # command from the host
//! tick 5                             # run the scheduler (count optional)
//! ```
//!
//! Hex bytes may be separated by spaces or written contiguously.

use crate::error::CliError;

/// One replayable event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Device(Vec<u8>),
    Host(Vec<u8>),
    Tick(u32),
}

/// An event and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureLine {
    pub line: usize,
    pub event: Event,
}

pub fn parse_capture(text: &str) -> Result<Vec<CaptureLine>, CliError> {
    let mut events = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let (keyword, rest) = content
            .split_once(char::is_whitespace)
            .unwrap_or((content, ""));
        let event = match keyword {
            "dev" => Event::Device(parse_hex(line, rest)?),
            "host" => Event::Host(parse_hex(line, rest)?),
            "tick" => Event::Tick(parse_count(line, rest.trim())?),
            other => return Err(CliError::capture(line, format!("unknown event `{other}`"))),
        };
        events.push(CaptureLine { line, event });
    }
    Ok(events)
}

fn parse_hex(line: usize, text: &str) -> Result<Vec<u8>, CliError> {
    let digits: String = text.split_whitespace().collect();
    if digits.is_empty() {
        return Err(CliError::capture(line, "missing report bytes"));
    }
    hex::decode(&digits).map_err(|err| CliError::capture(line, err.to_string()))
}

fn parse_count(line: usize, text: &str) -> Result<u32, CliError> {
    if text.is_empty() {
        return Ok(1);
    }
    text.parse()
        .map_err(|err: std::num::ParseIntError| CliError::capture(line, format!("tick count: {err}")))
}
