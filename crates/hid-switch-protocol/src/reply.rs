//! Subcommand replies carried in report `0x21`.
//!
//! | Byte | Content |
//! |------|---------|
//! | 0–12 | full input state, see [`crate::input`] |
//! | 13 | ACK: bit 7 set on success, low bits = reply data type |
//! | 14 | echoed subcommand ID |
//! | 15.. | reply data |
//!
//! SPI read replies echo the request: data 0–3 address (LE), data 4 size,
//! data 5.. payload. Device info replies carry the sub-type at data 2.

use crate::ids::{report_ids, subcommands};

const ACK_OFFSET: usize = 13;
const SUBCOMMAND_OFFSET: usize = 14;
const DATA_OFFSET: usize = 15;
const ACK_BIT: u8 = 0x80;

/// A borrowed view of a subcommand reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubcommandReply<'a> {
    pub ack: bool,
    pub subcommand: u8,
    pub data: &'a [u8],
}

/// A decoded SPI flash read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiReadReply<'a> {
    pub address: u32,
    pub payload: &'a [u8],
}

/// Parse a `0x21` report; `None` for other reports or truncated replies.
pub fn parse_subcommand_reply(data: &[u8]) -> Option<SubcommandReply<'_>> {
    if data.first() != Some(&report_ids::REPLY) || data.len() < DATA_OFFSET {
        return None;
    }
    Some(SubcommandReply {
        ack: data[ACK_OFFSET] & ACK_BIT != 0,
        subcommand: data[SUBCOMMAND_OFFSET],
        data: &data[DATA_OFFSET..],
    })
}

impl<'a> SubcommandReply<'a> {
    /// Decode as an SPI read reply; `None` if this is not one or the payload
    /// is shorter than the echoed size.
    pub fn spi_read(&self) -> Option<SpiReadReply<'a>> {
        if self.subcommand != subcommands::SPI_READ || self.data.len() < 5 {
            return None;
        }
        let address = u32::from_le_bytes([self.data[0], self.data[1], self.data[2], self.data[3]]);
        let size = usize::from(self.data[4]);
        let payload = self.data.get(5..5 + size)?;
        Some(SpiReadReply { address, payload })
    }

    /// Device sub-type byte of a device info reply.
    pub fn device_type(&self) -> Option<u8> {
        if self.subcommand != subcommands::DEVICE_INFO {
            return None;
        }
        self.data.get(2).copied()
    }
}
