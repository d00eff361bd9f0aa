//! Reply splitting and validation
//!
//! A raw reply is a run of CRLF-terminated lines. Every line but the last
//! is a data line; the last one is the status line echoing the command.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ $GPGSV,3,1,11,...*7A\r\n     │  data line 0 ─┐
//! │ $GPGSV,3,2,11,...*76\r\n     │  data line 1  ├─ records[0..count]
//! │ $GPGSV,3,3,11,...*4B\r\n     │  data line 2 ─┘
//! │ $PSTMNMEAREQUEST,80000,0\r\n │  status line (not stored)
//! └──────────────────────────────┘
//! ```
//!
//! The records live in a caller-provided slice that is never grown. One
//! slot is consumed by the status line, so a slice of `N` records holds at
//! most `N - 1` data lines.

use heapless::String;

use crate::command::Command;

/// Line terminator used in both directions
pub const LINE_END: &str = "\r\n";

/// Maximum size of one complete reply in bytes
pub const MAX_REPLY_LEN: usize = 1024;

/// Maximum size of one data line in bytes, terminator included
///
/// NMEA caps sentences at 82 characters; the headroom covers the
/// proprietary sentences the receiver can emit.
pub const MAX_RECORD_LEN: usize = 128;

/// Offset of the signature inside a data line (`$` + 2-character talker id)
const SIGNATURE_OFFSET: usize = 3;

/// Shortest acceptable data line: offset plus a 4-byte signature
const MIN_LINE_LEN: usize = 7;

/// Raw reply as returned by one transport read
pub type RawReply = String<MAX_REPLY_LEN>;

/// One validated data line, terminator included
pub type Record = String<MAX_RECORD_LEN>;

/// Outcome of [`parse_multiline_reply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseResult {
    /// Every data line and the status line passed validation
    pub valid: bool,
    /// Number of data lines stored; always 0 when `valid` is false
    pub count: usize,
}

impl ParseResult {
    const INVALID: Self = Self {
        valid: false,
        count: 0,
    };
}

/// Split a raw reply into `records` and validate it against `command`
///
/// The capacity is `records.len()`. Slots at index `count` and above are
/// cleared on every call, so nothing from an earlier reply survives in a
/// reused buffer.
///
/// The reply is rejected (`valid == false`, `count == 0`, every slot empty)
/// when:
/// - a data line is shorter than 7 bytes, does not carry the command
///   signature at offset 3, or does not fit a [`Record`]
/// - the status line does not start with [`Command::echo`]
/// - the capacity runs out before the status line is reached
pub fn parse_multiline_reply(raw: &str, records: &mut [Record], command: &Command) -> ParseResult {
    let capacity = records.len();
    let mut result = ParseResult::INVALID;
    let mut start = 0;
    let mut count = 0;

    while count < capacity {
        let rest = &raw[start..];
        let line_len = match rest.find(LINE_END) {
            Some(end) if start + end + LINE_END.len() < raw.len() => end + LINE_END.len(),
            // Last CRLF in the reply, or none left: this is the status line
            _ => {
                result.valid = status_matches(rest, command);
                result.count = count;
                break;
            }
        };

        if !store_data_line(&rest[..line_len], command, &mut records[count]) {
            break;
        }
        start += line_len;
        count += 1;
    }

    if !result.valid {
        result = ParseResult::INVALID;
    }
    for slot in records[result.count..].iter_mut() {
        slot.clear();
    }
    result
}

fn status_matches(line: &str, command: &Command) -> bool {
    line.strip_suffix(LINE_END)
        .unwrap_or(line)
        .starts_with(command.echo())
}

fn store_data_line(line: &str, command: &Command, slot: &mut Record) -> bool {
    let signature = line
        .as_bytes()
        .get(SIGNATURE_OFFSET..SIGNATURE_OFFSET + command.signature.len());

    if line.len() < MIN_LINE_LEN || signature != Some(command.signature.as_bytes()) {
        return false;
    }

    slot.clear();
    slot.push_str(line).is_ok()
}
