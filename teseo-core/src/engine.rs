//! Query engine
//!
//! Every query is one write of a catalog command, one blocking read of the
//! whole reply and one parse. There is no retry: a reply that fails
//! validation is handed back with `valid == false`.

use teseo_protocol::{
    parse_multiline_reply, Command, ParseResult, Query, RawReply, Record, GGA, GLL, GSA, GSV,
    RMC, VTG,
};

use crate::error::Error;
use crate::transport::Transport;

/// Slots used by single-line queries: one data line plus the status line
pub const SINGLE_LINE_CAPACITY: usize = 2;

/// Result of a single-line query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reply<'a> {
    /// The reply passed validation
    pub valid: bool,
    /// The data line, CRLF included; empty when `valid` is false
    pub line: &'a str,
}

/// Driver for one Teseo receiver
pub struct Teseo<T> {
    transport: T,
    single_line: [Record; SINGLE_LINE_CAPACITY],
}

impl<T: Transport> Teseo<T> {
    /// Create a driver on top of a transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            single_line: [Record::new(), Record::new()],
        }
    }

    /// Access the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Write raw text to the receiver
    pub fn write(&mut self, text: &str) -> Result<(), Error<T::Error>> {
        self.transport.write(text).map_err(Error::Transport)
    }

    /// Read one raw reply from the receiver
    ///
    /// `reply` is cleared first, so an empty buffer afterwards means the
    /// transport had nothing.
    pub fn read(&mut self, reply: &mut RawReply) -> Result<(), Error<T::Error>> {
        reply.clear();
        self.transport.read(reply).map_err(Error::Transport)
    }

    /// Send a command that answers with one data line
    ///
    /// The line borrows the driver's scratch buffer and stays valid until
    /// the next query.
    pub fn ask_single(&mut self, command: &Command) -> Result<Reply<'_>, Error<T::Error>> {
        let mut raw = RawReply::new();
        self.write(command.text)?;
        self.read(&mut raw)?;

        let result = parse_multiline_reply(&raw, &mut self.single_line, command);
        log_result(command, &result);

        Ok(Reply {
            valid: result.valid,
            line: self.single_line[0].as_str(),
        })
    }

    /// Send a command that may answer with several data lines
    ///
    /// `records.len()` is the capacity; one slot goes to the status line,
    /// so at most `records.len() - 1` data lines fit. A reply with more is
    /// reported invalid, not truncated.
    pub fn ask_multiple(
        &mut self,
        command: &Command,
        records: &mut [Record],
    ) -> Result<ParseResult, Error<T::Error>> {
        let mut raw = RawReply::new();
        self.write(command.text)?;
        self.read(&mut raw)?;

        let result = parse_multiline_reply(&raw, records, command);
        log_result(command, &result);
        Ok(result)
    }

    /// Send any catalog query
    ///
    /// Single-line queries land in `records[0]` with a capacity of
    /// [`SINGLE_LINE_CAPACITY`]; multi-line queries use all of `records`.
    pub fn ask(
        &mut self,
        query: Query,
        records: &mut [Record],
    ) -> Result<ParseResult, Error<T::Error>> {
        if query.is_multi_line() {
            return self.ask_multiple(query.command(), records);
        }
        let capacity = records.len().min(SINGLE_LINE_CAPACITY);
        self.ask_multiple(query.command(), &mut records[..capacity])
    }

    /// Geographic position
    pub fn ask_gll(&mut self) -> Result<Reply<'_>, Error<T::Error>> {
        self.ask_single(&GLL)
    }

    /// Fix data
    pub fn ask_gga(&mut self) -> Result<Reply<'_>, Error<T::Error>> {
        self.ask_single(&GGA)
    }

    /// Recommended minimum data
    pub fn ask_rmc(&mut self) -> Result<Reply<'_>, Error<T::Error>> {
        self.ask_single(&RMC)
    }

    /// Course and speed over ground
    pub fn ask_vtg(&mut self) -> Result<Reply<'_>, Error<T::Error>> {
        self.ask_single(&VTG)
    }

    /// Satellites in view, one record per GSV sentence
    pub fn ask_gsv(&mut self, records: &mut [Record]) -> Result<ParseResult, Error<T::Error>> {
        self.ask_multiple(&GSV, records)
    }

    /// Active satellites and DOP, one record per GSA sentence
    pub fn ask_gsa(&mut self, records: &mut [Record]) -> Result<ParseResult, Error<T::Error>> {
        self.ask_multiple(&GSA, records)
    }
}

#[cfg(feature = "defmt")]
fn log_result(command: &Command, result: &ParseResult) {
    if result.valid {
        defmt::debug!("{} reply: {} records", command.signature, result.count);
    } else {
        defmt::warn!("{} reply rejected", command.signature);
    }
}

#[cfg(not(feature = "defmt"))]
fn log_result(_command: &Command, _result: &ParseResult) {}
