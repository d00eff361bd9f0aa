//! ST Teseo GNSS command protocol
//!
//! The receiver speaks a line-oriented ASCII protocol. The host writes one
//! CRLF-terminated command and the receiver answers with zero or more NMEA
//! data lines followed by a status line echoing the command:
//!
//! ```text
//! host   → $PSTMNMEAREQUEST,100000,0\r\n
//! device ← $GPGLL,4055.04,N,01416.54,E,173526.000,A,A*55\r\n
//! device ← $PSTMNMEAREQUEST,100000,0\r\n
//! ```
//!
//! This crate only knows the commands and how to split and validate replies.
//! Moving bytes is the job of a transport in `teseo-core`/`teseo-drivers`.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod reply;

pub use command::{Command, Query, CATALOG, GGA, GLL, GSA, GSV, RMC, STATUS_PREFIX, VTG};
pub use reply::{
    parse_multiline_reply, ParseResult, RawReply, Record, LINE_END, MAX_RECORD_LEN, MAX_REPLY_LEN,
};
