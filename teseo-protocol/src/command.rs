//! Teseo command catalog
//!
//! Each query is a fixed command string paired with the 4-character
//! signature its data lines carry at offset 3 (after the `$` and the
//! 2-character talker id, e.g. `$GPGLL,` or `$GNGSA,`).

/// Every status echo and acknowledgement line starts with this
pub const STATUS_PREFIX: &str = "$PSTM";

/// A command and the signature of the data lines it produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Wire text, including the CRLF terminator
    pub text: &'static str,
    /// Expected message type at offset 3 of every data line
    pub signature: &'static str,
}

impl Command {
    /// Create a command
    pub const fn new(text: &'static str, signature: &'static str) -> Self {
        Self { text, signature }
    }

    /// The command text without its terminator
    ///
    /// This is what the status line of a reply must start with.
    pub fn echo(&self) -> &'static str {
        self.text.strip_suffix(crate::reply::LINE_END).unwrap_or(self.text)
    }
}

/// Geographic position, latitude / longitude
pub static GLL: Command = Command::new("$PSTMNMEAREQUEST,100000,0\r\n", "GLL,");
/// Satellites in view
pub static GSV: Command = Command::new("$PSTMNMEAREQUEST,80000,0\r\n", "GSV,");
/// DOP and active satellites
pub static GSA: Command = Command::new("$PSTMNMEAREQUEST,4,0\r\n", "GSA,");
/// Fix data
pub static GGA: Command = Command::new("$PSTMNMEAREQUEST,2,0\r\n", "GGA,");
/// Recommended minimum data
pub static RMC: Command = Command::new("$PSTMNMEAREQUEST,40,0\r\n", "RMC,");
/// Course over ground and ground speed
pub static VTG: Command = Command::new("$PSTMNMEAREQUEST,10,0\r\n", "VTG,");

/// All NMEA requests, in catalog order
pub static CATALOG: [&Command; 6] = [&GLL, &GSV, &GSA, &GGA, &RMC, &VTG];

/// NMEA queries the driver supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Query {
    Gll,
    Gsv,
    Gsa,
    Gga,
    Rmc,
    Vtg,
}

impl Query {
    /// The catalog entry for this query
    pub fn command(self) -> &'static Command {
        match self {
            Query::Gll => &GLL,
            Query::Gsv => &GSV,
            Query::Gsa => &GSA,
            Query::Gga => &GGA,
            Query::Rmc => &RMC,
            Query::Vtg => &VTG,
        }
    }

    /// Returns true if the receiver may answer with more than one data line
    pub fn is_multi_line(self) -> bool {
        matches!(self, Query::Gsv | Query::Gsa)
    }
}

/// Fixed commands of the start-up script, in the order they are sent
pub mod init {
    /// Stop the GNSS engine
    pub const SUSPEND_ENGINE: &str = "$PSTMGPSSUSPEND\r\n";
    /// Empty the periodic message list of the UART port
    pub const CLEAR_UART_MSG_LIST: &str = "$PSTMCFGMSGL,0,1,0,0\r\n";
    /// Empty the periodic message list of the I2C port
    pub const CLEAR_I2C_MSG_LIST: &str = "$PSTMCFGMSGL,3,1,0,0\r\n";
    /// Stop echoing commands back as unsolicited output
    pub const SUPPRESS_ECHO: &str = "$PSTMSETPAR,1227,1,2\r\n";
    /// Restart the GNSS engine
    pub const RESTART: &str = "$PSTMGPSRESTART\r\n";
    /// Token the receiver sends once the restart has been accepted
    pub const RESTART_ACK: &str = "$PSTMGPSRESTART";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_strips_terminator() {
        assert_eq!(GLL.echo(), "$PSTMNMEAREQUEST,100000,0");
        assert_eq!(VTG.echo(), "$PSTMNMEAREQUEST,10,0");
    }

    #[test]
    fn test_echo_without_terminator_is_unchanged() {
        let command = Command::new("testcommand", "TST,");
        assert_eq!(command.echo(), "testcommand");
    }

    #[test]
    fn test_catalog_is_well_formed() {
        for command in CATALOG {
            assert!(command.text.ends_with("\r\n"));
            assert!(command.text.starts_with(STATUS_PREFIX));
            assert_eq!(command.signature.len(), 4);
            assert!(command.signature.ends_with(','));
        }
    }

    #[test]
    fn test_query_maps_to_catalog() {
        let queries = [
            Query::Gll,
            Query::Gsv,
            Query::Gsa,
            Query::Gga,
            Query::Rmc,
            Query::Vtg,
        ];

        for (query, command) in queries.iter().zip(CATALOG) {
            assert_eq!(query.command(), command);
        }
    }

    #[test]
    fn test_multi_line_queries() {
        assert!(Query::Gsv.is_multi_line());
        assert!(Query::Gsa.is_multi_line());
        assert!(!Query::Gll.is_multi_line());
        assert!(!Query::Rmc.is_multi_line());
    }

    #[test]
    fn test_restart_ack_matches_restart_command() {
        assert!(init::RESTART.starts_with(init::RESTART_ACK));
    }
}
