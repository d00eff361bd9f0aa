//! Start-up script
//!
//! The receiver is reset, its engine suspended, both periodic message
//! lists emptied and command echo switched off, then the engine is
//! restarted. Only the restart is acknowledged; the other writes are
//! fire-and-forget.
//!
//! ```text
//! Idle → Reset → SuspendEngine → ClearUartMsgList → ClearI2cMsgList
//!      → SuppressEcho → Restart → WaitAck → Ready
//! ```
//!
//! The script is optional. A receiver preset for I2C through its stored
//! configuration (ST AN5203) works without it, which saves the reset and
//! boot time of roughly four seconds.

use teseo_protocol::command::init;
use teseo_protocol::RawReply;

use crate::engine::Teseo;
use crate::error::Error;
use crate::transport::Transport;

/// Steps of the start-up script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
    /// Nothing done yet
    Idle,
    /// Pulse the reset line and wait for boot
    Reset,
    /// Stop the GNSS engine
    SuspendEngine,
    /// Empty the UART message list
    ClearUartMsgList,
    /// Empty the I2C message list
    ClearI2cMsgList,
    /// Switch command echo off
    SuppressEcho,
    /// Restart the GNSS engine
    Restart,
    /// Read until the restart is acknowledged or the transport gives up
    WaitAck,
    /// Script complete
    Ready,
}

impl InitState {
    /// The step that follows this one
    ///
    /// The script is linear; `Ready` is terminal.
    pub fn next(self) -> Self {
        use InitState::*;

        match self {
            Idle => Reset,
            Reset => SuspendEngine,
            SuspendEngine => ClearUartMsgList,
            ClearUartMsgList => ClearI2cMsgList,
            ClearI2cMsgList => SuppressEcho,
            SuppressEcho => Restart,
            Restart => WaitAck,
            WaitAck | Ready => Ready,
        }
    }

    /// Command written on entering this step, if any
    pub fn command(self) -> Option<&'static str> {
        match self {
            InitState::SuspendEngine => Some(init::SUSPEND_ENGINE),
            InitState::ClearUartMsgList => Some(init::CLEAR_UART_MSG_LIST),
            InitState::ClearI2cMsgList => Some(init::CLEAR_I2C_MSG_LIST),
            InitState::SuppressEcho => Some(init::SUPPRESS_ECHO),
            InitState::Restart => Some(init::RESTART),
            _ => None,
        }
    }

    /// Check if the script has finished
    pub fn is_ready(&self) -> bool {
        matches!(self, InitState::Ready)
    }
}

impl<T: Transport> Teseo<T> {
    /// Run the start-up script
    ///
    /// Fails with [`Error::ResetUnavailable`] before touching the
    /// transport if it has no reset line. There is no timeout here: the
    /// acknowledgement wait ends only when the token arrives or the
    /// transport reads nothing, see [`Transport::read`].
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        self.init_with(|_| {})
    }

    /// Run the start-up script, reporting each step as it is entered
    pub fn init_with<F>(&mut self, mut on_step: F) -> Result<(), Error<T::Error>>
    where
        F: FnMut(InitState),
    {
        if !self.transport_mut().can_reset() {
            return Err(Error::ResetUnavailable);
        }

        let mut state = InitState::Idle;
        on_step(state);

        while !state.is_ready() {
            state = state.next();
            on_step(state);

            #[cfg(feature = "defmt")]
            defmt::debug!("init: {}", state);

            match state {
                InitState::Reset => self.transport_mut().reset().map_err(Error::Transport)?,
                InitState::WaitAck => self.wait_for_restart_ack()?,
                _ => {
                    if let Some(command) = state.command() {
                        self.write(command)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn wait_for_restart_ack(&mut self) -> Result<(), Error<T::Error>> {
        let mut scratch = RawReply::new();
        loop {
            self.read(&mut scratch)?;
            if scratch.is_empty() {
                #[cfg(feature = "defmt")]
                defmt::warn!("init: transport gave up before restart ack");
                return Ok(());
            }
            if scratch.contains(init::RESTART_ACK) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockTransport, Op};
    use heapless::Vec;

    const SCRIPT: [&str; 5] = [
        "$PSTMGPSSUSPEND\r\n",
        "$PSTMCFGMSGL,0,1,0,0\r\n",
        "$PSTMCFGMSGL,3,1,0,0\r\n",
        "$PSTMSETPAR,1227,1,2\r\n",
        "$PSTMGPSRESTART\r\n",
    ];

    #[test]
    fn test_linear_transitions() {
        let mut state = InitState::Idle;
        let mut steps = 0;
        while !state.is_ready() {
            state = state.next();
            steps += 1;
        }
        assert_eq!(steps, 8);
        assert_eq!(InitState::Ready.next(), InitState::Ready);
    }

    #[test]
    fn test_only_write_steps_have_commands() {
        assert_eq!(InitState::Idle.command(), None);
        assert_eq!(InitState::Reset.command(), None);
        assert_eq!(InitState::WaitAck.command(), None);
        assert_eq!(InitState::Ready.command(), None);
        assert_eq!(InitState::Restart.command(), Some("$PSTMGPSRESTART\r\n"));
    }

    #[test]
    fn test_init_runs_full_script() {
        let mut gps = Teseo::new(MockTransport::with_replies(&[
            "$PSTMGPSSUSPENDED*11\r\n",
            "$PSTMCFGMSGLOK*3A\r\n",
            "$PSTMGPSRESTART*3A\r\n",
        ]));

        let mut visited: Vec<InitState, 16> = Vec::new();
        gps.init_with(|state| visited.push(state).unwrap()).unwrap();

        assert_eq!(
            visited.as_slice(),
            &[
                InitState::Idle,
                InitState::Reset,
                InitState::SuspendEngine,
                InitState::ClearUartMsgList,
                InitState::ClearI2cMsgList,
                InitState::SuppressEcho,
                InitState::Restart,
                InitState::WaitAck,
                InitState::Ready,
            ]
        );

        let transport = gps.release();
        assert_eq!(transport.ops[0], Op::Reset);
        assert!(transport.writes().eq(SCRIPT.iter().copied()));
        assert_eq!(transport.count(&Op::Reset), 1);
        assert_eq!(transport.count(&Op::Read), 3);
        // Reads only start once everything has been written
        assert!(transport.ops[6..].iter().all(|op| *op == Op::Read));
    }

    #[test]
    fn test_init_stops_when_transport_gives_up() {
        let mut gps = Teseo::new(MockTransport::with_replies(&["$PSTMGPSSUSPENDED*11\r\n"]));
        gps.init().unwrap();

        let transport = gps.release();
        assert_eq!(transport.count(&Op::Read), 2);
        assert_eq!(transport.writes().count(), 5);
    }

    #[test]
    fn test_init_without_reset_line_fails_before_io() {
        let mut transport = MockTransport::with_replies(&[]);
        transport.has_reset = false;
        let mut gps = Teseo::new(transport);

        let err = gps.init().unwrap_err();
        assert_eq!(err, Error::ResetUnavailable);
        assert!(err.is_precondition());
        assert!(gps.release().ops.is_empty());
    }

    #[test]
    fn test_init_write_failure_is_propagated() {
        let mut transport = MockTransport::with_replies(&[]);
        transport.fail_writes = true;
        let mut gps = Teseo::new(transport);

        let err = gps.init().unwrap_err();
        assert_eq!(err, Error::Transport(()));
        assert!(!err.is_precondition());
        // Reset already happened, the first write failed
        assert_eq!(gps.release().ops.as_slice(), &[Op::Reset]);
    }
}
