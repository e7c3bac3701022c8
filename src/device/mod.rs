/*!
    host side driver of a board

    The central resource is the [Device] struct wrapping a duplex byte stream. Bytes written to it are forwarded to the board, except when they contain a reset request which is expanded into the complete reset handshake.

    - [Device::send] reports handshake failures with the crate [Error], including the number of bytes already written
    - the [std::io::Write] implementation converts these errors to [std::io::Error] so the device can be used as any writer
*/

/// forwarding reads and writes, this is the plain part of the driver
mod transport;
/// the reset handshake
mod handshake;
/// opening real boards on a serial port
#[cfg(feature = "serial")]
mod serial;


pub use transport::Device;
pub use handshake::InitWindow;
#[cfg(feature = "serial")]
pub use serial2::SerialPort;


use std::{io, time::Duration};
use thiserror::Error;

/// error regarding communication with a board
#[derive(Error, Debug)]
pub enum Error {
    #[error("problem with the transport: {0}")]
    Transport(io::Error),
    #[error("reset handshake aborted after writing {written} bytes: {source}")]
    Handshake {
        /// command bytes written before the failure
        written: usize,
        source: io::Error,
    },
    #[error("board did not confirm reset after {polls} polls")]
    Unconfirmed {
        /// command bytes written before giving up
        written: usize,
        polls: usize,
    },
}
impl Error {
    /// bytes successfully written before the error
    pub fn written(&self) -> usize {
        match self {
            Self::Transport(_) => 0,
            Self::Handshake {written, ..} => *written,
            Self::Unconfirmed {written, ..} => *written,
        }
    }
}
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Transport(error)
    }
}
impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::Transport(source) | Error::Handshake {source, ..} => source.kind(),
            Error::Unconfirmed {..} => io::ErrorKind::TimedOut,
        };
        match error {
            Error::Transport(error) => error,
            error => io::Error::new(kind, error),
        }
    }
}


/// timings and limits of the driver
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// wait after every forwarded write, the board drops commands sent too fast
    pub write_pacing: Duration,
    /// wait after the stop and reset commands of the handshake
    pub settle: Duration,
    /// wait between two polls finding no data during the handshake
    pub poll_interval: Duration,
    /**
        maximum number of polls waiting for reset confirmation, unlimited if `None`

        empty reads are polled again like timeouts, so a transport that can reach end of file spins forever without a bound
    */
    pub max_polls: Option<usize>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            write_pacing: Duration::from_millis(50),
            settle: Duration::from_millis(10),
            poll_interval: Duration::ZERO,
            max_polls: None,
        }
    }
}
impl Config {
    pub fn with_write_pacing(mut self, pacing: Duration) -> Self {
        self.write_pacing = pacing;
        self
    }
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
    /// give up the handshake after this many polls without confirmation
    pub fn with_max_polls(mut self, polls: usize) -> Self {
        self.max_polls = Some(polls);
        self
    }
}
