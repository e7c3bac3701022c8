use std::io::{self, Read, Write};
use log::*;

use crate::{
    command::Command,
    pacing::Delay,
    };
use super::{Device, Error};


/// number of init bytes the board sends to confirm a reset
const CONFIRMATION: usize = 3;

/**
    sliding window over the last bytes received, detecting the reset confirmation

    slots are overwritten in round-robin order, so the window is full of init bytes only when the last three bytes received are all init bytes
*/
#[derive(Clone, Debug, Default)]
pub struct InitWindow {
    slots: [u8; CONFIRMATION],
    next: usize,
}
impl InitWindow {
    pub fn new() -> Self {Self::default()}
    /// record a received byte, returns true when the board confirmed the reset
    pub fn push(&mut self, byte: u8) -> bool {
        self.slots[self.next] = byte;
        self.next = (self.next + 1) % CONFIRMATION;
        self.confirmed()
    }
    pub fn confirmed(&self) -> bool {
        self.slots == [Command::Init.byte(); CONFIRMATION]
    }
}

/// read outcomes meaning the board has nothing to say yet
fn no_data(error: &io::Error) -> bool {
    matches!(error.kind(),
        io::ErrorKind::TimedOut
        | io::ErrorKind::WouldBlock
        | io::ErrorKind::Interrupted)
}


impl<T: Read + Write, D: Delay> Device<T, D> {
    /**
        bring the board into a known streaming state

        stops streaming, requests a soft reset, waits for the board to confirm it and restarts streaming. Returns the number of command bytes written, bytes read while waiting are not counted.

        waiting is unbounded unless [Config::max_polls](super::Config::max_polls) is set, a read error other than a timeout aborts it.
    */
    pub fn reset(&mut self) -> Result<usize, Error> {
        let mut written = 0;
        let abort = |written: usize, source: io::Error| {
            warn!("reset handshake aborted: {}", source);
            Error::Handshake {written, source}
        };

        written += self.forward(&[Command::Stop.byte()])
            .map_err(move |e| abort(written, e))?;
        self.delay.delay(self.config.settle);
        written += self.forward(&[Command::Reset.byte()])
            .map_err(move |e| abort(written, e))?;
        self.delay.delay(self.config.settle);

        debug!("waiting reset confirmation");
        let mut window = InitWindow::new();
        let mut byte = [0u8; 1];
        let mut polls = 0;
        loop {
            if self.config.max_polls.is_some_and(|max| polls >= max) {
                warn!("board did not confirm reset after {} polls", polls);
                return Err(Error::Unconfirmed {written, polls})
            }
            polls += 1;
            match self.port.read(&mut byte) {
                Ok(0) => {},
                Err(error) if no_data(&error) => {},
                Err(error) => return Err(abort(written, error)),
                Ok(_) => {
                    trace!("received {:#04x} while resetting", byte[0]);
                    if window.push(byte[0])
                        {break}
                    continue
                },
            }
            self.delay.delay(self.config.poll_interval);
        }
        info!("board confirmed reset after {} polls", polls);

        written += self.forward(&[Command::Start.byte()])
            .map_err(move |e| abort(written, e))?;
        Ok(written)
    }
}
