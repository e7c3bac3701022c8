use std::io::{self, Read, Write};
use log::*;

use crate::{
    Close,
    command,
    pacing::{Delay, Sleep},
    };
use super::{Config, Error};


/**
    driver of a board connected through a duplex byte stream

    reads are passed through unchanged. Writes are forwarded and followed by a pacing delay, unless they contain the reset command in which case the whole reset handshake is run instead.

    there is no protocol state kept between calls, and no locking: one device is meant to be owned by one thread
*/
pub struct Device<T, D = Sleep> {
    /// board RX/TX stream
    pub(super) port: T,
    pub(super) delay: D,
    pub(super) config: Config,
}

impl<T> Device<T> {
    /// wrap a byte stream with default timings, sleeping the current thread for pacing
    pub fn new(port: T) -> Self {
        Self::with_delay(port, Sleep, Config::default())
    }
}

impl<T, D> Device<T, D> {
    /// wrap a byte stream using a custom waiting strategy and timings
    pub fn with_delay(port: T, delay: D, config: Config) -> Self {
        Self {port, delay, config}
    }
    /// replace the timings and limits
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
    pub fn config(&self) -> &Config {&self.config}
    pub fn delay(&self) -> &D {&self.delay}
    /// underlying byte stream
    pub fn get_ref(&self) -> &T {&self.port}
    pub fn get_mut(&mut self) -> &mut T {&mut self.port}
    /// give back the underlying byte stream, without closing it
    pub fn into_inner(self) -> T {self.port}
}

impl<T: Read + Write, D: Delay> Device<T, D> {
    /**
        send bytes to the board

        if the reset command is anywhere in `buffer`, the reset handshake is executed instead and its count of written command bytes is returned. Otherwise `buffer` is written as is.
    */
    pub fn send(&mut self, buffer: &[u8]) -> Result<usize, Error> {
        if command::contains_reset(buffer) {
            return self.reset()
        }
        Ok(self.forward(buffer)?)
    }

    /// write bytes verbatim and give the board time to ingest them
    pub(super) fn forward(&mut self, buffer: &[u8]) -> io::Result<usize> {
        debug!("writing {:02x?} to device", buffer);
        let written = self.port.write(buffer);
        // paced even on failure, the board may have received part of it
        self.delay.delay(self.config.write_pacing);
        written
    }
}

impl<T: Read, D> Read for Device<T, D> {
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        self.port.read(buffer)
    }
}

impl<T: Read + Write, D: Delay> Write for Device<T, D> {
    /// a reset request consumes the whole buffer, the count of handshake bytes is only given by [Device::send]
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        if command::contains_reset(buffer) {
            self.reset()?;
            return Ok(buffer.len())
        }
        Ok(self.forward(buffer)?)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

impl<T: Close, D> Close for Device<T, D> {
    fn close(&mut self) -> io::Result<()> {
        self.port.close()
    }
}
