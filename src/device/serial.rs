use std::{
    io::{self, Write},
    path::Path,
    time::Duration,
    };
use serial2::{SerialPort, CharSize, StopBits, Parity, FlowControl};
use log::*;

use crate::Close;
use super::Device;


impl Device<SerialPort> {
    /**
        open a board on the given serial port file with the given baud rate

        reads on the port give up after `timeout`, which the reset handshake treats as "no data yet"
    */
    pub fn open(path: impl AsRef<Path>, rate: u32, timeout: Duration) -> io::Result<Self> {
        let path = path.as_ref();
        let mut port = SerialPort::open(path, |mut settings: serial2::Settings| {
                settings.set_raw();
                settings.set_baud_rate(rate)?;
                settings.set_char_size(CharSize::Bits8);
                settings.set_stop_bits(StopBits::One);
                settings.set_parity(Parity::None);
                settings.set_flow_control(FlowControl::None);
                Ok(settings)
                })?;
        port.set_read_timeout(timeout)?;
        info!("opened board on {} at {} bauds", path.display(), rate);
        Ok(Self::new(port))
    }
}

/// the port file is released on drop, closing only pushes pending output
impl Close for SerialPort {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}
