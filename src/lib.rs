/*!
    driver layer for OpenBCI EEG boards speaking their single-byte command protocol over a serial byte stream

    - [device::Device] wraps any duplex byte stream and turns a reset request into the full board handshake
    - [simulated::SimulatedPeripheral] is a software board producing the same packet framing, for running without hardware
*/

pub mod command;
pub mod pacing;

#[cfg(feature = "device")]
pub mod device;
#[cfg(feature = "simulated")]
pub mod simulated;


use std::io;

/// release capability of a byte stream, the third leg next to [io::Read] and [io::Write]
pub trait Close {
    fn close(&mut self) -> io::Result<()>;
}
impl<C: Close + ?Sized> Close for &mut C {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}
impl<C: Close + ?Sized> Close for Box<C> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}
