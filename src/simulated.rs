/*!
    software board producing the same byte stream as a real one

    [SimulatedPeripheral] can replace the serial port of a [Device](crate::device::Device) or be used directly as a byte stream. It answers to start and stop commands, and streams packets of random samples when started.
*/

use std::{
    io::{self, Read, Write},
    time::Duration,
    };
use rand::{Rng, RngCore, rngs::ThreadRng};
use log::*;

use crate::{
    Close,
    command::{Command, PAYLOAD_SIZE},
    pacing::{Delay, Sleep},
    };


/// position of the simulated board in the packet it is currently sending
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// very first footer of the stream, sent once before the first packet. Next is [Phase::Header]
    #[default]
    Footer,
    /// opening of a packet. Next is [Phase::Sequence]
    Header,
    /// packet counter. Next is [Phase::Payload]
    Sequence,
    /// sample bytes, stays here until all the payload is sent. Next is [Phase::TrailingFooter]
    Payload,
    /// closing of a packet, also acting as the footer before the next packet. Next is [Phase::Header]
    TrailingFooter,
}

/**
    simulated board

    when armed, every byte read advances the packet framing by one step: `footer, header, sequence, 30 random bytes, footer, header, sequence + 1, ...`. When disarmed reads produce nothing, and the position in the stream is kept for when it is armed again.

    each completed packet waits the sampling interval of the board (25ms by default) so the stream comes at a realistic rate
*/
pub struct SimulatedPeripheral<R = ThreadRng, D = Sleep> {
    armed: bool,
    sequence: u8,
    sample: u8,
    phase: Phase,
    /// source of sample values
    rng: R,
    delay: D,
    interval: Duration,
}

impl SimulatedPeripheral {
    /// disarmed board with thread-local random samples and real sampling interval
    pub fn new() -> Self {
        Self::with_parts(rand::rng(), Sleep)
    }
}
impl Default for SimulatedPeripheral {
    fn default() -> Self {Self::new()}
}

impl<R: RngCore, D: Delay> SimulatedPeripheral<R, D> {
    /// disarmed board using the given sample source and waiting strategy
    pub fn with_parts(rng: R, delay: D) -> Self {
        Self {
            armed: false,
            sequence: 0,
            sample: 0,
            phase: Phase::Footer,
            rng,
            delay,
            interval: Duration::from_millis(25),
        }
    }
    /// change the wait after each packet
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn armed(&self) -> bool {self.armed}
    pub fn phase(&self) -> Phase {self.phase}
    /// sequence number of the packet being sent
    pub fn sequence(&self) -> u8 {self.sequence}
    /// number of payload bytes already sent in the current packet
    pub fn sample(&self) -> u8 {self.sample}
    pub fn delay(&self) -> &D {&self.delay}

    /// produce the next byte of the stream
    fn step(&mut self) -> u8 {
        match self.phase {
            Phase::Footer => {
                self.phase = Phase::Header;
                Command::Footer.byte()
            },
            Phase::Header => {
                self.phase = Phase::Sequence;
                Command::Header.byte()
            },
            Phase::Sequence => {
                self.phase = Phase::Payload;
                self.sequence
            },
            Phase::Payload => {
                self.sample += 1;
                if usize::from(self.sample) == PAYLOAD_SIZE {
                    self.sample = 0;
                    self.phase = Phase::TrailingFooter;
                }
                self.rng.random()
            },
            Phase::TrailingFooter => {
                self.phase = Phase::Header;
                self.sequence = self.sequence.wrapping_add(1);
                self.delay.delay(self.interval);
                Command::Footer.byte()
            },
        }
    }
}

impl<R: RngCore, D: Delay> Read for SimulatedPeripheral<R, D> {
    /// fills the whole buffer when armed, returns 0 and leaves it untouched otherwise
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        if !self.armed
            {return Ok(0)}
        for slot in buffer.iter_mut() {
            *slot = self.step();
        }
        Ok(buffer.len())
    }
}

impl<R, D> Write for SimulatedPeripheral<R, D> {
    /// only the first byte is interpreted, unknown commands are accepted and ignored
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        let Some(&first) = buffer.first()
            else {return Ok(0)};
        match Command::try_from(first) {
            Ok(Command::Start) => {
                debug!("simulated board armed");
                self.armed = true;
            },
            Ok(Command::Stop) => {
                debug!("simulated board disarmed");
                self.armed = false;
            },
            _ => trace!("simulated board ignores {:#04x}", first),
        }
        Ok(buffer.len())
    }
    fn flush(&mut self) -> io::Result<()> {Ok(())}
}

impl<R, D> Close for SimulatedPeripheral<R, D> {
    fn close(&mut self) -> io::Result<()> {Ok(())}
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        command::FRAME_STRIDE,
        pacing::Recorder,
        };
    use rand::{SeedableRng, rngs::StdRng};

    fn board() -> SimulatedPeripheral<StdRng, Recorder> {
        SimulatedPeripheral::with_parts(StdRng::seed_from_u64(42), Recorder::new())
    }

    #[test]
    fn disarmed_produces_nothing() {
        let mut board = board();
        let mut buffer = [0x55; 8];
        assert_eq!(board.read(&mut buffer).unwrap(), 0);
        assert_eq!(buffer, [0x55; 8]);
        assert_eq!(board.phase(), Phase::Footer);
    }

    #[test]
    fn first_packet() {
        let mut board = board();
        assert_eq!(board.write(&[Command::Start.byte()]).unwrap(), 1);
        assert!(board.armed());

        let mut buffer = [0; 1 + FRAME_STRIDE];
        assert_eq!(board.read(&mut buffer).unwrap(), buffer.len());
        assert_eq!(&buffer[.. 3], &[0xc0, 0xa0, 0x00]);
        assert_eq!(buffer[33], 0xc0);
        assert_eq!(board.phase(), Phase::Header);
        assert_eq!(board.sequence(), 1);
        assert_eq!(board.delay().waits, [Duration::from_millis(25)]);
    }

    #[test]
    fn payload_counting() {
        let mut board = board();
        board.write(&[Command::Start.byte()]).unwrap();
        let mut buffer = [0; 13];
        board.read(&mut buffer).unwrap();
        assert_eq!(board.phase(), Phase::Payload);
        assert_eq!(board.sample(), 10);
        let mut buffer = [0; 19];
        board.read(&mut buffer).unwrap();
        assert_eq!(board.phase(), Phase::Payload);
        assert_eq!(board.sample(), 29);
        board.read(&mut buffer[.. 1]).unwrap();
        assert_eq!(board.phase(), Phase::TrailingFooter);
        assert_eq!(board.sample(), 0);
    }

    #[test]
    fn stop_keeps_position() {
        let mut board = board();
        board.write(&[Command::Start.byte()]).unwrap();
        let mut buffer = [0; 5];
        board.read(&mut buffer).unwrap();
        assert_eq!(board.write(&[Command::Stop.byte(), 0x00]).unwrap(), 2);
        assert!(!board.armed());
        assert_eq!(board.read(&mut buffer).unwrap(), 0);
        assert_eq!(board.phase(), Phase::Payload);
        assert_eq!(board.sample(), 2);

        board.write(&[Command::Start.byte()]).unwrap();
        let mut rest = [0; 29];
        board.read(&mut rest).unwrap();
        assert_eq!(rest[28], Command::Footer.byte());
        assert_eq!(board.sequence(), 1);
    }

    #[test]
    fn permissive_writes() {
        let mut board = board();
        assert_eq!(board.write(&[]).unwrap(), 0);
        assert!(!board.armed());
        assert_eq!(board.phase(), Phase::Footer);

        // only the first byte counts
        assert_eq!(board.write(&[0x00, Command::Start.byte()]).unwrap(), 2);
        assert!(!board.armed());
        assert_eq!(board.write(&[Command::Reset.byte()]).unwrap(), 1);
        assert!(!board.armed());
        board.flush().unwrap();
        board.close().unwrap();
    }

    #[test]
    fn seeded_samples_repeat() {
        let mut first = board();
        let mut second = board();
        let mut a = [0; 100];
        let mut b = [0; 100];
        first.write(b"b").unwrap();
        second.write(b"b").unwrap();
        first.read(&mut a).unwrap();
        second.read(&mut b).unwrap();
        assert_eq!(a, b);
    }
}
