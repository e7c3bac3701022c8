use std::{
    io::{Read, Write},
    time::Duration,
    };
use log::*;
use openbci::{
    Close,
    command::{Command, FRAME_STRIDE},
    device::Device,
    simulated::SimulatedPeripheral,
    };

/// number of packets dumped before stopping
const PACKETS: usize = 20;

/**
    dump the first packets streamed by a board

    usage: `stream [PORT [BAUD]]`, without a port a simulated board is used
*/
fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(path) => {
            let rate = args.next()
                .and_then(|rate| rate.parse().ok())
                .unwrap_or(115_200);
            let mut board = Device::open(&path, rate, Duration::from_millis(100))?;
            println!("resetting board on {}", path);
            // the handshake restarts streaming once the board is confirmed
            board.write_all(&[Command::Reset.byte()])?;
            dump(&mut board)
        },
        None => {
            println!("no port given, using a simulated board");
            let mut board = SimulatedPeripheral::new();
            board.write(&[Command::Start.byte()])?;
            dump(&mut board)
        },
    }
}

fn dump(board: &mut (impl Read + Write + Close)) -> std::io::Result<()> {
    let mut packet = [0u8; FRAME_STRIDE];
    let mut received = 0;
    while received < PACKETS {
        let size = match board.read(&mut packet) {
            Ok(size) => size,
            Err(error) if error.kind() == std::io::ErrorKind::TimedOut => continue,
            Err(error) => return Err(error),
            };
        if size == 0
            {continue}
        println!("{:02x?}", &packet[.. size]);
        // count packet ends, whatever the alignment of reads
        received += packet[.. size].iter()
            .filter(|&&b| b == Command::Footer.byte())
            .count();
    }
    info!("received about {} packets", received);
    board.write(&[Command::Stop.byte()])?;
    board.close()
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// board whose port times out a few times before every read succeeds
    struct Slow {
        board: SimulatedPeripheral,
        timeouts: usize,
    }
    impl Read for Slow {
        fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
            if self.timeouts > 0 {
                self.timeouts -= 1;
                return Err(io::ErrorKind::TimedOut.into())
            }
            self.timeouts = 2;
            self.board.read(buffer)
        }
    }
    impl Write for Slow {
        fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {self.board.write(buffer)}
        fn flush(&mut self) -> io::Result<()> {self.board.flush()}
    }
    impl Close for Slow {
        fn close(&mut self) -> io::Result<()> {self.board.close()}
    }

    #[test]
    fn dump_survives_timeouts() {
        let mut board = SimulatedPeripheral::new().with_interval(Duration::ZERO);
        board.write(&[Command::Start.byte()]).unwrap();
        let mut slow = Slow {board, timeouts: 3};
        dump(&mut slow).unwrap();
        assert!(!slow.board.armed());
    }
}
