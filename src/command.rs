/*!
    wire values of the board protocol

    every command and stream marker is a single byte, these values are fixed by the board firmware
*/

/// single byte commands and markers of the board protocol
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// stop streaming
    Stop = 0x73,
    /// start streaming
    Start = 0x62,
    /// soft reset of the board, answered by [Command::Init] three times
    Reset = 0x76,
    /// closes a packet in the stream
    Footer = 0xC0,
    /// opens a packet in the stream
    Header = 0xA0,
    /// reset confirmation
    Init = 0x24,
}

impl Command {
    /// all commands, in table order
    pub const ALL: [Command; 6] = [
        Command::Stop,
        Command::Start,
        Command::Reset,
        Command::Footer,
        Command::Header,
        Command::Init,
        ];

    /// byte sent or received on the wire
    pub const fn byte(self) -> u8 {self as u8}

    /// protocol name of the command
    pub const fn name(self) -> &'static str {
        match self {
            Command::Stop => "stop",
            Command::Start => "start",
            Command::Reset => "reset",
            Command::Footer => "footer",
            Command::Header => "header",
            Command::Init => "init",
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> u8 {command.byte()}
}

/// a byte that is not part of the command table, returned by [Command::try_from]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unknown(pub u8);

impl TryFrom<u8> for Command {
    type Error = Unknown;
    fn try_from(byte: u8) -> Result<Self, Unknown> {
        Command::ALL.into_iter()
            .find(|command| command.byte() == byte)
            .ok_or(Unknown(byte))
    }
}

/// number of sample bytes between the sequence byte and the closing footer
pub const PAYLOAD_SIZE: usize = 30;
/// bytes of one packet from its opening footer to its closing footer, both included
pub const FRAME_SIZE: usize = 1 + 1 + 1 + PAYLOAD_SIZE + 1;
/// distance between two consecutive packets in a stream, adjacent packets share a footer
pub const FRAME_STRIDE: usize = FRAME_SIZE - 1;

/// true if the reset command appears anywhere in the given bytes
pub fn contains_reset(buffer: &[u8]) -> bool {
    buffer.contains(&Command::Reset.byte())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values() {
        assert_eq!(Command::Stop.byte(), 0x73);
        assert_eq!(Command::Start.byte(), 0x62);
        assert_eq!(Command::Reset.byte(), 0x76);
        assert_eq!(Command::Footer.byte(), 0xc0);
        assert_eq!(Command::Header.byte(), 0xa0);
        assert_eq!(Command::Init.byte(), 0x24);

        assert_eq!(u8::from(Command::Start), b'b');
        assert_eq!(Command::Init.byte(), b'$');
    }

    #[test]
    fn names_and_bytes_agree() {
        let names: Vec<_> = Command::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["stop", "start", "reset", "footer", "header", "init"]);
        for command in Command::ALL {
            assert_eq!(Command::try_from(command.byte()), Ok(command));
        }
        assert_eq!(Command::try_from(0x00), Err(Unknown(0x00)));
        assert_eq!(Command::try_from(b'v' + 1), Err(Unknown(b'w')));
    }

    #[test]
    fn reset_detection() {
        assert!(!contains_reset(&[]));
        assert!(!contains_reset(&[0x62, 0x73, 0x24]));
        assert!(contains_reset(&[0x76]));
        assert!(contains_reset(&[0x76, 0x00]));
        assert!(contains_reset(&[0x00, 0x01, 0x76]));
        assert!(contains_reset(b"xxvxx"));
    }

    #[test]
    fn frame_layout() {
        assert_eq!(FRAME_SIZE, 34);
        assert_eq!(FRAME_STRIDE, 33);
    }
}
