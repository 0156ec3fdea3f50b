//! Standard ROM loader header blocks

use crate::TapBlock;
use std::fmt;

/// Flag byte + type + 10-byte name + 3 words + checksum
pub const HEADER_BLOCK_LEN: usize = 19;

const HEADER_FLAG: u8 = 0x00;
const NAME_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderType {
    Program,
    NumberArray,
    CharacterArray,
    Code,
    Unknown(u8),
}

impl HeaderType {
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Program,
            1 => Self::NumberArray,
            2 => Self::CharacterArray,
            3 => Self::Code,
            _ => Self::Unknown(byte),
        }
    }
}

impl fmt::Display for HeaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Program => "Program",
            Self::NumberArray => "Number array",
            Self::CharacterArray => "Character array",
            Self::Code => "Code",
            Self::Unknown(_) => "Unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapHeader {
    pub header_type: HeaderType,
    pub name: String,
    pub data_length: u16,
    /// Auto-start line for programs, load address for code
    pub param1: u16,
    pub param2: u16,
}

impl TapHeader {
    /// Parses `block` as a header. Returns `None` unless the block is exactly 19 bytes long and
    /// carries the header flag.
    #[must_use]
    pub fn parse(block: &TapBlock) -> Option<Self> {
        let data: &[u8; HEADER_BLOCK_LEN] = block.data().try_into().ok()?;
        if data[0] != HEADER_FLAG {
            return None;
        }

        let word = |offset: usize| u16::from_le_bytes([data[offset], data[offset + 1]]);

        let name = data[2..2 + NAME_LEN]
            .iter()
            .map(|&byte| if byte.is_ascii() { char::from(byte) } else { char::REPLACEMENT_CHARACTER })
            .collect::<String>()
            .trim_end()
            .to_string();

        Some(Self {
            header_type: HeaderType::from_byte(data[1]),
            name,
            data_length: word(12),
            param1: word(14),
            param2: word(16),
        })
    }

    #[must_use]
    pub fn auto_start_line(&self) -> Option<u16> {
        (self.header_type == HeaderType::Program).then_some(self.param1)
    }

    #[must_use]
    pub fn load_address(&self) -> Option<u16> {
        (self.header_type == HeaderType::Code).then_some(self.param1)
    }
}
