mod cb;
mod ed;
mod indexed;
mod unprefixed;


use crate::cursor::{ByteCursor, CursorResult, Exhausted};
use std::fmt;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRegister {
    IX,
    IY,
}

impl IndexRegister {
    #[must_use]
    pub fn from_prefix(byte: u8) -> Option<Self> {
        match byte {
            0xDD => Some(Self::IX),
            0xFD => Some(Self::IY),
            _ => None,
        }
    }

    #[must_use]
    pub fn prefix_byte(self) -> u8 {
        match self {
            Self::IX => 0xDD,
            Self::IY => 0xFD,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::IX => "IX",
            Self::IY => "IY",
        }
    }

    #[must_use]
    pub fn high_byte_name(self) -> &'static str {
        match self {
            Self::IX => "IXH",
            Self::IY => "IYH",
        }
    }

    #[must_use]
    pub fn low_byte_name(self) -> &'static str {
        match self {
            Self::IX => "IXL",
            Self::IY => "IYL",
        }
    }
}

impl fmt::Display for IndexRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded instruction. `bytes` borrows the exact bytes consumed from the decoded buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction<'a> {
    pub address: u16,
    pub bytes: &'a [u8],
    pub mnemonic: String,
}

impl DecodedInstruction<'_> {
    pub const END_MNEMONIC: &'static str = "END";

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for the marker returned when decoding starts at or past the end of the buffer
    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn imm8(n: u8) -> String {
    format!("0x{n:02X}")
}

fn imm16(nn: u16) -> String {
    format!("0x{nn:04X}")
}

fn displacement(d: i8) -> String {
    if d < 0 { format!("-0x{:02X}", d.unsigned_abs()) } else { format!("+0x{d:02X}") }
}

fn indexed_memory(index: IndexRegister, d: i8) -> String {
    format!("({index}{})", displacement(d))
}

fn placeholder(bytes: &[u8]) -> String {
    let operands: Vec<_> = bytes.iter().map(|&byte| imm8(byte)).collect();
    format!("DB {}", operands.join(", "))
}

struct InstructionDecoder<'a> {
    cursor: ByteCursor<'a>,
    base_address: u16,
}

impl<'a> InstructionDecoder<'a> {
    fn new(buffer: &'a [u8], offset: usize, base_address: u16) -> Self {
        Self { cursor: ByteCursor::new(buffer, offset), base_address }
    }

    fn fetch_opcode(&mut self) -> CursorResult<u8> {
        self.cursor.read_u8()
    }

    fn fetch_operand_byte(&mut self) -> CursorResult<u8> {
        self.cursor.read_u8()
    }

    fn fetch_displacement(&mut self) -> CursorResult<i8> {
        self.cursor.read_i8()
    }

    fn fetch_u16_operand(&mut self) -> CursorResult<u16> {
        self.cursor.read_u16_le()
    }

    // Address of the next unread byte; buffer offsets wrap around the 16-bit address space
    fn current_address(&self) -> u16 {
        self.base_address.wrapping_add(self.cursor.position() as u16)
    }

    // Relative jumps are taken from the address following the displacement byte
    fn fetch_relative_target(&mut self) -> CursorResult<String> {
        let d = self.fetch_displacement()?;
        let target = self.current_address().wrapping_add_signed(i16::from(d));
        Ok(imm16(target))
    }

    fn decode(&mut self, opcode: u8) -> CursorResult<String> {
        match opcode {
            0xCB => self.decode_cb_prefix(),
            0xDD => self.decode_index_prefix(IndexRegister::IX),
            0xED => self.decode_ed_prefix(),
            0xFD => self.decode_index_prefix(IndexRegister::IY),
            _ => self.decode_unprefixed(opcode),
        }
    }
}

/// Decodes the instruction starting at `offset`, returning it along with the offset of the
/// following instruction.
///
/// If `offset` is at or past the end of `buffer`, returns an END marker that consumes no bytes.
/// Otherwise at least one byte is always consumed.
#[must_use]
pub fn decode_one(
    buffer: &[u8],
    offset: usize,
    base_address: u16,
) -> (DecodedInstruction<'_>, usize) {
    let address = base_address.wrapping_add(offset as u16);
    let mut decoder = InstructionDecoder::new(buffer, offset, base_address);

    let Ok(opcode) = decoder.fetch_opcode() else {
        let end = DecodedInstruction {
            address,
            bytes: &[],
            mnemonic: DecodedInstruction::END_MNEMONIC.into(),
        };
        return (end, offset);
    };

    let mnemonic = match decoder.decode(opcode) {
        Ok(mnemonic) => mnemonic,
        Err(Exhausted) => {
            let consumed = decoder.cursor.consumed_since(offset);
            log::debug!("Instruction at {address:04X} truncated after {} byte(s)", consumed.len());
            placeholder(consumed)
        }
    };

    let bytes = decoder.cursor.consumed_since(offset);
    let next_offset = decoder.cursor.position();

    (DecodedInstruction { address, bytes, mnemonic }, next_offset)
}

/// Iterator that decodes a buffer from start to end.
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    buffer: &'a [u8],
    offset: usize,
    base_address: u16,
}

impl<'a> Iterator for Instructions<'a> {
    type Item = DecodedInstruction<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.buffer.len() {
            return None;
        }

        let (instruction, next_offset) = decode_one(self.buffer, self.offset, self.base_address);
        debug_assert!(next_offset > self.offset, "decode_one must consume at least one byte");
        self.offset = next_offset;

        log::trace!(
            "{:04X}: {:02X?} {}",
            instruction.address,
            instruction.bytes,
            instruction.mnemonic
        );

        Some(instruction)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Instructions are 1 to 4 bytes long
        let remaining = self.buffer.len().saturating_sub(self.offset);
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl FusedIterator for Instructions<'_> {}

#[must_use]
pub fn instructions(buffer: &[u8], base_address: u16) -> Instructions<'_> {
    Instructions { buffer, offset: 0, base_address }
}

/// Decodes every instruction in `buffer`, treating the first byte as residing at `base_address`.
#[must_use]
pub fn decode_block(buffer: &[u8], base_address: u16) -> Vec<DecodedInstruction<'_>> {
    instructions(buffer, base_address).collect()
}
