/// The standard octal decomposition of a Z80 opcode byte.
///
/// `x` is bits 6-7, `y` is bits 3-5, `z` is bits 0-2, `p` is `y >> 1` and `q` is `y & 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeFields {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub p: u8,
    pub q: u8,
}

impl OpcodeFields {
    #[inline]
    #[must_use]
    pub const fn decompose(opcode: u8) -> Self {
        let y = (opcode >> 3) & 0x07;
        Self { x: opcode >> 6, y, z: opcode & 0x07, p: y >> 1, q: y & 0x01 }
    }
}

impl From<u8> for OpcodeFields {
    fn from(value: u8) -> Self {
        Self::decompose(value)
    }
}
