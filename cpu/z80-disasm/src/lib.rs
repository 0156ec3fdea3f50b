//! Decoder for the Z80 instruction stream encoding.
//!
//! Turns a byte buffer plus a load address into a sequence of (address, bytes, mnemonic)
//! records. Decoding is total: truncated input and undefined encodings resolve to `DB`
//! placeholders rather than errors, and every decoded instruction consumes at least one byte.

pub mod cursor;
pub mod fields;
mod instructions;
pub mod tables;

pub use instructions::{
    DecodedInstruction, IndexRegister, Instructions, decode_block, decode_one, instructions,
};
