use super::{IndexRegister, InstructionDecoder, imm8, imm16, indexed_memory};
use crate::cursor::CursorResult;
use crate::fields::OpcodeFields;
use crate::tables;

fn index_register_pair(index: IndexRegister, p: u8) -> &'static str {
    if p == 2 { index.name() } else { tables::register_pair_sp(p) }
}

// H, L and (HL) register field values; only these are affected by a DD/FD prefix
fn references_hl(r: u8) -> bool {
    (4..=6).contains(&r)
}

// Register name for a register field under an index prefix, with H/L replaced by the index
// register's halves. Must not be called with the memory operand.
fn shadow_register_8(index: IndexRegister, r: u8) -> &'static str {
    match r {
        4 => index.high_byte_name(),
        5 => index.low_byte_name(),
        _ => tables::register_8(r),
    }
}

impl InstructionDecoder<'_> {
    // Replaces H/L with the index halves and (HL) with (IX+d) or (IY+d)
    fn fetch_index_operand_8(&mut self, index: IndexRegister, r: u8) -> CursorResult<String> {
        if r == tables::MEMORY_OPERAND {
            let d = self.fetch_displacement()?;
            Ok(indexed_memory(index, d))
        } else {
            Ok(shadow_register_8(index, r).into())
        }
    }

    /// Opcodes that do not touch HL, H, L or (HL) decode exactly as if the prefix were absent.
    pub(super) fn decode_index_prefix(&mut self, index: IndexRegister) -> CursorResult<String> {
        let opcode = self.fetch_opcode()?;
        if opcode == 0xCB {
            return self.decode_index_cb_prefix(index);
        }

        let OpcodeFields { x, y, z, p, q } = OpcodeFields::decompose(opcode);

        let mnemonic = match (x, z) {
            (0, 1) if q == 0 && p == 2 => {
                let nn = self.fetch_u16_operand()?;
                format!("LD {index}, {}", imm16(nn))
            }
            (0, 1) if q == 1 => format!("ADD {index}, {}", index_register_pair(index, p)),
            (0, 2) if p == 2 => {
                let nn = imm16(self.fetch_u16_operand()?);
                if q == 0 { format!("LD ({nn}), {index}") } else { format!("LD {index}, ({nn})") }
            }
            (0, 3) if p == 2 => {
                let operation = if q == 0 { "INC" } else { "DEC" };
                format!("{operation} {index}")
            }
            (0, 4 | 5) if references_hl(y) => {
                let operation = if z == 4 { "INC" } else { "DEC" };
                let operand = self.fetch_index_operand_8(index, y)?;
                format!("{operation} {operand}")
            }
            (0, 6) if references_hl(y) => {
                // Displacement comes before the immediate operand
                let operand = self.fetch_index_operand_8(index, y)?;
                let n = self.fetch_operand_byte()?;
                format!("LD {operand}, {}", imm8(n))
            }
            (1, _) if references_hl(y) || references_hl(z) => {
                self.decode_index_load(index, y, z)?
            }
            (2, 4..=6) => {
                let operand = self.fetch_index_operand_8(index, z)?;
                format!("{} {operand}", tables::alu_operation(y))
            }
            (3, _) => match opcode {
                0xE1 => format!("POP {index}"),
                0xE3 => format!("EX (SP), {index}"),
                0xE5 => format!("PUSH {index}"),
                0xE9 => format!("JP ({index})"),
                0xF9 => format!("LD SP, {index}"),
                _ => self.decode_unprefixed(opcode)?,
            },
            _ => self.decode_unprefixed(opcode)?,
        };

        Ok(mnemonic)
    }

    fn decode_index_load(&mut self, index: IndexRegister, y: u8, z: u8) -> CursorResult<String> {
        const MEMORY: u8 = tables::MEMORY_OPERAND;

        // When one side is the indexed memory operand, the other side names a plain register
        // (LD H, (IX+d) loads H, not IXH)
        let mnemonic = match (y, z) {
            (MEMORY, MEMORY) => "HALT".into(),
            (MEMORY, _) => {
                let d = self.fetch_displacement()?;
                format!("LD {}, {}", indexed_memory(index, d), tables::register_8(z))
            }
            (_, MEMORY) => {
                let d = self.fetch_displacement()?;
                format!("LD {}, {}", tables::register_8(y), indexed_memory(index, d))
            }
            _ => format!("LD {}, {}", shadow_register_8(index, y), shadow_register_8(index, z)),
        };

        Ok(mnemonic)
    }

    // DD CB d op / FD CB d op: the displacement comes before the final opcode byte
    fn decode_index_cb_prefix(&mut self, index: IndexRegister) -> CursorResult<String> {
        let d = self.fetch_displacement()?;
        let opcode = self.fetch_opcode()?;
        let OpcodeFields { x, y, z, .. } = OpcodeFields::decompose(opcode);

        let memory = indexed_memory(index, d);

        // Undocumented: every operation except BIT also copies its result into register z
        let write_back = (z != tables::MEMORY_OPERAND).then(|| tables::register_8(z));

        let mnemonic = match (tables::bit_operation(x), write_back) {
            (Some("BIT"), _) => format!("BIT {y}, {memory}"),
            (Some(operation), Some(register)) => format!("{operation} {y}, {memory}, {register}"),
            (Some(operation), None) => format!("{operation} {y}, {memory}"),
            (None, Some(register)) => {
                format!("{} {memory}, {register}", tables::rotate_operation(y))
            }
            (None, None) => format!("{} {memory}", tables::rotate_operation(y)),
        };

        Ok(mnemonic)
    }
}
