use super::{InstructionDecoder, imm8, imm16};
use crate::cursor::CursorResult;
use crate::fields::OpcodeFields;
use crate::tables;

impl InstructionDecoder<'_> {
    pub(super) fn decode_unprefixed(&mut self, opcode: u8) -> CursorResult<String> {
        let OpcodeFields { x, y, z, p, q } = OpcodeFields::decompose(opcode);

        let mnemonic = match (x, z) {
            (0, 0) => self.decode_relative_group(y)?,
            (0, 1) => {
                if q == 0 {
                    let nn = self.fetch_u16_operand()?;
                    format!("LD {}, {}", tables::register_pair_sp(p), imm16(nn))
                } else {
                    format!("ADD HL, {}", tables::register_pair_sp(p))
                }
            }
            (0, 2) => self.decode_indirect_load(p, q)?,
            (0, 3) => {
                let operation = if q == 0 { "INC" } else { "DEC" };
                format!("{operation} {}", tables::register_pair_sp(p))
            }
            (0, 4) => format!("INC {}", tables::register_8(y)),
            (0, 5) => format!("DEC {}", tables::register_8(y)),
            (0, 6) => {
                let n = self.fetch_operand_byte()?;
                format!("LD {}, {}", tables::register_8(y), imm8(n))
            }
            (0, 7) => tables::ACCUMULATOR_OPERATIONS[usize::from(y)].into(),
            (1, _) => {
                // LD (HL), (HL) is not encodable; its slot is HALT
                if y == tables::MEMORY_OPERAND && z == tables::MEMORY_OPERAND {
                    "HALT".into()
                } else {
                    format!("LD {}, {}", tables::register_8(y), tables::register_8(z))
                }
            }
            (2, _) => format!("{} {}", tables::alu_operation(y), tables::register_8(z)),
            (3, 0) => format!("RET {}", tables::condition(y)),
            (3, 1) => {
                if q == 0 {
                    format!("POP {}", tables::register_pair_af(p))
                } else {
                    match p {
                        0 => "RET".into(),
                        1 => "EXX".into(),
                        2 => "JP (HL)".into(),
                        3 => "LD SP, HL".into(),
                        _ => unreachable!("p is always <= 3"),
                    }
                }
            }
            (3, 2) => {
                let nn = self.fetch_u16_operand()?;
                format!("JP {}, {}", tables::condition(y), imm16(nn))
            }
            (3, 3) => self.decode_misc_group(y)?,
            (3, 4) => {
                let nn = self.fetch_u16_operand()?;
                format!("CALL {}, {}", tables::condition(y), imm16(nn))
            }
            (3, 5) => {
                if q == 0 {
                    format!("PUSH {}", tables::register_pair_af(p))
                } else {
                    match p {
                        0 => {
                            let nn = self.fetch_u16_operand()?;
                            format!("CALL {}", imm16(nn))
                        }
                        // Prefix bytes only land here through an index prefix, e.g. DD DD
                        1 => "DD PREFIX".into(),
                        2 => "ED PREFIX".into(),
                        3 => "FD PREFIX".into(),
                        _ => unreachable!("p is always <= 3"),
                    }
                }
            }
            (3, 6) => {
                let n = self.fetch_operand_byte()?;
                format!("{} {}", tables::alu_operation(y), imm8(n))
            }
            (3, 7) => format!("RST {}", imm8(y * 8)),
            _ => unreachable!("x is always <= 3 and z is always <= 7"),
        };

        Ok(mnemonic)
    }

    fn decode_relative_group(&mut self, y: u8) -> CursorResult<String> {
        let mnemonic = match y {
            0 => "NOP".into(),
            1 => "EX AF, AF'".into(),
            2 => format!("DJNZ {}", self.fetch_relative_target()?),
            3 => format!("JR {}", self.fetch_relative_target()?),
            4..=7 => {
                let condition = tables::condition(y - 4);
                format!("JR {condition}, {}", self.fetch_relative_target()?)
            }
            _ => unreachable!("y is always <= 7"),
        };

        Ok(mnemonic)
    }

    fn decode_indirect_load(&mut self, p: u8, q: u8) -> CursorResult<String> {
        let mnemonic = match (q, p) {
            (0, 0) => "LD (BC), A".into(),
            (0, 1) => "LD (DE), A".into(),
            (0, 2) => format!("LD ({}), HL", imm16(self.fetch_u16_operand()?)),
            (0, 3) => format!("LD ({}), A", imm16(self.fetch_u16_operand()?)),
            (1, 0) => "LD A, (BC)".into(),
            (1, 1) => "LD A, (DE)".into(),
            (1, 2) => format!("LD HL, ({})", imm16(self.fetch_u16_operand()?)),
            (1, 3) => format!("LD A, ({})", imm16(self.fetch_u16_operand()?)),
            _ => unreachable!("q is always <= 1 and p is always <= 3"),
        };

        Ok(mnemonic)
    }

    fn decode_misc_group(&mut self, y: u8) -> CursorResult<String> {
        let mnemonic = match y {
            0 => format!("JP {}", imm16(self.fetch_u16_operand()?)),
            1 => "CB PREFIX".into(),
            2 => format!("OUT ({}), A", imm8(self.fetch_operand_byte()?)),
            3 => format!("IN A, ({})", imm8(self.fetch_operand_byte()?)),
            4 => "EX (SP), HL".into(),
            5 => "EX DE, HL".into(),
            6 => "DI".into(),
            7 => "EI".into(),
            _ => unreachable!("y is always <= 7"),
        };

        Ok(mnemonic)
    }
}
