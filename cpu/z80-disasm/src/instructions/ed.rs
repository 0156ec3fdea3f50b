use super::{InstructionDecoder, imm16, placeholder};
use crate::cursor::CursorResult;
use crate::fields::OpcodeFields;
use crate::tables;

impl InstructionDecoder<'_> {
    pub(super) fn decode_ed_prefix(&mut self) -> CursorResult<String> {
        let opcode = self.fetch_opcode()?;
        let OpcodeFields { x, y, z, p, q } = OpcodeFields::decompose(opcode);

        let mnemonic = match (x, z) {
            (1, 0) => {
                if y == tables::MEMORY_OPERAND {
                    "IN (C)".into()
                } else {
                    format!("IN {}, (C)", tables::register_8(y))
                }
            }
            (1, 1) => {
                if y == tables::MEMORY_OPERAND {
                    "OUT (C), 0".into()
                } else {
                    format!("OUT (C), {}", tables::register_8(y))
                }
            }
            (1, 2) => {
                let operation = if q == 0 { "SBC" } else { "ADC" };
                format!("{operation} HL, {}", tables::register_pair_sp(p))
            }
            (1, 3) => {
                let nn = imm16(self.fetch_u16_operand()?);
                let register = tables::register_pair_sp(p);
                if q == 0 { format!("LD ({nn}), {register}") } else { format!("LD {register}, ({nn})") }
            }
            (1, 4) => "NEG".into(),
            (1, 5) => (if y == 1 { "RETI" } else { "RETN" }).into(),
            (1, 6) => format!("IM {}", tables::INTERRUPT_MODES[usize::from(y)]),
            (1, 7) => tables::ED_MISC_OPERATIONS[usize::from(y)].into(),
            (2, _) => match tables::block_operation(y, z) {
                Some(operation) => operation.into(),
                None => undefined(opcode),
            },
            _ => undefined(opcode),
        };

        Ok(mnemonic)
    }
}

// Undefined ED encodings are rendered as the two raw bytes without guessing at semantics
fn undefined(opcode: u8) -> String {
    log::debug!("Undefined ED-prefixed opcode {opcode:02X}");
    placeholder(&[0xED, opcode])
}
