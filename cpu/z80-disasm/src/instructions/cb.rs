use super::InstructionDecoder;
use crate::cursor::CursorResult;
use crate::fields::OpcodeFields;
use crate::tables;

impl InstructionDecoder<'_> {
    // Every CB-prefixed opcode is defined, so the only failure is running out of input
    pub(super) fn decode_cb_prefix(&mut self) -> CursorResult<String> {
        let opcode = self.fetch_opcode()?;
        let OpcodeFields { x, y, z, .. } = OpcodeFields::decompose(opcode);

        let operand = tables::register_8(z);
        let mnemonic = match tables::bit_operation(x) {
            Some(operation) => format!("{operation} {y}, {operand}"),
            None => format!("{} {operand}", tables::rotate_operation(y)),
        };

        Ok(mnemonic)
    }
}
