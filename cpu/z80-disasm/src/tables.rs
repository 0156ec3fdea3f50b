//! Operand and operation name tables, indexed by opcode fields

pub const CONDITIONS: [&str; 8] = ["NZ", "Z", "NC", "C", "PO", "PE", "P", "M"];

/// Index 6 is the memory operand addressed through HL
pub const REGISTERS_8: [&str; 8] = ["B", "C", "D", "E", "H", "L", "(HL)", "A"];

pub const REGISTER_PAIRS_SP: [&str; 4] = ["BC", "DE", "HL", "SP"];

pub const REGISTER_PAIRS_AF: [&str; 4] = ["BC", "DE", "HL", "AF"];

pub const ALU_OPERATIONS: [&str; 8] = ["ADD A,", "ADC A,", "SUB", "SBC A,", "AND", "XOR", "OR", "CP"];

pub const ROTATE_OPERATIONS: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SLL", "SRL"];

pub const ACCUMULATOR_OPERATIONS: [&str; 8] =
    ["RLCA", "RRCA", "RLA", "RRA", "DAA", "CPL", "SCF", "CCF"];

pub const ED_MISC_OPERATIONS: [&str; 8] =
    ["LD I, A", "LD R, A", "LD A, I", "LD A, R", "RRD", "RLD", "NOP", "NOP"];

pub const INTERRUPT_MODES: [u8; 8] = [0, 0, 1, 2, 0, 0, 1, 2];

/// ED-prefixed block instructions, indexed by `[y - 4][z]`
pub const BLOCK_OPERATIONS: [[&str; 4]; 4] = [
    ["LDI", "CPI", "INI", "OUTI"],
    ["LDD", "CPD", "IND", "OUTD"],
    ["LDIR", "CPIR", "INIR", "OTIR"],
    ["LDDR", "CPDR", "INDR", "OTDR"],
];

/// Register field value that selects the memory operand instead of a register
pub const MEMORY_OPERAND: u8 = 6;

#[inline]
#[must_use]
pub fn condition(y: u8) -> &'static str {
    CONDITIONS[usize::from(y & 0x07)]
}

#[inline]
#[must_use]
pub fn register_8(r: u8) -> &'static str {
    REGISTERS_8[usize::from(r & 0x07)]
}

#[inline]
#[must_use]
pub fn register_pair_sp(p: u8) -> &'static str {
    REGISTER_PAIRS_SP[usize::from(p & 0x03)]
}

#[inline]
#[must_use]
pub fn register_pair_af(p: u8) -> &'static str {
    REGISTER_PAIRS_AF[usize::from(p & 0x03)]
}

#[inline]
#[must_use]
pub fn alu_operation(y: u8) -> &'static str {
    ALU_OPERATIONS[usize::from(y & 0x07)]
}

#[inline]
#[must_use]
pub fn rotate_operation(y: u8) -> &'static str {
    ROTATE_OPERATIONS[usize::from(y & 0x07)]
}

/// BIT / RES / SET for CB-prefixed `x` values 1-3
#[inline]
#[must_use]
pub fn bit_operation(x: u8) -> Option<&'static str> {
    match x {
        1 => Some("BIT"),
        2 => Some("RES"),
        3 => Some("SET"),
        _ => None,
    }
}

#[inline]
#[must_use]
pub fn block_operation(y: u8, z: u8) -> Option<&'static str> {
    let row = BLOCK_OPERATIONS.get(usize::from(y.checked_sub(4)?))?;
    row.get(usize::from(z)).copied()
}
