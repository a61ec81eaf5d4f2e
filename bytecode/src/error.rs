use thiserror::Error;

/// Errors found while validating a bytecode program.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProgramError {
    /// Byte 0 holds the sentinel written by a failed compilation.
    #[error("program is marked as a bad expression")]
    BadExpression,
    /// A byte that is not an opcode appears in instruction position.
    #[error("invalid opcode 0x{opcode:02X} at offset {offset}")]
    InvalidOpcode { offset: usize, opcode: u8 },
    /// The program ends inside an instruction's operand bytes.
    #[error("operand of instruction at offset {offset} is truncated")]
    TruncatedOperand { offset: usize },
    /// A fetch names a variable outside A..Z.
    #[error("variable index {index} at offset {offset} is out of range")]
    InvalidVariable { offset: usize, index: u8 },
    /// The program does not end with END_STACK.
    #[error("program is missing the END_STACK terminator")]
    MissingTerminator,
    /// Bytes follow the END_STACK terminator.
    #[error("unexpected bytes after END_STACK at offset {offset}")]
    TrailingBytes { offset: usize },
}
