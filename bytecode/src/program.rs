use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::opcode;
use crate::ProgramError;

/// Number of addressable variables (A through Z).
pub const NUM_VARIABLES: u8 = 26;

/// The operand that follows an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Operand {
    None,
    /// Variable index, 0 = A.
    Variable(u8),
    Literal(f64),
}

/// One decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Instruction {
    /// Byte offset of the opcode within the program.
    pub offset: usize,
    #[serde(rename = "mnemonic", serialize_with = "serialize_mnemonic")]
    pub opcode: u8,
    pub operand: Operand,
}

impl Instruction {
    /// Returns the encoded size of this instruction in bytes.
    pub fn encoded_len(&self) -> usize {
        1 + opcode::operand_len(self.opcode)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = opcode::name(self.opcode).unwrap_or("???");
        match self.operand {
            Operand::None => write!(f, "{:04}  {mnemonic}", self.offset),
            Operand::Variable(index) => {
                write!(f, "{:04}  {mnemonic} {}", self.offset, variable_letter(index))
            }
            Operand::Literal(value) => write!(f, "{:04}  {mnemonic} {value}", self.offset),
        }
    }
}

fn serialize_mnemonic<S: Serializer>(op: &u8, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(opcode::name(*op).unwrap_or("???"))
}

fn variable_letter(index: u8) -> char {
    char::from(b'A' + index)
}

/// Decodes the instruction that starts at `offset`.
fn decode_at(bytes: &[u8], offset: usize) -> Result<Instruction, ProgramError> {
    let op = *bytes.get(offset).ok_or(ProgramError::MissingTerminator)?;
    if opcode::name(op).is_none() {
        return Err(ProgramError::InvalidOpcode { offset, opcode: op });
    }

    let operand_bytes = bytes
        .get(offset + 1..offset + 1 + opcode::operand_len(op))
        .ok_or(ProgramError::TruncatedOperand { offset })?;

    let operand = match op {
        opcode::FETCH => {
            let index = operand_bytes[0];
            if index >= NUM_VARIABLES {
                return Err(ProgramError::InvalidVariable { offset, index });
            }
            Operand::Variable(index)
        }
        opcode::LITERAL => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(operand_bytes);
            Operand::Literal(f64::from_le_bytes(raw))
        }
        _ => Operand::None,
    };

    Ok(Instruction {
        offset,
        opcode: op,
        operand,
    })
}

/// Checks that `bytes` is a complete, well formed program.
fn validate(bytes: &[u8]) -> Result<(), ProgramError> {
    if bytes.first() == Some(&opcode::BAD_EXPRESSION) {
        return Err(ProgramError::BadExpression);
    }

    let mut offset = 0;
    loop {
        let instruction = decode_at(bytes, offset)?;
        offset += instruction.encoded_len();
        if instruction.opcode == opcode::END_STACK {
            if offset != bytes.len() {
                return Err(ProgramError::TrailingBytes { offset });
            }
            return Ok(());
        }
    }
}

/// A well formed postfix program.
///
/// Construction validates the byte stream, so holders of a `Program` never
/// see a failed compilation or a truncated instruction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    /// Validates `bytes` and wraps them as a program.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ProgramError> {
        validate(&bytes)?;
        Ok(Program { bytes })
    }

    /// Wraps bytes produced by the compiler.
    ///
    /// The compiler emits whole instructions only, so the stream is not
    /// validated again outside of debug builds.
    pub fn from_compiler_output(bytes: Vec<u8>) -> Self {
        debug_assert_eq!(validate(&bytes), Ok(()));
        Program { bytes }
    }

    /// Returns the encoded program.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the program and returns the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the encoded length in bytes, including the terminator.
    /// A valid program is never empty.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true when the program holds nothing but END_STACK, as the
    /// compiled form of an empty expression does.
    pub fn is_terminator_only(&self) -> bool {
        self.bytes == [opcode::END_STACK]
    }

    /// Iterates over the decoded instructions, ending with END_STACK.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            bytes: &self.bytes,
            offset: 0,
            done: false,
        }
    }
}

impl AsRef<[u8]> for Program {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for Program {
    type Error = ProgramError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Program::from_bytes(bytes)
    }
}

/// Writes one instruction per line.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in self.instructions() {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

impl Serialize for Program {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let instructions: Vec<Instruction> = self.instructions().collect();
        let mut state = serializer.serialize_struct("Program", 2)?;
        state.serialize_field("bytes", &self.bytes)?;
        state.serialize_field("instructions", &instructions)?;
        state.end()
    }
}

/// Iterator over the instructions of a [`Program`].
pub struct Instructions<'a> {
    bytes: &'a [u8],
    offset: usize,
    done: bool,
}

impl Iterator for Instructions<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let instruction = decode_at(self.bytes, self.offset).ok()?;
        self.offset += instruction.encoded_len();
        self.done = instruction.opcode == opcode::END_STACK;
        Some(instruction)
    }
}
