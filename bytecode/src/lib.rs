//! Postfix bytecode shared by the SoftCalc compiler and the evaluators
//! that execute compiled expressions every scan cycle.
//!
//! A program is a flat byte sequence of single-byte opcodes. [`opcode::FETCH`]
//! is followed by a variable index and [`opcode::LITERAL`] by the eight
//! little-endian bytes of a double. Every program ends with
//! [`opcode::END_STACK`].

mod error;
pub mod opcode;
mod program;

pub use error::ProgramError;
pub use program::{Instruction, Instructions, Operand, Program, NUM_VARIABLES};
