//! Low-level bytecode emitter.
//!
//! Appends opcodes and operands to a byte buffer sized up front from the
//! expression length, and tracks the value stack depth the program will
//! reach when it runs.

use log::trace;
use softcalc_bytecode::{opcode, Program};

/// Accumulates bytecode instructions.
pub struct Emitter {
    bytecode: Vec<u8>,
    current_stack_depth: i32,
    max_stack_depth: i32,
}

impl Emitter {
    pub fn with_capacity(capacity: usize) -> Self {
        Emitter {
            bytecode: Vec::with_capacity(capacity),
            current_stack_depth: 0,
            max_stack_depth: 0,
        }
    }

    /// Emits an opcode that has no operand.
    pub fn emit_op(&mut self, op: u8) {
        debug_assert_eq!(opcode::operand_len(op), 0);
        trace!("Emit {}", opcode::name(op).unwrap_or("???"));
        self.bytecode.push(op);
        if op == opcode::EXPR_TERM {
            self.current_stack_depth = 0;
        } else {
            self.track(op);
        }
    }

    /// Emits FETCH with a variable index.
    pub fn emit_fetch(&mut self, index: u8) {
        trace!("Emit FETCH {index}");
        self.bytecode.push(opcode::FETCH);
        self.bytecode.push(index);
        self.track(opcode::FETCH);
    }

    /// Emits LITERAL with the value as 8 little-endian bytes.
    pub fn emit_literal(&mut self, value: f64) {
        trace!("Emit LITERAL {value}");
        self.bytecode.push(opcode::LITERAL);
        self.bytecode.extend_from_slice(&value.to_le_bytes());
        self.track(opcode::LITERAL);
    }

    /// Values the emitted code leaves on the stack since the last EXPR_TERM.
    /// Negative when more values were consumed than produced.
    pub fn stack_depth(&self) -> i32 {
        self.current_stack_depth
    }

    /// Deepest value stack the emitted code reaches.
    pub fn max_stack_depth(&self) -> i32 {
        self.max_stack_depth
    }

    fn track(&mut self, op: u8) {
        self.current_stack_depth += opcode::stack_effect(op);
        self.max_stack_depth = self.max_stack_depth.max(self.current_stack_depth);
    }

    #[cfg(test)]
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Terminates the buffer with END_STACK and returns the program.
    pub fn into_program(mut self) -> Program {
        self.bytecode.push(opcode::END_STACK);
        Program::from_compiler_output(self.bytecode)
    }

    /// Returns the partial buffer marked as a failed compilation.
    pub fn into_failed(mut self) -> Vec<u8> {
        match self.bytecode.first_mut() {
            Some(first) => *first = opcode::BAD_EXPRESSION,
            None => self.bytecode.push(opcode::BAD_EXPRESSION),
        }
        self.bytecode
    }
}
