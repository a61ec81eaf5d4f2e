//! Bytecode opcode definitions shared between the compiler and evaluators.
//!
//! Opcodes are grouped by their high nibble. Every opcode is a single byte;
//! only [`FETCH`] and [`LITERAL`] carry trailing operand bytes.

/// Written over byte 0 of the output when compilation fails.
pub const BAD_EXPRESSION: u8 = 0x00;

/// Push the value of a variable.
/// Operand: u8 variable index (0 = A .. 25 = Z).
pub const FETCH: u8 = 0x01;

/// Push a floating point literal.
/// Operand: 8 bytes, IEEE-754 double (little-endian).
pub const LITERAL: u8 = 0x02;

/// Push pi.
pub const CONST_PI: u8 = 0x03;
/// Push pi/180 (degrees to radians).
pub const CONST_D2R: u8 = 0x04;
/// Push 180/pi (radians to degrees).
pub const CONST_R2D: u8 = 0x05;
/// Push pi/(180*3600) (arc-seconds to radians).
pub const CONST_S2R: u8 = 0x06;
/// Push (180*3600)/pi (radians to arc-seconds).
pub const CONST_R2S: u8 = 0x07;
/// Push a random number in [0, 1].
pub const RANDOM: u8 = 0x08;

/// Pops two values (b then a), pushes a + b.
pub const ADD: u8 = 0x10;
/// Pops two values (b then a), pushes a - b.
pub const SUB: u8 = 0x11;
/// Pops two values (b then a), pushes a * b.
pub const MULT: u8 = 0x12;
/// Pops two values (b then a), pushes a / b.
pub const DIV: u8 = 0x13;
/// Pops two values (b then a), pushes a % b on their integer parts.
pub const MODULO: u8 = 0x14;
/// Pops two values (b then a), pushes a raised to b.
pub const EXPON: u8 = 0x15;
/// Negates the value on top of the stack.
pub const UNARY_NEG: u8 = 0x16;

pub const ABS_VAL: u8 = 0x20;
pub const SQU_RT: u8 = 0x21;
pub const EXP: u8 = 0x22;
pub const LOG_10: u8 = 0x23;
pub const LOG_E: u8 = 0x24;
/// Pops two values, pushes the larger.
pub const MAX: u8 = 0x25;
/// Pops two values, pushes the smaller.
pub const MIN: u8 = 0x26;
pub const CEIL: u8 = 0x27;
pub const FLOOR: u8 = 0x28;
/// Rounds to the nearest integer, halves away from zero.
pub const NINT: u8 = 0x29;

pub const ACOS: u8 = 0x30;
pub const ASIN: u8 = 0x31;
pub const ATAN: u8 = 0x32;
/// Pops two values (x then y), pushes atan2(x, y).
pub const ATAN2: u8 = 0x33;
pub const COS: u8 = 0x34;
pub const COSH: u8 = 0x35;
pub const SIN: u8 = 0x36;
pub const SINH: u8 = 0x37;
pub const TAN: u8 = 0x38;
pub const TANH: u8 = 0x39;

/// Logical or (`||`).
pub const REL_OR: u8 = 0x40;
/// Logical and (`&&`).
pub const REL_AND: u8 = 0x41;
/// Logical not (`!`).
pub const REL_NOT: u8 = 0x42;
/// Bitwise or on the integer parts (`|`, `OR`).
pub const BIT_OR: u8 = 0x43;
/// Bitwise and on the integer parts (`&`, `AND`).
pub const BIT_AND: u8 = 0x44;
/// Bitwise exclusive or on the integer parts (`XOR`).
pub const BIT_EXCL_OR: u8 = 0x45;
/// Bitwise complement of the integer part (`~`, `NOT`).
pub const BIT_NOT: u8 = 0x46;
pub const RIGHT_SHIFT: u8 = 0x47;
pub const LEFT_SHIFT: u8 = 0x48;

pub const GR_OR_EQ: u8 = 0x50;
pub const GR_THAN: u8 = 0x51;
pub const LESS_OR_EQ: u8 = 0x52;
pub const LESS_THAN: u8 = 0x53;
pub const NOT_EQ: u8 = 0x54;
pub const EQUAL: u8 = 0x55;

/// Pops the condition; when it is zero, skips to the matching [`COND_ELSE`].
pub const COND_IF: u8 = 0x60;
/// End of the true branch; skips to the matching [`COND_END`].
pub const COND_ELSE: u8 = 0x61;
/// End of the false branch. No effect at runtime.
pub const COND_END: u8 = 0x62;

/// Open parenthesis. Lives only on the compiler's operator stack and is
/// never written to a program.
pub const PAREN: u8 = 0x70;
/// Ends one expression of a `;` separated list. The value it leaves is
/// the result unless a later expression replaces it.
pub const EXPR_TERM: u8 = 0x7E;
/// Ends the program.
pub const END_STACK: u8 = 0x7F;

/// Returns the number of operand bytes that follow `op` in a program.
pub fn operand_len(op: u8) -> usize {
    match op {
        FETCH => 1,
        LITERAL => 8,
        _ => 0,
    }
}

/// Returns the change in value stack depth when `op` executes.
///
/// `COND_IF` pops the condition and `COND_ELSE` discards the true branch's
/// value from the count, so both branches of a conditional start at the same
/// depth. `EXPR_TERM` clears the stack and is reported as 0; callers reset
/// their count themselves.
pub fn stack_effect(op: u8) -> i32 {
    match op {
        FETCH | LITERAL | CONST_PI | CONST_D2R | CONST_R2D | CONST_S2R | CONST_R2S | RANDOM => 1,
        ADD | SUB | MULT | DIV | MODULO | EXPON | MAX | MIN | ATAN2 | REL_OR | REL_AND
        | BIT_OR | BIT_AND | BIT_EXCL_OR | RIGHT_SHIFT | LEFT_SHIFT | GR_OR_EQ | GR_THAN
        | LESS_OR_EQ | LESS_THAN | NOT_EQ | EQUAL | COND_IF | COND_ELSE => -1,
        _ => 0,
    }
}

/// Returns the mnemonic for `op`, or `None` if the byte is not an opcode
/// that may appear in a program.
pub fn name(op: u8) -> Option<&'static str> {
    let name = match op {
        FETCH => "FETCH",
        LITERAL => "LITERAL",
        CONST_PI => "CONST_PI",
        CONST_D2R => "CONST_D2R",
        CONST_R2D => "CONST_R2D",
        CONST_S2R => "CONST_S2R",
        CONST_R2S => "CONST_R2S",
        RANDOM => "RANDOM",
        ADD => "ADD",
        SUB => "SUB",
        MULT => "MULT",
        DIV => "DIV",
        MODULO => "MODULO",
        EXPON => "EXPON",
        UNARY_NEG => "UNARY_NEG",
        ABS_VAL => "ABS_VAL",
        SQU_RT => "SQU_RT",
        EXP => "EXP",
        LOG_10 => "LOG_10",
        LOG_E => "LOG_E",
        MAX => "MAX",
        MIN => "MIN",
        CEIL => "CEIL",
        FLOOR => "FLOOR",
        NINT => "NINT",
        ACOS => "ACOS",
        ASIN => "ASIN",
        ATAN => "ATAN",
        ATAN2 => "ATAN2",
        COS => "COS",
        COSH => "COSH",
        SIN => "SIN",
        SINH => "SINH",
        TAN => "TAN",
        TANH => "TANH",
        REL_OR => "REL_OR",
        REL_AND => "REL_AND",
        REL_NOT => "REL_NOT",
        BIT_OR => "BIT_OR",
        BIT_AND => "BIT_AND",
        BIT_EXCL_OR => "BIT_EXCL_OR",
        BIT_NOT => "BIT_NOT",
        RIGHT_SHIFT => "RIGHT_SHIFT",
        LEFT_SHIFT => "LEFT_SHIFT",
        GR_OR_EQ => "GR_OR_EQ",
        GR_THAN => "GR_THAN",
        LESS_OR_EQ => "LESS_OR_EQ",
        LESS_THAN => "LESS_THAN",
        NOT_EQ => "NOT_EQ",
        EQUAL => "EQUAL",
        COND_IF => "COND_IF",
        COND_ELSE => "COND_ELSE",
        COND_END => "COND_END",
        EXPR_TERM => "EXPR_TERM",
        END_STACK => "END_STACK",
        _ => return None,
    };
    Some(name)
}
