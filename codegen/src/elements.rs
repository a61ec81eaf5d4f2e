//! The element table: every lexeme of the expression language together
//! with its priorities and the opcode it compiles to.
//!
//! The tokenizer takes the first entry whose pattern prefixes the input, so
//! an entry must come before any shorter entry that is a prefix of it
//! (`SQRT` before `SQR`, `**` before `*`). [`check_table`] verifies this.

use softcalc_bytecode::opcode;

use crate::TableError;

/// The grammatical role of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Pushes a value: variables, named constants, `RNDM`.
    Operand,
    /// Prefix operators, functions and the open parenthesis.
    UnaryOperator,
    BinaryOperator,
    /// `-`, resolved to unary negate or binary subtract by position.
    AmbiguousMinus,
    /// `?` and `:`.
    Conditional,
    CloseParen,
    /// `,` between function arguments.
    Separator,
    /// `;` between expressions.
    ExprTerminator,
    /// First character of a numeric literal.
    FloatLiteralMarker,
}

/// One entry of the element table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element {
    /// Uppercase text of the element.
    pub pattern: &'static str,
    /// Priority while waiting on the operator stack.
    pub in_stack_pri: u8,
    /// Priority when arriving from the input.
    pub in_coming_pri: u8,
    pub kind: TokenKind,
    pub opcode: u8,
}

impl Element {
    /// Returns true for the open parenthesis marker.
    pub fn is_open_paren(&self) -> bool {
        self.kind == TokenKind::UnaryOperator && self.opcode == opcode::PAREN
    }

    /// Number of comma separated values a parenthesized list directly after
    /// this element must hold: 2 for `MAX`, `MIN` and `ATAN2`, otherwise 1.
    pub fn argument_count(&self) -> usize {
        if self.kind == TokenKind::UnaryOperator && opcode::stack_effect(self.opcode) < 0 {
            2
        } else {
            1
        }
    }
}

const fn element(
    pattern: &'static str,
    in_stack_pri: u8,
    in_coming_pri: u8,
    kind: TokenKind,
    opcode: u8,
) -> Element {
    Element {
        pattern,
        in_stack_pri,
        in_coming_pri,
        kind,
        opcode,
    }
}

use TokenKind::*;

/// The element table, in match order.
#[rustfmt::skip]
pub static ELEMENTS: &[Element] = &[
    //       pattern   isp icp kind                 opcode
    element("ABS",     7, 8,  UnaryOperator,       opcode::ABS_VAL),
    element("NOT",     7, 8,  UnaryOperator,       opcode::BIT_NOT),
    element("-",       7, 8,  AmbiguousMinus,      opcode::UNARY_NEG),
    element("SQRT",    7, 8,  UnaryOperator,       opcode::SQU_RT),
    element("SQR",     7, 8,  UnaryOperator,       opcode::SQU_RT),
    element("EXP",     7, 8,  UnaryOperator,       opcode::EXP),
    element("LOGE",    7, 8,  UnaryOperator,       opcode::LOG_E),
    element("LN",      7, 8,  UnaryOperator,       opcode::LOG_E),
    element("LOG",     7, 8,  UnaryOperator,       opcode::LOG_10),
    element("ACOS",    7, 8,  UnaryOperator,       opcode::ACOS),
    element("ASIN",    7, 8,  UnaryOperator,       opcode::ASIN),
    element("ATAN2",   7, 8,  UnaryOperator,       opcode::ATAN2),
    element("ATAN",    7, 8,  UnaryOperator,       opcode::ATAN),
    element("MAX",     7, 8,  UnaryOperator,       opcode::MAX),
    element("MIN",     7, 8,  UnaryOperator,       opcode::MIN),
    element("CEIL",    7, 8,  UnaryOperator,       opcode::CEIL),
    element("FLOOR",   7, 8,  UnaryOperator,       opcode::FLOOR),
    element("NINT",    7, 8,  UnaryOperator,       opcode::NINT),
    element("COSH",    7, 8,  UnaryOperator,       opcode::COSH),
    element("COS",     7, 8,  UnaryOperator,       opcode::COS),
    element("SINH",    7, 8,  UnaryOperator,       opcode::SINH),
    element("SIN",     7, 8,  UnaryOperator,       opcode::SIN),
    element("TANH",    7, 8,  UnaryOperator,       opcode::TANH),
    element("TAN",     7, 8,  UnaryOperator,       opcode::TAN),
    element("!=",      3, 3,  BinaryOperator,      opcode::NOT_EQ),
    element("!",       7, 8,  UnaryOperator,       opcode::REL_NOT),
    element("~",       7, 8,  UnaryOperator,       opcode::BIT_NOT),
    element("RNDM",    0, 0,  Operand,             opcode::RANDOM),
    element("OR",      1, 1,  BinaryOperator,      opcode::BIT_OR),
    element("AND",     2, 2,  BinaryOperator,      opcode::BIT_AND),
    element("XOR",     1, 1,  BinaryOperator,      opcode::BIT_EXCL_OR),
    element("PI",      0, 0,  Operand,             opcode::CONST_PI),
    element("D2R",     0, 0,  Operand,             opcode::CONST_D2R),
    element("R2D",     0, 0,  Operand,             opcode::CONST_R2D),
    element("S2R",     0, 0,  Operand,             opcode::CONST_S2R),
    element("R2S",     0, 0,  Operand,             opcode::CONST_R2S),
    element("0",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("1",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("2",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("3",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("4",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("5",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("6",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("7",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("8",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("9",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element(".",       0, 0,  FloatLiteralMarker,  opcode::LITERAL),
    element("?",       0, 0,  Conditional,         opcode::COND_IF),
    element(":",       0, 0,  Conditional,         opcode::COND_ELSE),
    element("(",       0, 8,  UnaryOperator,       opcode::PAREN),
    element("^",       6, 6,  BinaryOperator,      opcode::EXPON),
    element("**",      6, 6,  BinaryOperator,      opcode::EXPON),
    element("+",       4, 4,  BinaryOperator,      opcode::ADD),
    element("*",       5, 5,  BinaryOperator,      opcode::MULT),
    element("/",       5, 5,  BinaryOperator,      opcode::DIV),
    element("%",       5, 5,  BinaryOperator,      opcode::MODULO),
    element(",",       0, 0,  Separator,           opcode::PAREN),
    element(")",       0, 0,  CloseParen,          opcode::PAREN),
    element("||",      1, 1,  BinaryOperator,      opcode::REL_OR),
    element("|",       1, 1,  BinaryOperator,      opcode::BIT_OR),
    element("&&",      2, 2,  BinaryOperator,      opcode::REL_AND),
    element("&",       2, 2,  BinaryOperator,      opcode::BIT_AND),
    element(">>",      2, 2,  BinaryOperator,      opcode::RIGHT_SHIFT),
    element(">=",      3, 3,  BinaryOperator,      opcode::GR_OR_EQ),
    element(">",       3, 3,  BinaryOperator,      opcode::GR_THAN),
    element("<<",      2, 2,  BinaryOperator,      opcode::LEFT_SHIFT),
    element("<=",      3, 3,  BinaryOperator,      opcode::LESS_OR_EQ),
    element("<",       3, 3,  BinaryOperator,      opcode::LESS_THAN),
    element("#",       3, 3,  BinaryOperator,      opcode::NOT_EQ),
    element("==",      3, 3,  BinaryOperator,      opcode::EQUAL),
    element("=",       3, 3,  BinaryOperator,      opcode::EQUAL),
    element(";",       0, 0,  ExprTerminator,      opcode::EXPR_TERM),
];

/// Synthesized for a letter that matches no table entry.
pub const FETCH_ELEMENT: Element = element("A", 0, 0, Operand, opcode::FETCH);

/// `-` where an operand is expected.
pub const UNARY_NEGATE: Element = element("-", 7, 8, UnaryOperator, opcode::UNARY_NEG);

/// `-` where an operator is expected.
pub const BINARY_SUBTRACT: Element = element("-", 4, 4, BinaryOperator, opcode::SUB);

/// Pushed by `:` so that the end of the false branch is marked once the
/// branch has been emitted.
pub const COND_END_MARKER: Element = element(":", 0, 0, Conditional, opcode::COND_END);

/// Resolves the ambiguous minus by whether an operand is expected.
pub fn resolve_minus(operand_needed: bool) -> &'static Element {
    if operand_needed {
        &UNARY_NEGATE
    } else {
        &BINARY_SUBTRACT
    }
}

/// Checks that every entry of `table` is reachable: no pattern may be
/// preceded by a different pattern that is a prefix of it.
pub fn check_table(table: &[Element]) -> Result<(), TableError> {
    for (index, later) in table.iter().enumerate() {
        if later.pattern.is_empty() {
            return Err(TableError::EmptyPattern(index));
        }
        if let Some(earlier) = table[..index]
            .iter()
            .find(|earlier| later.pattern.starts_with(earlier.pattern))
        {
            return Err(TableError::Shadowed {
                prefix: earlier.pattern,
                shadowed: later.pattern,
            });
        }
    }
    Ok(())
}
