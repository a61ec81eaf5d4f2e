//! Error types for expression compilation.

use thiserror::Error;

/// The kinds of rule violations that abort compilation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An operator appeared where an operand was expected, or the reverse.
    #[error("operand and operator out of sequence")]
    MissingOperand,
    /// A separator or terminator found no matching open parenthesis, or an
    /// open parenthesis is still pending at the end of an expression.
    #[error("parenthesis or separator without a matching open parenthesis")]
    UnbalancedParen,
    /// A close parenthesis found no open parenthesis on the stack.
    #[error("close parenthesis found without open")]
    ExtraCloseParen,
    /// No element and no variable letter matches the input.
    #[error("unknown operator or operand")]
    UnknownToken,
    /// A numeral could not be converted to a number.
    #[error("badly formed numeric literal")]
    BadLiteral,
    /// A `:` without a pending `?`, or a `?` without its `:`.
    #[error("unbalanced conditional ?: operators")]
    UnbalancedConditional,
    /// The operator stack limit was reached.
    #[error("expression exceeds the operator stack limit")]
    ExpressionTooComplex,
    /// A parenthesized list holds a different number of values than the
    /// function before it takes, or an expression leaves other than one value.
    #[error("wrong number of arguments")]
    ArgumentCount,
}

impl ErrorKind {
    /// Returns a stable numeric code for callers that store a status word.
    pub fn code(self) -> i16 {
        match self {
            ErrorKind::MissingOperand => 1,
            ErrorKind::UnbalancedParen => 2,
            ErrorKind::ExtraCloseParen => 3,
            ErrorKind::UnknownToken => 4,
            ErrorKind::BadLiteral => 5,
            ErrorKind::UnbalancedConditional => 6,
            ErrorKind::ExpressionTooComplex => 7,
            ErrorKind::ArgumentCount => 8,
        }
    }
}

/// A rule violation and the byte offset in the expression where it was found.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{kind} at offset {position}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub position: usize,
}

impl CompileError {
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        CompileError { kind, position }
    }
}

/// A failed compilation.
///
/// `partial` holds the bytes emitted before the failure with byte 0
/// overwritten by [`softcalc_bytecode::opcode::BAD_EXPRESSION`], so a
/// consumer that inspects the buffer without the status still refuses it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{error}")]
pub struct CompileFailure {
    pub error: CompileError,
    pub partial: Vec<u8>,
}

impl CompileFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind
    }

    pub fn position(&self) -> usize {
        self.error.position
    }

    /// Formats the failure against the expression text with a caret under
    /// the offending position.
    pub fn render(&self, expression: &str) -> String {
        let column = expression
            .get(..self.position().min(expression.len()))
            .map_or(0, |prefix| prefix.chars().count());
        format!(
            "{expression}\n{marker}^ {kind}",
            marker = " ".repeat(column),
            kind = self.kind()
        )
    }
}

/// Problems found by the element table self-check.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("pattern \"{shadowed}\" can never match because \"{prefix}\" precedes it")]
    Shadowed {
        prefix: &'static str,
        shadowed: &'static str,
    },
    #[error("element {0} has an empty pattern")]
    EmptyPattern(usize),
}
