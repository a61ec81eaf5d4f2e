//! Compiles an infix expression into postfix bytecode.
//!
//! The compiler reads tokens left to right, keeping pending operators on a
//! bounded stack. An incoming operator first flushes every stacked operator
//! whose in-stack priority is at least its own incoming priority, which
//! makes equal priorities left associative. Open parentheses sit on the
//! stack with in-stack priority 0 so only a close parenthesis, separator or
//! the end of the expression removes them.
//!
//! Each open parenthesis also records the value stack depth at which its
//! list starts, so that every `,` and `)` can check that exactly one more
//! value has been produced and `)` can match the count against the function
//! that owns the list.

use log::debug;
use softcalc_bytecode::{opcode, Program};

use crate::elements::{check_table, resolve_minus, Element, TokenKind, COND_END_MARKER, ELEMENTS};
use crate::emit::Emitter;
use crate::literal::{literal_value, scan_numeral};
use crate::stack::OperatorStack;
use crate::tokenizer::{Token, Tokenizer};
use crate::{CompileError, CompileFailure, CompileOptions, ErrorKind};

/// Upper bound on the size of the program compiled from an expression of
/// `expression_len` bytes.
///
/// A one character numeral produces 9 bytes. Every other token produces at
/// most two bytes per input character. The terminator adds one.
pub fn capacity_bound(expression_len: usize) -> usize {
    9 * expression_len + 1
}

/// Compiles an expression with the default options.
pub fn compile(expression: &str) -> Result<Program, CompileFailure> {
    compile_with_options(expression, &CompileOptions::default())
}

/// Compiles an expression.
///
/// On failure the returned [`CompileFailure`] holds the first violation and
/// the partially emitted bytes, with byte 0 set to `BAD_EXPRESSION`.
pub fn compile_with_options(
    expression: &str,
    options: &CompileOptions,
) -> Result<Program, CompileFailure> {
    debug_assert_eq!(check_table(ELEMENTS), Ok(()));
    debug!("Compiling expression {expression:?}");

    let mut compiler = Compiler::new(expression, options);
    match compiler.run() {
        Ok(()) => {
            let max_stack_depth = compiler.emitter.max_stack_depth();
            let program = compiler.emitter.into_program();
            debug_assert!(program.len() <= capacity_bound(expression.len()));
            debug!(
                "Compiled {} bytes, value stack depth {max_stack_depth}",
                program.len()
            );
            Ok(program)
        }
        Err(error) => {
            debug!("Compile failed: {error}");
            Err(CompileFailure {
                error,
                partial: compiler.emitter.into_failed(),
            })
        }
    }
}

struct Compiler<'a> {
    options: &'a CompileOptions,
    tokenizer: Tokenizer,
    stack: OperatorStack,
    emitter: Emitter,
    /// True where the grammar expects an operand next.
    operand_needed: bool,
    /// True until the current expression has produced anything.
    new_expression: bool,
    /// `?` operators in the current expression still waiting for `:`.
    open_conditionals: usize,
    /// One entry per open parenthesis on the operator stack.
    lists: Vec<ArgumentList>,
}

/// Values produced inside one pair of parentheses.
struct ArgumentList {
    /// Value stack depth before the first argument.
    base: i32,
    /// Arguments completed by a `,`.
    separated: i32,
}

impl<'a> Compiler<'a> {
    fn new(expression: &str, options: &'a CompileOptions) -> Self {
        Compiler {
            options,
            tokenizer: Tokenizer::new(expression),
            stack: OperatorStack::new(options.max_stack_depth),
            emitter: Emitter::with_capacity(capacity_bound(expression.len())),
            operand_needed: true,
            new_expression: true,
            open_conditionals: 0,
            lists: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<(), CompileError> {
        while let Some(token) = self.tokenizer.next_token()? {
            match token.element.kind {
                TokenKind::Operand => {
                    self.require_operand(&token)?;
                    if token.element.opcode == opcode::FETCH {
                        self.emitter.emit_fetch(token.variable);
                    } else {
                        self.emitter.emit_op(token.element.opcode);
                    }
                    self.operand_needed = false;
                    self.new_expression = false;
                }
                TokenKind::FloatLiteralMarker => {
                    self.require_operand(&token)?;
                    self.literal(&token)?;
                    self.operand_needed = false;
                    self.new_expression = false;
                }
                TokenKind::BinaryOperator => {
                    self.require_operator(&token)?;
                    self.push_operator(token.element, token.position)?;
                    self.operand_needed = true;
                }
                TokenKind::UnaryOperator => {
                    self.require_operand(&token)?;
                    self.push_operator(token.element, token.position)?;
                    if token.element.is_open_paren() {
                        self.lists.push(ArgumentList {
                            base: self.emitter.stack_depth(),
                            separated: 0,
                        });
                    }
                    self.operand_needed = true;
                    self.new_expression = false;
                }
                TokenKind::AmbiguousMinus => {
                    let element = *resolve_minus(self.operand_needed);
                    if self.operand_needed {
                        self.new_expression = false;
                    }
                    self.push_operator(element, token.position)?;
                    self.operand_needed = true;
                }
                TokenKind::Separator => {
                    self.require_operator(&token)?;
                    self.unwind_to_paren(ErrorKind::UnbalancedParen, token.position)?;
                    self.separate_argument(token.position)?;
                    self.operand_needed = true;
                }
                TokenKind::CloseParen => {
                    self.require_operator(&token)?;
                    self.unwind_to_paren(ErrorKind::ExtraCloseParen, token.position)?;
                    self.stack.pop();
                    self.close_arguments(token.position)?;
                    self.operand_needed = false;
                }
                TokenKind::Conditional => {
                    self.require_operator(&token)?;
                    self.conditional(&token)?;
                    self.operand_needed = true;
                }
                TokenKind::ExprTerminator => {
                    self.finish_expression(token.position)?;
                    self.emitter.emit_op(opcode::EXPR_TERM);
                }
            }
        }

        self.finish_expression(self.tokenizer.position())
    }

    fn require_operand(&self, token: &Token) -> Result<(), CompileError> {
        if self.operand_needed {
            Ok(())
        } else {
            Err(CompileError::new(ErrorKind::MissingOperand, token.position))
        }
    }

    fn require_operator(&self, token: &Token) -> Result<(), CompileError> {
        if self.operand_needed {
            Err(CompileError::new(ErrorKind::MissingOperand, token.position))
        } else {
            Ok(())
        }
    }

    /// Emits the numeral that starts at `token` and skips past it.
    fn literal(&mut self, token: &Token) -> Result<(), CompileError> {
        let numeral = scan_numeral(self.tokenizer.text(), token.position);
        let end = token.position + numeral.len();
        let value = literal_value(numeral, self.options.literal_policy).map_err(|err| {
            debug!("{err}");
            CompileError::new(ErrorKind::BadLiteral, token.position)
        })?;
        self.emitter.emit_literal(value);
        self.tokenizer.seek(end);
        Ok(())
    }

    /// Pops and emits stacked operators while `flush` holds for the top.
    fn flush_while(&mut self, flush: impl Fn(&Element) -> bool) {
        while let Some(top) = self.stack.top().copied() {
            if !flush(&top) {
                break;
            }
            debug_assert!(!top.is_open_paren());
            self.stack.pop();
            self.emitter.emit_op(top.opcode);
        }
    }

    fn push_operator(&mut self, element: Element, position: usize) -> Result<(), CompileError> {
        self.flush_while(|top| top.in_stack_pri >= element.in_coming_pri);
        self.stack.push(element, position)
    }

    /// Pops and emits operators down to the nearest open parenthesis, which
    /// stays on the stack. Fails with `kind` when there is none.
    fn unwind_to_paren(&mut self, kind: ErrorKind, position: usize) -> Result<(), CompileError> {
        while let Some(top) = self.stack.top().copied() {
            if top.is_open_paren() {
                return Ok(());
            }
            self.stack.pop();
            self.emitter.emit_op(top.opcode);
        }
        Err(CompileError::new(kind, position))
    }

    /// Checks that the argument ending at a `,` left exactly one value.
    fn separate_argument(&mut self, position: usize) -> Result<(), CompileError> {
        let depth = self.emitter.stack_depth();
        let list = self
            .lists
            .last_mut()
            .ok_or_else(|| CompileError::new(ErrorKind::UnbalancedParen, position))?;
        if depth != list.base + list.separated + 1 {
            return Err(CompileError::new(ErrorKind::ArgumentCount, position));
        }
        list.separated += 1;
        Ok(())
    }

    /// Checks the list closed by `)` against the element that owns it, which
    /// is on top of the operator stack once the open parenthesis is gone.
    fn close_arguments(&mut self, position: usize) -> Result<(), CompileError> {
        let list = self
            .lists
            .pop()
            .ok_or_else(|| CompileError::new(ErrorKind::ExtraCloseParen, position))?;
        let arguments = list.separated + 1;
        let expected = self.stack.top().map_or(1, Element::argument_count);
        if self.emitter.stack_depth() != list.base + arguments
            || usize::try_from(arguments) != Ok(expected)
        {
            return Err(CompileError::new(ErrorKind::ArgumentCount, position));
        }
        Ok(())
    }

    fn conditional(&mut self, token: &Token) -> Result<(), CompileError> {
        let element = token.element;
        self.flush_while(|top| top.in_stack_pri > element.in_coming_pri);

        if element.opcode == opcode::COND_ELSE {
            if self.open_conditionals == 0 {
                return Err(CompileError::new(
                    ErrorKind::UnbalancedConditional,
                    token.position,
                ));
            }
            self.open_conditionals -= 1;
            self.emitter.emit_op(opcode::COND_ELSE);
            self.stack.push(COND_END_MARKER, token.position)
        } else {
            self.open_conditionals += 1;
            self.emitter.emit_op(element.opcode);
            Ok(())
        }
    }

    /// Ends the current expression at `;` or the end of the input.
    fn finish_expression(&mut self, position: usize) -> Result<(), CompileError> {
        if self.operand_needed && !self.new_expression {
            return Err(CompileError::new(ErrorKind::MissingOperand, position));
        }

        while let Some(top) = self.stack.pop() {
            if top.is_open_paren() {
                return Err(CompileError::new(ErrorKind::UnbalancedParen, position));
            }
            self.emitter.emit_op(top.opcode);
        }

        if self.open_conditionals != 0 {
            return Err(CompileError::new(
                ErrorKind::UnbalancedConditional,
                position,
            ));
        }

        let expected_depth = if self.new_expression { 0 } else { 1 };
        if self.emitter.stack_depth() != expected_depth {
            return Err(CompileError::new(ErrorKind::ArgumentCount, position));
        }

        debug_assert!(self.stack.is_empty());
        self.lists.clear();
        self.operand_needed = true;
        self.new_expression = true;
        Ok(())
    }
}
