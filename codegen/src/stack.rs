use crate::elements::Element;
use crate::{CompileError, ErrorKind};

/// Bounded stack of pending operators.
pub struct OperatorStack {
    entries: Vec<Element>,
    max_depth: usize,
}

impl OperatorStack {
    /// Creates a new operator stack with the given maximum depth.
    pub fn new(max_depth: usize) -> Self {
        OperatorStack {
            entries: Vec::with_capacity(max_depth.min(crate::DEFAULT_MAX_STACK_DEPTH)),
            max_depth,
        }
    }

    /// Pushes an operator. `position` is reported if the stack is full.
    pub fn push(&mut self, element: Element, position: usize) -> Result<(), CompileError> {
        if self.entries.len() >= self.max_depth {
            return Err(CompileError::new(
                ErrorKind::ExpressionTooComplex,
                position,
            ));
        }
        self.entries.push(element);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Element> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<&Element> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
