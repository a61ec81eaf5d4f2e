//! Options that adjust how expressions compile.

use serde::{Deserialize, Serialize};

/// Operator stack limit used when no other limit is given.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 80;

/// How a malformed numeral such as `.` or `1E+` is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralPolicy {
    /// Fail with [`crate::ErrorKind::BadLiteral`].
    #[default]
    Strict,
    /// Encode the numeral as `0.0` and log a warning.
    ZeroOnError,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Maximum number of pending operators. Deeper nesting fails with
    /// [`crate::ErrorKind::ExpressionTooComplex`].
    pub max_stack_depth: usize,
    pub literal_policy: LiteralPolicy,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            literal_policy: LiteralPolicy::default(),
        }
    }
}

impl CompileOptions {
    pub fn with_max_stack_depth(mut self, max_stack_depth: usize) -> Self {
        self.max_stack_depth = max_stack_depth;
        self
    }

    pub fn with_literal_policy(mut self, literal_policy: LiteralPolicy) -> Self {
        self.literal_policy = literal_policy;
        self
    }
}
