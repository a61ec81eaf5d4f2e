//! Code generation for SoftCalc expressions.
//!
//! This crate transforms a calculation expression such as `A>0?B*2:-C`
//! into postfix bytecode that a SoftCalc evaluator runs every scan cycle.
//! Compilation is a single synchronous pass: a table driven tokenizer feeds
//! an operator-precedence (shunting-yard) code generator.
//!
//! # Language
//!
//! - Variables `A` through `Z` (case-insensitive)
//! - Floating point literals (`1`, `2.5`, `.5`, `1E-3`)
//! - Constants `PI`, `D2R`, `R2D`, `S2R`, `R2S` and `RNDM`
//! - Arithmetic `+ - * / % ^ **`, unary `-`
//! - Relational `< <= > >= = == # !=`
//! - Logical and bitwise `&& || ! & | ~ AND OR XOR NOT >> <<`
//! - Functions such as `ABS`, `SQRT`, `LOG`, `ATAN2(y,x)`, `MAX(a,b)`
//! - Conditionals `c ? a : b`
//! - Several expressions separated by `;`
//!
//! # Example
//!
//! ```
//! use softcalc_codegen::compile;
//!
//! let program = compile("max(a, b) * 2").unwrap();
//! assert_eq!(program.as_bytes()[0], softcalc_bytecode::opcode::FETCH);
//! ```

mod compile;
pub mod elements;
mod emit;
mod error;
mod literal;
mod options;
mod stack;
pub mod tokenizer;

pub use compile::{capacity_bound, compile, compile_with_options};
pub use error::{CompileError, CompileFailure, ErrorKind, TableError};
pub use options::{CompileOptions, LiteralPolicy, DEFAULT_MAX_STACK_DEPTH};
pub use softcalc_bytecode::Program;
