//! Shared test helpers for codegen integration tests.
//!
//! `evaluate` is a small stack machine that runs compiled programs so tests
//! can check what an expression computes rather than only what it emits.

use softcalc_bytecode::{opcode, Instruction, Operand, Program};
use softcalc_codegen::compile;

/// Value pushed by RNDM so results are reproducible.
#[allow(dead_code)]
pub const RANDOM_VALUE: f64 = 0.5;

/// Compiles an expression, panicking with the rendered failure.
#[allow(dead_code)]
pub fn compile_ok(expression: &str) -> Program {
    match compile(expression) {
        Ok(program) => program,
        Err(failure) => panic!("{}", failure.render(expression)),
    }
}

/// Compiles and evaluates an expression with all variables zero.
#[allow(dead_code)]
pub fn eval(expression: &str) -> f64 {
    evaluate(&compile_ok(expression), &[])
}

/// Compiles and evaluates an expression. `vars[0]` is A, `vars[1]` is B
/// and so on; missing variables are zero.
#[allow(dead_code)]
pub fn eval_with(expression: &str, vars: &[f64]) -> f64 {
    evaluate(&compile_ok(expression), vars)
}

fn skip_to(code: &[Instruction], mut pc: usize, target: u8) -> usize {
    let mut depth = 0;
    while pc < code.len() {
        let op = code[pc].opcode;
        pc += 1;
        if op == opcode::COND_IF {
            depth += 1;
        } else if op == target {
            if depth == 0 {
                return pc;
            }
            depth -= 1;
        }
    }
    pc
}

/// Runs `program` and returns the value it leaves.
#[allow(dead_code)]
pub fn evaluate(program: &Program, vars: &[f64]) -> f64 {
    let code: Vec<Instruction> = program.instructions().collect();
    let mut stack: Vec<f64> = Vec::new();
    let mut result = 0.0;
    let mut pc = 0;

    while pc < code.len() {
        let instruction = code[pc];
        pc += 1;

        macro_rules! unary {
            ($f:expr) => {{
                let a = stack.pop().unwrap();
                stack.push($f(a));
            }};
        }
        macro_rules! binary {
            ($f:expr) => {{
                let b = stack.pop().unwrap();
                let a = stack.pop().unwrap();
                stack.push($f(a, b));
            }};
        }

        match instruction.opcode {
            opcode::FETCH => match instruction.operand {
                Operand::Variable(index) => {
                    stack.push(vars.get(index as usize).copied().unwrap_or(0.0))
                }
                other => panic!("FETCH with operand {other:?}"),
            },
            opcode::LITERAL => match instruction.operand {
                Operand::Literal(value) => stack.push(value),
                other => panic!("LITERAL with operand {other:?}"),
            },
            opcode::CONST_PI => stack.push(std::f64::consts::PI),
            opcode::CONST_D2R => stack.push(std::f64::consts::PI / 180.0),
            opcode::CONST_R2D => stack.push(180.0 / std::f64::consts::PI),
            opcode::CONST_S2R => stack.push(std::f64::consts::PI / (180.0 * 3600.0)),
            opcode::CONST_R2S => stack.push((180.0 * 3600.0) / std::f64::consts::PI),
            opcode::RANDOM => stack.push(RANDOM_VALUE),

            opcode::ADD => binary!(|a, b| a + b),
            opcode::SUB => binary!(|a, b| a - b),
            opcode::MULT => binary!(|a, b| a * b),
            opcode::DIV => binary!(|a, b| a / b),
            opcode::MODULO => binary!(|a: f64, b: f64| {
                let (a, b) = (a as i64, b as i64);
                if b == 0 {
                    f64::NAN
                } else {
                    (a % b) as f64
                }
            }),
            opcode::EXPON => binary!(|a: f64, b: f64| a.powf(b)),
            opcode::UNARY_NEG => unary!(|a: f64| -a),

            opcode::ABS_VAL => unary!(f64::abs),
            opcode::SQU_RT => unary!(f64::sqrt),
            opcode::EXP => unary!(f64::exp),
            opcode::LOG_10 => unary!(f64::log10),
            opcode::LOG_E => unary!(f64::ln),
            opcode::MAX => binary!(f64::max),
            opcode::MIN => binary!(f64::min),
            opcode::CEIL => unary!(f64::ceil),
            opcode::FLOOR => unary!(f64::floor),
            opcode::NINT => unary!(f64::round),

            opcode::ACOS => unary!(f64::acos),
            opcode::ASIN => unary!(f64::asin),
            opcode::ATAN => unary!(f64::atan),
            opcode::ATAN2 => binary!(|y: f64, x: f64| x.atan2(y)),
            opcode::COS => unary!(f64::cos),
            opcode::COSH => unary!(f64::cosh),
            opcode::SIN => unary!(f64::sin),
            opcode::SINH => unary!(f64::sinh),
            opcode::TAN => unary!(f64::tan),
            opcode::TANH => unary!(f64::tanh),

            opcode::REL_OR => binary!(|a, b| truth(a != 0.0 || b != 0.0)),
            opcode::REL_AND => binary!(|a, b| truth(a != 0.0 && b != 0.0)),
            opcode::REL_NOT => unary!(|a| truth(a == 0.0)),
            opcode::BIT_OR => binary!(|a, b| (int(a) | int(b)) as f64),
            opcode::BIT_AND => binary!(|a, b| (int(a) & int(b)) as f64),
            opcode::BIT_EXCL_OR => binary!(|a, b| (int(a) ^ int(b)) as f64),
            opcode::BIT_NOT => unary!(|a| (!int(a)) as f64),
            opcode::RIGHT_SHIFT => binary!(|a, b| (int(a) >> int(b)) as f64),
            opcode::LEFT_SHIFT => binary!(|a, b| (int(a) << int(b)) as f64),

            opcode::GR_OR_EQ => binary!(|a, b| truth(a >= b)),
            opcode::GR_THAN => binary!(|a, b| truth(a > b)),
            opcode::LESS_OR_EQ => binary!(|a, b| truth(a <= b)),
            opcode::LESS_THAN => binary!(|a, b| truth(a < b)),
            opcode::NOT_EQ => binary!(|a, b| truth(a != b)),
            opcode::EQUAL => binary!(|a, b| truth(a == b)),

            opcode::COND_IF => {
                if stack.pop().unwrap() == 0.0 {
                    pc = skip_to(&code, pc, opcode::COND_ELSE);
                }
            }
            opcode::COND_ELSE => pc = skip_to(&code, pc, opcode::COND_END),
            opcode::COND_END => {}

            opcode::EXPR_TERM => {
                if let Some(value) = stack.last() {
                    result = *value;
                }
                stack.clear();
            }
            opcode::END_STACK => {
                if let Some(value) = stack.last() {
                    result = *value;
                }
                break;
            }
            other => panic!("unexpected opcode {other:#04x}"),
        }
    }

    result
}

fn truth(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

fn int(value: f64) -> i32 {
    value as i32
}
