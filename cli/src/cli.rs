//! Implements the command line behavior.

use log::{debug, error};
use serde_json::json;
use softcalc_bytecode::Program;
use softcalc_codegen::{compile_with_options, CompileFailure, CompileOptions};

/// How `compile` writes the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// One instruction per line with offsets and mnemonics.
    Listing,
    /// Hexadecimal bytes separated by spaces.
    Bytes,
    /// The expression, bytes and decoded instructions as JSON.
    Json,
}

/// Compiles `expression` and writes the program to standard output.
pub fn compile(expression: &str, options: &CompileOptions, format: Format) -> Result<(), String> {
    let program = compile_or_report(expression, options)?;
    print!("{}", render(expression, &program, format)?);
    Ok(())
}

/// Compiles `expression` and reports only failures.
pub fn check(expression: &str, options: &CompileOptions) -> Result<(), String> {
    compile_or_report(expression, options).map(|_| ())
}

fn compile_or_report(expression: &str, options: &CompileOptions) -> Result<Program, String> {
    debug!("Options {options:?}");
    compile_with_options(expression, options).map_err(|failure| report(expression, &failure))
}

/// Writes the caret display to standard error and returns the summary.
fn report(expression: &str, failure: &CompileFailure) -> String {
    error!("Compile failed with code {}", failure.kind().code());
    eprintln!("{}", failure.render(expression));
    format!("Error compiling expression: {failure}")
}

pub fn render(expression: &str, program: &Program, format: Format) -> Result<String, String> {
    match format {
        Format::Listing => Ok(program.to_string()),
        Format::Bytes => {
            let hex: Vec<String> = program
                .as_bytes()
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect();
            Ok(format!("{}\n", hex.join(" ")))
        }
        Format::Json => {
            let value = json!({
                "expression": expression,
                "program": program,
            });
            serde_json::to_string_pretty(&value)
                .map(|text| text + "\n")
                .map_err(|e| format!("Unable to write JSON: {e}"))
        }
    }
}
