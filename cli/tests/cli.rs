use assert_cmd::cargo;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn compile_when_valid_expression_then_listing() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("compile").arg("A+B");
    cmd.assert().success().stdout(predicate::str::diff(
        "0000  FETCH A\n0002  FETCH B\n0004  ADD\n0005  END_STACK\n",
    ));

    Ok(())
}

#[test]
fn compile_when_bytes_format_then_hex() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("compile").arg("-a").arg("--format").arg("bytes");
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("01 00 16 7f\n"));

    Ok(())
}

#[test]
fn compile_when_json_format_then_mnemonics() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("compile").arg("max(A,B)").arg("--format").arg("json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"mnemonic\": \"MAX\""))
        .stdout(predicate::str::contains("\"expression\": \"max(A,B)\""));

    Ok(())
}

#[test]
fn compile_when_unknown_token_then_err_with_caret() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("compile").arg("2$3");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("2$3\n ^ unknown operator or operand"));

    Ok(())
}

#[test]
fn compile_when_too_many_arguments_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("compile").arg("MAX(3,2,1)");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "MAX(3,2,1)\n         ^ wrong number of arguments",
        ));

    Ok(())
}

#[test]
fn compile_when_stack_limit_small_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("compile")
        .arg("((A))")
        .arg("--max-stack-depth")
        .arg("1");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("operator stack limit"));

    Ok(())
}

#[test]
fn compile_when_malformed_literal_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("compile").arg("1E+");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("badly formed numeric literal"));

    Ok(())
}

#[test]
fn compile_when_malformed_literal_and_lenient_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("compile").arg("1E+").arg("--lenient-literals");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("LITERAL 0"));

    Ok(())
}

#[test]
fn check_when_valid_expression_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("check").arg("A>0 ? 1 : -1");
    cmd.assert().success().stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn check_when_unbalanced_paren_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("check").arg("(2+3");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error compiling expression"));

    Ok(())
}

#[test]
fn check_when_trace_log_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("-v")
        .arg("-v")
        .arg("-v")
        .arg("-v")
        .arg("check")
        .arg("A+1");
    cmd.assert().success();

    Ok(())
}

#[test]
fn check_when_too_verbose_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("-vvvvv").arg("check").arg("A");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Verbosity is limited to -vvvv"));

    Ok(())
}

#[test]
fn check_when_log_file_then_writes_log() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = NamedTempFile::new()?;
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("-vvv")
        .arg("--log-file")
        .arg(log_file.path())
        .arg("check")
        .arg("A*2");
    cmd.assert().success();

    let contents = std::fs::read_to_string(log_file.path())?;
    assert!(contents.contains("DEBUG softcalc_codegen::compile: Compiling expression"));

    Ok(())
}

#[test]
fn version_when_called_then_prints_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("softcalc"));

    cmd.arg("version");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("softcalc version"));

    Ok(())
}
