//! Sets up logging for the `softcalc` binary.
//!
//! Only records from the SoftCalc crates are written. The number of `-v`
//! flags raises them from errors, through the compiler's per-expression
//! debug lines, to a trace of every token and emitted opcode.
use env_logger::{Builder, Target};
use log::{debug, LevelFilter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Target prefix of the binary. Filters match by prefix, so this also
/// covers the `softcalc_codegen` and `softcalc_bytecode` crates.
const SOFTCALC_TARGET: &str = "softcalc";

/// Highest supported number of `-v` flags.
const MAX_VERBOSITY: u8 = 4;

fn level_for(verbosity: u8) -> Result<LevelFilter, String> {
    let level = match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        4 => LevelFilter::Trace,
        _ => {
            return Err(format!(
                "Verbosity is limited to -{}, got {verbosity} -v flags",
                "v".repeat(usize::from(MAX_VERBOSITY))
            ))
        }
    };
    Ok(level)
}

/// Builds a logger that shows SoftCalc records at `level` and hides
/// everything else.
fn softcalc_builder(level: LevelFilter) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Off)
        .filter_module(SOFTCALC_TARGET, level);
    builder.format(|buf, record| {
        let now = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        writeln!(
            buf,
            "{now} {:<5} {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder
}

/// Installs the logger. Records go to standard error, or are appended to
/// `log_file` when one is given.
pub fn configure(verbosity: u8, log_file: Option<&Path>) -> Result<(), String> {
    let level = level_for(verbosity)?;
    let mut builder = softcalc_builder(level);

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("Cannot open log file {}: {e}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| format!("Logger already installed: {e}"))?;

    debug!("Logging SoftCalc records at {level}");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn configure_when_verbosity_above_max_then_err() {
        let result = configure(MAX_VERBOSITY + 1, None);

        assert_eq!(
            result,
            Err(String::from("Verbosity is limited to -vvvv, got 5 -v flags"))
        );
    }

    #[test]
    fn level_for_when_max_verbosity_then_trace() {
        assert_eq!(level_for(MAX_VERBOSITY), Ok(LevelFilter::Trace));
    }

    #[test]
    fn level_for_when_no_flags_then_errors_only() {
        assert_eq!(level_for(0), Ok(LevelFilter::Error));
    }

    #[test]
    fn softcalc_builder_when_other_crate_then_filtered_out() {
        let logger = softcalc_builder(LevelFilter::Trace).build();
        let ours = log::Record::builder()
            .target("softcalc_codegen::compile")
            .level(log::Level::Trace)
            .build();
        let theirs = log::Record::builder()
            .target("clap_builder::parser")
            .level(log::Level::Error)
            .build();

        assert!(logger.matches(&ours));
        assert!(!logger.matches(&theirs));
    }

    #[test]
    fn configure_when_log_file_unopenable_then_err() {
        let dir = std::env::temp_dir();

        let result = configure(1, Some(&dir));

        assert!(result
            .unwrap_err()
            .starts_with("Cannot open log file"));
    }
}
