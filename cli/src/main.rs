use std::path::PathBuf;

use clap::Parser;
use softcalc_codegen::{CompileOptions, LiteralPolicy, DEFAULT_MAX_STACK_DEPTH};

mod cli;
mod logger;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "softcalc", about = "SoftCalc expression compiler")]
struct Args {
    /// Turn on verbose logging. Repeat to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Sets the logging to write to a file.
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Selects the subcommand.
    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Args, Debug)]
struct CompileArgs {
    /// Maximum number of pending operators while compiling.
    #[arg(long, default_value_t = DEFAULT_MAX_STACK_DEPTH)]
    max_stack_depth: usize,

    /// Compile malformed numerals such as `1E+` as 0 instead of failing.
    #[arg(long)]
    lenient_literals: bool,
}

impl CompileArgs {
    fn options(&self) -> CompileOptions {
        let policy = if self.lenient_literals {
            LiteralPolicy::ZeroOnError
        } else {
            LiteralPolicy::Strict
        };
        CompileOptions::default()
            .with_max_stack_depth(self.max_stack_depth)
            .with_literal_policy(policy)
    }
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Compiles an expression and writes the program.
    Compile {
        /// The expression, for example "A>0?B*2:-C".
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t = cli::Format::Listing)]
        format: cli::Format,

        #[command(flatten)]
        options: CompileArgs,
    },
    /// Checks that an expression compiles. Writes nothing on success.
    Check {
        /// The expression to check.
        #[arg(allow_hyphen_values = true)]
        expression: String,

        #[command(flatten)]
        options: CompileArgs,
    },
    /// Prints the version number of the compiler.
    Version,
}

pub fn main() -> Result<(), String> {
    let args = Args::parse();

    logger::configure(args.verbose, args.log_file.as_deref())?;

    match args.action {
        Action::Compile {
            expression,
            format,
            options,
        } => cli::compile(&expression, &options.options(), format),
        Action::Check {
            expression,
            options,
        } => cli::check(&expression, &options.options()),
        Action::Version => {
            println!("softcalc version {VERSION}");
            Ok(())
        }
    }
}
