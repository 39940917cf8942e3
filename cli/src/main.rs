use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::{Diagnostic, IntoDiagnostic, Result};
use regvm::{Engine, EngineOptions, Fault, Interpreter, Step, render_error_to};
use thiserror::Error;
use tracing::debug;

/// regvm - A small register-based bytecode virtual machine
#[derive(Parser, Debug)]
#[command(name = "regvm", version)]
#[command(about = "Assemble and run regvm programs", long_about = None)]
struct Args {
    /// Assembly source file
    file: PathBuf,

    /// Number of registers
    #[arg(short, long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
    registers: u32,

    /// Label where execution starts (defaults to the first instruction)
    #[arg(short, long)]
    entry: Option<String>,

    /// Print the assembled program and exit without running it
    #[arg(long)]
    parse_and_print: bool,

    /// Include the data pool when printing the program
    #[arg(long)]
    show_data: bool,

    /// Print each instruction to stderr before executing it
    #[arg(long)]
    debug: bool,

    /// Disable colors in diagnostics
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("could not read '{path}'")]
    #[diagnostic(code(regvm::read), help("check that the file exists and is readable"))]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Runs to completion, printing each instruction and the operand stack
/// depth and top before it executes.
fn run_traced<R: BufRead, W: Write>(vm: &mut Interpreter<'_, R, W>) -> Result<(), Fault> {
    loop {
        let pc = vm.pc();
        let text = vm
            .program()
            .render_instruction(pc)
            .map_or_else(|| "?".to_string(), |(text, _)| text);
        let stack = vm.stack();
        let top = stack.peek().map_or_else(|| "-".to_string(), |v| v.to_string());
        eprintln!("{:>5}  {:<16} stack={} top={}", pc, text, stack.len(), top);
        if vm.step()? == Step::Halted {
            return Ok(());
        }
    }
}

fn report(error: &regvm::Error, use_color: bool) -> Result<()> {
    render_error_to(error, &mut io::stderr(), use_color).into_diagnostic()
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging();

    let source_name = args.file.display().to_string();
    let source = fs::read_to_string(&args.file).map_err(|source| CliError::Read {
        path: source_name.clone(),
        source,
    })?;

    let engine = Engine::new(EngineOptions {
        num_registers: args.registers as usize,
        entry_point: args.entry.clone(),
        ..Default::default()
    });

    let program = match engine.assemble(&source, &source_name) {
        Ok(program) => program,
        Err(err) => {
            report(&err, !args.no_color)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.parse_and_print {
        print!("{}", program.listing(args.show_data));
        return Ok(ExitCode::SUCCESS);
    }

    let mut vm = engine.interpreter(&program, io::stdin().lock(), io::stdout().lock());
    let result = if args.debug {
        run_traced(&mut vm)
    } else {
        vm.run()
    };
    vm.into_output().flush().into_diagnostic()?;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(fault) => {
            debug!(pc = fault.pc, "run failed");
            report(&fault.into(), !args.no_color)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
