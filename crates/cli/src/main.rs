//! Stack machine simulator CLI.
//!
//! This binary is the front end for `stacksim-core`. It performs:
//! 1. **Run:** Load a program image, execute it with a step budget, and print the trace and final state.
//! 2. **Disasm:** Print an addressed listing of a program image.
//!
//! Fatal simulation errors print the error and a state dump (a fault document under `--json`) and exit with code 1.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use stacksim_core::core::{Observer, PrintEvent, StepSnapshot, TraceEvent, TraceRecorder};
use stacksim_core::isa::disasm;
use stacksim_core::sim::loader;
use stacksim_core::{Config, FaultReport, Machine, RunSummary, SimError};

#[derive(Parser, Debug)]
#[command(
    name = "stacksim",
    author,
    version,
    about = "Two-stack instruction-set simulator",
    long_about = "Run or disassemble a flat binary program for the two-stack 32-bit instruction set.\n\nExamples:\n  stacksim run hello.bin\n  stacksim run loop.bin --max-steps 50 --quiet\n  stacksim run hello.bin --json\n  stacksim disasm hello.bin"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a program image.
    Run {
        /// Program image to execute.
        file: PathBuf,

        /// Step budget; overrides the config file.
        #[arg(short = 'n', long)]
        max_steps: Option<u64>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Do not print a state line per step.
        #[arg(short, long)]
        quiet: bool,

        /// Print execution statistics after the run.
        #[arg(long)]
        stats: bool,

        /// Emit the run summary (and trace, unless --quiet) as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print a disassembly listing of a program image.
    Disasm {
        /// Program image to disassemble.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            file,
            max_steps,
            config,
            quiet,
            stats,
            json,
        } => cmd_run(&RunArgs {
            file,
            max_steps,
            config,
            quiet,
            stats,
            json,
        }),
        Commands::Disasm { file } => cmd_disasm(&file),
    }
}

/// Installs a stderr `tracing` subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

struct RunArgs {
    file: PathBuf,
    max_steps: Option<u64>,
    config: Option<PathBuf>,
    quiet: bool,
    stats: bool,
    json: bool,
}

/// Prints the per-step state line and `PRINT` notices as execution proceeds.
#[derive(Debug, Default)]
struct ConsoleReporter {
    enabled: bool,
}

impl Observer for ConsoleReporter {
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        if self.enabled {
            println!(
                "PC={:3} OP=0x{:02x} Stack={:?} RStack={:?}",
                snapshot.pc, snapshot.opcode, snapshot.data_stack, snapshot.return_stack
            );
        }
    }

    fn on_print(&mut self, event: &PrintEvent) {
        if self.enabled {
            println!("  -> PRINT: '{}' ({})", event.character, event.byte);
        }
    }
}

/// Document written to stdout by `run --json`, for both clean and fatal runs.
#[derive(Serialize)]
#[serde(untagged)]
enum JsonReport<'a> {
    Finished {
        summary: &'a RunSummary,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace: Option<&'a [TraceEvent]>,
    },
    Fault {
        #[serde(flatten)]
        fault: FaultReport,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace: Option<&'a [TraceEvent]>,
    },
}

/// Encodes the outcome of a recorded run as pretty-printed JSON.
fn render_json(
    machine: &Machine<TraceRecorder>,
    result: Result<&RunSummary, SimError>,
    include_trace: bool,
) -> serde_json::Result<String> {
    let trace = include_trace.then_some(machine.observer().events.as_slice());
    let report = match result {
        Ok(summary) => JsonReport::Finished { summary, trace },
        Err(error) => JsonReport::Fault {
            fault: machine.fault_report(error),
            trace,
        },
    };
    serde_json::to_string_pretty(&report)
}

/// Loads the program and config, runs the machine, and reports the result.
fn cmd_run(args: &RunArgs) -> ExitCode {
    let mut config = match &args.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(n) = args.max_steps {
        config.general.max_steps = n;
    }
    if args.quiet {
        config.general.trace_instructions = false;
    }
    if args.stats {
        config.general.print_stats = true;
    }

    let program = match loader::load_binary(&args.file) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(path = %args.file.display(), bytes = program.len(), "program loaded");

    if args.json {
        if config.general.print_stats {
            warn!("statistics are not printed in JSON mode");
            config.general.print_stats = false;
        }
        let include_trace = config.general.trace_instructions;
        let mut machine = Machine::with_observer(program, TraceRecorder::new());
        return execute(&mut machine, &config, |machine, result| {
            match render_json(machine, result, include_trace) {
                Ok(text) => println!("{text}"),
                Err(e) => eprintln!("Error: could not encode report: {e}"),
            }
        });
    }

    let reporter = ConsoleReporter {
        enabled: config.general.trace_instructions,
    };
    let mut machine = Machine::with_observer(program, reporter);
    execute(&mut machine, &config, |machine, result| match result {
        Ok(summary) => print_summary(summary),
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            machine.dump_state();
        }
    })
}

/// Runs `machine` under `config` and hands the outcome to `report`.
///
/// Fatal errors exit with failure after being reported.
fn execute<O: Observer + Debug>(
    machine: &mut Machine<O>,
    config: &Config,
    report: impl FnOnce(&Machine<O>, Result<&RunSummary, SimError>),
) -> ExitCode {
    let result = machine.run(config.general.max_steps);
    let code = match &result {
        Ok(summary) => {
            info!(steps = summary.steps, termination = %summary.termination, "run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(pc = e.pc(), "{e}");
            ExitCode::FAILURE
        }
    };
    report(machine, result.as_ref().map_err(|e| *e));
    if config.general.print_stats {
        machine.stats().print();
    }
    code
}

fn print_summary(summary: &RunSummary) {
    println!("\n=== Execution finished after {} steps ===", summary.steps);
    println!("Output: {}", summary.output);
    println!("Final stack: {:?}", summary.data_stack);
    println!("Final return stack: {:?}", summary.return_stack);
    println!("Termination: {}", summary.termination);
}

/// Prints an addressed listing of the program image.
fn cmd_disasm(file: &Path) -> ExitCode {
    let program = match loader::load_binary(file) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    for line in disasm::disassemble(&program) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}
