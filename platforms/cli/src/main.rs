use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tur_engine::{Outcome, Program, ProgramLoader, ProgramManager, Step, TuringMachine};

const EXIT_REJECTED: u8 = 1;
const EXIT_STEP_LIMIT: u8 = 2;
const EXIT_NO_TRANSITION: u8 = 3;
const EXIT_ERROR: u8 = 4;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tur --builtin 'binary addition'
  tur -p programs/palindrome.tur -i abba
  tur --list -p programs/
  cat programs/binary-increment.tur | tur --debug

EXIT STATUS:
  0 accepted, 1 rejected, 2 step limit exceeded, 3 no transition, 4 error")]
struct Cli {
    /// The Turing machine program file to execute (a directory with --list)
    #[clap(short, long, conflicts_with = "builtin")]
    program: Option<PathBuf>,

    /// Run a built-in program by name (see --list)
    #[clap(short, long)]
    builtin: Option<String>,

    /// Replace the initial tape, one symbol per character
    #[clap(short, long)]
    input: Option<String>,

    /// Override the program's step limit
    #[clap(short, long)]
    limit: Option<usize>,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the run report as JSON
    #[clap(long, conflicts_with = "debug")]
    json: bool,

    /// List the built-in programs, or the programs in --program DIR, and exit
    #[clap(long)]
    list: bool,

    /// Log engine events to stderr (RUST_LOG takes precedence)
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Usage errors must not share an exit code with a run outcome
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.list {
        match &cli.program {
            Some(directory) => list_directory(directory)?,
            None => list_programs()?,
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut program = load_program(cli)?;
    if let Some(input) = &cli.input {
        program.tape = input.chars().collect();
    }
    if let Some(limit) = cli.limit {
        program.step_limit = limit;
    }

    let mut machine = program
        .machine()
        .with_context(|| format!("cannot run program '{}'", program.name))?;

    if cli.debug {
        print_state(&machine);
        while let Step::Continue = machine.step() {
            print_state(&machine);
        }
        println!();
    }

    let report = machine.run();
    let outcome = report.outcome;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", machine.tape());
        println!("{}", verdict(&machine, &program, outcome));
    }

    Ok(ExitCode::from(exit_code(outcome)))
}

fn load_program(cli: &Cli) -> Result<Program> {
    if let Some(path) = &cli.program {
        if path.is_dir() {
            bail!("{} is a directory: use --list to see its programs", path.display());
        }
        return ProgramLoader::load_program(path)
            .with_context(|| format!("failed to load {}", path.display()));
    }

    if let Some(name) = &cli.builtin {
        return Ok(ProgramManager::get_program_by_name(name)?);
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("no program given: use --program FILE, --builtin NAME or pipe a program on stdin");
    }

    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .context("failed to read program from stdin")?;

    Ok(ProgramLoader::load_program_from_string(&content)?)
}

fn list_programs() -> Result<()> {
    for index in 0..ProgramManager::get_program_count() {
        let info = ProgramManager::get_program_info(index)?;
        println!(
            "{:<20} states: {:<3} rules: {:<3} limit: {:<6} tape: {}",
            info.name, info.state_count, info.transition_count, info.step_limit, info.initial_tape
        );
    }

    Ok(())
}

fn list_directory(directory: &Path) -> Result<()> {
    let programs = ProgramLoader::load_programs(directory)
        .with_context(|| format!("cannot list {}", directory.display()))?;

    for (path, program) in programs {
        match program {
            Ok(program) => println!(
                "{:<20} states: {:<3} rules: {:<3} limit: {:<6} path: {}",
                program.name,
                program.states().len(),
                program.rules.len(),
                program.step_limit,
                path.display()
            ),
            Err(e) => eprintln!("{}: {e}", path.display()),
        }
    }

    Ok(())
}

fn print_state(machine: &TuringMachine) {
    println!(
        "Step: {}, State: {}, Head: {}, Symbol: {}, Tape: {}",
        machine.step_count(),
        machine.state(),
        machine.head(),
        machine.symbol(),
        machine.tape()
    );
}

fn verdict(machine: &TuringMachine, program: &Program, outcome: Outcome) -> String {
    let steps = machine.step_count();
    match outcome {
        Outcome::Accepted => format!("Accepted after {steps} steps."),
        Outcome::Rejected => format!("Rejected after {steps} steps."),
        Outcome::StepLimitExceeded => format!(
            "Stopped: step limit of {} exceeded in state {}.",
            program.step_limit,
            machine.state()
        ),
        Outcome::NoTransition => format!(
            "Stopped: no transition for state {} reading '{}' after {steps} steps.",
            machine.state(),
            machine.symbol()
        ),
    }
}

fn exit_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Accepted => 0,
        Outcome::Rejected => EXIT_REJECTED,
        Outcome::StepLimitExceeded => EXIT_STEP_LIMIT,
        Outcome::NoTransition => EXIT_NO_TRANSITION,
    }
}
