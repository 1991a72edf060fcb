//! This crate provides a single-tape Turing Machine execution engine.
//! It includes the generic engine (transition table, tape and executor), a parser for
//! `.tur` program files, a loader, and a small collection of built-in programs.

pub mod config;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `MachineConfig` struct from the config module.
pub use config::MachineConfig;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the executor and its one-call entry point from the machine module.
pub use machine::{execute, TuringMachine};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
pub use table::TransitionTable;
pub use tape::Tape;
/// Re-exports the types describing programs, rules and run results.
pub use types::{
    Direction, Outcome, Program, RunReport, Step, Transition, TuringMachineError,
    MAX_EXECUTION_STEPS, MAX_PROGRAM_SIZE,
};
