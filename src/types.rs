//! This module defines the core data structures and types used throughout the Turing Machine
//! engine, including program representation, transitions, run outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::MachineConfig;
use crate::machine::TuringMachine;
use crate::table::TransitionTable;
use crate::Rule;

/// The default blank symbol used on the Turing Machine tape.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The accept state used when a program file does not declare one.
pub const DEFAULT_ACCEPT_STATE: &str = "accept";
/// The reject state used when a program file does not declare one.
pub const DEFAULT_REJECT_STATE: &str = "reject";
/// The maximum allowed size for a Turing Machine program in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The default number of steps a machine may execute before it is stopped.
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// A Turing Machine program as read from a `.tur` file.
///
/// Programs always use `String` states and `char` symbols. The engine itself is generic,
/// see [`TuringMachine`] and [`TransitionTable`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// The name of the Turing Machine program.
    pub name: String,
    /// The state the machine starts in.
    pub initial_state: String,
    /// Reaching this state halts the machine with [`Outcome::Accepted`].
    pub accept_state: String,
    /// Reaching this state halts the machine with [`Outcome::Rejected`].
    pub reject_state: String,
    /// The initial content of the tape, left to right.
    pub tape: Vec<char>,
    /// The initial head position.
    pub head: usize,
    /// The blank symbol used for cells that were never written.
    pub blank: char,
    /// Upper bound on the number of executed steps.
    pub step_limit: usize,
    /// Transition rules in file order. Order matters: the first matching rule wins.
    pub rules: Vec<Transition<String, char>>,
}

impl Program {
    /// Returns the initial content of the tape as a `String`.
    pub fn initial_tape(&self) -> String {
        self.tape.iter().collect()
    }

    /// Returns every distinct state mentioned by the program, in order of first appearance.
    pub fn states(&self) -> Vec<&str> {
        let mut states: Vec<&str> = Vec::new();
        let mentioned = [&self.initial_state, &self.accept_state, &self.reject_state]
            .into_iter()
            .chain(self.rules.iter().flat_map(|t| [&t.state, &t.next_state]));

        for state in mentioned {
            if !states.contains(&state.as_str()) {
                states.push(state);
            }
        }

        states
    }

    /// Builds the transition table for this program.
    pub fn table(&self) -> TransitionTable<String, char> {
        self.rules.iter().cloned().collect()
    }

    /// Builds the machine configuration described by the program header.
    pub fn config(&self) -> MachineConfig<String, char> {
        MachineConfig::new(
            self.initial_state.clone(),
            self.accept_state.clone(),
            self.reject_state.clone(),
            self.blank,
        )
        .with_step_limit(self.step_limit)
        .with_head(self.head)
    }

    /// Creates a machine ready to run this program.
    pub fn machine(&self) -> Result<TuringMachine<String, char>, TuringMachineError> {
        TuringMachine::new(self.table(), self.tape.clone(), self.config())
    }
}

/// A single transition rule: `(state, read) -> (next_state, write, direction)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition<Q, S> {
    /// The state this rule applies in.
    pub state: Q,
    /// The symbol that must be under the head.
    pub read: S,
    /// The state the machine transitions to.
    pub next_state: Q,
    /// The symbol written under the head.
    pub write: S,
    /// Where the head moves after writing.
    pub direction: Direction,
}

impl<Q, S> Transition<Q, S> {
    pub fn new(state: Q, read: S, next_state: Q, write: S, direction: Direction) -> Self {
        Self {
            state,
            read,
            next_state,
            write,
            direction,
        }
    }
}

/// Represents the possible directions a Turing Machine head can move.
///
/// Single-tape machines in this engine always move; there is no stay move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// The signed head displacement of this move.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Represents the outcome of a call to [`TuringMachine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine applied a transition and may continue.
    Continue,
    /// The run has terminated. Every later call reports the same outcome.
    Halt(Outcome),
}

/// How a run terminated.
///
/// `Accepted` and `Rejected` are verdicts of the machine. `StepLimitExceeded` and
/// `NoTransition` mean the run stopped without a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The machine reached its accept state.
    Accepted,
    /// The machine reached its reject state.
    Rejected,
    /// The step budget ran out before the machine halted.
    StepLimitExceeded,
    /// No rule matched the current state and symbol.
    NoTransition,
}

impl Outcome {
    /// Returns `true` for `Accepted` and `Rejected`.
    pub fn is_verdict(self) -> bool {
        matches!(self, Outcome::Accepted | Outcome::Rejected)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Accepted => "accepted",
            Outcome::Rejected => "rejected",
            Outcome::StepLimitExceeded => "step limit exceeded",
            Outcome::NoTransition => "no transition",
        })
    }
}

/// The final configuration of a machine whose run has terminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport<Q, S> {
    /// How the run terminated.
    pub outcome: Outcome,
    /// The materialized tape, left to right.
    pub tape: Vec<S>,
    /// Number of steps executed.
    pub steps: usize,
    /// The state the machine is in.
    pub state: Q,
    /// The head position relative to the leftmost materialized cell.
    pub head: isize,
}

/// Represents various errors that can occur while configuring or loading Turing Machines.
///
/// Run outcomes are never errors; see [`Outcome`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The caller violated the machine's construction contract.
    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(String),
    /// Indicates an error during the parsing of a Turing Machine program definition.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a program that parsed but is missing required information.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations, such as reading program files.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, left_deserialized);
    }

    #[test]
    fn test_direction_offset() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Right.offset(), 1);
    }

    #[test]
    fn test_outcome_display_is_distinct() {
        let outcomes = [
            Outcome::Accepted,
            Outcome::Rejected,
            Outcome::StepLimitExceeded,
            Outcome::NoTransition,
        ];
        let messages: Vec<String> = outcomes.iter().map(|o| o.to_string()).collect();

        for (i, message) in messages.iter().enumerate() {
            assert_eq!(messages.iter().filter(|m| *m == message).count(), 1, "{i}");
        }
        assert!(Outcome::Accepted.is_verdict());
        assert!(Outcome::Rejected.is_verdict());
        assert!(!Outcome::StepLimitExceeded.is_verdict());
        assert!(!Outcome::NoTransition.is_verdict());
    }

    #[test]
    fn test_program_states_in_order_of_appearance() {
        let program = Program {
            name: "States".to_string(),
            initial_state: "q0".to_string(),
            accept_state: "yes".to_string(),
            reject_state: "no".to_string(),
            tape: vec!['a'],
            head: 0,
            blank: DEFAULT_BLANK_SYMBOL,
            step_limit: MAX_EXECUTION_STEPS,
            rules: vec![
                Transition::new("q0".into(), 'a', "q1".into(), 'b', Direction::Right),
                Transition::new("q1".into(), '_', "yes".into(), '_', Direction::Left),
            ],
        };

        assert_eq!(program.states(), vec!["q0", "yes", "no", "q1"]);
        assert_eq!(program.initial_tape(), "a");
        assert_eq!(program.table().len(), 2);
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::InvalidConfig("step limit must be positive".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid machine configuration"));
        assert!(error_msg.contains("step limit"));
    }
}
