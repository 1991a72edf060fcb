//! This module defines the `TuringMachine` struct, which executes a single-tape Turing Machine.
//! It owns the run state (current state, tape, head position, step count) and applies
//! transition rules one step at a time until the run terminates.

use std::fmt::Debug;
use std::sync::Arc;

use crate::config::MachineConfig;
use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{Outcome, RunReport, Step, Transition, TuringMachineError};

/// Represents a single-tape Turing Machine together with its run state.
///
/// The transition table is shared behind an `Arc`, so several machines running on
/// different threads can use one table while each owns its tape and state.
#[derive(Debug, Clone)]
pub struct TuringMachine<Q = String, S = char> {
    table: Arc<TransitionTable<Q, S>>,
    config: MachineConfig<Q, S>,
    initial_tape: Vec<S>,
    state: Q,
    tape: Tape<S>,
    head: isize,
    step_count: usize,
    outcome: Option<Outcome>,
}

impl<Q, S> TuringMachine<Q, S>
where
    Q: Clone + PartialEq + Debug,
    S: Clone + PartialEq + Debug,
{
    /// Creates a new `TuringMachine` in its initial configuration.
    ///
    /// # Arguments
    ///
    /// * `table` - The transition rules, owned or already shared.
    /// * `tape` - The initial tape content, left to right.
    /// * `config` - Initial, accept and reject states, blank symbol, step limit and head.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidConfig)` if `config` is rejected by
    ///   [`MachineConfig::validate`].
    pub fn new(
        table: impl Into<Arc<TransitionTable<Q, S>>>,
        tape: Vec<S>,
        config: MachineConfig<Q, S>,
    ) -> Result<Self, TuringMachineError> {
        config.validate(tape.len())?;

        let table = table.into();
        tracing::debug!(
            rules = table.len(),
            tape_len = tape.len(),
            step_limit = config.step_limit,
            initial_state = ?config.initial_state,
            "machine created"
        );

        Ok(Self {
            state: config.initial_state.clone(),
            tape: Tape::new(tape.iter().cloned(), config.blank.clone()),
            head: config.head as isize,
            initial_tape: tape,
            step_count: 0,
            outcome: None,
            table,
            config,
        })
    }

    /// Executes one iteration of the run loop.
    ///
    /// Termination is checked first, in this order: accept state, reject state, step
    /// limit. Otherwise the symbol under the head is read, the matching rule is written,
    /// the state changes and the head moves.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was applied.
    /// * `Step::Halt(_)` once the run has terminated. The machine is not modified any more
    ///   after this point and every later call returns the same outcome.
    pub fn step(&mut self) -> Step {
        if let Some(outcome) = self.outcome {
            return Step::Halt(outcome);
        }

        if let Some(outcome) = self.check_termination() {
            return self.halt(outcome);
        }

        let symbol = self.tape.read(self.head);
        let Some(transition) = self.table.lookup(&self.state, symbol) else {
            tracing::debug!(
                state = ?self.state,
                symbol = ?symbol,
                step = self.step_count,
                "no transition defined"
            );
            return self.halt(Outcome::NoTransition);
        };

        tracing::trace!(
            step = self.step_count,
            head = self.head,
            state = ?self.state,
            read = ?transition.read,
            write = ?transition.write,
            next_state = ?transition.next_state,
            direction = ?transition.direction,
            "applying transition"
        );

        let position = self.tape.write(self.head, transition.write.clone());
        self.state = transition.next_state.clone();
        self.head = position + transition.direction.offset();
        self.step_count += 1;

        Step::Continue
    }

    /// Runs the machine until it terminates and returns the final configuration.
    pub fn run(&mut self) -> RunReport<Q, S> {
        let _span = tracing::debug_span!("run", step_limit = self.config.step_limit).entered();

        let outcome = loop {
            if let Step::Halt(outcome) = self.step() {
                break outcome;
            }
        };

        self.report_with(outcome)
    }

    /// Returns the final configuration, or `None` while the machine is still running.
    ///
    /// A running machine is inspected through [`state`](Self::state),
    /// [`tape`](Self::tape) and [`head`](Self::head).
    pub fn report(&self) -> Option<RunReport<Q, S>> {
        self.outcome.map(|outcome| self.report_with(outcome))
    }

    fn report_with(&self, outcome: Outcome) -> RunReport<Q, S> {
        RunReport {
            outcome,
            tape: self.tape.to_vec(),
            steps: self.step_count,
            state: self.state.clone(),
            head: self.head,
        }
    }

    /// Resets the machine to its initial configuration.
    /// This includes resetting the state, tape, head position, step count and outcome.
    pub fn reset(&mut self) {
        self.state = self.config.initial_state.clone();
        self.tape = Tape::new(self.initial_tape.iter().cloned(), self.config.blank.clone());
        self.head = self.config.head as isize;
        self.step_count = 0;
        self.outcome = None;
        tracing::debug!("machine reset");
    }

    /// Returns the symbol under the head, which is the blank symbol outside the tape.
    pub fn symbol(&self) -> &S {
        self.tape.read(self.head)
    }

    /// Returns the rule that the next step would apply, if any.
    ///
    /// This ignores termination: it answers what the table says for the current state
    /// and symbol.
    pub fn transition(&self) -> Option<&Transition<Q, S>> {
        self.table.lookup(&self.state, self.symbol())
    }

    /// Checks whether the run has terminated or the machine sits in its accept or reject state.
    pub fn is_halted(&self) -> bool {
        self.outcome.is_some()
            || self.state == self.config.accept_state
            || self.state == self.config.reject_state
    }

    fn check_termination(&self) -> Option<Outcome> {
        if self.state == self.config.accept_state {
            Some(Outcome::Accepted)
        } else if self.state == self.config.reject_state {
            Some(Outcome::Rejected)
        } else if self.step_count >= self.config.step_limit {
            Some(Outcome::StepLimitExceeded)
        } else {
            None
        }
    }

    fn halt(&mut self, outcome: Outcome) -> Step {
        tracing::debug!(
            %outcome,
            steps = self.step_count,
            state = ?self.state,
            tape_len = self.tape.len(),
            "machine halted"
        );
        self.outcome = Some(outcome);
        Step::Halt(outcome)
    }
}

impl<Q, S> TuringMachine<Q, S> {
    /// Returns the current state of the Turing Machine.
    pub fn state(&self) -> &Q {
        &self.state
    }

    /// Returns the initial state of the Turing Machine.
    pub fn initial_state(&self) -> &Q {
        &self.config.initial_state
    }

    /// Returns the total number of steps executed by the Turing Machine.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the outcome, or `None` while the machine is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn tape(&self) -> &Tape<S> {
        &self.tape
    }

    /// Returns the head position relative to the leftmost materialized cell.
    ///
    /// Between steps this may be `-1` or `tape().len()`: the head has moved onto a cell
    /// that is not materialized yet.
    pub fn head(&self) -> isize {
        self.head
    }

    pub fn table(&self) -> &TransitionTable<Q, S> {
        &self.table
    }

    pub fn config(&self) -> &MachineConfig<Q, S> {
        &self.config
    }
}

/// Runs a machine built from `rules`, `tape` and `config` to completion.
///
/// This is the whole engine contract in one call: configuration problems are returned as
/// errors, and every way the run can end is reported in [`RunReport::outcome`].
///
/// ```
/// use tur_engine::{execute, Direction, MachineConfig, Outcome, Transition};
///
/// let rules = vec![Transition::new("q0", '1', "done", '0', Direction::Right)];
/// let report = execute(rules, vec!['1'], MachineConfig::new("q0", "done", "fail", '_')).unwrap();
///
/// assert_eq!(report.outcome, Outcome::Accepted);
/// assert_eq!(report.tape, vec!['0']);
/// assert_eq!(report.steps, 1);
/// ```
pub fn execute<Q, S>(
    rules: Vec<Transition<Q, S>>,
    tape: Vec<S>,
    config: MachineConfig<Q, S>,
) -> Result<RunReport<Q, S>, TuringMachineError>
where
    Q: Clone + PartialEq + Debug,
    S: Clone + PartialEq + Debug,
{
    let mut machine = TuringMachine::new(TransitionTable::new(rules), tape, config)?;
    Ok(machine.run())
}
