//! Run configuration for a Turing Machine: its distinguished states, blank symbol and budget.

use serde::{Deserialize, Serialize};

use crate::types::{TuringMachineError, MAX_EXECUTION_STEPS};

/// Everything a machine needs besides its rules and tape.
///
/// ```
/// use tur_engine::MachineConfig;
///
/// let config = MachineConfig::new("q0", "accept", "reject", '_').with_step_limit(1000);
/// assert_eq!(config.step_limit, 1000);
/// assert_eq!(config.head, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig<Q, S> {
    pub initial_state: Q,
    pub accept_state: Q,
    pub reject_state: Q,
    /// Symbol read from cells that were never materialized.
    pub blank: S,
    /// Maximum number of steps the machine may execute.
    pub step_limit: usize,
    /// Initial head position on the initial tape.
    pub head: usize,
}

impl<Q, S> MachineConfig<Q, S> {
    /// Creates a configuration with the default step limit and the head on the first cell.
    pub fn new(initial_state: Q, accept_state: Q, reject_state: Q, blank: S) -> Self {
        Self {
            initial_state,
            accept_state,
            reject_state,
            blank,
            step_limit: MAX_EXECUTION_STEPS,
            head: 0,
        }
    }

    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn with_head(mut self, head: usize) -> Self {
        self.head = head;
        self
    }
}

impl<Q: PartialEq, S> MachineConfig<Q, S> {
    /// Checks the configuration against a tape of `tape_len` cells.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the machine can be constructed.
    /// * `Err(TuringMachineError::InvalidConfig)` if the step limit is zero, the accept and
    ///   reject states coincide, or the head starts beyond the end of the tape.
    pub fn validate(&self, tape_len: usize) -> Result<(), TuringMachineError> {
        if self.step_limit == 0 {
            return Err(TuringMachineError::InvalidConfig(
                "step limit must be positive".to_string(),
            ));
        }

        if self.accept_state == self.reject_state {
            return Err(TuringMachineError::InvalidConfig(
                "accept and reject states must differ".to_string(),
            ));
        }

        if self.head > tape_len {
            return Err(TuringMachineError::InvalidConfig(format!(
                "head position {} is outside the initial tape (length {})",
                self.head, tape_len
            )));
        }

        Ok(())
    }
}
