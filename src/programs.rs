//! This module provides the `ProgramManager`, a catalogue of built-in programs embedded into
//! the crate at compile time and parsed on first use.

use crate::types::{Program, TuringMachineError};

// Default embedded programs
const PROGRAM_TEXTS: [&str; 4] = [
    include_str!("../programs/binary-addition.tur"),
    include_str!("../programs/binary-increment.tur"),
    include_str!("../programs/palindrome.tur"),
    include_str!("../programs/endless-march.tur"),
];

lazy_static::lazy_static! {
    /// Built-in programs, indexed like `PROGRAM_TEXTS`. Texts that fail to parse are skipped.
    pub static ref PROGRAMS: Vec<(usize, Program)> = PROGRAM_TEXTS
        .iter()
        .enumerate()
        .filter_map(|(index, text)| match crate::parser::parse(text) {
            Ok(program) => Some((index, program)),
            Err(e) => {
                tracing::warn!(index, error = %e, "failed to parse built-in program");
                None
            }
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .get(index)
            .map(|(_, program)| program.clone())
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program index {} out of range", index))
            })
    }

    /// Get a program by its name, ignoring case
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|(_, program)| program.name.eq_ignore_ascii_case(name))
            .map(|(_, program)| program.clone())
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS
            .iter()
            .map(|(_, program)| program.name.clone())
            .collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            initial_state: program.initial_state.clone(),
            initial_tape: program.initial_tape(),
            state_count: program.states().len(),
            transition_count: program.rules.len(),
            step_limit: program.step_limit,
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, (_, program))| program.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }

    /// Get the original text of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, TuringMachineError> {
        PROGRAMS
            .get(index)
            .and_then(|(text_index, _)| PROGRAM_TEXTS.get(*text_index).copied())
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!(
                    "Program text index {} out of range",
                    index
                ))
            })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub initial_tape: String,
    pub state_count: usize,
    pub transition_count: usize,
    pub step_limit: usize,
}
