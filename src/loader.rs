//! This module provides the `ProgramLoader` struct, responsible for loading Turing Machine
//! programs from various sources, including files and strings.

use crate::parser::parse;
use crate::types::{Program, TuringMachineError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::{Path, PathBuf};

/// `ProgramLoader` is a utility struct for loading Turing Machine programs.
/// It provides methods to load programs from individual files, from string content,
/// and to discover and load all `.tur` files within a specified directory.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single Turing Machine program from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.tur` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read and parsed into a `Program`.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read or exceeds
    ///   `MAX_PROGRAM_SIZE`.
    /// * `Err(TuringMachineError::ParseError)` if the file content is not a valid program.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let metadata = fs::metadata(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        if metadata.len() > MAX_PROGRAM_SIZE as u64 {
            return Err(TuringMachineError::FileError(format!(
                "Program file {} is {} bytes, the limit is {} bytes",
                path.display(),
                metadata.len(),
                MAX_PROGRAM_SIZE
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "loading program");

        parse(&content)
    }

    /// Loads a single Turing Machine program from the provided string content.
    ///
    /// This is useful for parsing programs that are not stored in files, e.g., from stdin.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the content is successfully parsed into a `Program`.
    /// * `Err(TuringMachineError::FileError)` if the content exceeds `MAX_PROGRAM_SIZE`.
    /// * `Err(TuringMachineError::ParseError)` if the content is not a valid program.
    pub fn load_program_from_string(content: &str) -> Result<Program, TuringMachineError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TuringMachineError::FileError(format!(
                "Program is {} bytes, the limit is {} bytes",
                content.len(),
                MAX_PROGRAM_SIZE
            )));
        }

        parse(content)
    }

    /// Loads every `.tur` program in `directory`, sorted by path.
    ///
    /// A file that fails to load does not stop the scan: its error is returned next to
    /// its path. Only an unreadable directory fails the whole call.
    pub fn load_programs(
        directory: &Path,
    ) -> Result<Vec<(PathBuf, Result<Program, TuringMachineError>)>, TuringMachineError> {
        let programs = Self::program_paths(directory)?
            .into_iter()
            .map(|path| {
                let program = Self::load_program(&path);
                if let Err(e) = &program {
                    tracing::warn!(path = %path.display(), error = %e, "skipping program");
                }
                (path, program)
            })
            .collect();

        Ok(programs)
    }

    fn program_paths(directory: &Path) -> Result<Vec<PathBuf>, TuringMachineError> {
        let dir_error = |e: std::io::Error| {
            TuringMachineError::FileError(format!(
                "Failed to read directory {}: {}",
                directory.display(),
                e
            ))
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(directory).map_err(dir_error)? {
            let path = entry.map_err(dir_error)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "tur") {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(paths)
    }
}
