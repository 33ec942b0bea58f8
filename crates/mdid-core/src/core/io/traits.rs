use crate::core::models::trajectory::Trajectory;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse '{path}': {message}", path = path.display())]
    Format { path: PathBuf, message: String },
}

/// Loads a structure and its trajectory frames from a topology file and a trajectory file.
///
/// Parsing of concrete formats (PDB, PSF, DCD, XTC, ...) is left to implementors. The
/// engine checks that both paths exist before calling [`TrajectoryReader::read`].
pub trait TrajectoryReader {
    /// Reads the topology from `topology` and appends every frame found in `trajectory`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed, or if the two files
    /// disagree on the number of atoms.
    fn read(&self, topology: &Path, trajectory: &Path) -> Result<Trajectory, ReadError>;
}
