use super::error::{EngineError, StructureRole};
use crate::core::io::traits::TrajectoryReader;
use crate::core::models::trajectory::Trajectory;
use std::borrow::Cow;
use std::path::Path;

/// Where the structure under analysis comes from.
#[derive(Debug, Clone, Copy)]
pub enum StructuralInput<'a> {
    /// A topology file and a trajectory file, loaded through the context's reader.
    Files {
        topology: &'a Path,
        trajectory: &'a Path,
    },
    /// An already loaded structure, used as-is.
    InMemory(&'a Trajectory),
}

impl<'a> From<&'a Trajectory> for StructuralInput<'a> {
    fn from(trajectory: &'a Trajectory) -> Self {
        Self::InMemory(trajectory)
    }
}

impl<'a> StructuralInput<'a> {
    /// Produces a non-empty trajectory.
    ///
    /// File inputs are checked for existence topology first, then handed to `reader`.
    /// In-memory inputs are borrowed without copying.
    pub fn resolve(
        self,
        reader: Option<&dyn TrajectoryReader>,
    ) -> Result<Cow<'a, Trajectory>, EngineError> {
        let trajectory = match self {
            Self::InMemory(trajectory) => Cow::Borrowed(trajectory),
            Self::Files {
                topology,
                trajectory,
            } => {
                for (role, path) in [
                    (StructureRole::Topology, topology),
                    (StructureRole::Trajectory, trajectory),
                ] {
                    if !path.exists() {
                        return Err(EngineError::FileNotFound {
                            role,
                            path: path.to_path_buf(),
                        });
                    }
                }
                let reader = reader.ok_or(EngineError::ReaderUnavailable)?;
                Cow::Owned(reader.read(topology, trajectory)?)
            }
        };

        if trajectory.num_atoms() == 0 {
            return Err(EngineError::EmptyAtoms);
        }
        if trajectory.num_frames() == 0 {
            return Err(EngineError::EmptyFrames);
        }
        Ok(trajectory)
    }
}
