use super::config::{ConfigError, InvalidModeError};
use crate::core::estimators::EstimatorError;
use crate::core::io::traits::ReadError;
use crate::core::models::atom::AtomField;
use crate::core::models::features::ShapeError;
use crate::core::projections::ProjectionError;
use crate::core::secondary::ClassifierError;
use crate::core::secondary::table::LabelCountError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two structural input files a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureRole {
    Topology,
    Trajectory,
}

impl fmt::Display for StructureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topology => f.write_str("topology"),
            Self::Trajectory => f.write_str("trajectory"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("The {role} file '{path}' does not exist", path = path.display())]
    FileNotFound { role: StructureRole, path: PathBuf },

    #[error("Structure files were given but no trajectory reader is configured")]
    ReaderUnavailable,

    #[error("Failed to load structure: {0}")]
    Load(#[from] ReadError),

    #[error("The structure contains no atoms")]
    EmptyAtoms,

    #[error("The structure contains no frames")]
    EmptyFrames,

    #[error("A reference structure is required for secondary structure segmentation")]
    MissingReference,

    #[error("The reference structure must contain a single frame, found {found}")]
    ReferenceFrames { found: usize },

    #[error("The reference has {found} atoms but the analysed structure has {expected}")]
    ReferenceAtomCount { expected: usize, found: usize },

    #[error(
        "Reference atom {atom_index} differs in {field}: expected '{expected}', found '{found}'"
    )]
    ReferenceField {
        field: AtomField,
        atom_index: usize,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    InvalidMode(#[from] InvalidModeError),

    #[error("Window size must be greater than 1, got {window_size}")]
    InvalidWindow { window_size: usize },

    #[error("Stride must be at least 1, got {stride}")]
    InvalidStride { stride: usize },

    #[error("Projection '{name}' is not available: {source}")]
    ExternalProjectionUnavailable {
        name: String,
        source: ProjectionError,
    },

    #[error("Projection failed: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Invalid feature array: {0}")]
    Shape(#[from] ShapeError),

    #[error(
        "Found array with {found} frame(s) while a minimum of {required} is required by the estimator"
    )]
    InsufficientFrames { found: usize, required: usize },

    #[error("Estimator error: {0}")]
    Estimator(#[from] EstimatorError),

    #[error("Estimator returned {found} local values for {expected} frames")]
    LocalSeriesLength { expected: usize, found: usize },

    #[error("Secondary structure classification failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    LabelCount(#[from] LabelCountError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
