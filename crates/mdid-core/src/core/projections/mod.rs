//! # Projections Module
//!
//! A projection is a deterministic feature extraction applied to every frame of a
//! trajectory, producing a frames × features [`FeatureMatrix`].
//!
//! - [`distances`] - pairwise distances (or contact flags) between selected atoms
//! - [`dihedrals`] - backbone and side-chain torsion angles
//! - [`registry`] - named factories for projections supplied by the caller

use crate::core::models::features::FeatureMatrix;
use crate::core::models::trajectory::Trajectory;
use thiserror::Error;

pub mod dihedrals;
pub mod distances;
pub mod registry;

pub use dihedrals::{DihedralKind, DihedralOptions, DihedralProjection};
pub use distances::{DistanceMetric, DistanceOptions, DistanceProjection};

/// Name under which the pairwise-distance projection is always available.
pub const DISTANCES: &str = "Distances";
/// Name under which the dihedral-angle projection is always available.
pub const DIHEDRALS: &str = "Dihedrals";

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Selection of atoms named {names:?} matched {found} atom(s); at least 2 are required")]
    TooFewAtoms { names: Vec<String>, found: usize },
    #[error("Invalid value for '{key}': {reason}")]
    InvalidOption { key: &'static str, reason: String },
    #[error("Unknown dihedral '{0}'; expected one of phi, psi, omega, chi1, chi2, chi3, chi4, chi5")]
    UnknownDihedral(String),
    #[error("Projection '{name}' produced no features for this structure")]
    NoFeatures { name: String },
    #[error("No projection is registered under the name '{name}'")]
    NotRegistered { name: String },
    #[error("Projection failed: {0}")]
    Failed(String),
}

/// A feature extraction applied frame by frame to a trajectory.
pub trait Projection {
    /// Human-readable name used in log lines.
    fn name(&self) -> &str;

    /// Computes one feature row per frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the trajectory lacks the atoms the projection needs.
    fn project(&self, trajectory: &Trajectory) -> Result<FeatureMatrix, ProjectionError>;
}
