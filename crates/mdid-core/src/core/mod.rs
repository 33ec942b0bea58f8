//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Structural Models** ([`models`]) - atoms, multi-frame trajectories, feature matrices
//!   and passthrough parameter maps
//! - **Projections** ([`projections`]) - the `Projection` seam, built-in distance and
//!   dihedral projections, and the name registry for external ones
//! - **Estimators** ([`estimators`]) - the `IdEstimator` seam and its name registry
//! - **Secondary Structure** ([`secondary`]) - label alphabet, classifier seam, per-residue
//!   label table and run-length segmentation
//! - **File I/O** ([`io`]) - the trajectory reader seam and CSV export of result tables
//! - **Utilities** ([`utils`]) - geometric helpers

pub mod estimators;
pub mod io;
pub mod models;
pub mod projections;
pub mod secondary;
pub mod utils;
