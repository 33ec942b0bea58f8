//! # mdid
//!
//! Intrinsic dimension (ID) analysis of molecular dynamics trajectories. The crate
//! turns a protein trajectory into a numeric feature matrix (a *projection*), hands it
//! to an ID estimator, and shapes the answers into per-frame series, global values,
//! sliding residue windows and secondary-structure segments.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Trajectory`, `FeatureMatrix`),
//!   the collaborator traits the crate orchestrates (`TrajectoryReader`, `Projection`,
//!   `IdEstimator`, `SecondaryStructureClassifier`), the built-in distance and dihedral
//!   projections, run-length segmentation of secondary-structure labels and CSV export.
//!
//! - **[`engine`]: The Plumbing.** Configuration, the error taxonomy, the call context
//!   bundling the collaborators, explicit verbosity, and the estimator adapter that
//!   turns an estimator's raw output into local or global results.
//!
//! - **[`workflows`]: The Public API.** The single-call trajectory ID engine, the
//!   sliding-window scanner and the secondary-structure segment scanner.
//!
//! The crate does not implement file parsing, dimension estimators or secondary
//! structure assignment; callers plug those in through the traits above and the name
//! registries in [`core::projections::registry`] and [`core::estimators::registry`].

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
