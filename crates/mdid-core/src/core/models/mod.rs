//! # Core Models Module
//!
//! Data structures describing a protein trajectory and the numeric data derived from it.
//!
//! - [`atom`] - per-atom identity fields (name, residue, chain, segment)
//! - [`trajectory`] - atoms plus a sequence of coordinate frames
//! - [`features`] - the frames × features matrix produced by projections
//! - [`params`] - free-form parameter maps forwarded to external collaborators
//! - [`records`] - window and segment result rows
//!
//! ```ignore
//! use mdid::core::models::{atom::Atom, trajectory::Trajectory};
//! use nalgebra::Point3;
//!
//! let atoms = vec![Atom::new("CA", 1, "ALA"), Atom::new("CA", 2, "GLY")];
//! let mut trajectory = Trajectory::new(atoms);
//! trajectory.push_frame(vec![Point3::origin(), Point3::new(3.8, 0.0, 0.0)])?;
//! ```

pub mod atom;
pub mod features;
pub mod params;
pub mod records;
pub mod trajectory;
