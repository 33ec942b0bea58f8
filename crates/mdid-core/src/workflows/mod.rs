//! # Workflows Module
//!
//! The public entry points. Each takes an [`AnalysisContext`](crate::engine::context::AnalysisContext)
//! carrying the collaborators, a structural input and an explicit
//! [`Verbosity`](crate::engine::context::Verbosity).
//!
//! - **Trajectory ID** ([`intrinsic_dimension`]) - project a structure and estimate its
//!   intrinsic dimension, per frame or globally.
//! - **Window Scan** ([`windows`]) - slide a fixed-size residue window along the sequence
//!   and estimate each window independently.
//! - **Segment Scan** ([`segments`]) - split the sequence into runs of constant secondary
//!   structure and estimate each run of two or more residues.
//!
//! Scans hand every window or segment to [`intrinsic_dimension::run`] as an independent
//! copy of the structure, always with [`Verbosity::Quiet`](crate::engine::context::Verbosity::Quiet).

pub mod intrinsic_dimension;
pub mod segments;
pub mod windows;
