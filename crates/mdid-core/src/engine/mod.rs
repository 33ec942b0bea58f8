//! # Engine Module
//!
//! Plumbing shared by every workflow: typed configuration, the error taxonomy, the call
//! context carrying the collaborators, and the three steps each ID computation goes
//! through.
//!
//! - **Configuration** ([`config`]) - projection, estimation, window and segment settings
//! - **Context** ([`context`]) - reader, registries, progress reporter and [`context::Verbosity`]
//! - **Structure** ([`structure`]) - resolving file or in-memory inputs into a trajectory
//! - **Projection** ([`projection`]) - dispatching a [`projection::ProjectionMethod`]
//! - **Estimation** ([`estimation`]) - the estimator adapter producing local or global results
//! - **Progress** ([`progress`]) - scan progress events
//! - **Errors** ([`error`]) - [`error::EngineError`], returned by every workflow

pub mod config;
pub mod context;
pub mod error;
pub mod estimation;
pub mod progress;
pub mod projection;
pub mod structure;
