//! # Estimators Module
//!
//! The intrinsic-dimension estimators themselves are external collaborators. This module
//! defines the seam they plug into ([`IdEstimator`]) and the name registry
//! ([`registry::EstimatorRegistry`]) through which the engine looks them up.

use crate::core::models::features::FeatureMatrix;
use thiserror::Error;

pub mod registry;

pub use registry::EstimatorRegistry;

/// Estimator used when the configuration names none.
pub const DEFAULT_ESTIMATOR: &str = "TwoNN";

#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("No estimator is registered under the name '{name}'")]
    NotRegistered { name: String },
    #[error("Invalid estimator parameter '{key}': {reason}")]
    InvalidParameter { key: String, reason: String },
    #[error("Estimation failed: {0}")]
    Failed(String),
}

/// An intrinsic-dimension estimator with a fit/transform contract.
pub trait IdEstimator {
    /// One estimate for the whole point cloud (all rows of `data`).
    fn estimate_global(&self, data: &FeatureMatrix) -> Result<f64, EstimatorError>;

    /// One estimate per row of `data`, in row order.
    ///
    /// The engine averages these values as given. Neighbourhood smoothing of the
    /// pointwise estimates is the implementor's job; adapters wrapping a library that
    /// offers it should enable it by default or read it from the passthrough `Params`
    /// handed to their factory (e.g. `smooth = true`).
    fn estimate_pointwise(&self, data: &FeatureMatrix) -> Result<Vec<f64>, EstimatorError>;
}
