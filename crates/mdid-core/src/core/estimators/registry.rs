use super::{EstimatorError, IdEstimator};
use crate::core::models::params::Params;
use std::collections::HashMap;

pub type EstimatorFactory =
    Box<dyn Fn(&Params) -> Result<Box<dyn IdEstimator>, EstimatorError> + Send + Sync>;

/// Maps estimator names (e.g. "TwoNN", "MLE") to factories.
///
/// Factories receive the estimator-specific passthrough parameters from the
/// estimation config. Nothing is registered by default.
#[derive(Default)]
pub struct EstimatorRegistry {
    factories: HashMap<String, EstimatorFactory>,
}

impl EstimatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&Params) -> Result<Box<dyn IdEstimator>, EstimatorError> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn create(&self, name: &str, params: &Params) -> Result<Box<dyn IdEstimator>, EstimatorError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| EstimatorError::NotRegistered {
                name: name.to_string(),
            })?;
        factory(params)
    }
}

impl std::fmt::Debug for EstimatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstimatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}
