use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single passthrough parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<ParamValue>),
}

/// Free-form, named parameters forwarded verbatim to an external collaborator.
///
/// Estimator factories receive the estimator-specific keys (e.g. `k = 15` for a KNN
/// estimator); registered projection factories receive their constructor arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: ParamValue) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn insert(&mut self, key: &str, value: ParamValue) -> Option<ParamValue> {
        self.0.insert(key.to_string(), value)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads an integer value, rejecting negatives.
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        match self.get(key)? {
            ParamValue::Integer(i) => usize::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Reads a numeric value; integers are widened.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
