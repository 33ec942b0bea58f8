use super::{DIHEDRALS, DISTANCES, Projection, ProjectionError};
use crate::core::models::params::Params;
use std::collections::HashMap;

pub type ProjectionFactory =
    Box<dyn Fn(&Params) -> Result<Box<dyn Projection>, ProjectionError> + Send + Sync>;

/// Maps projection names to factories for projections the caller supplies.
///
/// The built-in names [`DISTANCES`] and [`DIHEDRALS`] are resolved by the engine before
/// the registry is consulted and cannot be registered here. Lookup is by exact,
/// case-sensitive name; unknown names fail with [`ProjectionError::NotRegistered`].
#[derive(Default)]
pub struct ProjectionRegistry {
    factories: HashMap<String, ProjectionFactory>,
}

impl ProjectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`, replacing any earlier registration.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidOption`] if `name` shadows a built-in projection.
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<(), ProjectionError>
    where
        F: Fn(&Params) -> Result<Box<dyn Projection>, ProjectionError> + Send + Sync + 'static,
    {
        if name == DISTANCES || name == DIHEDRALS {
            return Err(ProjectionError::InvalidOption {
                key: "name",
                reason: format!("'{name}' is a built-in projection"),
            });
        }
        self.factories.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiates the projection registered under `name`.
    pub fn create(&self, name: &str, params: &Params) -> Result<Box<dyn Projection>, ProjectionError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ProjectionError::NotRegistered {
                name: name.to_string(),
            })?;
        factory(params)
    }
}

impl std::fmt::Debug for ProjectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectionRegistry")
            .field("names", &self.names())
            .finish()
    }
}
