use super::config::ProjectionConfig;
use super::context::Verbosity;
use super::error::EngineError;
use crate::core::models::features::{FeatureMatrix, RawFeatures};
use crate::core::models::trajectory::Trajectory;
use crate::core::projections::registry::ProjectionRegistry;
use crate::core::projections::{
    DIHEDRALS, DISTANCES, DihedralProjection, DistanceProjection, Projection,
};
use tracing::{debug, info};

/// How the feature matrix of a structure is obtained.
#[derive(Clone, Copy)]
pub enum ProjectionMethod<'a> {
    /// A built-in name (`"Distances"`, `"Dihedrals"`) or a name in the projection registry.
    ByName(&'a str),
    /// A projection object supplied by the caller.
    Prebuilt(&'a dyn Projection),
    /// Features the caller already computed; the structure is not projected.
    Precomputed(&'a RawFeatures),
}

impl std::fmt::Debug for ProjectionMethod<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByName(name) => f.debug_tuple("ByName").field(name).finish(),
            Self::Prebuilt(projection) => f.debug_tuple("Prebuilt").field(&projection.name()).finish(),
            Self::Precomputed(raw) => f.debug_tuple("Precomputed").field(&raw.shape).finish(),
        }
    }
}

/// Turns `trajectory` into a feature matrix according to `method`.
///
/// Built-in names are matched exactly before the registry is consulted, so a
/// differently-cased built-in name is looked up in the registry like any other.
pub fn project(
    method: ProjectionMethod<'_>,
    trajectory: &Trajectory,
    config: &ProjectionConfig,
    registry: &ProjectionRegistry,
    verbosity: Verbosity,
) -> Result<FeatureMatrix, EngineError> {
    let features = match method {
        ProjectionMethod::ByName(DISTANCES) => {
            let features =
                DistanceProjection::new(config.distances.clone())?.project(trajectory)?;
            log_built_in(DISTANCES, verbosity);
            features
        }
        ProjectionMethod::ByName(DIHEDRALS) => {
            let features =
                DihedralProjection::new(config.dihedrals.clone())?.project(trajectory)?;
            log_built_in(DIHEDRALS, verbosity);
            features
        }
        ProjectionMethod::ByName(name) => {
            let projection = registry.create(name, &config.params).map_err(|source| {
                EngineError::ExternalProjectionUnavailable {
                    name: name.to_string(),
                    source,
                }
            })?;
            let features = projection.project(trajectory)?;
            if verbosity.is_verbose() {
                info!("Projection \"{name}\" computed.");
            }
            features
        }
        ProjectionMethod::Prebuilt(projection) => {
            let features = projection.project(trajectory)?;
            if verbosity.is_verbose() {
                info!("Projection \"{}\" computed.", projection.name());
            }
            features
        }
        ProjectionMethod::Precomputed(raw) => {
            let features = raw.to_matrix()?;
            if verbosity.is_verbose() {
                info!("Using pre-computed projection.");
            }
            features
        }
    };
    debug!(
        frames = features.n_frames(),
        features = features.n_features(),
        "Feature matrix ready."
    );
    Ok(features)
}

fn log_built_in(name: &str, verbosity: Verbosity) {
    if verbosity.is_verbose() {
        info!("Built-in projection \"{name}\" computed.");
    }
}
