use crate::engine::config::{AnalysisConfig, EstimationConfig, IdMode, ProjectionConfig};
use crate::engine::context::{AnalysisContext, Verbosity};
use crate::engine::error::EngineError;
use crate::engine::estimation::{self, IdEstimate};
use crate::engine::projection::{self, ProjectionMethod};
use crate::engine::structure::StructuralInput;
use tracing::{info, instrument};

/// What to compute for a structure: how to project it, which mode, and with which settings.
#[derive(Debug, Clone, Copy)]
pub struct IdRequest<'a> {
    pub method: ProjectionMethod<'a>,
    pub mode: IdMode,
    pub projection: &'a ProjectionConfig,
    pub estimation: &'a EstimationConfig,
}

impl<'a> IdRequest<'a> {
    pub fn new(
        method: ProjectionMethod<'a>,
        mode: IdMode,
        projection: &'a ProjectionConfig,
        estimation: &'a EstimationConfig,
    ) -> Self {
        Self {
            method,
            mode,
            projection,
            estimation,
        }
    }

    /// A request projecting by the configured method name.
    pub fn from_config(config: &'a AnalysisConfig) -> Self {
        Self::new(
            ProjectionMethod::ByName(&config.projection_method),
            config.id_method,
            &config.projection,
            &config.estimation,
        )
    }

    pub fn with_method(mut self, method: ProjectionMethod<'a>) -> Self {
        self.method = method;
        self
    }

    pub fn with_mode(mut self, mode: IdMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Projects the structure and estimates its intrinsic dimension.
///
/// Steps, each failing with its own [`EngineError`] kind: resolve the input, project
/// it, require `min_frames` rows, look up the estimator by name, estimate.
///
/// # Errors
///
/// Returns the first failure among the steps above.
#[instrument(skip_all, name = "intrinsic_dimension_workflow")]
pub fn run(
    ctx: &AnalysisContext,
    input: StructuralInput<'_>,
    request: &IdRequest<'_>,
    verbosity: Verbosity,
) -> Result<IdEstimate, EngineError> {
    let trajectory = input.resolve(ctx.reader)?;
    let features = projection::project(
        request.method,
        &trajectory,
        request.projection,
        ctx.projections,
        verbosity,
    )?;
    estimation::check_frames(&features, request.estimation.min_frames)?;

    let name = &request.estimation.estimator;
    if verbosity.is_verbose() {
        info!(
            "Computing {} intrinsic dimension using estimator \"{}\" (last simulation section = {} frames).",
            request.mode, name, request.estimation.last
        );
    }
    let estimator = ctx.estimators.create(name, &request.estimation.params)?;
    estimation::estimate(
        estimator.as_ref(),
        &features,
        request.mode,
        request.estimation.last,
    )
}
