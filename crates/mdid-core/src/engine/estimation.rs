use super::config::IdMode;
use super::error::EngineError;
use crate::core::estimators::IdEstimator;
use crate::core::models::features::FeatureMatrix;
use tracing::debug;

/// Per-frame ID series and its two averages.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalEstimate {
    pub mean_all: f64,
    /// Mean over the final `last` frames (all frames if there are fewer).
    pub mean_last: f64,
    /// One value per frame, in frame order.
    pub series: Vec<f64>,
}

/// Whole-matrix ID and the ID of its trailing slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalEstimate {
    pub all: f64,
    pub last: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdEstimate {
    Local(LocalEstimate),
    Global(GlobalEstimate),
}

impl IdEstimate {
    /// The "entire simulation" value: local mean over all frames or global ID.
    pub fn entire_simulation(&self) -> f64 {
        match self {
            Self::Local(local) => local.mean_all,
            Self::Global(global) => global.all,
        }
    }

    /// The "last simulation" value for the trailing frames.
    pub fn last_simulation(&self) -> f64 {
        match self {
            Self::Local(local) => local.mean_last,
            Self::Global(global) => global.last,
        }
    }

    /// The per-frame series; empty for global estimates.
    pub fn instantaneous(&self) -> &[f64] {
        match self {
            Self::Local(local) => &local.series,
            Self::Global(_) => &[],
        }
    }

    pub fn into_instantaneous(self) -> Vec<f64> {
        match self {
            Self::Local(local) => local.series,
            Self::Global(_) => Vec::new(),
        }
    }
}

/// Fails with [`EngineError::InsufficientFrames`] unless `features` has at least
/// `min_frames` rows.
pub fn check_frames(features: &FeatureMatrix, min_frames: usize) -> Result<(), EngineError> {
    if features.n_frames() < min_frames {
        return Err(EngineError::InsufficientFrames {
            found: features.n_frames(),
            required: min_frames,
        });
    }
    Ok(())
}

/// Runs `estimator` on `features` in the requested mode.
///
/// Local mode asks for one value per frame and averages it over all frames and over the
/// last `last` frames. Global mode estimates the full matrix and, separately, its last
/// `last` rows. In both modes a matrix shorter than `last` is used whole.
pub fn estimate(
    estimator: &dyn IdEstimator,
    features: &FeatureMatrix,
    mode: IdMode,
    last: usize,
) -> Result<IdEstimate, EngineError> {
    let n_frames = features.n_frames();
    if n_frames < last {
        debug!(
            frames = n_frames,
            last, "Fewer frames than the last-section length; using all frames."
        );
    }

    match mode {
        IdMode::Local => {
            let series = estimator.estimate_pointwise(features)?;
            if series.len() != n_frames {
                return Err(EngineError::LocalSeriesLength {
                    expected: n_frames,
                    found: series.len(),
                });
            }
            let tail_start = n_frames - last.min(n_frames);
            Ok(IdEstimate::Local(LocalEstimate {
                mean_all: mean(&series),
                mean_last: mean(&series[tail_start..]),
                series,
            }))
        }
        IdMode::Global => {
            let all = estimator.estimate_global(features)?;
            let last = estimator.estimate_global(&features.tail(last))?;
            Ok(IdEstimate::Global(GlobalEstimate { all, last }))
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
