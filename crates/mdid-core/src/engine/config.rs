use crate::core::estimators::DEFAULT_ESTIMATOR;
use crate::core::models::params::Params;
use crate::core::projections::DISTANCES;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub use crate::core::projections::{DihedralOptions, DistanceOptions};

/// Frames averaged for the "last simulation" columns.
pub const DEFAULT_LAST_FRAMES: usize = 100;
/// Fewest frames a feature matrix may have before estimation is attempted.
pub const DEFAULT_MIN_FRAMES: usize = 101;
pub const DEFAULT_WINDOW_SIZE: usize = 10;
pub const DEFAULT_STRIDE: usize = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}", path = path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error(transparent)]
    InvalidMode(#[from] InvalidModeError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid intrinsic dimension mode '{0}'; expected 'local' or 'global'")]
pub struct InvalidModeError(pub String);

/// Whether the estimator is asked for one value per frame or one value per matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum IdMode {
    #[default]
    Local,
    Global,
}

impl FromStr for IdMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "global" => Ok(Self::Global),
            other => Err(InvalidModeError(other.to_string())),
        }
    }
}

impl TryFrom<String> for IdMode {
    type Error = InvalidModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for IdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Global => f.write_str("global"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProjectionConfig {
    pub distances: DistanceOptions,
    pub dihedrals: DihedralOptions,
    /// Constructor arguments for projections looked up in the registry.
    pub params: Params,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct EstimationConfig {
    pub estimator: String,
    pub last: usize,
    pub min_frames: usize,
    /// Estimator-specific keys forwarded to the estimator factory.
    pub params: Params,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            estimator: DEFAULT_ESTIMATOR.to_string(),
            last: DEFAULT_LAST_FRAMES,
            min_frames: DEFAULT_MIN_FRAMES,
            params: Params::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct WindowConfig {
    pub window_size: usize,
    pub stride: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            stride: DEFAULT_STRIDE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentConfig {
    /// Use the three-state C/E/H alphabet instead of the classifier's full one.
    pub simplified: bool,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self { simplified: true }
    }
}

/// Every setting of an analysis run, as read from a TOML file.
///
/// ```toml
/// projection-method = "Dihedrals"
/// id-method = "global"
///
/// [projection.dihedrals]
/// dihedrals = ["phi", "psi", "omega"]
/// sincos = true
///
/// [estimation]
/// estimator = "MLE"
/// last = 50
///
/// [estimation.params]
/// k = 15
///
/// [windows]
/// window-size = 12
/// stride = 2
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AnalysisConfig {
    pub projection_method: String,
    pub id_method: IdMode,
    pub projection: ProjectionConfig,
    pub estimation: EstimationConfig,
    pub windows: WindowConfig,
    pub segments: SegmentConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            projection_method: DISTANCES.to_string(),
            id_method: IdMode::default(),
            projection: ProjectionConfig::default(),
            estimation: EstimationConfig::default(),
            windows: WindowConfig::default(),
            segments: SegmentConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the numeric settings that have a lower bound.
    ///
    /// Window size and stride are checked by the window scan itself so that the
    /// scan reports them with its own error kinds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimation.last == 0 {
            return Err(ConfigError::InvalidValue {
                key: "last",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.estimation.min_frames == 0 {
            return Err(ConfigError::InvalidValue {
                key: "min-frames",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.projection.distances.step == 0 {
            return Err(ConfigError::InvalidValue {
                key: "step",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    projection_method: Option<String>,
    id_method: Option<String>,
    distances: Option<DistanceOptions>,
    dihedrals: Option<DihedralOptions>,
    projection_params: Option<Params>,
    estimator: Option<String>,
    last: Option<usize>,
    min_frames: Option<usize>,
    estimator_params: Option<Params>,
    window_size: Option<usize>,
    stride: Option<usize>,
    simplified: Option<bool>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projection_method(mut self, name: &str) -> Self {
        self.projection_method = Some(name.to_string());
        self
    }
    pub fn id_method(mut self, mode: &str) -> Self {
        self.id_method = Some(mode.to_string());
        self
    }
    pub fn distances(mut self, options: DistanceOptions) -> Self {
        self.distances = Some(options);
        self
    }
    pub fn dihedrals(mut self, options: DihedralOptions) -> Self {
        self.dihedrals = Some(options);
        self
    }
    pub fn projection_params(mut self, params: Params) -> Self {
        self.projection_params = Some(params);
        self
    }
    pub fn estimator(mut self, name: &str) -> Self {
        self.estimator = Some(name.to_string());
        self
    }
    pub fn last(mut self, frames: usize) -> Self {
        self.last = Some(frames);
        self
    }
    pub fn min_frames(mut self, frames: usize) -> Self {
        self.min_frames = Some(frames);
        self
    }
    pub fn estimator_params(mut self, params: Params) -> Self {
        self.estimator_params = Some(params);
        self
    }
    pub fn window_size(mut self, size: usize) -> Self {
        self.window_size = Some(size);
        self
    }
    pub fn stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }
    pub fn simplified(mut self, simplified: bool) -> Self {
        self.simplified = Some(simplified);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = AnalysisConfig::default();
        let id_method = match self.id_method {
            Some(mode) => mode.parse()?,
            None => defaults.id_method,
        };
        let config = AnalysisConfig {
            projection_method: self
                .projection_method
                .unwrap_or(defaults.projection_method),
            id_method,
            projection: ProjectionConfig {
                distances: self.distances.unwrap_or(defaults.projection.distances),
                dihedrals: self.dihedrals.unwrap_or(defaults.projection.dihedrals),
                params: self.projection_params.unwrap_or_default(),
            },
            estimation: EstimationConfig {
                estimator: self.estimator.unwrap_or(defaults.estimation.estimator),
                last: self.last.unwrap_or(defaults.estimation.last),
                min_frames: self.min_frames.unwrap_or(defaults.estimation.min_frames),
                params: self.estimator_params.unwrap_or_default(),
            },
            windows: WindowConfig {
                window_size: self.window_size.unwrap_or(defaults.windows.window_size),
                stride: self.stride.unwrap_or(defaults.windows.stride),
            },
            segments: SegmentConfig {
                simplified: self.simplified.unwrap_or(defaults.segments.simplified),
            },
        };
        config.validate()?;
        Ok(config)
    }
}
