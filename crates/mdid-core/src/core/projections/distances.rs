use super::{DISTANCES, Projection, ProjectionError};
use crate::core::models::features::FeatureMatrix;
use crate::core::models::trajectory::Trajectory;
use crate::core::utils::geometry::distance;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

const DEFAULT_CONTACT_THRESHOLD: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Raw Euclidean distances in Angstroms.
    #[default]
    Distances,
    /// 1.0 when the pair is closer than the contact threshold, otherwise 0.0.
    Contacts,
}

impl FromStr for DistanceMetric {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distances" => Ok(Self::Distances),
            "contacts" => Ok(Self::Contacts),
            other => Err(ProjectionError::InvalidOption {
                key: "metric",
                reason: format!("'{other}'; use 'distances' or 'contacts'"),
            }),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distances => write!(f, "distances"),
            Self::Contacts => write!(f, "contacts"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DistanceOptions {
    /// Atom names to select (defaults to alpha carbons).
    pub atom_names: Vec<String>,
    /// Keep every `step`-th selected atom.
    pub step: usize,
    pub metric: DistanceMetric,
    /// Cut-off in Angstroms for the contact metric.
    pub contact_threshold: f64,
}

impl Default for DistanceOptions {
    fn default() -> Self {
        Self {
            atom_names: vec!["CA".to_string()],
            step: 1,
            metric: DistanceMetric::Distances,
            contact_threshold: DEFAULT_CONTACT_THRESHOLD,
        }
    }
}

/// Pairwise distances between every unordered pair of selected atoms.
///
/// With `n` selected atoms each frame yields `n * (n - 1) / 2` features, ordered
/// `(0,1), (0,2), …, (1,2), …`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceProjection {
    options: DistanceOptions,
}

impl DistanceProjection {
    pub fn new(options: DistanceOptions) -> Result<Self, ProjectionError> {
        if options.step == 0 {
            return Err(ProjectionError::InvalidOption {
                key: "step",
                reason: "must be at least 1".to_string(),
            });
        }
        if options.metric == DistanceMetric::Contacts && !(options.contact_threshold > 0.0) {
            return Err(ProjectionError::InvalidOption {
                key: "contact-threshold",
                reason: format!("must be positive, got {}", options.contact_threshold),
            });
        }
        Ok(Self { options })
    }

    fn selected_atoms(&self, trajectory: &Trajectory) -> Vec<usize> {
        trajectory
            .atoms_named(&self.options.atom_names)
            .into_iter()
            .step_by(self.options.step)
            .collect()
    }
}

impl Projection for DistanceProjection {
    fn name(&self) -> &str {
        DISTANCES
    }

    fn project(&self, trajectory: &Trajectory) -> Result<FeatureMatrix, ProjectionError> {
        let atoms = self.selected_atoms(trajectory);
        if atoms.len() < 2 {
            return Err(ProjectionError::TooFewAtoms {
                names: self.options.atom_names.clone(),
                found: atoms.len(),
            });
        }

        let pairs: Vec<(usize, usize)> = atoms
            .iter()
            .enumerate()
            .flat_map(|(i, &a)| atoms[i + 1..].iter().map(move |&b| (a, b)))
            .collect();

        let rows: Vec<Vec<f64>> = trajectory
            .frames()
            .iter()
            .map(|frame| {
                pairs
                    .iter()
                    .map(|&(a, b)| {
                        let d = distance(&frame[a], &frame[b]);
                        match self.options.metric {
                            DistanceMetric::Distances => d,
                            DistanceMetric::Contacts => {
                                if d < self.options.contact_threshold {
                                    1.0
                                } else {
                                    0.0
                                }
                            }
                        }
                    })
                    .collect()
            })
            .collect();

        FeatureMatrix::from_rows(&rows).map_err(|e| ProjectionError::Failed(e.to_string()))
    }
}
