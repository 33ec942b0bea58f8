//! Shared fixtures for unit tests: a synthetic helical protein and deterministic stand-ins
//! for the external collaborators.

use crate::core::estimators::{DEFAULT_ESTIMATOR, EstimatorError, EstimatorRegistry, IdEstimator};
use crate::core::io::traits::{ReadError, TrajectoryReader};
use crate::core::models::atom::Atom;
use crate::core::models::features::FeatureMatrix;
use crate::core::models::params::Params;
use crate::core::models::trajectory::Trajectory;
use crate::core::projections::{Projection, ProjectionError};
use crate::core::secondary::{
    ClassifierError, DsspAlphabet, SecondaryStructure, SecondaryStructureClassifier,
};
use nalgebra::{Point3, Vector3};
use std::cell::Cell;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

static BACKBONE: [(&str, [f64; 3]); 4] = [
    ("N", [-1.2, 0.4, -0.6]),
    ("CA", [0.0, 0.0, 0.0]),
    ("CB", [0.3, 1.4, 0.5]),
    ("C", [1.1, -0.5, 0.7]),
];

/// An alanine helix numbered 1..=`n_residues` with `n_frames` slightly perturbed frames.
pub fn helical_trajectory(n_residues: usize, n_frames: usize) -> Trajectory {
    let numbers: Vec<isize> = (1..=n_residues as isize).collect();
    helical_trajectory_numbered(&numbers, n_frames)
}

/// Like [`helical_trajectory`] but with caller-chosen residue numbers.
pub fn helical_trajectory_numbered(numbers: &[isize], n_frames: usize) -> Trajectory {
    build_helix(numbers, "ALA", &BACKBONE, n_frames)
}

/// A helix of `n_residues` residues named `residue_name`, each carrying the alanine
/// atoms plus `side_chain` atoms twisting away from CB.
pub fn side_chain_trajectory(
    residue_name: &str,
    side_chain: &[&'static str],
    n_residues: usize,
    n_frames: usize,
) -> Trajectory {
    let mut layout = BACKBONE.to_vec();
    layout.extend(side_chain.iter().enumerate().map(|(k, &name)| {
        let step = (k + 1) as f64;
        let twist = 1.9 * step;
        (
            name,
            [
                0.3 + 0.9 * step,
                1.4 + 0.6 * step + 0.5 * twist.sin(),
                0.5 + 0.4 * step + 0.6 * twist.cos(),
            ],
        )
    }));
    let numbers: Vec<isize> = (1..=n_residues as isize).collect();
    build_helix(&numbers, residue_name, &layout, n_frames)
}

fn build_helix(
    numbers: &[isize],
    residue_name: &str,
    layout: &[(&str, [f64; 3])],
    n_frames: usize,
) -> Trajectory {
    let atoms: Vec<Atom> = numbers
        .iter()
        .flat_map(|&number| {
            layout.iter().map(move |(name, _)| {
                Atom::new(name, number, residue_name)
                    .with_chain("A")
                    .with_segment("P0")
            })
        })
        .collect();

    let per_residue = layout.len();
    let mut trajectory = Trajectory::new(atoms);
    for frame in 0..n_frames {
        let positions: Vec<Point3<f64>> = (0..numbers.len())
            .flat_map(|i| {
                let angle = (100.0 * i as f64).to_radians();
                let ca = Point3::new(2.3 * angle.cos(), 2.3 * angle.sin(), 1.5 * i as f64);
                layout.iter().enumerate().map(move |(j, (_, offset))| {
                    let phase = 0.37 * frame as f64 + 1.3 * (per_residue * i + j) as f64;
                    let wobble = Vector3::new(phase.sin(), phase.cos(), (0.5 * phase).sin());
                    ca + Vector3::from(*offset) + 0.1 * wobble
                })
            })
            .collect();
        trajectory
            .push_frame(positions)
            .expect("fixture frames match the topology");
    }
    trajectory
}

/// Cartesian coordinates of every atom with the given name.
pub struct CoordinateProjection {
    atom: String,
}

impl CoordinateProjection {
    pub fn new(atom: &str) -> Self {
        Self {
            atom: atom.to_string(),
        }
    }
}

impl Projection for CoordinateProjection {
    fn name(&self) -> &str {
        "Coordinate"
    }

    fn project(&self, trajectory: &Trajectory) -> Result<FeatureMatrix, ProjectionError> {
        let selected = trajectory.atoms_named(std::slice::from_ref(&self.atom));
        if selected.is_empty() {
            return Err(ProjectionError::NoFeatures {
                name: self.name().to_string(),
            });
        }
        let rows: Vec<Vec<f64>> = trajectory
            .frames()
            .iter()
            .map(|frame| {
                selected
                    .iter()
                    .flat_map(|&idx| [frame[idx].x, frame[idx].y, frame[idx].z])
                    .collect()
            })
            .collect();
        FeatureMatrix::from_rows(&rows).map_err(|e| ProjectionError::Failed(e.to_string()))
    }
}

/// Pointwise estimate is the row mean plus `offset`; the global estimate is the row
/// count plus `offset`, so full-matrix and tail results are easy to tell apart.
pub struct RowMeanEstimator {
    offset: f64,
}

impl RowMeanEstimator {
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }
}

impl IdEstimator for RowMeanEstimator {
    fn estimate_global(&self, data: &FeatureMatrix) -> Result<f64, EstimatorError> {
        Ok(data.n_frames() as f64 + self.offset)
    }

    fn estimate_pointwise(&self, data: &FeatureMatrix) -> Result<Vec<f64>, EstimatorError> {
        Ok(data
            .as_matrix()
            .row_iter()
            .map(|row| row.mean() + self.offset)
            .collect())
    }
}

/// Returns a series one element short of the row count.
pub struct TruncatingEstimator;

impl IdEstimator for TruncatingEstimator {
    fn estimate_global(&self, _data: &FeatureMatrix) -> Result<f64, EstimatorError> {
        Ok(0.0)
    }

    fn estimate_pointwise(&self, data: &FeatureMatrix) -> Result<Vec<f64>, EstimatorError> {
        Ok(vec![1.0; data.n_frames().saturating_sub(1)])
    }
}

/// Hands back preset labels and remembers the alphabet it was asked for.
pub struct FixedClassifier {
    labels: Vec<SecondaryStructure>,
    pub requested: Cell<Option<DsspAlphabet>>,
}

impl FixedClassifier {
    pub fn new(labels: Vec<SecondaryStructure>) -> Self {
        Self {
            labels,
            requested: Cell::new(None),
        }
    }
}

impl SecondaryStructureClassifier for FixedClassifier {
    fn classify(
        &self,
        _reference: &Trajectory,
        alphabet: DsspAlphabet,
    ) -> Result<Vec<SecondaryStructure>, ClassifierError> {
        self.requested.set(Some(alphabet));
        Ok(self.labels.clone())
    }
}

/// Ignores the paths and returns a copy of a fixed trajectory.
pub struct FixtureReader {
    trajectory: Trajectory,
    pub calls: Cell<usize>,
}

impl FixtureReader {
    pub fn new(trajectory: Trajectory) -> Self {
        Self {
            trajectory,
            calls: Cell::new(0),
        }
    }
}

impl TrajectoryReader for FixtureReader {
    fn read(&self, _topology: &Path, _trajectory: &Path) -> Result<Trajectory, ReadError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.trajectory.clone())
    }
}

/// Registry with `"TwoNN"` backed by [`RowMeanEstimator`]; the optional `offset` parameter
/// is forwarded.
pub fn estimator_registry() -> EstimatorRegistry {
    let mut registry = EstimatorRegistry::new();
    registry.register(DEFAULT_ESTIMATOR, |params: &Params| {
        Ok(Box::new(RowMeanEstimator::new(params.get_f64("offset").unwrap_or(0.0)))
            as Box<dyn IdEstimator>)
    });
    registry
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer is not poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a thread-local subscriber and returns its result with every record
/// at `INFO` or above, formatted as plain text.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().expect("log buffer is not poisoned").clone();
    (result, String::from_utf8_lossy(&bytes).into_owned())
}
