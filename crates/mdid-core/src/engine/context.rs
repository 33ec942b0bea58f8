use super::progress::ProgressReporter;
use crate::core::estimators::EstimatorRegistry;
use crate::core::io::traits::TrajectoryReader;
use crate::core::projections::registry::ProjectionRegistry;

/// Whether a workflow call emits informational log lines.
///
/// Scanners always run their nested engine calls with [`Verbosity::Quiet`]; quiet calls
/// still emit `debug!` diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Verbose,
    Quiet,
}

impl Verbosity {
    pub fn is_verbose(self) -> bool {
        self == Self::Verbose
    }
}

impl From<bool> for Verbosity {
    fn from(verbose: bool) -> Self {
        if verbose { Self::Verbose } else { Self::Quiet }
    }
}

/// The collaborators a workflow call needs.
#[derive(Clone, Copy)]
pub struct AnalysisContext<'a> {
    /// Loads file inputs; file inputs fail when this is `None`.
    pub reader: Option<&'a dyn TrajectoryReader>,
    pub projections: &'a ProjectionRegistry,
    pub estimators: &'a EstimatorRegistry,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        projections: &'a ProjectionRegistry,
        estimators: &'a EstimatorRegistry,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            reader: None,
            projections,
            estimators,
            reporter,
        }
    }

    pub fn with_reader(mut self, reader: &'a dyn TrajectoryReader) -> Self {
        self.reader = Some(reader);
        self
    }
}
