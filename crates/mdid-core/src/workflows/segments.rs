use super::intrinsic_dimension::{self, IdRequest};
use crate::core::models::atom::{Atom, AtomField};
use crate::core::models::records::SegmentRecord;
use crate::core::models::trajectory::Trajectory;
use crate::core::secondary::{DsspAlphabet, LabelTable, SecondaryStructureClassifier};
use crate::engine::config::SegmentConfig;
use crate::engine::context::{AnalysisContext, Verbosity};
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::structure::StructuralInput;
use tracing::{debug, info, instrument, warn};

/// Shortest run of constant secondary structure that is analysed.
pub const MIN_SEGMENT_RESIDUES: usize = 2;

/// Splits the structure into runs of constant secondary structure and estimates the
/// intrinsic dimension of each run.
///
/// `reference` is a single-frame copy of the analysed topology; `classifier` labels its
/// residues once. Runs shorter than [`MIN_SEGMENT_RESIDUES`] are skipped with a
/// warning. Returns the segment records in sequence order together with the full
/// per-residue label table.
///
/// # Errors
///
/// Fails if the input cannot be resolved, if the reference is missing, has more than
/// one frame or does not describe the same atoms, if classification fails, or if any
/// segment's estimation fails.
#[instrument(skip_all, name = "segment_scan_workflow")]
pub fn run(
    ctx: &AnalysisContext,
    input: StructuralInput<'_>,
    reference: Option<&Trajectory>,
    classifier: &dyn SecondaryStructureClassifier,
    segments: &SegmentConfig,
    request: &IdRequest<'_>,
    verbosity: Verbosity,
) -> Result<(Vec<SegmentRecord>, LabelTable), EngineError> {
    let trajectory = input.resolve(ctx.reader)?;
    let reference = reference.ok_or(EngineError::MissingReference)?;
    check_reference(&trajectory, reference)?;

    let alphabet = DsspAlphabet::from_simplified(segments.simplified);
    if verbosity.is_verbose() {
        info!(
            "Assigning secondary structure with the alphabet: {}.",
            alphabet.describe()
        );
    }
    let mut labels = classifier.classify(reference, alphabet)?;
    if alphabet == DsspAlphabet::Simplified {
        labels.iter_mut().for_each(|label| *label = label.simplify());
    }
    let table = LabelTable::from_reference(reference, labels)?;
    let runs = table.runs();

    ctx.reporter.report(Progress::ScanStart {
        scan: "segments",
        total_units: runs.len() as u64,
    });
    let mut records = Vec::new();
    for run in runs {
        let (start, end) = (run.start, run.end);
        if run.len() < MIN_SEGMENT_RESIDUES {
            if verbosity.is_verbose() {
                warn!(
                    "Segment {start}-{end} ({}) spans {} residue(s); at least {MIN_SEGMENT_RESIDUES} are needed. Skipping.",
                    run.label,
                    run.len()
                );
            } else {
                debug!(start, end, "Skipping segment shorter than two residues.");
            }
            ctx.reporter.report(Progress::UnitSkipped { start, end });
            continue;
        }

        let sub_structure = trajectory.filter_residues(&run.residues);
        let estimate = intrinsic_dimension::run(
            ctx,
            StructuralInput::InMemory(&sub_structure),
            request,
            Verbosity::Quiet,
        )?;
        debug!(start, end, label = %run.label, "Segment estimated.");
        records.push(SegmentRecord {
            start,
            end,
            label: run.label,
            window: sub_structure.residue_numbers_with_atom("CA"),
            entire_simulation: estimate.entire_simulation(),
            last_simulation: estimate.last_simulation(),
            instantaneous: estimate.into_instantaneous(),
        });
        ctx.reporter.report(Progress::UnitFinished { start, end });
    }
    ctx.reporter.report(Progress::ScanFinish);

    Ok((records, table))
}

/// The reference must hold one frame and the same atoms as the analysed structure.
///
/// Identity fields are compared one field at a time over all atoms, in the order of
/// [`AtomField::ALL`].
fn check_reference(structure: &Trajectory, reference: &Trajectory) -> Result<(), EngineError> {
    if reference.num_frames() > 1 {
        return Err(EngineError::ReferenceFrames {
            found: reference.num_frames(),
        });
    }
    if reference.num_atoms() != structure.num_atoms() {
        return Err(EngineError::ReferenceAtomCount {
            expected: structure.num_atoms(),
            found: reference.num_atoms(),
        });
    }
    for field in AtomField::ALL {
        let mismatch = structure
            .atoms()
            .iter()
            .zip(reference.atoms())
            .enumerate()
            .find(|(_, (ours, theirs))| !ours.matches_field(theirs, field));
        if let Some((atom_index, (ours, theirs))) = mismatch {
            return Err(EngineError::ReferenceField {
                field,
                atom_index,
                expected: field_value(ours, field),
                found: field_value(theirs, field),
            });
        }
    }
    Ok(())
}

fn field_value(atom: &Atom, field: AtomField) -> String {
    match field {
        AtomField::Name => atom.name.clone(),
        AtomField::ResidueNumber => atom.residue_number.to_string(),
        AtomField::ResidueName => atom.residue_name.clone(),
        AtomField::Chain => atom.chain.clone(),
        AtomField::SegmentId => atom.segment_id.clone(),
    }
}
