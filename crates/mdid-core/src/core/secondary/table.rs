use super::SecondaryStructure;
use crate::core::models::trajectory::Trajectory;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Classifier returned {found} labels for {expected} residues")]
pub struct LabelCountError {
    pub expected: usize,
    pub found: usize,
}

/// One row of the per-residue label table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidueLabel {
    #[serde(rename = "resid index")]
    pub residue_number: isize,
    #[serde(rename = "resname")]
    pub residue_name: String,
    #[serde(rename = "sec str type")]
    pub label: SecondaryStructure,
}

/// A maximal run of consecutive table rows sharing one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureRun {
    /// Residue number of the first residue in the run.
    pub start: isize,
    /// Residue number of the last residue in the run.
    pub end: isize,
    pub label: SecondaryStructure,
    /// Residue numbers covered by the run, in table order.
    pub residues: Vec<isize>,
}

impl StructureRun {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Per-residue secondary structure assignment, built once from a reference structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    rows: Vec<ResidueLabel>,
}

impl LabelTable {
    pub fn new(rows: Vec<ResidueLabel>) -> Self {
        Self { rows }
    }

    /// Pairs each residue of `reference` that has a `CA` atom with its label.
    ///
    /// # Errors
    ///
    /// Returns [`LabelCountError`] unless there is exactly one label per such residue.
    pub fn from_reference(
        reference: &Trajectory,
        labels: Vec<SecondaryStructure>,
    ) -> Result<Self, LabelCountError> {
        let residues: Vec<_> = reference
            .residues()
            .into_iter()
            .filter(|r| r.atom_named(reference, "CA").is_some())
            .collect();
        if residues.len() != labels.len() {
            return Err(LabelCountError {
                expected: residues.len(),
                found: labels.len(),
            });
        }
        Ok(Self {
            rows: residues
                .into_iter()
                .zip(labels)
                .map(|(residue, label)| ResidueLabel {
                    residue_number: residue.number,
                    residue_name: residue.name,
                    label,
                })
                .collect(),
        })
    }

    pub fn rows(&self) -> &[ResidueLabel] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Splits the table into maximal runs of identical label.
    ///
    /// A run is closed at row `i - 1` and a new one opened at row `i` whenever the
    /// label changes between the two; the last run is closed at the final row. Runs
    /// therefore tile the table in order, each has a constant label, and adjacent
    /// runs always differ in label.
    pub fn runs(&self) -> Vec<StructureRun> {
        let mut runs: Vec<StructureRun> = Vec::new();
        for row in &self.rows {
            match runs.last_mut() {
                Some(run) if run.label == row.label => {
                    run.end = row.residue_number;
                    run.residues.push(row.residue_number);
                }
                _ => runs.push(StructureRun {
                    start: row.residue_number,
                    end: row.residue_number,
                    label: row.label,
                    residues: vec![row.residue_number],
                }),
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::helical_trajectory;
    use crate::core::secondary::SecondaryStructure::{Coil, Helix, Strand};

    fn table(labels: &[SecondaryStructure]) -> LabelTable {
        LabelTable::new(
            labels
                .iter()
                .enumerate()
                .map(|(i, &label)| ResidueLabel {
                    residue_number: i as isize + 1,
                    residue_name: "ALA".to_string(),
                    label,
                })
                .collect(),
        )
    }

    fn spans(runs: &[StructureRun]) -> Vec<(isize, isize, char)> {
        runs.iter().map(|r| (r.start, r.end, r.label.code())).collect()
    }

    #[test]
    fn runs_split_on_every_label_change() {
        let runs = table(&[Helix, Helix, Helix, Coil, Coil, Strand]).runs();
        assert_eq!(spans(&runs), vec![(1, 3, 'H'), (4, 5, 'C'), (6, 6, 'E')]);
        assert_eq!(runs[0].residues, vec![1, 2, 3]);
        assert_eq!(runs[2].len(), 1);
    }

    #[test]
    fn repeated_labels_separated_by_other_labels_form_distinct_runs() {
        let runs = table(&[Helix, Helix, Coil, Helix, Helix, Helix, Coil]).runs();
        assert_eq!(
            spans(&runs),
            vec![(1, 2, 'H'), (3, 3, 'C'), (4, 6, 'H'), (7, 7, 'C')]
        );
    }

    #[test]
    fn single_label_table_is_one_run() {
        let runs = table(&[Strand; 4]).runs();
        assert_eq!(spans(&runs), vec![(1, 4, 'E')]);
    }

    #[test]
    fn empty_table_has_no_runs() {
        assert!(LabelTable::default().runs().is_empty());
    }

    #[test]
    fn runs_tile_the_table_with_constant_labels() {
        let pattern = [
            Helix, Coil, Coil, Strand, Strand, Strand, Helix, Coil, Helix, Helix, Strand, Coil,
        ];
        let labels: Vec<_> = pattern.iter().cycle().take(61).copied().collect();
        let t = table(&labels);
        let runs = t.runs();

        let flattened: Vec<isize> = runs.iter().flat_map(|r| r.residues.clone()).collect();
        let all: Vec<isize> = t.rows().iter().map(|r| r.residue_number).collect();
        assert_eq!(flattened, all);

        for run in &runs {
            for residue in &run.residues {
                assert_eq!(t.rows()[(*residue - 1) as usize].label, run.label);
            }
            assert_eq!(run.start, run.residues[0]);
            assert_eq!(run.end, *run.residues.last().unwrap());
        }
        for pair in runs.windows(2) {
            assert_ne!(pair[0].label, pair[1].label);
        }
    }

    #[test]
    fn from_reference_uses_residues_with_alpha_carbons() {
        let reference = helical_trajectory(3, 1);
        let t = LabelTable::from_reference(&reference, vec![Helix, Helix, Coil]).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.rows()[2].residue_number, 3);
        assert_eq!(t.rows()[2].residue_name, "ALA");
        assert_eq!(t.rows()[2].label, Coil);
    }

    #[test]
    fn from_reference_rejects_label_count_mismatch() {
        let reference = helical_trajectory(3, 1);
        let err = LabelTable::from_reference(&reference, vec![Helix]).unwrap_err();
        assert_eq!(
            err,
            LabelCountError {
                expected: 3,
                found: 1
            }
        );
    }
}
