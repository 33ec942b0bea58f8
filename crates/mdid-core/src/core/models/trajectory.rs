use super::atom::Atom;
use nalgebra::Point3;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrajectoryError {
    #[error("Frame {frame} has {found} coordinates but the topology has {expected} atoms")]
    FrameSize {
        frame: usize,
        expected: usize,
        found: usize,
    },
}

/// A residue as seen through a trajectory's atom list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueAtoms {
    pub number: isize,
    pub name: String,
    pub chain: String,
    /// Indices into [`Trajectory::atoms`], in topology order.
    pub atoms: Vec<usize>,
}

impl ResidueAtoms {
    /// Finds the index of the atom called `name` within this residue.
    pub fn atom_named(&self, trajectory: &Trajectory, name: &str) -> Option<usize> {
        self.atoms
            .iter()
            .copied()
            .find(|&idx| trajectory.atoms[idx].name == name)
    }
}

/// A topology together with a time-ordered sequence of coordinate frames.
///
/// Every frame holds exactly one position per atom, in atom order. Cloning is a deep
/// copy; sub-structures produced by [`Trajectory::filter_residues`] never share state
/// with their source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    atoms: Vec<Atom>,
    frames: Vec<Vec<Point3<f64>>>,
}

impl Trajectory {
    /// Creates a trajectory with the given topology and no frames.
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            frames: Vec::new(),
        }
    }

    /// Creates a trajectory from a topology and its frames, validating frame sizes.
    pub fn from_parts(
        atoms: Vec<Atom>,
        frames: Vec<Vec<Point3<f64>>>,
    ) -> Result<Self, TrajectoryError> {
        let mut trajectory = Self::new(atoms);
        for frame in frames {
            trajectory.push_frame(frame)?;
        }
        Ok(trajectory)
    }

    /// Appends one frame of coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::FrameSize`] if the frame does not hold one position per atom.
    pub fn push_frame(&mut self, positions: Vec<Point3<f64>>) -> Result<(), TrajectoryError> {
        if positions.len() != self.atoms.len() {
            return Err(TrajectoryError::FrameSize {
                frame: self.frames.len(),
                expected: self.atoms.len(),
                found: positions.len(),
            });
        }
        self.frames.push(positions);
        Ok(())
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn frames(&self) -> &[Vec<Point3<f64>>] {
        &self.frames
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Position of atom `atom` in frame `frame`, if both exist.
    pub fn position(&self, frame: usize, atom: usize) -> Option<&Point3<f64>> {
        self.frames.get(frame)?.get(atom)
    }

    /// Indices of all atoms whose name is one of `names`, in topology order.
    pub fn atoms_named(&self, names: &[String]) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| names.iter().any(|n| *n == atom.name))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Sorted, deduplicated residue numbers: one entry per residue regardless of atom count.
    pub fn residue_numbers(&self) -> Vec<isize> {
        self.atoms
            .iter()
            .map(|atom| atom.residue_number)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Groups atoms into residues in order of first appearance.
    ///
    /// A new residue starts whenever the residue number or chain changes between
    /// consecutive atoms.
    pub fn residues(&self) -> Vec<ResidueAtoms> {
        let mut residues: Vec<ResidueAtoms> = Vec::new();
        for (idx, atom) in self.atoms.iter().enumerate() {
            match residues.last_mut() {
                Some(current)
                    if current.number == atom.residue_number && current.chain == atom.chain =>
                {
                    current.atoms.push(idx);
                }
                _ => residues.push(ResidueAtoms {
                    number: atom.residue_number,
                    name: atom.residue_name.clone(),
                    chain: atom.chain.clone(),
                    atoms: vec![idx],
                }),
            }
        }
        residues
    }

    /// Residue numbers of every atom called `atom_name`, in topology order.
    pub fn residue_numbers_with_atom(&self, atom_name: &str) -> Vec<isize> {
        self.atoms
            .iter()
            .filter(|atom| atom.name == atom_name)
            .map(|atom| atom.residue_number)
            .collect()
    }

    /// Returns an independent copy restricted to atoms whose residue number is in `residues`.
    pub fn filter_residues(&self, residues: &[isize]) -> Trajectory {
        let keep: HashSet<isize> = residues.iter().copied().collect();
        let kept: Vec<usize> = self
            .atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| keep.contains(&atom.residue_number))
            .map(|(idx, _)| idx)
            .collect();

        Trajectory {
            atoms: kept.iter().map(|&idx| self.atoms[idx].clone()).collect(),
            frames: self
                .frames
                .iter()
                .map(|frame| kept.iter().map(|&idx| frame[idx]).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_residue_trajectory() -> Trajectory {
        let atoms = vec![
            Atom::new("N", 5, "GLY").with_chain("A"),
            Atom::new("CA", 5, "GLY").with_chain("A"),
            Atom::new("N", 2, "ALA").with_chain("A"),
            Atom::new("CA", 2, "ALA").with_chain("A"),
            Atom::new("CB", 2, "ALA").with_chain("A"),
        ];
        let frames = (0..3)
            .map(|f| {
                (0..5)
                    .map(|a| Point3::new(f as f64, a as f64, 0.0))
                    .collect()
            })
            .collect();
        Trajectory::from_parts(atoms, frames).unwrap()
    }

    #[test]
    fn push_frame_rejects_wrong_atom_count() {
        let mut trajectory = Trajectory::new(vec![Atom::new("CA", 1, "ALA")]);
        let err = trajectory
            .push_frame(vec![Point3::origin(), Point3::origin()])
            .unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::FrameSize {
                frame: 0,
                expected: 1,
                found: 2
            }
        );
        assert_eq!(trajectory.num_frames(), 0);
    }

    #[test]
    fn residue_numbers_are_sorted_and_unique() {
        let trajectory = two_residue_trajectory();
        assert_eq!(trajectory.residue_numbers(), vec![2, 5]);
    }

    #[test]
    fn residues_follow_appearance_order() {
        let trajectory = two_residue_trajectory();
        let residues = trajectory.residues();
        assert_eq!(residues.len(), 2);
        assert_eq!(residues[0].number, 5);
        assert_eq!(residues[0].atoms, vec![0, 1]);
        assert_eq!(residues[1].name, "ALA");
        assert_eq!(residues[1].atom_named(&trajectory, "CB"), Some(4));
        assert_eq!(residues[0].atom_named(&trajectory, "CB"), None);
    }

    #[test]
    fn filter_residues_copies_atoms_and_coordinates() {
        let trajectory = two_residue_trajectory();
        let filtered = trajectory.filter_residues(&[2]);

        assert_eq!(filtered.num_atoms(), 3);
        assert_eq!(filtered.num_frames(), 3);
        assert!(filtered.atoms().iter().all(|a| a.residue_number == 2));
        assert_eq!(filtered.position(2, 0), Some(&Point3::new(2.0, 2.0, 0.0)));
        assert_eq!(trajectory.num_atoms(), 5);
    }

    #[test]
    fn filter_residues_with_unknown_numbers_yields_empty_topology() {
        let trajectory = two_residue_trajectory();
        let filtered = trajectory.filter_residues(&[99]);
        assert_eq!(filtered.num_atoms(), 0);
        assert_eq!(filtered.num_frames(), 3);
    }

    #[test]
    fn atoms_named_and_residue_numbers_with_atom_agree() {
        let trajectory = two_residue_trajectory();
        assert_eq!(trajectory.atoms_named(&["CA".to_string()]), vec![1, 3]);
        assert_eq!(trajectory.residue_numbers_with_atom("CA"), vec![5, 2]);
    }
}
