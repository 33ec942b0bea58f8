use super::{DIHEDRALS, Projection, ProjectionError};
use crate::core::models::features::FeatureMatrix;
use crate::core::models::trajectory::{ResidueAtoms, Trajectory};
use crate::core::utils::geometry::dihedral_angle;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

type SideChainAtoms = Map<&'static str, [&'static str; 4]>;

/// Side-chain torsion atoms per residue type. Residues missing from a table have no
/// such angle.
static CHI1_ATOMS: SideChainAtoms = phf_map! {
    "ARG" => ["N", "CA", "CB", "CG"], "ASN" => ["N", "CA", "CB", "CG"],
    "ASP" => ["N", "CA", "CB", "CG"], "CYS" => ["N", "CA", "CB", "SG"],
    "GLN" => ["N", "CA", "CB", "CG"], "GLU" => ["N", "CA", "CB", "CG"],
    "HIS" => ["N", "CA", "CB", "CG"], "HSD" => ["N", "CA", "CB", "CG"],
    "HSE" => ["N", "CA", "CB", "CG"], "HSP" => ["N", "CA", "CB", "CG"],
    "ILE" => ["N", "CA", "CB", "CG1"], "LEU" => ["N", "CA", "CB", "CG"],
    "LYS" => ["N", "CA", "CB", "CG"], "MET" => ["N", "CA", "CB", "CG"],
    "PHE" => ["N", "CA", "CB", "CG"], "PRO" => ["N", "CA", "CB", "CG"],
    "SER" => ["N", "CA", "CB", "OG"], "THR" => ["N", "CA", "CB", "OG1"],
    "TRP" => ["N", "CA", "CB", "CG"], "TYR" => ["N", "CA", "CB", "CG"],
    "VAL" => ["N", "CA", "CB", "CG1"],
};

static CHI2_ATOMS: SideChainAtoms = phf_map! {
    "ARG" => ["CA", "CB", "CG", "CD"], "ASN" => ["CA", "CB", "CG", "OD1"],
    "ASP" => ["CA", "CB", "CG", "OD1"], "GLN" => ["CA", "CB", "CG", "CD"],
    "GLU" => ["CA", "CB", "CG", "CD"], "HIS" => ["CA", "CB", "CG", "ND1"],
    "HSD" => ["CA", "CB", "CG", "ND1"], "HSE" => ["CA", "CB", "CG", "ND1"],
    "HSP" => ["CA", "CB", "CG", "ND1"], "ILE" => ["CA", "CB", "CG1", "CD1"],
    "LEU" => ["CA", "CB", "CG", "CD1"], "LYS" => ["CA", "CB", "CG", "CD"],
    "MET" => ["CA", "CB", "CG", "SD"], "PHE" => ["CA", "CB", "CG", "CD1"],
    "PRO" => ["CA", "CB", "CG", "CD"], "TRP" => ["CA", "CB", "CG", "CD1"],
    "TYR" => ["CA", "CB", "CG", "CD1"],
};

static CHI3_ATOMS: SideChainAtoms = phf_map! {
    "ARG" => ["CB", "CG", "CD", "NE"], "GLN" => ["CB", "CG", "CD", "OE1"],
    "GLU" => ["CB", "CG", "CD", "OE1"], "LYS" => ["CB", "CG", "CD", "CE"],
    "MET" => ["CB", "CG", "SD", "CE"],
};

static CHI4_ATOMS: SideChainAtoms = phf_map! {
    "ARG" => ["CG", "CD", "NE", "CZ"], "LYS" => ["CG", "CD", "CE", "NZ"],
};

static CHI5_ATOMS: SideChainAtoms = phf_map! {
    "ARG" => ["CD", "NE", "CZ", "NH1"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DihedralKind {
    /// C(i-1), N, CA, C
    Phi,
    /// N, CA, C, N(i+1)
    Psi,
    /// CA(i-1), C(i-1), N, CA
    Omega,
    /// N, CA, CB, γ
    Chi1,
    /// CA, CB, γ, δ
    Chi2,
    /// CB, γ, δ, ε
    Chi3,
    /// γ, δ, ε, ζ
    Chi4,
    /// ARG only: CD, NE, CZ, NH1
    Chi5,
}

impl FromStr for DihedralKind {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phi" => Ok(Self::Phi),
            "psi" => Ok(Self::Psi),
            "omega" => Ok(Self::Omega),
            "chi1" => Ok(Self::Chi1),
            "chi2" => Ok(Self::Chi2),
            "chi3" => Ok(Self::Chi3),
            "chi4" => Ok(Self::Chi4),
            "chi5" => Ok(Self::Chi5),
            other => Err(ProjectionError::UnknownDihedral(other.to_string())),
        }
    }
}

impl fmt::Display for DihedralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Phi => "phi",
                Self::Psi => "psi",
                Self::Omega => "omega",
                Self::Chi1 => "chi1",
                Self::Chi2 => "chi2",
                Self::Chi3 => "chi3",
                Self::Chi4 => "chi4",
                Self::Chi5 => "chi5",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DihedralOptions {
    pub dihedrals: Vec<DihedralKind>,
    /// Emit sine and cosine of each angle instead of degrees.
    pub sincos: bool,
}

impl Default for DihedralOptions {
    fn default() -> Self {
        Self {
            dihedrals: vec![DihedralKind::Phi, DihedralKind::Psi],
            sincos: false,
        }
    }
}

/// Backbone and side-chain torsions, one column (or a sin/cos pair) per defined angle.
///
/// Residues are visited in topology order; for each residue the requested kinds are
/// emitted in the configured order. Angles whose four atoms do not all exist (chain
/// termini, side-chain angles a residue type lacks, missing atoms) are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct DihedralProjection {
    options: DihedralOptions,
}

impl DihedralProjection {
    pub fn new(options: DihedralOptions) -> Result<Self, ProjectionError> {
        if options.dihedrals.is_empty() {
            return Err(ProjectionError::InvalidOption {
                key: "dihedrals",
                reason: "at least one dihedral kind is required".to_string(),
            });
        }
        Ok(Self { options })
    }

    fn quadruplets(&self, trajectory: &Trajectory) -> Vec<[usize; 4]> {
        let residues = trajectory.residues();
        let mut quads = Vec::new();
        for (i, residue) in residues.iter().enumerate() {
            let prev = i
                .checked_sub(1)
                .map(|p| &residues[p])
                .filter(|p| p.chain == residue.chain);
            let next = residues.get(i + 1).filter(|n| n.chain == residue.chain);

            for kind in &self.options.dihedrals {
                if let Some(quad) = quadruplet(trajectory, *kind, prev, residue, next) {
                    quads.push(quad);
                }
            }
        }
        quads
    }
}

fn quadruplet(
    trajectory: &Trajectory,
    kind: DihedralKind,
    prev: Option<&ResidueAtoms>,
    residue: &ResidueAtoms,
    next: Option<&ResidueAtoms>,
) -> Option<[usize; 4]> {
    let own = |name: &str| residue.atom_named(trajectory, name);
    match kind {
        DihedralKind::Phi => {
            let prev = prev?;
            Some([
                prev.atom_named(trajectory, "C")?,
                own("N")?,
                own("CA")?,
                own("C")?,
            ])
        }
        DihedralKind::Psi => {
            let next = next?;
            Some([
                own("N")?,
                own("CA")?,
                own("C")?,
                next.atom_named(trajectory, "N")?,
            ])
        }
        DihedralKind::Omega => {
            let prev = prev?;
            Some([
                prev.atom_named(trajectory, "CA")?,
                prev.atom_named(trajectory, "C")?,
                own("N")?,
                own("CA")?,
            ])
        }
        DihedralKind::Chi1 => side_chain(&CHI1_ATOMS, trajectory, residue),
        DihedralKind::Chi2 => side_chain(&CHI2_ATOMS, trajectory, residue),
        DihedralKind::Chi3 => side_chain(&CHI3_ATOMS, trajectory, residue),
        DihedralKind::Chi4 => side_chain(&CHI4_ATOMS, trajectory, residue),
        DihedralKind::Chi5 => side_chain(&CHI5_ATOMS, trajectory, residue),
    }
}

fn side_chain(
    table: &SideChainAtoms,
    trajectory: &Trajectory,
    residue: &ResidueAtoms,
) -> Option<[usize; 4]> {
    let [a, b, c, d] = table.get(residue.name.as_str())?;
    Some([
        residue.atom_named(trajectory, a)?,
        residue.atom_named(trajectory, b)?,
        residue.atom_named(trajectory, c)?,
        residue.atom_named(trajectory, d)?,
    ])
}

impl Projection for DihedralProjection {
    fn name(&self) -> &str {
        DIHEDRALS
    }

    fn project(&self, trajectory: &Trajectory) -> Result<FeatureMatrix, ProjectionError> {
        let quads = self.quadruplets(trajectory);
        if quads.is_empty() {
            return Err(ProjectionError::NoFeatures {
                name: DIHEDRALS.to_string(),
            });
        }

        let rows: Vec<Vec<f64>> = trajectory
            .frames()
            .iter()
            .map(|frame| {
                let mut row = Vec::with_capacity(quads.len() * 2);
                for [a, b, c, d] in &quads {
                    let angle = dihedral_angle(&frame[*a], &frame[*b], &frame[*c], &frame[*d]);
                    if self.options.sincos {
                        let rad = angle.to_radians();
                        row.push(rad.sin());
                        row.push(rad.cos());
                    } else {
                        row.push(angle);
                    }
                }
                row
            })
            .collect();

        FeatureMatrix::from_rows(&rows).map_err(|e| ProjectionError::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{helical_trajectory, side_chain_trajectory};

    fn chi_projection(dihedrals: Vec<DihedralKind>) -> DihedralProjection {
        DihedralProjection::new(DihedralOptions {
            dihedrals,
            sincos: false,
        })
        .unwrap()
    }

    #[test]
    fn phi_and_psi_skip_chain_termini() {
        let trajectory = helical_trajectory(5, 3);
        let matrix = DihedralProjection::new(DihedralOptions::default())
            .unwrap()
            .project(&trajectory)
            .unwrap();
        // phi for residues 2..=5, psi for residues 1..=4
        assert_eq!(matrix.n_frames(), 3);
        assert_eq!(matrix.n_features(), 8);
    }

    #[test]
    fn sincos_doubles_the_columns_and_stays_on_unit_circle() {
        let trajectory = helical_trajectory(4, 2);
        let options = DihedralOptions {
            dihedrals: vec![DihedralKind::Psi],
            sincos: true,
        };
        let matrix = DihedralProjection::new(options)
            .unwrap()
            .project(&trajectory)
            .unwrap();
        assert_eq!(matrix.n_features(), 6);
        let m = matrix.as_matrix();
        for col in (0..6).step_by(2) {
            let norm = m[(0, col)].powi(2) + m[(0, col + 1)].powi(2);
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn angles_are_reported_in_degrees() {
        let trajectory = helical_trajectory(3, 1);
        let matrix = DihedralProjection::new(DihedralOptions {
            dihedrals: vec![DihedralKind::Omega],
            sincos: false,
        })
        .unwrap()
        .project(&trajectory)
        .unwrap();
        assert_eq!(matrix.n_features(), 2);
        assert!(matrix.as_matrix().iter().all(|a| (-180.0..=180.0).contains(a)));
    }

    #[test]
    fn chi1_is_only_defined_for_residues_with_gamma_atoms() {
        let trajectory = helical_trajectory(4, 1);
        let result = DihedralProjection::new(DihedralOptions {
            dihedrals: vec![DihedralKind::Chi1],
            sincos: false,
        })
        .unwrap()
        .project(&trajectory);
        // the synthetic helix is all alanine: CB but no gamma atom
        assert!(matches!(result, Err(ProjectionError::NoFeatures { .. })));
    }

    #[test]
    fn lysine_has_four_side_chain_angles_per_residue() {
        let trajectory = side_chain_trajectory("LYS", &["CG", "CD", "CE", "NZ"], 3, 2);
        let matrix = chi_projection(vec![
            DihedralKind::Chi1,
            DihedralKind::Chi2,
            DihedralKind::Chi3,
            DihedralKind::Chi4,
        ])
        .project(&trajectory)
        .unwrap();
        assert_eq!(matrix.n_frames(), 2);
        assert_eq!(matrix.n_features(), 12);
        assert!(matrix.as_matrix().iter().all(|a| (-180.0..=180.0).contains(a)));

        let chi5 = chi_projection(vec![DihedralKind::Chi5]).project(&trajectory);
        assert!(matches!(chi5, Err(ProjectionError::NoFeatures { .. })));
    }

    #[test]
    fn arginine_defines_chi5_from_the_guanidinium_group() {
        let trajectory = side_chain_trajectory("ARG", &["CG", "CD", "NE", "CZ", "NH1"], 3, 2);
        let chi5 = chi_projection(vec![DihedralKind::Chi5])
            .project(&trajectory)
            .unwrap();
        assert_eq!(chi5.n_features(), 3);

        let all = chi_projection(vec![
            DihedralKind::Chi1,
            DihedralKind::Chi2,
            DihedralKind::Chi3,
            DihedralKind::Chi4,
            DihedralKind::Chi5,
        ])
        .project(&trajectory)
        .unwrap();
        assert_eq!(all.n_features(), 15);
        // residue-major order: chi5 of the first residue is its fifth column
        assert_eq!(all.as_matrix()[(0, 4)], chi5.as_matrix()[(0, 0)]);
    }

    #[test]
    fn side_chain_angles_need_every_atom_of_the_quadruplet() {
        // lysine truncated after CD: chi1 and chi2 exist, chi3 needs CE
        let trajectory = side_chain_trajectory("LYS", &["CG", "CD"], 2, 1);
        let matrix = chi_projection(vec![DihedralKind::Chi2])
            .project(&trajectory)
            .unwrap();
        assert_eq!(matrix.n_features(), 2);
        let chi3 = chi_projection(vec![DihedralKind::Chi3]).project(&trajectory);
        assert!(matches!(chi3, Err(ProjectionError::NoFeatures { .. })));
    }

    #[test]
    fn parses_dihedral_names() {
        assert_eq!("chi1".parse::<DihedralKind>().unwrap(), DihedralKind::Chi1);
        for (name, kind) in [
            ("chi2", DihedralKind::Chi2),
            ("chi3", DihedralKind::Chi3),
            ("chi4", DihedralKind::Chi4),
            ("chi5", DihedralKind::Chi5),
        ] {
            assert_eq!(name.parse::<DihedralKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), name);
        }
        assert!(matches!(
            "chi7".parse::<DihedralKind>(),
            Err(ProjectionError::UnknownDihedral(name)) if name == "chi7"
        ));
    }

    #[test]
    fn empty_dihedral_list_is_rejected() {
        let result = DihedralProjection::new(DihedralOptions {
            dihedrals: vec![],
            sincos: false,
        });
        assert!(matches!(
            result,
            Err(ProjectionError::InvalidOption { key: "dihedrals", .. })
        ));
    }
}
