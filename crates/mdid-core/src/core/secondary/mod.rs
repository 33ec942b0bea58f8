//! # Secondary Structure Module
//!
//! Label alphabet, the classifier seam (DSSP or any other assignment method is supplied
//! by the caller), the per-residue label table and its run-length segmentation.

use crate::core::models::trajectory::Trajectory;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub mod table;

pub use table::{LabelTable, ResidueLabel, StructureRun};

/// A DSSP-style secondary structure label.
///
/// The full alphabet is `H B E G I T S ' '`; the simplified alphabet is `C E H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecondaryStructure {
    /// `H`: alpha helix (also the simplified helix class)
    Helix,
    /// `B`: isolated beta bridge
    Bridge,
    /// `E`: extended strand (also the simplified strand class)
    Strand,
    /// `G`: 3-10 helix
    Helix310,
    /// `I`: pi helix
    PiHelix,
    /// `T`: hydrogen-bonded turn
    Turn,
    /// `S`: bend
    Bend,
    /// `' '`: loop or irregular
    Loop,
    /// `C`: simplified coil class
    Coil,
}

impl SecondaryStructure {
    pub fn code(self) -> char {
        match self {
            Self::Helix => 'H',
            Self::Bridge => 'B',
            Self::Strand => 'E',
            Self::Helix310 => 'G',
            Self::PiHelix => 'I',
            Self::Turn => 'T',
            Self::Bend => 'S',
            Self::Loop => ' ',
            Self::Coil => 'C',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'H' => Self::Helix,
            'B' => Self::Bridge,
            'E' => Self::Strand,
            'G' => Self::Helix310,
            'I' => Self::PiHelix,
            'T' => Self::Turn,
            'S' => Self::Bend,
            ' ' => Self::Loop,
            'C' => Self::Coil,
            _ => return None,
        })
    }

    /// Maps a label onto the three-state alphabet: H/G/I to helix, E/B to strand,
    /// everything else to coil.
    pub fn simplify(self) -> Self {
        match self {
            Self::Helix | Self::Helix310 | Self::PiHelix => Self::Helix,
            Self::Strand | Self::Bridge => Self::Strand,
            Self::Turn | Self::Bend | Self::Loop | Self::Coil => Self::Coil,
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for SecondaryStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.code())
    }
}

/// Which label alphabet a classifier should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DsspAlphabet {
    /// Coil (C), Strand (E) and Helix (H).
    #[default]
    Simplified,
    /// The classifier's full alphabet.
    Full,
}

impl DsspAlphabet {
    pub fn from_simplified(simplified: bool) -> Self {
        if simplified { Self::Simplified } else { Self::Full }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Simplified => "Coil (C), Strand (E) and Helix (H)",
            Self::Full => {
                "Alpha Helix (H), Isolated Beta-Bridge (B), Extended Strand (E), 3-Helix (G), \
                 5-Helix (I), Turn (T), Bend (S), Loop/Irregular (' ')"
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Secondary structure assignment failed: {0}")]
    Failed(String),
}

/// Assigns one secondary structure label per protein residue of a single-frame structure.
pub trait SecondaryStructureClassifier {
    /// Returns one label per residue that has a `CA` atom, in topology order.
    fn classify(
        &self,
        reference: &Trajectory,
        alphabet: DsspAlphabet,
    ) -> Result<Vec<SecondaryStructure>, ClassifierError>;
}
