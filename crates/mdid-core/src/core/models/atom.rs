use std::fmt;

/// Identity fields of a single atom in a topology.
///
/// Coordinates are not stored here; they live in the frames of the owning
/// [`Trajectory`](super::trajectory::Trajectory), indexed by the atom's position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "OG1").
    pub name: String,
    /// Residue sequence number from the source topology.
    pub residue_number: isize,
    /// Three-letter residue name (e.g., "ALA").
    pub residue_name: String,
    /// Chain identifier; may be empty.
    pub chain: String,
    /// Segment identifier; may be empty.
    pub segment_id: String,
}

impl Atom {
    /// Creates an atom with empty chain and segment identifiers.
    pub fn new(name: &str, residue_number: isize, residue_name: &str) -> Self {
        Self {
            name: name.to_string(),
            residue_number,
            residue_name: residue_name.to_string(),
            chain: String::new(),
            segment_id: String::new(),
        }
    }

    pub fn with_chain(mut self, chain: &str) -> Self {
        self.chain = chain.to_string();
        self
    }

    pub fn with_segment(mut self, segment_id: &str) -> Self {
        self.segment_id = segment_id.to_string();
        self
    }

    /// Returns true if `field` holds the same value in both atoms.
    pub fn matches_field(&self, other: &Atom, field: AtomField) -> bool {
        match field {
            AtomField::Name => self.name == other.name,
            AtomField::ResidueNumber => self.residue_number == other.residue_number,
            AtomField::ResidueName => self.residue_name == other.residue_name,
            AtomField::Chain => self.chain == other.chain,
            AtomField::SegmentId => self.segment_id == other.segment_id,
        }
    }
}

/// The per-atom identity fields compared when two structures must describe the same topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomField {
    Name,
    ResidueNumber,
    ResidueName,
    Chain,
    SegmentId,
}

impl AtomField {
    /// All identity fields, in the order they are checked.
    pub const ALL: [AtomField; 5] = [
        AtomField::Name,
        AtomField::ResidueNumber,
        AtomField::ResidueName,
        AtomField::Chain,
        AtomField::SegmentId,
    ];
}

impl fmt::Display for AtomField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Name => "name",
                Self::ResidueNumber => "resid",
                Self::ResidueName => "resname",
                Self::Chain => "chain",
                Self::SegmentId => "segid",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_empty_chain_and_segment() {
        let atom = Atom::new("CA", 7, "LYS");
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_number, 7);
        assert_eq!(atom.residue_name, "LYS");
        assert!(atom.chain.is_empty());
        assert!(atom.segment_id.is_empty());
    }

    #[test]
    fn builder_methods_set_chain_and_segment() {
        let atom = Atom::new("N", 1, "MET").with_chain("A").with_segment("P0");
        assert_eq!(atom.chain, "A");
        assert_eq!(atom.segment_id, "P0");
    }

    #[test]
    fn matches_field_compares_only_the_requested_field() {
        let a = Atom::new("CA", 3, "SER").with_chain("A");
        let b = Atom::new("CB", 3, "SER").with_chain("B");

        assert!(!a.matches_field(&b, AtomField::Name));
        assert!(a.matches_field(&b, AtomField::ResidueNumber));
        assert!(a.matches_field(&b, AtomField::ResidueName));
        assert!(!a.matches_field(&b, AtomField::Chain));
        assert!(a.matches_field(&b, AtomField::SegmentId));
    }

    #[test]
    fn atom_field_display_uses_topology_keys() {
        let names: Vec<String> = AtomField::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, ["name", "resid", "resname", "chain", "segid"]);
    }
}
