use petgraph::graph::NodeIndex;

use crate::aromaticity::perceive_aromaticity;
use crate::atom::Atom;
use crate::bond::Bond;
use crate::distance::DistanceMatrix;
use crate::element::Element;
use crate::hybridization::{assign_hybridization, Hybridization};
use crate::mol::Mol;
use crate::pattern::{AtomMapping, Pattern};
use crate::rings::RingInfo;
use crate::smiles::{from_smiles, SmilesError};

/// Read-only view of a parsed molecule, as the classifier needs it.
///
/// Atom indices run densely from `0` to `atom_count() - 1` and mean the same
/// thing across every method.
pub trait MoleculeGraph {
    fn atom_count(&self) -> usize;

    fn element(&self, atom: usize) -> Element;

    fn hybridization(&self, atom: usize) -> Hybridization;

    fn is_aromatic(&self, atom: usize) -> bool;

    fn distance_matrix(&self) -> &DistanceMatrix;

    /// Elementary rings in discovery order.
    fn elementary_rings(&self) -> &[Vec<usize>];

    /// Every occurrence of `pattern`, one tuple per distinct atom set.
    fn find_pattern(&self, pattern: &Pattern) -> Vec<AtomMapping>;

    fn atoms(&self) -> Vec<AtomView> {
        (0..self.atom_count())
            .map(|index| AtomView {
                index,
                element: self.element(index),
                hybridization: self.hybridization(index),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomView {
    pub index: usize,
    pub element: Element,
    pub hybridization: Hybridization,
}

/// A molecule parsed from SMILES with rings, aromaticity, hybridization and
/// distances perceived up front.
#[derive(Debug, Clone)]
pub struct SmilesMolecule {
    mol: Mol<Atom, Bond>,
    elements: Vec<Element>,
    hybridization: Vec<Hybridization>,
    rings: RingInfo,
    distances: DistanceMatrix,
}

impl SmilesMolecule {
    pub fn parse(smiles: &str) -> Result<Self, SmilesError> {
        Self::from_mol(from_smiles(smiles)?)
    }

    pub fn from_mol(mut mol: Mol<Atom, Bond>) -> Result<Self, SmilesError> {
        let rings = RingInfo::sssr(&mol);
        perceive_aromaticity(&mut mol, &rings)?;
        let hybridization = assign_hybridization(&mol);
        let distances = DistanceMatrix::from_mol(&mol);
        let elements = mol
            .atoms()
            .map(|idx| {
                let atomic_num = mol.atom(idx).atomic_num;
                Element::from_atomic_num(atomic_num)
                    .ok_or(SmilesError::UnknownAtomicNumber { atom: idx.index(), atomic_num })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            mol,
            elements,
            hybridization,
            rings,
            distances,
        })
    }

    pub fn mol(&self) -> &Mol<Atom, Bond> {
        &self.mol
    }

    pub fn ring_info(&self) -> &RingInfo {
        &self.rings
    }
}

impl MoleculeGraph for SmilesMolecule {
    fn atom_count(&self) -> usize {
        self.mol.atom_count()
    }

    fn element(&self, atom: usize) -> Element {
        self.elements[atom]
    }

    fn hybridization(&self, atom: usize) -> Hybridization {
        self.hybridization[atom]
    }

    fn is_aromatic(&self, atom: usize) -> bool {
        self.mol.atom(NodeIndex::new(atom)).is_aromatic
    }

    fn distance_matrix(&self) -> &DistanceMatrix {
        &self.distances
    }

    fn elementary_rings(&self) -> &[Vec<usize>] {
        self.rings.rings()
    }

    fn find_pattern(&self, pattern: &Pattern) -> Vec<AtomMapping> {
        pattern.find_all(&self.mol)
    }
}
