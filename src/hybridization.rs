use std::fmt;

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::element::Element;
use crate::mol::Mol;

/// Bonding geometry class of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hybridization {
    SP,
    SP2,
    SP3,
    /// Hypervalent centres, metals, bare hydrogens and anything else the
    /// bonding pattern does not pin down.
    Other,
}

impl fmt::Display for Hybridization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SP => "SP",
            Self::SP2 => "SP2",
            Self::SP3 => "SP3",
            Self::Other => "OTHER",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct BondTally {
    single: usize,
    double: usize,
    triple: usize,
    aromatic: usize,
}

impl BondTally {
    fn of(mol: &Mol<Atom, Bond>, idx: NodeIndex) -> Self {
        let mut tally = Self::default();
        for edge in mol.bonds_of(idx) {
            match mol.bond(edge).order {
                BondOrder::Single => tally.single += 1,
                BondOrder::Double => tally.double += 1,
                BondOrder::Triple => tally.triple += 1,
                BondOrder::Aromatic => tally.aromatic += 1,
            }
        }
        tally
    }

    fn has_pi(&self) -> bool {
        self.double + self.triple + self.aromatic > 0
    }
}

pub fn assign_hybridization_atom(mol: &Mol<Atom, Bond>, idx: NodeIndex) -> Hybridization {
    let atom = mol.atom(idx);
    let Some(element) = atom.element().filter(|e| e.is_main_group()) else {
        return Hybridization::Other;
    };
    if atom.is_aromatic {
        return Hybridization::SP2;
    }

    let degree = mol.degree(idx);
    let tally = BondTally::of(mol, idx);

    if degree > 4 {
        return Hybridization::Other;
    }
    if degree == 4 {
        return Hybridization::SP3;
    }
    if tally.triple > 0 || tally.double >= 2 {
        return Hybridization::SP;
    }
    if tally.double == 1 || tally.aromatic > 0 {
        return Hybridization::SP2;
    }

    // Lone pairs next to a π system delocalise (amides, esters, anilines).
    let conjugated = mol
        .neighbors(idx)
        .any(|nb| mol.atom(nb).is_aromatic || BondTally::of(mol, nb).has_pi());
    match element {
        Element::N if conjugated && degree <= 3 => Hybridization::SP2,
        Element::O if conjugated && degree <= 2 => Hybridization::SP2,
        Element::B => Hybridization::SP2,
        _ => Hybridization::SP3,
    }
}

pub fn assign_hybridization(mol: &Mol<Atom, Bond>) -> Vec<Hybridization> {
    mol.atoms()
        .map(|idx| assign_hybridization_atom(mol, idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aromaticity::perceive_aromaticity;
    use crate::hybridization::Hybridization::*;
    use crate::rings::RingInfo;
    use crate::smiles::from_smiles;

    fn hyb(smiles: &str) -> Vec<Hybridization> {
        let mut mol = from_smiles(smiles).unwrap();
        let ri = RingInfo::sssr(&mol);
        perceive_aromaticity(&mut mol, &ri).unwrap();
        assign_hybridization(&mol)
    }

    #[test]
    fn methane_sp3() {
        assert_eq!(hyb("C"), vec![SP3]);
    }

    #[test]
    fn ethane_sp3() {
        assert_eq!(hyb("CC"), vec![SP3, SP3]);
    }

    #[test]
    fn ethene_sp2() {
        assert_eq!(hyb("C=C"), vec![SP2, SP2]);
    }

    #[test]
    fn acetylene_sp() {
        assert_eq!(hyb("C#C"), vec![SP, SP]);
    }

    #[test]
    fn allene_central_sp() {
        assert_eq!(hyb("C=C=C"), vec![SP2, SP, SP2]);
    }

    #[test]
    fn benzene_sp2() {
        assert_eq!(hyb("c1ccccc1"), vec![SP2; 6]);
    }

    #[test]
    fn kekule_benzene_sp2() {
        assert_eq!(hyb("C1=CC=CC=C1"), vec![SP2; 6]);
    }

    #[test]
    fn ethanol_sp3() {
        assert_eq!(hyb("CCO"), vec![SP3, SP3, SP3]);
    }

    #[test]
    fn acetic_acid() {
        assert_eq!(hyb("CC(=O)O"), vec![SP3, SP2, SP2, SP2]);
    }

    #[test]
    fn acetamide_nitrogen_sp2() {
        assert_eq!(hyb("CC(N)=O"), vec![SP3, SP2, SP2, SP2]);
    }

    #[test]
    fn aniline_nitrogen_sp2() {
        assert_eq!(hyb("Nc1ccccc1")[0], SP2);
    }

    #[test]
    fn thiophenol_sulfur_sp3() {
        assert_eq!(hyb("Sc1ccccc1")[0], SP3);
    }

    #[test]
    fn chlorobenzene_chlorine_sp3() {
        assert_eq!(hyb("Clc1ccccc1")[0], SP3);
    }

    #[test]
    fn cyanobenzene() {
        let h = hyb("N#Cc1ccccc1");
        assert_eq!(h[0], SP);
        assert_eq!(h[1], SP);
    }

    #[test]
    fn sulfone_sulfur_sp3() {
        assert_eq!(hyb("CS(C)(=O)=O")[1], SP3);
    }

    #[test]
    fn quaternary_carbon_sp3() {
        assert_eq!(hyb("CC(C)(C)C")[1], SP3);
    }

    #[test]
    fn sodium_is_other() {
        assert_eq!(hyb("[Na+].[Cl-]"), vec![Other, SP3]);
    }

    #[test]
    fn pentavalent_phosphorus_is_other() {
        assert_eq!(hyb("ClP(Cl)(Cl)(Cl)Cl")[1], Other);
    }

    #[test]
    fn borane_sp2() {
        assert_eq!(hyb("B"), vec![SP2]);
    }
}
