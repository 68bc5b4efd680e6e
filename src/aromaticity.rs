use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::element::Element;
use crate::mol::Mol;
use crate::rings::RingInfo;
use crate::smiles::SmilesError;

/// Completes the aromaticity flags of a freshly parsed molecule.
///
/// Lowercase input atoms are already aromatic; this checks that each of
/// them sits in a ring, perceives Kekulé-form rings by Hückel's 4n+2 rule
/// over the SSSR, and demotes aromatic bonds that are not ring bonds (the
/// bond joining the two halves of biphenyl, written `c1ccccc1c1ccccc1`).
pub fn perceive_aromaticity(
    mol: &mut Mol<Atom, Bond>,
    ring_info: &RingInfo,
) -> Result<(), SmilesError> {
    for idx in mol.atoms() {
        if mol.atom(idx).is_aromatic && !ring_info.is_ring_atom(idx.index()) {
            return Err(SmilesError::NonRingAromatic { atom: idx.index() });
        }
    }

    let aromatic_rings: Vec<&Vec<usize>> = ring_info
        .rings()
        .iter()
        .filter(|ring| {
            !ring
                .iter()
                .all(|&a| mol.atom(NodeIndex::new(a)).is_aromatic)
        })
        .filter(|ring| is_aromatic_ring(mol, ring, ring_info))
        .collect();

    for ring in aromatic_rings {
        let len = ring.len();
        for i in 0..len {
            let a = NodeIndex::new(ring[i]);
            let b = NodeIndex::new(ring[(i + 1) % len]);
            mol.atom_mut(a).is_aromatic = true;
            if let Some(edge) = mol.bond_between(a, b) {
                mol.bond_mut(edge).order = BondOrder::Aromatic;
            }
        }
    }

    let chain_bonds: Vec<_> = mol
        .bonds()
        .filter(|&e| mol.bond(e).order == BondOrder::Aromatic)
        .filter(|&e| match mol.bond_endpoints(e) {
            Some((a, b)) => !ring_info.is_ring_bond(a.index(), b.index()),
            None => false,
        })
        .collect();
    for edge in chain_bonds {
        mol.bond_mut(edge).order = BondOrder::Single;
    }

    Ok(())
}

fn is_aromatic_ring(mol: &Mol<Atom, Bond>, ring: &[usize], ring_info: &RingInfo) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut pi_total: u32 = 0;
    for &atom_idx in ring {
        match pi_electrons(mol, NodeIndex::new(atom_idx), ring_info) {
            Some(e) => pi_total += e,
            None => return false,
        }
    }

    is_huckel(pi_total)
}

/// π electrons an atom donates to a ring, or `None` if it breaks conjugation.
fn pi_electrons(mol: &Mol<Atom, Bond>, idx: NodeIndex, ring_info: &RingInfo) -> Option<u32> {
    let atom = mol.atom(idx);
    let element = atom.element()?;
    if !element.is_sp2_capable() {
        return None;
    }

    let mut double_in_ring_system = false;
    let mut double_exocyclic_to_heteroatom = false;
    for edge in mol.bonds_of(idx) {
        let (a, b) = mol.bond_endpoints(edge)?;
        let other = if a == idx { b } else { a };
        match mol.bond(edge).order {
            BondOrder::Triple => return None,
            BondOrder::Double => {
                if ring_info.is_ring_atom(other.index()) {
                    double_in_ring_system = true;
                } else if matches!(
                    mol.atom(other).element(),
                    Some(Element::O) | Some(Element::N) | Some(Element::S)
                ) {
                    double_exocyclic_to_heteroatom = true;
                } else {
                    return None;
                }
            }
            BondOrder::Aromatic => double_in_ring_system = true,
            BondOrder::Single => {}
        }
    }

    if double_in_ring_system {
        return Some(1);
    }
    if double_exocyclic_to_heteroatom {
        return Some(0);
    }

    let charge = atom.formal_charge;
    let degree = mol.degree(idx);
    match element {
        Element::C => match charge {
            -1 => Some(2),
            1 => Some(0),
            _ => None,
        },
        Element::N | Element::P | Element::AS if degree <= 3 && charge <= 0 => Some(2),
        Element::O | Element::S | Element::SE | Element::TE if degree == 2 && charge == 0 => {
            Some(2)
        }
        Element::B if charge == 0 => Some(0),
        _ => None,
    }
}

fn is_huckel(pi: u32) -> bool {
    pi >= 2 && (pi - 2) % 4 == 0
}
