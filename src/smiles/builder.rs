use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::mol::Mol;
use crate::smiles::error::SmilesError;
use crate::smiles::tokenizer::{AtomToken, BondToken, Token};

/// Connectivity exactly as written: atom tokens joined by their bond tokens.
///
/// `None` on an edge means no bond symbol was written. SMILES and motif
/// patterns give that case different meanings, so it is resolved later.
pub type TokenGraph = Mol<AtomToken, Option<BondToken>>;

pub fn assemble(tokens: &[Token]) -> Result<TokenGraph, SmilesError> {
    let mut mol = TokenGraph::new();
    let mut branches: Vec<(NodeIndex, usize)> = Vec::new();
    let mut current: Option<NodeIndex> = None;
    let mut pending_bond: Option<BondToken> = None;
    let mut ring_opens: BTreeMap<u16, (NodeIndex, Option<BondToken>)> = BTreeMap::new();

    for token in tokens {
        match token {
            Token::Atom(atom_tok) => {
                let idx = mol.add_atom(atom_tok.clone());
                if let Some(cur) = current {
                    mol.add_bond(cur, idx, pending_bond.take());
                }
                pending_bond = None;
                current = Some(idx);
            }
            Token::Bond(b) => {
                if current.is_none() {
                    return Err(SmilesError::DanglingBond);
                }
                pending_bond = Some(*b);
            }
            Token::RingClosure { bond, digit, pos } => {
                let cur = current.ok_or(SmilesError::InvalidRingBond {
                    digit: *digit,
                    pos: *pos,
                })?;

                match ring_opens.remove(digit) {
                    Some((open, open_bond)) => {
                        let ring_bond = match (*bond, open_bond) {
                            (None, None) => None,
                            (Some(b), None) | (None, Some(b)) => Some(b),
                            (Some(b1), Some(b2)) if b1 == b2 => Some(b1),
                            (Some(_), Some(_)) => {
                                return Err(SmilesError::RingBondConflict { digit: *digit });
                            }
                        };
                        if open == cur || mol.bond_between(open, cur).is_some() {
                            return Err(SmilesError::DuplicateBond { pos: *pos });
                        }
                        mol.add_bond(open, cur, ring_bond);
                    }
                    None => {
                        ring_opens.insert(*digit, (cur, *bond));
                    }
                }
            }
            Token::OpenParen(pos) => {
                let cur = current.ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                branches.push((cur, *pos));
            }
            Token::CloseParen(pos) => {
                let (parent, _) = branches
                    .pop()
                    .ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                current = Some(parent);
                pending_bond = None;
            }
            Token::Dot(_) => {
                current = None;
                pending_bond = None;
            }
        }
    }

    if let Some(&(_, pos)) = branches.last() {
        return Err(SmilesError::UnmatchedParen { pos });
    }
    if let Some((&digit, _)) = ring_opens.iter().next() {
        return Err(SmilesError::UnclosedRing { digit });
    }
    if pending_bond.is_some() {
        return Err(SmilesError::DanglingBond);
    }

    Ok(mol)
}

/// Resolves written bond symbols into concrete orders and drops plain
/// hydrogen atoms, which the rest of the crate treats as implicit.
pub fn build_mol(tokens: &TokenGraph) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for idx in tokens.atoms() {
        let tok = tokens.atom(idx);
        mol.add_atom(Atom {
            atomic_num: tok.element.atomic_num(),
            formal_charge: tok.charge,
            isotope: tok.isotope,
            is_aromatic: tok.is_aromatic,
        });
    }

    for edge in tokens.bonds() {
        if let Some((a, b)) = tokens.bond_endpoints(edge) {
            let order = resolve_bond_order(
                tokens.bond(edge),
                tokens.atom(a).is_aromatic,
                tokens.atom(b).is_aromatic,
            );
            mol.add_bond(a, b, Bond::new(order));
        }
    }

    fold_hydrogens(&mol)
}

fn resolve_bond_order(
    bond_tok: &Option<BondToken>,
    from_aromatic: bool,
    to_aromatic: bool,
) -> BondOrder {
    match bond_tok {
        Some(BondToken::Single) | Some(BondToken::Up) | Some(BondToken::Down) => BondOrder::Single,
        Some(BondToken::Double) => BondOrder::Double,
        Some(BondToken::Triple) => BondOrder::Triple,
        Some(BondToken::Aromatic) => BondOrder::Aromatic,
        None if from_aromatic && to_aromatic => BondOrder::Aromatic,
        None => BondOrder::Single,
    }
}

fn fold_hydrogens(mol: &Mol<Atom, Bond>) -> Mol<Atom, Bond> {
    let is_plain_h =
        |atom: &Atom| atom.atomic_num == 1 && atom.isotope == 0 && atom.formal_charge == 0;
    let foldable: Vec<bool> = mol
        .atoms()
        .map(|idx| {
            let atom = mol.atom(idx);
            if !is_plain_h(atom) || mol.degree(idx) != 1 {
                return false;
            }
            mol.neighbors(idx).all(|nb| mol.atom(nb).atomic_num != 1)
        })
        .collect();

    if !foldable.contains(&true) {
        return mol.clone();
    }
    mol.retain_atoms(|idx, _| !foldable[idx.index()])
}
