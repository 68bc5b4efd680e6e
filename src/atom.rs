use crate::element::Element;

/// Default atom type for a molecular graph node.
///
/// `Atom` stores intrinsic atomic properties, the things you would read off
/// a structural formula. Hydrogens are implicit and never become graph
/// nodes, so the graph degree of an atom is its heavy-atom connectivity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). Identifies the element.
    pub atomic_num: u8,
    /// Formal charge in elementary charge units (e.g. −1 for a carboxylate oxygen).
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance (the common case).
    pub isotope: u16,
    /// Whether this atom is in an aromatic ring.
    ///
    /// Set from lowercase SMILES symbols and completed by aromaticity
    /// perception for rings written in Kekulé form.
    pub is_aromatic: bool,
}

impl Atom {
    pub fn element(&self) -> Option<Element> {
        Element::from_atomic_num(self.atomic_num)
    }
}
