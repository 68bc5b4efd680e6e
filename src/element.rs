use std::fmt;

static SYMBOLS: &[&str] = &[
    "*", // dummy
    "H", "He", //
    "Li", "Be", "B", "C", "N", "O", "F", "Ne", //
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", //
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se",
    "Br", "Kr", //
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb", "Te",
    "I", "Xe", //
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No",
    "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// A chemical element, identified by its atomic number (1–118).
///
/// Only the handful of elements the classifier branches on get named
/// constants; everything else is reachable through [`Element::from_symbol`]
/// or [`Element::from_atomic_num`].
///
/// # Examples
///
/// ```
/// use viscogroups::Element;
///
/// let cl = Element::from_symbol("Cl").unwrap();
/// assert_eq!(cl, Element::CL);
/// assert_eq!(cl.atomic_num(), 17);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(u8);

impl Element {
    pub const H: Element = Element(1);
    pub const B: Element = Element(5);
    pub const C: Element = Element(6);
    pub const N: Element = Element(7);
    pub const O: Element = Element(8);
    pub const F: Element = Element(9);
    pub const SI: Element = Element(14);
    pub const P: Element = Element(15);
    pub const S: Element = Element(16);
    pub const CL: Element = Element(17);
    pub const AS: Element = Element(33);
    pub const SE: Element = Element(34);
    pub const BR: Element = Element(35);
    pub const TE: Element = Element(52);
    pub const I: Element = Element(53);

    pub fn from_atomic_num(n: u8) -> Option<Element> {
        if n >= 1 && (n as usize) < SYMBOLS.len() {
            Some(Element(n))
        } else {
            None
        }
    }

    pub fn from_symbol(s: &str) -> Option<Element> {
        SYMBOLS
            .iter()
            .skip(1)
            .position(|&sym| sym == s)
            .map(|i| Element(i as u8 + 1))
    }

    pub fn atomic_num(self) -> u8 {
        self.0
    }

    pub fn symbol(self) -> &'static str {
        SYMBOLS[self.0 as usize]
    }

    /// Elements the SMILES organic subset allows without brackets.
    pub fn is_organic_subset(self) -> bool {
        matches!(self.0, 5 | 6 | 7 | 8 | 9 | 15 | 16 | 17 | 35 | 53)
    }

    /// p-block elements that can take part in an sp2 ring system.
    pub fn is_sp2_capable(self) -> bool {
        matches!(self.0, 5 | 6 | 7 | 8 | 15 | 16 | 33 | 34 | 52)
    }

    /// Main-group elements whose geometry follows from their bonding.
    pub fn is_main_group(self) -> bool {
        matches!(self.0, 5..=9 | 14..=17 | 32..=35 | 51..=53)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_all_118_elements() {
        assert_eq!(SYMBOLS.len(), 119);
        assert_eq!(Element::from_atomic_num(118).unwrap().symbol(), "Og");
        assert_eq!(Element::from_atomic_num(119), None);
        assert_eq!(Element::from_atomic_num(0), None);
    }

    #[test]
    fn symbol_lookup() {
        assert_eq!(Element::from_symbol("C"), Some(Element::C));
        assert_eq!(Element::from_symbol("Cl"), Some(Element::CL));
        assert_eq!(Element::from_symbol("Na").unwrap().atomic_num(), 11);
        assert_eq!(Element::from_symbol("Xx"), None);
        assert_eq!(Element::from_symbol("*"), None);
    }

    #[test]
    fn named_constants_match_table() {
        for e in [
            Element::H,
            Element::B,
            Element::C,
            Element::N,
            Element::O,
            Element::F,
            Element::SI,
            Element::P,
            Element::S,
            Element::CL,
            Element::AS,
            Element::SE,
            Element::BR,
            Element::TE,
            Element::I,
        ] {
            assert_eq!(Element::from_symbol(e.symbol()), Some(e));
        }
    }

    #[test]
    fn organic_subset() {
        assert!(Element::C.is_organic_subset());
        assert!(Element::BR.is_organic_subset());
        assert!(!Element::SI.is_organic_subset());
        assert!(!Element::H.is_organic_subset());
    }
}
