use std::fmt;

/// Errors produced when parsing a SMILES string or a motif pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmilesError {
    /// An unexpected character was encountered at the given position.
    UnexpectedChar { pos: usize, ch: char },
    /// An unrecognized element symbol was found.
    InvalidElement { pos: usize, text: String },
    /// A bracket atom `[` was opened but never closed with `]`.
    UnclosedBracket { pos: usize },
    /// A ring-opening digit was never matched by a ring-closing digit.
    UnclosedRing { digit: u16 },
    /// A parenthesis was opened without a matching close, or vice versa.
    UnmatchedParen { pos: usize },
    /// A charge specifier inside a bracket atom could not be parsed.
    InvalidCharge { pos: usize },
    /// A ring-closure digit or bond symbol appeared with no atom to attach to.
    InvalidRingBond { digit: u16, pos: usize },
    /// A bond symbol has no atom on one of its sides.
    DanglingBond,
    /// A ring closure would bond an atom to itself or duplicate an existing bond.
    DuplicateBond { pos: usize },
    /// The input string was empty or contained only whitespace.
    EmptyInput,
    /// Two ring-closure bonds on the same digit specify conflicting bond types.
    RingBondConflict { digit: u16 },
    /// An atom written as aromatic is not part of any ring.
    NonRingAromatic { atom: usize },
    /// A graph atom carries an atomic number outside the periodic table.
    UnknownAtomicNumber { atom: usize, atomic_num: u8 },
    /// A `*` atom; every atom must name an element.
    WildcardAtom { pos: usize },
}

impl fmt::Display for SmilesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar { pos, ch } => {
                write!(f, "unexpected character '{}' at position {}", ch, pos)
            }
            Self::InvalidElement { pos, text } => {
                write!(f, "invalid element '{}' at position {}", text, pos)
            }
            Self::UnclosedBracket { pos } => {
                write!(f, "unclosed bracket atom starting at position {}", pos)
            }
            Self::UnclosedRing { digit } => write!(f, "unclosed ring {}", digit),
            Self::UnmatchedParen { pos } => {
                write!(f, "unmatched parenthesis at position {}", pos)
            }
            Self::InvalidCharge { pos } => {
                write!(f, "invalid charge at position {}", pos)
            }
            Self::InvalidRingBond { digit, pos } => {
                write!(f, "invalid ring bond {} at position {}", digit, pos)
            }
            Self::DuplicateBond { pos } => {
                write!(f, "ring closure at position {} duplicates a bond", pos)
            }
            Self::DanglingBond => write!(f, "bond symbol without an atom on both sides"),
            Self::EmptyInput => write!(f, "empty SMILES string"),
            Self::RingBondConflict { digit } => {
                write!(f, "conflicting bond types on ring closure {}", digit)
            }
            Self::NonRingAromatic { atom } => {
                write!(f, "atom {} is marked aromatic but is not in a ring", atom)
            }
            Self::UnknownAtomicNumber { atom, atomic_num } => {
                write!(f, "atom {} has unknown atomic number {}", atom, atomic_num)
            }
            Self::WildcardAtom { pos } => {
                write!(f, "wildcard atom '*' at position {} is not supported", pos)
            }
        }
    }
}

impl std::error::Error for SmilesError {}
