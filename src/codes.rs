use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A group code, the `Q` column of the correlation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupCode(pub u16);

/// Codes in the order the rules emitted them.
pub type CodeSequence = Vec<GroupCode>;

/// Atom indices already claimed by a rule.
pub type ProcessedSet = BTreeSet<usize>;

impl GroupCode {
    pub const ANHYDRIDE: GroupCode = GroupCode(42);
    pub const CARBONATE: GroupCode = GroupCode(43);
    pub const POLYPHENYL: GroupCode = GroupCode(17);
    pub const NAPHTHALENE: GroupCode = GroupCode(18);
    pub const TETRALIN: GroupCode = GroupCode(20);

    pub const AROMATIC_CH: GroupCode = GroupCode(15);
    pub const AROMATIC_C: GroupCode = GroupCode(16);

    pub const RING_SP2_TERMINAL: GroupCode = GroupCode(13);

    pub fn value(self) -> u16 {
        self.0
    }

    /// Aromatic carbon by number of bonded neighbors.
    pub fn aromatic_carbon(neighbors: usize) -> Option<GroupCode> {
        match neighbors {
            2 => Some(Self::AROMATIC_CH),
            3 => Some(Self::AROMATIC_C),
            _ => None,
        }
    }

    /// Saturated ring atom by number of bonded neighbors.
    pub fn ring_sp3(neighbors: usize) -> Option<GroupCode> {
        match neighbors {
            2 => Some(GroupCode(11)),
            3 => Some(GroupCode(12)),
            4 => Some(GroupCode(14)),
            _ => None,
        }
    }

    pub fn ring_sp2(neighbors: usize) -> Option<GroupCode> {
        (neighbors == 1).then_some(Self::RING_SP2_TERMINAL)
    }

    /// Chain carbons: 1-5 for SP3, 6-8 for SP2, 9-10 for SP.
    pub fn carbon_sp3(neighbors: usize) -> Option<GroupCode> {
        (neighbors <= 4).then(|| GroupCode(1 + neighbors as u16))
    }

    pub fn carbon_sp2(neighbors: usize) -> Option<GroupCode> {
        (1..=3)
            .contains(&neighbors)
            .then(|| GroupCode(5 + neighbors as u16))
    }

    pub fn carbon_sp(neighbors: usize) -> Option<GroupCode> {
        (1..=2)
            .contains(&neighbors)
            .then(|| GroupCode(8 + neighbors as u16))
    }

    /// Chlorine by the number of chlorines on the same carbon, itself included.
    pub fn chlorine(count: usize) -> Option<GroupCode> {
        (1..=3)
            .contains(&count)
            .then(|| GroupCode(77 + count as u16))
    }
}

impl fmt::Display for GroupCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl From<u16> for GroupCode {
    fn from(value: u16) -> Self {
        GroupCode(value)
    }
}
