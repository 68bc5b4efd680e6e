use crate::codes::GroupCode;
use crate::engine::{Context, UnclassifiedReason};
use crate::pattern::{Pattern, PatternError};

/// Codes each unclaimed aromatic carbon by its number of bonded neighbors.
///
/// Every matched atom is claimed, including the ones that get no code.
#[derive(Debug, Clone)]
pub struct AromaticRule {
    pattern: Pattern,
}

impl AromaticRule {
    pub const NAME: &'static str = "aromatic atoms";

    pub fn new() -> Result<Self, PatternError> {
        Ok(Self {
            pattern: Pattern::compile("c")?,
        })
    }

    pub(crate) fn apply(&self, ctx: &mut Context<'_>) {
        let mol = ctx.mol();
        for occurrence in mol.find_pattern(&self.pattern) {
            let Some(&atom) = occurrence.first() else {
                continue;
            };
            if ctx.is_processed(atom) {
                continue;
            }
            let neighbors = ctx.neighbor_count(atom);
            match GroupCode::aromatic_carbon(neighbors) {
                Some(code) => ctx.claim(Self::NAME, [atom], vec![code]),
                None => {
                    ctx.unclassified(atom, UnclassifiedReason::NeighborCount(neighbors));
                    ctx.claim(Self::NAME, [atom], Vec::new());
                }
            }
        }
    }
}
