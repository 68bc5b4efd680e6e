use crate::codes::GroupCode;
use crate::engine::{Context, UnclassifiedReason};
use crate::hybridization::Hybridization;

/// Codes the unclaimed atoms of each ring system, then claims the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingSystemRule;

impl RingSystemRule {
    pub const NAME: &'static str = "ring systems";

    pub(crate) fn apply(&self, ctx: &mut Context<'_>) {
        let mol = ctx.mol();
        let systems = ctx.ring_systems().to_vec();
        for system in systems {
            let mut codes = Vec::new();
            for &atom in &system {
                if ctx.is_processed(atom) {
                    continue;
                }
                let neighbors = ctx.neighbor_count(atom);
                let code = match mol.hybridization(atom) {
                    Hybridization::SP3 => GroupCode::ring_sp3(neighbors)
                        .ok_or(UnclassifiedReason::NeighborCount(neighbors)),
                    Hybridization::SP2 => GroupCode::ring_sp2(neighbors)
                        .ok_or(UnclassifiedReason::NeighborCount(neighbors)),
                    other => Err(UnclassifiedReason::Hybridization(other)),
                };
                match code {
                    Ok(code) => codes.push(code),
                    Err(reason) => ctx.unclassified(atom, reason),
                }
            }
            ctx.claim(Self::NAME, system, codes);
        }
    }
}
