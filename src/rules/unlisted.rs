use crate::codes::GroupCode;
use crate::element::Element;
use crate::engine::{Context, UnclassifiedReason};
use crate::hybridization::Hybridization;

/// Fallback for atoms no other rule claimed: chain carbons by hybridization
/// and neighbor count, chlorines by how many share their carbon.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlistedRule;

impl UnlistedRule {
    pub const NAME: &'static str = "unlisted atoms";

    pub(crate) fn apply(&self, ctx: &mut Context<'_>) {
        let mol = ctx.mol();
        for atom in 0..mol.atom_count() {
            if ctx.is_processed(atom) {
                continue;
            }
            let code = match mol.element(atom) {
                Element::C => carbon_code(ctx, atom),
                Element::CL => {
                    let geminal = mol
                        .distance_matrix()
                        .atoms_at(atom, 2)
                        .filter(|&other| mol.element(other) == Element::CL)
                        .count();
                    GroupCode::chlorine(geminal + 1)
                        .ok_or(UnclassifiedReason::SubstitutionCount(geminal + 1))
                }
                _ => Err(UnclassifiedReason::UnsupportedElement),
            };
            match code {
                Ok(code) => ctx.claim(Self::NAME, [atom], vec![code]),
                Err(reason) => ctx.unclassified(atom, reason),
            }
        }
    }
}

fn carbon_code(ctx: &Context<'_>, atom: usize) -> Result<GroupCode, UnclassifiedReason> {
    let neighbors = ctx.neighbor_count(atom);
    let code = match ctx.mol().hybridization(atom) {
        Hybridization::SP3 => GroupCode::carbon_sp3(neighbors),
        Hybridization::SP2 => GroupCode::carbon_sp2(neighbors),
        Hybridization::SP => GroupCode::carbon_sp(neighbors),
        other => return Err(UnclassifiedReason::Hybridization(other)),
    };
    code.ok_or(UnclassifiedReason::NeighborCount(neighbors))
}
