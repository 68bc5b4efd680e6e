//! The ordered rule catalogue.
//!
//! Rules run in catalogue order and each one only claims atoms no earlier
//! rule has claimed, so specific motifs must come before the generic
//! counting rules that would otherwise take their atoms.

mod aromatic;
mod motif;
mod ring;
mod unlisted;

pub use aromatic::AromaticRule;
pub use motif::MotifRule;
pub use ring::RingSystemRule;
pub use unlisted::UnlistedRule;

use crate::codes::GroupCode;
use crate::engine::Context;
use crate::pattern::PatternError;

#[derive(Debug, Clone)]
pub enum Rule {
    Motif(MotifRule),
    Aromatic(AromaticRule),
    RingSystems(RingSystemRule),
    Unlisted(UnlistedRule),
}

impl Rule {
    pub fn name(&self) -> &str {
        match self {
            Rule::Motif(rule) => rule.name(),
            Rule::Aromatic(_) => AromaticRule::NAME,
            Rule::RingSystems(_) => RingSystemRule::NAME,
            Rule::Unlisted(_) => UnlistedRule::NAME,
        }
    }

    pub(crate) fn apply(&self, ctx: &mut Context<'_>) {
        match self {
            Rule::Motif(rule) => rule.apply(ctx),
            Rule::Aromatic(rule) => rule.apply(ctx),
            Rule::RingSystems(rule) => rule.apply(ctx),
            Rule::Unlisted(rule) => rule.apply(ctx),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuleCatalogue {
    rules: Vec<Rule>,
}

impl RuleCatalogue {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Anhydride, carbonate, phenyl assemblies, naphthalene, tetralin, then
    /// the aromatic, ring-system and unlisted-atom counting rules.
    pub fn standard() -> Result<Self, PatternError> {
        Ok(Self::new(vec![
            Rule::Motif(MotifRule::new(
                "anhydride",
                GroupCode::ANHYDRIDE,
                &["C(=O)OC=O"],
            )?),
            Rule::Motif(MotifRule::new(
                "carbonate",
                GroupCode::CARBONATE,
                &["[O-]C([O-])=O"],
            )?),
            // terphenyls before biphenyl, which is a part of each of them
            Rule::Motif(MotifRule::new(
                "polyphenyl",
                GroupCode::POLYPHENYL,
                &[
                    "c1ccc(cc1)c2ccc(cc2)c3ccccc3",
                    "c1ccc(cc1)c2cccc(c2)c3ccccc3",
                    "c1ccc(cc1)c2ccccc2c3ccccc3",
                    "c1ccc(cc1)c2ccccc2",
                ],
            )?),
            Rule::Motif(MotifRule::new(
                "naphthalene",
                GroupCode::NAPHTHALENE,
                &["c1cccc(c12)cccc2"],
            )?),
            Rule::Motif(MotifRule::new(
                "tetralin",
                GroupCode::TETRALIN,
                &["C1CCc2ccccc2C1"],
            )?),
            Rule::Aromatic(AromaticRule::new()?),
            Rule::RingSystems(RingSystemRule),
            Rule::Unlisted(UnlistedRule),
        ]))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::name).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_order() {
        let catalogue = RuleCatalogue::standard().unwrap();
        assert_eq!(
            catalogue.names(),
            vec![
                "anhydride",
                "carbonate",
                "polyphenyl",
                "naphthalene",
                "tetralin",
                "aromatic atoms",
                "ring systems",
                "unlisted atoms",
            ]
        );
    }

    #[test]
    fn bad_motif_is_rejected() {
        let err = MotifRule::new("broken", GroupCode(99), &["c1ccc"]).unwrap_err();
        assert_eq!(err.pattern, "c1ccc");
    }
}
