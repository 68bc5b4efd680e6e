use tracing::debug;

use crate::codes::GroupCode;
use crate::engine::Context;
use crate::pattern::{Pattern, PatternError};

/// A fixed structural motif worth one code per occurrence.
///
/// Variants are searched in order; an occurrence touching an atom that is
/// already claimed is skipped whole.
#[derive(Debug, Clone)]
pub struct MotifRule {
    name: String,
    code: GroupCode,
    variants: Vec<Pattern>,
}

impl MotifRule {
    pub fn new(name: &str, code: GroupCode, variants: &[&str]) -> Result<Self, PatternError> {
        let variants = variants
            .iter()
            .map(|v| Pattern::compile(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            code,
            variants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> GroupCode {
        self.code
    }

    pub fn variants(&self) -> &[Pattern] {
        &self.variants
    }

    pub(crate) fn apply(&self, ctx: &mut Context<'_>) {
        let mol = ctx.mol();
        for pattern in &self.variants {
            for occurrence in mol.find_pattern(pattern) {
                if ctx.overlaps(&occurrence) {
                    debug!(rule = %self.name, %pattern, ?occurrence, "overlaps a claimed atom");
                    continue;
                }
                ctx.claim(&self.name, occurrence, vec![self.code]);
            }
        }
    }
}
