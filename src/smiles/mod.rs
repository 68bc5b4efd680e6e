pub(crate) mod builder;
pub mod error;
pub(crate) mod tokenizer;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::Mol;
pub use error::SmilesError;

pub(crate) fn tokenize_nonempty(s: &str) -> Result<Vec<tokenizer::Token>, SmilesError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SmilesError::EmptyInput);
    }
    let tokens = tokenizer::tokenize(trimmed)?;
    if tokens.is_empty() {
        return Err(SmilesError::EmptyInput);
    }
    Ok(tokens)
}

/// Parses a SMILES string into a molecular graph.
///
/// Aromaticity flags come straight from the input (lowercase atoms); rings
/// written in Kekulé form are only recognised once the graph goes through
/// [`SmilesMolecule`](crate::SmilesMolecule), which runs perception.
pub fn from_smiles(s: &str) -> Result<Mol<Atom, Bond>, SmilesError> {
    let tokens = tokenize_nonempty(s)?;
    let graph = builder::assemble(&tokens)?;
    Ok(builder::build_mol(&graph))
}
