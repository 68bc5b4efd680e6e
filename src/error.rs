use thiserror::Error;

use crate::config::ConfigError;
use crate::identifier::ResolutionError;
use crate::lookup::TableError;
use crate::pattern::PatternError;
use crate::smiles::SmilesError;

/// Fatal errors of an analysis run. Lookup misses and unclassified atoms
/// are not errors; they are reported inside the result.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not parse '{input}': {source}")]
    Parse { input: String, source: SmilesError },
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

pub type Result<T> = std::result::Result<T, Error>;
