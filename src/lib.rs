//! Group-contribution codes for liquid viscosity correlations.
//!
//! A molecule is split into non-overlapping structural fragments by an
//! ordered catalogue of rules; each fragment yields a group code that keys
//! a row of coefficients in a correlation table.
//!
//! ```
//! use viscogroups::{Classifier, ClassifierConfig, SmilesMolecule};
//!
//! let mol = SmilesMolecule::parse("CC(=O)OC(C)=O").unwrap();
//! let classifier = Classifier::standard(ClassifierConfig::default()).unwrap();
//! assert_eq!(classifier.classify(&mol).code_values(), vec![42, 2, 2]);
//! ```

pub mod analysis;
pub mod aromaticity;
pub mod atom;
pub mod bond;
pub mod codes;
pub mod config;
pub mod distance;
pub mod element;
pub mod engine;
pub mod error;
pub mod hybridization;
pub mod identifier;
pub mod lookup;
pub mod mol;
pub mod molecule;
pub mod pattern;
pub mod ring_systems;
pub mod rings;
pub mod rules;
pub mod smiles;

pub use analysis::{Analyzer, Report};
pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use codes::{CodeSequence, GroupCode, ProcessedSet};
pub use config::{PartialSettings, Settings};
pub use distance::DistanceMatrix;
pub use element::Element;
pub use engine::{
    Claim, Classification, Classifier, ClassifierConfig, UnclassifiedAtom, UnclassifiedReason,
};
pub use error::{Error, Result};
pub use hybridization::Hybridization;
pub use identifier::{
    CasNumber, ChainResolver, CirResolver, Identifier, NoResolver, ResolutionError, Resolver,
    TableResolver,
};
pub use lookup::{GroupEntry, GroupTable, Lookup, ResolvedGroup, TableError};
pub use mol::Mol;
pub use molecule::{AtomView, MoleculeGraph, SmilesMolecule};
pub use pattern::{Pattern, PatternError};
pub use ring_systems::{merge_ring_systems, RingSystem};
pub use rings::RingInfo;
pub use rules::{Rule, RuleCatalogue};
pub use smiles::{from_smiles, SmilesError};
