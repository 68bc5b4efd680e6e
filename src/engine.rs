use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, debug_span, instrument, warn};

use crate::codes::{CodeSequence, GroupCode, ProcessedSet};
use crate::element::Element;
use crate::hybridization::Hybridization;
use crate::molecule::MoleculeGraph;
use crate::pattern::PatternError;
use crate::ring_systems::{merge_ring_systems, RingSystem};
use crate::rules::RuleCatalogue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Merge rings sharing a single atom into one ring system.
    pub include_spiro: bool,
}

/// Atoms claimed by one rule application and the codes it emitted for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub rule: String,
    pub atoms: BTreeSet<usize>,
    pub codes: Vec<GroupCode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnclassifiedReason {
    /// No rule has a branch for this element.
    UnsupportedElement,
    /// The rule handles the atom but not with this many bonded neighbors.
    NeighborCount(usize),
    /// Same-element neighbor count outside the handled range (chlorine).
    SubstitutionCount(usize),
    /// The rule has no branch for this hybridization.
    Hybridization(Hybridization),
}

impl fmt::Display for UnclassifiedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedElement => f.write_str("no rule for this element"),
            Self::NeighborCount(n) => write!(f, "no code for {} bonded neighbors", n),
            Self::SubstitutionCount(n) => write!(f, "no code for {} geminal atoms", n),
            Self::Hybridization(h) => write!(f, "no code for {} hybridization", h),
        }
    }
}

/// An atom that reached a rule and came out without a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnclassifiedAtom {
    pub atom: usize,
    pub element: Element,
    pub reason: UnclassifiedReason,
}

impl fmt::Display for UnclassifiedAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "atom {} ({}): {}", self.atom, self.element, self.reason)
    }
}

/// Result of one classification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub codes: CodeSequence,
    pub processed: ProcessedSet,
    pub claims: Vec<Claim>,
    pub unclassified: Vec<UnclassifiedAtom>,
}

impl Classification {
    pub fn codes(&self) -> &[GroupCode] {
        &self.codes
    }

    pub fn code_values(&self) -> Vec<u16> {
        self.codes.iter().map(|c| c.value()).collect()
    }

    pub fn is_processed(&self, atom: usize) -> bool {
        self.processed.contains(&atom)
    }
}

/// State threaded through the rules of one run.
///
/// Only [`Context::claim`] grows the processed set, and it refuses atoms that
/// are already in it.
pub(crate) struct Context<'m> {
    mol: &'m dyn MoleculeGraph,
    ring_systems: Vec<RingSystem>,
    out: Classification,
}

impl<'m> Context<'m> {
    fn new(mol: &'m dyn MoleculeGraph, ring_systems: Vec<RingSystem>) -> Self {
        Self {
            mol,
            ring_systems,
            out: Classification::default(),
        }
    }

    pub(crate) fn mol(&self) -> &'m dyn MoleculeGraph {
        self.mol
    }

    pub(crate) fn ring_systems(&self) -> &[RingSystem] {
        &self.ring_systems
    }

    pub(crate) fn is_processed(&self, atom: usize) -> bool {
        self.out.processed.contains(&atom)
    }

    pub(crate) fn overlaps(&self, atoms: &[usize]) -> bool {
        atoms.iter().any(|a| self.is_processed(*a))
    }

    pub(crate) fn neighbor_count(&self, atom: usize) -> usize {
        self.mol.distance_matrix().neighbor_count(atom)
    }

    /// Marks `atoms` processed and appends `codes` to the output.
    ///
    /// Atoms already processed are left out of the claim; a claim with no
    /// atoms left emits nothing.
    pub(crate) fn claim(
        &mut self,
        rule: &str,
        atoms: impl IntoIterator<Item = usize>,
        codes: Vec<GroupCode>,
    ) {
        let atoms: BTreeSet<usize> = atoms
            .into_iter()
            .filter(|a| !self.out.processed.contains(a))
            .collect();
        if atoms.is_empty() {
            return;
        }
        debug!(rule, ?atoms, ?codes, "claim");
        self.out.processed.extend(atoms.iter().copied());
        self.out.codes.extend(codes.iter().copied());
        self.out.claims.push(Claim {
            rule: rule.to_string(),
            atoms,
            codes,
        });
    }

    pub(crate) fn unclassified(&mut self, atom: usize, reason: UnclassifiedReason) {
        let element = self.mol.element(atom);
        warn!(atom, %element, %reason, "unclassified atom");
        self.out.unclassified.push(UnclassifiedAtom {
            atom,
            element,
            reason,
        });
    }

    fn finish(self) -> Classification {
        self.out
    }
}

/// Runs a rule catalogue over molecules.
///
/// A classifier holds no per-molecule state, so one instance can serve any
/// number of threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    catalogue: RuleCatalogue,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(catalogue: RuleCatalogue, config: ClassifierConfig) -> Self {
        Self { catalogue, config }
    }

    /// The standard viscosity group catalogue.
    pub fn standard(config: ClassifierConfig) -> Result<Self, PatternError> {
        Ok(Self::new(RuleCatalogue::standard()?, config))
    }

    pub fn catalogue(&self) -> &RuleCatalogue {
        &self.catalogue
    }

    pub fn config(&self) -> ClassifierConfig {
        self.config
    }

    #[instrument(level = "debug", skip_all, fields(atoms = mol.atom_count()))]
    pub fn classify(&self, mol: &dyn MoleculeGraph) -> Classification {
        let systems = merge_ring_systems(mol.elementary_rings(), self.config.include_spiro);
        debug!(systems = systems.len(), "ring systems merged");

        let mut ctx = Context::new(mol, systems);
        for rule in self.catalogue.rules() {
            let _span = debug_span!("rule", name = rule.name()).entered();
            rule.apply(&mut ctx);
        }

        let out = ctx.finish();
        debug!(codes = ?out.codes, "classification finished");
        out
    }
}
