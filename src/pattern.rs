use std::collections::HashSet;
use std::fmt;

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::element::Element;
use crate::mol::Mol;
use crate::smiles::builder::{assemble, TokenGraph};
use crate::smiles::tokenizer::BondToken;
use crate::smiles::{tokenize_nonempty, SmilesError};

/// One occurrence of a pattern: target atom indices, indexed by pattern atom.
pub type AtomMapping = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryAtom {
    element: Element,
    aromatic: bool,
    charge: Option<i8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryBond {
    SingleOrAromatic,
    Exact(BondOrder),
}

/// A structural motif compiled from a SMARTS-style string.
///
/// The accepted language is SMILES syntax read with SMARTS semantics:
/// uppercase symbols match aliphatic atoms only, lowercase symbols match
/// aromatic atoms only, bracket atoms additionally pin the formal charge,
/// and an unwritten bond matches a single or an aromatic bond.
///
/// # Examples
///
/// ```
/// use viscogroups::{Pattern, SmilesMolecule};
///
/// let anhydride = Pattern::compile("C(=O)OC=O").unwrap();
/// let mol = SmilesMolecule::parse("CC(=O)OC(C)=O").unwrap();
/// assert_eq!(anhydride.find_all(mol.mol()).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    query: Mol<QueryAtom, QueryBond>,
}

/// A motif string that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub pattern: String,
    pub source: SmilesError,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pattern '{}': {}", self.pattern, self.source)
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl Pattern {
    pub fn compile(text: &str) -> Result<Self, PatternError> {
        let graph = tokenize_nonempty(text)
            .and_then(|tokens| assemble(&tokens))
            .map_err(|source| PatternError {
                pattern: text.to_string(),
                source,
            })?;
        Ok(Self {
            text: text.to_string(),
            query: to_query(&graph),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn atom_count(&self) -> usize {
        self.query.atom_count()
    }

    /// All occurrences in `target`, one per distinct set of target atoms.
    ///
    /// Occurrences come back in discovery order, which follows ascending
    /// target atom index for the first pattern atom visited.
    pub fn find_all(&self, target: &Mol<Atom, Bond>) -> Vec<AtomMapping> {
        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        Matcher::new(target, &self.query)
            .find_all()
            .into_iter()
            .filter(|mapping| {
                let mut key = mapping.clone();
                key.sort_unstable();
                seen.insert(key)
            })
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn to_query(graph: &TokenGraph) -> Mol<QueryAtom, QueryBond> {
    let mut query = Mol::new();
    for idx in graph.atoms() {
        let tok = graph.atom(idx);
        query.add_atom(QueryAtom {
            element: tok.element,
            aromatic: tok.is_aromatic,
            charge: tok.is_bracket.then_some(tok.charge),
        });
    }
    for edge in graph.bonds() {
        if let Some((a, b)) = graph.bond_endpoints(edge) {
            let bond = match graph.bond(edge) {
                None => QueryBond::SingleOrAromatic,
                Some(BondToken::Single) | Some(BondToken::Up) | Some(BondToken::Down) => {
                    QueryBond::Exact(BondOrder::Single)
                }
                Some(BondToken::Double) => QueryBond::Exact(BondOrder::Double),
                Some(BondToken::Triple) => QueryBond::Exact(BondOrder::Triple),
                Some(BondToken::Aromatic) => QueryBond::Exact(BondOrder::Aromatic),
            };
            query.add_bond(a, b, bond);
        }
    }
    query
}

fn atom_matches(target: &Atom, query: &QueryAtom) -> bool {
    target.atomic_num == query.element.atomic_num()
        && target.is_aromatic == query.aromatic
        && query.charge.map_or(true, |c| c == target.formal_charge)
}

fn bond_matches(target: &Bond, query: &QueryBond) -> bool {
    match query {
        QueryBond::SingleOrAromatic => {
            matches!(target.order, BondOrder::Single | BondOrder::Aromatic)
        }
        QueryBond::Exact(order) => target.order == *order,
    }
}

struct Matcher<'a> {
    target: &'a Mol<Atom, Bond>,
    query: &'a Mol<QueryAtom, QueryBond>,
    /// Query atoms in visiting order, each paired with an earlier-visited
    /// neighbor whose image restricts the candidates.
    order: Vec<(NodeIndex, Option<NodeIndex>)>,
    query_map: Vec<Option<NodeIndex>>,
    target_used: Vec<bool>,
}

impl<'a> Matcher<'a> {
    fn new(target: &'a Mol<Atom, Bond>, query: &'a Mol<QueryAtom, QueryBond>) -> Self {
        Self {
            target,
            query,
            order: visiting_order(query),
            query_map: vec![None; query.atom_count()],
            target_used: vec![false; target.atom_count()],
        }
    }

    fn find_all(&mut self) -> Vec<AtomMapping> {
        let mut results = Vec::new();
        if self.query.atom_count() > 0 {
            self.recurse(0, &mut results);
        }
        results
    }

    fn recurse(&mut self, depth: usize, results: &mut Vec<AtomMapping>) {
        if depth == self.order.len() {
            let mapping = self
                .query_map
                .iter()
                .map(|t| t.map_or(usize::MAX, |t| t.index()))
                .collect();
            results.push(mapping);
            return;
        }

        let (query_node, anchor) = self.order[depth];
        let candidates: Vec<NodeIndex> = match anchor.and_then(|a| self.query_map[a.index()]) {
            Some(image) => {
                let mut nbs: Vec<NodeIndex> = self.target.neighbors(image).collect();
                nbs.sort_unstable();
                nbs
            }
            None => self.target.atoms().collect(),
        };

        for target_node in candidates {
            if self.target_used[target_node.index()] {
                continue;
            }
            if !self.is_feasible(query_node, target_node) {
                continue;
            }

            self.query_map[query_node.index()] = Some(target_node);
            self.target_used[target_node.index()] = true;

            self.recurse(depth + 1, results);

            self.query_map[query_node.index()] = None;
            self.target_used[target_node.index()] = false;
        }
    }

    fn is_feasible(&self, query_node: NodeIndex, target_node: NodeIndex) -> bool {
        if !atom_matches(self.target.atom(target_node), self.query.atom(query_node)) {
            return false;
        }
        if self.target.degree(target_node) < self.query.degree(query_node) {
            return false;
        }

        for q_neighbor in self.query.neighbors(query_node) {
            let Some(t_mapped) = self.query_map[q_neighbor.index()] else {
                continue;
            };
            let Some(q_bond) = self.query.bond_between(query_node, q_neighbor) else {
                return false;
            };
            match self.target.bond_between(target_node, t_mapped) {
                Some(t_bond) => {
                    if !bond_matches(self.target.bond(t_bond), self.query.bond(q_bond)) {
                        return false;
                    }
                }
                None => return false,
            }
        }

        true
    }
}

/// Breadth-first order over each query component, starting from its
/// highest-degree atom, so every atom after the first in a component has
/// an already-mapped neighbor.
fn visiting_order<A, B>(query: &Mol<A, B>) -> Vec<(NodeIndex, Option<NodeIndex>)> {
    let n = query.atom_count();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut roots: Vec<NodeIndex> = query.atoms().collect();
    roots.sort_by(|&a, &b| {
        query
            .degree(b)
            .cmp(&query.degree(a))
            .then_with(|| a.cmp(&b))
    });

    for root in roots {
        if visited[root.index()] {
            continue;
        }
        visited[root.index()] = true;
        order.push((root, None));
        let mut head = order.len() - 1;
        while head < order.len() {
            let (cur, _) = order[head];
            head += 1;
            let mut nbs: Vec<NodeIndex> = query.neighbors(cur).collect();
            nbs.sort_unstable();
            for nb in nbs {
                if !visited[nb.index()] {
                    visited[nb.index()] = true;
                    order.push((nb, Some(cur)));
                }
            }
        }
    }

    order
}
