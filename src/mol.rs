use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Undirected molecular graph with user-chosen atom and bond payloads.
///
/// Node indices are dense and stable: atoms are never removed in place, so
/// `NodeIndex::index()` doubles as the atom index every other module uses.
#[derive(Debug, Clone)]
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Builds a new molecule keeping only the atoms for which `keep` is true.
    ///
    /// Surviving atoms are renumbered densely in their original order;
    /// bonds touching a dropped atom are dropped with it.
    pub fn retain_atoms(&self, mut keep: impl FnMut(NodeIndex, &A) -> bool) -> Mol<A, B>
    where
        A: Clone,
        B: Clone,
    {
        let mut out = Mol::new();
        let mut remap: Vec<Option<NodeIndex>> = vec![None; self.atom_count()];
        for idx in self.atoms() {
            if keep(idx, self.atom(idx)) {
                remap[idx.index()] = Some(out.add_atom(self.atom(idx).clone()));
            }
        }
        for edge in self.bonds() {
            if let Some((a, b)) = self.bond_endpoints(edge) {
                if let (Some(na), Some(nb)) = (remap[a.index()], remap[b.index()]) {
                    out.add_bond(na, nb, self.bond(edge).clone());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn chain(len: usize) -> Mol<u8, ()> {
        let mut mol = Mol::new();
        for i in 0..len {
            mol.add_atom(i as u8);
        }
        for i in 1..len {
            mol.add_bond(n(i - 1), n(i), ());
        }
        mol
    }

    #[test]
    fn counts_and_degree() {
        let mol = chain(4);
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.bond_count(), 3);
        assert_eq!(mol.degree(n(0)), 1);
        assert_eq!(mol.degree(n(1)), 2);
        assert!(mol.bond_between(n(1), n(2)).is_some());
        assert!(mol.bond_between(n(0), n(2)).is_none());
    }

    #[test]
    fn retain_renumbers_densely() {
        let mol = chain(4);
        let trimmed = mol.retain_atoms(|idx, _| idx.index() != 1);
        assert_eq!(trimmed.atom_count(), 3);
        assert_eq!(trimmed.bond_count(), 1);
        assert_eq!(*trimmed.atom(n(1)), 2);
        assert!(trimmed.bond_between(n(1), n(2)).is_some());
    }
}
