use std::collections::VecDeque;

use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;

use crate::mol::Mol;

/// Smallest set of smallest rings (SSSR) of a molecule.
///
/// Each ring is a cycle of atom indices, rotated to start at its smallest
/// index. Rings are sorted by size, then lexicographically, so the order is
/// stable for a given atom numbering.
#[derive(Debug, Clone, Default)]
pub struct RingInfo {
    rings: Vec<Vec<usize>>,
}

impl RingInfo {
    pub fn sssr<A, B>(mol: &Mol<A, B>) -> Self {
        let num_expected = Self::expected_ring_count(mol);
        if num_expected == 0 {
            return Self::default();
        }

        let candidates = horton_candidates(mol);
        let mut basis: Vec<Vec<u64>> = Vec::with_capacity(num_expected);
        let mut rings = Vec::with_capacity(num_expected);

        for ring in &candidates {
            if rings.len() >= num_expected {
                break;
            }
            let bv = ring_to_edge_bitvector(ring, mol);
            if bv.iter().all(|&w| w == 0) {
                continue;
            }
            if try_add_to_basis(&mut basis, bv) {
                rings.push(normalize_ring(ring));
            }
        }

        rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        Self { rings }
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn rings(&self) -> &[Vec<usize>] {
        &self.rings
    }

    pub fn is_ring_atom(&self, atom: usize) -> bool {
        self.rings.iter().any(|ring| ring.contains(&atom))
    }

    pub fn is_ring_bond(&self, a: usize, b: usize) -> bool {
        self.rings.iter().any(|ring| {
            let len = ring.len();
            (0..len).any(|i| {
                let j = (i + 1) % len;
                (ring[i] == a && ring[j] == b) || (ring[i] == b && ring[j] == a)
            })
        })
    }

    /// Cyclomatic number: bonds − atoms + connected components.
    pub fn expected_ring_count<A, B>(mol: &Mol<A, B>) -> usize {
        let v = mol.atom_count();
        let e = mol.bond_count();
        let c = connected_components(mol.graph());
        (e + c).saturating_sub(v)
    }
}

/// Shortest-path tree rooted at one atom.
struct BfsTree {
    dist: Vec<Option<usize>>,
    pred: Vec<Option<usize>>,
}

impl BfsTree {
    fn new<A, B>(mol: &Mol<A, B>, root: usize) -> Self {
        let n = mol.atom_count();
        let mut dist = vec![None; n];
        let mut pred = vec![None; n];
        dist[root] = Some(0);
        let mut queue = VecDeque::from([root]);
        while let Some(cur) = queue.pop_front() {
            let d = dist[cur].unwrap_or(0);
            for nb in mol.neighbors(NodeIndex::new(cur)) {
                let nb = nb.index();
                if dist[nb].is_none() {
                    dist[nb] = Some(d + 1);
                    pred[nb] = Some(cur);
                    queue.push_back(nb);
                }
            }
        }
        Self { dist, pred }
    }

    fn path_from_root(&self, dst: usize) -> Vec<usize> {
        let mut path = vec![dst];
        let mut cur = dst;
        while let Some(p) = self.pred[cur] {
            path.push(p);
            cur = p;
        }
        path.reverse();
        path
    }
}

/// Horton's candidate cycles: for every root `w` and bond `(u, v)`, the
/// cycle formed by the shortest paths `w→u`, `w→v` and the bond itself.
fn horton_candidates<A, B>(mol: &Mol<A, B>) -> Vec<Vec<usize>> {
    let trees: Vec<BfsTree> = (0..mol.atom_count()).map(|w| BfsTree::new(mol, w)).collect();
    let mut candidates: Vec<Vec<usize>> = Vec::new();

    for edge in mol.bonds() {
        let Some((u, v)) = mol.bond_endpoints(edge) else {
            continue;
        };
        let (u, v) = (u.index(), v.index());
        for tree in &trees {
            let (Some(du), Some(dv)) = (tree.dist[u], tree.dist[v]) else {
                continue;
            };
            if du + dv + 1 < 3 {
                continue;
            }
            let path_u = tree.path_from_root(u);
            let path_v = tree.path_from_root(v);
            if path_u[1..].iter().any(|node| path_v[1..].contains(node)) {
                continue;
            }
            let mut ring = path_u;
            ring.extend(path_v[1..].iter().rev());
            candidates.push(ring);
        }
    }

    candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    candidates.dedup();
    candidates
}

fn ring_to_edge_bitvector<A, B>(ring: &[usize], mol: &Mol<A, B>) -> Vec<u64> {
    let mut bv = vec![0u64; mol.bond_count().div_ceil(64)];
    let len = ring.len();
    for i in 0..len {
        let a = NodeIndex::new(ring[i]);
        let b = NodeIndex::new(ring[(i + 1) % len]);
        if let Some(edge) = mol.bond_between(a, b) {
            let idx = edge.index();
            bv[idx / 64] |= 1u64 << (idx % 64);
        }
    }
    bv
}

/// Gaussian elimination over GF(2); returns false if `candidate` is a
/// combination of rings already in the basis.
fn try_add_to_basis(basis: &mut Vec<Vec<u64>>, candidate: Vec<u64>) -> bool {
    let mut v = candidate;
    for row in basis.iter() {
        if let Some(p) = leading_bit(row) {
            if v[p / 64] & (1u64 << (p % 64)) != 0 {
                for (aw, bw) in v.iter_mut().zip(row.iter()) {
                    *aw ^= *bw;
                }
            }
        }
    }
    if v.iter().all(|&w| w == 0) {
        return false;
    }
    basis.push(v);
    true
}

fn leading_bit(bv: &[u64]) -> Option<usize> {
    for (i, &word) in bv.iter().enumerate() {
        if word != 0 {
            return Some(i * 64 + word.trailing_zeros() as usize);
        }
    }
    None
}

fn normalize_ring(ring: &[usize]) -> Vec<usize> {
    let Some(min_pos) = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, idx)| idx)
        .map(|(i, _)| i)
    else {
        return vec![];
    };

    let len = ring.len();
    let mut normalized: Vec<usize> = (0..len).map(|i| ring[(min_pos + i) % len]).collect();
    if len > 2 && normalized[1] > normalized[len - 1] {
        normalized[1..].reverse();
    }
    normalized
}
