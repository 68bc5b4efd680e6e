use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::mol::Mol;

/// All-pairs topological distance, in bonds.
///
/// `distance(i, j) == Some(1)` means `i` and `j` are directly bonded;
/// atoms in different connected components have no distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<Option<u32>>,
}

impl DistanceMatrix {
    pub fn from_mol<A, B>(mol: &Mol<A, B>) -> Self {
        let n = mol.atom_count();
        let mut cells = vec![None; n * n];
        for src in 0..n {
            let row = &mut cells[src * n..(src + 1) * n];
            row[src] = Some(0);
            let mut queue = VecDeque::from([src]);
            while let Some(cur) = queue.pop_front() {
                let d = row[cur].unwrap_or(0);
                for nb in mol.neighbors(NodeIndex::new(cur)) {
                    if row[nb.index()].is_none() {
                        row[nb.index()] = Some(d + 1);
                        queue.push_back(nb.index());
                    }
                }
            }
        }
        Self { n, cells }
    }

    /// Builds a matrix from explicit rows; `None` marks unreachable pairs.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square matrix.
    pub fn from_rows(rows: Vec<Vec<Option<u32>>>) -> Self {
        let n = rows.len();
        assert!(rows.iter().all(|r| r.len() == n), "distance matrix must be square");
        Self {
            n,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn distance(&self, i: usize, j: usize) -> Option<u32> {
        self.cells[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[Option<u32>] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    /// Atoms exactly `d` bonds away from `i`, in index order.
    pub fn atoms_at(&self, i: usize, d: u32) -> impl Iterator<Item = usize> + '_ {
        self.row(i)
            .iter()
            .enumerate()
            .filter(move |(_, cell)| **cell == Some(d))
            .map(|(j, _)| j)
    }

    /// Number of atoms directly bonded to `i`.
    pub fn neighbor_count(&self, i: usize) -> usize {
        self.atoms_at(i, 1).count()
    }
}
