use std::collections::BTreeSet;

/// A fused, bridged or (optionally) spiro-joined group of ring atoms.
pub type RingSystem = BTreeSet<usize>;

/// Merges elementary rings into ring systems.
///
/// Rings are taken in the order given. Each new ring absorbs every system
/// collected so far that shares at least two atoms with it (one atom when
/// `include_spiro` is set). A ring that grows can come to overlap a system
/// it was already tested against, so kept systems are then merged pairwise
/// until no two of them meet the threshold. The systems returned never
/// share enough atoms to merge, and merging them again changes nothing.
pub fn merge_ring_systems<R>(rings: &[R], include_spiro: bool) -> Vec<RingSystem>
where
    R: AsRef<[usize]>,
{
    let joins = |a: &RingSystem, b: &RingSystem| {
        let shared = a.intersection(b).count();
        shared > 1 || (include_spiro && shared == 1)
    };

    let mut systems: Vec<RingSystem> = Vec::new();
    for ring in rings {
        let mut merged: RingSystem = ring.as_ref().iter().copied().collect();
        let mut kept = Vec::with_capacity(systems.len() + 1);
        for system in systems {
            if joins(&merged, &system) {
                merged.extend(system);
            } else {
                kept.push(system);
            }
        }
        kept.push(merged);
        systems = kept;
    }

    while let Some((i, j)) = find_joinable(&systems, joins) {
        let absorbed = systems.remove(j);
        systems[i].extend(absorbed);
    }
    systems
}

fn find_joinable(
    systems: &[RingSystem],
    joins: impl Fn(&RingSystem, &RingSystem) -> bool,
) -> Option<(usize, usize)> {
    (0..systems.len())
        .flat_map(|i| (i + 1..systems.len()).map(move |j| (i, j)))
        .find(|&(i, j)| joins(&systems[i], &systems[j]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::{MoleculeGraph, SmilesMolecule};

    fn set(atoms: &[usize]) -> RingSystem {
        atoms.iter().copied().collect()
    }

    fn systems_of(smiles: &str, include_spiro: bool) -> Vec<RingSystem> {
        let mol = SmilesMolecule::parse(smiles).unwrap();
        merge_ring_systems(mol.elementary_rings(), include_spiro)
    }

    #[test]
    fn no_rings_no_systems() {
        assert!(merge_ring_systems::<Vec<usize>>(&[], false).is_empty());
        assert!(systems_of("CCCC", false).is_empty());
    }

    #[test]
    fn fused_rings_merge() {
        let systems = systems_of("c1ccc2ccccc2c1", false);
        assert_eq!(systems, vec![(0..10).collect::<RingSystem>()]);
    }

    #[test]
    fn bridged_rings_merge() {
        let systems = systems_of("C1CC2CC1CC2", false);
        assert_eq!(systems.len(), 1);
        assert_eq!(systems[0].len(), 7);
    }

    #[test]
    fn linked_rings_stay_apart() {
        let systems = systems_of("c1ccc(cc1)-c1ccccc1", false);
        assert_eq!(systems, vec![set(&[0, 1, 2, 3, 4, 5]), set(&[6, 7, 8, 9, 10, 11])]);
    }

    #[test]
    fn spiro_join_depends_on_switch() {
        assert_eq!(systems_of("C1CCC2(CC1)CCC2", false).len(), 2);
        assert_eq!(systems_of("C1CCC2(CC1)CCC2", true).len(), 1);
    }

    #[test]
    fn ring_absorbs_every_overlapping_system() {
        let rings = [vec![0, 1, 2], vec![5, 6, 7], vec![1, 2, 5, 6]];
        let systems = merge_ring_systems(&rings, false);
        assert_eq!(systems, vec![set(&[0, 1, 2, 5, 6, 7])]);
    }

    const ORDERS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    fn remerge(systems: &[RingSystem], include_spiro: bool) -> Vec<RingSystem> {
        let as_rings: Vec<Vec<usize>> = systems
            .iter()
            .map(|s| s.iter().copied().collect())
            .collect();
        merge_ring_systems(&as_rings, include_spiro)
    }

    #[test]
    fn pairwise_overlap_closes_in_every_order() {
        let rings = [vec![0, 1, 2, 3], vec![3, 4, 5, 6], vec![1, 2, 4, 9]];
        for order in ORDERS {
            let permuted: Vec<Vec<usize>> = order.iter().map(|&i| rings[i].clone()).collect();
            let systems = merge_ring_systems(&permuted, false);
            assert_eq!(systems, vec![set(&[0, 1, 2, 3, 4, 5, 6, 9])], "order {order:?}");
            assert_eq!(remerge(&systems, false), systems, "order {order:?}");
        }
    }

    #[test]
    fn late_growth_pulls_in_a_passed_system() {
        let systems = merge_ring_systems(&[[3, 4, 5, 6], [0, 1, 2, 3], [1, 2, 4, 9]], false);
        assert_eq!(systems, vec![set(&[0, 1, 2, 3, 4, 5, 6, 9])]);
    }

    #[test]
    fn kept_systems_never_meet_the_threshold() {
        let rings = [
            vec![0, 1, 2, 3],
            vec![3, 10, 11, 12],
            vec![12, 13, 14],
            vec![13, 14, 15, 16],
            vec![20, 21, 22],
        ];
        for spiro in [false, true] {
            let systems = merge_ring_systems(&rings, spiro);
            for (i, a) in systems.iter().enumerate() {
                for b in &systems[i + 1..] {
                    let shared = a.intersection(b).count();
                    assert!(shared < if spiro { 1 } else { 2 }, "{a:?} and {b:?}");
                }
            }
            assert_eq!(remerge(&systems, spiro), systems);
        }
    }

    #[test]
    fn disjoint_rings_are_order_independent() {
        let a = vec![0, 1, 2];
        let b = vec![3, 4, 5];
        let c = vec![6, 7, 8];
        let mut one = merge_ring_systems(&[a.clone(), b.clone(), c.clone()], false);
        let mut two = merge_ring_systems(&[c, a, b], false);
        one.sort();
        two.sort();
        assert_eq!(one, two);
    }

    #[test]
    fn merging_is_idempotent_on_real_molecules() {
        for smiles in [
            "c1ccc2ccccc2c1",
            "c1ccc2cc3ccccc3cc2c1",
            "C1CC2CC1CC2",
            "C12C3C4C1C5C3C4C25",
            "c1ccc(cc1)-c1ccccc1",
            "C1CCc2ccccc2C1",
        ] {
            let once = systems_of(smiles, false);
            assert_eq!(remerge(&once, false), once, "{smiles}");
        }
    }
}
