use crate::core_types::{Gene, Segment};
use crate::error::{CrossoverError, GwResult};
use fastrand::Rng;
use tracing::debug;

/// Merges one subportion of the right segment.
///
/// Positions flagged in `preserved` keep parent 0's value at that exact
/// position. The remaining slots are filled left to right with parent 1's
/// leftover values, in the order they appear in parent 1.
///
/// Assuming both subportions hold the same value multiset, the result is a
/// permutation of `p0_sub` (conserving the exact count of every gene,
/// duplicates included).
pub fn subportion_merge(p0_sub: &[Gene], p1_sub: &[Gene], preserved: &[bool]) -> Segment {
    let len = p0_sub.len();
    assert_eq!(len, p1_sub.len(), "Subportions must have same length");
    assert_eq!(len, preserved.len(), "Mask must cover the subportion");

    // Budget of gene values already supplied by the preserved positions.
    // Count-aware so repeated values within a subportion are consumed one
    // occurrence at a time instead of being dropped wholesale.
    let mut reserved: Vec<(Gene, usize)> = Vec::new();
    for (i, &keep) in preserved.iter().enumerate() {
        if keep {
            let gene = p0_sub[i];
            if let Some(entry) = reserved.iter_mut().find(|(g, _)| *g == gene) {
                entry.1 += 1;
            } else {
                reserved.push((gene, 1));
            }
        }
    }

    let mut offspring = vec![0; len];
    let mut p1_idx = 0;

    for i in 0..len {
        if preserved[i] {
            offspring[i] = p0_sub[i];
            continue;
        }
        // Advance to the next parent-1 value not covered by the budget.
        while p1_idx < len {
            let gene = p1_sub[p1_idx];
            p1_idx += 1;

            match reserved.iter_mut().find(|(g, c)| *g == gene && *c > 0) {
                Some(entry) => entry.1 -= 1,
                None => {
                    offspring[i] = gene;
                    break;
                }
            }
        }
    }

    offspring
}

/// Builds one MOC offspring from an explicit preserved-position set.
///
/// This is the deterministic entry point underneath [`moc`]: it takes the
/// already-sampled indices instead of drawing them, so tests and replays can
/// pin the outcome. `p0` plays the donor role (exact position and value kept
/// at every preserved index).
pub fn moc_offspring(
    p0: &[Gene],
    p1: &[Gene],
    preserved_indices: &[usize],
    subportion_starts: &[usize],
) -> GwResult<Segment> {
    if p0.len() != p1.len() {
        return Err(CrossoverError::ShapeMismatch {
            left: p0.len(),
            right: p1.len(),
        });
    }
    let n = p0.len();
    validate_subportions(subportion_starts, n)?;

    let mut is_preserved = vec![false; n];
    for &idx in preserved_indices {
        assert!(
            idx < n,
            "Preserved index {} out of range for segment length {}",
            idx,
            n
        );
        is_preserved[idx] = true;
    }

    debug!("subportion starts: {:?}", subportion_starts);
    debug!("preserved mask: {:?}", is_preserved);

    let mut offspring = Vec::with_capacity(n);
    for (k, &start) in subportion_starts.iter().enumerate() {
        let end = subportion_starts.get(k + 1).copied().unwrap_or(n);
        offspring.extend(subportion_merge(
            &p0[start..end],
            &p1[start..end],
            &is_preserved[start..end],
        ));
    }

    Ok(offspring)
}

/// Segment-wide Modified Order Crossover.
///
/// Samples `round(rate * N)` distinct positions to preserve from the donor
/// parent, merges every subportion, then repeats the whole procedure with a
/// fresh draw and the parent roles reversed. Offspring 1 is an independent
/// construction, not the complement of offspring 0.
pub fn moc(
    p0: &[Gene],
    p1: &[Gene],
    rate: f64,
    subportion_starts: &[usize],
    rng: &mut Rng,
) -> GwResult<(Segment, Segment)> {
    if p0.len() != p1.len() {
        return Err(CrossoverError::ShapeMismatch {
            left: p0.len(),
            right: p1.len(),
        });
    }
    let n = p0.len();

    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(CrossoverError::InvalidRate(format!(
            "MOC rate must lie in [0, 1], got {}",
            rate
        )));
    }
    validate_subportions(subportion_starts, n)?;

    let total_preserved = (rate * n as f64).round() as usize;
    if total_preserved > n {
        return Err(CrossoverError::InvalidRate(format!(
            "{} preserved genes exceed segment length {}",
            total_preserved, n
        )));
    }
    debug!("preserving {} of {} genes", total_preserved, n);

    let indices = sample_distinct(rng, n, total_preserved);
    let offspring_0 = moc_offspring(p0, p1, &indices, subportion_starts)?;

    let indices = sample_distinct(rng, n, total_preserved);
    let offspring_1 = moc_offspring(p1, p0, &indices, subportion_starts)?;

    Ok((offspring_0, offspring_1))
}

/// Samples `amount` distinct positions from `0..n`, uniformly without
/// replacement.
fn sample_distinct(rng: &mut Rng, n: usize, amount: usize) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..n).collect();
    rng.shuffle(&mut positions);
    positions.truncate(amount);
    positions
}

fn validate_subportions(starts: &[usize], n: usize) -> GwResult<()> {
    let first = match starts.first() {
        Some(&first) => first,
        None => {
            return Err(CrossoverError::InvalidSubportions(
                "subportion starts must not be empty".to_string(),
            ))
        }
    };
    if first != 0 {
        return Err(CrossoverError::InvalidSubportions(format!(
            "first subportion must start at 0, got {}",
            first
        )));
    }
    for pair in starts.windows(2) {
        if pair[1] <= pair[0] {
            return Err(CrossoverError::InvalidSubportions(format!(
                "starts must be strictly increasing, got {} then {}",
                pair[0], pair[1]
            )));
        }
    }
    // Strictly increasing, so only the last offset can run past the end.
    if let Some(&last) = starts.last() {
        if last >= n {
            return Err(CrossoverError::InvalidSubportions(format!(
                "start {} out of range for segment length {}",
                last, n
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn get_sorted(segment: &[Gene]) -> Vec<Gene> {
        let mut v = segment.to_vec();
        v.sort();
        v
    }

    #[test]
    fn test_merge_conservation_basic() {
        let p0 = vec![1, 2, 3, 4, 5];
        let p1 = vec![5, 4, 3, 2, 1];
        let preserved = vec![true, false, true, false, false];

        let child = subportion_merge(&p0, &p1, &preserved);
        assert_eq!(child.len(), 5);
        assert_eq!(get_sorted(&child), vec![1, 2, 3, 4, 5], "Mass not conserved!");
        assert_eq!(child[0], 1);
        assert_eq!(child[2], 3);
    }

    #[test]
    fn test_merge_with_duplicates() {
        // Two 0s in each subportion; the count budget must keep exactly two.
        let p0 = vec![7, 0, 0, 8, 9];
        let p1 = vec![0, 9, 8, 7, 0];
        let preserved = vec![false, true, false, true, false];

        let child = subportion_merge(&p0, &p1, &preserved);
        assert_eq!(child[1], 0);
        assert_eq!(child[3], 8);
        assert_eq!(get_sorted(&child), vec![0, 0, 7, 8, 9], "Mass lost");
    }

    #[test]
    fn test_merge_keeps_p1_relative_order() {
        let p0 = vec![8, 6, 5, 7];
        let p1 = vec![6, 7, 8, 5];
        let preserved = vec![false, true, true, false];

        // 6 and 5 come from p0; 7 then 8 fill the gaps in p1 order.
        assert_eq!(subportion_merge(&p0, &p1, &preserved), vec![7, 6, 5, 8]);
    }

    #[test]
    fn test_sample_distinct_is_distinct() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..50 {
            let mut picked = sample_distinct(&mut rng, 20, 8);
            assert_eq!(picked.len(), 8);
            picked.sort();
            picked.dedup();
            assert_eq!(picked.len(), 8, "Sampled positions repeat");
            assert!(picked.iter().all(|&i| i < 20));
        }
    }

    #[test]
    fn test_subportion_validation() {
        assert!(validate_subportions(&[0], 8).is_ok());
        assert!(validate_subportions(&[0, 4], 8).is_ok());
        assert!(validate_subportions(&[], 8).is_err());
        assert!(validate_subportions(&[1, 4], 8).is_err());
        assert!(validate_subportions(&[0, 4, 4], 8).is_err());
        assert!(validate_subportions(&[0, 8], 8).is_err());
        assert!(validate_subportions(&[0], 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_merge_conserves_mass(
            seed in any::<u64>(),
            mask in proptest::collection::vec(any::<bool>(), 8)
        ) {
            let mut rng = Rng::with_seed(seed);
            let p0 = vec![10, 20, 30, 40, 50, 60, 70, 80];
            let mut p1 = p0.clone();
            rng.shuffle(&mut p1);

            let child = subportion_merge(&p0, &p1, &mask);

            prop_assert_eq!(
                get_sorted(&child),
                get_sorted(&p0),
                "Child genes differ from parent genes"
            );
            for (i, &keep) in mask.iter().enumerate() {
                if keep {
                    prop_assert_eq!(child[i], p0[i], "Preserved position {} rewritten", i);
                }
            }
        }

        #[test]
        fn prop_moc_conserves_every_subportion(
            seed in any::<u64>(),
            rate in 0.0..=1.0f64
        ) {
            let mut rng = Rng::with_seed(seed);
            let mut p0: Vec<Gene> = (0..12).collect();
            let mut p1 = p0.clone();
            let starts = [0usize, 5, 9];

            // Shuffle within each subportion so the per-subportion
            // multisets stay identical between parents.
            for k in 0..starts.len() {
                let end = if k + 1 < starts.len() { starts[k + 1] } else { 12 };
                rng.shuffle(&mut p0[starts[k]..end]);
                rng.shuffle(&mut p1[starts[k]..end]);
            }

            let (o0, o1) = moc(&p0, &p1, rate, &starts, &mut rng).unwrap();

            for k in 0..starts.len() {
                let end = if k + 1 < starts.len() { starts[k + 1] } else { 12 };
                prop_assert_eq!(
                    get_sorted(&o0[starts[k]..end]),
                    get_sorted(&p0[starts[k]..end])
                );
                prop_assert_eq!(
                    get_sorted(&o1[starts[k]..end]),
                    get_sorted(&p1[starts[k]..end])
                );
            }
        }
    }
}
