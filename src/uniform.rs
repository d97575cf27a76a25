use crate::core_types::{Gene, Segment};
use crate::error::{CrossoverError, GwResult};
use fastrand::Rng;
use tracing::debug;

/// Draws at or below this value swap the gene pair; draws above it copy.
pub const SWAP_THRESHOLD: f64 = 0.5;

/// Uniform crossover driven by a caller-supplied probability array.
///
/// Split out from [`uniform`] so the decision per position can be forced
/// from the outside (deterministic tests, callers with their own entropy
/// plumbing).
pub fn uniform_with_pr(p0: &[Gene], p1: &[Gene], pr: &[f64]) -> GwResult<(Segment, Segment)> {
    if p0.len() != p1.len() {
        return Err(CrossoverError::ShapeMismatch {
            left: p0.len(),
            right: p1.len(),
        });
    }
    if pr.len() != p0.len() {
        return Err(CrossoverError::ShapeMismatch {
            left: p0.len(),
            right: pr.len(),
        });
    }

    let mut off_0 = p0.to_vec();
    let mut off_1 = p1.to_vec();

    for i in 0..p0.len() {
        if pr[i] <= SWAP_THRESHOLD {
            off_0[i] = p1[i];
            off_1[i] = p0[i];
        }
    }

    debug!("pr: {:?}", pr);
    debug!("O0: {:?}", off_0);
    debug!("O1: {:?}", off_1);

    Ok((off_0, off_1))
}

/// Uniform crossover over two left segments.
///
/// Each position independently swaps the parent genes with probability 1/2.
/// Parents are read-only; both offspring are freshly allocated.
pub fn uniform(p0: &[Gene], p1: &[Gene], rng: &mut Rng) -> GwResult<(Segment, Segment)> {
    let pr: Vec<f64> = (0..p0.len()).map(|_| rng.f64()).collect();
    uniform_with_pr(p0, p1, &pr)
}
