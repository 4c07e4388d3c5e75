//! Uniform sampling of diagnostics.
//!
//! When the caller asks to checkpoint only a subset of a large error set,
//! we draw that subset uniformly at random, without replacement. Selection
//! order carries no meaning; the grouper re-orders everything anyway.

use std::collections::HashSet;

use rand::Rng;

/// Draw `n` distinct elements from `items`, uniformly at random.
///
/// Precondition: `n <= items.len()`. The caller guards this; violating it
/// is a bug, not a recoverable condition.
pub fn sample<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    sample_with(&mut rand::rng(), items, n)
}

/// [`sample`] with an explicit RNG, for deterministic tests.
pub fn sample_with<R: Rng, T: Clone>(rng: &mut R, items: &[T], n: usize) -> Vec<T> {
    assert!(n <= items.len(), "sample size {n} exceeds population {}", items.len());

    let mut selected = Vec::with_capacity(n);
    let mut indices = HashSet::with_capacity(n);

    // Rejection sampling: fine for n close to items.len() at the scale of
    // a tsc error report.
    while indices.len() < n {
        let index = rng.random_range(0..items.len());
        if indices.insert(index) {
            selected.push(items[index].clone());
        }
    }

    selected
}
