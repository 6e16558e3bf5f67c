//! Rayon-based parallelisation helpers.

use rayon::prelude::*;

/// Default minimum batch size before quotes are inverted in parallel.
///
/// Below this a single lattice search is cheap enough that thread
/// dispatch dominates.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Maps each item through `mapper`, in parallel when `parallel` is set.
///
/// Results are always returned in input order.
pub fn ordered_map<T, R, F>(items: &[T], parallel: bool, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if parallel {
        items.par_iter().map(&mapper).collect()
    } else {
        items.iter().map(&mapper).collect()
    }
}

/// Returns whether a batch of `n_items` should use the thread pool.
#[inline]
pub fn should_parallelize(n_items: usize, threshold: usize) -> bool {
    n_items >= threshold
}
