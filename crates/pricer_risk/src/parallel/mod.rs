//! Parallel execution for portfolio runs.
//!
//! Two substrates are available:
//!
//! - Rayon helpers ([`parallel_map`], [`parallel_sum`]) for data-parallel
//!   work on the global rayon pool
//! - A fixed-size [`TaskScheduler`] with a FIFO queue, paired with a
//!   [`TaskGroup`] barrier for waiting on a batch of submitted tasks
//!
//! Tasks submitted to the scheduler must not wait on a [`TaskGroup`] fed by
//! the same scheduler; with every worker blocked the queue never drains.

mod group;
mod scheduler;

pub use group::TaskGroup;
pub use scheduler::{SchedulerError, TaskScheduler};

use rayon::prelude::*;

/// Parallel map preserving input order.
///
/// # Arguments
///
/// * `items` - Slice of items to process
/// * `mapper` - Function to apply to each item
///
/// # Returns
///
/// Vector of mapped results, index-aligned with `items`.
pub fn parallel_map<T, R, F>(items: &[T], mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items.par_iter().map(mapper).collect()
}

/// Parallel sum of values.
pub fn parallel_sum<T, F>(items: &[T], extractor: F) -> f64
where
    T: Sync,
    F: Fn(&T) -> f64 + Sync + Send,
{
    items.par_iter().map(extractor).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_map_keeps_order() {
        let items: Vec<i32> = (0..100).collect();
        let doubled: Vec<i32> = parallel_map(&items, |&x| x * 2);

        assert_eq!(doubled.len(), 100);
        assert_eq!(doubled[50], 100);
        assert!(doubled.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parallel_sum() {
        let items: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sum = parallel_sum(&items, |&x| x);
        assert_eq!(sum, 15.0);
    }
}
