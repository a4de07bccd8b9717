//! Rayon-based parallelisation utilities.
//!
//! Work is split only above a size threshold, and every helper preserves
//! input order so parallel and sequential runs produce identical output.

use rayon::prelude::*;

/// Minimum number of items handed to one rayon task.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Item count from which work is spread across threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Batch size for chunked processing
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Always runs on the calling thread.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Maps each item through `mapper`, keeping input order.
    ///
    /// Runs on rayon in batches of at least `batch_size` once the
    /// threshold is reached, sequentially otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_risk::parallel::ParallelConfig;
    ///
    /// let items: Vec<u32> = (0..20_000).collect();
    /// let doubled = ParallelConfig::default().map(&items, |&x| x * 2);
    /// assert_eq!(doubled[12_345], 24_690);
    /// ```
    pub fn map<T, R, F>(&self, items: &[T], mapper: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.should_parallelize(items.len()) {
            items
                .par_iter()
                .with_min_len(self.batch_size)
                .map(mapper)
                .collect()
        } else {
            items.iter().map(mapper).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::new(16, 100);
        assert!(!config.should_parallelize(50));
        assert!(config.should_parallelize(100));
        assert!(config.should_parallelize(1000));
        assert!(!ParallelConfig::sequential().should_parallelize(usize::MAX - 1));
    }

    #[test]
    fn test_zero_batch_size_clamped() {
        assert_eq!(ParallelConfig::new(0, 10).batch_size, 1);
    }

    #[test]
    fn test_map_preserves_order_both_ways() {
        let items: Vec<f64> = (0..5_000).map(|i| i as f64 * 0.5).collect();
        let f = |x: &f64| (x * 1.1).sin();

        let parallel = ParallelConfig::new(64, 1).map(&items, f);
        let sequential = ParallelConfig::sequential().map(&items, f);

        assert_eq!(parallel, sequential);
    }
}
