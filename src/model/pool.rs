//! Bounded worker pool for candidate evaluation.
//!
//! One decision submits a handful of independent, read-only evaluations
//! (draw 1/2/3, one take per opponent) and waits for all of them. Results
//! come back in submission order. If any evaluation fails, the whole batch
//! fails.

use rayon::prelude::*;

use crate::core::{Result, RulesConfig};

/// Fixed-size thread pool shared by the evaluation models.
///
/// Cheap to share behind an `Arc`; every strategy at a table can use the
/// same pool since only one decision is in flight at a time.
#[derive(Debug)]
pub struct EvaluationPool {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl EvaluationPool {
    /// Create a pool with `threads` workers (at least one).
    pub fn new(threads: usize) -> Result<Self> {
        let threads = threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("rummy-eval-{}", i))
            .build()?;
        Ok(Self { pool, threads })
    }

    /// Create a pool sized from the rules.
    pub fn from_rules(rules: &RulesConfig) -> Result<Self> {
        Self::new(rules.worker_threads)
    }

    /// Number of worker threads.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run `eval` on every task in parallel and collect the results in task
    /// order. Fails with the first error encountered.
    pub fn evaluate<T, R, F>(&self, tasks: Vec<T>, eval: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R> + Sync + Send,
    {
        self.pool
            .install(|| tasks.into_par_iter().map(&eval).collect::<Result<Vec<R>>>())
    }
}
