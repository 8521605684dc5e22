// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Data-parallel execution of per-particle phases
//!
//! Every phase of a step is a flat fan-out over the particle index range:
//! map a read-only slice to one result per particle, or mutate each
//! particle in place. [`Executor`] runs such a fan-out according to an
//! injected [`ParallelConfig`], on a dedicated Rayon pool when a worker
//! count is given and on the global pool otherwise. Each call returns only
//! after every item has been processed, which is the barrier between the
//! acceleration phase and the update phase.
//!
//! # Scheduling
//!
//! - [`Schedule::Static`]: the slice is cut into fixed contiguous blocks,
//!   one per worker unless a chunk size is given.
//! - [`Schedule::Dynamic`]: work-stealing splitting with a minimum chunk
//!   length, for unbalanced workloads.
//! - [`Schedule::Sequential`]: plain iteration on the calling thread.
//!
//! Configuration is never read from process state by the engine itself.
//! [`ParallelConfig::from_env`] is a convenience for binaries; tests use
//! [`ParallelConfig::from_lookup`] with their own key source.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::Arc;

/// Variable holding the worker count for [`ParallelConfig::from_env`]
pub const THREADS_VAR: &str = "NBODY_NUM_THREADS";

/// Variable holding the schedule, e.g. `static` or `dynamic,64`
pub const SCHEDULE_VAR: &str = "NBODY_SCHEDULE";

/// Variable holding the inner-loop reduction threshold
pub const INNER_REDUCTION_VAR: &str = "NBODY_INNER_REDUCTION";

/// How a fan-out is partitioned across workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Single-threaded iteration
    Sequential,
    /// Fixed contiguous blocks
    Static,
    /// Work stealing with a minimum chunk length
    #[default]
    Dynamic,
}

impl FromStr for Schedule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "serial" => Ok(Schedule::Sequential),
            "static" => Ok(Schedule::Static),
            "dynamic" | "guided" => Ok(Schedule::Dynamic),
            _ => Err(ConfigError::InvalidSchedule(s.to_string())),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Schedule::Sequential => "sequential",
            Schedule::Static => "static",
            Schedule::Dynamic => "dynamic",
        };
        f.write_str(name)
    }
}

/// Worker and scheduling configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of workers for a dedicated pool (0 = use the global pool)
    pub threads: usize,
    /// Partitioning policy
    pub schedule: Schedule,
    /// Items per chunk (0 = derive from the worker count)
    pub chunk_size: usize,
    /// Collections at least this large also split each particle's inner
    /// sum over its partners into per-worker partial sums (0 = never)
    pub inner_reduction_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            threads: 0,
            schedule: Schedule::Dynamic,
            chunk_size: 0,
            inner_reduction_threshold: 0,
        }
    }
}

impl ParallelConfig {
    /// Configuration that runs everything on the calling thread
    pub fn sequential() -> Self {
        ParallelConfig {
            threads: 1,
            schedule: Schedule::Sequential,
            ..Self::default()
        }
    }

    /// Set the worker count
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the partitioning policy
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Set the chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the inner-loop reduction threshold
    pub fn with_inner_reduction_threshold(mut self, threshold: usize) -> Self {
        self.inner_reduction_threshold = threshold;
        self
    }

    /// Build a configuration from a key lookup
    ///
    /// Missing keys keep their default. Recognised keys are [`THREADS_VAR`],
    /// [`SCHEDULE_VAR`] and [`INNER_REDUCTION_VAR`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ParallelConfig::default();

        if let Some(value) = lookup(THREADS_VAR) {
            config.threads = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidThreadCount(value.clone()))?;
        }

        if let Some(value) = lookup(SCHEDULE_VAR) {
            let (kind, chunk) = match value.split_once(',') {
                Some((kind, chunk)) => (kind, Some(chunk)),
                None => (value.as_str(), None),
            };
            config.schedule = kind
                .parse()
                .map_err(|_| ConfigError::InvalidSchedule(value.clone()))?;
            if let Some(chunk) = chunk {
                config.chunk_size = chunk
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidSchedule(value.clone()))?;
            }
        }

        if let Some(value) = lookup(INNER_REDUCTION_VAR) {
            config.inner_reduction_threshold = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidThreshold(value.clone()))?;
        }

        Ok(config)
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Runs per-particle fan-outs according to a [`ParallelConfig`]
#[derive(Debug, Clone, Default)]
pub struct Executor {
    config: ParallelConfig,
    #[cfg(feature = "parallel")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Executor {
    /// Create an executor, building a dedicated pool when `threads > 0`
    pub fn new(config: ParallelConfig) -> Result<Self, ConfigError> {
        #[cfg(feature = "parallel")]
        {
            let pool = if config.threads > 0 && config.schedule != Schedule::Sequential {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(config.threads)
                    .thread_name(|index| format!("nbody-worker-{}", index))
                    .build()
                    .map_err(|e| ConfigError::ThreadPool(e.to_string()))?;
                log::debug!(
                    "Built dedicated pool with {} workers ({} schedule)",
                    config.threads,
                    config.schedule
                );
                Some(Arc::new(pool))
            } else {
                None
            };
            Ok(Executor { config, pool })
        }

        #[cfg(not(feature = "parallel"))]
        {
            Ok(Executor { config })
        }
    }

    /// Executor that never leaves the calling thread
    pub fn sequential() -> Self {
        Executor {
            config: ParallelConfig::sequential(),
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    /// Configuration this executor was built from
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Number of workers a fan-out may use
    ///
    /// Returns 1 for the sequential schedule or when the parallel feature is
    /// disabled.
    pub fn thread_count(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            if self.config.schedule == Schedule::Sequential {
                return 1;
            }
            self.pool
                .as_ref()
                .map(|pool| pool.current_num_threads())
                .unwrap_or_else(rayon::current_num_threads)
        }
        #[cfg(not(feature = "parallel"))]
        {
            1
        }
    }

    /// Check if fan-outs run on more than the calling thread
    pub fn is_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.config.schedule != Schedule::Sequential
    }

    /// Effective chunk length for a fan-out over `len` items
    pub fn chunk_size(&self, len: usize) -> usize {
        if self.config.chunk_size > 0 {
            return self.config.chunk_size;
        }
        let threads = self.thread_count().max(1);
        match self.config.schedule {
            Schedule::Static => ((len + threads - 1) / threads).max(1),
            // Aim for at least 4 chunks per worker for load balancing
            _ => (len / (threads * 4)).max(1),
        }
    }

    /// Run `op` inside this executor's pool
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        #[cfg(feature = "parallel")]
        {
            match &self.pool {
                Some(pool) => pool.install(op),
                None => op(),
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            op()
        }
    }

    /// Map every item to a result, preserving order
    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            let chunk = self.chunk_size(items.len());
            match self.config.schedule {
                Schedule::Sequential => items.iter().map(f).collect(),
                Schedule::Static => self.install(|| {
                    items
                        .par_chunks(chunk)
                        .flat_map_iter(|block| block.iter().map(&f))
                        .collect()
                }),
                Schedule::Dynamic => self.install(|| {
                    items.par_iter().with_min_len(chunk).map(&f).collect()
                }),
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            items.iter().map(f).collect()
        }
    }

    /// Apply `f` to every item in place
    pub fn for_each_mut<T, F>(&self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            let chunk = self.chunk_size(items.len());
            match self.config.schedule {
                Schedule::Sequential => items.iter_mut().for_each(f),
                Schedule::Static => self.install(|| {
                    items
                        .par_chunks_mut(chunk)
                        .for_each(|block| block.iter_mut().for_each(&f))
                }),
                Schedule::Dynamic => self.install(|| {
                    items.par_iter_mut().with_min_len(chunk).for_each(&f)
                }),
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            items.iter_mut().for_each(f)
        }
    }

    /// Apply `f` to every item in place together with its partner in `inputs`
    ///
    /// # Panics
    ///
    /// Panics if `items` and `inputs` differ in length
    pub fn for_each_zip_mut<T, U, F>(&self, items: &mut [T], inputs: &[U], f: F)
    where
        T: Send,
        U: Sync,
        F: Fn(&mut T, &U) + Sync + Send,
    {
        assert_eq!(
            items.len(),
            inputs.len(),
            "Zipped fan-out requires equal lengths"
        );
        #[cfg(feature = "parallel")]
        {
            let chunk = self.chunk_size(items.len());
            match self.config.schedule {
                Schedule::Sequential => {
                    items.iter_mut().zip(inputs).for_each(|(item, input)| f(item, input))
                }
                Schedule::Static => self.install(|| {
                    items
                        .par_chunks_mut(chunk)
                        .zip(inputs.par_chunks(chunk))
                        .for_each(|(block, block_inputs)| {
                            block
                                .iter_mut()
                                .zip(block_inputs)
                                .for_each(|(item, input)| f(item, input))
                        })
                }),
                Schedule::Dynamic => self.install(|| {
                    items
                        .par_iter_mut()
                        .zip(inputs.par_iter())
                        .with_min_len(chunk)
                        .for_each(|(item, input)| f(item, input))
                }),
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            items.iter_mut().zip(inputs).for_each(|(item, input)| f(item, input))
        }
    }
}
