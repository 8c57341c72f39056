//! Seeded random allocate/free workloads.
//!
//! A [`Workload`] owns a `ChaCha8Rng` and the set of pointers it has
//! allocated but not yet freed. Each [`Workload::step`] either allocates
//! a random size or frees a random live pointer, so the same seed always
//! replays the same sequence against the same allocator.

use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tagheap_core::{BlockAllocator, PayloadPtr};

/// Parameters for a random workload.
#[derive(Clone, Debug)]
pub struct WorkloadConfig {
    /// RNG seed.
    pub seed: u64,
    /// Smallest payload size requested.
    pub min_size: usize,
    /// Largest payload size requested (inclusive).
    pub max_size: usize,
    /// Probability of allocating rather than freeing when both are possible.
    pub alloc_bias: f64,
}

impl WorkloadConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            min_size: 1,
            max_size: 64,
            alloc_bias: 0.6,
        }
    }

    pub fn sizes(mut self, min_size: usize, max_size: usize) -> Self {
        self.min_size = min_size.max(1);
        self.max_size = max_size.max(self.min_size);
        self
    }

    pub fn alloc_bias(mut self, bias: f64) -> Self {
        self.alloc_bias = bias.clamp(0.0, 1.0);
        self
    }
}

/// What a single workload step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Allocated { ptr: PayloadPtr, size: usize },
    Freed { ptr: PayloadPtr, size: usize },
    Failed { size: usize },
}

/// Running totals across all steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkloadStats {
    pub allocs: usize,
    pub frees: usize,
    pub failures: usize,
}

/// Deterministic random driver for any [`BlockAllocator`].
pub struct Workload {
    config: WorkloadConfig,
    rng: ChaCha8Rng,
    /// Live pointers and their requested sizes, in allocation order.
    live: IndexMap<PayloadPtr, usize>,
    stats: WorkloadStats,
}

impl Workload {
    pub fn new(config: WorkloadConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            live: IndexMap::new(),
            stats: WorkloadStats::default(),
        }
    }

    /// Perform one random allocate or free.
    pub fn step<A: BlockAllocator>(&mut self, alloc: &mut A) -> Step {
        let allocate = self.live.is_empty() || self.rng.random_bool(self.config.alloc_bias);
        if allocate {
            let size = self
                .rng
                .random_range(self.config.min_size..=self.config.max_size);
            match alloc.allocate(size) {
                Ok(ptr) => {
                    self.live.insert(ptr, size);
                    self.stats.allocs += 1;
                    Step::Allocated { ptr, size }
                }
                Err(_) => {
                    self.stats.failures += 1;
                    Step::Failed { size }
                }
            }
        } else {
            let index = self.rng.random_range(0..self.live.len());
            let (ptr, size) = self
                .live
                .swap_remove_index(index)
                .expect("index drawn from live range");
            alloc.free(ptr);
            self.stats.frees += 1;
            Step::Freed { ptr, size }
        }
    }

    /// Run `steps` random steps, calling `inspect` after each.
    pub fn run_with<A, F>(&mut self, alloc: &mut A, steps: usize, mut inspect: F) -> WorkloadStats
    where
        A: BlockAllocator,
        F: FnMut(&A, Step),
    {
        for _ in 0..steps {
            let step = self.step(alloc);
            inspect(alloc, step);
        }
        self.stats
    }

    /// Run `steps` random steps.
    pub fn run<A: BlockAllocator>(&mut self, alloc: &mut A, steps: usize) -> WorkloadStats {
        self.run_with(alloc, steps, |_, _| {})
    }

    /// Free every live pointer, oldest first.
    pub fn drain<A: BlockAllocator>(&mut self, alloc: &mut A) {
        for (ptr, _) in self.live.drain(..) {
            alloc.free(ptr);
            self.stats.frees += 1;
        }
    }

    /// Pointers allocated and not yet freed, with their requested sizes.
    pub fn live(&self) -> &IndexMap<PayloadPtr, usize> {
        &self.live
    }

    pub fn stats(&self) -> WorkloadStats {
        self.stats
    }
}
