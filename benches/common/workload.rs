//! Workload generators for hit-rate benchmarks.
//!
//! Key streams are seeded so every run sees the same sequence.

use memocache::Key;
use memocache::decorator::CachingProvider;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform random keys in `[0, universe)`.
    Uniform,
    /// Hot/cold split with a configurable hot fraction and hot access probability.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Sequential scan in `[0, universe)`.
    Scan,
    /// Zipfian distribution. `theta` controls skew: 0.0 = uniform, 0.99 = highly skewed.
    Zipfian { theta: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: Key,
    pub workload: Workload,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn generator(self) -> WorkloadGenerator {
        WorkloadGenerator::new(self.universe, self.workload, self.seed)
    }
}

#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    universe: Key,
    workload: Workload,
    rng: StdRng,
    scan_pos: Key,
    zipfian: Option<ZipfianState>,
}

impl WorkloadGenerator {
    pub fn new(universe: Key, workload: Workload, seed: u64) -> Self {
        let universe = universe.max(1);
        let zipfian = match workload {
            Workload::Zipfian { theta } => Some(ZipfianState::new(universe, theta)),
            _ => None,
        };
        Self {
            universe,
            workload,
            rng: StdRng::seed_from_u64(seed),
            scan_pos: 0,
            zipfian,
        }
    }

    pub fn next_key(&mut self) -> Key {
        match self.workload {
            Workload::Uniform => self.rng.gen_range(0..self.universe),
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot_size = ((self.universe as f64) * hot_fraction.clamp(0.0, 1.0)).round() as Key;
                let hot_size = hot_size.clamp(1, self.universe);
                if self.rng.gen_bool(hot_prob.clamp(0.0, 1.0)) || hot_size == self.universe {
                    self.rng.gen_range(0..hot_size)
                } else {
                    self.rng.gen_range(hot_size..self.universe)
                }
            },
            Workload::Scan => {
                let key = self.scan_pos;
                self.scan_pos = (self.scan_pos + 1) % self.universe;
                key
            },
            Workload::Zipfian { .. } => match &self.zipfian {
                Some(zipf) => zipf.sample(self.rng.r#gen::<f64>()),
                None => 0,
            },
        }
    }
}

/// Drive `operations` calls from `generator` through a caching provider.
pub fn run_calls<C: ?Sized, V: Clone>(
    provider: &mut CachingProvider<'_, C, V>,
    context: &C,
    generator: &mut WorkloadGenerator,
    operations: usize,
) {
    for _ in 0..operations {
        let key = generator.next_key();
        let _ = provider.call(context, key);
    }
}

/// Zipfian distribution state for inverse CDF sampling (YCSB algorithm).
#[derive(Debug, Clone)]
struct ZipfianState {
    n: Key,
    theta: f64,
    zeta_n: f64,
    alpha: f64,
    eta: f64,
}

impl ZipfianState {
    fn new(n: Key, theta: f64) -> Self {
        let theta = theta.clamp(0.0, 0.9999);
        let zeta_2 = Self::zeta(2, theta);
        let zeta_n = Self::zeta(n, theta);
        let alpha = 1.0 / (1.0 - theta);
        let eta = (1.0 - (2.0 / n as f64).powf(1.0 - theta)) / (1.0 - zeta_2 / zeta_n);
        Self {
            n,
            theta,
            zeta_n,
            alpha,
            eta,
        }
    }

    /// zeta(n, theta) = sum(1/i^theta for i in 1..=n)
    fn zeta(n: Key, theta: f64) -> f64 {
        (1..=n).map(|i| 1.0 / (i as f64).powf(theta)).sum()
    }

    /// Sample given uniform `u` in [0, 1).
    fn sample(&self, u: f64) -> Key {
        let uz = u * self.zeta_n;
        if uz < 1.0 {
            return 0;
        }
        if uz < 1.0 + 0.5_f64.powf(self.theta) {
            return 1;
        }
        let spread = (self.n as f64) * (self.eta * u - self.eta + 1.0).powf(self.alpha);
        (spread as Key).min(self.n - 1)
    }
}
